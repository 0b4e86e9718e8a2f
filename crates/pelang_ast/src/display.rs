use std::fmt::{self, Display, Formatter};

use crate::{ArrayKind, BinaryOperation, Expression, Literal, Statement};

fn write_list<T: Display>(
  f: &mut Formatter<'_>,
  items: &[T],
) -> fmt::Result {
  for (idx, item) in items.iter().enumerate() {
    if idx > 0 {
      write!(f, ", ")?;
    }
    write!(f, "{}", item)?;
  }
  Ok(())
}

impl Display for Literal {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Literal::Null => write!(f, "null"),
      Literal::Bool(b) => write!(f, "{}", b),
      Literal::Int(i) => write!(f, "{}", i),
      Literal::Str(s) => write!(f, "{:?}", s),
      Literal::Array(items) => {
        write!(f, "[")?;
        write_list(f, items)?;
        write!(f, "]")
      },
    }
  }
}

impl Display for BinaryOperation {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    let symbol = match self {
      BinaryOperation::Add => "+",
      BinaryOperation::Minus => "-",
      BinaryOperation::Div => "/",
      BinaryOperation::LeftShift => "<<",
      BinaryOperation::Equals => "==",
      BinaryOperation::LessThan => "<",
      BinaryOperation::GreaterThan => ">",
    };
    write!(f, "{}", symbol)
  }
}

impl Display for ArrayKind {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ArrayKind::Int => write!(f, "int"),
      ArrayKind::Str => write!(f, "string"),
    }
  }
}

impl Display for Expression {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Expression::Literal(lit) => write!(f, "{}", lit),
      Expression::Function(def) => {
        write!(f, "fn {}(", def.name)?;
        write_list(f, &def.params)?;
        write!(f, ")")
      },
      Expression::NewObject => write!(f, "new {{}}"),
      Expression::NewArray { kind, dimensions } => write!(f, "new {}{}", kind, dimensions),
      Expression::Binary { operation, left, right } => write!(f, "({} {} {})", left, operation, right),
      Expression::Not(operand) => write!(f, "!{}", operand),
      Expression::ReadLocal(name) => write!(f, "{}", name),
      Expression::WriteLocal { name, value } => write!(f, "{} = {}", name, value),
      Expression::ReadGlobal(name) => write!(f, "${}", name),
      Expression::WriteGlobal { name, value } => write!(f, "${} = {}", name, value),
      Expression::ReadArgument(index) => write!(f, "arg{}", index),
      Expression::ReadArray { array, indices } => write!(f, "{}{}", array, indices),
      Expression::WriteArray { array, indices, value } => write!(f, "{}{} = {}", array, indices, value),
      Expression::ReadProperty { receiver, name } => write!(f, "{}.[{}]", receiver, name),
      Expression::WriteProperty { receiver, name, value } => write!(f, "{}.[{}] = {}", receiver, name, value),
      Expression::Invoke { function, arguments } => {
        write!(f, "{}(", function)?;
        write_list(f, arguments)?;
        write!(f, ")")
      },
    }
  }
}

impl Display for Statement {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Statement::Block(statements) => {
        if statements.is_empty() {
          return write!(f, "{{}}");
        }
        write!(f, "{{ ")?;
        for (idx, stmt) in statements.iter().enumerate() {
          if idx > 0 {
            write!(f, "; ")?;
          }
          write!(f, "{}", stmt)?;
        }
        write!(f, " }}")
      },
      Statement::If {
        condition,
        then_branch,
        else_branch,
      } => write!(f, "if {} then {} else {}", condition, then_branch, else_branch),
      Statement::While { condition, body } => write!(f, "while {} do {}", condition, body),
      Statement::Switch {
        value,
        case_values,
        case_bodies,
      } => {
        write!(f, "switch {} {{", value)?;
        for (case_value, body) in case_values.iter().zip(case_bodies) {
          write!(f, " case {}: {};", case_value, body)?;
        }
        write!(f, " }}")
      },
      Statement::Return(value) => write!(f, "return {}", value),
      Statement::Print(value) => write!(f, "print {}", value),
      Statement::Expression(expr) => write!(f, "{}", expr),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::{ProgramBuilder, stmts};

  #[test]
  fn expressions_render_compactly() {
    let b = ProgramBuilder::new();
    assert_eq!(b.increment_local("i", b.int(2)).to_string(), "i = (2 + i)");
    assert_eq!(b.write_global("g", b.int(0)).to_string(), "$g = 0");
    assert_eq!(
      b.read_array(b.read_local("var"), b.ints(&[1, 2])).to_string(),
      "var[1, 2]"
    );
    assert_eq!(
      b.write_property(b.read_local("obj"), b.str("p1"), b.int(10)).to_string(),
      "obj.[\"p1\"] = 10"
    );
    assert_eq!(b.not(b.eq(b.read_argument(0), b.null())).to_string(), "!(arg0 == null)");
  }

  #[test]
  fn statements_render_on_one_line() {
    let b = ProgramBuilder::new();
    let stmt = b.block(stmts![
      b.write_local("i", b.int(0)),
      b.while_(b.lt(b.read_local("i"), b.int(3)), b.increment_local("i", b.int(1))),
      b.return_(b.read_local("i")),
    ]);

    assert_eq!(stmt.to_string(), "{ i = 0; while (i < 3) do i = (1 + i); return i }");
  }

  #[test]
  fn switch_lists_cases_in_order() {
    let b = ProgramBuilder::new();
    let stmt = b.switch(
      b.read_local("x"),
      vec![b.case(b.int(0), b.print(b.str("zero"))), b.case(b.int(1), b.block(vec![]))],
    );

    assert_eq!(stmt.to_string(), "switch x { case 0: print \"zero\"; case 1: {}; }");
  }
}
