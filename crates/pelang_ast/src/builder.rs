use std::sync::Arc;

use crate::{ArrayKind, BinaryOperation, Expression, FunctionDef, Literal, Program, Statement};

/// One `case` arm of a switch: the value it matches and the body it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
  pub value: Expression,
  pub body: Statement,
}

/// Convenience constructors for hand-written programs.
///
/// Locals and globals are addressed by name, so the builder carries no state;
/// it only exists to keep sample programs readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramBuilder;

impl ProgramBuilder {
  pub fn new() -> Self {
    Self
  }

  pub fn root(
    &self,
    name: &str,
    body: impl Into<Statement>,
  ) -> Program {
    Program::new(name, body.into())
  }

  // === Literals ===

  pub fn int(
    &self,
    value: i64,
  ) -> Expression {
    Expression::Literal(Literal::Int(value))
  }

  pub fn str(
    &self,
    value: &str,
  ) -> Expression {
    Expression::Literal(Literal::Str(value.to_string()))
  }

  pub fn bool(
    &self,
    value: bool,
  ) -> Expression {
    Expression::Literal(Literal::Bool(value))
  }

  pub fn null(&self) -> Expression {
    Expression::Literal(Literal::Null)
  }

  pub fn literal(
    &self,
    value: Literal,
  ) -> Expression {
    Expression::Literal(value)
  }

  /// One-dimensional int array literal, also used for index lists.
  pub fn ints(
    &self,
    values: &[i64],
  ) -> Expression {
    Expression::Literal(int_array(values))
  }

  /// Two-dimensional int array literal.
  pub fn int_matrix(
    &self,
    rows: &[&[i64]],
  ) -> Expression {
    Expression::Literal(Literal::Array(rows.iter().map(|row| int_array(row)).collect()))
  }

  pub fn new_object(&self) -> Expression {
    Expression::NewObject
  }

  pub fn new_array(
    &self,
    kind: ArrayKind,
    dimensions: Expression,
  ) -> Expression {
    Expression::NewArray {
      kind,
      dimensions: Box::new(dimensions),
    }
  }

  /// Function literal. The body is prefixed with `params[i] = arg{i}` so the
  /// arguments are visible as locals.
  pub fn function(
    &self,
    name: &str,
    params: &[&str],
    body: impl FnOnce(&ProgramBuilder) -> Statement,
  ) -> Expression {
    let mut statements: Vec<Statement> = params
      .iter()
      .enumerate()
      .map(|(idx, param)| Statement::Expression(self.write_local(param, self.read_argument(idx))))
      .collect();
    statements.push(body(self));

    Expression::Function(Arc::new(FunctionDef {
      name: name.to_string(),
      params: params.iter().map(|p| p.to_string()).collect(),
      body: Statement::Block(statements),
    }))
  }

  // === Operators ===

  fn binary(
    &self,
    operation: BinaryOperation,
    left: Expression,
    right: Expression,
  ) -> Expression {
    Expression::Binary {
      operation,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  pub fn add(
    &self,
    left: Expression,
    right: Expression,
  ) -> Expression {
    self.binary(BinaryOperation::Add, left, right)
  }

  /// `a + (b + (c + ...))`. Returns `None` for fewer than two operands.
  pub fn add_all(
    &self,
    operands: Vec<Expression>,
  ) -> Option<Expression> {
    if operands.len() < 2 {
      return None;
    }

    let mut operands = operands.into_iter().rev();
    let last = operands.next()?;
    Some(operands.fold(last, |acc, operand| self.add(operand, acc)))
  }

  pub fn minus(
    &self,
    left: Expression,
    right: Expression,
  ) -> Expression {
    self.binary(BinaryOperation::Minus, left, right)
  }

  /// `a - (b + c + ...)`. Returns `None` for fewer than two operands.
  pub fn minus_all(
    &self,
    operands: Vec<Expression>,
  ) -> Option<Expression> {
    if operands.len() < 2 {
      return None;
    }

    let mut operands = operands.into_iter();
    let first = operands.next()?;
    let rest: Vec<Expression> = operands.collect();
    let subtrahend = if rest.len() == 1 {
      rest.into_iter().next()?
    } else {
      self.add_all(rest)?
    };

    Some(self.minus(first, subtrahend))
  }

  pub fn div(
    &self,
    left: Expression,
    right: Expression,
  ) -> Expression {
    self.binary(BinaryOperation::Div, left, right)
  }

  pub fn left_shift(
    &self,
    left: Expression,
    right: Expression,
  ) -> Expression {
    self.binary(BinaryOperation::LeftShift, left, right)
  }

  pub fn eq(
    &self,
    left: Expression,
    right: Expression,
  ) -> Expression {
    self.binary(BinaryOperation::Equals, left, right)
  }

  pub fn lt(
    &self,
    left: Expression,
    right: Expression,
  ) -> Expression {
    self.binary(BinaryOperation::LessThan, left, right)
  }

  pub fn gt(
    &self,
    left: Expression,
    right: Expression,
  ) -> Expression {
    self.binary(BinaryOperation::GreaterThan, left, right)
  }

  pub fn not(
    &self,
    operand: Expression,
  ) -> Expression {
    Expression::Not(Box::new(operand))
  }

  // === Storage ===

  pub fn read_local(
    &self,
    name: &str,
  ) -> Expression {
    Expression::ReadLocal(name.to_string())
  }

  pub fn write_local(
    &self,
    name: &str,
    value: Expression,
  ) -> Expression {
    Expression::WriteLocal {
      name: name.to_string(),
      value: Box::new(value),
    }
  }

  /// `name = value + name`
  pub fn increment_local(
    &self,
    name: &str,
    value: Expression,
  ) -> Expression {
    self.write_local(name, self.add(value, self.read_local(name)))
  }

  pub fn read_global(
    &self,
    name: &str,
  ) -> Expression {
    Expression::ReadGlobal(name.to_string())
  }

  pub fn write_global(
    &self,
    name: &str,
    value: Expression,
  ) -> Expression {
    Expression::WriteGlobal {
      name: name.to_string(),
      value: Box::new(value),
    }
  }

  pub fn increment_global(
    &self,
    name: &str,
    value: Expression,
  ) -> Expression {
    self.write_global(name, self.add(value, self.read_global(name)))
  }

  pub fn read_argument(
    &self,
    index: usize,
  ) -> Expression {
    Expression::ReadArgument(index)
  }

  pub fn read_array(
    &self,
    array: Expression,
    indices: Expression,
  ) -> Expression {
    Expression::ReadArray {
      array: Box::new(array),
      indices: Box::new(indices),
    }
  }

  pub fn write_array(
    &self,
    array: Expression,
    indices: Expression,
    value: Expression,
  ) -> Expression {
    Expression::WriteArray {
      array: Box::new(array),
      indices: Box::new(indices),
      value: Box::new(value),
    }
  }

  pub fn read_property(
    &self,
    receiver: Expression,
    name: Expression,
  ) -> Expression {
    Expression::ReadProperty {
      receiver: Box::new(receiver),
      name: Box::new(name),
    }
  }

  pub fn write_property(
    &self,
    receiver: Expression,
    name: Expression,
    value: Expression,
  ) -> Expression {
    Expression::WriteProperty {
      receiver: Box::new(receiver),
      name: Box::new(name),
      value: Box::new(value),
    }
  }

  pub fn invoke(
    &self,
    function: Expression,
    arguments: Vec<Expression>,
  ) -> Expression {
    Expression::Invoke {
      function: Box::new(function),
      arguments,
    }
  }

  // === Statements ===

  pub fn block(
    &self,
    statements: Vec<Statement>,
  ) -> Statement {
    Statement::Block(statements)
  }

  pub fn if_else(
    &self,
    condition: Expression,
    then_branch: impl Into<Statement>,
    else_branch: impl Into<Statement>,
  ) -> Statement {
    Statement::If {
      condition,
      then_branch: Box::new(then_branch.into()),
      else_branch: Box::new(else_branch.into()),
    }
  }

  /// `if` without an `else`: the else branch is an empty block.
  pub fn if_(
    &self,
    condition: Expression,
    then_branch: impl Into<Statement>,
  ) -> Statement {
    self.if_else(condition, then_branch, Statement::empty())
  }

  pub fn while_(
    &self,
    condition: Expression,
    body: impl Into<Statement>,
  ) -> Statement {
    Statement::While {
      condition,
      body: Box::new(body.into()),
    }
  }

  pub fn case(
    &self,
    value: Expression,
    body: impl Into<Statement>,
  ) -> Case {
    Case {
      value,
      body: body.into(),
    }
  }

  pub fn switch(
    &self,
    value: Expression,
    cases: Vec<Case>,
  ) -> Statement {
    let (case_values, case_bodies) = cases.into_iter().map(|case| (case.value, case.body)).unzip();

    Statement::Switch {
      value,
      case_values,
      case_bodies,
    }
  }

  pub fn return_(
    &self,
    value: Expression,
  ) -> Statement {
    Statement::Return(value)
  }

  pub fn print(
    &self,
    value: Expression,
  ) -> Statement {
    Statement::Print(value)
  }
}

fn int_array(values: &[i64]) -> Literal {
  Literal::Array(values.iter().map(|v| Literal::Int(*v)).collect())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn function_prologue_binds_parameters() {
    let b = ProgramBuilder::new();
    let Expression::Function(def) = b.function("add", &["a", "b"], |f| {
      f.return_(f.add(f.read_local("a"), f.read_local("b")))
    }) else {
      panic!("expected a function literal");
    };

    assert_eq!(def.params, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(def.body.to_string(), "{ a = arg0; b = arg1; return (a + b) }");
  }

  #[test]
  fn add_all_nests_to_the_right() {
    let b = ProgramBuilder::new();
    let expr = b.add_all(vec![b.int(1), b.int(2), b.int(3)]).unwrap();
    assert_eq!(expr.to_string(), "(1 + (2 + 3))");
    assert!(b.add_all(vec![b.int(1)]).is_none());
  }

  #[test]
  fn minus_all_subtracts_the_sum_of_the_rest() {
    let b = ProgramBuilder::new();
    assert_eq!(b.minus_all(vec![b.int(9), b.int(2)]).unwrap().to_string(), "(9 - 2)");
    assert_eq!(
      b.minus_all(vec![b.int(9), b.int(2), b.int(3)]).unwrap().to_string(),
      "(9 - (2 + 3))"
    );
  }

  #[test]
  fn switch_keeps_case_lists_parallel() {
    let b = ProgramBuilder::new();
    let Statement::Switch {
      case_values,
      case_bodies,
      ..
    } = b.switch(
      b.read_local("x"),
      vec![b.case(b.int(0), b.print(b.int(0))), b.case(b.int(1), b.print(b.int(1)))],
    )
    else {
      panic!("expected a switch");
    };

    assert_eq!(case_values.len(), 2);
    assert_eq!(case_bodies.len(), 2);
  }

  #[test]
  fn if_without_else_gets_empty_block() {
    let b = ProgramBuilder::new();
    let Statement::If { else_branch, .. } = b.if_(b.bool(true), b.print(b.int(1))) else {
      panic!("expected an if");
    };
    assert_eq!(*else_branch, Statement::empty());
  }
}
