pub mod builder;
pub mod display;
pub mod samples;

use std::sync::Arc;

use serde::Serialize;

pub use builder::{Case, ProgramBuilder};

/// Literal values that can appear directly in a program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
  Null,
  Bool(bool),
  Int(i64),
  Str(String),
  /// Possibly nested (and jagged) array literal.
  Array(Vec<Literal>),
}

/// Element kind used to fill freshly allocated arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrayKind {
  /// Filled with `0`.
  Int,
  /// Filled with `null`.
  Str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperation {
  Add,
  Minus,
  Div,
  LeftShift,
  Equals,
  LessThan,
  GreaterThan,
}

/// A function literal. Parameters are bound to locals by a prologue the
/// builder prepends to `body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
  pub name: String,
  pub params: Vec<String>,
  pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
  Literal(Literal),
  Function(Arc<FunctionDef>),
  NewObject,
  NewArray {
    kind: ArrayKind,
    /// Evaluates to an int array, one entry per dimension.
    dimensions: Box<Expression>,
  },
  Binary {
    operation: BinaryOperation,
    left: Box<Expression>,
    right: Box<Expression>,
  },
  Not(Box<Expression>),
  ReadLocal(String),
  WriteLocal {
    name: String,
    value: Box<Expression>,
  },
  ReadGlobal(String),
  WriteGlobal {
    name: String,
    value: Box<Expression>,
  },
  ReadArgument(usize),
  ReadArray {
    array: Box<Expression>,
    /// Evaluates to an int array walked through nested arrays.
    indices: Box<Expression>,
  },
  WriteArray {
    array: Box<Expression>,
    indices: Box<Expression>,
    value: Box<Expression>,
  },
  ReadProperty {
    receiver: Box<Expression>,
    name: Box<Expression>,
  },
  WriteProperty {
    receiver: Box<Expression>,
    name: Box<Expression>,
    value: Box<Expression>,
  },
  Invoke {
    function: Box<Expression>,
    arguments: Vec<Expression>,
  },
}

/// Structured statements. `If`, `While` and `Switch` are the control-flow
/// constructs the block lowering has to break apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
  Block(Vec<Statement>),
  If {
    condition: Expression,
    then_branch: Box<Statement>,
    else_branch: Box<Statement>,
  },
  While {
    condition: Expression,
    body: Box<Statement>,
  },
  /// `case_values[i]` selects `case_bodies[i]`. The builder keeps both lists
  /// the same length; the lowering rejects trees where they differ.
  Switch {
    value: Expression,
    case_values: Vec<Expression>,
    case_bodies: Vec<Statement>,
  },
  Return(Expression),
  Print(Expression),
  Expression(Expression),
}

impl Statement {
  pub fn empty() -> Self {
    Statement::Block(Vec::new())
  }

  pub fn is_control_flow(&self) -> bool {
    matches!(
      self,
      Statement::If { .. } | Statement::While { .. } | Statement::Switch { .. }
    )
  }
}

impl From<Expression> for Statement {
  fn from(expression: Expression) -> Self {
    Statement::Expression(expression)
  }
}

/// A named root statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
  pub name: String,
  pub body: Statement,
}

impl Program {
  pub fn new(
    name: impl Into<String>,
    body: Statement,
  ) -> Self {
    Self {
      name: name.into(),
      body,
    }
  }
}

/// Builds a `Vec<Statement>` from a mix of statements and expressions.
///
/// ```ignore
/// b.block(stmts![b.write_local("i", b.int(0)), b.return_(b.read_local("i"))])
/// ```
#[macro_export]
macro_rules! stmts {
  ($($item:expr),* $(,)?) => {
    vec![$(::std::convert::Into::<$crate::Statement>::into($item)),*]
  };
}
