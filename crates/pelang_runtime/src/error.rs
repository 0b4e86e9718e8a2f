use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
  #[error("type mismatch: expected {expected}, found {found}")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },

  #[error("undefined local '{0}'")]
  UndefinedLocal(String),

  #[error("undefined global '{0}'")]
  UndefinedGlobal(String),

  #[error("argument {index} out of range ({count} passed)")]
  ArgumentOutOfRange { index: usize, count: usize },

  #[error("index {index} out of bounds for length {len}")]
  IndexOutOfBounds { index: i64, len: usize },

  #[error("cannot index into {found}")]
  NotIndexable { found: &'static str },

  #[error("array write needs at least one index")]
  EmptyIndexList,

  #[error("negative array dimension {0}")]
  NegativeArrayDimension(i64),

  #[error("array of {requested} slots exceeds the limit of {limit}")]
  ArrayTooLarge { requested: u128, limit: u64 },

  #[error("division by zero")]
  DivisionByZero,

  #[error("property access on {found}")]
  PropertyOnNonObject { found: &'static str },

  #[error("call depth limit of {limit} exceeded")]
  CallDepthExceeded { limit: u32 },

  #[error("step limit of {limit} exceeded")]
  StepLimitExceeded { limit: u64 },

  #[error("invalid block index {index} (cfg has {len} blocks)")]
  InvalidBlockIndex { index: usize, len: usize },

  #[error("switch has {values} case values but {bodies} case bodies")]
  MalformedSwitch { values: usize, bodies: usize },
}

impl RuntimeError {
  pub fn type_mismatch(
    expected: &'static str,
    found: &crate::Value,
  ) -> Self {
    RuntimeError::TypeMismatch {
      expected,
      found: found.type_name(),
    }
  }
}
