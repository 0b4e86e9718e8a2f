use std::collections::HashMap;

use pelang_config::PelangConfig;

use crate::{RuntimeError, Value};

/// Storage shared by every frame of one run.
#[derive(Debug, Default)]
pub struct State {
  pub config: PelangConfig,
  pub globals: HashMap<String, Value>,
  /// Lines written by `print`, in order.
  pub output: Vec<String>,
  pub call_depth: u32,
}

impl State {
  pub fn new(config: PelangConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub fn silent() -> Self {
    Self::new(PelangConfig::silent())
  }

  pub fn read_global(
    &self,
    name: &str,
  ) -> Result<Value, RuntimeError> {
    self
      .globals
      .get(name)
      .cloned()
      .ok_or_else(|| RuntimeError::UndefinedGlobal(name.to_string()))
  }

  pub fn write_global(
    &mut self,
    name: &str,
    value: Value,
  ) {
    self.globals.insert(name.to_string(), value);
  }
}

/// Per-call storage: locals and the arguments the call received.
#[derive(Debug, Default)]
pub struct Frame {
  pub locals: HashMap<String, Value>,
  pub arguments: Vec<Value>,
}

impl Frame {
  pub fn with_arguments(arguments: Vec<Value>) -> Self {
    Self {
      locals: HashMap::new(),
      arguments,
    }
  }

  pub fn read_local(
    &self,
    name: &str,
  ) -> Result<Value, RuntimeError> {
    self
      .locals
      .get(name)
      .cloned()
      .ok_or_else(|| RuntimeError::UndefinedLocal(name.to_string()))
  }

  pub fn write_local(
    &mut self,
    name: &str,
    value: Value,
  ) {
    self.locals.insert(name.to_string(), value);
  }

  pub fn read_argument(
    &self,
    index: usize,
  ) -> Result<Value, RuntimeError> {
    self
      .arguments
      .get(index)
      .cloned()
      .ok_or(RuntimeError::ArgumentOutOfRange {
        index,
        count: self.arguments.len(),
      })
  }
}

/// The environment an expression is evaluated in.
pub struct Env<'s> {
  pub state: &'s mut State,
  pub frame: Frame,
}

impl<'s> Env<'s> {
  pub fn new(state: &'s mut State) -> Self {
    Self {
      state,
      frame: Frame::default(),
    }
  }

  pub fn config(&self) -> &PelangConfig {
    &self.state.config
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_storage_reports_the_name() {
    let state = State::silent();
    let frame = Frame::default();

    assert_eq!(state.read_global("g"), Err(RuntimeError::UndefinedGlobal("g".to_string())));
    assert_eq!(frame.read_local("i"), Err(RuntimeError::UndefinedLocal("i".to_string())));
  }

  #[test]
  fn arguments_are_positional() {
    let frame = Frame::with_arguments(vec![Value::Int(5), Value::Int(7)]);

    assert_eq!(frame.read_argument(1), Ok(Value::Int(7)));
    assert_eq!(
      frame.read_argument(2),
      Err(RuntimeError::ArgumentOutOfRange { index: 2, count: 2 })
    );
  }
}
