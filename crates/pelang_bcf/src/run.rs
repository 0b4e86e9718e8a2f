use pelang_ast::Program;
use pelang_config::ExecutionMode;
use pelang_log::log_dbg;
use pelang_runtime::{Completion, Env, RuntimeError, State, Value, run_structured};
use thiserror::Error;

use crate::{Cfg, Dispatcher, LowerError, lower_with_config};

#[derive(Debug, Error)]
pub enum ExecError {
  #[error(transparent)]
  Lower(#[from] LowerError),

  #[error(transparent)]
  Runtime(#[from] RuntimeError),
}

/// Run a program in the mode selected by `state.config.run.mode`.
pub fn run_program(
  program: &Program,
  state: &mut State,
) -> Result<Value, ExecError> {
  match state.config.run.mode {
    ExecutionMode::Structured => Ok(run_structured(program, state)?),
    ExecutionMode::Blocks => run_blocks(program, state),
  }
}

/// Lower a program to blocks and dispatch it.
pub fn run_blocks(
  program: &Program,
  state: &mut State,
) -> Result<Value, ExecError> {
  let (cfg, patches) = lower_with_config(program.body.clone(), &state.config)?;
  log_dbg!(
    &state.config,
    "lowered '{}' to {} block(s) with {} patch(es)",
    program.name,
    cfg.len(),
    patches.len()
  );

  Ok(run_cfg(&cfg, state)?)
}

/// Dispatch a finished block array from the configured entry. Falling off
/// the end yields `null`.
pub fn run_cfg(
  cfg: &Cfg,
  state: &mut State,
) -> Result<Value, RuntimeError> {
  let entry = state.config.run.entry;
  let step_limit = state.config.run.max_steps;
  let mut env = Env::new(state);

  match Dispatcher::new(cfg).with_step_limit(step_limit).run(entry, &mut env)? {
    Completion::Return(value) => Ok(value),
    Completion::Normal(_) => Ok(Value::Null),
  }
}
