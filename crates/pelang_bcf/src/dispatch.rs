use pelang_config::DebugTrace;
use pelang_log::trace_dbg;
use pelang_runtime::{Completion, Env, RuntimeError, Value, eval, eval_condition, exec};

use crate::{BasicBlock, BlockId, Cfg, Target};

/// Result of running one block.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
  /// The block finished normally with `value`; continue at `next`.
  Continue { value: Value, next: Target },
  /// The block executed a `return`.
  Halt(Value),
}

/// Runs a block array by index. The only state it keeps is the instruction
/// pointer; everything else lives in the environment.
pub struct Dispatcher<'c> {
  cfg: &'c Cfg,
  step_limit: Option<u64>,
}

impl<'c> Dispatcher<'c> {
  pub fn new(cfg: &'c Cfg) -> Self {
    Self { cfg, step_limit: None }
  }

  /// Fail with [`RuntimeError::StepLimitExceeded`] after `limit` blocks.
  pub fn with_step_limit(
    mut self,
    limit: Option<u64>,
  ) -> Self {
    self.step_limit = limit;
    self
  }

  pub fn run(
    &self,
    entry: usize,
    env: &mut Env<'_>,
  ) -> Result<Completion, RuntimeError> {
    let len = self.cfg.len();
    if self.cfg.is_empty() && entry == 0 {
      return Ok(Completion::Normal(Value::Null));
    }
    if entry >= len {
      return Err(RuntimeError::InvalidBlockIndex { index: entry, len });
    }

    let mut current = Target::Block(BlockId::from(entry));
    let mut last = Value::Null;
    let mut steps: u64 = 0;

    while let Target::Block(id) = current {
      if let Some(limit) = self.step_limit {
        if steps >= limit {
          return Err(RuntimeError::StepLimitExceeded { limit });
        }
      }
      steps += 1;

      let block = self.cfg.get(id).ok_or(RuntimeError::InvalidBlockIndex {
        index: id.index(),
        len,
      })?;

      match self.execute_block(block, env)? {
        Step::Continue { value, next } => {
          trace_dbg!(env.config(), DebugTrace::Dispatch, "{} -> {}", id, next);
          last = value;
          current = next;
        },
        Step::Halt(value) => {
          trace_dbg!(env.config(), DebugTrace::Dispatch, "{} returned {}", id, value);
          return Ok(Completion::Return(value));
        },
      }
    }

    trace_dbg!(env.config(), DebugTrace::Dispatch, "exit after {} step(s)", steps);
    Ok(Completion::Normal(last))
  }

  pub fn execute_block(
    &self,
    block: &BasicBlock,
    env: &mut Env<'_>,
  ) -> Result<Step, RuntimeError> {
    match block {
      BasicBlock::Single { body, successor } => Ok(match exec(body, env)? {
        Completion::Return(value) => Step::Halt(value),
        Completion::Normal(value) => Step::Continue {
          value,
          next: *successor,
        },
      }),
      BasicBlock::Conditional {
        condition,
        true_successor,
        false_successor,
      } => {
        let taken = eval_condition(condition, env)?;
        Ok(Step::Continue {
          value: Value::Bool(taken),
          next: if taken { *true_successor } else { *false_successor },
        })
      },
      BasicBlock::Multiway {
        value,
        case_values,
        case_successors,
        default_successor,
      } => {
        if case_values.len() != case_successors.len() {
          return Err(RuntimeError::MalformedSwitch {
            values: case_values.len(),
            bodies: case_successors.len(),
          });
        }

        let value = eval(value, env)?;
        for (case_value, successor) in case_values.iter().zip(case_successors) {
          if eval(case_value, env)? == value {
            return Ok(Step::Continue {
              value,
              next: *successor,
            });
          }
        }

        Ok(Step::Continue {
          value,
          next: *default_successor,
        })
      },
    }
  }
}

/// Run `cfg` from `entry` until it exits or returns.
pub fn dispatch(
  cfg: &Cfg,
  entry: usize,
  env: &mut Env<'_>,
) -> Result<Completion, RuntimeError> {
  Dispatcher::new(cfg).run(entry, env)
}
