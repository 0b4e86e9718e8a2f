use thiserror::Error;

use crate::{BasicBlock, BlockId, Cfg, Target};

/// Errors found while checking a block array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
  /// A successor names a block outside the array.
  #[error("{block} jumps to {target}, but the cfg has {len} blocks")]
  InvalidSuccessor { block: BlockId, target: BlockId, len: usize },

  /// A multiway block whose case lists differ in length.
  #[error("{block} has {values} case values but {successors} case successors")]
  CaseArityMismatch {
    block: BlockId,
    values: usize,
    successors: usize,
  },

  #[error("entry block {entry} is outside the cfg ({len} blocks)")]
  InvalidEntry { entry: usize, len: usize },
}

pub type VerifyResult = Result<(), Vec<VerifyError>>;

/// Checks every successor of every block, and the entry point. An empty cfg
/// accepts entry 0.
pub fn verify_cfg(
  cfg: &Cfg,
  entry: usize,
) -> VerifyResult {
  let mut errors = Vec::new();
  let len = cfg.len();

  if entry >= len && !(entry == 0 && cfg.is_empty()) {
    errors.push(VerifyError::InvalidEntry { entry, len });
  }

  for (id, block) in cfg.iter() {
    if let BasicBlock::Multiway {
      case_values,
      case_successors,
      ..
    } = block
    {
      if case_values.len() != case_successors.len() {
        errors.push(VerifyError::CaseArityMismatch {
          block: id,
          values: case_values.len(),
          successors: case_successors.len(),
        });
      }
    }

    for successor in block.successors() {
      if let Target::Block(target) = successor {
        if target.index() >= len {
          errors.push(VerifyError::InvalidSuccessor {
            block: id,
            target: *target,
            len,
          });
        }
      }
    }
  }

  if errors.is_empty() { Ok(()) } else { Err(errors) }
}
