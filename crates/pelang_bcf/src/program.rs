use serde::Serialize;

use crate::{BasicBlock, BlockId, VerifyError, verify_cfg};

/// A finished block array. Block 0 is the entry and every successor is
/// either a valid index into `blocks` or the exit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cfg {
  blocks: Vec<BasicBlock>,
}

impl Cfg {
  pub(crate) fn new(blocks: Vec<BasicBlock>) -> Self {
    Self { blocks }
  }

  /// Wraps a hand-built block array after checking its successors.
  pub fn from_blocks(blocks: Vec<BasicBlock>) -> Result<Self, Vec<VerifyError>> {
    let cfg = Self { blocks };
    verify_cfg(&cfg, 0)?;
    Ok(cfg)
  }

  pub fn blocks(&self) -> &[BasicBlock] {
    &self.blocks
  }

  pub fn get(
    &self,
    id: BlockId,
  ) -> Option<&BasicBlock> {
    self.blocks.get(id.index())
  }

  pub fn len(&self) -> usize {
    self.blocks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BasicBlock)> {
    self.blocks.iter().enumerate().map(|(idx, block)| (BlockId::from(idx), block))
  }
}
