use std::ops::Range;

use pelang_ast::Statement;

use crate::{BasicBlock, BlockId, Cfg, Label, Pending, Target};

use super::LowerError;

/// One backpatch: every `label` field in `scanned` was rewritten to
/// `resolved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
  pub label: Label,
  pub scanned: Range<usize>,
  pub rewritten: Vec<BlockId>,
  pub resolved: Pending,
}

/// Builder state for a single lowering run.
pub struct CfgBuilder {
  blocks: Vec<BasicBlock<Pending>>,

  /// Counter for minting labels; decreases from zero.
  label_counter: i32,

  /// Exit target of every open construct, innermost last.
  label_stack: Vec<Pending>,

  /// Simple statements waiting to be coalesced into one block.
  pending: Vec<Statement>,

  patches: Vec<Patch>,
}

impl CfgBuilder {
  pub fn new() -> Self {
    Self {
      blocks: Vec::new(),
      label_counter: 0,
      label_stack: Vec::new(),
      pending: Vec::new(),
      patches: Vec::new(),
    }
  }

  /// Index the next emitted block will get.
  pub fn next_block(&self) -> BlockId {
    BlockId::from(self.blocks.len())
  }

  pub fn mint_label(&mut self) -> Label {
    self.label_counter -= 1;
    Label::new(self.label_counter)
  }

  pub fn push_label(
    &mut self,
    target: Pending,
  ) {
    self.label_stack.push(target);
  }

  pub fn pop_label(&mut self) -> Option<Pending> {
    self.label_stack.pop()
  }

  /// Exit of the innermost open construct. Outside any construct this is the
  /// exit of the whole program.
  pub fn current_label(&self) -> Pending {
    self.label_stack.last().copied().unwrap_or(Pending::Target(Target::Exit))
  }

  /// Append a block and return its index.
  pub fn emit(
    &mut self,
    block: BasicBlock<Pending>,
  ) -> BlockId {
    let id = self.next_block();
    self.blocks.push(block);
    id
  }

  pub fn block_mut(
    &mut self,
    id: BlockId,
  ) -> Option<&mut BasicBlock<Pending>> {
    self.blocks.get_mut(id.index())
  }

  pub fn defer(
    &mut self,
    stmt: Statement,
  ) {
    self.pending.push(stmt);
  }

  pub fn has_pending(&self) -> bool {
    !self.pending.is_empty()
  }

  /// Drain the pending buffer into a single body. `None` when empty.
  pub fn take_pending(&mut self) -> Option<Statement> {
    match self.pending.len() {
      0 => None,
      1 => self.pending.pop(),
      _ => Some(Statement::Block(std::mem::take(&mut self.pending))),
    }
  }

  /// Rewrite every successor field equal to `label` in the blocks created
  /// since `start`.
  pub fn patch(
    &mut self,
    start: BlockId,
    label: Label,
    resolved: Pending,
  ) -> &Patch {
    let scanned = start.index()..self.blocks.len();
    let mut rewritten = Vec::new();

    for idx in scanned.clone() {
      let mut touched = false;
      for successor in self.blocks[idx].successors_mut() {
        if *successor == Pending::Label(label) {
          *successor = resolved;
          touched = true;
        }
      }
      if touched {
        rewritten.push(BlockId::from(idx));
      }
    }

    self.patches.push(Patch {
      label,
      scanned,
      rewritten,
      resolved,
    });
    &self.patches[self.patches.len() - 1]
  }

  /// Freeze the block array. Fails if any successor is still a label.
  pub fn finish(self) -> Result<(Cfg, Vec<Patch>), LowerError> {
    let blocks = self
      .blocks
      .into_iter()
      .enumerate()
      .map(|(idx, block)| {
        block.try_map_successors(|successor| match successor {
          Pending::Target(target) => Ok(target),
          Pending::Label(label) => Err(LowerError::UnresolvedLabel {
            block: BlockId::from(idx),
            label,
          }),
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok((Cfg::new(blocks), self.patches))
  }
}

impl Default for CfgBuilder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use pelang_ast::ProgramBuilder;

  use super::*;

  #[test]
  fn labels_are_minted_downwards() {
    let mut builder = CfgBuilder::new();
    assert_eq!(builder.mint_label().value(), -1);
    assert_eq!(builder.mint_label().value(), -2);
    assert_eq!(builder.current_label(), Pending::Target(Target::Exit));
  }

  #[test]
  fn pending_statements_coalesce() {
    let b = ProgramBuilder::new();
    let mut builder = CfgBuilder::new();
    assert_eq!(builder.take_pending(), None);

    builder.defer(b.print(b.int(1)));
    assert_eq!(builder.take_pending(), Some(b.print(b.int(1))));

    builder.defer(b.print(b.int(1)));
    builder.defer(b.print(b.int(2)));
    assert_eq!(
      builder.take_pending(),
      Some(Statement::Block(vec![b.print(b.int(1)), b.print(b.int(2))]))
    );
    assert!(!builder.has_pending());
  }

  #[test]
  fn patch_only_scans_from_start() {
    let b = ProgramBuilder::new();
    let mut builder = CfgBuilder::new();
    let label = builder.mint_label();

    for _ in 0..3 {
      builder.emit(BasicBlock::Single {
        body: b.print(b.int(0)),
        successor: Pending::Label(label),
      });
    }

    let patch = builder.patch(BlockId::new(1), label, Pending::from(Target::Exit)).clone();
    assert_eq!(patch.scanned, 1..3);
    assert_eq!(patch.rewritten, vec![BlockId::new(1), BlockId::new(2)]);

    assert_eq!(
      builder.finish().unwrap_err(),
      LowerError::UnresolvedLabel {
        block: BlockId::new(0),
        label
      }
    );
  }
}
