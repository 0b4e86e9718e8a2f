mod builder;

use pelang_ast::{Expression, Statement};
use pelang_config::{DebugTrace, PelangConfig};
use pelang_log::{log_trc, trace_dbg};
use thiserror::Error;

use crate::{BasicBlock, BlockId, Cfg, Label, Pending, Target};

pub use builder::{CfgBuilder, Patch};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
  #[error("switch has {values} case values but {bodies} case bodies")]
  CaseArityMismatch { values: usize, bodies: usize },

  #[error("label {label} in {block} was never resolved")]
  UnresolvedLabel { block: BlockId, label: Label },
}

/// Where a construct continues once it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// The next block to be allocated.
  Counter,
  /// The innermost open construct's exit.
  Label,
}

/// Lowers a statement tree into a block array.
pub struct Lowering<'a> {
  config: &'a PelangConfig,
  builder: CfgBuilder,
}

impl<'a> Lowering<'a> {
  pub fn new(config: &'a PelangConfig) -> Self {
    Self {
      config,
      builder: CfgBuilder::new(),
    }
  }

  /// Lower `root` and return the block array together with every backpatch
  /// that was applied.
  pub fn lower_with_patches(
    mut self,
    root: Statement,
  ) -> Result<(Cfg, Vec<Patch>), LowerError> {
    self.builder.push_label(Pending::Target(Target::Exit));
    self.lower_node(root, Mode::Label)?;
    self.builder.pop_label();

    let (cfg, patches) = self.builder.finish()?;
    trace_dbg!(
      self.config,
      DebugTrace::Lowering,
      "{} block(s), {} patch(es)",
      cfg.len(),
      patches.len()
    );

    Ok((cfg, patches))
  }

  pub fn lower(
    self,
    root: Statement,
  ) -> Result<Cfg, LowerError> {
    self.lower_with_patches(root).map(|(cfg, _)| cfg)
  }

  /// Lower one statement and return its entry target: its first block, or
  /// its exit when it emits nothing.
  fn lower_node(
    &mut self,
    stmt: Statement,
    mode: Mode,
  ) -> Result<Pending, LowerError> {
    match stmt {
      Statement::Block(statements) => self.lower_sequence(statements, mode),
      Statement::If {
        condition,
        then_branch,
        else_branch,
      } => self.lower_branch(condition, *then_branch, *else_branch, mode),
      Statement::While { condition, body } => self.lower_loop(condition, *body, mode),
      Statement::Switch {
        value,
        case_values,
        case_bodies,
      } => self.lower_switch(value, case_values, case_bodies, mode),
      leaf => Ok(self.emit_single(leaf, mode)),
    }
  }

  fn lower_sequence(
    &mut self,
    statements: Vec<Statement>,
    mode: Mode,
  ) -> Result<Pending, LowerError> {
    let mut items = Vec::with_capacity(statements.len());
    flatten_into(statements, &mut items);

    let Some(last) = items.len().checked_sub(1) else {
      return Ok(self.exit_for(mode));
    };

    let entry = self.builder.next_block();
    for (idx, item) in items.into_iter().enumerate() {
      let item_mode = if idx == last { mode } else { Mode::Counter };

      if item.is_control_flow() {
        self.flush_pending(Mode::Counter);
        self.lower_node(item, item_mode)?;
      } else {
        self.builder.defer(item);
      }
    }
    self.flush_pending(mode);

    Ok(Pending::from(entry))
  }

  /// Lower a branch arm or a case body. Arms always continue at the exit of
  /// the construct they belong to.
  fn lower_arm(
    &mut self,
    arm: Statement,
  ) -> Result<Pending, LowerError> {
    self.lower_node(arm, Mode::Label)
  }

  fn lower_branch(
    &mut self,
    condition: Expression,
    then_branch: Statement,
    else_branch: Statement,
    mode: Mode,
  ) -> Result<Pending, LowerError> {
    let label = self.builder.mint_label();
    let start = self.emit(BasicBlock::Conditional {
      condition,
      true_successor: Pending::Label(label),
      false_successor: Pending::Label(label),
    });

    self.builder.push_label(Pending::Label(label));
    let then_entry = self.lower_arm(then_branch)?;
    let else_entry = self.lower_arm(else_branch)?;
    self.builder.pop_label();

    if let Some(BasicBlock::Conditional {
      true_successor,
      false_successor,
      ..
    }) = self.builder.block_mut(start)
    {
      *true_successor = then_entry;
      *false_successor = else_entry;
    }

    let exit = self.exit_for(mode);
    self.patch(start, label, exit);

    Ok(Pending::from(start))
  }

  fn lower_loop(
    &mut self,
    condition: Expression,
    body: Statement,
    mode: Mode,
  ) -> Result<Pending, LowerError> {
    let head = self.emit(BasicBlock::Conditional {
      condition,
      true_successor: Pending::Target(Target::Exit),
      false_successor: Pending::Target(Target::Exit),
    });

    // The body loops back to the condition.
    self.builder.push_label(Pending::from(head));
    let body_entry = self.lower_arm(body)?;
    self.builder.pop_label();

    let exit = self.exit_for(mode);
    if let Some(BasicBlock::Conditional {
      true_successor,
      false_successor,
      ..
    }) = self.builder.block_mut(head)
    {
      *true_successor = body_entry;
      *false_successor = exit;
    }

    Ok(Pending::from(head))
  }

  fn lower_switch(
    &mut self,
    value: Expression,
    case_values: Vec<Expression>,
    case_bodies: Vec<Statement>,
    mode: Mode,
  ) -> Result<Pending, LowerError> {
    if case_values.len() != case_bodies.len() {
      return Err(LowerError::CaseArityMismatch {
        values: case_values.len(),
        bodies: case_bodies.len(),
      });
    }

    let label = self.builder.mint_label();
    let start = self.emit(BasicBlock::Multiway {
      value,
      case_successors: vec![Pending::Label(label); case_values.len()],
      case_values,
      default_successor: Pending::Label(label),
    });

    self.builder.push_label(Pending::Label(label));
    let mut entries = Vec::with_capacity(case_bodies.len());
    for body in case_bodies {
      entries.push(self.lower_arm(body)?);
    }
    self.builder.pop_label();

    if let Some(BasicBlock::Multiway { case_successors, .. }) = self.builder.block_mut(start) {
      *case_successors = entries;
    }

    let exit = self.exit_for(mode);
    self.patch(start, label, exit);

    Ok(Pending::from(start))
  }

  /// Emit a single-successor block. In `Counter` mode its successor is the
  /// block right after it.
  fn emit_single(
    &mut self,
    body: Statement,
    mode: Mode,
  ) -> Pending {
    let id = self.builder.next_block();
    let successor = match mode {
      Mode::Counter => Pending::from(id.next()),
      Mode::Label => self.builder.current_label(),
    };

    self.emit(BasicBlock::Single { body, successor });
    Pending::from(id)
  }

  fn flush_pending(
    &mut self,
    mode: Mode,
  ) {
    if let Some(body) = self.builder.take_pending() {
      let id = self.emit_single(body, mode);
      log_trc!(self.config, "flushed pending statements into {}", id);
    }
  }

  /// Exit of a construct that has just been lowered.
  fn exit_for(
    &self,
    mode: Mode,
  ) -> Pending {
    match mode {
      Mode::Counter => Pending::from(self.builder.next_block()),
      Mode::Label => self.builder.current_label(),
    }
  }

  fn emit(
    &mut self,
    block: BasicBlock<Pending>,
  ) -> BlockId {
    let kind = block.kind_name();
    let id = self.builder.emit(block);
    trace_dbg!(self.config, DebugTrace::Lowering, "emit {} {}", kind, id);
    id
  }

  fn patch(
    &mut self,
    start: BlockId,
    label: Label,
    resolved: Pending,
  ) {
    let patch = self.builder.patch(start, label, resolved);
    trace_dbg!(
      self.config,
      DebugTrace::Lowering,
      "patch {} -> {} in [{}, {}) rewrote {:?}",
      patch.label,
      patch.resolved,
      patch.scanned.start,
      patch.scanned.end,
      patch.rewritten.iter().map(|id| id.to_string()).collect::<Vec<_>>()
    );
  }
}

/// Inline nested sequences and drop the ones that emit nothing, so that the
/// last item is the last statement that actually runs.
fn flatten_into(
  statements: Vec<Statement>,
  out: &mut Vec<Statement>,
) {
  for stmt in statements {
    match stmt {
      Statement::Block(inner) => flatten_into(inner, out),
      other => out.push(other),
    }
  }
}

/// Lower a statement tree with logging disabled.
pub fn lower(root: Statement) -> Result<Cfg, LowerError> {
  let config = PelangConfig::silent();
  Lowering::new(&config).lower(root)
}

/// Lower a statement tree, tracing under the `lowering` category of `config`.
pub fn lower_with_config(
  root: Statement,
  config: &PelangConfig,
) -> Result<(Cfg, Vec<Patch>), LowerError> {
  Lowering::new(config).lower_with_patches(root)
}
