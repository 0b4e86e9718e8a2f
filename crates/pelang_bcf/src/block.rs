use std::fmt::{self, Display, Formatter};

use pelang_ast::{Expression, Statement};
use serde::Serialize;

/// Position of a block in the block array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BlockId(u32);

impl BlockId {
  pub fn new(index: u32) -> Self {
    Self(index)
  }

  pub fn index(&self) -> usize {
    self.0 as usize
  }

  pub fn next(&self) -> Self {
    Self(self.0 + 1)
  }
}

impl From<usize> for BlockId {
  fn from(index: usize) -> Self {
    Self(index as u32)
  }
}

impl Display for BlockId {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "bb{}", self.0)
  }
}

/// A resolved successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Target {
  Block(BlockId),
  /// Execution terminates after the current block.
  Exit,
}

pub const NO_SUCCESSOR: Target = Target::Exit;

impl From<BlockId> for Target {
  fn from(id: BlockId) -> Self {
    Target::Block(id)
  }
}

impl Display for Target {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Target::Block(id) => write!(f, "{}", id),
      Target::Exit => write!(f, "exit"),
    }
  }
}

/// Placeholder for a target that is not known yet. Labels are minted
/// downwards from `-1` and never overlap block indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(i32);

impl Label {
  pub fn new(value: i32) -> Self {
    debug_assert!(value < 0, "labels are negative");
    Self(value)
  }

  pub fn value(&self) -> i32 {
    self.0
  }
}

impl Display for Label {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "L{}", self.0.unsigned_abs())
  }
}

/// Successor field while the block array is under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pending {
  Target(Target),
  Label(Label),
}

impl From<Target> for Pending {
  fn from(target: Target) -> Self {
    Pending::Target(target)
  }
}

impl From<BlockId> for Pending {
  fn from(id: BlockId) -> Self {
    Pending::Target(Target::Block(id))
  }
}

impl Display for Pending {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Pending::Target(target) => write!(f, "{}", target),
      Pending::Label(label) => write!(f, "{}", label),
    }
  }
}

/// A basic block. `S` is the successor type: [`Pending`] while lowering,
/// [`Target`] once the array is finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BasicBlock<S = Target> {
  Single {
    body: Statement,
    successor: S,
  },
  Conditional {
    condition: Expression,
    true_successor: S,
    false_successor: S,
  },
  /// `case_successors[i]` is taken when `case_values[i]` equals `value`.
  Multiway {
    value: Expression,
    case_values: Vec<Expression>,
    case_successors: Vec<S>,
    default_successor: S,
  },
}

impl<S> BasicBlock<S> {
  pub fn kind_name(&self) -> &'static str {
    match self {
      BasicBlock::Single { .. } => "single",
      BasicBlock::Conditional { .. } => "conditional",
      BasicBlock::Multiway { .. } => "multiway",
    }
  }

  /// Every successor field, cases before the default.
  pub fn successors(&self) -> Vec<&S> {
    match self {
      BasicBlock::Single { successor, .. } => vec![successor],
      BasicBlock::Conditional {
        true_successor,
        false_successor,
        ..
      } => vec![true_successor, false_successor],
      BasicBlock::Multiway {
        case_successors,
        default_successor,
        ..
      } => case_successors.iter().chain(std::iter::once(default_successor)).collect(),
    }
  }

  pub fn successors_mut(&mut self) -> Vec<&mut S> {
    match self {
      BasicBlock::Single { successor, .. } => vec![successor],
      BasicBlock::Conditional {
        true_successor,
        false_successor,
        ..
      } => vec![true_successor, false_successor],
      BasicBlock::Multiway {
        case_successors,
        default_successor,
        ..
      } => case_successors
        .iter_mut()
        .chain(std::iter::once(default_successor))
        .collect(),
    }
  }

  /// Converts every successor field, stopping at the first failure.
  pub fn try_map_successors<T, E>(
    self,
    mut f: impl FnMut(S) -> Result<T, E>,
  ) -> Result<BasicBlock<T>, E> {
    Ok(match self {
      BasicBlock::Single { body, successor } => BasicBlock::Single {
        body,
        successor: f(successor)?,
      },
      BasicBlock::Conditional {
        condition,
        true_successor,
        false_successor,
      } => BasicBlock::Conditional {
        condition,
        true_successor: f(true_successor)?,
        false_successor: f(false_successor)?,
      },
      BasicBlock::Multiway {
        value,
        case_values,
        case_successors,
        default_successor,
      } => BasicBlock::Multiway {
        value,
        case_values,
        case_successors: case_successors.into_iter().map(&mut f).collect::<Result<_, _>>()?,
        default_successor: f(default_successor)?,
      },
    })
  }
}

#[cfg(test)]
mod tests {
  use pelang_ast::ProgramBuilder;

  use super::*;

  #[test]
  fn successors_list_cases_then_default() {
    let b = ProgramBuilder::new();
    let block = BasicBlock::Multiway {
      value: b.read_local("x"),
      case_values: vec![b.int(0), b.int(1)],
      case_successors: vec![Target::Block(BlockId::new(1)), Target::Block(BlockId::new(2))],
      default_successor: NO_SUCCESSOR,
    };

    let successors: Vec<String> = block.successors().iter().map(|s| s.to_string()).collect();
    assert_eq!(successors, vec!["bb1", "bb2", "exit"]);
  }

  #[test]
  fn mapping_stops_at_unresolved_label() {
    let b = ProgramBuilder::new();
    let block: BasicBlock<Pending> = BasicBlock::Conditional {
      condition: b.bool(true),
      true_successor: Pending::from(BlockId::new(1)),
      false_successor: Pending::Label(Label::new(-3)),
    };

    let result = block.try_map_successors(|s| match s {
      Pending::Target(t) => Ok(t),
      Pending::Label(l) => Err(l),
    });
    assert_eq!(result, Err(Label::new(-3)));
  }

  #[test]
  fn labels_render_by_magnitude() {
    assert_eq!(Label::new(-1).to_string(), "L1");
    assert_eq!(Pending::Label(Label::new(-12)).to_string(), "L12");
    assert_eq!(Pending::from(NO_SUCCESSOR).to_string(), "exit");
  }
}
