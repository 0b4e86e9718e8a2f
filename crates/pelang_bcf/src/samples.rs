//! Hand-built block arrays that no structured program lowers to.

use pelang_ast::ProgramBuilder;

use crate::{BasicBlock, BlockId, Cfg, NO_SUCCESSOR, Target, VerifyError};

fn to(index: u32) -> Target {
  Target::Block(BlockId::new(index))
}

/// A loop with two entries (blocks 3 and 4). Returns `10`.
pub fn irreducible_loop() -> Result<Cfg, Vec<VerifyError>> {
  let b = ProgramBuilder::new();

  Cfg::from_blocks(vec![
    /* 0 */
    BasicBlock::Single {
      body: b.write_local("i", b.int(0)).into(),
      successor: to(1),
    },
    /* 1 */
    BasicBlock::Single {
      body: b.write_local("j", b.int(0)).into(),
      successor: to(2),
    },
    /* 2 */
    BasicBlock::Conditional {
      condition: b.eq(b.read_local("i"), b.int(0)),
      true_successor: to(6),
      false_successor: to(3),
    },
    /* 3 */
    BasicBlock::Conditional {
      condition: b.lt(b.read_local("j"), b.int(10)),
      true_successor: to(4),
      false_successor: to(5),
    },
    /* 4 */
    BasicBlock::Single {
      body: b.increment_local("j", b.int(1)).into(),
      successor: to(3),
    },
    /* 5 */
    BasicBlock::Single {
      body: b.increment_local("i", b.int(1)).into(),
      successor: to(7),
    },
    /* 6 */
    BasicBlock::Single {
      body: b.increment_local("i", b.int(1)).into(),
      successor: to(4),
    },
    /* 7 */
    BasicBlock::Single {
      body: b.return_(b.read_local("j")),
      successor: NO_SUCCESSOR,
    },
  ])
}

/// Counts to ten, then leaves the loop through a flag. Returns `10`.
pub fn flag_dispatch() -> Result<Cfg, Vec<VerifyError>> {
  let b = ProgramBuilder::new();

  Cfg::from_blocks(vec![
    /* 0 */
    BasicBlock::Single {
      body: b.write_local("flag", b.bool(false)).into(),
      successor: to(1),
    },
    /* 1 */
    BasicBlock::Single {
      body: b.write_local("counter", b.int(0)).into(),
      successor: to(2),
    },
    /* 2 */
    BasicBlock::Conditional {
      condition: b.not(b.read_local("flag")),
      true_successor: to(3),
      false_successor: to(6),
    },
    /* 3 */
    BasicBlock::Single {
      body: b.increment_local("counter", b.int(1)).into(),
      successor: to(4),
    },
    /* 4 */
    BasicBlock::Conditional {
      condition: b.eq(b.int(10), b.read_local("counter")),
      true_successor: to(5),
      false_successor: to(2),
    },
    /* 5 */
    BasicBlock::Single {
      body: b.write_local("flag", b.bool(true)).into(),
      successor: to(2),
    },
    /* 6 */
    BasicBlock::Single {
      body: b.return_(b.read_local("counter")),
      successor: NO_SUCCESSOR,
    },
  ])
}

pub type HandBuilt = fn() -> Result<Cfg, Vec<VerifyError>>;

/// Named hand-built samples, for the driver.
pub fn all() -> Vec<(&'static str, HandBuilt)> {
  vec![
    ("irreducible-loop", irreducible_loop as HandBuilt),
    ("flag-dispatch", flag_dispatch as HandBuilt),
  ]
}
