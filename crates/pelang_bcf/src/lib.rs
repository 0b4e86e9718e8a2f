//! Lowering of structured PELang statements into a basic-block control-flow
//! graph, and the loop that dispatches over it.

pub mod block;
pub mod dispatch;
pub mod display;
pub mod lowering;
pub mod program;
pub mod run;
pub mod samples;
pub mod verify;

pub use block::{BasicBlock, BlockId, Label, NO_SUCCESSOR, Pending, Target};
pub use dispatch::{Dispatcher, Step, dispatch};
pub use display::print_cfg;
pub use lowering::{LowerError, Lowering, Mode, Patch, lower, lower_with_config};
pub use program::Cfg;
pub use run::{ExecError, run_blocks, run_cfg, run_program};
pub use verify::{VerifyError, VerifyResult, verify_cfg};
