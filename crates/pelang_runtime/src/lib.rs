//! Values, storage and the tree-walking evaluator.
//!
//! Expressions are always evaluated here. Statements can either be executed
//! directly by [`exec`] or lowered to basic blocks and dispatched, in which
//! case each block body still goes through [`exec`] or [`eval_condition`].

pub mod error;
pub mod eval;
pub mod storage;
pub mod value;

pub use error::RuntimeError;
pub use eval::{Completion, eval, eval_condition, exec, run_structured};
pub use storage::{Env, Frame, State};
pub use value::Value;
