#![allow(dead_code)]

use pelang_ast::Program;
use pelang_bcf::{Cfg, Patch, lower_with_config, print_cfg, run_program};
use pelang_config::{ExecutionMode, PelangConfig};
use pelang_runtime::{State, Value};

/// Lower a program with logging disabled.
pub fn lower_program(program: &Program) -> (Cfg, Vec<Patch>) {
  lower_with_config(program.body.clone(), &PelangConfig::silent()).expect("lowering failed")
}

/// Format the lowered block array for stable snapshot comparison
pub fn format_cfg(program: &Program) -> String {
  print_cfg(&lower_program(program).0)
}

pub fn config_for(mode: ExecutionMode) -> PelangConfig {
  let mut config = PelangConfig::silent();
  config.run.mode = mode;
  config
}

/// Run a program and return its result as a string (errors included) plus
/// everything it printed.
pub fn run_in_mode(
  program: &Program,
  mode: ExecutionMode,
) -> (Result<Value, String>, Vec<String>) {
  let mut state = State::new(config_for(mode));
  let result = run_program(program, &mut state).map_err(|err| err.to_string());
  (result, state.output)
}

/// Assert both execution modes agree on result and output.
pub fn assert_modes_agree(program: &Program) -> Result<Value, String> {
  let structured = run_in_mode(program, ExecutionMode::Structured);
  let blocks = run_in_mode(program, ExecutionMode::Blocks);
  assert_eq!(structured, blocks, "modes disagree on '{}'", program.name);
  blocks.0
}
