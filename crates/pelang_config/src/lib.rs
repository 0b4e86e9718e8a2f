use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DumpKind {
  Ast,
  Cfg,
  CfgJson,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugTrace {
  Lowering,
  Dispatch,
  Eval,
  Driver,
}

/// Controls the verbosity level of CLI output.
///
/// - `Quiet`: No output except errors
/// - `Detailed`: Structured progress output (default)
/// - `Verbose`: Detailed output with internal phases
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputLevel {
  Quiet,
  #[default]
  Detailed,
  Verbose,
}

/// How a program is executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
  /// Walk the statement tree directly.
  Structured,
  /// Lower to basic blocks and run the dispatch loop.
  #[default]
  Blocks,
}

fn default_max_call_depth() -> u32 {
  256
}

fn default_max_array_elements() -> u64 {
  1 << 24
}

/// Execution settings, optionally loaded from `pelang.toml`.
///
/// Expected format:
/// ```toml
/// [run]
/// mode = "blocks"
/// entry = 0
/// max_steps = 100000
/// max_call_depth = 256
/// max_array_elements = 16777216
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
  #[serde(default)]
  pub mode: ExecutionMode,
  /// Block index the dispatcher starts from.
  #[serde(default)]
  pub entry: usize,
  /// Upper bound on dispatched blocks; `None` runs until termination.
  #[serde(default)]
  pub max_steps: Option<u64>,
  #[serde(default = "default_max_call_depth")]
  pub max_call_depth: u32,
  /// Largest number of slots a single `new` array expression may allocate,
  /// counting the slots of every nested level.
  #[serde(default = "default_max_array_elements")]
  pub max_array_elements: u64,
}

impl Default for RunConfig {
  fn default() -> Self {
    Self {
      mode: ExecutionMode::default(),
      entry: 0,
      max_steps: None,
      max_call_depth: default_max_call_depth(),
      max_array_elements: default_max_array_elements(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PelangConfigFile {
  #[serde(default)]
  run: RunConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file '{path}': {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config file '{path}': {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },
}

#[derive(Debug, Clone, Default)]
pub struct PelangConfig {
  pub debug: bool,
  pub debug_trace: Vec<DebugTrace>,
  pub quiet: bool,
  pub verbose: u8,
  pub output_level: OutputLevel,
  pub dump: Vec<DumpKind>,
  pub run: RunConfig,
}

impl PelangConfig {
  pub fn new_basic(
    debug: bool,
    debug_trace: Vec<DebugTrace>,
    quiet: bool,
    verbose: u8,
  ) -> Self {
    let output_level = if quiet {
      OutputLevel::Quiet
    } else if verbose > 0 {
      OutputLevel::Verbose
    } else {
      OutputLevel::Detailed
    };

    Self {
      debug,
      debug_trace,
      quiet,
      verbose,
      output_level,
      ..Self::default()
    }
  }

  /// Config that never logs; used by library entry points and tests.
  pub fn silent() -> Self {
    Self::new_basic(false, Vec::new(), true, 0)
  }

  /// Parse the `[run]` table of a `pelang.toml` document.
  pub fn parse_run_config(
    content: &str,
    path: &str,
  ) -> Result<RunConfig, ConfigError> {
    let file: PelangConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_string(),
      source,
    })?;

    Ok(file.run)
  }

  pub fn load_run_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: display.clone(),
      source,
    })?;

    Self::parse_run_config(&content, &display)
  }

  pub fn dumps(
    &self,
    kind: DumpKind,
  ) -> bool {
    self.dump.contains(&kind)
  }
}
