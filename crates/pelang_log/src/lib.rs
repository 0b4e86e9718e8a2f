//! Stderr logging for the PELang tools.
//!
//! Three kinds of lines are written, each gated by the config:
//! - phase lines (`phase_log!`, `phase_ok!`, `phase_warn!`), shown unless quiet
//! - verbosity lines (`log_dbg!` at `-vv`, `log_trc!` at `-vvv`)
//! - category traces (`trace_dbg!`), shown for `--debug` or `--debug-trace <category>`
//!
//! Stdout is left to program output and dumps.

use std::fmt::Arguments;

use colored::Colorize;
use pelang_config::{DebugTrace, PelangConfig};

/// Verbosity a message needs before it is printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Phase,
  Debug,
  Trace,
}

impl Level {
  fn threshold(self) -> u8 {
    match self {
      Level::Phase => 0,
      Level::Debug => 2,
      Level::Trace => 3,
    }
  }

  fn prefix(self) -> &'static str {
    match self {
      Level::Phase => "",
      Level::Debug => "debug",
      Level::Trace => "trace",
    }
  }
}

/// Colour of a phase arrow.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tone {
  Progress,
  Done,
  Warning,
}

/// `-v` count after applying `--quiet` and `--debug` (which implies `-vv`).
fn verbosity(config: &PelangConfig) -> u8 {
  if config.quiet {
    0
  } else if config.debug {
    config.verbose.max(2)
  } else {
    config.verbose
  }
}

pub fn enabled(
  config: &PelangConfig,
  level: Level,
) -> bool {
  !config.quiet && verbosity(config) >= level.threshold()
}

pub fn trace_enabled(
  config: &PelangConfig,
  trace: DebugTrace,
) -> bool {
  !config.quiet && (config.debug || config.debug_trace.contains(&trace))
}

fn category(trace: DebugTrace) -> &'static str {
  match trace {
    DebugTrace::Lowering => "lowering",
    DebugTrace::Dispatch => "dispatch",
    DebugTrace::Eval => "eval",
    DebugTrace::Driver => "driver",
  }
}

#[doc(hidden)]
pub fn write_phase(
  config: &PelangConfig,
  tone: Tone,
  message: Arguments<'_>,
) {
  if !enabled(config, Level::Phase) {
    return;
  }

  let arrow = match tone {
    Tone::Progress => "    -->".bright_green().bold(),
    Tone::Done => "-->".bright_green().bold(),
    Tone::Warning => "-->".bright_yellow().bold(),
  };
  eprintln!("{} {}", arrow, message);
}

#[doc(hidden)]
pub fn write_verbose(
  config: &PelangConfig,
  level: Level,
  message: Arguments<'_>,
) {
  if enabled(config, level) {
    eprintln!("{}: {}", level.prefix(), message);
  }
}

#[doc(hidden)]
pub fn write_trace(
  config: &PelangConfig,
  trace: DebugTrace,
  message: Arguments<'_>,
) {
  if trace_enabled(config, trace) {
    eprintln!("debug[{}]: {}", category(trace), message);
  }
}

/// Indented progress line: `    --> Running simple-loop in blocks mode...`
#[macro_export]
macro_rules! phase_log {
  ($config:expr, $($arg:tt)+) => {
    $crate::write_phase($config, $crate::Tone::Progress, format_args!($($arg)+))
  };
}

#[macro_export]
macro_rules! phase_ok {
  ($config:expr, $($arg:tt)+) => {
    $crate::write_phase($config, $crate::Tone::Done, format_args!($($arg)+))
  };
}

#[macro_export]
macro_rules! phase_warn {
  ($config:expr, $($arg:tt)+) => {
    $crate::write_phase($config, $crate::Tone::Warning, format_args!($($arg)+))
  };
}

/// Trace line for one interpreter component.
///
/// ```ignore
/// trace_dbg!(&config, DebugTrace::Dispatch, "{} -> {}", from, to);
/// // debug[dispatch]: bb2 -> bb3
/// ```
#[macro_export]
macro_rules! trace_dbg {
  ($config:expr, $trace:expr, $($arg:tt)+) => {
    $crate::write_trace($config, $trace, format_args!($($arg)+))
  };
}

#[macro_export]
macro_rules! log_dbg {
  ($config:expr, $($arg:tt)+) => {
    $crate::write_verbose($config, $crate::Level::Debug, format_args!($($arg)+))
  };
}

#[macro_export]
macro_rules! log_trc {
  ($config:expr, $($arg:tt)+) => {
    $crate::write_verbose($config, $crate::Level::Trace, format_args!($($arg)+))
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn debug_implies_debug_verbosity() {
    let config = PelangConfig::new_basic(true, Vec::new(), false, 0);
    assert_eq!(verbosity(&config), 2);
    assert!(enabled(&config, Level::Debug));
    assert!(!enabled(&config, Level::Trace));
  }

  #[test]
  fn quiet_silences_everything() {
    let config = PelangConfig::new_basic(true, vec![DebugTrace::Lowering], true, 3);
    assert!(!enabled(&config, Level::Phase));
    assert!(!trace_enabled(&config, DebugTrace::Lowering));
  }

  #[test]
  fn trace_categories_are_independent() {
    let config = PelangConfig::new_basic(false, vec![DebugTrace::Dispatch], false, 0);
    assert!(trace_enabled(&config, DebugTrace::Dispatch));
    assert!(!trace_enabled(&config, DebugTrace::Lowering));
    assert!(enabled(&config, Level::Phase));
    assert!(!enabled(&config, Level::Debug));
  }
}
