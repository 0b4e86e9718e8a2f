use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use pelang_config::{DebugTrace, DumpKind, ExecutionMode};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DumpKindCli {
  /// Dump the statement tree
  Ast,
  /// Dump the lowered block array as text
  Cfg,
  /// Dump the lowered block array as JSON
  CfgJson,
}

impl From<DumpKindCli> for DumpKind {
  fn from(value: DumpKindCli) -> DumpKind {
    match value {
      DumpKindCli::Ast => DumpKind::Ast,
      DumpKindCli::Cfg => DumpKind::Cfg,
      DumpKindCli::CfgJson => DumpKind::CfgJson,
    }
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DebugTraceCli {
  Lowering,
  Dispatch,
  Eval,
  Driver,
}

impl From<DebugTraceCli> for DebugTrace {
  fn from(value: DebugTraceCli) -> DebugTrace {
    match value {
      DebugTraceCli::Lowering => DebugTrace::Lowering,
      DebugTraceCli::Dispatch => DebugTrace::Dispatch,
      DebugTraceCli::Eval => DebugTrace::Eval,
      DebugTraceCli::Driver => DebugTrace::Driver,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Mode {
  /// Walk the statement tree directly
  Structured,
  /// Lower to basic blocks and dispatch
  Blocks,
}

impl From<Mode> for ExecutionMode {
  fn from(value: Mode) -> Self {
    match value {
      Mode::Structured => ExecutionMode::Structured,
      Mode::Blocks => ExecutionMode::Blocks,
    }
  }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunCommand {
  /// Name of the sample to run (see `pelang list`)
  pub sample: String,

  /// Execution mode (overrides the config file)
  #[arg(long, value_enum)]
  pub mode: Option<Mode>,

  /// Block to start dispatching from
  #[arg(long)]
  pub entry: Option<usize>,

  /// Stop after this many dispatched blocks
  #[arg(long)]
  pub max_steps: Option<u64>,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CompareCommand {
  /// Only compare this sample
  pub sample: Option<String>,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DumpCommand {
  /// Name of the sample to dump
  pub sample: String,
}

#[derive(Subcommand, Clone, PartialEq)]
pub enum SubCommand {
  /// List the available samples
  List,
  /// Run a sample and print its result
  Run(RunCommand),
  /// Run samples in both modes and check they agree
  Compare(CompareCommand),
  /// Print the representations selected with --dump
  Dump(DumpCommand),
}

#[derive(Parser)]
#[command(author, version, about = "The PELang interpreter", long_about = None)]
#[command(propagate_version = true)]
#[command(color = ColorChoice::Always)]
pub struct Cli {
  #[command(subcommand)]
  pub subcommand: SubCommand,

  /// Dump internal representations
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub dump: Vec<DumpKindCli>,

  /// Read execution settings from this pelang.toml
  #[arg(long, global = true)]
  pub config: Option<String>,

  /// Enable internal debug mode
  #[arg(long, default_value = "false", global = true)]
  pub debug: bool,

  /// Enable debug tracing for subsystems
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub debug_trace: Vec<DebugTraceCli>,

  /// Don't print any output
  #[arg(long, short = 'q', default_value = "false", global = true)]
  pub quiet: bool,

  /// Use verbose output
  #[arg(long, short, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,
}
