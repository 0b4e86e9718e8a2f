mod cli;
mod driver;

use std::{path::Path, sync::Arc};

use clap::Parser as ClapParser;
use pelang_config::{ConfigError, PelangConfig};

use cli::{Cli, SubCommand};

fn parse_cli_to_config(cli: &Cli) -> Result<Arc<PelangConfig>, ConfigError> {
  let mut config = PelangConfig::new_basic(
    cli.debug,
    cli.debug_trace.iter().copied().map(Into::into).collect(),
    cli.quiet,
    cli.verbose,
  );

  config.dump = cli.dump.iter().copied().map(Into::into).collect();

  if let Some(path) = &cli.config {
    config.run = PelangConfig::load_run_config(Path::new(path))?;
  }

  if let SubCommand::Run(run) = &cli.subcommand {
    if let Some(mode) = run.mode {
      config.run.mode = mode.into();
    }
    if let Some(entry) = run.entry {
      config.run.entry = entry;
    }
    if run.max_steps.is_some() {
      config.run.max_steps = run.max_steps;
    }
  }

  Ok(Arc::new(config))
}

fn main() {
  let cli = Cli::parse();

  let config = match parse_cli_to_config(&cli) {
    Ok(config) => config,
    Err(err) => {
      driver::report_error(&err);
      std::process::exit(1);
    },
  };

  let result = match &cli.subcommand {
    SubCommand::List => driver::list(),
    SubCommand::Run(run) => driver::run(config, &run.sample),
    SubCommand::Compare(compare) => driver::compare(config, compare.sample.as_deref()),
    SubCommand::Dump(dump) => driver::dump(config, &dump.sample),
  };

  if result.is_err() {
    std::process::exit(1);
  }
}
