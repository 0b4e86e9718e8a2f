use std::{fmt::Display, sync::Arc};

use colored::Colorize;
use pelang_ast::{Program, samples};
use pelang_bcf::{Cfg, lower_with_config, print_cfg, run_cfg, run_program, samples::HandBuilt};
use pelang_config::{DebugTrace, DumpKind, ExecutionMode, OutputLevel, PelangConfig};
use pelang_log::{phase_log, phase_ok, phase_warn, trace_dbg};
use pelang_runtime::State;

pub fn report_error(err: &dyn Display) {
  eprintln!("{} {}", "error:".red().bold(), err);
}

enum Source {
  Tree(samples::Sample),
  Blocks(HandBuilt),
}

fn find_source(name: &str) -> Result<Source, ()> {
  if let Some(sample) = samples::find(name) {
    return Ok(Source::Tree(sample));
  }

  if let Some((_, build)) = pelang_bcf::samples::all().into_iter().find(|(n, _)| *n == name) {
    return Ok(Source::Blocks(build));
  }

  report_error(&format!("unknown sample '{}' (run `pelang list`)", name));
  Err(())
}

fn build_hand_built(build: HandBuilt) -> Result<Cfg, ()> {
  build().map_err(|errors| {
    for err in errors {
      report_error(&err);
    }
  })
}

fn mode_name(mode: ExecutionMode) -> &'static str {
  match mode {
    ExecutionMode::Structured => "structured",
    ExecutionMode::Blocks => "blocks",
  }
}

pub fn list() -> Result<(), ()> {
  for sample in samples::all() {
    match &sample.expected {
      Some(expected) => println!("{:<40} {}", sample.name, expected),
      None => println!("{:<40} {}", sample.name, "(fails)".dimmed()),
    }
  }

  for (name, _) in pelang_bcf::samples::all() {
    println!("{:<40} {}", name, "(blocks only)".dimmed());
  }

  Ok(())
}

pub fn run(
  config: Arc<PelangConfig>,
  name: &str,
) -> Result<(), ()> {
  let source = find_source(name)?;
  let mut state = State::new((*config).clone());

  phase_log!(&config, "Running {} in {} mode...", name, mode_name(config.run.mode));

  let result = match source {
    Source::Tree(sample) => {
      let program = (sample.build)();
      emit_dumps(&config, &program)?;
      run_program(&program, &mut state).map_err(|err| err.to_string())
    },
    Source::Blocks(build) => {
      if config.run.mode == ExecutionMode::Structured {
        report_error(&format!("'{}' only exists as a block array", name));
        return Err(());
      }
      let cfg = build_hand_built(build)?;
      if config.dumps(DumpKind::Cfg) {
        println!("{}", print_cfg(&cfg));
      }
      run_cfg(&cfg, &mut state).map_err(|err| err.to_string())
    },
  };

  for line in &state.output {
    println!("{}", line);
  }

  match result {
    Ok(value) => {
      println!("{}", value);
      phase_ok!(&config, "Finished {}", name);
      Ok(())
    },
    Err(err) => {
      report_error(&err);
      Err(())
    },
  }
}

/// Result and printed output of one run, rendered for comparison.
type Outcome = (Result<String, String>, Vec<String>);

fn run_in_mode(
  config: &PelangConfig,
  program: &Program,
  mode: ExecutionMode,
) -> Outcome {
  let mut config = config.clone();
  config.run.mode = mode;

  let mut state = State::new(config);
  let result = run_program(program, &mut state)
    .map(|value| value.to_string())
    .map_err(|err| err.to_string());

  (result, state.output)
}

pub fn compare(
  config: Arc<PelangConfig>,
  only: Option<&str>,
) -> Result<(), ()> {
  let selected: Vec<_> = samples::all()
    .into_iter()
    .filter(|sample| only.map_or(true, |name| sample.name == name))
    .collect();

  if selected.is_empty() {
    if let Some(name) = only {
      report_error(&format!("unknown sample '{}' (run `pelang list`)", name));
    }
    return Err(());
  }

  let mut disagreements = 0;
  for sample in &selected {
    let program = (sample.build)();
    let structured = run_in_mode(&config, &program, ExecutionMode::Structured);
    let blocks = run_in_mode(&config, &program, ExecutionMode::Blocks);

    trace_dbg!(&config, DebugTrace::Driver, "{}: {:?} / {:?}", sample.name, structured, blocks);

    if structured == blocks {
      let shown = match &blocks.0 {
        Ok(value) => value.clone(),
        Err(err) => format!("error: {}", err),
      };
      println!("{} {} = {}", "ok".green().bold(), sample.name, shown);
      if config.output_level == OutputLevel::Verbose {
        for line in &blocks.1 {
          println!("    {}", line.dimmed());
        }
      }
    } else {
      disagreements += 1;
      phase_warn!(&config, "modes disagree on {}", sample.name);
      println!(
        "{} {}: structured {:?}, blocks {:?}",
        "mismatch".red().bold(),
        sample.name,
        structured,
        blocks
      );
    }
  }

  if disagreements > 0 {
    report_error(&format!("{} of {} sample(s) disagree", disagreements, selected.len()));
    return Err(());
  }

  phase_ok!(&config, "{} sample(s) agree", selected.len());
  Ok(())
}

pub fn dump(
  config: Arc<PelangConfig>,
  name: &str,
) -> Result<(), ()> {
  let mut config = (*config).clone();
  if config.dump.is_empty() {
    config.dump.push(DumpKind::Cfg);
  }

  match find_source(name)? {
    Source::Tree(sample) => emit_dumps(&config, &(sample.build)()),
    Source::Blocks(build) => {
      let cfg = build_hand_built(build)?;
      if config.dumps(DumpKind::Ast) {
        phase_warn!(&config, "'{}' has no statement tree", name);
      }
      emit_cfg_dumps(&config, &cfg)
    },
  }
}

fn emit_dumps(
  config: &PelangConfig,
  program: &Program,
) -> Result<(), ()> {
  if config.dumps(DumpKind::Ast) {
    println!("{}", program.body);
  }

  if config.dumps(DumpKind::Cfg) || config.dumps(DumpKind::CfgJson) {
    let (cfg, _) = lower_with_config(program.body.clone(), config).map_err(|err| report_error(&err))?;
    emit_cfg_dumps(config, &cfg)?;
  }

  Ok(())
}

fn emit_cfg_dumps(
  config: &PelangConfig,
  cfg: &Cfg,
) -> Result<(), ()> {
  if config.dumps(DumpKind::Cfg) {
    println!("{}", print_cfg(cfg));
  }

  if config.dumps(DumpKind::CfgJson) {
    let json = serde_json::to_string_pretty(cfg).map_err(|err| report_error(&err))?;
    println!("{}", json);
  }

  Ok(())
}
