use std::fmt::Write;

use crate::{BasicBlock, BlockId, Cfg};

/// Pretty printer for block arrays.
pub struct CfgPrinter<'a> {
  cfg: &'a Cfg,
  output: String,
}

impl<'a> CfgPrinter<'a> {
  pub fn new(cfg: &'a Cfg) -> Self {
    Self {
      cfg,
      output: String::new(),
    }
  }

  pub fn print(mut self) -> String {
    writeln!(self.output, "=== BCF ===\n").unwrap();

    if self.cfg.is_empty() {
      writeln!(self.output, "(empty)").unwrap();
      return self.output;
    }

    for (id, block) in self.cfg.iter() {
      self.print_block(id, block);
    }

    self.output
  }

  fn print_block(
    &mut self,
    id: BlockId,
    block: &BasicBlock,
  ) {
    match block {
      BasicBlock::Single { body, successor } => {
        writeln!(self.output, "{}: {} -> {}", id, body, successor).unwrap();
      },
      BasicBlock::Conditional {
        condition,
        true_successor,
        false_successor,
      } => {
        writeln!(
          self.output,
          "{}: if {} -> {} else {}",
          id, condition, true_successor, false_successor
        )
        .unwrap();
      },
      BasicBlock::Multiway {
        value,
        case_values,
        case_successors,
        default_successor,
      } => {
        let cases: Vec<String> = case_values
          .iter()
          .zip(case_successors)
          .map(|(case_value, successor)| format!("{} -> {}", case_value, successor))
          .collect();

        writeln!(
          self.output,
          "{}: switch {} [{}] default -> {}",
          id,
          value,
          cases.join(", "),
          default_successor
        )
        .unwrap();
      },
    }
  }
}

/// Render a block array as stable text, one line per block.
pub fn print_cfg(cfg: &Cfg) -> String {
  CfgPrinter::new(cfg).print()
}
