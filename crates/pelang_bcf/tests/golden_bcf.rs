mod common;

use insta::assert_snapshot;
use pelang_ast::{ProgramBuilder, samples, stmts};
use pelang_bcf::{Cfg, print_cfg};

#[test]
fn bcf_single_statement() {
  let b = ProgramBuilder::new();
  let program = b.root("single", b.return_(b.int(10)));

  assert_snapshot!(common::format_cfg(&program), @r"
  === BCF ===

  bb0: return 10 -> exit
  ");
}

#[test]
fn bcf_straight_line_block() {
  assert_snapshot!(common::format_cfg(&samples::simple_local_read_write()), @r"
  === BCF ===

  bb0: { i = 10; return i } -> exit
  ");
}

#[test]
fn bcf_simple_loop() {
  assert_snapshot!(common::format_cfg(&samples::simple_loop()), @r"
  === BCF ===

  bb0: counter = 0 -> bb1
  bb1: if (counter < 10) -> bb2 else bb3
  bb2: counter = (1 + counter) -> bb1
  bb3: return counter -> exit
  ");
}

#[test]
fn bcf_simple_branch() {
  assert_snapshot!(common::format_cfg(&samples::simple_branch()), @r"
  === BCF ===

  bb0: i = 0 -> bb1
  bb1: if (i < 10) -> bb2 else bb3
  bb2: i = 10 -> bb4
  bb3: i = 5 -> bb4
  bb4: return i -> exit
  ");
}

#[test]
fn bcf_simple_switch() {
  assert_snapshot!(common::format_cfg(&samples::simple_switch()), @r"
  === BCF ===

  bb0: counter = 0 -> bb1
  bb1: switch counter [0 -> bb2, 5 -> bb3] default -> bb4
  bb2: counter = (10 + counter) -> bb4
  bb3: counter = (5 + counter) -> bb4
  bb4: return counter -> exit
  ");
}

#[test]
fn bcf_nested_loops() {
  assert_snapshot!(common::format_cfg(&samples::nested_loops()), @r"
  === BCF ===

  bb0: { i = 0; j = 0 } -> bb1
  bb1: if (i < 5) -> bb2 else bb5
  bb2: i = (1 + i) -> bb3
  bb3: if (j < 5) -> bb4 else bb1
  bb4: j = (1 + j) -> bb3
  bb5: return (i + j) -> exit
  ");
}

#[test]
fn bcf_nested_branches() {
  assert_snapshot!(common::format_cfg(&samples::nested_branches()), @r"
  === BCF ===

  bb0: i = 0 -> bb1
  bb1: if (i < 5) -> bb2 else bb6
  bb2: i = (5 + i) -> bb3
  bb3: if (i < 10) -> bb4 else bb5
  bb4: i = (5 + i) -> bb7
  bb5: i = (1 + i) -> bb7
  bb6: i = (1 + i) -> bb7
  bb7: return i -> exit
  ");
}

#[test]
fn bcf_if_without_else() {
  let b = ProgramBuilder::new();
  let program = b.root(
    "if-without-else",
    b.block(stmts![b.if_(b.bool(true), b.print(b.int(1))), b.print(b.int(2))]),
  );

  assert_snapshot!(common::format_cfg(&program), @r"
  === BCF ===

  bb0: if true -> bb1 else bb2
  bb1: print 1 -> bb2
  bb2: print 2 -> exit
  ");
}

#[test]
fn bcf_empty_case_body_jumps_to_exit() {
  let b = ProgramBuilder::new();
  let program = b.root(
    "empty-case",
    b.switch(
      b.read_local("x"),
      vec![b.case(b.int(0), b.block(vec![])), b.case(b.int(1), b.print(b.int(1)))],
    ),
  );

  assert_snapshot!(common::format_cfg(&program), @r"
  === BCF ===

  bb0: switch x [0 -> exit, 1 -> bb1] default -> exit
  bb1: print 1 -> exit
  ");
}

#[test]
fn bcf_empty_program() {
  let b = ProgramBuilder::new();

  assert_snapshot!(common::format_cfg(&b.root("empty", b.block(vec![]))), @r"
  === BCF ===

  (empty)
  ");
}

#[test]
fn bcf_irreducible_loop() {
  let cfg: Cfg = pelang_bcf::samples::irreducible_loop().expect("hand-built cfg verifies");

  assert_snapshot!(print_cfg(&cfg), @r"
  === BCF ===

  bb0: i = 0 -> bb1
  bb1: j = 0 -> bb2
  bb2: if (i == 0) -> bb6 else bb3
  bb3: if (j < 10) -> bb4 else bb5
  bb4: j = (1 + j) -> bb3
  bb5: i = (1 + i) -> bb7
  bb6: i = (1 + i) -> bb4
  bb7: return j -> exit
  ");
}

#[test]
fn bcf_json_dump_names_successors() {
  let (cfg, _) = common::lower_program(&samples::simple_loop());
  let json = serde_json::to_value(&cfg).unwrap();

  let blocks = json["blocks"].as_array().unwrap();
  assert_eq!(blocks.len(), 4);
  assert_eq!(blocks[2]["Single"]["successor"]["Block"], 1);
  assert_eq!(blocks[3]["Single"]["successor"], "Exit");
}
