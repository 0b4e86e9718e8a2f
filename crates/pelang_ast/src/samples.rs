//! The sample program corpus. Every valid sample evaluates to `10`, except
//! `complex-string-array` which evaluates to `"Foo"`. The `invalid-*` samples
//! use a non-boolean condition and must fail at run time.

use crate::{ArrayKind, Literal, Program, ProgramBuilder, stmts};

#[derive(Debug, Clone)]
pub struct Sample {
  pub name: &'static str,
  pub build: fn() -> Program,
  /// `None` when the sample is expected to fail.
  pub expected: Option<Literal>,
}

fn sample(
  name: &'static str,
  build: fn() -> Program,
  expected: Option<Literal>,
) -> Sample {
  Sample { name, build, expected }
}

pub fn all() -> Vec<Sample> {
  let ten = || Some(Literal::Int(10));

  vec![
    sample("simple-add", simple_add, ten()),
    sample("simple-block", simple_block, ten()),
    sample("simple-local-read-write", simple_local_read_write, ten()),
    sample("simple-global-read-write", simple_global_read_write, ten()),
    sample("simple-branch", simple_branch, ten()),
    sample("simple-loop", simple_loop, ten()),
    sample("simple-switch", simple_switch, ten()),
    sample("simple-invoke", simple_invoke, ten()),
    sample("simple-object", simple_object, ten()),
    sample("simple-array-read", simple_array_read, ten()),
    sample("simple-multi-array-read", simple_multi_array_read, ten()),
    sample("simple-array-write", simple_array_write, ten()),
    sample("simple-multi-array-write", simple_multi_array_write, ten()),
    sample("simple-new-array", simple_new_array, ten()),
    sample("complex-string-array", complex_string_array, Some(Literal::Str("Foo".to_string()))),
    sample("nested-adds", nested_adds, ten()),
    sample("nested-blocks", nested_blocks, ten()),
    sample("nested-local-read-writes", nested_local_read_writes, ten()),
    sample("nested-branches", nested_branches, ten()),
    sample("nested-loops", nested_loops, ten()),
    sample("nested-switches", nested_switches, ten()),
    sample("branch-with-global-read-write", branch_with_global_read_write, ten()),
    sample("loop-with-global-read-write", loop_with_global_read_write, ten()),
    sample(
      "nested-loops-with-multiple-back-edges",
      nested_loops_with_multiple_back_edges,
      ten(),
    ),
    sample("invoke-object-function-property", invoke_object_function_property, ten()),
    sample("invalid-branch", invalid_branch, None),
    sample("invalid-loop", invalid_loop, None),
  ]
}

pub fn find(name: &str) -> Option<Sample> {
  all().into_iter().find(|sample| sample.name == name)
}

pub fn simple_add() -> Program {
  let b = ProgramBuilder::new();
  b.root("simple-add", b.return_(b.add(b.int(5), b.int(5))))
}

pub fn simple_block() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-block",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.increment_local("i", b.int(2)),
      b.increment_local("i", b.int(2)),
      b.increment_local("i", b.int(2)),
      b.increment_local("i", b.int(2)),
      b.increment_local("i", b.int(2)),
      b.return_(b.read_local("i")),
    ]),
  )
}

pub fn simple_local_read_write() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-local-read-write",
    b.block(stmts![b.write_local("i", b.int(10)), b.return_(b.read_local("i"))]),
  )
}

pub fn simple_global_read_write() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-global-read-write",
    b.block(stmts![b.write_global("i", b.int(10)), b.return_(b.read_global("i"))]),
  )
}

pub fn simple_branch() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-branch",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.if_else(
        b.lt(b.read_local("i"), b.int(10)),
        b.write_local("i", b.int(10)),
        b.write_local("i", b.int(5)),
      ),
      b.return_(b.read_local("i")),
    ]),
  )
}

pub fn simple_loop() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-loop",
    b.block(stmts![
      b.write_local("counter", b.int(0)),
      b.while_(
        b.lt(b.read_local("counter"), b.int(10)),
        b.increment_local("counter", b.int(1)),
      ),
      b.return_(b.read_local("counter")),
    ]),
  )
}

pub fn simple_switch() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-switch",
    b.block(stmts![
      b.write_local("counter", b.int(0)),
      b.switch(
        b.read_local("counter"),
        vec![
          b.case(b.int(0), b.increment_local("counter", b.int(10))),
          b.case(b.int(5), b.increment_local("counter", b.int(5))),
        ],
      ),
      b.return_(b.read_local("counter")),
    ]),
  )
}

pub fn simple_invoke() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-invoke",
    b.return_(b.invoke(
      b.function("add", &["a", "b"], |f| f.return_(f.add(f.read_local("a"), f.read_local("b")))),
      vec![b.int(5), b.int(5)],
    )),
  )
}

pub fn simple_object() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-object",
    b.block(stmts![
      b.write_local("obj", b.new_object()),
      b.write_property(b.read_local("obj"), b.str("p1"), b.int(10)),
      b.return_(b.read_property(b.read_local("obj"), b.str("p1"))),
    ]),
  )
}

pub fn simple_array_read() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-array-read",
    b.return_(b.read_array(b.ints(&[10, 5, 0]), b.ints(&[0]))),
  )
}

pub fn simple_multi_array_read() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-multi-array-read",
    b.return_(b.read_array(
      b.int_matrix(&[&[6, 8, 10], &[4, 6, 8], &[2, 4, 6]]),
      b.ints(&[0, 2]),
    )),
  )
}

pub fn simple_array_write() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-array-write",
    b.block(stmts![
      b.write_local("var", b.ints(&[0, 5, 10])),
      b.write_array(b.read_local("var"), b.ints(&[0]), b.int(10)),
      b.return_(b.read_array(b.read_local("var"), b.ints(&[0]))),
    ]),
  )
}

pub fn simple_multi_array_write() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-multi-array-write",
    b.block(stmts![
      b.write_local("var", b.int_matrix(&[&[6, 8, 10], &[4, 6, 8], &[2, 4, 6]])),
      b.write_array(b.read_local("var"), b.ints(&[1, 2]), b.int(10)),
      b.return_(b.read_array(b.read_local("var"), b.ints(&[1, 2]))),
    ]),
  )
}

pub fn simple_new_array() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "simple-new-array",
    b.block(stmts![
      b.write_local("grid", b.new_array(ArrayKind::Int, b.ints(&[2, 3]))),
      b.write_array(b.read_local("grid"), b.ints(&[1, 2]), b.int(10)),
      b.return_(b.add(
        b.read_array(b.read_local("grid"), b.ints(&[0, 0])),
        b.read_array(b.read_local("grid"), b.ints(&[1, 2])),
      )),
    ]),
  )
}

pub fn complex_string_array() -> Program {
  let b = ProgramBuilder::new();
  let strings = |rows: &[&[&str]]| {
    Literal::Array(
      rows
        .iter()
        .map(|row| Literal::Array(row.iter().map(|s| Literal::Str(s.to_string())).collect()))
        .collect(),
    )
  };
  let cube = Literal::Array(vec![
    strings(&[&["Foo", "Bar"], &["Aaa", "Bbb"], &["Ccc", "Ddd"]]),
    strings(&[&["Xxxx", "Yyyy"]]),
    strings(&[&["ZZ", "AA"], &["AA", "ZZ"]]),
  ]);

  b.root(
    "complex-string-array",
    b.block(stmts![
      b.write_local("var", b.literal(cube)),
      b.write_array(b.read_local("var"), b.ints(&[2, 0, 1]), b.str("Foo")),
      b.return_(b.read_array(b.read_local("var"), b.ints(&[2, 0, 1]))),
    ]),
  )
}

pub fn invalid_branch() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "invalid-branch",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.if_else(b.str("foo"), b.write_local("i", b.int(10)), b.write_local("i", b.int(5))),
      b.return_(b.read_local("i")),
    ]),
  )
}

pub fn invalid_loop() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "invalid-loop",
    b.block(stmts![
      b.write_local("counter", b.int(0)),
      b.while_(b.str("foo"), b.increment_local("counter", b.int(1))),
      b.return_(b.read_local("counter")),
    ]),
  )
}

pub fn nested_adds() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "nested-adds",
    b.return_(b.add(
      b.add(b.int(2), b.int(2)),
      b.add(b.int(2), b.add(b.int(2), b.int(2))),
    )),
  )
}

pub fn nested_blocks() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "nested-blocks",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.increment_local("i", b.int(1)),
      b.increment_local("i", b.int(1)),
      b.block(stmts![
        b.increment_local("i", b.int(1)),
        b.increment_local("i", b.int(1)),
        b.increment_local("i", b.int(1)),
        b.increment_local("i", b.int(1)),
        b.block(stmts![b.increment_local("i", b.int(1)), b.increment_local("i", b.int(1))]),
        b.block(stmts![b.increment_local("i", b.int(1)), b.increment_local("i", b.int(1))]),
      ]),
      b.block(stmts![b.return_(b.read_local("i"))]),
    ]),
  )
}

pub fn nested_local_read_writes() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "nested-local-read-writes",
    b.block(stmts![
      b.write_local("h", b.int(2)),
      b.write_local("i", b.int(2)),
      b.write_local("j", b.int(2)),
      b.write_local("k", b.int(2)),
      b.write_local("l", b.int(2)),
      b.write_local("i", b.add(b.read_local("h"), b.read_local("i"))),
      b.write_local("j", b.add(b.read_local("i"), b.read_local("j"))),
      b.write_local("k", b.add(b.read_local("j"), b.read_local("k"))),
      b.write_local("l", b.add(b.read_local("k"), b.read_local("l"))),
      b.return_(b.read_local("l")),
    ]),
  )
}

pub fn nested_branches() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "nested-branches",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.if_else(
        b.lt(b.read_local("i"), b.int(5)),
        b.block(stmts![
          b.increment_local("i", b.int(5)),
          b.if_else(
            b.lt(b.read_local("i"), b.int(10)),
            b.increment_local("i", b.int(5)),
            b.increment_local("i", b.int(1)),
          ),
        ]),
        b.increment_local("i", b.int(1)),
      ),
      b.return_(b.read_local("i")),
    ]),
  )
}

pub fn nested_loops() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "nested-loops",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.write_local("j", b.int(0)),
      b.while_(
        b.lt(b.read_local("i"), b.int(5)),
        b.block(stmts![
          b.increment_local("i", b.int(1)),
          b.while_(
            b.lt(b.read_local("j"), b.int(5)),
            b.block(stmts![b.increment_local("j", b.int(1))]),
          ),
        ]),
      ),
      b.return_(b.add(b.read_local("i"), b.read_local("j"))),
    ]),
  )
}

pub fn nested_switches() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "nested-switches",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.write_local("j", b.int(0)),
      b.switch(
        b.read_local("i"),
        vec![
          b.case(
            b.int(0),
            b.switch(
              b.read_local("j"),
              vec![b.case(b.int(0), b.increment_local("i", b.int(10)))],
            ),
          ),
          b.case(
            b.int(5),
            b.switch(
              b.read_local("j"),
              vec![b.case(b.int(5), b.increment_local("i", b.int(5)))],
            ),
          ),
        ],
      ),
      b.return_(b.read_local("i")),
    ]),
  )
}

pub fn branch_with_global_read_write() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "branch-with-global-read-write",
    b.block(stmts![
      b.write_global("g", b.int(0)),
      b.if_else(
        b.lt(b.read_global("g"), b.int(10)),
        b.increment_global("g", b.int(10)),
        b.increment_global("g", b.int(5)),
      ),
      b.return_(b.read_global("g")),
    ]),
  )
}

pub fn loop_with_global_read_write() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "loop-with-global-read-write",
    b.block(stmts![
      b.write_global("g", b.int(0)),
      b.while_(
        b.lt(b.read_global("g"), b.int(10)),
        b.block(stmts![b.increment_global("g", b.int(1))]),
      ),
      b.return_(b.read_global("g")),
    ]),
  )
}

pub fn nested_loops_with_multiple_back_edges() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "nested-loops-with-multiple-back-edges",
    b.block(stmts![
      b.write_local("i", b.int(0)),
      b.write_local("j", b.int(0)),
      b.write_local("k", b.int(0)),
      b.while_(
        b.lt(b.read_local("i"), b.int(5)),
        b.block(stmts![
          b.increment_local("i", b.int(1)),
          b.while_(
            b.lt(b.read_local("j"), b.int(5)),
            b.if_else(
              b.lt(b.read_local("j"), b.int(3)),
              b.block(stmts![b.increment_local("j", b.int(1)), b.increment_local("k", b.int(1))]),
              b.increment_local("j", b.int(1)),
            ),
          ),
        ]),
      ),
      b.return_(b.add(b.read_local("i"), b.read_local("j"))),
    ]),
  )
}

pub fn invoke_object_function_property() -> Program {
  let b = ProgramBuilder::new();

  b.root(
    "invoke-object-function-property",
    b.block(stmts![
      b.write_local("obj", b.new_object()),
      b.write_property(
        b.read_local("obj"),
        b.str("p1"),
        b.function("add", &["a", "b"], |f| f.return_(f.add(f.read_local("a"), f.read_local("b")))),
      ),
      b.return_(b.invoke(
        b.read_property(b.read_local("obj"), b.str("p1")),
        vec![b.int(5), b.int(5)],
      )),
    ]),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sample_names_are_unique() {
    let samples = all();
    let mut names: Vec<_> = samples.iter().map(|s| s.name).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), samples.len());
  }

  #[test]
  fn sample_program_names_match_registry() {
    for sample in all() {
      assert_eq!((sample.build)().name, sample.name);
    }
  }

  #[test]
  fn find_looks_up_by_name() {
    assert!(find("simple-loop").is_some());
    assert!(find("no-such-sample").is_none());
  }
}
