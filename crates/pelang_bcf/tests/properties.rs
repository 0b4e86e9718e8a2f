mod common;

use pelang_ast::{Expression, Program, ProgramBuilder, Statement, stmts};
use pelang_bcf::{Pending, verify_cfg};
use pelang_config::ExecutionMode;
use proptest::prelude::*;

const B: ProgramBuilder = ProgramBuilder;

fn variable() -> impl Strategy<Value = &'static str> {
  prop::sample::select(vec!["x", "y", "z"])
}

/// Small integer expressions over the program variables.
fn int_expr() -> impl Strategy<Value = Expression> {
  let leaf = prop_oneof![
    (-5i64..20).prop_map(|v| B.int(v)),
    variable().prop_map(|name| B.read_local(name)),
  ];

  leaf.prop_recursive(2, 8, 2, |inner| {
    prop_oneof![
      (inner.clone(), inner.clone()).prop_map(|(l, r)| B.add(l, r)),
      (inner.clone(), inner).prop_map(|(l, r)| B.minus(l, r)),
    ]
  })
}

fn condition() -> impl Strategy<Value = Expression> {
  prop_oneof![
    any::<bool>().prop_map(|v| B.bool(v)),
    (int_expr(), int_expr()).prop_map(|(l, r)| B.lt(l, r)),
    (int_expr(), int_expr()).prop_map(|(l, r)| B.not(B.eq(l, r))),
  ]
}

fn leaf() -> BoxedStrategy<Statement> {
  prop_oneof![
    4 => (variable(), int_expr()).prop_map(|(name, value)| Statement::from(B.write_local(name, value))),
    2 => int_expr().prop_map(|value| B.print(value)),
    1 => int_expr().prop_map(|value| B.return_(value)),
    1 => Just(Statement::empty()),
  ]
  .boxed()
}

/// `c = 0; while (c < limit) { c = 1 + c; body }`. Each nesting depth owns
/// its counter, so inner loops never reset outer ones.
fn bounded_loop(
  counter: &str,
  limit: i64,
  body: Statement,
) -> Statement {
  B.block(stmts![
    B.write_local(counter, B.int(0)),
    B.while_(
      B.lt(B.read_local(counter), B.int(limit)),
      B.block(stmts![B.increment_local(counter, B.int(1)), body]),
    ),
  ])
}

fn statement(depth: u32) -> BoxedStrategy<Statement> {
  if depth == 0 {
    return leaf();
  }

  let counter = format!("c{}", depth);
  prop_oneof![
    3 => leaf(),
    2 => prop::collection::vec(statement(depth - 1), 0..4).prop_map(Statement::Block),
    2 => (condition(), statement(depth - 1), statement(depth - 1))
      .prop_map(|(c, then_branch, else_branch)| B.if_else(c, then_branch, else_branch)),
    1 => (0i64..4, statement(depth - 1))
      .prop_map(move |(limit, body)| bounded_loop(&counter, limit, body)),
    1 => (int_expr(), prop::collection::vec((0i64..3, statement(depth - 1)), 0..3)).prop_map(|(value, cases)| {
      B.switch(value, cases.into_iter().map(|(k, body)| B.case(B.int(k), body)).collect())
    }),
  ]
  .boxed()
}

fn program() -> impl Strategy<Value = Program> {
  prop::collection::vec(statement(3), 1..4).prop_map(|body| {
    let mut statements = stmts![
      B.write_local("x", B.int(0)),
      B.write_local("y", B.int(1)),
      B.write_local("z", B.int(2)),
    ];
    statements.extend(body);
    statements.push(B.return_(B.add(B.read_local("x"), B.add(B.read_local("y"), B.read_local("z")))));
    B.root("generated", B.block(statements))
  })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Dispatching the lowered blocks gives the same result and output as
    /// walking the tree.
    #[test]
    fn blocks_agree_with_structured_execution(program in program()) {
        let structured = common::run_in_mode(&program, ExecutionMode::Structured);
        let blocks = common::run_in_mode(&program, ExecutionMode::Blocks);

        prop_assert!(structured.0.is_ok(), "structured run failed: {:?}", structured.0);
        prop_assert_eq!(structured, blocks);
    }

    /// Every successor of every lowered block is a valid index or the exit.
    #[test]
    fn lowering_resolves_every_successor(program in program()) {
        let (cfg, _) = common::lower_program(&program);
        prop_assert_eq!(verify_cfg(&cfg, 0), Ok(()));
    }

    /// Backpatching rewrites only blocks inside the scanned range, and never
    /// leaves a label pointing at itself.
    #[test]
    fn patches_stay_inside_their_construct(program in program()) {
        let (cfg, patches) = common::lower_program(&program);

        for patch in &patches {
            prop_assert!(patch.label.value() < 0);
            prop_assert!(patch.scanned.end <= cfg.len());
            prop_assert_ne!(patch.resolved, Pending::Label(patch.label));
            for id in &patch.rewritten {
                prop_assert!(patch.scanned.contains(&id.index()));
            }
        }
    }

    /// Lowering is deterministic.
    #[test]
    fn lowering_is_deterministic(program in program()) {
        prop_assert_eq!(common::format_cfg(&program), common::format_cfg(&program));
    }
}
