use std::sync::Arc;

use pelang_ast::{ArrayKind, BinaryOperation, Expression, FunctionDef, Program, Statement};
use pelang_config::DebugTrace;
use pelang_log::trace_dbg;

use crate::{Env, Frame, RuntimeError, State, Value};

/// How a statement finished. `Return` unwinds to the enclosing function.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
  Normal(Value),
  Return(Value),
}

pub fn eval(
  expr: &Expression,
  env: &mut Env<'_>,
) -> Result<Value, RuntimeError> {
  match expr {
    Expression::Literal(literal) => Ok(Value::from(literal)),
    Expression::Function(def) => Ok(Value::Function(Arc::clone(def))),
    Expression::NewObject => Ok(Value::new_object()),
    Expression::NewArray { kind, dimensions } => {
      let dimensions = int_list(&eval(dimensions, env)?)?;
      new_array(*kind, &dimensions, env.state.config.run.max_array_elements)
    },
    Expression::Binary { operation, left, right } => {
      let left = eval(left, env)?;
      let right = eval(right, env)?;
      binary(*operation, left, right)
    },
    Expression::Not(operand) => match eval(operand, env)? {
      Value::Bool(b) => Ok(Value::Bool(!b)),
      other => Err(RuntimeError::type_mismatch("bool", &other)),
    },
    Expression::ReadLocal(name) => env.frame.read_local(name),
    Expression::WriteLocal { name, value } => {
      let value = eval(value, env)?;
      env.frame.write_local(name, value.clone());
      Ok(value)
    },
    Expression::ReadGlobal(name) => env.state.read_global(name),
    Expression::WriteGlobal { name, value } => {
      let value = eval(value, env)?;
      env.state.write_global(name, value.clone());
      Ok(value)
    },
    Expression::ReadArgument(index) => env.frame.read_argument(*index),
    Expression::ReadArray { array, indices } => {
      let mut current = eval(array, env)?;
      for index in int_list(&eval(indices, env)?)? {
        current = element(&current, index)?;
      }
      Ok(current)
    },
    Expression::WriteArray { array, indices, value } => {
      let array = eval(array, env)?;
      let indices = int_list(&eval(indices, env)?)?;
      let value = eval(value, env)?;

      let (last, path) = indices.split_last().ok_or(RuntimeError::EmptyIndexList)?;
      let mut target = array;
      for index in path {
        target = element(&target, *index)?;
      }
      store_element(&target, *last, value.clone())?;
      Ok(value)
    },
    Expression::ReadProperty { receiver, name } => {
      let receiver = eval(receiver, env)?;
      let name = property_name(eval(name, env)?)?;
      match &receiver {
        Value::Object(props) => Ok(props.borrow().get(&name).cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::PropertyOnNonObject {
          found: other.type_name(),
        }),
      }
    },
    Expression::WriteProperty { receiver, name, value } => {
      let receiver = eval(receiver, env)?;
      let name = property_name(eval(name, env)?)?;
      let value = eval(value, env)?;
      match &receiver {
        Value::Object(props) => {
          props.borrow_mut().insert(name, value.clone());
          Ok(value)
        },
        other => Err(RuntimeError::PropertyOnNonObject {
          found: other.type_name(),
        }),
      }
    },
    Expression::Invoke { function, arguments } => {
      let callee = match eval(function, env)? {
        Value::Function(def) => def,
        other => return Err(RuntimeError::type_mismatch("function", &other)),
      };

      let mut values = Vec::with_capacity(arguments.len());
      for argument in arguments {
        values.push(eval(argument, env)?);
      }

      invoke(&callee, values, env.state)
    },
  }
}

/// Evaluates a branch or loop condition, which must produce a bool.
pub fn eval_condition(
  expr: &Expression,
  env: &mut Env<'_>,
) -> Result<bool, RuntimeError> {
  match eval(expr, env)? {
    Value::Bool(b) => Ok(b),
    other => Err(RuntimeError::type_mismatch("bool", &other)),
  }
}

/// Executes a statement tree directly.
pub fn exec(
  stmt: &Statement,
  env: &mut Env<'_>,
) -> Result<Completion, RuntimeError> {
  match stmt {
    Statement::Block(statements) => {
      let mut last = Value::Null;
      for statement in statements {
        match exec(statement, env)? {
          Completion::Normal(value) => last = value,
          done @ Completion::Return(_) => return Ok(done),
        }
      }
      Ok(Completion::Normal(last))
    },
    Statement::If {
      condition,
      then_branch,
      else_branch,
    } => {
      if eval_condition(condition, env)? {
        exec(then_branch, env)
      } else {
        exec(else_branch, env)
      }
    },
    Statement::While { condition, body } => {
      while eval_condition(condition, env)? {
        if let done @ Completion::Return(_) = exec(body, env)? {
          return Ok(done);
        }
      }
      Ok(Completion::Normal(Value::Null))
    },
    Statement::Switch {
      value,
      case_values,
      case_bodies,
    } => {
      if case_values.len() != case_bodies.len() {
        return Err(RuntimeError::MalformedSwitch {
          values: case_values.len(),
          bodies: case_bodies.len(),
        });
      }

      let value = eval(value, env)?;
      for (case_value, body) in case_values.iter().zip(case_bodies) {
        if eval(case_value, env)? == value {
          return exec(body, env);
        }
      }
      Ok(Completion::Normal(Value::Null))
    },
    Statement::Return(value) => Ok(Completion::Return(eval(value, env)?)),
    Statement::Print(value) => {
      let value = eval(value, env)?;
      trace_dbg!(env.config(), DebugTrace::Eval, "print {}", value);
      env.state.output.push(value.to_string());
      Ok(Completion::Normal(Value::Null))
    },
    Statement::Expression(expr) => Ok(Completion::Normal(eval(expr, env)?)),
  }
}

/// Runs a program tree to completion: the returned value, or `null` when
/// execution falls off the end.
pub fn run_structured(
  program: &Program,
  state: &mut State,
) -> Result<Value, RuntimeError> {
  trace_dbg!(&state.config, DebugTrace::Eval, "structured run of '{}'", program.name);

  let mut env = Env::new(state);
  match exec(&program.body, &mut env)? {
    Completion::Return(value) => Ok(value),
    Completion::Normal(_) => Ok(Value::Null),
  }
}

fn invoke(
  def: &Arc<FunctionDef>,
  arguments: Vec<Value>,
  state: &mut State,
) -> Result<Value, RuntimeError> {
  let limit = state.config.run.max_call_depth;
  if state.call_depth >= limit {
    return Err(RuntimeError::CallDepthExceeded { limit });
  }

  trace_dbg!(
    &state.config,
    DebugTrace::Eval,
    "call {} with {} argument(s) at depth {}",
    def.name,
    arguments.len(),
    state.call_depth
  );

  state.call_depth += 1;
  let mut env = Env {
    state: &mut *state,
    frame: Frame::with_arguments(arguments),
  };
  let result = exec(&def.body, &mut env);
  state.call_depth -= 1;

  match result? {
    Completion::Return(value) => Ok(value),
    Completion::Normal(_) => Ok(Value::Null),
  }
}

fn binary(
  operation: BinaryOperation,
  left: Value,
  right: Value,
) -> Result<Value, RuntimeError> {
  match operation {
    BinaryOperation::Add => Ok(match (left, right) {
      (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_add(r)),
      (Value::Str(l), Value::Str(r)) => Value::Str(l + &r),
      (l, r) => Value::Str(format!("{}{}", l, r)),
    }),
    BinaryOperation::Equals => Ok(Value::Bool(left == right)),
    BinaryOperation::Minus => {
      let (l, r) = int_operands(&left, &right)?;
      Ok(Value::Int(l.wrapping_sub(r)))
    },
    BinaryOperation::Div => {
      let (l, r) = int_operands(&left, &right)?;
      if r == 0 {
        return Err(RuntimeError::DivisionByZero);
      }
      Ok(Value::Int(l.wrapping_div(r)))
    },
    BinaryOperation::LeftShift => {
      let (l, r) = int_operands(&left, &right)?;
      Ok(Value::Int(l.wrapping_shl((r & 63) as u32)))
    },
    BinaryOperation::LessThan => {
      let (l, r) = int_operands(&left, &right)?;
      Ok(Value::Bool(l < r))
    },
    BinaryOperation::GreaterThan => {
      let (l, r) = int_operands(&left, &right)?;
      Ok(Value::Bool(l > r))
    },
  }
}

fn int_operands(
  left: &Value,
  right: &Value,
) -> Result<(i64, i64), RuntimeError> {
  match (left, right) {
    (Value::Int(l), Value::Int(r)) => Ok((*l, *r)),
    (Value::Int(_), other) | (other, _) => Err(RuntimeError::type_mismatch("int", other)),
  }
}

fn int_list(value: &Value) -> Result<Vec<i64>, RuntimeError> {
  let Value::Array(items) = value else {
    return Err(RuntimeError::type_mismatch("int array", value));
  };

  items
    .borrow()
    .iter()
    .map(|item| match item {
      Value::Int(i) => Ok(*i),
      other => Err(RuntimeError::type_mismatch("int", other)),
    })
    .collect()
}

fn checked_index(
  index: i64,
  len: usize,
) -> Result<usize, RuntimeError> {
  usize::try_from(index)
    .ok()
    .filter(|idx| *idx < len)
    .ok_or(RuntimeError::IndexOutOfBounds { index, len })
}

fn element(
  array: &Value,
  index: i64,
) -> Result<Value, RuntimeError> {
  match array {
    Value::Array(items) => {
      let items = items.borrow();
      let idx = checked_index(index, items.len())?;
      Ok(items[idx].clone())
    },
    other => Err(RuntimeError::NotIndexable {
      found: other.type_name(),
    }),
  }
}

fn store_element(
  array: &Value,
  index: i64,
  value: Value,
) -> Result<(), RuntimeError> {
  match array {
    Value::Array(items) => {
      let mut items = items.borrow_mut();
      let idx = checked_index(index, items.len())?;
      items[idx] = value;
      Ok(())
    },
    other => Err(RuntimeError::NotIndexable {
      found: other.type_name(),
    }),
  }
}

fn new_array(
  kind: ArrayKind,
  dimensions: &[i64],
  limit: u64,
) -> Result<Value, RuntimeError> {
  if let Some(negative) = dimensions.iter().find(|d| **d < 0) {
    return Err(RuntimeError::NegativeArrayDimension(*negative));
  }

  // Level k holds the product of the first k dimensions; a zero further down
  // does not make the outer levels any cheaper.
  let mut level: u128 = 1;
  let mut total: u128 = 0;
  for len in dimensions {
    level = level.saturating_mul(*len as u128);
    total = total.saturating_add(level);
    if total > limit as u128 {
      return Err(RuntimeError::ArrayTooLarge { requested: total, limit });
    }
  }

  fn fill(
    kind: ArrayKind,
    dimensions: &[i64],
  ) -> Value {
    match dimensions.split_first() {
      None => match kind {
        ArrayKind::Int => Value::Int(0),
        ArrayKind::Str => Value::Null,
      },
      Some((len, rest)) => Value::new_array((0..*len).map(|_| fill(kind, rest)).collect()),
    }
  }

  if dimensions.is_empty() {
    return Ok(Value::new_array(Vec::new()));
  }

  Ok(fill(kind, dimensions))
}

fn property_name(name: Value) -> Result<String, RuntimeError> {
  match name {
    Value::Str(s) => Ok(s),
    other => Err(RuntimeError::type_mismatch("string", &other)),
  }
}
