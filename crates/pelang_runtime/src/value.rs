use std::{
  cell::RefCell,
  collections::BTreeMap,
  fmt::{self, Display, Formatter},
  rc::Rc,
  sync::Arc,
};

use pelang_ast::{FunctionDef, Literal};

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
pub type ObjectRef = Rc<RefCell<BTreeMap<String, Value>>>;

/// Runtime values. Arrays and objects are shared and mutable; copies of a
/// value alias the same storage.
#[derive(Debug, Clone)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i64),
  Str(String),
  Array(ArrayRef),
  Object(ObjectRef),
  Function(Arc<FunctionDef>),
}

impl Value {
  pub fn new_array(items: Vec<Value>) -> Self {
    Value::Array(Rc::new(RefCell::new(items)))
  }

  pub fn new_object() -> Self {
    Value::Object(Rc::new(RefCell::new(BTreeMap::new())))
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::Str(_) => "string",
      Value::Array(_) => "array",
      Value::Object(_) => "object",
      Value::Function(_) => "function",
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }
}

impl PartialEq for Value {
  fn eq(
    &self,
    other: &Self,
  ) -> bool {
    match (self, other) {
      (Value::Null, Value::Null) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Int(a), Value::Int(b)) => a == b,
      (Value::Str(a), Value::Str(b)) => a == b,
      (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
      (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
      (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
      _ => false,
    }
  }
}

impl From<&Literal> for Value {
  /// Array literals allocate fresh storage on every conversion.
  fn from(literal: &Literal) -> Self {
    match literal {
      Literal::Null => Value::Null,
      Literal::Bool(b) => Value::Bool(*b),
      Literal::Int(i) => Value::Int(*i),
      Literal::Str(s) => Value::Str(s.clone()),
      Literal::Array(items) => Value::new_array(items.iter().map(Value::from).collect()),
    }
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Value::Int(value)
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Value::Bool(value)
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::Str(value.to_string())
  }
}

impl Value {
  /// Renders `self`, printing `[...]` or `{...}` for an array or object that
  /// is already being rendered further up.
  fn render(
    &self,
    f: &mut Formatter<'_>,
    open: &mut Vec<*const ()>,
  ) -> fmt::Result {
    match self {
      Value::Null => write!(f, "null"),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Int(i) => write!(f, "{}", i),
      Value::Str(s) => write!(f, "{}", s),
      Value::Array(items) => {
        let ptr = Rc::as_ptr(items) as *const ();
        if open.contains(&ptr) {
          return write!(f, "[...]");
        }

        open.push(ptr);
        write!(f, "[")?;
        for (idx, item) in items.borrow().iter().enumerate() {
          if idx > 0 {
            write!(f, ", ")?;
          }
          item.render(f, open)?;
        }
        open.pop();
        write!(f, "]")
      },
      Value::Object(props) => {
        let ptr = Rc::as_ptr(props) as *const ();
        if open.contains(&ptr) {
          return write!(f, "{{...}}");
        }

        open.push(ptr);
        write!(f, "{{")?;
        for (idx, (name, value)) in props.borrow().iter().enumerate() {
          if idx > 0 {
            write!(f, ",")?;
          }
          write!(f, " {}: ", name)?;
          value.render(f, open)?;
        }
        open.pop();
        write!(f, " }}")
      },
      Value::Function(def) => write!(f, "<fn {}>", def.name),
    }
  }
}

impl Display for Value {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    self.render(f, &mut Vec::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn arrays_compare_by_identity() {
    let lit = Literal::Array(vec![Literal::Int(1)]);
    let a = Value::from(&lit);
    let b = Value::from(&lit);

    assert_ne!(a, b);
    assert_eq!(a, a.clone());
  }

  #[test]
  fn scalars_compare_structurally() {
    assert_eq!(Value::from("Foo"), Value::Str("Foo".to_string()));
    assert_eq!(Value::from(10), Value::Int(10));
    assert_ne!(Value::Int(0), Value::Bool(false));
    assert_ne!(Value::Null, Value::Int(0));
  }

  #[test]
  fn display_leaves_strings_unquoted() {
    let nested = Value::from(&Literal::Array(vec![
      Literal::Str("a".to_string()),
      Literal::Array(vec![Literal::Int(1), Literal::Null]),
    ]));
    assert_eq!(nested.to_string(), "[a, [1, null]]");

    let obj = Value::new_object();
    if let Value::Object(props) = &obj {
      props.borrow_mut().insert("p1".to_string(), Value::Int(10));
    }
    assert_eq!(obj.to_string(), "{ p1: 10 }");
  }

  #[test]
  fn self_referencing_containers_print_a_placeholder() {
    let array = Value::new_array(vec![Value::Int(1)]);
    if let Value::Array(items) = &array {
      items.borrow_mut().push(array.clone());
    }
    assert_eq!(array.to_string(), "[1, [...]]");

    let obj = Value::new_object();
    if let Value::Object(props) = &obj {
      props.borrow_mut().insert("me".to_string(), obj.clone());
      props.borrow_mut().insert("xs".to_string(), array.clone());
    }
    assert_eq!(obj.to_string(), "{ me: {...}, xs: [1, [...]] }");

    // Shared but acyclic values print in full each time.
    let inner = Value::new_array(vec![Value::Int(2)]);
    let twice = Value::new_array(vec![inner.clone(), inner]);
    assert_eq!(twice.to_string(), "[[2], [2]]");

    for value in [array, obj] {
      match value {
        Value::Array(items) => items.borrow_mut().clear(),
        Value::Object(props) => props.borrow_mut().clear(),
        _ => {},
      }
    }
  }
}
