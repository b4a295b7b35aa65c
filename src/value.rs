// ABOUTME: Value types representing dialect data structures and expressions

use crate::env::Environment;
use crate::error::EvalError;
use crate::heap::{Heap, ValueRef};
use std::rc::Rc;

/// A reference to a heap value, or the null reference denoting the empty
/// list. Null is a first-class datum; it is never itself a pair.
pub type Datum = Option<ValueRef>;

/// Host-provided procedure. Arguments arrive unevaluated; the callee decides
/// whether to evaluate each one in the given call-site environment.
pub type BuiltinFn =
    fn(&mut Heap, &[Datum], &Rc<Environment>) -> Result<Datum, EvalError>;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Bool(bool),
    Symbol(String),
    Pair(Pair),
    Builtin(&'static str, BuiltinFn),
    Lambda(Lambda),
}

/// Two mutable fields referencing other values. Lists are right-nested
/// chains of pairs terminating in the null reference.
#[derive(Debug, Clone, Copy)]
pub struct Pair {
    pub first: Datum,
    pub second: Datum,
}

/// A procedure closing over its parameter names, unevaluated body forms, and
/// the environment it was created in.
#[derive(Debug, Clone)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Vec<Datum>,
    pub env: Rc<Environment>,
}

/// Canonical printed form of a datum.
///
/// Null prints as `()`, proper chains as `(e1 e2 ... en)`, improper chains
/// as `(e1 ... en . tail)`. Closures and builtins have no printed form and
/// fail with a runtime error.
pub fn serialize(heap: &Heap, datum: Datum) -> Result<String, EvalError> {
    let r = match datum {
        None => return Ok("()".to_string()),
        Some(r) => r,
    };
    match heap.get(r) {
        Value::Integer(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("#t".to_string()),
        Value::Bool(false) => Ok("#f".to_string()),
        Value::Symbol(name) => Ok(name.clone()),
        Value::Pair(_) => serialize_chain(heap, r),
        Value::Builtin(..) | Value::Lambda(_) => Err(EvalError::Runtime),
    }
}

fn serialize_chain(heap: &Heap, head: ValueRef) -> Result<String, EvalError> {
    let mut out = String::from("(");
    let mut cursor = Some(head);
    let mut first = true;
    while let Some(r) = cursor {
        match heap.get(r) {
            Value::Pair(pair) => {
                if !first {
                    out.push(' ');
                }
                out.push_str(&serialize(heap, pair.first)?);
                first = false;
                cursor = pair.second;
            }
            _ => {
                out.push_str(" . ");
                out.push_str(&serialize(heap, cursor)?);
                break;
            }
        }
    }
    out.push(')');
    Ok(out)
}
