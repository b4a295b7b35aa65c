//! # Built-in Procedure Modules
//!
//! Every primitive binding of the global environment, organized by category:
//!
//! - **[arithmetic]**: +, -, *, /, max, min, abs
//! - **[comparison]**: =, <, >, <=, >=
//! - **[logic]**: and, or, not
//! - **[types]**: number?, boolean?, symbol?, null?, pair?, list?
//! - **[lists]**: cons, car, cdr, list, list-ref, list-tail, set-car!, set-cdr!
//! - **[special]**: quote, if, lambda, define, set!
//!
//! ## The evaluation contract
//!
//! A builtin receives its arguments **unevaluated**, as raw datum
//! references, together with the call-site environment. Ordinary procedures
//! must evaluate each argument themselves (strictly left to right) before
//! using it; special forms evaluate only what their semantics call for.
//! This single convention is why `if` and `define` need no dedicated
//! dispatch in the evaluator and can be shadowed like any other binding.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::heap::Heap;
use crate::value::{BuiltinFn, Datum, Value};
use std::rc::Rc;

pub mod arithmetic;
pub mod comparison;
pub mod lists;
pub mod logic;
pub mod special;
pub mod types;

/// Register all built-in procedures in the environment
pub fn register_builtins(heap: &mut Heap, env: &Rc<Environment>) {
    arithmetic::register(heap, env);
    comparison::register(heap, env);
    logic::register(heap, env);
    types::register(heap, env);
    lists::register(heap, env);
    special::register(heap, env);
}

pub(crate) fn bind(heap: &mut Heap, env: &Rc<Environment>, name: &'static str, func: BuiltinFn) {
    let value = heap.alloc(Value::Builtin(name, func));
    env.define(name.to_string(), Some(value));
}

pub(crate) fn integer(heap: &mut Heap, n: i64) -> Datum {
    Some(heap.alloc(Value::Integer(n)))
}

pub(crate) fn boolean(heap: &mut Heap, b: bool) -> Datum {
    Some(heap.alloc(Value::Bool(b)))
}

/// Evaluates one argument and requires an integer result.
pub(crate) fn eval_to_integer(
    heap: &mut Heap,
    arg: Datum,
    env: &Rc<Environment>,
) -> Result<i64, EvalError> {
    match eval(heap, arg, env)? {
        Some(r) => match heap.get(r) {
            Value::Integer(n) => Ok(*n),
            _ => Err(EvalError::Runtime),
        },
        None => Err(EvalError::Runtime),
    }
}

/// Truthiness: everything except `#f` is true, the null reference included.
pub(crate) fn is_truthy(heap: &Heap, datum: Datum) -> bool {
    match datum {
        Some(r) => !matches!(heap.get(r), Value::Bool(false)),
        None => true,
    }
}
