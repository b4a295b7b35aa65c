//! Type predicates: number?, boolean?, symbol?, null?, pair?, list?

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::heap::Heap;
use crate::value::{Datum, Value};
use std::rc::Rc;

use super::{bind, boolean};

/// Evaluates the single argument every predicate takes.
fn eval_one(heap: &mut Heap, args: &[Datum], env: &Rc<Environment>) -> Result<Datum, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::Runtime);
    }
    eval(heap, args[0], env)
}

pub fn builtin_is_number(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let value = eval_one(heap, args, env)?;
    let result = matches!(value.map(|r| heap.get(r)), Some(Value::Integer(_)));
    Ok(boolean(heap, result))
}

pub fn builtin_is_boolean(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let value = eval_one(heap, args, env)?;
    let result = matches!(value.map(|r| heap.get(r)), Some(Value::Bool(_)));
    Ok(boolean(heap, result))
}

pub fn builtin_is_symbol(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let value = eval_one(heap, args, env)?;
    let result = matches!(value.map(|r| heap.get(r)), Some(Value::Symbol(_)));
    Ok(boolean(heap, result))
}

/// True only for the null reference.
pub fn builtin_is_null(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let value = eval_one(heap, args, env)?;
    Ok(boolean(heap, value.is_none()))
}

pub fn builtin_is_pair(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let value = eval_one(heap, args, env)?;
    let result = matches!(value.map(|r| heap.get(r)), Some(Value::Pair(_)));
    Ok(boolean(heap, result))
}

/// True for null and for any pair chain terminating in null.
pub fn builtin_is_list(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let mut cursor = eval_one(heap, args, env)?;
    let result = loop {
        match cursor {
            None => break true,
            Some(r) => match heap.get(r) {
                Value::Pair(pair) => cursor = pair.second,
                _ => break false,
            },
        }
    };
    Ok(boolean(heap, result))
}

/// Register all type predicates in the environment
pub fn register(heap: &mut Heap, env: &Rc<Environment>) {
    bind(heap, env, "number?", builtin_is_number);
    bind(heap, env, "boolean?", builtin_is_boolean);
    bind(heap, env, "symbol?", builtin_is_symbol);
    bind(heap, env, "null?", builtin_is_null);
    bind(heap, env, "pair?", builtin_is_pair);
    bind(heap, env, "list?", builtin_is_list);
}
