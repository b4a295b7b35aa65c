//! List operations: cons, car, cdr, list, list-ref, list-tail, set-car!, set-cdr!

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::heap::Heap;
use crate::value::{Datum, Pair, Value};
use std::rc::Rc;

use super::{bind, boolean, eval_to_integer};

/// Allocates a fresh pair from its two evaluated arguments.
pub fn builtin_cons(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::Runtime);
    }
    let first = eval(heap, args[0], env)?;
    let second = eval(heap, args[1], env)?;
    Ok(Some(heap.alloc(Value::Pair(Pair { first, second }))))
}

/// Head of a pair; anything else, null included, is a runtime error.
pub fn builtin_car(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::Runtime);
    }
    let target = eval(heap, args[0], env)?.ok_or(EvalError::Runtime)?;
    match heap.get(target) {
        Value::Pair(pair) => Ok(pair.first),
        _ => Err(EvalError::Runtime),
    }
}

/// Tail of a pair.
pub fn builtin_cdr(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::Runtime);
    }
    let target = eval(heap, args[0], env)?.ok_or(EvalError::Runtime)?;
    match heap.get(target) {
        Value::Pair(pair) => Ok(pair.second),
        _ => Err(EvalError::Runtime),
    }
}

/// Builds a right-nested chain from its arguments, evaluated left to right.
///
/// ```lisp
/// (list 1 2 3) => (1 2 3)
/// (list) => ()
/// ```
pub fn builtin_list(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(eval(heap, *arg, env)?);
    }
    let mut chain = None;
    for value in values.into_iter().rev() {
        chain = Some(heap.alloc(Value::Pair(Pair {
            first: value,
            second: chain,
        })));
    }
    Ok(chain)
}

/// Steps `count` cdrs down a chain; every step must land on a pair.
fn walk(heap: &Heap, mut cursor: Datum, count: i64) -> Result<Datum, EvalError> {
    for _ in 0..count {
        match cursor {
            Some(r) => match heap.get(r) {
                Value::Pair(pair) => cursor = pair.second,
                _ => return Err(EvalError::Runtime),
            },
            None => return Err(EvalError::Runtime),
        }
    }
    Ok(cursor)
}

/// Zero-indexed element of a chain.
pub fn builtin_list_ref(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::Runtime);
    }
    let chain = eval(heap, args[0], env)?;
    let index = eval_to_integer(heap, args[1], env)?;
    if index < 0 {
        return Err(EvalError::Runtime);
    }
    let cell = walk(heap, chain, index)?.ok_or(EvalError::Runtime)?;
    match heap.get(cell) {
        Value::Pair(pair) => Ok(pair.first),
        _ => Err(EvalError::Runtime),
    }
}

/// The k-th cdr of a chain; the result itself may be anything, only the
/// cells stepped over must be pairs.
pub fn builtin_list_tail(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::Runtime);
    }
    let chain = eval(heap, args[0], env)?;
    let count = eval_to_integer(heap, args[1], env)?;
    if count < 0 {
        return Err(EvalError::Runtime);
    }
    walk(heap, chain, count)
}

/// `(set-car! p v)` overwrites the head of a pair in place.
pub fn builtin_set_car(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::Syntax);
    }
    let target = eval(heap, args[0], env)?.ok_or(EvalError::Syntax)?;
    match heap.get(target) {
        Value::Pair(_) => {}
        _ => return Err(EvalError::Syntax),
    }
    let value = eval(heap, args[1], env)?;
    if let Value::Pair(pair) = heap.get_mut(target) {
        pair.first = value;
    }
    Ok(boolean(heap, true))
}

/// `(set-cdr! p v)` overwrites the tail of a pair in place.
pub fn builtin_set_cdr(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::Syntax);
    }
    let target = eval(heap, args[0], env)?.ok_or(EvalError::Syntax)?;
    match heap.get(target) {
        Value::Pair(_) => {}
        _ => return Err(EvalError::Syntax),
    }
    let value = eval(heap, args[1], env)?;
    if let Value::Pair(pair) = heap.get_mut(target) {
        pair.second = value;
    }
    Ok(boolean(heap, true))
}

/// Register all list builtins in the environment
pub fn register(heap: &mut Heap, env: &Rc<Environment>) {
    bind(heap, env, "cons", builtin_cons);
    bind(heap, env, "car", builtin_car);
    bind(heap, env, "cdr", builtin_cdr);
    bind(heap, env, "list", builtin_list);
    bind(heap, env, "list-ref", builtin_list_ref);
    bind(heap, env, "list-tail", builtin_list_tail);
    bind(heap, env, "set-car!", builtin_set_car);
    bind(heap, env, "set-cdr!", builtin_set_cdr);
}
