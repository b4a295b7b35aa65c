//! Arithmetic operations: +, -, *, /, max, min, abs
//!
//! Operands must evaluate to integers. Everything is 64-bit; `+`, `-`, `*`
//! and negation wrap on overflow, division by zero is a runtime error.

use crate::env::Environment;
use crate::error::EvalError;
use crate::heap::Heap;
use crate::value::Datum;
use std::rc::Rc;

use super::{bind, eval_to_integer, integer};

/// Returns the sum of all arguments.
///
/// ```lisp
/// (+ 1 2 3) => 6
/// (+ 10) => 10
/// (+) => 0
/// ```
pub fn builtin_add(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let mut sum: i64 = 0;
    for arg in args {
        sum = sum.wrapping_add(eval_to_integer(heap, *arg, env)?);
    }
    Ok(integer(heap, sum))
}

/// Returns the product of all arguments.
///
/// ```lisp
/// (* 2 3 4) => 24
/// (*) => 1
/// ```
pub fn builtin_mul(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    let mut product: i64 = 1;
    for arg in args {
        product = product.wrapping_mul(eval_to_integer(heap, *arg, env)?);
    }
    Ok(integer(heap, product))
}

/// Subtracts subsequent arguments from the first; with one argument,
/// returns its negation.
///
/// ```lisp
/// (- 10 3 2) => 5
/// (- 5) => -5
/// ```
pub fn builtin_sub(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.is_empty() {
        return Err(EvalError::Runtime);
    }
    let first = eval_to_integer(heap, args[0], env)?;
    if args.len() == 1 {
        return Ok(integer(heap, first.wrapping_neg()));
    }
    let mut result = first;
    for arg in &args[1..] {
        result = result.wrapping_sub(eval_to_integer(heap, *arg, env)?);
    }
    Ok(integer(heap, result))
}

/// Divides the first argument by the rest with truncating integer division;
/// with one argument, divides one by it.
///
/// ```lisp
/// (/ 20 4) => 5
/// (/ 7 2) => 3
/// (/ 5) => 0
/// ```
pub fn builtin_div(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.is_empty() {
        return Err(EvalError::Runtime);
    }
    let first = eval_to_integer(heap, args[0], env)?;
    if args.len() == 1 {
        let inverse = 1i64.checked_div(first).ok_or(EvalError::Runtime)?;
        return Ok(integer(heap, inverse));
    }
    let mut result = first;
    for arg in &args[1..] {
        let divisor = eval_to_integer(heap, *arg, env)?;
        result = result.checked_div(divisor).ok_or(EvalError::Runtime)?;
    }
    Ok(integer(heap, result))
}

/// Returns the largest argument; at least one is required.
pub fn builtin_max(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.is_empty() {
        return Err(EvalError::Runtime);
    }
    let mut best = eval_to_integer(heap, args[0], env)?;
    for arg in &args[1..] {
        let n = eval_to_integer(heap, *arg, env)?;
        if n > best {
            best = n;
        }
    }
    Ok(integer(heap, best))
}

/// Returns the smallest argument; at least one is required.
pub fn builtin_min(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.is_empty() {
        return Err(EvalError::Runtime);
    }
    let mut best = eval_to_integer(heap, args[0], env)?;
    for arg in &args[1..] {
        let n = eval_to_integer(heap, *arg, env)?;
        if n < best {
            best = n;
        }
    }
    Ok(integer(heap, best))
}

/// Returns the absolute value of its single argument.
pub fn builtin_abs(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::Runtime);
    }
    let n = eval_to_integer(heap, args[0], env)?;
    Ok(integer(heap, n.wrapping_abs()))
}

/// Register all arithmetic builtins in the environment
pub fn register(heap: &mut Heap, env: &Rc<Environment>) {
    bind(heap, env, "+", builtin_add);
    bind(heap, env, "-", builtin_sub);
    bind(heap, env, "*", builtin_mul);
    bind(heap, env, "/", builtin_div);
    bind(heap, env, "max", builtin_max);
    bind(heap, env, "min", builtin_min);
    bind(heap, env, "abs", builtin_abs);
}
