//! Special forms bound as ordinary callables: quote, if, lambda, define, set!
//!
//! Nothing here is syntax to the evaluator. Because every callee receives
//! its arguments unevaluated, these are plain global bindings and can be
//! shadowed in inner scopes like any other procedure.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::heap::Heap;
use crate::value::{Datum, Lambda, Value};
use std::rc::Rc;

use super::{bind, boolean, is_truthy};

/// Returns its single argument unevaluated.
pub fn builtin_quote(
    _heap: &mut Heap,
    args: &[Datum],
    _env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::Syntax);
    }
    Ok(args[0])
}

/// `(if c t)` / `(if c t e)`. Only the chosen branch is evaluated; a
/// two-arm `if` whose test is false returns the null reference.
pub fn builtin_if(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 2 && args.len() != 3 {
        return Err(EvalError::Syntax);
    }
    let test = eval(heap, args[0], env)?;
    if is_truthy(heap, test) {
        eval(heap, args[1], env)
    } else if args.len() == 3 {
        eval(heap, args[2], env)
    } else {
        Ok(None)
    }
}

/// Harvests parameter names from a formals chain: null or a proper list of
/// symbols, anything else is ill-formed.
fn param_names(heap: &Heap, formals: Datum) -> Result<Vec<String>, EvalError> {
    let mut names = Vec::new();
    let mut cursor = formals;
    while let Some(r) = cursor {
        match heap.get(r) {
            Value::Pair(pair) => {
                match pair.first.map(|f| heap.get(f)) {
                    Some(Value::Symbol(name)) => names.push(name.clone()),
                    _ => return Err(EvalError::Syntax),
                }
                cursor = pair.second;
            }
            _ => return Err(EvalError::Syntax),
        }
    }
    Ok(names)
}

/// `(lambda formals body...)` closes over the environment it is created in;
/// the body forms stay unevaluated until application.
pub fn builtin_lambda(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::Syntax);
    }
    let params = param_names(heap, args[0])?;
    let body = args[1..].to_vec();
    Ok(Some(heap.alloc(Value::Lambda(Lambda {
        params,
        body,
        env: Rc::clone(env),
    }))))
}

/// `(define name expr)` or `(define (name params...) body...)`.
///
/// The function form is sugar for binding a lambda; since the closure
/// captures the defining frame, that one binding doubles as the
/// self-binding recursion needs. The value form does not self-bind, and it
/// snapshots integer results so the new binding is never aliased to its
/// initializer.
pub fn builtin_define(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::Syntax);
    }
    let head = args[0].ok_or(EvalError::Syntax)?;

    enum Head {
        Name(String),
        Function { name: String, formals: Datum },
    }

    let head = match heap.get(head) {
        Value::Symbol(name) => Head::Name(name.clone()),
        Value::Pair(pair) => {
            let name = match pair.first.map(|f| heap.get(f)) {
                Some(Value::Symbol(name)) => name.clone(),
                _ => return Err(EvalError::Syntax),
            };
            Head::Function {
                name,
                formals: pair.second,
            }
        }
        _ => return Err(EvalError::Syntax),
    };

    match head {
        Head::Name(name) => {
            if args.len() != 2 {
                return Err(EvalError::Syntax);
            }
            let value = eval(heap, args[1], env)?;
            let snapshot = match value.map(|r| heap.get(r)) {
                Some(Value::Integer(n)) => Some(*n),
                _ => None,
            };
            let stored = match snapshot {
                Some(n) => Some(heap.alloc(Value::Integer(n))),
                None => value,
            };
            env.define(name, stored);
        }
        Head::Function { name, formals } => {
            let mut lambda_args = Vec::with_capacity(args.len());
            lambda_args.push(formals);
            lambda_args.extend_from_slice(&args[1..]);
            let lambda = builtin_lambda(heap, &lambda_args, env)?;
            env.define(name, lambda);
        }
    }
    Ok(boolean(heap, true))
}

/// `(set! name expr)` rebinds through the innermost frame holding the name.
/// When both the old and the new value are integers, the old cell is
/// mutated in place, so references that captured it before the `set!`
/// observe the update.
pub fn builtin_set(
    heap: &mut Heap,
    args: &[Datum],
    env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::Syntax);
    }
    let name = match args[0].map(|r| heap.get(r)) {
        Some(Value::Symbol(name)) => name.clone(),
        _ => return Err(EvalError::Syntax),
    };
    let value = eval(heap, args[1], env)?;

    let frame = env.frame_of(&name).ok_or(EvalError::Name)?;
    let current = frame.get_local(&name).ok_or(EvalError::Name)?;

    let in_place = match (current, value) {
        (Some(old), Some(new)) => match (heap.get(old), heap.get(new)) {
            (Value::Integer(_), Value::Integer(n)) => Some((old, *n)),
            _ => None,
        },
        _ => None,
    };
    match in_place {
        Some((old, n)) => {
            if let Value::Integer(cell) = heap.get_mut(old) {
                *cell = n;
            }
        }
        None => frame.define(name, value),
    }
    Ok(boolean(heap, true))
}

/// Register all special forms in the environment
pub fn register(heap: &mut Heap, env: &Rc<Environment>) {
    bind(heap, env, "quote", builtin_quote);
    bind(heap, env, "if", builtin_if);
    bind(heap, env, "lambda", builtin_lambda);
    bind(heap, env, "define", builtin_define);
    bind(heap, env, "set!", builtin_set);
}
