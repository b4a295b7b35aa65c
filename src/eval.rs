// ABOUTME: Evaluator executing datum trees against an environment chain

use crate::env::Environment;
use crate::error::EvalError;
use crate::heap::Heap;
use crate::value::{BuiltinFn, Datum, Lambda, Value};
use std::rc::Rc;

enum Callee {
    Builtin(BuiltinFn),
    Lambda(Lambda),
}

/// Evaluates a datum: atoms and procedures are self-evaluating, symbols are
/// looked up, pairs are applications. The null reference is not a valid
/// form.
///
/// Every callable receives its arguments unevaluated and decides for itself
/// what to evaluate; this is what lets `if`, `define`, `lambda` and friends
/// live in the global environment as ordinary bindings, with no syntactic
/// classification pass in front of application.
pub fn eval(heap: &mut Heap, expr: Datum, env: &Rc<Environment>) -> Result<Datum, EvalError> {
    let r = expr.ok_or(EvalError::Runtime)?;
    let (head, tail) = match heap.get(r) {
        Value::Symbol(name) => return env.lookup(name),
        Value::Pair(pair) => (pair.first, pair.second),
        _ => return Ok(Some(r)),
    };

    let target = eval(heap, head, env)?.ok_or(EvalError::Runtime)?;

    let mut args = Vec::new();
    let mut cursor = tail;
    while let Some(cell) = cursor {
        match heap.get(cell) {
            Value::Pair(pair) => {
                args.push(pair.first);
                cursor = pair.second;
            }
            _ => return Err(EvalError::Runtime),
        }
    }

    let callee = match heap.get(target) {
        Value::Builtin(_, func) => Callee::Builtin(*func),
        Value::Lambda(lambda) => Callee::Lambda(lambda.clone()),
        _ => return Err(EvalError::Runtime),
    };
    match callee {
        Callee::Builtin(func) => func(heap, &args, env),
        Callee::Lambda(lambda) => apply(heap, &lambda, &args, env),
    }
}

/// Applies a closure: arity check, eager left-to-right evaluation of the
/// arguments in the caller's environment, then the body forms in order in a
/// fresh child of the captured environment.
pub fn apply(
    heap: &mut Heap,
    lambda: &Lambda,
    args: &[Datum],
    call_env: &Rc<Environment>,
) -> Result<Datum, EvalError> {
    if args.len() != lambda.params.len() {
        return Err(EvalError::Runtime);
    }

    let local = Environment::with_parent(Rc::clone(&lambda.env));
    for (param, arg) in lambda.params.iter().zip(args) {
        let value = eval(heap, *arg, call_env)?;
        local.define(param.clone(), value);
    }

    let mut result = None;
    for form in &lambda.body {
        result = eval(heap, *form, &local)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::read;

    fn read_one(heap: &mut Heap, input: &str) -> Datum {
        let mut lexer = Lexer::new(input).unwrap();
        read(&mut lexer, heap).unwrap()
    }

    #[test]
    fn test_atoms_self_evaluate() {
        let mut heap = Heap::new();
        let env = Environment::new();

        let n = read_one(&mut heap, "42");
        assert_eq!(eval(&mut heap, n, &env).unwrap(), n);

        let b = read_one(&mut heap, "#f");
        assert_eq!(eval(&mut heap, b, &env).unwrap(), b);
    }

    #[test]
    fn test_symbols_are_looked_up() {
        let mut heap = Heap::new();
        let env = Environment::new();
        let bound = Some(heap.alloc(Value::Integer(10)));
        env.define("x".to_string(), bound);

        let x = read_one(&mut heap, "x");
        assert_eq!(eval(&mut heap, x, &env).unwrap(), bound);

        let y = read_one(&mut heap, "y");
        assert!(matches!(eval(&mut heap, y, &env), Err(EvalError::Name)));
    }

    #[test]
    fn test_null_is_not_a_form() {
        let mut heap = Heap::new();
        let env = Environment::new();
        assert!(matches!(
            eval(&mut heap, None, &env),
            Err(EvalError::Runtime)
        ));
    }

    #[test]
    fn test_application_requires_a_callable() {
        let mut heap = Heap::new();
        let env = Environment::new();
        let form = read_one(&mut heap, "(1 2)");
        assert!(matches!(
            eval(&mut heap, form, &env),
            Err(EvalError::Runtime)
        ));
    }

    #[test]
    fn test_arguments_arrive_unevaluated() {
        fn count_args(
            heap: &mut Heap,
            args: &[Datum],
            _env: &Rc<Environment>,
        ) -> Result<Datum, EvalError> {
            Ok(Some(heap.alloc(Value::Integer(args.len() as i64))))
        }

        let mut heap = Heap::new();
        let env = Environment::new();
        let builtin = Some(heap.alloc(Value::Builtin("count-args", count_args)));
        env.define("count-args".to_string(), builtin);

        // `unbound` would fail lookup if the callee's arguments were
        // evaluated before the call.
        let form = read_one(&mut heap, "(count-args unbound (1 2) 3)");
        let result = eval(&mut heap, form, &env).unwrap().unwrap();
        assert!(matches!(heap.get(result), Value::Integer(3)));
    }

    #[test]
    fn test_improper_argument_list() {
        fn noop(
            _heap: &mut Heap,
            _args: &[Datum],
            _env: &Rc<Environment>,
        ) -> Result<Datum, EvalError> {
            Ok(None)
        }

        let mut heap = Heap::new();
        let env = Environment::new();
        let builtin = Some(heap.alloc(Value::Builtin("noop", noop)));
        env.define("noop".to_string(), builtin);

        let form = read_one(&mut heap, "(noop 1 . 2)");
        assert!(matches!(
            eval(&mut heap, form, &env),
            Err(EvalError::Runtime)
        ));
    }
}
