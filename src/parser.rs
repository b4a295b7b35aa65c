// ABOUTME: Reader parsing token streams into heap-allocated datum trees

use crate::error::EvalError;
use crate::heap::Heap;
use crate::lexer::{Lexer, Token};
use crate::value::{Datum, Pair, Value};

/// Reads one datum from the token stream. Every node of the resulting tree
/// is allocated in the heap; `'x` desugars here to `(quote x)`.
pub fn read(lexer: &mut Lexer<'_>, heap: &mut Heap) -> Result<Datum, EvalError> {
    let token = lexer.peek().cloned().ok_or(EvalError::Syntax)?;
    lexer.advance()?;
    match token {
        Token::Integer(n) => Ok(Some(heap.alloc(Value::Integer(n)))),
        Token::Bool(b) => Ok(Some(heap.alloc(Value::Bool(b)))),
        Token::Symbol(name) => Ok(Some(heap.alloc(Value::Symbol(name)))),
        Token::Quote => {
            let quoted = read(lexer, heap)?;
            let tail = heap.alloc(Value::Pair(Pair {
                first: quoted,
                second: None,
            }));
            let head = heap.alloc(Value::Symbol("quote".to_string()));
            Ok(Some(heap.alloc(Value::Pair(Pair {
                first: Some(head),
                second: Some(tail),
            }))))
        }
        Token::Open => read_tail(lexer, heap),
        Token::Close | Token::Dot => Err(EvalError::Syntax),
    }
}

/// Reads the remainder of a list form, up to and including the close paren.
/// `()` is the null reference; `a . b` before the close paren makes the
/// chain improper.
fn read_tail(lexer: &mut Lexer<'_>, heap: &mut Heap) -> Result<Datum, EvalError> {
    match lexer.peek() {
        None => Err(EvalError::Syntax),
        Some(Token::Close) => {
            lexer.advance()?;
            Ok(None)
        }
        Some(_) => {
            let first = read(lexer, heap)?;
            if lexer.peek() == Some(&Token::Dot) {
                lexer.advance()?;
                let second = read(lexer, heap)?;
                match lexer.peek() {
                    Some(Token::Close) => lexer.advance()?,
                    _ => return Err(EvalError::Syntax),
                }
                Ok(Some(heap.alloc(Value::Pair(Pair { first, second }))))
            } else {
                let rest = read_tail(lexer, heap)?;
                Ok(Some(heap.alloc(Value::Pair(Pair {
                    first,
                    second: rest,
                }))))
            }
        }
    }
}
