// ABOUTME: Error types for tokenizing, reading, and evaluation failures

use thiserror::Error;

/// The three failure kinds of the dialect. Errors carry no payload: the
/// interpreter reports what kind of thing went wrong, never where or why.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// The tokenizer or reader could not recognize the input, or a special
    /// form was handed structurally ill-formed arguments.
    #[error("syntax error")]
    Syntax,

    /// A symbol lookup or assignment walked to the root frame without
    /// finding the name.
    #[error("name error")]
    Name,

    /// Every other semantic failure: arity mismatch, type mismatch, empty
    /// application, unserializable value.
    #[error("runtime error")]
    Runtime,
}
