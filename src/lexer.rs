// ABOUTME: Tokenizer streaming source text into lexical tokens using nom combinators

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{map, map_res, not, opt, peek, recognize, value},
    IResult, Parser,
};

use crate::error::EvalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Quote,
    Dot,
    Integer(i64),
    Bool(bool),
    Symbol(String),
}

/// Characters that may start a symbol. Signs are handled separately: a
/// standalone `+`/`-` is a symbol, a sign followed by digits is an integer.
fn is_initial(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '<' | '>' | '=' | '*' | '/' | '#')
}

/// Characters that may continue a symbol.
fn is_subsequent(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '<' | '>' | '=' | '*' | '/' | '#' | '?' | '!' | '-')
}

fn punctuation(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Open, char('(')),
        value(Token::Close, char(')')),
        value(Token::Quote, char('\'')),
        value(Token::Dot, char('.')),
    ))
    .parse(input)
}

/// An unsigned digit run, or a sign immediately followed by digits.
/// Literals that overflow `i64` are rejected, which surfaces as a syntax
/// error.
fn integer(input: &str) -> IResult<&str, Token> {
    map_res(
        recognize((opt(one_of("+-")), digit1)),
        |text: &str| text.parse::<i64>().map(Token::Integer),
    )
    .parse(input)
}

/// `#t` or `#f`, but only when no identifier character follows: `#true` is
/// a symbol.
fn boolean(input: &str) -> IResult<&str, Token> {
    let (input, token) = alt((
        value(Token::Bool(true), tag("#t")),
        value(Token::Bool(false), tag("#f")),
    ))
    .parse(input)?;
    let (input, _) = not(peek(satisfy(is_subsequent))).parse(input)?;
    Ok((input, token))
}

fn symbol(input: &str) -> IResult<&str, Token> {
    map(
        recognize((satisfy(is_initial), take_while(is_subsequent))),
        |name: &str| Token::Symbol(name.to_string()),
    )
    .parse(input)
}

/// A sign with no following digit forms a one-character symbol.
fn sign_symbol(input: &str) -> IResult<&str, Token> {
    map(one_of("+-"), |c| Token::Symbol(c.to_string())).parse(input)
}

fn next_token(input: &str) -> IResult<&str, Token> {
    alt((integer, boolean, symbol, sign_symbol, punctuation)).parse(input)
}

/// Scans one token, skipping leading whitespace. `None` is end of stream;
/// any unrecognized character is a syntax error.
fn scan(input: &str) -> Result<Option<(Token, &str)>, EvalError> {
    let (rest, _) = multispace0::<_, nom::error::Error<&str>>(input)
        .map_err(|_| EvalError::Syntax)?;
    if rest.is_empty() {
        return Ok(None);
    }
    match next_token(rest) {
        Ok((rest, token)) => Ok(Some((token, rest))),
        Err(_) => Err(EvalError::Syntax),
    }
}

/// One-token-lookahead stream over source text. End of stream is observable
/// as `peek()` returning `None`.
#[derive(Debug)]
pub struct Lexer<'a> {
    current: Option<Token>,
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Result<Self, EvalError> {
        let mut lexer = Lexer {
            current: None,
            rest: input,
        };
        lexer.advance()?;
        Ok(lexer)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn advance(&mut self) -> Result<(), EvalError> {
        match scan(self.rest)? {
            Some((token, rest)) => {
                self.current = Some(token);
                self.rest = rest;
            }
            None => self.current = None,
        }
        Ok(())
    }
}
