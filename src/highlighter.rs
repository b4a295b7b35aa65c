// ABOUTME: Syntax highlighter and input validator for the REPL
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for syntax elements while preserving display width, and a Validator
// that keeps reading while parentheses are unbalanced

use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline_derive::{Completer, Helper, Hinter};
use std::borrow::Cow;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_NUMBER: &str = "\x1b[33m"; // Yellow
const COLOR_BOOLEAN: &str = "\x1b[33m"; // Yellow
const COLOR_QUOTE: &str = "\x1b[1;33m"; // Bold yellow

/// Bindings that read like syntax even though they are ordinary callables.
const SPECIAL_FORMS: &[&str] = &[
    "quote", "if", "lambda", "define", "set!", "set-car!", "set-cdr!", "and", "or", "not",
];

const BUILTINS: &[&str] = &[
    "+", "-", "*", "/", "max", "min", "abs", "=", "<", ">", "<=", ">=", "number?", "boolean?",
    "symbol?", "null?", "pair?", "list?", "cons", "car", "cdr", "list", "list-ref", "list-tail",
];

/// REPL helper: syntax-aware color highlighting plus multi-line entry while
/// a form is still open.
#[derive(Completer, Helper, Hinter)]
pub struct SchemeHelper;

impl SchemeHelper {
    pub fn new() -> Self {
        SchemeHelper
    }

    /// Colorize an already-serialized result for the `=>` echo line.
    pub fn highlight_output(text: &str) -> String {
        highlight_line(text)
    }
}

impl Default for SchemeHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SchemeHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Validator for SchemeHelper {
    /// Open parentheses mean the form continues on the next line. Surplus
    /// close parens are let through; the reader reports those.
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let mut depth: i32 = 0;
        for c in ctx.input().chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        if depth > 0 {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

/// Walk a line word by word and wrap the recognizable pieces in color.
fn highlight_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' | ')' => {
                result.push_str(COLOR_PARENS);
                result.push(c);
                result.push_str(COLOR_RESET);
                i += 1;
            }
            '\'' => {
                result.push_str(COLOR_QUOTE);
                result.push(c);
                result.push_str(COLOR_RESET);
                i += 1;
            }
            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }
            _ => {
                let start = i;
                while i < chars.len()
                    && !chars[i].is_whitespace()
                    && !matches!(chars[i], '(' | ')' | '\'')
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                result.push_str(&colorize_word(&word));
            }
        }
    }
    result
}

fn colorize_word(word: &str) -> String {
    let color = if word.parse::<i64>().is_ok() {
        COLOR_NUMBER
    } else if word == "#t" || word == "#f" {
        COLOR_BOOLEAN
    } else if SPECIAL_FORMS.contains(&word) {
        COLOR_SPECIAL_FORM
    } else if BUILTINS.contains(&word) {
        COLOR_BUILTIN
    } else {
        return word.to_string();
    };
    format!("{color}{word}{COLOR_RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words_pass_through() {
        assert_eq!(highlight_line("foo bar"), "foo bar");
    }

    #[test]
    fn test_known_words_are_colored() {
        assert!(highlight_line("define").contains(COLOR_SPECIAL_FORM));
        assert!(highlight_line("cons").contains(COLOR_BUILTIN));
        assert!(highlight_line("42").contains(COLOR_NUMBER));
        assert!(highlight_line("#t").contains(COLOR_BOOLEAN));
    }

    #[test]
    fn test_parens_are_colored() {
        let out = highlight_line("(x)");
        assert!(out.starts_with(COLOR_PARENS));
        assert!(out.ends_with(COLOR_RESET));
    }
}
