// ABOUTME: Constants for the REPL binary

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "schemelet v1.0";
pub const WELCOME_SUBTITLE: &str =
    "An embeddable Scheme-flavored Lisp with a mark-and-sweep heap";

pub const PROMPT: &str = "scheme> ";
pub const HISTORY_FILE: &str = ".schemelet_history";
