// ABOUTME: The embedding surface: an interpreter instance owning heap and globals

use crate::builtins::register_builtins;
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::heap::Heap;
use crate::lexer::Lexer;
use crate::parser::read;
use crate::value::serialize;
use std::rc::Rc;

/// An interpreter instance: a fresh heap plus a global environment holding
/// every primitive. Definitions and mutations persist across `run` calls;
/// the global frame is the sole root the collector preserves between them,
/// so an embedder keeps a value alive by binding it to a global name.
#[derive(Debug)]
pub struct Interpreter {
    heap: Heap,
    global: Rc<Environment>,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut heap = Heap::new();
        let global = Environment::new();
        register_builtins(&mut heap, &global);
        Interpreter { heap, global }
    }

    /// Reads one datum from `source` (trailing tokens are ignored),
    /// evaluates it, and returns its canonical printed form. The collector
    /// runs before this returns (on the error path too), so only values
    /// reachable from the global frame survive the call. Completed
    /// definitions are never rolled back when a later step fails.
    pub fn run(&mut self, source: &str) -> Result<String, EvalError> {
        let result = self.run_once(source);
        self.heap.collect(&self.global);
        result
    }

    fn run_once(&mut self, source: &str) -> Result<String, EvalError> {
        let mut lexer = Lexer::new(source)?;
        let expr = read(&mut lexer, &mut self.heap)?;
        let value = eval(&mut self.heap, expr, &self.global)?;
        serialize(&self.heap, value)
    }

    /// Script helper: evaluates every top-level datum in `source` with the
    /// same per-datum collection discipline as `run`, returning the printed
    /// form of each.
    pub fn run_all(&mut self, source: &str) -> Result<Vec<String>, EvalError> {
        let mut results = Vec::new();
        let mut lexer = Lexer::new(source)?;
        while lexer.peek().is_some() {
            let outcome = self.step(&mut lexer);
            self.heap.collect(&self.global);
            results.push(outcome?);
        }
        Ok(results)
    }

    fn step(&mut self, lexer: &mut Lexer<'_>) -> Result<String, EvalError> {
        let expr = read(lexer, &mut self.heap)?;
        let value = eval(&mut self.heap, expr, &self.global)?;
        serialize(&self.heap, value)
    }

    /// Sweeps the heap against the global frame.
    pub fn collect(&mut self) {
        self.heap.collect(&self.global);
    }

    /// Number of live heap allocations.
    pub fn live_values(&self) -> usize {
        self.heap.live()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
