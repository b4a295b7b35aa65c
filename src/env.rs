// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::EvalError;
use crate::value::Datum;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of the lexical chain. Frames hold heap references only, never
/// owned values, so the only `Rc` edges run child-to-parent and frames free
/// deterministically once the closures capturing them are swept.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Datum>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Defines a binding in THIS scope (doesn't walk parent chain)
    pub fn define(&self, name: String, value: Datum) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up a symbol in THIS scope and parent scopes recursively
    pub fn lookup(&self, name: &str) -> Result<Datum, EvalError> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(*value);
        }
        match &self.parent {
            Some(parent) => parent.lookup(name),
            None => Err(EvalError::Name),
        }
    }

    /// Reads a binding from THIS scope only
    pub fn get_local(&self, name: &str) -> Option<Datum> {
        self.bindings.borrow().get(name).copied()
    }

    /// Walks the chain and returns the innermost frame holding `name`
    pub fn frame_of(self: &Rc<Self>, name: &str) -> Option<Rc<Environment>> {
        let mut cursor = Some(Rc::clone(self));
        while let Some(frame) = cursor {
            if frame.bindings.borrow().contains_key(name) {
                return Some(frame);
            }
            cursor = frame.parent.clone();
        }
        None
    }

    pub fn parent(&self) -> Option<&Rc<Environment>> {
        self.parent.as_ref()
    }

    /// Snapshot of the values bound in this frame, for the collector
    pub fn local_values(&self) -> Vec<Datum> {
        self.bindings.borrow().values().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::Heap;
    use crate::value::Value;

    #[test]
    fn test_define_and_lookup() {
        let mut heap = Heap::new();
        let env = Environment::new();
        let x = Some(heap.alloc(Value::Integer(42)));
        env.define("x".to_string(), x);

        assert_eq!(env.lookup("x").unwrap(), x);
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Environment::new();
        assert!(matches!(env.lookup("undefined"), Err(EvalError::Name)));
    }

    #[test]
    fn test_shadowing() {
        let mut heap = Heap::new();
        let parent = Environment::new();
        let outer = Some(heap.alloc(Value::Integer(42)));
        parent.define("x".to_string(), outer);

        let child = Environment::with_parent(parent);
        let inner = Some(heap.alloc(Value::Integer(100)));
        child.define("x".to_string(), inner);

        // Child should see its own value
        assert_eq!(child.lookup("x").unwrap(), inner);
    }

    #[test]
    fn test_parent_lookup() {
        let mut heap = Heap::new();
        let parent = Environment::new();
        let x = Some(heap.alloc(Value::Integer(42)));
        parent.define("x".to_string(), x);

        let child = Environment::with_parent(parent);

        // Child should see parent's value
        assert_eq!(child.lookup("x").unwrap(), x);
    }

    #[test]
    fn test_frame_of_finds_innermost() {
        let mut heap = Heap::new();
        let grandparent = Environment::new();
        let a = Some(heap.alloc(Value::Integer(1)));
        grandparent.define("a".to_string(), a);

        let parent = Environment::with_parent(grandparent);
        let child = Environment::with_parent(Rc::clone(&parent));
        let shadowed = Some(heap.alloc(Value::Integer(2)));
        parent.define("a".to_string(), shadowed);

        let frame = child.frame_of("a").unwrap();
        assert!(Rc::ptr_eq(&frame, &parent));
        assert_eq!(frame.get_local("a").unwrap(), shadowed);
    }

    #[test]
    fn test_frame_of_missing_name() {
        let env = Environment::new();
        assert!(env.frame_of("nope").is_none());
    }
}
