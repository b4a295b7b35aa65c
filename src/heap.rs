// ABOUTME: Heap registry owning every allocated value, with mark-and-sweep collection

use crate::env::Environment;
use crate::value::Value;
use std::collections::HashSet;
use std::rc::Rc;

/// Index of an allocated value. Copyable; comparing references compares
/// slot identity, like `eq?`, never structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRef(usize);

#[derive(Debug)]
struct Slot {
    value: Option<Value>,
    marked: bool,
}

/// Registry of every allocation made by the reader and the builtins. The
/// heap is the sole owner of values and `collect` is the only reclamation
/// path; freed slots are recycled through a free list.
#[derive(Debug, Default)]
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Heap {
    pub fn new() -> Self {
        Heap {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Places a value in the registry and returns a reference to it.
    pub fn alloc(&mut self, value: Value) -> ValueRef {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Slot {
                    value: Some(value),
                    marked: false,
                };
                ValueRef(index)
            }
            None => {
                self.slots.push(Slot {
                    value: Some(value),
                    marked: false,
                });
                ValueRef(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, r: ValueRef) -> &Value {
        self.slots[r.0]
            .value
            .as_ref()
            .expect("dangling value reference")
    }

    pub fn get_mut(&mut self, r: ValueRef) -> &mut Value {
        self.slots[r.0]
            .value
            .as_mut()
            .expect("dangling value reference")
    }

    /// Number of live allocations.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Reclaims every value not reachable from the root environment chain.
    ///
    /// Pairs keep both fields alive; a closure keeps its body forms and
    /// every binding in every frame of its captured chain alive. Marking is
    /// a worklist traversal, so closure/environment cycles terminate. Mark
    /// bits are left cleared afterwards.
    pub fn collect(&mut self, root: &Rc<Environment>) {
        for slot in &mut self.slots {
            slot.marked = false;
        }

        let mut pending: Vec<ValueRef> = Vec::new();
        let mut visited = HashSet::new();
        mark_environment(root, &mut pending, &mut visited);

        while let Some(r) = pending.pop() {
            if self.slots[r.0].marked {
                continue;
            }
            self.slots[r.0].marked = true;
            match &self.slots[r.0].value {
                Some(Value::Pair(pair)) => {
                    pending.extend(pair.first);
                    pending.extend(pair.second);
                }
                Some(Value::Lambda(lambda)) => {
                    pending.extend(lambda.body.iter().copied().flatten());
                    mark_environment(&lambda.env, &mut pending, &mut visited);
                }
                _ => {}
            }
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.is_some() && !slot.marked {
                slot.value = None;
                self.free.push(index);
            }
            slot.marked = false;
        }
    }
}

/// Queues every binding of every frame from `env` up through the root. The
/// visited set keeps repeat walks of shared frames out of the worklist.
fn mark_environment(
    env: &Rc<Environment>,
    pending: &mut Vec<ValueRef>,
    visited: &mut HashSet<*const Environment>,
) {
    let mut cursor = Some(Rc::clone(env));
    while let Some(frame) = cursor {
        if !visited.insert(Rc::as_ptr(&frame)) {
            break;
        }
        pending.extend(frame.local_values().into_iter().flatten());
        cursor = frame.parent().cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Lambda, Pair};

    #[test]
    fn test_alloc_and_get() {
        let mut heap = Heap::new();
        let r = heap.alloc(Value::Integer(7));
        assert!(matches!(heap.get(r), Value::Integer(7)));
        assert_eq!(heap.live(), 1);
    }

    #[test]
    fn test_collect_reclaims_unreachable() {
        let mut heap = Heap::new();
        let root = Environment::new();
        heap.alloc(Value::Integer(1));
        heap.alloc(Value::Integer(2));
        assert_eq!(heap.live(), 2);

        heap.collect(&root);
        assert_eq!(heap.live(), 0);
    }

    #[test]
    fn test_collect_keeps_root_bindings_transitively() {
        let mut heap = Heap::new();
        let root = Environment::new();

        let one = Some(heap.alloc(Value::Integer(1)));
        let two = Some(heap.alloc(Value::Integer(2)));
        let pair = heap.alloc(Value::Pair(Pair {
            first: one,
            second: two,
        }));
        root.define("p".to_string(), Some(pair));
        heap.alloc(Value::Integer(99));

        heap.collect(&root);
        assert_eq!(heap.live(), 3);
        assert!(matches!(heap.get(pair), Value::Pair(_)));
    }

    #[test]
    fn test_collect_is_idempotent() {
        let mut heap = Heap::new();
        let root = Environment::new();
        let kept = heap.alloc(Value::Integer(5));
        root.define("x".to_string(), Some(kept));
        heap.alloc(Value::Integer(6));

        heap.collect(&root);
        let after_first = heap.live();
        heap.collect(&root);
        assert_eq!(heap.live(), after_first);
    }

    #[test]
    fn test_slot_reuse_after_sweep() {
        let mut heap = Heap::new();
        let root = Environment::new();
        heap.alloc(Value::Integer(1));
        heap.collect(&root);

        heap.alloc(Value::Integer(2));
        assert_eq!(heap.live(), 1);
    }

    #[test]
    fn test_self_referential_closure_terminates() {
        let mut heap = Heap::new();
        let root = Environment::new();
        let frame = Environment::with_parent(Rc::clone(&root));

        // A closure bound in the very frame it captures.
        let lambda = heap.alloc(Value::Lambda(Lambda {
            params: Vec::new(),
            body: vec![None],
            env: Rc::clone(&frame),
        }));
        frame.define("loop".to_string(), Some(lambda));
        root.define("entry".to_string(), Some(lambda));

        heap.collect(&root);
        assert_eq!(heap.live(), 1);

        // Dropping the root binding leaves only the frame-internal cycle,
        // which the sweep must dissolve.
        root.define("entry".to_string(), None);
        drop(frame);
        heap.collect(&root);
        assert_eq!(heap.live(), 0);
    }
}
