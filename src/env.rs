//! Lexically chained name bindings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// One scope frame, chained outward to the enclosing scope.
///
/// Frames are shared: a frame is held by the call that created it and by
/// every function value that captured it, so closures observe later
/// updates to their captured bindings.
#[derive(Debug)]
pub struct Env {
    parent: Option<Rc<Env>>,
    bindings: RefCell<HashMap<String, Value>>,
}

impl Env {
    pub fn new() -> Rc<Env> {
        Self::with_parent(None)
    }

    pub fn enclosing(parent: Rc<Env>) -> Rc<Env> {
        Self::with_parent(Some(parent))
    }

    fn with_parent(parent: Option<Rc<Env>>) -> Rc<Env> {
        Rc::new(Env {
            parent,
            bindings: RefCell::new(HashMap::new()),
        })
    }

    /// Look a name up, walking outward through the chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.borrow().get(name) {
            Some(v) => Some(v.clone()),
            None => self.parent.as_ref().and_then(|p| p.get(name)),
        }
    }

    /// Bind a name in this scope. Re-binding an existing name here
    /// overwrites it (shadowing an outer binding is allowed).
    pub fn set(&self, name: &str, val: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), val);
    }

    /// Overwrite an existing binding, walking outward to the innermost
    /// scope that holds the name. Returns false if no scope binds it.
    pub fn reset(&self, name: &str, val: Value) -> bool {
        if let Some(binding) = self.bindings.borrow_mut().get_mut(name) {
            *binding = val;
            return true;
        }
        match self.parent.as_ref() {
            Some(parent) => parent.reset(name, val),
            None => false,
        }
    }
}
