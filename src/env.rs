// ABOUTME: Environment module for managing variable bindings and lexical scopes

use crate::error::SchemeError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub struct Environment {
    bindings: RefCell<HashMap<Rc<str>, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child frame extending `parent`, as `lambda`/`let`
    /// application does on every call.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Binds `name` in this frame. At the top-level (global) frame, a
    /// duplicate `define` is rejected; inside a nested frame (a lambda body,
    /// `let`, ...) redefinition is permitted, matching the chosen resolution
    /// of the source's ambiguous redefinition behavior.
    pub fn define(&self, name: Rc<str>, value: Value) -> Result<(), SchemeError> {
        if self.is_global() && self.bindings.borrow().contains_key(&name) {
            return Err(SchemeError::redefined_variable(name.as_ref()));
        }
        self.bindings.borrow_mut().insert(name, value);
        Ok(())
    }

    /// Looks up a symbol in this frame, then walks outward through parents.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    pub fn lookup(&self, name: &str) -> Result<Value, SchemeError> {
        self.get(name)
            .ok_or_else(|| SchemeError::undefined_variable(name))
    }

    /// Mutates the innermost frame that binds `name`; `set!` semantics.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), SchemeError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings
                .borrow_mut()
                .insert(Rc::from(name), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(SchemeError::undefined_variable(name)),
        }
    }
}
