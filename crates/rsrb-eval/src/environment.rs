//! Variable bindings for one call frame.
//!
//! Backed by a persistent map, so copying an environment at call entry is
//! O(1) and later writes on either side never show through to the other.

use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: im::HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bind `name`, replacing any existing binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
