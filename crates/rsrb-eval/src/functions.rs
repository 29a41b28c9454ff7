//! The global function table.

use std::collections::HashMap;
use std::rc::Rc;

use rsrb_parser::FunctionDecl;

/// Function definitions by name, shared by every call frame of a run.
#[derive(Debug, Default, Clone)]
pub struct FunctionTable {
    functions: HashMap<String, Rc<FunctionDecl>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decl`, replacing an earlier definition of the same name.
    pub fn define(&mut self, decl: Rc<FunctionDecl>) {
        self.functions.insert(decl.name.clone(), decl);
    }

    /// Look up a definition. The returned handle stays valid even if the
    /// name is redefined while the body runs.
    pub fn get(&self, name: &str) -> Option<Rc<FunctionDecl>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
