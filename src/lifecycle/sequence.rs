//! The fixed module order.

use std::collections::HashSet;

use crate::lifecycle::error::SequenceError;
use crate::lifecycle::module::Module;

/// A literal, ordered list of modules. The last entry is the root module.
///
/// The order is taken as given; nothing is resolved or reordered here.
pub struct ModuleSequence {
    modules: Vec<Box<dyn Module>>,
}

impl ModuleSequence {
    /// Build a sequence. Fails on an empty list or a repeated module name.
    pub fn new(modules: Vec<Box<dyn Module>>) -> Result<Self, SequenceError> {
        if modules.is_empty() {
            return Err(SequenceError::Empty);
        }

        let mut seen = HashSet::with_capacity(modules.len());
        for module in &modules {
            if !seen.insert(module.name()) {
                return Err(SequenceError::Duplicate(module.name().to_string()));
            }
        }

        Ok(Self { modules })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Always false for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Index of the root module.
    pub fn root_index(&self) -> usize {
        self.modules.len() - 1
    }

    /// Name of the root module.
    pub fn root_name(&self) -> &str {
        self.modules[self.root_index()].name()
    }

    /// Module names in initialization order.
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    pub(crate) fn module_mut(&mut self, index: usize) -> &mut dyn Module {
        self.modules[index].as_mut()
    }
}

impl std::fmt::Debug for ModuleSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleSequence")
            .field("modules", &self.names())
            .finish()
    }
}
