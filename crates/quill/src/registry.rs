//! Extension registry.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::extension::Extension;

/// Maps specifier letters to extension handlers.
///
/// Entries can be added or replaced but not removed.
#[derive(Default)]
pub(crate) struct ExtensionRegistry {
    handlers: RwLock<HashMap<char, Arc<dyn Extension>>>,
}

impl ExtensionRegistry {
    /// Bind `handler` to `specifier`, returning the handler it replaces.
    pub(crate) fn register(
        &self,
        specifier: char,
        handler: Arc<dyn Extension>,
    ) -> Option<Arc<dyn Extension>> {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(specifier, handler)
    }

    pub(crate) fn get(&self, specifier: char) -> Option<Arc<dyn Extension>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&specifier)
            .cloned()
    }

    pub(crate) fn contains(&self, specifier: char) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&specifier)
    }

    /// Registered specifiers in sorted order.
    pub(crate) fn specifiers(&self) -> Vec<char> {
        let mut specifiers: Vec<char> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        specifiers.sort_unstable();
        specifiers
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("specifiers", &self.specifiers())
            .finish()
    }
}
