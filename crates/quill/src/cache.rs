//! Compiled template cache.
//!
//! Templates are cached by their exact source text. Entries are never
//! evicted, so a process formatting unboundedly many distinct templates
//! grows without limit.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use quill_core::Template;

/// An append-only map from template source to compiled template.
#[derive(Debug, Default)]
pub(crate) struct TemplateCache {
    entries: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    /// Look up a compiled template.
    pub(crate) fn get(&self, source: &str) -> Option<Arc<Template>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
            .cloned()
    }

    /// Publish a compiled template.
    ///
    /// If another thread cached the same source first, its entry is kept and
    /// returned.
    pub(crate) fn insert(&self, template: Template) -> Arc<Template> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(template.source().to_string())
            .or_insert_with(|| Arc::new(template))
            .clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use quill_core::template::Node;

    use super::*;

    fn literal(source: &str) -> Template {
        Template::new(source, vec![Node::Literal(source.to_string())])
    }

    #[test]
    fn test_get_after_insert() {
        let cache = TemplateCache::default();
        assert!(cache.get("a").is_none());

        let inserted = cache.insert(literal("a"));
        let found = cache.get("a").unwrap();
        assert!(Arc::ptr_eq(&inserted, &found));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = TemplateCache::default();
        let first = cache.insert(literal("a"));
        let second = cache.insert(literal("a"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }
}
