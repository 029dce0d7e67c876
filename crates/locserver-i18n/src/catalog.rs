//! In-memory catalogs and the per-tag catalog store

use crate::tag::LanguageTag;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

/// A flat message-key to translation mapping for exactly one language tag.
///
/// A catalog is replaced wholesale on reload and never mutated in place, so
/// readers holding an `Arc<Catalog>` always see one complete generation.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<String, String>,
    modified: SystemTime,
}

impl Catalog {
    /// Build a catalog from entries and the most recent source update time.
    pub fn new(entries: HashMap<String, String>, modified: SystemTime) -> Self {
        Self { entries, modified }
    }

    /// Look up a translation by message key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterate over all (key, translation) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the pairs whose key starts with `prefix`.
    ///
    /// An empty prefix yields every entry.
    pub fn entries_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries()
            .filter(move |(key, _)| key.starts_with(prefix))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Modification time of the most recent source update.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }
}

/// Mapping from canonical language tag to its catalog.
///
/// A store is an immutable snapshot: reloads build a fresh store off to the
/// side and publish it atomically, so no reader ever observes a partially
/// rebuilt mapping.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    catalogs: HashMap<String, Arc<Catalog>>,
}

impl CatalogStore {
    /// Build a store from per-tag catalogs.
    pub fn new(catalogs: HashMap<String, Arc<Catalog>>) -> Self {
        Self { catalogs }
    }

    /// Fetch the catalog for a tag, if one is loaded.
    pub fn get(&self, tag: &LanguageTag) -> Option<Arc<Catalog>> {
        self.catalogs.get(tag.canonical()).cloned()
    }

    /// The canonical tag strings currently served, in sorted order.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.catalogs.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Number of tags with a catalog.
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    /// Whether the store holds no catalogs.
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
