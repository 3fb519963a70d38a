//! The named filter library value.
//!
//! A library is a name-keyed map of saved filters plus a revision counter.
//! The whole value is what gets persisted: every store operation is a single
//! load, modify, persist of this struct, so no partial-write state is ever
//! observable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sift_expr::FilterNode;

use crate::error::Error;

/// A filter saved under a user-chosen name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFilter {
    /// Unique key within the library.
    pub name: String,
    /// The canonical filter tree.
    pub filter: FilterNode,
}

/// How a save treats an existing entry with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Insert or overwrite.
    #[default]
    Upsert,
    /// Insert only; an existing name is a `DuplicateName` error.
    CreateOnly,
}

/// The in-memory library value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterLibrary {
    /// Monotonically increasing write counter, bumped per persisted change.
    pub revision: u64,
    entries: BTreeMap<String, NamedFilter>,
}

impl FilterLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a filter under a name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        filter: FilterNode,
        mode: SaveMode,
    ) -> Result<(), Error> {
        let name = name.into();
        if mode == SaveMode::CreateOnly && self.entries.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.entries
            .insert(name.clone(), NamedFilter { name, filter });
        Ok(())
    }

    /// Look up a filter by name.
    pub fn get(&self, name: &str) -> Option<&NamedFilter> {
        self.entries.get(name)
    }

    /// Remove a filter by name. Removing an absent name is a no-op; returns
    /// whether an entry was actually removed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// All saved names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of saved filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over saved filters in name order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedFilter> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut library = FilterLibrary::new();
        library
            .insert("mine", FilterNode::empty("col"), SaveMode::Upsert)
            .unwrap();

        let entry = library.get("mine").unwrap();
        assert_eq!(entry.name, "mine");
        assert_eq!(entry.filter, FilterNode::empty("col"));
        assert_eq!(library.names(), vec!["mine"]);
    }

    #[test]
    fn test_upsert_overwrites_create_only_refuses() {
        let mut library = FilterLibrary::new();
        library
            .insert("mine", FilterNode::empty("a"), SaveMode::CreateOnly)
            .unwrap();
        library
            .insert("mine", FilterNode::empty("b"), SaveMode::Upsert)
            .unwrap();
        assert_eq!(library.get("mine").unwrap().filter, FilterNode::empty("b"));

        let err = library
            .insert("mine", FilterNode::empty("c"), SaveMode::CreateOnly)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName(name) if name == "mine"));
        // The refused save left the entry alone.
        assert_eq!(library.get("mine").unwrap().filter, FilterNode::empty("b"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut library = FilterLibrary::new();
        library
            .insert("mine", FilterNode::empty("a"), SaveMode::Upsert)
            .unwrap();

        assert!(library.remove("mine"));
        let before = library.clone();
        assert!(!library.remove("mine"));
        assert!(!library.remove("mine"));
        assert_eq!(library, before);
    }

    #[test]
    fn test_library_json_roundtrip() {
        let mut library = FilterLibrary::new();
        library.revision = 3;
        library
            .insert(
                "topics",
                FilterNode::is_one_of("topic", vec!["economy".into()]),
                SaveMode::Upsert,
            )
            .unwrap();

        let wire = serde_json::to_string(&library).unwrap();
        let back: FilterLibrary = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, library);
    }
}
