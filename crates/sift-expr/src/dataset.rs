//! Dataset schema collaborator types.
//!
//! The filter subsystem consumes, but does not own, a description of the
//! live dataset: which columns exist and what kind of data each holds. The
//! remote canonicalization authority resolves filters against its own copy;
//! [`stale_fields`] is the local mirror of that staleness check.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::FilterNode;

/// The name of a dataset column a predicate targets.
pub type FieldRef = String;

/// The kind of data a dataset column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Discrete labels.
    Categorical,
    /// Numeric measurements.
    Continuous,
    /// Dates and timestamps.
    Temporal,
    /// Free text.
    Textual,
    /// Model-assigned topics (multi-valued).
    Topic,
}

/// A snapshot of the dataset's column schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    fields: BTreeMap<FieldRef, FieldKind>,
}

impl DatasetSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn with_field(mut self, name: impl Into<FieldRef>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    /// Check if a field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// All field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Source of truth for which columns exist and what kind each holds.
pub trait SchemaProvider {
    /// The kind of the named field, or `None` if the field does not exist.
    fn field_kind(&self, name: &str) -> Option<FieldKind>;
}

impl SchemaProvider for DatasetSchema {
    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }
}

/// Columns a filter references that the provider no longer knows about.
///
/// A non-empty result predicts a remote rejection: the tree is shape-valid
/// but points at fields that have left the dataset schema.
pub fn stale_fields(filter: &FilterNode, provider: &impl SchemaProvider) -> Vec<FieldRef> {
    filter
        .referenced_fields()
        .into_iter()
        .filter(|field| provider.field_kind(field).is_none())
        .collect()
}
