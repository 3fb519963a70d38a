//! Canonicalization wire protocol.
//!
//! The request body is the bare filter tree JSON. A success response is the
//! canonical tree; a rejection is a 422 whose body carries a per-path issue
//! list mirroring the local validation error shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use sift_expr::{format_path, FieldRef, PathSegment};

/// One remote rejection: a predicate that no longer resolves against the
/// live dataset schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteIssue {
    /// Path from the root to the offending node.
    pub path: Vec<PathSegment>,
    /// The stale column, when the issue is about one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<FieldRef>,
    /// Human-readable explanation, surfaced verbatim to the editing UI.
    pub message: String,
}

impl fmt::Display for RemoteIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, format_path(&self.path))
    }
}

/// Body of a rejection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    /// Per-path issues, never empty in a well-formed rejection.
    pub errors: Vec<RemoteIssue>,
}
