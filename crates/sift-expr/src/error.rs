//! Validation error types.
//!
//! Errors are keyed by tree path and accumulate: one normalization pass
//! reports every defect in a candidate tree. The serde shape of these types
//! is shared with the remote canonicalization endpoint, whose rejection list
//! mirrors it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::NodeField;

/// One step from a node to one of its children.
///
/// Untagged variants must stay below the tagged ones for deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegment {
    /// Into the single child of a `not` node.
    Operand,
    /// Into the child at this position of an `and`/`or` node.
    #[serde(untagged)]
    Index(usize),
}

/// Render a path as a JSONPath-style string, `$` for the root.
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        match segment {
            PathSegment::Operand => out.push_str(".operand"),
            PathSegment::Index(i) => {
                out.push_str(".operands[");
                out.push_str(&i.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// What is wrong with one node of a candidate tree.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// The `kind` discriminant is absent or names no known kind.
    #[error("{}", unknown_kind_message(.kind))]
    UnknownKind { kind: String },

    /// A field the kind's contract requires is absent.
    #[error("missing required field `{field}`")]
    MissingField { field: NodeField },

    /// A field (or the node itself, when `field` is absent) has the wrong
    /// JSON shape.
    #[error("{} must be {expected}", shape_subject(.field))]
    WrongShape {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        field: Option<NodeField>,
        expected: String,
    },

    /// A set-membership predicate with zero values is semantically vacuous
    /// and is rejected rather than mistaken for "no filter".
    #[error("value set must not be empty")]
    EmptyValueSet,

    /// The candidate nests deeper than the normalizer is willing to recurse.
    #[error("filter tree exceeds the maximum depth")]
    MaxDepthExceeded,
}

fn unknown_kind_message(kind: &str) -> String {
    if kind.is_empty() {
        "missing filter kind discriminant".to_string()
    } else {
        format!("unknown filter kind `{kind}`")
    }
}

fn shape_subject(field: &Option<NodeField>) -> String {
    match field {
        Some(field) => format!("field `{field}`"),
        None => "filter node".to_string(),
    }
}

/// A validation defect tagged with the path of the offending node.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{issue} at {}", format_path(.path))]
pub struct ValidationError {
    /// Path from the root to the offending node.
    pub path: Vec<PathSegment>,
    /// The defect itself.
    pub issue: ValidationIssue,
}

impl ValidationError {
    /// Create an error at the given path.
    pub fn new(path: Vec<PathSegment>, issue: ValidationIssue) -> Self {
        Self { path, issue }
    }

    /// Create an error at the tree root.
    pub fn at_root(issue: ValidationIssue) -> Self {
        Self {
            path: Vec::new(),
            issue,
        }
    }
}

/// Wrapper for rendering an error list in log or UI messages.
pub struct ErrorList<'a>(pub &'a [ValidationError]);

impl fmt::Display for ErrorList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}
