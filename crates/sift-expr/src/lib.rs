//! Sift filter expressions.
//!
//! This crate defines the filter tree model for Sift and every pure
//! algorithm over it: the node schema registry, the recursive
//! validator/normalizer, the widget sub-expression combinators, and the
//! dataset schema collaborator types.
//!
//! # Modules
//!
//! - [`scalar`] - Scalar values carried by leaf predicates
//! - [`node`] - The filter tree model and its wire format
//! - [`registry`] - Per-kind field contracts and kind groupings
//! - [`normalize`] - Recursive validation and canonicalization
//! - [`combine`] - First-operand combinators for widget-managed predicates
//! - [`dataset`] - Dataset schema collaborator types
//! - [`error`] - Per-path validation errors
//!
//! # Wire format
//!
//! Trees serialize to JSON with `kind` as the snake_case discriminant:
//!
//! ```
//! use sift_expr::FilterNode;
//!
//! let tree = FilterNode::and(vec![
//!     FilterNode::is_one_of("topic", vec!["economy".into()]),
//!     FilterNode::has_text("title", "budget"),
//! ]);
//! let wire = serde_json::to_string(&tree).unwrap();
//! assert!(wire.contains(r#""kind":"is_one_of""#));
//! ```
//!
//! The same shape is persisted in named-filter storage and POSTed to the
//! remote canonicalization endpoint.

pub mod combine;
pub mod dataset;
pub mod error;
pub mod node;
pub mod normalize;
pub mod registry;
pub mod scalar;

// Re-export commonly used types at crate root
pub use combine::{extract_target, upsert_target};
pub use dataset::{stale_fields, DatasetSchema, FieldKind, FieldRef, SchemaProvider};
pub use error::{format_path, ErrorList, PathSegment, ValidationError, ValidationIssue};
pub use node::FilterNode;
pub use normalize::{normalize, normalize_node, MAX_DEPTH};
pub use registry::{contract, FieldShape, KindContract, NodeField, NodeKind, ALL_KINDS};
pub use scalar::Scalar;

/// Wire format version for stored libraries and canonicalization requests.
///
/// Incremented when the JSON tree shape changes incompatibly.
pub const FORMAT_VERSION: u32 = 1;
