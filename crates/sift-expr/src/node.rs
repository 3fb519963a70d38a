//! Filter tree model.
//!
//! A filter is a tree of [`FilterNode`] values: comparison, set-membership,
//! text, and nullary leaves at the bottom, `and`/`or`/`not` above them. The
//! serde representation is the wire format: internally tagged with `kind`,
//! snake_case (`{"kind": "is_one_of", "target": "topic", "values": [...]}`),
//! and is also the shape persisted in named-filter storage and sent to the
//! remote canonicalization endpoint.
//!
//! Construction alone does not make a tree canonical. Anything deserialized
//! from an untrusted source goes through [`crate::normalize`] first.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dataset::FieldRef;
use crate::scalar::Scalar;

/// One node of a filter tree.
///
/// `kind` uniquely determines which payload fields are present; the contract
/// per kind lives in [`crate::registry`]. Children are exclusively owned
/// (`Box`/`Vec`), so a tree is always acyclic and finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterNode {
    /// Column equals the value.
    EqualTo { target: FieldRef, value: Scalar },
    /// Column is strictly greater than the value.
    GreaterThan { target: FieldRef, value: Scalar },
    /// Column is strictly less than the value.
    LessThan { target: FieldRef, value: Scalar },
    /// Column is greater than or equal to the value.
    GreaterThanOrEqualTo { target: FieldRef, value: Scalar },
    /// Column is less than or equal to the value.
    LessThanOrEqualTo { target: FieldRef, value: Scalar },
    /// Column's value is one of the given values.
    IsOneOf { target: FieldRef, values: Vec<Scalar> },
    /// Multi-valued column contains every one of the given values.
    Includes { target: FieldRef, values: Vec<Scalar> },
    /// Multi-valued column contains none of the given values.
    Excludes { target: FieldRef, values: Vec<Scalar> },
    /// Multi-valued column contains exactly the given values.
    Only { target: FieldRef, values: Vec<Scalar> },
    /// Textual column contains the value as a substring.
    HasText { target: FieldRef, value: String },
    /// Column has no value.
    Empty { target: FieldRef },
    /// Column has a value.
    NotEmpty { target: FieldRef },
    /// Every operand matches. Zero operands means "always true".
    And { operands: Vec<FilterNode> },
    /// At least one operand matches. Zero operands means "always false".
    Or { operands: Vec<FilterNode> },
    /// The operand does not match.
    Not { operand: Box<FilterNode> },
}

impl FilterNode {
    /// Create an equality predicate.
    pub fn equal_to(target: impl Into<FieldRef>, value: impl Into<Scalar>) -> Self {
        FilterNode::EqualTo {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than predicate.
    pub fn greater_than(target: impl Into<FieldRef>, value: impl Into<Scalar>) -> Self {
        FilterNode::GreaterThan {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Create a less-than predicate.
    pub fn less_than(target: impl Into<FieldRef>, value: impl Into<Scalar>) -> Self {
        FilterNode::LessThan {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than-or-equal predicate.
    pub fn greater_than_or_equal_to(
        target: impl Into<FieldRef>,
        value: impl Into<Scalar>,
    ) -> Self {
        FilterNode::GreaterThanOrEqualTo {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Create a less-than-or-equal predicate.
    pub fn less_than_or_equal_to(target: impl Into<FieldRef>, value: impl Into<Scalar>) -> Self {
        FilterNode::LessThanOrEqualTo {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Create a set-membership predicate.
    pub fn is_one_of(target: impl Into<FieldRef>, values: Vec<Scalar>) -> Self {
        FilterNode::IsOneOf {
            target: target.into(),
            values,
        }
    }

    /// Create an includes predicate over a multi-valued column.
    pub fn includes(target: impl Into<FieldRef>, values: Vec<Scalar>) -> Self {
        FilterNode::Includes {
            target: target.into(),
            values,
        }
    }

    /// Create an excludes predicate over a multi-valued column.
    pub fn excludes(target: impl Into<FieldRef>, values: Vec<Scalar>) -> Self {
        FilterNode::Excludes {
            target: target.into(),
            values,
        }
    }

    /// Create an exact-set predicate over a multi-valued column.
    pub fn only(target: impl Into<FieldRef>, values: Vec<Scalar>) -> Self {
        FilterNode::Only {
            target: target.into(),
            values,
        }
    }

    /// Create a substring predicate.
    pub fn has_text(target: impl Into<FieldRef>, value: impl Into<String>) -> Self {
        FilterNode::HasText {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Create an empty predicate.
    pub fn empty(target: impl Into<FieldRef>) -> Self {
        FilterNode::Empty {
            target: target.into(),
        }
    }

    /// Create a not-empty predicate.
    pub fn not_empty(target: impl Into<FieldRef>) -> Self {
        FilterNode::NotEmpty {
            target: target.into(),
        }
    }

    /// Create a conjunction.
    pub fn and(operands: Vec<FilterNode>) -> Self {
        FilterNode::And { operands }
    }

    /// Create a disjunction.
    pub fn or(operands: Vec<FilterNode>) -> Self {
        FilterNode::Or { operands }
    }

    /// Create a negation.
    pub fn not(operand: FilterNode) -> Self {
        FilterNode::Not {
            operand: Box::new(operand),
        }
    }

    /// The kind discriminant of this node.
    pub fn kind(&self) -> crate::registry::NodeKind {
        use crate::registry::NodeKind;
        match self {
            FilterNode::EqualTo { .. } => NodeKind::EqualTo,
            FilterNode::GreaterThan { .. } => NodeKind::GreaterThan,
            FilterNode::LessThan { .. } => NodeKind::LessThan,
            FilterNode::GreaterThanOrEqualTo { .. } => NodeKind::GreaterThanOrEqualTo,
            FilterNode::LessThanOrEqualTo { .. } => NodeKind::LessThanOrEqualTo,
            FilterNode::IsOneOf { .. } => NodeKind::IsOneOf,
            FilterNode::Includes { .. } => NodeKind::Includes,
            FilterNode::Excludes { .. } => NodeKind::Excludes,
            FilterNode::Only { .. } => NodeKind::Only,
            FilterNode::HasText { .. } => NodeKind::HasText,
            FilterNode::Empty { .. } => NodeKind::Empty,
            FilterNode::NotEmpty { .. } => NodeKind::NotEmpty,
            FilterNode::And { .. } => NodeKind::And,
            FilterNode::Or { .. } => NodeKind::Or,
            FilterNode::Not { .. } => NodeKind::Not,
        }
    }

    /// The target column of this node, if it is a leaf.
    pub fn target(&self) -> Option<&str> {
        match self {
            FilterNode::EqualTo { target, .. }
            | FilterNode::GreaterThan { target, .. }
            | FilterNode::LessThan { target, .. }
            | FilterNode::GreaterThanOrEqualTo { target, .. }
            | FilterNode::LessThanOrEqualTo { target, .. }
            | FilterNode::IsOneOf { target, .. }
            | FilterNode::Includes { target, .. }
            | FilterNode::Excludes { target, .. }
            | FilterNode::Only { target, .. }
            | FilterNode::HasText { target, .. }
            | FilterNode::Empty { target }
            | FilterNode::NotEmpty { target } => Some(target),
            FilterNode::And { .. } | FilterNode::Or { .. } | FilterNode::Not { .. } => None,
        }
    }

    /// Collect every column name referenced anywhere in this tree.
    pub fn referenced_fields(&self) -> BTreeSet<FieldRef> {
        let mut fields = BTreeSet::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields(&self, fields: &mut BTreeSet<FieldRef>) {
        match self {
            FilterNode::And { operands } | FilterNode::Or { operands } => {
                for operand in operands {
                    operand.collect_fields(fields);
                }
            }
            FilterNode::Not { operand } => operand.collect_fields(fields),
            leaf => {
                if let Some(target) = leaf.target() {
                    fields.insert(target.to_string());
                }
            }
        }
    }
}
