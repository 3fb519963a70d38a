//! Node schema registry.
//!
//! For every filter kind this module declares which payload fields are
//! required and what shape each must have. The recursive normalizer consults
//! nothing else: [`contract`] is an exhaustive match over the closed
//! [`NodeKind`] set, so adding a kind without a contract fails to compile
//! rather than silently accepting nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind discriminant of a filter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    EqualTo,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
    IsOneOf,
    Includes,
    Excludes,
    Only,
    HasText,
    Empty,
    NotEmpty,
    And,
    Or,
    Not,
}

/// Every kind, in declaration order.
pub const ALL_KINDS: [NodeKind; 15] = [
    NodeKind::EqualTo,
    NodeKind::GreaterThan,
    NodeKind::LessThan,
    NodeKind::GreaterThanOrEqualTo,
    NodeKind::LessThanOrEqualTo,
    NodeKind::IsOneOf,
    NodeKind::Includes,
    NodeKind::Excludes,
    NodeKind::Only,
    NodeKind::HasText,
    NodeKind::Empty,
    NodeKind::NotEmpty,
    NodeKind::And,
    NodeKind::Or,
    NodeKind::Not,
];

impl NodeKind {
    /// The snake_case discriminant used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            NodeKind::EqualTo => "equal_to",
            NodeKind::GreaterThan => "greater_than",
            NodeKind::LessThan => "less_than",
            NodeKind::GreaterThanOrEqualTo => "greater_than_or_equal_to",
            NodeKind::LessThanOrEqualTo => "less_than_or_equal_to",
            NodeKind::IsOneOf => "is_one_of",
            NodeKind::Includes => "includes",
            NodeKind::Excludes => "excludes",
            NodeKind::Only => "only",
            NodeKind::HasText => "has_text",
            NodeKind::Empty => "empty",
            NodeKind::NotEmpty => "not_empty",
            NodeKind::And => "and",
            NodeKind::Or => "or",
            NodeKind::Not => "not",
        }
    }

    /// Resolve a wire discriminant to a kind. `None` for unknown names.
    pub fn from_wire(name: &str) -> Option<NodeKind> {
        ALL_KINDS.into_iter().find(|kind| kind.wire_name() == name)
    }

    /// Compound kinds carry a list of child nodes.
    pub fn is_compound(self) -> bool {
        matches!(self, NodeKind::And | NodeKind::Or)
    }

    /// Single-child kinds carry exactly one child node.
    pub fn is_single_child(self) -> bool {
        matches!(self, NodeKind::Not)
    }

    /// Leaf kinds carry no child nodes.
    pub fn is_leaf(self) -> bool {
        !self.is_compound() && !self.is_single_child()
    }

    /// Set-membership kinds carry a `values` array that must not be empty.
    pub fn is_set_membership(self) -> bool {
        matches!(
            self,
            NodeKind::IsOneOf | NodeKind::Includes | NodeKind::Excludes | NodeKind::Only
        )
    }

    /// Comparison kinds carry a single scalar `value`.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            NodeKind::EqualTo
                | NodeKind::GreaterThan
                | NodeKind::LessThan
                | NodeKind::GreaterThanOrEqualTo
                | NodeKind::LessThanOrEqualTo
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A payload field a filter node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeField {
    Target,
    Value,
    Values,
    Operand,
    Operands,
}

/// Every payload field, in wire order.
pub const PAYLOAD_FIELDS: [NodeField; 5] = [
    NodeField::Target,
    NodeField::Value,
    NodeField::Values,
    NodeField::Operand,
    NodeField::Operands,
];

impl NodeField {
    /// The field name on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            NodeField::Target => "target",
            NodeField::Value => "value",
            NodeField::Values => "values",
            NodeField::Operand => "operand",
            NodeField::Operands => "operands",
        }
    }
}

impl fmt::Display for NodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The shape a required field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// A column name (JSON string).
    FieldName,
    /// A string or number.
    Scalar,
    /// A string only.
    Text,
    /// A non-empty array of strings/numbers for set-membership kinds; the
    /// emptiness rule itself is enforced by the normalizer.
    ScalarArray,
    /// A single child node (JSON object).
    Node,
    /// An array of child nodes. May be empty for `and`/`or`.
    NodeArray,
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldShape::FieldName => "a column name",
            FieldShape::Scalar => "a string or number",
            FieldShape::Text => "a string",
            FieldShape::ScalarArray => "an array of strings or numbers",
            FieldShape::Node => "a filter node",
            FieldShape::NodeArray => "an array of filter nodes",
        };
        f.write_str(name)
    }
}

/// The declarative field contract for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindContract {
    /// The kind this contract describes.
    pub kind: NodeKind,
    /// Required payload fields and their shapes.
    pub required: &'static [(NodeField, FieldShape)],
}

impl KindContract {
    /// Whether the contract requires the given field.
    pub fn requires(&self, field: NodeField) -> bool {
        self.required.iter().any(|(f, _)| *f == field)
    }

    /// The payload fields this kind must not carry. Anything in this set is
    /// stripped by normalization rather than rejected.
    pub fn stripped(&self) -> impl Iterator<Item = NodeField> + '_ {
        PAYLOAD_FIELDS.into_iter().filter(|f| !self.requires(*f))
    }
}

const COMPARISON: &[(NodeField, FieldShape)] = &[
    (NodeField::Target, FieldShape::FieldName),
    (NodeField::Value, FieldShape::Scalar),
];

const SET_MEMBERSHIP: &[(NodeField, FieldShape)] = &[
    (NodeField::Target, FieldShape::FieldName),
    (NodeField::Values, FieldShape::ScalarArray),
];

const TEXT: &[(NodeField, FieldShape)] = &[
    (NodeField::Target, FieldShape::FieldName),
    (NodeField::Value, FieldShape::Text),
];

const NULLARY: &[(NodeField, FieldShape)] = &[(NodeField::Target, FieldShape::FieldName)];

const COMPOUND: &[(NodeField, FieldShape)] = &[(NodeField::Operands, FieldShape::NodeArray)];

const SINGLE_CHILD: &[(NodeField, FieldShape)] = &[(NodeField::Operand, FieldShape::Node)];

/// Look up the field contract for a kind.
pub fn contract(kind: NodeKind) -> KindContract {
    let required = match kind {
        NodeKind::EqualTo
        | NodeKind::GreaterThan
        | NodeKind::LessThan
        | NodeKind::GreaterThanOrEqualTo
        | NodeKind::LessThanOrEqualTo => COMPARISON,
        NodeKind::IsOneOf | NodeKind::Includes | NodeKind::Excludes | NodeKind::Only => {
            SET_MEMBERSHIP
        }
        NodeKind::HasText => TEXT,
        NodeKind::Empty | NodeKind::NotEmpty => NULLARY,
        NodeKind::And | NodeKind::Or => COMPOUND,
        NodeKind::Not => SINGLE_CHILD,
    };
    KindContract { kind, required }
}
