//! Recursive validator/normalizer.
//!
//! [`normalize`] takes an untrusted JSON candidate (editor state, wire
//! payload, stored library entry) and either rebuilds it as a canonical
//! [`FilterNode`] or reports every defect in the tree, each tagged with the
//! path of the offending node. Normalization is all-or-nothing per call: a
//! partially valid tree is never returned.
//!
//! The typed node is reconstructed from each kind's required fields only, so
//! fields left behind by a previous kind selection in the editor (a `values`
//! array on a node that was switched to `empty`, say) are stripped rather
//! than carried along.

use serde_json::{Map, Value as Json};

use crate::error::{PathSegment, ValidationError, ValidationIssue};
use crate::node::FilterNode;
use crate::registry::{FieldShape, NodeField, NodeKind};
use crate::scalar::Scalar;

/// Maximum nesting depth accepted from untrusted input.
pub const MAX_DEPTH: usize = 64;

/// Validate and canonicalize a candidate tree.
///
/// Returns the reconstructed, field-stripped tree only when the whole
/// subtree is defect-free; otherwise the accumulated error list.
pub fn normalize(candidate: &Json) -> Result<FilterNode, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    let node = normalize_at(candidate, &mut path, 0, &mut errors);
    match node {
        Some(node) if errors.is_empty() => Ok(node),
        _ => Err(errors),
    }
}

/// Re-normalize an already-typed tree.
///
/// Typed trees are shape-correct by construction, but can still carry
/// semantic defects (an empty value set built programmatically), so the
/// store runs this before persisting.
pub fn normalize_node(node: &FilterNode) -> Result<FilterNode, Vec<ValidationError>> {
    match serde_json::to_value(node) {
        Ok(candidate) => normalize(&candidate),
        Err(_) => Err(vec![ValidationError::at_root(ValidationIssue::WrongShape {
            field: None,
            expected: "a serializable filter tree".to_string(),
        })]),
    }
}

fn normalize_at(
    candidate: &Json,
    path: &mut Vec<PathSegment>,
    depth: usize,
    errors: &mut Vec<ValidationError>,
) -> Option<FilterNode> {
    if depth > MAX_DEPTH {
        errors.push(ValidationError::new(
            path.clone(),
            ValidationIssue::MaxDepthExceeded,
        ));
        return None;
    }

    let Some(object) = candidate.as_object() else {
        errors.push(ValidationError::new(
            path.clone(),
            ValidationIssue::WrongShape {
                field: None,
                expected: "a filter object".to_string(),
            },
        ));
        return None;
    };

    let kind = match object.get("kind") {
        Some(Json::String(name)) => match NodeKind::from_wire(name) {
            Some(kind) => kind,
            None => {
                errors.push(ValidationError::new(
                    path.clone(),
                    ValidationIssue::UnknownKind { kind: name.clone() },
                ));
                return None;
            }
        },
        Some(other) => {
            errors.push(ValidationError::new(
                path.clone(),
                ValidationIssue::UnknownKind {
                    kind: other.to_string(),
                },
            ));
            return None;
        }
        None => {
            errors.push(ValidationError::new(
                path.clone(),
                ValidationIssue::UnknownKind {
                    kind: String::new(),
                },
            ));
            return None;
        }
    };

    // Every required field is checked before any `?` fires, so a single pass
    // reports all defects of a node, not just the first.
    match kind {
        NodeKind::EqualTo => {
            let target = require_target(object, path, errors);
            let value = require_scalar(object, path, errors);
            Some(FilterNode::EqualTo {
                target: target?,
                value: value?,
            })
        }
        NodeKind::GreaterThan => {
            let target = require_target(object, path, errors);
            let value = require_scalar(object, path, errors);
            Some(FilterNode::GreaterThan {
                target: target?,
                value: value?,
            })
        }
        NodeKind::LessThan => {
            let target = require_target(object, path, errors);
            let value = require_scalar(object, path, errors);
            Some(FilterNode::LessThan {
                target: target?,
                value: value?,
            })
        }
        NodeKind::GreaterThanOrEqualTo => {
            let target = require_target(object, path, errors);
            let value = require_scalar(object, path, errors);
            Some(FilterNode::GreaterThanOrEqualTo {
                target: target?,
                value: value?,
            })
        }
        NodeKind::LessThanOrEqualTo => {
            let target = require_target(object, path, errors);
            let value = require_scalar(object, path, errors);
            Some(FilterNode::LessThanOrEqualTo {
                target: target?,
                value: value?,
            })
        }
        NodeKind::IsOneOf => {
            let target = require_target(object, path, errors);
            let values = require_values(object, kind, path, errors);
            Some(FilterNode::IsOneOf {
                target: target?,
                values: values?,
            })
        }
        NodeKind::Includes => {
            let target = require_target(object, path, errors);
            let values = require_values(object, kind, path, errors);
            Some(FilterNode::Includes {
                target: target?,
                values: values?,
            })
        }
        NodeKind::Excludes => {
            let target = require_target(object, path, errors);
            let values = require_values(object, kind, path, errors);
            Some(FilterNode::Excludes {
                target: target?,
                values: values?,
            })
        }
        NodeKind::Only => {
            let target = require_target(object, path, errors);
            let values = require_values(object, kind, path, errors);
            Some(FilterNode::Only {
                target: target?,
                values: values?,
            })
        }
        NodeKind::HasText => {
            let target = require_target(object, path, errors);
            let value = require_text(object, path, errors);
            Some(FilterNode::HasText {
                target: target?,
                value: value?,
            })
        }
        NodeKind::Empty => {
            let target = require_target(object, path, errors);
            Some(FilterNode::Empty { target: target? })
        }
        NodeKind::NotEmpty => {
            let target = require_target(object, path, errors);
            Some(FilterNode::NotEmpty { target: target? })
        }
        NodeKind::And => {
            let operands = require_operands(object, path, depth, errors);
            Some(FilterNode::And {
                operands: operands?,
            })
        }
        NodeKind::Or => {
            let operands = require_operands(object, path, depth, errors);
            Some(FilterNode::Or {
                operands: operands?,
            })
        }
        NodeKind::Not => {
            let operand = require_operand(object, path, depth, errors);
            Some(FilterNode::Not {
                operand: Box::new(operand?),
            })
        }
    }
}

fn missing(path: &[PathSegment], field: NodeField) -> ValidationError {
    ValidationError::new(path.to_vec(), ValidationIssue::MissingField { field })
}

fn wrong_shape(path: &[PathSegment], field: NodeField, shape: FieldShape) -> ValidationError {
    ValidationError::new(
        path.to_vec(),
        ValidationIssue::WrongShape {
            field: Some(field),
            expected: shape.to_string(),
        },
    )
}

fn require_target(
    object: &Map<String, Json>,
    path: &[PathSegment],
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match object.get(NodeField::Target.wire_name()) {
        Some(Json::String(name)) => Some(name.clone()),
        Some(_) => {
            errors.push(wrong_shape(path, NodeField::Target, FieldShape::FieldName));
            None
        }
        None => {
            errors.push(missing(path, NodeField::Target));
            None
        }
    }
}

fn as_scalar(value: &Json) -> Option<Scalar> {
    match value {
        Json::String(s) => Some(Scalar::String(s.clone())),
        Json::Number(n) => n.as_f64().map(Scalar::Number),
        _ => None,
    }
}

fn require_scalar(
    object: &Map<String, Json>,
    path: &[PathSegment],
    errors: &mut Vec<ValidationError>,
) -> Option<Scalar> {
    match object.get(NodeField::Value.wire_name()) {
        Some(value) => match as_scalar(value) {
            Some(scalar) => Some(scalar),
            None => {
                errors.push(wrong_shape(path, NodeField::Value, FieldShape::Scalar));
                None
            }
        },
        None => {
            errors.push(missing(path, NodeField::Value));
            None
        }
    }
}

fn require_text(
    object: &Map<String, Json>,
    path: &[PathSegment],
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match object.get(NodeField::Value.wire_name()) {
        Some(Json::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.push(wrong_shape(path, NodeField::Value, FieldShape::Text));
            None
        }
        None => {
            errors.push(missing(path, NodeField::Value));
            None
        }
    }
}

fn require_values(
    object: &Map<String, Json>,
    kind: NodeKind,
    path: &[PathSegment],
    errors: &mut Vec<ValidationError>,
) -> Option<Vec<Scalar>> {
    let items = match object.get(NodeField::Values.wire_name()) {
        Some(Json::Array(items)) => items,
        Some(_) => {
            errors.push(wrong_shape(path, NodeField::Values, FieldShape::ScalarArray));
            return None;
        }
        None => {
            errors.push(missing(path, NodeField::Values));
            return None;
        }
    };

    let scalars: Option<Vec<Scalar>> = items.iter().map(as_scalar).collect();
    let Some(scalars) = scalars else {
        errors.push(wrong_shape(path, NodeField::Values, FieldShape::ScalarArray));
        return None;
    };

    if scalars.is_empty() && kind.is_set_membership() {
        errors.push(ValidationError::new(
            path.to_vec(),
            ValidationIssue::EmptyValueSet,
        ));
        return None;
    }

    Some(scalars)
}

fn require_operand(
    object: &Map<String, Json>,
    path: &mut Vec<PathSegment>,
    depth: usize,
    errors: &mut Vec<ValidationError>,
) -> Option<FilterNode> {
    match object.get(NodeField::Operand.wire_name()) {
        Some(child) => {
            path.push(PathSegment::Operand);
            let node = normalize_at(child, path, depth + 1, errors);
            path.pop();
            node
        }
        None => {
            errors.push(missing(path, NodeField::Operand));
            None
        }
    }
}

fn require_operands(
    object: &Map<String, Json>,
    path: &mut Vec<PathSegment>,
    depth: usize,
    errors: &mut Vec<ValidationError>,
) -> Option<Vec<FilterNode>> {
    let items = match object.get(NodeField::Operands.wire_name()) {
        Some(Json::Array(items)) => items,
        Some(_) => {
            errors.push(wrong_shape(path, NodeField::Operands, FieldShape::NodeArray));
            return None;
        }
        None => {
            errors.push(missing(path, NodeField::Operands));
            return None;
        }
    };

    // Visit every child even after a failure so sibling defects are all
    // reported in the same pass.
    let mut children = Vec::with_capacity(items.len());
    let mut complete = true;
    for (index, item) in items.iter().enumerate() {
        path.push(PathSegment::Index(index));
        match normalize_at(item, path, depth + 1, errors) {
            Some(child) => children.push(child),
            None => complete = false,
        }
        path.pop();
    }
    complete.then_some(children)
}
