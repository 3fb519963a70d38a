//! Sub-expression combinators.
//!
//! A specialized widget (a topic picker, a category picker) owns one leaf
//! predicate embedded in a possibly larger tree. These combinators read and
//! rewrite that one predicate without the widget understanding the rest of
//! the tree.
//!
//! The recognized shape is narrow on purpose: the managed predicate is the
//! **first** operand of an `and`/`or` root. The binding is positional, so a
//! hand-reordered tree silently stops matching; callers must treat `None`
//! as "fall back to a neutral widget state", never as an error.

use crate::node::FilterNode;
use crate::registry::NodeKind;
use crate::scalar::Scalar;

/// Read the values of the widget-managed predicate.
///
/// Returns the first operand's values when `root` is `and`/`or` and that
/// operand is a leaf of `expected` kind targeting `target_field`; `None` for
/// every other shape. Single-`value` kinds yield a one-element vec, nullary
/// kinds an empty one. Never searches past position 0.
pub fn extract_target(
    root: &FilterNode,
    target_field: &str,
    expected: NodeKind,
) -> Option<Vec<Scalar>> {
    let first = match root {
        FilterNode::And { operands } | FilterNode::Or { operands } => operands.first()?,
        _ => return None,
    };

    if first.kind() != expected || first.target() != Some(target_field) {
        return None;
    }
    leaf_values(first)
}

/// Write the values of the widget-managed predicate.
///
/// When `root` matches the recognized shape (first operand a set-membership
/// leaf targeting `target_field`), only that operand's values are replaced;
/// its kind, the compound kind, and every sibling operand are preserved.
/// Otherwise a fresh `and` with a single `is_one_of` operand is synthesized.
/// Idempotent: repeating the call with the same values is a no-op.
pub fn upsert_target(
    root: Option<&FilterNode>,
    target_field: &str,
    new_values: Vec<Scalar>,
) -> FilterNode {
    if let Some(root) = root {
        if let Some(rebuilt) = replace_first_operand(root, target_field, &new_values) {
            return rebuilt;
        }
    }

    FilterNode::And {
        operands: vec![FilterNode::IsOneOf {
            target: target_field.to_string(),
            values: new_values,
        }],
    }
}

fn replace_first_operand(
    root: &FilterNode,
    target_field: &str,
    new_values: &[Scalar],
) -> Option<FilterNode> {
    let operands = match root {
        FilterNode::And { operands } | FilterNode::Or { operands } => operands,
        _ => return None,
    };

    let first = operands.first()?;
    if !first.kind().is_set_membership() || first.target() != Some(target_field) {
        return None;
    }

    let replacement = match first {
        FilterNode::IsOneOf { target, .. } => FilterNode::IsOneOf {
            target: target.clone(),
            values: new_values.to_vec(),
        },
        FilterNode::Includes { target, .. } => FilterNode::Includes {
            target: target.clone(),
            values: new_values.to_vec(),
        },
        FilterNode::Excludes { target, .. } => FilterNode::Excludes {
            target: target.clone(),
            values: new_values.to_vec(),
        },
        FilterNode::Only { target, .. } => FilterNode::Only {
            target: target.clone(),
            values: new_values.to_vec(),
        },
        _ => return None,
    };

    let mut rebuilt = operands.clone();
    rebuilt[0] = replacement;
    Some(match root {
        FilterNode::Or { .. } => FilterNode::Or { operands: rebuilt },
        _ => FilterNode::And { operands: rebuilt },
    })
}

fn leaf_values(node: &FilterNode) -> Option<Vec<Scalar>> {
    match node {
        FilterNode::IsOneOf { values, .. }
        | FilterNode::Includes { values, .. }
        | FilterNode::Excludes { values, .. }
        | FilterNode::Only { values, .. } => Some(values.clone()),
        FilterNode::EqualTo { value, .. }
        | FilterNode::GreaterThan { value, .. }
        | FilterNode::LessThan { value, .. }
        | FilterNode::GreaterThanOrEqualTo { value, .. }
        | FilterNode::LessThanOrEqualTo { value, .. } => Some(vec![value.clone()]),
        FilterNode::HasText { value, .. } => Some(vec![Scalar::String(value.clone())]),
        FilterNode::Empty { .. } | FilterNode::NotEmpty { .. } => Some(Vec::new()),
        FilterNode::And { .. } | FilterNode::Or { .. } | FilterNode::Not { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(values: &[&str]) -> Vec<Scalar> {
        values.iter().map(|v| Scalar::from(*v)).collect()
    }

    #[test]
    fn test_extract_recognized_shape() {
        let root = FilterNode::and(vec![
            FilterNode::is_one_of("topic", topics(&["economy", "health"])),
            FilterNode::has_text("title", "budget"),
        ]);

        let extracted = extract_target(&root, "topic", NodeKind::IsOneOf);
        assert_eq!(extracted, Some(topics(&["economy", "health"])));
    }

    #[test]
    fn test_extract_does_not_search_past_position_zero() {
        let root = FilterNode::or(vec![
            FilterNode::has_text("title", "budget"),
            FilterNode::is_one_of("topic", topics(&["economy"])),
        ]);

        assert_eq!(extract_target(&root, "topic", NodeKind::IsOneOf), None);
    }

    #[test]
    fn test_extract_mismatches_degrade_to_none() {
        let managed = FilterNode::is_one_of("topic", topics(&["a"]));

        // Root is not a compound.
        assert_eq!(extract_target(&managed, "topic", NodeKind::IsOneOf), None);

        // Wrong target field.
        let root = FilterNode::and(vec![managed.clone()]);
        assert_eq!(extract_target(&root, "category", NodeKind::IsOneOf), None);

        // Wrong kind at position 0.
        assert_eq!(extract_target(&root, "topic", NodeKind::Includes), None);

        // Empty compound.
        let root = FilterNode::and(vec![]);
        assert_eq!(extract_target(&root, "topic", NodeKind::IsOneOf), None);
    }

    #[test]
    fn test_extract_single_value_and_nullary_leaves() {
        let root = FilterNode::and(vec![FilterNode::has_text("title", "budget")]);
        assert_eq!(
            extract_target(&root, "title", NodeKind::HasText),
            Some(vec![Scalar::String("budget".into())])
        );

        let root = FilterNode::and(vec![FilterNode::not_empty("published_at")]);
        assert_eq!(
            extract_target(&root, "published_at", NodeKind::NotEmpty),
            Some(vec![])
        );
    }

    #[test]
    fn test_upsert_synthesizes_from_nothing() {
        let tree = upsert_target(None, "topic", topics(&["economy"]));
        assert_eq!(
            tree,
            FilterNode::and(vec![FilterNode::is_one_of("topic", topics(&["economy"]))])
        );
    }

    #[test]
    fn test_upsert_replaces_without_disturbing_siblings() {
        let root = FilterNode::and(vec![
            FilterNode::is_one_of("topic", topics(&["v1"])),
            FilterNode::has_text("title", "budget"),
        ]);

        let updated = upsert_target(Some(&root), "topic", topics(&["v2", "v3"]));
        assert_eq!(
            updated,
            FilterNode::and(vec![
                FilterNode::is_one_of("topic", topics(&["v2", "v3"])),
                FilterNode::has_text("title", "budget"),
            ])
        );
    }

    #[test]
    fn test_upsert_preserves_compound_and_leaf_kind() {
        let root = FilterNode::or(vec![
            FilterNode::includes("tags", topics(&["old"])),
            FilterNode::empty("region"),
        ]);

        let updated = upsert_target(Some(&root), "tags", topics(&["new"]));
        assert_eq!(
            updated,
            FilterNode::or(vec![
                FilterNode::includes("tags", topics(&["new"])),
                FilterNode::empty("region"),
            ])
        );
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let roots = [
            None,
            Some(FilterNode::has_text("title", "budget")),
            Some(FilterNode::and(vec![
                FilterNode::is_one_of("topic", topics(&["v1"])),
                FilterNode::not(FilterNode::empty("region")),
            ])),
        ];

        for root in roots {
            let once = upsert_target(root.as_ref(), "topic", topics(&["a", "b"]));
            let twice = upsert_target(Some(&once), "topic", topics(&["a", "b"]));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_upsert_replaces_unrecognized_root() {
        // A hand-built root that does not match the recognized shape is
        // replaced wholesale by the synthesized widget tree.
        let root = FilterNode::not(FilterNode::empty("region"));
        let updated = upsert_target(Some(&root), "topic", topics(&["a"]));
        assert_eq!(
            updated,
            FilterNode::and(vec![FilterNode::is_one_of("topic", topics(&["a"]))])
        );
    }
}
