//! Scalar values carried by leaf predicates.

use serde::{Deserialize, Serialize};

/// A scalar value a predicate compares a column against.
///
/// The filter wire format permits exactly two scalar shapes: JSON strings and
/// JSON numbers. The untagged representation means `"active"` and `42` on the
/// wire map directly to the corresponding variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Numeric value (all JSON numbers are carried as `f64`).
    Number(f64),
    /// UTF-8 string value.
    String(String),
}

impl Scalar {
    /// Check if this scalar is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }

    /// Check if this scalar is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Scalar::String(_))
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

// Conversion implementations
impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessors() {
        assert!(Scalar::Number(1.5).is_number());
        assert!(!Scalar::Number(1.5).is_string());
        assert_eq!(Scalar::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(Scalar::Number(1.5).as_str(), None);

        assert!(Scalar::String("a".into()).is_string());
        assert_eq!(Scalar::String("a".into()).as_str(), Some("a"));
        assert_eq!(Scalar::String("a".into()).as_f64(), None);
    }

    #[test]
    fn test_scalar_conversions() {
        let s: Scalar = 42i64.into();
        assert_eq!(s, Scalar::Number(42.0));

        let s: Scalar = "hello".into();
        assert_eq!(s, Scalar::String("hello".into()));
    }

    #[test]
    fn test_scalar_json_shape() {
        let n = serde_json::to_value(Scalar::Number(3.0)).unwrap();
        assert_eq!(n, serde_json::json!(3.0));

        let s = serde_json::to_value(Scalar::String("topic-a".into())).unwrap();
        assert_eq!(s, serde_json::json!("topic-a"));

        let back: Scalar = serde_json::from_value(serde_json::json!("topic-a")).unwrap();
        assert_eq!(back, Scalar::String("topic-a".into()));
        let back: Scalar = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert_eq!(back, Scalar::Number(7.0));
    }
}
