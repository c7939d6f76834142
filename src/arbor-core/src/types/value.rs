//! Constant value representation.

use serde::{Deserialize, Serialize};

/// Opaque constant payload held by a `Const` expression node.
///
/// Values are never evaluated or coerced by this layer; they are carried
/// verbatim for the external translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit floating point.
    Float64(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Binary(Vec<u8>),
    /// Array of values.
    Array(Vec<Value>),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            Self::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int64(_) => "Int64",
            Self::Float64(_) => "Float64",
            Self::String(_) => "String",
            Self::Binary(_) => "Binary",
            Self::Array(_) => "Array",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int64(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float64(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float64(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Binary(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(vs: Vec<Value>) -> Self {
        Self::Array(vs)
    }
}

impl From<Vec<i64>> for Value {
    fn from(vs: Vec<i64>) -> Self {
        Self::Array(vs.into_iter().map(Value::Int64).collect())
    }
}

impl From<Vec<f64>> for Value {
    fn from(vs: Vec<f64>) -> Self {
        Self::Array(vs.into_iter().map(Value::Float64).collect())
    }
}

impl std::fmt::Display for Value {
    /// Repr-style rendering: integers and floats bare, strings quoted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Float64(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Binary(b) => write!(f, "{b:?}"),
            Self::Array(vs) => {
                write!(f, "[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(42i64), Value::Int64(42));
        assert_eq!(Value::from(7i32), Value::Int64(7));
        assert_eq!(Value::from(2.5f64), Value::Float64(2.5));
        assert_eq!(Value::from("hi"), Value::String("hi".to_string()));
        assert_eq!(
            Value::from(vec![1i64, 2]),
            Value::Array(vec![Value::Int64(1), Value::Int64(2)])
        );
    }

    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int64(3).as_int64(), Some(3));
        assert_eq!(Value::Int64(3).as_float64(), Some(3.0));
        assert_eq!(Value::String("s".into()).as_str(), Some("s"));
        assert_eq!(Value::Float64(1.0).as_int64(), None);
    }

    #[test]
    fn test_display_repr_style() {
        assert_eq!(Value::Int64(5).to_string(), "5");
        assert_eq!(Value::Float64(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::String("name".into()).to_string(), "\"name\"");
        assert_eq!(
            Value::Array(vec![Value::Int64(1), Value::Int64(2)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Int64(1).type_name(), "Int64");
        assert_eq!(Value::Array(vec![]).type_name(), "Array");
        assert_eq!(Value::from(vec![1u8, 2]).type_name(), "Binary");
    }

    mod properties {
        use proptest::prelude::*;

        use crate::types::Value;

        /// Strategy for values that round-trip through JSON. Floats are
        /// integer-representable to avoid JSON precision issues.
        fn arb_value() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(Value::Int64),
                any::<i32>().prop_map(|i| Value::Float64(f64::from(i))),
                "[a-zA-Z0-9]{0,50}".prop_map(Value::String),
                prop::collection::vec(any::<u8>(), 0..100).prop_map(Value::Binary),
            ];
            leaf.prop_recursive(3, 24, 4, |inner| {
                prop::collection::vec(inner, 0..4).prop_map(Value::Array)
            })
        }

        proptest! {
            #[test]
            fn prop_json_round_trip(v in arb_value()) {
                let json = serde_json::to_string(&v).unwrap();
                prop_assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), v);
            }

            #[test]
            fn prop_display_never_empty(v in arb_value()) {
                prop_assert!(!v.to_string().is_empty());
            }
        }
    }
}
