//! Core error types for arbor.

use thiserror::Error;

/// Result type alias using `ArborError`.
pub type ArborResult<T> = std::result::Result<T, ArborError>;

/// Core error type for arbor operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArborError {
    /// Type mismatch or invalid type operation.
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Invalid value provided.
    #[error("ValueError: {0}")]
    ValueError(String),

    /// Index key that is neither a slice spec nor a plain index value.
    #[error("InvalidIndexKind: {0}")]
    InvalidIndexKind(String),

    /// Attribute name uses the reserved internal prefix.
    #[error("ReservedAttribute: {0}")]
    ReservedAttribute(String),

    /// Feature not yet implemented.
    #[error("NotImplemented: {0}")]
    NotImplemented(String),

    /// Internal error (bug in arbor).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl ArborError {
    /// Create a new `TypeError`.
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a new `ValueError`.
    pub fn value_error<S: Into<String>>(msg: S) -> Self {
        Self::ValueError(msg.into())
    }

    /// Create a new `InvalidIndexKind` error.
    pub fn invalid_index<S: Into<String>>(msg: S) -> Self {
        Self::InvalidIndexKind(msg.into())
    }

    /// Create a new `ReservedAttribute` error.
    pub fn reserved_attribute<S: Into<String>>(msg: S) -> Self {
        Self::ReservedAttribute(msg.into())
    }

    /// Create a new `NotImplemented` error.
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }
}

/// Ensure a condition holds, returning the given error variant if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::ArborError::$variant(format!($($msg)*)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArborError::type_error("expected Int64, got String");
        assert_eq!(err.to_string(), "TypeError: expected Int64, got String");

        let err = ArborError::reserved_attribute("_internal");
        assert_eq!(err.to_string(), "ReservedAttribute: _internal");
    }

    #[test]
    fn test_error_constructors() {
        let _ = ArborError::value_error("invalid value");
        let _ = ArborError::invalid_index("not an index or slice");
        let _ = ArborError::not_implemented("feature X");
        let _ = ArborError::internal("unexpected state");
    }

    #[test]
    fn test_ensure_macro() {
        fn check(n: i64) -> ArborResult<i64> {
            ensure!(n >= 0, ValueError: "expected non-negative, got {n}");
            Ok(n)
        }

        assert!(check(1).is_ok());
        let err = check(-1).unwrap_err();
        assert!(matches!(err, ArborError::ValueError(_)));
    }
}
