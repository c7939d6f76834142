//! Mapping from Rust element types to `DataType` annotations.

use super::DataType;

/// A Rust element type with a known `DataType` annotation.
///
/// Used when a typed variable or cast records its declared type on the
/// node it constructs.
pub trait StaticType {
    /// The annotation recorded for this element type.
    fn data_type() -> DataType;
}

impl StaticType for bool {
    fn data_type() -> DataType {
        DataType::Bool
    }
}

impl StaticType for i64 {
    fn data_type() -> DataType {
        DataType::Int64
    }
}

impl StaticType for f64 {
    fn data_type() -> DataType {
        DataType::Float64
    }
}

impl StaticType for String {
    fn data_type() -> DataType {
        DataType::String
    }
}

impl<T: StaticType> StaticType for Vec<T> {
    fn data_type() -> DataType {
        DataType::Array(Box::new(T::data_type()))
    }
}
