//! Type system for arbor constants and annotations.
//!
//! This module defines the `Value` enum for constant payloads, `DataType`
//! for type annotations, and `StaticType` for bridging Rust element types
//! to annotations.

mod data_type;
mod static_type;
mod value;

pub use data_type::DataType;
pub use static_type::StaticType;
pub use value::Value;
