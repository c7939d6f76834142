//! Error types and result aliases for arbor.
//!
//! This crate provides the shared error handling infrastructure used by
//! every crate in the workspace.

mod error;

pub use error::{ArborError, ArborResult};
