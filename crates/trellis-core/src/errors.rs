//! Error types for the Trellis form compiler.
//!
//! A compile pass itself never fails; malformed entries degrade into
//! diagnostics. The only fallible surface is turning caller-supplied
//! JSON into a [`crate::Settings`] value.

use thiserror::Error;

/// Errors while ingesting a JSON form specification.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid JSON in form specification: {0}")]
    Json(#[from] serde_json::Error),

    #[error("form specification must be a JSON object")]
    NotAnObject,
}
