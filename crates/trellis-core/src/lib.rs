//! Core types for the Trellis form compiler.
//!
//! This crate provides the foundational types used across the other
//! trellis crates:
//! - The UI element tree produced by a compile pass
//! - The form specification (settings, handlers, events)
//! - The severity-tagged diagnostics channel
//! - Value predicates over JSON specification entries
//! - Error types

pub mod diagnostics;
pub mod element;
pub mod errors;
pub mod predicates;
pub mod settings;

pub use diagnostics::*;
pub use element::*;
pub use errors::*;
pub use settings::*;
