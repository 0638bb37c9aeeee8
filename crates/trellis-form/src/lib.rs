//! Live form instances built from a declarative specification.
//!
//! [`Form::build`] runs one compile pass and returns the instance
//! together with the flushed diagnostics. Afterwards the instance
//! owns the element tree and exposes the value codec operations
//! (`get_fields`, `reset_form`, `reset_validation`, `trim_fields`)
//! plus the wired submit interception and button click dispatch.

pub mod codec;
pub mod instance;
mod lifecycle;

pub use instance::Form;
pub use trellis_core::{
    Diagnostic, Element, FieldValues, FormEvent, Settings, Severity, SpecError,
};
