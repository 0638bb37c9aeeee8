//! Compilation of a declarative form specification into a UI element
//! tree.
//!
//! The pipeline is one synchronous pass: heading, then one subtree
//! per field entry, then the button group, each appended in
//! declaration order. Invalid entries are skipped after recording a
//! diagnostic;
//! soft constraint violations degrade the rendering instead. Nothing
//! in this crate returns an error.

pub mod attrs;
pub mod button;
pub mod descriptor;
pub mod field;
pub mod form;
pub mod options;

pub use descriptor::FieldKind;
pub use form::compile;
