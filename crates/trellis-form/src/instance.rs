//! A compiled form instance: the element tree plus the settings it
//! was built from.

use trellis_core::{Diagnostic, Element, FieldValues, FormEvent, Settings, SpecError};

use crate::codec;
use crate::lifecycle;

/// A built form. Owns the compiled element tree and the settings,
/// including the attached handlers.
pub struct Form {
    pub(crate) root: Element,
    pub(crate) settings: Option<Settings>,
    pub(crate) prevent_default: bool,
}

impl Form {
    /// Compile the settings into a live form. The returned
    /// diagnostics are everything the compile pass reported, already
    /// flushed to the log facade.
    pub fn build(settings: Settings) -> (Self, Vec<Diagnostic>) {
        let (root, mut diag) = trellis_compiler::compile(&settings);

        if settings.on_submit.is_none() {
            diag.warn("no submit instructions given");
        }

        let mut form = Self {
            root,
            prevent_default: settings.prevent_default,
            settings: Some(settings),
        };
        // Fresh instances start from their authored baseline.
        form.reset_form();

        (form, diag.flush())
    }

    /// Parse a JSON specification and build. Handlers cannot travel
    /// through JSON; attach them via [`Settings`] and use
    /// [`Form::build`] when they are needed.
    pub fn build_from_json(json: &str) -> Result<(Self, Vec<Diagnostic>), SpecError> {
        Ok(Self::build(Settings::from_json(json)?))
    }

    /// The settings this form was built from, unless it has been
    /// emptied.
    pub fn get_instance(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Drop all compiled content and detach the settings. Idempotent.
    pub fn empty_form(&mut self) {
        self.root.children.clear();
        self.settings = None;
    }

    /// The root of the compiled element tree.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the compiled element tree.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Find the input element compiled for the given field id.
    pub fn field_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root
            .find_mut(&|el| el.is_input() && el.attr("id") == Some(id))
    }

    /// Extract the current field values.
    pub fn get_fields(&self) -> FieldValues {
        codec::get_fields(&self.root)
    }

    /// Reset every field to its authored baseline.
    pub fn reset_form(&mut self) {
        codec::reset_form(&mut self.root);
    }

    /// Clear validation classes and feedback text.
    pub fn reset_validation(&mut self) {
        codec::reset_validation(&mut self.root);
    }

    /// Trim whitespace from trimmable field values.
    pub fn trim_fields(&mut self) {
        codec::trim_fields(&mut self.root);
    }

    /// Run the submit sequence: trim, clear validation state, then
    /// invoke the pre-submit and submit hooks with the extracted
    /// values.
    pub fn submit(&mut self) -> FormEvent {
        lifecycle::submit(self)
    }

    /// Dispatch a click on the button with the given id. Submit-typed
    /// buttons continue into the submit sequence unless the click
    /// handler prevented the default.
    pub fn click(&mut self, id: &str) -> FormEvent {
        lifecycle::click(self, id)
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("root", &self.root)
            .field("settings", &self.settings)
            .finish()
    }
}
