//! The form specification: entries, scalar options, and handlers.
//!
//! Field and button entries stay raw `serde_json::Value`s on purpose:
//! the compiler's gating checks ("entry must be a mapping", "type
//! must be a known string") are part of the rule set, not of parsing,
//! so nothing here rejects a malformed entry. Handlers cannot travel
//! through JSON and are attached through the builder methods.

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::SpecError;

/// Extracted field values: field id to coerced JSON value.
pub type FieldValues = IndexMap<String, Value>;

/// Click handler for one button.
pub type ClickHandler = Box<dyn FnMut(&mut FormEvent)>;

/// Submit-path handler; receives the event and the extracted values.
pub type SubmitHandler = Box<dyn FnMut(&mut FormEvent, &FieldValues)>;

/// Event handed to click and submit handlers.
#[derive(Debug, Default)]
pub struct FormEvent {
    default_prevented: bool,
}

impl FormEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Resolved form specification, immutable during a build pass.
pub struct Settings {
    /// Heading entry; shape-checked at compile time.
    pub heading: Option<Value>,
    /// Field id to raw field entry, in declaration order.
    pub fields: IndexMap<String, Value>,
    /// Button id to raw button entry, in declaration order.
    pub buttons: IndexMap<String, Value>,
    /// Mirror each field's id into its `name` attribute.
    pub use_name: bool,
    /// Append valid/invalid feedback containers to each wrapper.
    pub validation_text: bool,
    /// Default `rows` override for textareas.
    pub textarea_rows: Option<f64>,
    /// Default `size` override for expanded selects.
    pub select_size: Option<f64>,
    /// Suppress the host's default submit action. Fixed at build time.
    pub prevent_default: bool,
    /// Optional pre-submit hook.
    pub before_submit: Option<SubmitHandler>,
    /// Optional submit hook.
    pub on_submit: Option<SubmitHandler>,
    /// Button id to click handler.
    pub click_handlers: IndexMap<String, ClickHandler>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            heading: None,
            fields: IndexMap::new(),
            buttons: IndexMap::new(),
            use_name: false,
            validation_text: false,
            textarea_rows: None,
            select_size: None,
            prevent_default: true,
            before_submit: None,
            on_submit: None,
            click_handlers: IndexMap::new(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("heading", &self.heading)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("buttons", &self.buttons.keys().collect::<Vec<_>>())
            .field("use_name", &self.use_name)
            .field("validation_text", &self.validation_text)
            .field("textarea_rows", &self.textarea_rows)
            .field("select_size", &self.select_size)
            .field("prevent_default", &self.prevent_default)
            .field("before_submit", &self.before_submit.is_some())
            .field("on_submit", &self.on_submit.is_some())
            .field(
                "click_handlers",
                &self.click_handlers.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration string. Handlers cannot be
    /// expressed in JSON; attach them afterwards with the builder
    /// methods.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Build settings from an already-parsed JSON value. Scalar
    /// options with the wrong type fall back to their defaults; the
    /// per-entry checks belong to the compiler.
    pub fn from_value(value: Value) -> Result<Self, SpecError> {
        let Value::Object(root) = value else {
            return Err(SpecError::NotAnObject);
        };

        let mut settings = Self::default();
        for (key, value) in root {
            match key.as_str() {
                "heading" => settings.heading = Some(value),
                "fields" => {
                    if let Value::Object(map) = value {
                        settings.fields = map.into_iter().collect();
                    }
                }
                "buttons" => {
                    if let Value::Object(map) = value {
                        settings.buttons = map.into_iter().collect();
                    }
                }
                "useName" => settings.use_name = value == Value::Bool(true),
                "validationText" => settings.validation_text = value == Value::Bool(true),
                "textareaRows" => settings.textarea_rows = value.as_f64(),
                "selectSize" => settings.select_size = value.as_f64(),
                "preventDefault" => settings.prevent_default = value == Value::Bool(true),
                _ => {}
            }
        }
        Ok(settings)
    }

    /// Set the heading entry (builder form).
    pub fn heading(mut self, heading: Value) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Add one field entry (builder form).
    pub fn field(mut self, id: impl Into<String>, entry: Value) -> Self {
        self.fields.insert(id.into(), entry);
        self
    }

    /// Add one button entry (builder form).
    pub fn button(mut self, id: impl Into<String>, entry: Value) -> Self {
        self.buttons.insert(id.into(), entry);
        self
    }

    pub fn use_name(mut self, use_name: bool) -> Self {
        self.use_name = use_name;
        self
    }

    pub fn validation_text(mut self, validation_text: bool) -> Self {
        self.validation_text = validation_text;
        self
    }

    pub fn textarea_rows(mut self, rows: f64) -> Self {
        self.textarea_rows = Some(rows);
        self
    }

    pub fn select_size(mut self, size: f64) -> Self {
        self.select_size = Some(size);
        self
    }

    pub fn prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    /// Attach the pre-submit hook.
    pub fn before_submit(mut self, f: impl FnMut(&mut FormEvent, &FieldValues) + 'static) -> Self {
        self.before_submit = Some(Box::new(f));
        self
    }

    /// Attach the submit hook.
    pub fn on_submit(mut self, f: impl FnMut(&mut FormEvent, &FieldValues) + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    /// Attach a click handler to the button with the given id.
    pub fn on_click(
        mut self,
        id: impl Into<String>,
        f: impl FnMut(&mut FormEvent) + 'static,
    ) -> Self {
        self.click_handlers.insert(id.into(), Box::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prevent_default_defaults_to_true() {
        assert!(Settings::new().prevent_default);
        assert!(Settings::from_json("{}").unwrap().prevent_default);
    }

    #[test]
    fn test_prevent_default_non_true_disables() {
        let settings = Settings::from_value(json!({"preventDefault": "no"})).unwrap();
        assert!(!settings.prevent_default);

        let settings = Settings::from_value(json!({"preventDefault": false})).unwrap();
        assert!(!settings.prevent_default);
    }

    #[test]
    fn test_from_value_keeps_entry_order() {
        let settings = Settings::from_value(json!({
            "fields": {"b": {}, "a": {}, "c": {}},
        }))
        .unwrap();

        let ids: Vec<_> = settings.fields.keys().cloned().collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(matches!(
            Settings::from_value(json!([1, 2])),
            Err(SpecError::NotAnObject)
        ));
    }

    #[test]
    fn test_wrong_typed_options_fall_back() {
        let settings = Settings::from_value(json!({
            "useName": "yes",
            "textareaRows": "five",
            "fields": [1, 2],
        }))
        .unwrap();

        assert!(!settings.use_name);
        assert_eq!(settings.textarea_rows, None);
        assert!(settings.fields.is_empty());
    }

    #[test]
    fn test_builder_attaches_handlers() {
        let settings = Settings::new()
            .field("name", json!({}))
            .button("send", json!({"type": "submit", "text": "Send"}))
            .on_submit(|_, _| {})
            .on_click("send", |_| {});

        assert!(settings.on_submit.is_some());
        assert!(settings.before_submit.is_none());
        assert!(settings.click_handlers.contains_key("send"));
    }

    #[test]
    fn test_event_prevent_default() {
        let mut event = FormEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
