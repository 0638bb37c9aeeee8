//! Field type resolution.
//!
//! [`FieldKind`] is the closed set of field types; resolving to one
//! variant means "exactly one active type" holds by construction.
//! `switch` renders with
//! checkbox semantics but stays a distinct variant for class
//! selection, and a field whose type-specific structural requirement
//! is unmet falls back to [`FieldKind::Text`].

use serde_json::Value;
use trellis_core::{predicates, Diagnostics};

/// Closed enumeration of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Checkbox,
    Color,
    Email,
    File,
    List,
    Number,
    Password,
    Radio,
    Range,
    Section,
    Select,
    Switch,
    Text,
    Textarea,
}

impl FieldKind {
    /// Parse a declared type string.
    pub fn parse(name: &str) -> Option<FieldKind> {
        Some(match name {
            "checkbox" => Self::Checkbox,
            "color" => Self::Color,
            "email" => Self::Email,
            "file" => Self::File,
            "list" => Self::List,
            "number" => Self::Number,
            "password" => Self::Password,
            "radio" => Self::Radio,
            "range" => Self::Range,
            "section" => Self::Section,
            "select" => Self::Select,
            "switch" => Self::Switch,
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Color => "color",
            Self::Email => "email",
            Self::File => "file",
            Self::List => "list",
            Self::Number => "number",
            Self::Password => "password",
            Self::Radio => "radio",
            Self::Range => "range",
            Self::Section => "section",
            Self::Select => "select",
            Self::Switch => "switch",
            Self::Text => "text",
            Self::Textarea => "textarea",
        }
    }

    /// The emitted `type` attribute value; a switch is a checkbox on
    /// the wire.
    pub fn base_input_type(self) -> &'static str {
        match self {
            Self::Switch => "checkbox",
            other => other.as_str(),
        }
    }

    /// Base element tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Textarea => "textarea",
            _ => "input",
        }
    }

    /// Base CSS class for the input element.
    pub fn base_class(self) -> &'static str {
        match self {
            Self::Checkbox | Self::Radio | Self::Switch => "form-check-input",
            Self::Select => "form-select",
            Self::Range => "form-range",
            _ => "form-control",
        }
    }

    /// Checkbox-like types: label follows the input, wrapper gains
    /// `form-check`.
    pub fn is_check(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio | Self::Switch)
    }

    /// The `list` type is synthetic and `select`/`textarea` carry no
    /// `type` attribute.
    pub fn omits_type_attr(self) -> bool {
        matches!(self, Self::List | Self::Select | Self::Textarea)
    }

    /// `readonly` has no effect on these types and is suppressed.
    pub fn suppresses_readonly(self) -> bool {
        matches!(
            self,
            Self::Color | Self::Checkbox | Self::File | Self::Radio | Self::Range | Self::Switch
        )
    }

    /// Floating labels are refused for these types.
    pub fn refuses_floating_label(self) -> bool {
        matches!(
            self,
            Self::Checkbox | Self::Color | Self::File | Self::Radio | Self::Range | Self::Switch
        )
    }

    /// The plain (static text) presentation is refused here.
    pub fn refuses_plain(self) -> bool {
        matches!(
            self,
            Self::Checkbox | Self::File | Self::Radio | Self::Range | Self::Switch
        )
    }

    /// Size classes (`sm`/`lg`) do not apply to these types.
    pub fn refuses_dimension(self) -> bool {
        matches!(
            self,
            Self::Checkbox | Self::Color | Self::Radio | Self::Range | Self::Switch
        )
    }

    /// `placeholder` has no visual meaning here and is dropped from
    /// free attributes.
    pub fn refuses_placeholder(self) -> bool {
        matches!(
            self,
            Self::Checkbox | Self::Color | Self::File | Self::Radio | Self::Select | Self::Switch
        )
    }
}

/// Whether a radio value satisfies the structural requirement: a
/// non-empty string or a number >= 0.
pub(crate) fn radio_value_ok(value: Option<&Value>) -> bool {
    match value {
        Some(v) => match v.as_f64() {
            Some(n) => n >= 0.0,
            None => predicates::valid_str(v).is_some(),
        },
        None => false,
    }
}

/// Resolve the requested kind against its type-specific structural
/// requirements. Soft failures report a diagnostic and fall back to
/// `Text`; the field still renders, in degraded form.
pub(crate) fn resolve(
    requested: Option<FieldKind>,
    entry: &Value,
    diag: &mut Diagnostics,
) -> FieldKind {
    let Some(kind) = requested else {
        return FieldKind::Text;
    };

    match kind {
        FieldKind::List => {
            let has_identifier = predicates::valid_str_opt(entry.get("list")).is_some();
            if !has_identifier {
                diag.error("list inputs require a 'list' identifier");
            }

            let has_options = entry.get("options").and_then(|o| predicates::valid_array(o)).is_some();
            if !has_options {
                diag.error("list inputs require a valid 'options' array");
            }

            if has_identifier && has_options {
                FieldKind::List
            } else {
                FieldKind::Text
            }
        }
        FieldKind::Select => {
            if entry.get("options").and_then(|o| predicates::valid_object(o)).is_some() {
                FieldKind::Select
            } else {
                diag.error("select inputs require a valid 'options' object");
                FieldKind::Text
            }
        }
        FieldKind::Radio => {
            if radio_value_ok(entry.get("value")) {
                FieldKind::Radio
            } else {
                diag.error(
                    "radio inputs require a value that is either a valid string \
                     or of the 'number' type starting from 0",
                );
                FieldKind::Text
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trellis_core::Severity;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(FieldKind::parse("switch"), Some(FieldKind::Switch));
        assert_eq!(FieldKind::parse("textarea"), Some(FieldKind::Textarea));
        assert_eq!(FieldKind::parse("datetime"), None);
        assert_eq!(FieldKind::parse(""), None);
    }

    #[test]
    fn test_switch_aliases_checkbox_on_the_wire() {
        assert_eq!(FieldKind::Switch.base_input_type(), "checkbox");
        assert_eq!(FieldKind::Switch.base_class(), "form-check-input");
        assert_eq!(FieldKind::Checkbox.base_input_type(), "checkbox");
    }

    #[test]
    fn test_absent_type_resolves_to_text() {
        let mut diag = Diagnostics::new();
        assert_eq!(resolve(None, &json!({}), &mut diag), FieldKind::Text);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_list_without_identifier_degrades_to_text() {
        let mut diag = Diagnostics::new();
        let entry = json!({"type": "list", "options": ["a", "b"]});
        assert_eq!(
            resolve(Some(FieldKind::List), &entry, &mut diag),
            FieldKind::Text
        );
        assert_eq!(diag.count(Severity::Error), 1);
    }

    #[test]
    fn test_list_without_options_reports_both_checks() {
        let mut diag = Diagnostics::new();
        let entry = json!({"type": "list"});
        assert_eq!(
            resolve(Some(FieldKind::List), &entry, &mut diag),
            FieldKind::Text
        );
        // Not fail-fast: both independent requirements report.
        assert_eq!(diag.count(Severity::Error), 2);
    }

    #[test]
    fn test_select_requires_options_object() {
        let mut diag = Diagnostics::new();
        let entry = json!({"type": "select", "options": ["a"]});
        assert_eq!(
            resolve(Some(FieldKind::Select), &entry, &mut diag),
            FieldKind::Text
        );
        assert_eq!(diag.count(Severity::Error), 1);
    }

    #[test]
    fn test_radio_value_rules() {
        assert!(radio_value_ok(Some(&json!("yes"))));
        assert!(radio_value_ok(Some(&json!(0))));
        assert!(radio_value_ok(Some(&json!(3))));
        assert!(!radio_value_ok(Some(&json!(-1))));
        assert!(!radio_value_ok(Some(&json!(""))));
        assert!(!radio_value_ok(Some(&json!(true))));
        assert!(!radio_value_ok(None));
    }
}
