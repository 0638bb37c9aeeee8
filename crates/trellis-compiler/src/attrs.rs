//! Free-form attribute merging.
//!
//! Callers can attach arbitrary attributes to a field or button.
//! Names that the compiler resolves itself are on a fixed deny-list
//! and silently dropped so a spec cannot override resolved state;
//! `class` merges into the class list instead of overwriting it, and
//! `placeholder` is dropped for types where it has no visual
//! meaning.

use serde_json::Value;
use trellis_core::{predicates, Element};

use crate::descriptor::FieldKind;

/// Attributes the field compiler resolves itself.
const RESERVED_ATTRIBUTES: &[&str] = &[
    "accept", "for", "id", "list", "max", "min", "name", "rows", "size", "step", "type", "value",
];

/// State-carrying properties the field compiler resolves itself.
const RESERVED_PROPERTIES: &[&str] = &[
    "checked",
    "disabled",
    "indeterminate",
    "multiple",
    "readonly",
    "required",
    "selected",
];

/// Attributes the button compiler resolves itself.
const RESERVED_BUTTON_ATTRIBUTES: &[&str] = &["id", "placeholder", "type"];

/// Allow-filter for one free attribute name in a field-type context.
pub fn allows(name: &str, kind: FieldKind) -> bool {
    if RESERVED_ATTRIBUTES.contains(&name) || RESERVED_PROPERTIES.contains(&name) {
        return false;
    }
    if name == "placeholder" && kind.refuses_placeholder() {
        return false;
    }
    true
}

/// Render a scalar JSON value as an attribute string. Objects and
/// arrays are not valid attribute values.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Format a number the way attribute values expect: integral values
/// without a trailing fraction.
pub fn number_to_string(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn merge_one(el: &mut Element, name: &str, value: &Value) {
    let Some(rendered) = scalar_to_string(value) else {
        return;
    };
    if name == "class" {
        if let Some(classes) = predicates::valid_str(value) {
            for class in classes.split_whitespace() {
                el.add_class(class);
            }
        }
    } else {
        el.set_attr(name, rendered);
    }
}

/// Merge free attributes onto a field element through the
/// allow-filter.
pub fn merge_field_attributes(el: &mut Element, kind: FieldKind, attributes: &Value) {
    let Some(map) = predicates::valid_object(attributes) else {
        return;
    };
    for (name, value) in map {
        let name = name.trim();
        if name.is_empty() || !allows(name, kind) {
            continue;
        }
        merge_one(el, name, value);
    }
}

/// Merge free attributes onto a button element.
pub fn merge_button_attributes(el: &mut Element, attributes: &Value) {
    let Some(map) = predicates::valid_object(attributes) else {
        return;
    };
    for (name, value) in map {
        let name = name.trim();
        if name.is_empty() || RESERVED_BUTTON_ATTRIBUTES.contains(&name) {
            continue;
        }
        merge_one(el, name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deny_list_blocks_reserved_names() {
        assert!(!allows("id", FieldKind::Text));
        assert!(!allows("value", FieldKind::Text));
        assert!(!allows("checked", FieldKind::Checkbox));
        assert!(allows("data-role", FieldKind::Text));
        assert!(allows("autocomplete", FieldKind::Email));
    }

    #[test]
    fn test_placeholder_dropped_where_meaningless() {
        assert!(!allows("placeholder", FieldKind::Select));
        assert!(!allows("placeholder", FieldKind::Color));
        assert!(allows("placeholder", FieldKind::Text));
        assert!(allows("placeholder", FieldKind::Range));
    }

    #[test]
    fn test_class_merges_into_class_list() {
        let mut el = Element::new("input").with_class("form-control");
        merge_field_attributes(
            &mut el,
            FieldKind::Text,
            &json!({"class": "w-50 text-muted"}),
        );

        assert!(el.has_class("form-control"));
        assert!(el.has_class("w-50"));
        assert!(el.has_class("text-muted"));
        assert!(el.attr("class").is_none());
    }

    #[test]
    fn test_non_scalar_values_are_dropped() {
        let mut el = Element::new("input");
        merge_field_attributes(
            &mut el,
            FieldKind::Text,
            &json!({"data-config": {"a": 1}, "data-list": [1], "data-ok": 7}),
        );

        assert!(!el.has_attr("data-config"));
        assert!(!el.has_attr("data-list"));
        assert_eq!(el.attr("data-ok"), Some("7"));
    }

    #[test]
    fn test_reserved_names_never_reach_the_element() {
        let mut el = Element::new("input").with_attr("id", "original");
        merge_field_attributes(&mut el, FieldKind::Text, &json!({"id": "hijack"}));
        assert_eq!(el.attr("id"), Some("original"));
    }

    #[test]
    fn test_button_deny_list() {
        let mut el = Element::new("button").with_attr("id", "x-btn");
        merge_button_attributes(&mut el, &json!({"id": "y", "type": "reset", "title": "Send"}));

        assert_eq!(el.attr("id"), Some("x-btn"));
        assert!(el.attr("type").is_none());
        assert_eq!(el.attr("title"), Some("Send"));
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(5.0), "5");
        assert_eq!(number_to_string(5.5), "5.5");
        assert_eq!(number_to_string(-3.0), "-3");
    }
}
