//! The value codec: extraction, reset, and trimming over the live
//! element tree.
//!
//! All operations walk the input-capable elements (`input`,
//! `select`, `textarea`) and skip button-typed ones. Extraction
//! coerces per type; resets clear the live overlay so authored
//! attributes govern again, with an explicit min/0 override for
//! numeric fields.

use serde_json::{json, Value};
use trellis_core::{Element, FieldValues};

const BUTTON_TYPES: &[&str] = &["button", "submit"];

/// Types whose values are never trimmed. A switch is `checkbox` on
/// the wire and is covered by that entry.
const UNTRIMMED_TYPES: &[&str] = &[
    "button", "checkbox", "color", "file", "number", "radio", "range", "submit",
];

fn input_type(el: &Element) -> &str {
    el.attr("type").unwrap_or("")
}

/// A select rendered expanded: multiple selection or an explicit
/// size.
fn is_expanded_select(el: &Element) -> bool {
    el.tag == "select" && (el.has_attr("multiple") || el.has_attr("size"))
}

/// Current value of a select: live overlay first, then the selected
/// option, then the first option. Expanded selects yield the first
/// selected value only, never a collection.
fn select_value(el: &Element) -> String {
    if let Some(value) = el.live_value() {
        return value.to_string();
    }
    el.children
        .iter()
        .find(|c| c.tag == "option" && c.has_attr("selected"))
        .or_else(|| el.children.iter().find(|c| c.tag == "option"))
        .and_then(|o| o.attr("value"))
        .unwrap_or("")
        .to_string()
}

/// Final component of a backslash-separated path, the way hosts
/// report file input values.
fn basename(path: &str) -> &str {
    path.rsplit('\\').next().unwrap_or(path)
}

/// Leading-integer parse: optional sign, then digits, ignoring any
/// trailing garbage.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|n| if negative { -n } else { n })
}

/// Extract a field-id to coerced-value mapping from the live tree.
pub fn get_fields(root: &Element) -> FieldValues {
    let mut fields = FieldValues::new();

    root.for_each(&mut |el| {
        if !el.is_input() {
            return;
        }
        let ty = input_type(el);
        if BUTTON_TYPES.contains(&ty) {
            return;
        }
        let Some(id) = el.attr("id") else {
            return;
        };

        let value = if ty == "checkbox" {
            Value::Bool(el.checked())
        } else if ty == "file" {
            if el.has_attr("multiple") {
                Value::Array(
                    el.value()
                        .split(';')
                        .filter(|p| !p.is_empty())
                        .map(|p| Value::String(basename(p).to_string()))
                        .collect(),
                )
            } else {
                Value::String(basename(el.value()).to_string())
            }
        } else if el.tag == "select" {
            Value::String(select_value(el))
        } else if ty == "number" || ty == "range" {
            match parse_int_prefix(el.value()) {
                Some(n) => json!(n),
                None => Value::Null,
            }
        } else if ty == "radio" {
            json!([el.value(), el.checked()])
        } else {
            Value::String(el.value().to_string())
        };

        fields.insert(id.to_string(), value);
    });

    fields
}

/// Reset every input to its authored baseline, then override
/// numeric fields to their `min` attribute (or `"0"`).
pub fn reset_form(root: &mut Element) {
    root.for_each_mut(&mut |el| {
        if !el.is_input() {
            return;
        }
        el.reset_state();

        let ty = input_type(el);
        if ty == "number" || ty == "range" {
            let base = el.attr("min").unwrap_or("0").to_string();
            el.set_value(base);
        }
    });
}

/// Strip validation-state classes and clear sibling feedback text,
/// independently for the valid and invalid state.
pub fn reset_validation(root: &mut Element) {
    let mut clear_valid = false;
    let mut clear_invalid = false;

    for child in &mut root.children {
        if child.is_input() && !BUTTON_TYPES.contains(&input_type(child)) {
            if child.has_class("is-valid") {
                child.remove_class("is-valid");
                clear_valid = true;
            }
            if child.has_class("is-invalid") {
                child.remove_class("is-invalid");
                clear_invalid = true;
            }
        }
    }

    for child in &mut root.children {
        if clear_valid && child.has_class("valid-feedback") {
            child.clear_text();
        }
        if clear_invalid && child.has_class("invalid-feedback") {
            child.clear_text();
        }
    }

    for child in &mut root.children {
        reset_validation(child);
    }
}

/// Trim whitespace from every trimmable field's value and write it
/// back.
pub fn trim_fields(root: &mut Element) {
    root.for_each_mut(&mut |el| {
        if !el.is_input() {
            return;
        }
        if UNTRIMMED_TYPES.contains(&input_type(el)) {
            return;
        }
        if is_expanded_select(el) {
            return;
        }

        let current = el.value();
        let trimmed = current.trim();
        if trimmed != current {
            let trimmed = trimmed.to_string();
            el.set_value(trimmed);
        }
    });
}
