//! The field compiler.
//!
//! Turns one `(id, entry)` pair into zero or one wrapped input
//! subtree, appended to the container in declaration order. Three gating
//! checks (identifier, type, entry shape) skip the field entirely;
//! everything after that degrades instead of failing, with every
//! independent broken rule reporting its own diagnostic even when
//! the field still renders.

use serde_json::Value;
use trellis_core::{predicates, Diagnostics, Element};

use crate::attrs;
use crate::descriptor::{self, FieldKind};
use crate::options;

/// Form-level defaults resolved once per build pass.
#[derive(Debug, Clone, Copy)]
pub struct FormDefaults {
    pub use_name: bool,
    pub validation_text: bool,
    pub textarea_rows: f64,
    pub select_size: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            use_name: false,
            validation_text: false,
            textarea_rows: 3.0,
            select_size: 3.0,
        }
    }
}

fn flag_set(entry: &Value, key: &str) -> bool {
    entry.get(key) == Some(&Value::Bool(true))
}

/// Compile one field entry into the container.
pub fn compile_field(
    id: &str,
    entry: &Value,
    defaults: &FormDefaults,
    container: &mut Element,
    diag: &mut Diagnostics,
) {
    let valid_identifier = !id.trim().is_empty();
    if !valid_identifier {
        diag.error("detected invalid field identifier");
    }

    let mut valid_type = true;
    let requested = match entry.get("type") {
        None => None,
        Some(declared) => match declared.as_str().and_then(FieldKind::parse) {
            Some(kind) => Some(kind),
            None => {
                valid_type = false;
                diag.error(format!("invalid field type {declared}"));
                None
            }
        },
    };

    let valid_entry = entry.is_object();
    if !valid_entry {
        diag.error(format!("detected field not of the 'object' type ({entry})"));
    }

    if !(valid_identifier && valid_type && valid_entry) {
        return;
    }

    let kind = descriptor::resolve(requested, entry, diag);

    // Sections carry no wrapper: a labeled divider appended directly.
    if kind == FieldKind::Section {
        container.push(
            Element::new("h5")
                .with_class("form-section")
                .with_class("mt-4")
                .with_class("mb-3")
                .with_text(id),
        );
        if flag_set(entry, "divider") {
            container.push(Element::new("hr").with_class("form-section-divider"));
        }
        return;
    }

    let mut wrapper = Element::new("div").with_class("mb-3");

    let help: Option<(&str, &str)> = entry.get("help").and_then(|h| {
        let map = predicates::valid_object(h)?;
        let identifier = predicates::valid_str_opt(map.get("identifier"))?;
        let text = predicates::valid_str_opt(map.get("text"))?;
        Some((identifier, text))
    });

    let label_text = entry.get("label").and_then(|l| {
        let map = predicates::valid_object(l)?;
        predicates::valid_str_opt(map.get("text"))
    });
    let has_label = label_text.is_some();
    let floating = has_label
        && !kind.refuses_floating_label()
        && entry
            .get("label")
            .map_or(false, |l| l.get("floating") == Some(&Value::Bool(true)));

    let mut input = Element::new(kind.tag()).with_attr("id", id);
    input.add_class(kind.base_class());

    if !kind.omits_type_attr() {
        input.set_attr("type", kind.base_input_type());
    }

    // The radio name is the obligatory grouping family, not the id.
    if defaults.use_name && kind != FieldKind::Radio {
        input.set_attr("name", id);
    }
    if kind == FieldKind::Radio {
        match predicates::valid_str_opt(entry.get("family")) {
            Some(family) => input.set_attr("name", family),
            None => diag.error("detected radio field without a proper 'family' attribute"),
        }
    }

    if flag_set(entry, "required") {
        input.set_flag("required");
    }

    // 'disabled' and 'readonly' are incompatible; 'disabled' wins.
    if flag_set(entry, "disabled") {
        input.set_flag("disabled");
    } else if flag_set(entry, "readonly") && !kind.suppresses_readonly() {
        input.set_flag("readonly");
    }

    if let Some((help_id, _)) = help {
        input.set_attr("aria-describedby", help_id);
    }

    if kind == FieldKind::Textarea {
        let rows = entry
            .get("rows")
            .and_then(Value::as_f64)
            .filter(|r| *r > 0.0)
            .unwrap_or(defaults.textarea_rows);
        input.set_attr("rows", attrs::number_to_string(rows));
    }

    if kind == FieldKind::Switch {
        input.set_attr("role", "switch");
    }

    if kind == FieldKind::File {
        if let Some(accept) = entry.get("accept").and_then(predicates::valid_array) {
            let parts: Vec<String> = accept.iter().filter_map(attrs::scalar_to_string).collect();
            if !parts.is_empty() {
                input.set_attr("accept", parts.join(","));
            }
        }
    }

    let is_numeric = matches!(kind, FieldKind::Number | FieldKind::Range);
    let mut bounds: Option<(f64, f64)> = None;
    if is_numeric {
        let min = entry.get("min").and_then(Value::as_f64);
        let max = entry.get("max").and_then(Value::as_f64);
        if let (Some(min), Some(max)) = (min, max) {
            if min < max {
                bounds = Some((min, max));
                input.set_attr("min", attrs::number_to_string(min));
                input.set_attr("max", attrs::number_to_string(max));
            } else {
                diag.warn(format!(
                    "'min' and 'max' values incompatible for '{}'",
                    kind.as_str()
                ));
            }
        }
        if let Some(step) = entry.get("step").and_then(Value::as_f64).filter(|s| *s > 0.0) {
            input.set_attr("step", attrs::number_to_string(step));
        }
    }

    if kind.is_check() && flag_set(entry, "inline") {
        wrapper.remove_class("mb-3");
        wrapper.add_class("form-check-inline");
    }

    let mut has_multiple = false;
    if (kind == FieldKind::File || (kind == FieldKind::Select && !floating))
        && flag_set(entry, "multiple")
    {
        has_multiple = true;
        input.set_flag("multiple");
    }

    let resolved_value = resolve_value(kind, entry, bounds, diag);
    if let Some(value) = &resolved_value {
        // Selects select an option instead of carrying a value.
        if kind != FieldKind::Select {
            input.set_attr("value", value.clone());
        }
    }

    // 'checked' wins over 'indeterminate'; an indeterminate checkbox
    // still counts as unchecked.
    if kind.is_check() {
        if flag_set(entry, "checked") {
            input.set_flag("checked");
        } else if kind == FieldKind::Checkbox && flag_set(entry, "indeterminate") {
            input.set_flag("indeterminate");
        }
    }

    if flag_set(entry, "plain") && !kind.refuses_plain() {
        input.remove_class("form-control");
        input.add_class("form-control-plaintext");
    }

    if kind == FieldKind::Color {
        input.add_class("form-control-color");
    }

    if kind == FieldKind::Select {
        // 'size' only applies without 'multiple' and without a
        // floating label, and only when the entry asks for it.
        if !has_multiple && !floating && entry.get("size").is_some() {
            let size = entry
                .get("size")
                .and_then(Value::as_f64)
                .filter(|s| *s > 0.0)
                .unwrap_or(defaults.select_size);
            input.set_attr("size", attrs::number_to_string(size));
        }

        if let Some(map) = entry.get("options").and_then(predicates::valid_object) {
            let parsed = options::parse_select(map);
            let any_default = parsed.iter().any(|(_, o)| o.default);
            for (value, option) in parsed {
                let selected = option.default
                    || (!any_default && resolved_value.as_deref() == Some(value.as_str()));
                let mut el = Element::new("option")
                    .with_attr("value", value)
                    .with_text(option.caption);
                if selected {
                    el.set_flag("selected");
                }
                input.push(el);
            }
        }
    }

    if !floating {
        if let Some(dimension) = predicates::valid_str_opt(entry.get("dimension")) {
            if !kind.refuses_dimension() {
                match dimension {
                    "sm" | "lg" => {
                        if kind == FieldKind::Select {
                            input.add_class(format!("form-select-{dimension}"));
                        } else {
                            input.add_class(format!("form-control-{dimension}"));
                        }
                    }
                    _ => diag.warn("valid field 'dimension' format but wrong value"),
                }
            }
        }
    }

    // Labels precede the input except for check-ish types and
    // floating labels, which follow it.
    let mut label_after: Option<Element> = None;
    if let Some(text) = label_text {
        let mut label = Element::new("label").with_attr("for", id).with_text(text);
        if !floating {
            if kind.is_check() {
                label.add_class("form-check-label");
            } else {
                label.add_class("form-label");
            }
        }
        if !floating && !kind.is_check() {
            wrapper.push(label);
        } else {
            label_after = Some(label);
        }
    }

    if let Some(attributes) = entry.get("attributes") {
        attrs::merge_field_attributes(&mut input, kind, attributes);
    }

    // A field with no label still needs an accessible name.
    if !has_label {
        let has_aria = input.attr("aria-label").map_or(false, |v| !v.trim().is_empty());
        if !has_aria {
            input.set_attr("aria-label", id);
        }
    }

    let mut datalist = None;
    if kind == FieldKind::List {
        let list_id = predicates::valid_str_opt(entry.get("list"));
        let list_options = entry.get("options").and_then(predicates::valid_array);
        if let (Some(list_id), Some(list_options)) = (list_id, list_options) {
            input.set_attr("list", list_id);
            let mut dl = Element::new("datalist").with_attr("id", list_id);
            for option in options::parse_list(list_options) {
                if option.default {
                    input.set_attr("value", option.caption.clone());
                }
                dl.push(Element::new("option").with_attr("value", option.caption));
            }
            datalist = Some(dl);
        }
    }

    wrapper.push(input);

    if kind.is_check() {
        wrapper.add_class("form-check");
        if kind == FieldKind::Switch {
            wrapper.add_class("form-switch");
        }
    }

    if let Some(label) = label_after {
        wrapper.push(label);
        if floating {
            wrapper.add_class("form-floating");
        }
    }

    if let Some(dl) = datalist {
        wrapper.push(dl);
    }

    if let Some((help_id, help_text)) = help {
        wrapper.push(
            Element::new("div")
                .with_attr("id", help_id)
                .with_class("form-text")
                .with_text(help_text),
        );
    }

    if defaults.validation_text {
        wrapper.push(Element::new("div").with_class("valid-feedback"));
        wrapper.push(Element::new("div").with_class("invalid-feedback"));
    }

    container.push(wrapper);
}

/// Resolve the authored value through the per-type acceptance rules.
/// Returns the string representation to render, or `None` when no
/// value may be set.
fn resolve_value(
    kind: FieldKind,
    entry: &Value,
    bounds: Option<(f64, f64)>,
    diag: &mut Diagnostics,
) -> Option<String> {
    // Files never take a value; checkboxes and switches use the
    // checked flag instead.
    if matches!(kind, FieldKind::File | FieldKind::Checkbox | FieldKind::Switch) {
        return None;
    }

    let value = entry.get("value")?;
    if value.is_null() || value.is_boolean() || value.is_object() || value.is_array() {
        return None;
    }

    match kind {
        FieldKind::Color => match value {
            Value::String(s) => {
                if s.starts_with('#') && s.len() == 7 {
                    Some(s.clone())
                } else {
                    diag.error("color inputs require a HEX-formatted value");
                    None
                }
            }
            _ => {
                diag.error("color inputs require a value of the 'string' type");
                None
            }
        },
        FieldKind::List => {
            let opts = entry.get("options").and_then(predicates::valid_array)?;
            // A sigil-marked default overrides any authored value.
            if options::list_has_marked(opts) {
                return None;
            }
            if opts.iter().any(|o| o == value) {
                attrs::scalar_to_string(value)
            } else {
                None
            }
        }
        FieldKind::Select => {
            let map = entry.get("options").and_then(predicates::valid_object)?;
            if options::select_has_marked(map) {
                return None;
            }
            match value {
                Value::String(s) if map.contains_key(s) => Some(s.clone()),
                _ => None,
            }
        }
        FieldKind::Number | FieldKind::Range => match value.as_f64() {
            Some(n) if n >= 0.0 => {
                if let Some((min, max)) = bounds {
                    if n >= min && n <= max {
                        Some(attrs::number_to_string(n))
                    } else {
                        diag.warn(format!(
                            "'{}' value not between 'min' and 'max'",
                            kind.as_str()
                        ));
                        None
                    }
                } else {
                    Some(attrs::number_to_string(n))
                }
            }
            _ => {
                diag.error(
                    "number and range inputs require a value of the 'number' type starting from 0",
                );
                None
            }
        },
        _ => match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(_) => attrs::scalar_to_string(value),
            _ => None,
        },
    }
}
