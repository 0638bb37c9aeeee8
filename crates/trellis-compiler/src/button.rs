//! The button compiler.
//!
//! One wrapper (`div.form-buttons`) hosts every compiled button.
//! A button needs a usable identifier, an allowed type, an object
//! entry, and something to show (text or an icon glyph); anything
//! else is skipped with a diagnostic. Click callbacks are dispatched
//! by button id at click time, so compilation only shapes the
//! element.

use indexmap::IndexMap;
use serde_json::Value;
use trellis_core::{predicates, Diagnostics, Element};

use crate::attrs;

const DEFAULT_TYPE: &str = "button";

/// Compile every button entry into the shared wrapper and append it
/// to the container. The wrapper is appended even when every entry
/// was skipped.
pub fn compile_buttons(
    buttons: &IndexMap<String, Value>,
    container: &mut Element,
    diag: &mut Diagnostics,
) {
    let mut wrapper = Element::new("div")
        .with_class("form-buttons")
        .with_class("mt-5");

    for (id, entry) in buttons {
        compile_button(id, entry, &mut wrapper, diag);
    }

    container.push(wrapper);
}

fn compile_button(id: &str, entry: &Value, wrapper: &mut Element, diag: &mut Diagnostics) {
    let valid_identifier = !id.trim().is_empty();
    if !valid_identifier {
        diag.error("detected invalid button identifier");
    }

    let mut valid_type = true;
    let button_type = match entry.get("type") {
        None => DEFAULT_TYPE,
        Some(declared) => match declared.as_str() {
            Some(t @ ("button" | "submit")) => t,
            _ => {
                valid_type = false;
                diag.error(format!("invalid button type {declared}"));
                DEFAULT_TYPE
            }
        },
    };

    let valid_entry = entry.is_object();
    if !valid_entry {
        diag.error(format!("detected button not of the 'object' type ({entry})"));
    }

    if !(valid_identifier && valid_type && valid_entry) {
        return;
    }

    let text = predicates::valid_str_opt(entry.get("text"));
    let glyph = entry.get("icon").and_then(|icon| {
        predicates::valid_object(icon)?;
        predicates::valid_str_opt(icon.get("glyph"))
    });

    if text.is_none() && glyph.is_none() {
        diag.error("detected button without a text or an icon");
        return;
    }

    let mut button = Element::new("button")
        .with_class("btn")
        .with_attr("id", format!("{id}-btn"))
        .with_attr("type", button_type);

    if let Some(text) = text {
        button.push(Element::text_node(text));
    }

    if let Some(glyph) = glyph {
        let mut icon = Element::new("i")
            .with_class("bi")
            .with_class(format!("bi-{glyph}"));

        let placement = entry
            .get("icon")
            .and_then(|i| i.get("placement"))
            .cloned()
            .unwrap_or(Value::Null);

        match placement {
            Value::Null => {
                // Absent placement means start.
                if text.is_some() {
                    icon.add_class("me-2");
                }
                button.children.insert(0, icon);
            }
            Value::String(ref p) if p == "start" => {
                if text.is_some() {
                    icon.add_class("me-2");
                }
                button.children.insert(0, icon);
            }
            Value::String(ref p) if p == "end" => {
                if text.is_some() {
                    icon.add_class("ms-2");
                }
                button.push(icon);
            }
            _ => diag.warn("invalid button icon placement"),
        }
    }

    if let Some(attributes) = entry.get("attributes") {
        attrs::merge_button_attributes(&mut button, attributes);
    }

    wrapper.push(button);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trellis_core::{Severity, TEXT_TAG};

    fn compile(id: &str, entry: Value) -> (Element, Diagnostics) {
        let mut container = Element::new("form");
        let mut diag = Diagnostics::new();
        let mut buttons = IndexMap::new();
        buttons.insert(id.to_string(), entry);
        compile_buttons(&buttons, &mut container, &mut diag);
        (container, diag)
    }

    fn wrapper_of(container: &Element) -> &Element {
        &container.children[0]
    }

    #[test]
    fn test_wrapper_appended_even_when_all_skipped() {
        let (container, diag) = compile("send", json!({}));
        let wrapper = wrapper_of(&container);

        assert!(wrapper.has_class("form-buttons"));
        assert!(wrapper.children.is_empty());
        assert_eq!(diag.count(Severity::Error), 1);
    }

    #[test]
    fn test_basic_submit_button() {
        let (container, diag) = compile("send", json!({"type": "submit", "text": "Send"}));
        let button = &wrapper_of(&container).children[0];

        assert_eq!(button.attr("id"), Some("send-btn"));
        assert_eq!(button.attr("type"), Some("submit"));
        assert!(button.has_class("btn"));
        assert_eq!(button.children[0].tag, TEXT_TAG);
        assert_eq!(button.children[0].text, "Send");
        assert!(diag.is_empty());
    }

    #[test]
    fn test_type_defaults_to_button() {
        let (container, _) = compile("cancel", json!({"text": "Cancel"}));
        assert_eq!(
            wrapper_of(&container).children[0].attr("type"),
            Some("button")
        );
    }

    #[test]
    fn test_invalid_type_skips() {
        let (container, diag) = compile("send", json!({"type": "reset", "text": "Reset"}));
        assert!(wrapper_of(&container).children.is_empty());
        assert_eq!(diag.count(Severity::Error), 1);
    }

    #[test]
    fn test_icon_placement_start_by_default() {
        let (container, _) = compile(
            "send",
            json!({"text": "Send", "icon": {"glyph": "envelope"}}),
        );
        let button = &wrapper_of(&container).children[0];

        assert_eq!(button.children[0].tag, "i");
        assert!(button.children[0].has_class("bi-envelope"));
        assert!(button.children[0].has_class("me-2"));
        assert_eq!(button.children[1].tag, TEXT_TAG);
    }

    #[test]
    fn test_icon_placement_end() {
        let (container, _) = compile(
            "send",
            json!({"text": "Send", "icon": {"glyph": "arrow-right", "placement": "end"}}),
        );
        let button = &wrapper_of(&container).children[0];

        assert_eq!(button.children[0].tag, TEXT_TAG);
        assert_eq!(button.children[1].tag, "i");
        assert!(button.children[1].has_class("ms-2"));
    }

    #[test]
    fn test_icon_only_button_has_no_spacing_class() {
        let (container, _) = compile("send", json!({"icon": {"glyph": "envelope"}}));
        let button = &wrapper_of(&container).children[0];

        assert_eq!(button.children.len(), 1);
        assert!(!button.children[0].has_class("me-2"));
    }

    #[test]
    fn test_unknown_placement_warns_and_omits_icon() {
        let (container, diag) = compile(
            "send",
            json!({"text": "Send", "icon": {"glyph": "envelope", "placement": "above"}}),
        );
        let button = &wrapper_of(&container).children[0];

        assert_eq!(button.children.len(), 1);
        assert_eq!(button.children[0].tag, TEXT_TAG);
        assert_eq!(diag.count(Severity::Warn), 1);
    }

    #[test]
    fn test_no_text_no_icon_skips_with_error() {
        let (container, diag) = compile("send", json!({"type": "submit"}));
        assert!(wrapper_of(&container).children.is_empty());
        assert_eq!(diag.count(Severity::Error), 1);
        assert_eq!(
            diag.entries()[0].message,
            "detected button without a text or an icon"
        );
    }

    #[test]
    fn test_free_attributes_merge() {
        let (container, _) = compile(
            "send",
            json!({"text": "Send", "attributes": {"class": "btn-primary", "type": "reset"}}),
        );
        let button = &wrapper_of(&container).children[0];

        assert!(button.has_class("btn-primary"));
        assert_eq!(button.attr("type"), Some("button"));
    }

    #[test]
    fn test_buttons_keep_declaration_order() {
        let mut container = Element::new("form");
        let mut diag = Diagnostics::new();
        let mut buttons = IndexMap::new();
        buttons.insert("b".to_string(), json!({"text": "B"}));
        buttons.insert("a".to_string(), json!({"text": "A"}));
        compile_buttons(&buttons, &mut container, &mut diag);

        let wrapper = &container.children[0];
        assert_eq!(wrapper.children[0].attr("id"), Some("b-btn"));
        assert_eq!(wrapper.children[1].attr("id"), Some("a-btn"));
    }
}
