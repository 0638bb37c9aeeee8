//! Submit interception and button click dispatch.
//!
//! Handlers live inside the form's settings, so they are taken out
//! for the duration of a call and put back afterwards; a handler may
//! freely call the codec operations on the form it receives values
//! from without aliasing its own box.

use trellis_core::FormEvent;

use crate::codec;
use crate::instance::Form;

/// The submit sequence: apply the build-time default policy, trim,
/// clear validation state, then run the hooks over a fresh
/// extraction.
pub(crate) fn submit(form: &mut Form) -> FormEvent {
    let mut event = FormEvent::new();
    if form.prevent_default {
        event.prevent_default();
    }

    codec::trim_fields(&mut form.root);
    codec::reset_validation(&mut form.root);

    let has_submit = form
        .settings
        .as_ref()
        .is_some_and(|s| s.on_submit.is_some());
    if !has_submit {
        return event;
    }

    let (mut before, mut on_submit) = match form.settings.as_mut() {
        Some(settings) => (settings.before_submit.take(), settings.on_submit.take()),
        None => (None, None),
    };

    let data = codec::get_fields(&form.root);
    if let Some(before) = before.as_mut() {
        before(&mut event, &data);
    }
    if let Some(on_submit) = on_submit.as_mut() {
        on_submit(&mut event, &data);
    }

    if let Some(settings) = form.settings.as_mut() {
        settings.before_submit = before;
        settings.on_submit = on_submit;
    }

    event
}

/// Click dispatch: run the button's handler, then continue into the
/// submit sequence for submit-typed buttons unless the handler
/// prevented the default.
pub(crate) fn click(form: &mut Form, id: &str) -> FormEvent {
    let mut event = FormEvent::new();

    let mut handler = form
        .settings
        .as_mut()
        .and_then(|s| s.click_handlers.shift_remove(id));
    if let Some(handler) = handler.as_mut() {
        handler(&mut event);
    }
    if let (Some(settings), Some(handler)) = (form.settings.as_mut(), handler) {
        settings.click_handlers.insert(id.to_string(), handler);
    }

    let button_id = format!("{id}-btn");
    let is_submit = form
        .root
        .find(&|el| el.tag == "button" && el.attr("id") == Some(button_id.as_str()))
        .is_some_and(|b| b.attr("type") == Some("submit"));

    if is_submit && !event.default_prevented() {
        return submit(form);
    }

    event
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;
    use trellis_core::{FieldValues, Settings};

    use crate::instance::Form;

    fn base_settings() -> Settings {
        Settings::new()
            .field("name", json!({"value": "ada"}))
            .button("send", json!({"type": "submit", "text": "Send"}))
    }

    #[test]
    fn test_submit_runs_hooks_in_order_with_same_data() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen: Rc<RefCell<Vec<FieldValues>>> = Rc::new(RefCell::new(Vec::new()));

        let (c1, s1) = (calls.clone(), seen.clone());
        let (c2, s2) = (calls.clone(), seen.clone());
        let settings = base_settings()
            .before_submit(move |_, data| {
                c1.borrow_mut().push("before");
                s1.borrow_mut().push(data.clone());
            })
            .on_submit(move |_, data| {
                c2.borrow_mut().push("submit");
                s2.borrow_mut().push(data.clone());
            });

        let (mut form, _) = Form::build(settings);
        form.submit();

        assert_eq!(*calls.borrow(), ["before", "submit"]);
        let seen = seen.borrow();
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[0]["name"], json!("ada"));
    }

    #[test]
    fn test_submit_trims_before_extraction() {
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let settings = base_settings().on_submit(move |_, data| {
            *sink.borrow_mut() = Some(data["name"].clone());
        });

        let (mut form, _) = Form::build(settings);
        form.field_mut("name")
            .expect("field missing")
            .set_value("  padded  ");
        form.submit();

        assert_eq!(*seen.borrow(), Some(json!("padded")));
    }

    #[test]
    fn test_submit_clears_validation_state_even_without_hooks() {
        let (mut form, _) = Form::build(base_settings());
        form.field_mut("name")
            .expect("field missing")
            .add_class("is-invalid");

        form.submit();

        let field = form.field_mut("name").expect("field missing");
        assert!(!field.has_class("is-invalid"));
    }

    #[test]
    fn test_submit_default_prevented_by_policy() {
        let (mut form, _) = Form::build(base_settings().on_submit(|_, _| {}));
        assert!(form.submit().default_prevented());

        let (mut form, _) =
            Form::build(base_settings().prevent_default(false).on_submit(|_, _| {}));
        assert!(!form.submit().default_prevented());
    }

    #[test]
    fn test_submit_hooks_survive_a_dispatch() {
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let settings = base_settings().on_submit(move |_, _| *sink.borrow_mut() += 1);
        let (mut form, _) = Form::build(settings);

        form.submit();
        form.submit();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_click_on_submit_button_triggers_submit() {
        let submitted = Rc::new(RefCell::new(false));
        let sink = submitted.clone();
        let settings = base_settings().on_submit(move |_, _| *sink.borrow_mut() = true);
        let (mut form, _) = Form::build(settings);

        form.click("send");
        assert!(*submitted.borrow());
    }

    #[test]
    fn test_click_handler_can_cancel_submit() {
        let submitted = Rc::new(RefCell::new(false));
        let sink = submitted.clone();
        let settings = base_settings()
            .on_submit(move |_, _| *sink.borrow_mut() = true)
            .on_click("send", |event| event.prevent_default());
        let (mut form, _) = Form::build(settings);

        let event = form.click("send");
        assert!(event.default_prevented());
        assert!(!*submitted.borrow());
    }

    #[test]
    fn test_click_on_plain_button_never_submits() {
        let submitted = Rc::new(RefCell::new(false));
        let clicked = Rc::new(RefCell::new(0));
        let (submit_sink, click_sink) = (submitted.clone(), clicked.clone());
        let settings = Settings::new()
            .field("name", json!({}))
            .button("send", json!({"type": "submit", "text": "Send"}))
            .button("clear", json!({"type": "button", "text": "Clear"}))
            .on_submit(move |_, _| *submit_sink.borrow_mut() = true)
            .on_click("clear", move |_| *click_sink.borrow_mut() += 1);
        let (mut form, _) = Form::build(settings);

        form.click("clear");
        assert_eq!(*clicked.borrow(), 1);
        assert!(!*submitted.borrow());

        // The handler survives dispatch and fires again.
        form.click("clear");
        assert_eq!(*clicked.borrow(), 2);
    }

    #[test]
    fn test_click_with_unknown_id_is_inert() {
        let (mut form, _) = Form::build(base_settings().on_submit(|_, _| {}));
        let event = form.click("missing");
        assert!(!event.default_prevented());
    }
}
