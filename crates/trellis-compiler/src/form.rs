//! The form compiler.
//!
//! Orchestrates one build pass: heading first, then a requirements
//! gate over the field and button collections, then the field and
//! button compilers in declaration order. A missing collection aborts both
//! compilations (the heading still renders) and the pass keeps
//! going, reporting through the diagnostics channel.

use trellis_core::{predicates, Diagnostics, Element, Settings};

use crate::button;
use crate::field::{self, FormDefaults};

/// Compile a form specification into an element tree. Never fails;
/// inspect the returned diagnostics for rejected or degraded rules.
pub fn compile(settings: &Settings) -> (Element, Diagnostics) {
    let mut diag = Diagnostics::new();
    let mut root = Element::new("form");

    if let Some(heading) = &settings.heading {
        if predicates::valid_object(heading).is_some() {
            compile_heading(heading, &mut root, &mut diag);
        }
    }

    let mut meets_requirements = true;
    if settings.fields.is_empty() {
        meets_requirements = false;
        diag.error("no fields provided");
    }
    if settings.buttons.is_empty() {
        meets_requirements = false;
        diag.error("no buttons provided");
    }

    if meets_requirements {
        let defaults = resolve_defaults(settings);
        for (id, entry) in &settings.fields {
            field::compile_field(id, entry, &defaults, &mut root, &mut diag);
        }
        button::compile_buttons(&settings.buttons, &mut root, &mut diag);
    }

    (root, diag)
}

fn resolve_defaults(settings: &Settings) -> FormDefaults {
    let mut defaults = FormDefaults {
        use_name: settings.use_name,
        validation_text: settings.validation_text,
        ..FormDefaults::default()
    };
    if let Some(rows) = settings.textarea_rows.filter(|r| *r > 0.0) {
        defaults.textarea_rows = rows;
    }
    if let Some(size) = settings.select_size.filter(|s| *s > 0.0) {
        defaults.select_size = size;
    }
    defaults
}

fn compile_heading(heading: &serde_json::Value, root: &mut Element, diag: &mut Diagnostics) {
    let Some(text) = predicates::valid_str_opt(heading.get("text")) else {
        diag.error("heading without valid text");
        return;
    };

    let divider = heading.get("divider") == Some(&serde_json::Value::Bool(true));

    let mut h4 = Element::new("h4").with_class("form-heading").with_text(text);
    if !divider {
        // Without a divider the heading carries its own margin.
        h4.add_class("mb-5");
    }
    root.push(h4);

    if divider {
        root.push(
            Element::new("hr")
                .with_class("form-heading-divider")
                .with_class("mb-4"),
        );
    }
}
