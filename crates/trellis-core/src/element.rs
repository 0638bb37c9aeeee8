//! The UI element tree emitted by a compile pass.
//!
//! An [`Element`] is the durable artifact of compilation: a tag name,
//! an ordered attribute mapping, a class list, ordered children, and
//! text content. Authored attributes are the element's baseline; the
//! value codec mutates a separate live-state overlay so that a reset
//! can fall back to the authored state, the way a host form reset
//! restores attribute-backed defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tag used for plain text nodes (mixed content inside buttons).
pub const TEXT_TAG: &str = "#text";

/// One node of the compiled UI tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (`input`, `select`, `div`, ... or [`TEXT_TAG`]).
    pub tag: String,
    /// Ordered attribute mapping. Boolean attributes hold the empty
    /// string; presence means set.
    pub attrs: IndexMap<String, String>,
    /// CSS class list, in insertion order, without duplicates.
    pub classes: SmallVec<[String; 4]>,
    /// Ordered child nodes.
    pub children: Vec<Element>,
    /// Text content.
    pub text: String,
    #[serde(skip)]
    live: LiveState,
}

/// Live overlay mutated by the value codec; `None` means "fall back
/// to the authored attribute".
#[derive(Debug, Clone, Default, PartialEq)]
struct LiveState {
    value: Option<String>,
    checked: Option<bool>,
    indeterminate: Option<bool>,
}

impl Element {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Create a plain text node.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set an attribute (builder form).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a class (builder form).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Set the text content (builder form).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a child (builder form).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Look up an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Set a boolean attribute (presence = set).
    pub fn set_flag(&mut self, name: impl Into<String>) {
        self.attrs.insert(name.into(), String::new());
    }

    /// Whether the attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.shift_remove(name);
    }

    /// Add a class unless already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Whether the class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Clear the text content.
    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    /// Whether this element accepts user input (`input`, `select`,
    /// `textarea`).
    pub fn is_input(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "select" | "textarea")
    }

    /// The current value: live overlay first, authored `value`
    /// attribute second, empty string otherwise.
    pub fn value(&self) -> &str {
        match &self.live.value {
            Some(v) => v,
            None => self.attr("value").unwrap_or(""),
        }
    }

    /// The live value, if the codec or host set one.
    pub fn live_value(&self) -> Option<&str> {
        self.live.value.as_deref()
    }

    /// Overwrite the live value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.live.value = Some(value.into());
    }

    /// The current checked state: live overlay first, authored
    /// `checked` attribute second.
    pub fn checked(&self) -> bool {
        self.live.checked.unwrap_or_else(|| self.has_attr("checked"))
    }

    /// Overwrite the live checked state.
    pub fn set_checked(&mut self, checked: bool) {
        self.live.checked = Some(checked);
    }

    /// The current indeterminate state.
    pub fn indeterminate(&self) -> bool {
        self.live
            .indeterminate
            .unwrap_or_else(|| self.has_attr("indeterminate"))
    }

    /// Overwrite the live indeterminate state.
    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.live.indeterminate = Some(indeterminate);
    }

    /// Drop the live overlay so the authored attributes govern again.
    pub fn reset_state(&mut self) {
        self.live = LiveState::default();
    }

    /// Pre-order walk over this node and all descendants.
    pub fn for_each(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in &self.children {
            child.for_each(f);
        }
    }

    /// Pre-order mutable walk over this node and all descendants.
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }

    /// Find the first descendant (or self) matching the predicate.
    pub fn find(&self, predicate: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(predicate))
    }

    /// Mutable variant of [`Element::find`].
    pub fn find_mut(&mut self, predicate: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(predicate))
    }
}
