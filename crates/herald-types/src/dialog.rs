//! # Presentation Result Shape
//!
//! What a presentation layer fulfils a future with once the user acted.
//! The dialog wrappers only rely on three lookups: the first `button`
//! element, its `is` attribute, and the value of the first `input` element.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rendered element the user interacted with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogElement {
    /// Element tag, e.g. `button` or `input`.
    pub tag: String,
    /// Element attributes.
    pub attributes: BTreeMap<String, String>,
    /// Current value, for input-like elements.
    pub value: Option<String>,
}

impl DialogElement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn get_value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// The container a presentation layer hands back when settling a dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogContainer {
    elements: Vec<DialogElement>,
}

impl DialogContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element.
    #[must_use]
    pub fn with_element(mut self, element: DialogElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Append the button the user chose, identified by its `is` attribute.
    #[must_use]
    pub fn with_button(self, is: impl Into<String>) -> Self {
        self.with_element(DialogElement::new("button").with_attr("is", is))
    }

    /// Append an input element holding `value`.
    #[must_use]
    pub fn with_input(self, value: impl Into<String>) -> Self {
        self.with_element(DialogElement::new("input").with_value(value))
    }

    /// First element with the given tag.
    pub fn get_element(&self, tag: &str) -> Option<&DialogElement> {
        self.elements.iter().find(|e| e.tag == tag)
    }

    pub fn elements(&self) -> &[DialogElement] {
        &self.elements
    }
}
