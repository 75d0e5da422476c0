//! Form Buttons
//!
//! Buttons rendered after the field list of a [`crate::Form`].

use weft_dom::{AttrValue, Attributes, Component, DomResult, ElementTree, NodeId, Params};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonTag {
    /// `<button>label</button>`
    Button,
    /// `<input value="label" />`
    Input,
}

/// Submit, reset or plain form button
#[derive(Debug, Clone)]
pub struct FormButton {
    tag: ButtonTag,
    attrs: Attributes,
    label: String,
}

impl FormButton {
    /// `<button>` submitting the form
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_tag(ButtonTag::Button, "submit", label)
    }

    /// `<input type="submit">`
    pub fn submit(label: impl Into<String>) -> Self {
        Self::with_tag(ButtonTag::Input, "submit", label)
    }

    /// `<input type="reset">`
    pub fn reset(label: impl Into<String>) -> Self {
        Self::with_tag(ButtonTag::Input, "reset", label)
    }

    fn with_tag(tag: ButtonTag, button_type: &str, label: impl Into<String>) -> Self {
        Self {
            tag,
            attrs: Attributes::new().with("type", button_type),
            label: label.into(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn id(self, id: impl Into<AttrValue>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<AttrValue>) -> Self {
        self.attr("class", class)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn render(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        match self.tag {
            ButtonTag::Button => tree.create(
                Params::new()
                    .tag("button")
                    .attrs(self.attrs.clone())
                    .content(self.label.as_str())
                    .force_closing_tag(true),
            ),
            ButtonTag::Input => {
                let mut attrs = self.attrs.clone();
                if !self.label.is_empty() {
                    attrs.set("value", self.label.as_str());
                }
                tree.create(Params::new().tag("input").attrs(attrs))
            }
        }
    }
}

impl Component for FormButton {
    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        self.render(tree)
    }
}
