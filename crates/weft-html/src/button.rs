//! Button
//!
//! `<button>` element with an optional icon image in front of its label.

use weft_dom::{AttrValue, Attributes, Component, ContentList, DomResult, ElementTree, NodeId, Params};

#[derive(Debug, Clone)]
pub struct Button {
    attrs: Attributes,
    icon: Option<String>,
    label: String,
}

impl Button {
    /// Button of type `button` showing `label`
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            attrs: Attributes::new().with("type", "button"),
            icon: None,
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

    /// `button`, `submit` or `reset`
    pub fn button_type(self, button_type: &str) -> Self {
        self.attr("type", button_type)
    }

    /// Image shown before the label
    pub fn icon(mut self, src: impl Into<String>) -> Self {
        self.icon = Some(src.into());
        self
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn render(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let mut content = ContentList::new();
        if let Some(src) = &self.icon {
            content.push(tree.create(Params::new().tag("img").attr("src", src.as_str()))?);
        }
        if !self.label.is_empty() {
            content.push(self.label.as_str());
        }
        tree.create(
            Params::new()
                .tag("button")
                .attrs(self.attrs.clone())
                .content(content)
                .force_closing_tag(true),
        )
    }
}

impl Component for Button {
    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        self.render(tree)
    }
}
