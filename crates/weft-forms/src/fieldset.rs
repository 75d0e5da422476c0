//! Fieldsets
//!
//! A named group of fields rendered as
//! `fieldset#<name> > legend, ul.form_fields.fieldset > li`. Inside a
//! [`crate::Form`] the fieldset takes one entry of the form's field list,
//! and its fields stay reachable through the form's field lookups.

use weft_dom::{AttrValue, Attributes, ContentList, DomResult, ElementTree, NodeId, Params};

use crate::field::FormField;
use crate::form::render_entry;

#[derive(Debug)]
pub struct Fieldset {
    name: String,
    legend: Option<String>,
    attrs: Attributes,
    fields: Vec<Box<dyn FormField>>,
}

impl Fieldset {
    /// Empty fieldset whose `id` defaults to `name`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            attrs: Attributes::new().with("id", name.as_str()),
            name,
            legend: None,
            fields: Vec::new(),
        }
    }

    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn with_field(mut self, field: impl FormField + 'static) -> Self {
        self.add(field);
        self
    }

    pub fn add(&mut self, field: impl FormField + 'static) {
        self.push(Box::new(field));
    }

    pub(crate) fn push(&mut self, field: Box<dyn FormField>) {
        self.fields.push(field);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn legend(&self) -> Option<&str> {
        self.legend.as_deref()
    }

    pub fn set_legend(&mut self, legend: impl Into<String>) {
        self.legend = Some(legend.into());
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &dyn FormField> {
        self.fields.iter().map(|f| f.as_ref())
    }

    pub fn field(&self, name: &str) -> Option<&dyn FormField> {
        self.fields().find(|f| f.state().name() == name)
    }

    pub(crate) fn boxed_fields(&self) -> &[Box<dyn FormField>] {
        &self.fields
    }

    pub(crate) fn boxed_fields_mut(&mut self) -> &mut [Box<dyn FormField>] {
        &mut self.fields
    }

    /// Remove a field from the group
    pub(crate) fn take(&mut self, name: &str) -> Option<Box<dyn FormField>> {
        let index = self.fields.iter().position(|f| f.state().name() == name)?;
        Some(self.fields.remove(index))
    }

    /// Switch every field of the group between readonly and editable
    pub fn set_readonly(&mut self, readonly: bool) {
        for field in &mut self.fields {
            field.state_mut().set_readonly(readonly);
        }
    }

    /// The fieldset with all of its fields
    pub fn render(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let shown: Vec<&dyn FormField> = self.fields().collect();
        self.render_fields(tree, &shown)
    }

    /// The fieldset showing `shown` only
    pub(crate) fn render_fields(&self, tree: &mut ElementTree, shown: &[&dyn FormField]) -> DomResult<NodeId> {
        let mut entries = ContentList::new();
        for field in shown {
            entries.push(render_entry(tree, *field)?);
        }
        let list = tree.create(
            Params::new()
                .tag("ul")
                .class(vec!["form_fields", "fieldset"])
                .content(entries),
        )?;

        let mut content = ContentList::new();
        if let Some(legend) = &self.legend {
            content.push(tree.create(Params::new().tag("legend").content(legend.as_str()))?);
        }
        content.push(list);
        tree.create(Params::new().tag("fieldset").attrs(self.attrs.clone()).content(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldParams, TextField};
    use pretty_assertions::assert_eq;

    fn text(name: &str) -> TextField {
        TextField::new(FieldParams::new().name(name)).unwrap()
    }

    #[test]
    fn test_render_with_legend() {
        let mut tree = ElementTree::new();
        let fieldset = Fieldset::new("contact")
            .with_legend("Contact")
            .with_field(TextField::new(FieldParams::new().name("email").id("email").label("E-Mail")).unwrap());
        let id = fieldset.render(&mut tree).unwrap();
        assert_eq!(
            tree.serialize(id).unwrap().as_str(),
            concat!(
                r#"<fieldset id="contact"><legend>Contact</legend>"#,
                r#"<ul class="form_fields fieldset">"#,
                r#"<li id="email_wrap" class="text_field_wrap form_field">"#,
                r#"<label for="email" id="email_label">E-Mail</label>"#,
                r#"<input name="email" id="email" type="text" />"#,
                "</li></ul></fieldset>"
            )
        );
    }

    #[test]
    fn test_lookup_and_take() {
        let mut fieldset = Fieldset::new("a").with_field(text("x")).with_field(text("y"));
        assert_eq!(fieldset.len(), 2);
        assert!(fieldset.field("y").is_some());
        assert!(fieldset.take("x").is_some());
        assert!(fieldset.take("x").is_none());
        assert_eq!(fieldset.fields().map(|f| f.state().name()).collect::<Vec<_>>(), vec!["y"]);
    }

    #[test]
    fn test_readonly_group() {
        let mut fieldset = Fieldset::new("a").with_field(text("x")).with_field(text("y"));
        fieldset.set_readonly(true);
        assert!(fieldset.fields().all(|f| f.state().is_readonly()));
        fieldset.set_readonly(false);
        assert!(fieldset.fields().all(|f| !f.state().is_readonly()));
    }

    #[test]
    fn test_custom_id() {
        let fieldset = Fieldset::new("billing").attr("id", "billing_box");
        assert_eq!(fieldset.attributes().get("id"), Some(&AttrValue::from("billing_box")));
        assert_eq!(fieldset.name(), "billing");
    }
}
