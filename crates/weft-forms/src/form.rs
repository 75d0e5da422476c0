//! Form Container
//!
//! Holds fields and fieldsets in insertion order and renders them as
//! `form > ul.form_fields > li` with one labelled wrapper per visible field
//! and one `li` per fieldset. Hidden inputs go straight into the list
//! without a wrapper. Buttons follow the list.

use std::collections::HashMap;

use weft_dom::{AttrValue, Attributes, Component, ContentList, DomResult, ElementTree, NodeId, Params, content};

use crate::button::FormButton;
use crate::field::{FieldValue, FormField};
use crate::fieldset::Fieldset;
use crate::{FormError, FormResult};

#[derive(Debug)]
enum Entry {
    Field(Box<dyn FormField>),
    Fieldset(Fieldset),
}

impl Entry {
    fn fields(&self) -> &[Box<dyn FormField>] {
        match self {
            Self::Field(field) => std::slice::from_ref(field),
            Self::Fieldset(fieldset) => fieldset.boxed_fields(),
        }
    }

    fn fields_mut(&mut self) -> &mut [Box<dyn FormField>] {
        match self {
            Self::Field(field) => std::slice::from_mut(field),
            Self::Fieldset(fieldset) => fieldset.boxed_fields_mut(),
        }
    }
}

/// Form with ordered fields, fieldsets and preset values
#[derive(Debug)]
pub struct Form {
    attrs: Attributes,
    title: Option<String>,
    entries: Vec<Entry>,
    buttons: Vec<FormButton>,
    values: HashMap<String, FieldValue>,
    /// Names of the fields and fieldsets to show, in order. `None` shows
    /// every entry.
    visible: Option<Vec<String>>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self {
            attrs: Attributes::new()
                .with("method", "POST")
                .with("enctype", "multipart/form-data"),
            title: None,
            entries: Vec::new(),
            buttons: Vec::new(),
            values: HashMap::new(),
            visible: None,
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(name, value);
        self
    }

    pub fn id(self, id: impl Into<AttrValue>) -> Self {
        self.attr("id", id)
    }

    pub fn action(self, action: impl Into<AttrValue>) -> Self {
        self.attr("action", action)
    }

    /// Heading rendered above the fields
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Preset values, applied to fields added later that have no value
    pub fn with_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.values = values.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    fn dom_id(&self) -> Option<String> {
        self.attrs
            .get("id")
            .filter(|v| !v.is_omitted())
            .map(AttrValue::stringify)
    }

    /// Preset value and dom id for a field joining the form
    fn prepare(&self, field: &mut dyn FormField) {
        let type_name = field.type_name();
        let state = field.state_mut();
        let name = state.name().to_string();
        if state.value().is_empty() {
            if let Some(value) = self.values.get(&name) {
                state.set_value(value.clone());
            }
        }
        if state.dom_id().is_none() {
            state.set_dom_id(name.replace('.', "_"));
        }
        tracing::trace!("weft_forms::form: added {} '{}'", type_name, name);
    }

    /// Add a field. It takes its preset value when it has none of its own
    /// and gets a dom id derived from its name when it has no id.
    pub fn add(&mut self, field: impl FormField + 'static) {
        let mut field: Box<dyn FormField> = Box::new(field);
        self.prepare(field.as_mut());
        self.entries.push(Entry::Field(field));
    }

    /// Builder form of [`Form::add`]
    pub fn with_field(mut self, field: impl FormField + 'static) -> Self {
        self.add(field);
        self
    }

    /// Add a fieldset. Its fields are prepared the same way as in
    /// [`Form::add`].
    pub fn add_fieldset(&mut self, mut fieldset: Fieldset) {
        for field in fieldset.boxed_fields_mut() {
            self.prepare(field.as_mut());
        }
        tracing::trace!("weft_forms::form: added fieldset '{}' ({} fields)", fieldset.name(), fieldset.len());
        self.entries.push(Entry::Fieldset(fieldset));
    }

    pub fn with_fieldset(mut self, fieldset: Fieldset) -> Self {
        self.add_fieldset(fieldset);
        self
    }

    /// Add a field to an existing fieldset
    pub fn add_to_fieldset(&mut self, fieldset: &str, field: impl FormField + 'static) -> FormResult<()> {
        let mut field: Box<dyn FormField> = Box::new(field);
        self.prepare(field.as_mut());
        let target = self.fieldset_mut(fieldset).ok_or_else(|| FormError::UnknownField {
            name: fieldset.to_string(),
        })?;
        target.push(field);
        Ok(())
    }

    /// Move the named fields into the fieldset `name`, creating it at the
    /// position of the first member when it does not exist yet.
    pub fn group(&mut self, name: &str, legend: Option<&str>, members: &[&str]) -> FormResult<()> {
        if let Some(unknown) = members.iter().find(|m| self.field(m).is_none()) {
            return Err(FormError::UnknownField {
                name: unknown.to_string(),
            });
        }

        let mut grouped: Vec<Option<Box<dyn FormField>>> = members.iter().map(|_| None).collect();
        let mut position = None;
        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in std::mem::take(&mut self.entries) {
            match entry {
                Entry::Field(field) => match members.iter().position(|m| *m == field.state().name()) {
                    Some(slot) if grouped[slot].is_none() => {
                        position.get_or_insert(entries.len());
                        grouped[slot] = Some(field);
                    }
                    _ => entries.push(Entry::Field(field)),
                },
                Entry::Fieldset(mut fieldset) => {
                    for (slot, member) in members.iter().enumerate() {
                        if grouped[slot].is_none() {
                            if let Some(field) = fieldset.take(member) {
                                position.get_or_insert(entries.len() + 1);
                                grouped[slot] = Some(field);
                            }
                        }
                    }
                    entries.push(Entry::Fieldset(fieldset));
                }
            }
        }
        self.entries = entries;

        let fill = |fieldset: &mut Fieldset| {
            if let Some(legend) = legend {
                fieldset.set_legend(legend);
            }
            for field in grouped.into_iter().flatten() {
                fieldset.push(field);
            }
        };
        match self.fieldset_mut(name) {
            Some(fieldset) => fill(fieldset),
            None => {
                let mut fieldset = Fieldset::new(name);
                fill(&mut fieldset);
                let index = position.unwrap_or(self.entries.len()).min(self.entries.len());
                self.entries.insert(index, Entry::Fieldset(fieldset));
            }
        }
        tracing::trace!("weft_forms::form: grouped {} fields into '{}'", members.len(), name);
        Ok(())
    }

    /// Add a button after the field list
    pub fn add_button(&mut self, button: FormButton) {
        self.buttons.push(button);
    }

    pub fn with_button(mut self, button: FormButton) -> Self {
        self.add_button(button);
        self
    }

    pub fn buttons(&self) -> &[FormButton] {
        &self.buttons
    }

    /// Set values for every named field, overwriting existing values
    pub fn set_values<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        for (name, value) in values {
            let name = name.into();
            let value = value.into();
            if let Some(field) = self.field_mut(&name) {
                field.state_mut().set_value(value.clone());
            }
            self.values.insert(name, value);
        }
    }

    /// Number of fields, counting the fields inside fieldsets
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.fields().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every field in document order, fieldset members included
    pub fn fields(&self) -> impl Iterator<Item = &dyn FormField> {
        self.entries.iter().flat_map(Entry::fields).map(|f| f.as_ref())
    }

    pub fn field(&self, name: &str) -> Option<&dyn FormField> {
        self.fields().find(|f| f.state().name() == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut (dyn FormField + 'static)> {
        self.entries
            .iter_mut()
            .flat_map(Entry::fields_mut)
            .find(|f| f.state().name() == name)
            .map(|f| f.as_mut())
    }

    /// Field by position in document order
    pub fn at(&self, index: usize) -> Option<&dyn FormField> {
        self.fields().nth(index)
    }

    pub fn fieldsets(&self) -> impl Iterator<Item = &Fieldset> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Fieldset(fieldset) => Some(fieldset),
            Entry::Field(_) => None,
        })
    }

    pub fn fieldset(&self, name: &str) -> Option<&Fieldset> {
        self.fieldsets().find(|f| f.name() == name)
    }

    fn fieldset_mut(&mut self, name: &str) -> Option<&mut Fieldset> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Fieldset(fieldset) if fieldset.name() == name => Some(fieldset),
            _ => None,
        })
    }

    /// Fieldset holding the named field
    fn fieldset_of(&self, field: &str) -> Option<&Fieldset> {
        self.fieldsets().find(|f| f.field(field).is_some())
    }

    /// Remove a field, wherever it is
    pub fn remove(&mut self, name: &str) -> FormResult<Box<dyn FormField>> {
        let top_level = self
            .entries
            .iter()
            .position(|e| matches!(e, Entry::Field(f) if f.state().name() == name));
        let removed = match top_level {
            Some(index) => match self.entries.remove(index) {
                Entry::Field(field) => Some(field),
                Entry::Fieldset(_) => None,
            },
            None => self.entries.iter_mut().find_map(|entry| match entry {
                Entry::Fieldset(fieldset) => fieldset.take(name),
                Entry::Field(_) => None,
            }),
        };
        let field = removed.ok_or_else(|| FormError::UnknownField { name: name.to_string() })?;
        if let Some(visible) = &mut self.visible {
            visible.retain(|n| n != name);
        }
        Ok(field)
    }

    /// Show only the named fields and fieldsets, in this order. Fields of a
    /// fieldset show inside it, at the place of the first one named.
    /// Required fields left out are still submitted as hidden inputs.
    pub fn set_visible_fields(&mut self, names: &[&str]) -> FormResult<()> {
        if let Some(unknown) = names
            .iter()
            .find(|n| self.field(n).is_none() && self.fieldset(n).is_none())
        {
            return Err(FormError::UnknownField {
                name: unknown.to_string(),
            });
        }
        self.visible = Some(names.iter().map(|n| n.to_string()).collect());
        Ok(())
    }

    /// Show every field again in insertion order
    pub fn show_all_fields(&mut self) {
        self.visible = None;
    }

    /// Make every field readonly
    pub fn readonly(&mut self) {
        for field in self.entries.iter_mut().flat_map(Entry::fields_mut) {
            field.state_mut().set_readonly(true);
        }
    }

    /// Make every field editable again
    pub fn editable(&mut self) {
        for field in self.entries.iter_mut().flat_map(Entry::fields_mut) {
            field.state_mut().set_readonly(false);
        }
    }

    /// Make the named fields readonly. A fieldset name covers all of its
    /// fields.
    pub fn set_readonly(&mut self, names: &[&str]) -> FormResult<()> {
        for name in names {
            if let Some(fieldset) = self.fieldset_mut(name) {
                fieldset.set_readonly(true);
                continue;
            }
            let field = self.field_mut(name).ok_or_else(|| FormError::UnknownField {
                name: name.to_string(),
            })?;
            field.state_mut().set_readonly(true);
        }
        Ok(())
    }

    /// Render a single field by name, wrapped the same way as in the form
    pub fn render_field(&self, tree: &mut ElementTree, name: &str) -> FormResult<NodeId> {
        let field = self.field(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_string(),
        })?;
        Ok(render_entry(tree, field)?)
    }

    /// `form > ul.form_fields` with the current field state
    pub fn render(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let mut entries = ContentList::new();
        if let Some(title) = &self.title {
            entries.push(tree.create(Params::new().tag("h1").class("form_title").content(title))?);
        }

        let mut included: Vec<&str> = Vec::new();
        match &self.visible {
            None => {
                for entry in &self.entries {
                    let id = match entry {
                        Entry::Field(field) => render_entry(tree, field.as_ref())?,
                        Entry::Fieldset(fieldset) => {
                            let shown: Vec<&dyn FormField> = fieldset.fields().collect();
                            wrap_fieldset(tree, fieldset, &shown)?
                        }
                    };
                    included.extend(entry.fields().iter().map(|f| f.state().name()));
                    entries.push(id);
                }
            }
            Some(names) => {
                let mut rendered_sets: Vec<&str> = Vec::new();
                for name in names {
                    let fieldset = self.fieldset(name).or_else(|| self.fieldset_of(name));
                    match fieldset {
                        Some(fieldset) if rendered_sets.contains(&fieldset.name()) => {}
                        Some(fieldset) => {
                            rendered_sets.push(fieldset.name());
                            let shown: Vec<&dyn FormField> = if names.iter().any(|n| n == fieldset.name()) {
                                fieldset.fields().collect()
                            } else {
                                names.iter().filter_map(|n| fieldset.field(n)).collect()
                            };
                            included.extend(shown.iter().map(|f| f.state().name()));
                            entries.push(wrap_fieldset(tree, fieldset, &shown)?);
                        }
                        None => {
                            if let Some(field) = self.field(name) {
                                included.push(field.state().name());
                                entries.push(render_entry(tree, field)?);
                            }
                        }
                    }
                }
            }
        }

        for field in self.fields() {
            if !included.contains(&field.state().name()) && field.state().is_required() {
                entries.push(field.to_hidden_field().render(tree)?);
            }
        }

        let mut list = Params::new().tag("ul").class("form_fields").content(entries);
        if let Some(id) = self.dom_id() {
            list = list.id(format!("{id}_fields"));
        }
        let list = tree.create(list)?;
        tracing::trace!("weft_forms::form: rendered {} fields", included.len());

        let mut content = ContentList::from(list);
        for button in &self.buttons {
            content.push(button.render(tree)?);
        }
        tree.create(Params::new().tag("form").attrs(self.attrs.clone()).content(content))
    }
}

impl Component for Form {
    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        self.render(tree)
    }
}

/// `li` holding a fieldset
fn wrap_fieldset(tree: &mut ElementTree, fieldset: &Fieldset, shown: &[&dyn FormField]) -> DomResult<NodeId> {
    let element = fieldset.render_fields(tree, shown)?;
    tree.create(Params::new().tag("li").content(element))
}

/// Hidden inputs as they are, every other field inside a labelled wrapper
pub(crate) fn render_entry(tree: &mut ElementTree, field: &dyn FormField) -> DomResult<NodeId> {
    if field.state().is_hidden() {
        return field.to_hidden_field().render(tree);
    }
    if field.is_hidden_input() {
        return field.render(tree);
    }
    wrap_field(tree, field)
}

/// `li#<dom_id>_wrap` holding an optional label and the field
fn wrap_field(tree: &mut ElementTree, field: &dyn FormField) -> DomResult<NodeId> {
    let state = field.state();
    let dom_id = state
        .dom_id()
        .unwrap_or_else(|| state.name().replace('.', "_"));

    let mut classes: Vec<String> = state.css_classes().iter().map(|c| format!("{c}_wrap")).collect();
    classes.push(format!("{}_wrap", field.type_name()));
    classes.push("form_field".to_string());
    if state.is_required() {
        classes.push("required".to_string());
    }
    if state.is_invalid() {
        classes.push("invalid".to_string());
    }

    let element = field.render(tree)?;
    let content = match state.label() {
        Some(label) => {
            let label = tree.create(
                Params::new()
                    .tag("label")
                    .attr("for", dom_id.as_str())
                    .attr("id", format!("{dom_id}_label"))
                    .content(label)
                    .force_closing_tag(true),
            )?;
            content![label, element]
        }
        None => ContentList::from(element),
    };

    tree.create(
        Params::new()
            .tag("li")
            .id(format!("{dom_id}_wrap"))
            .class(classes)
            .content(content),
    )
}
