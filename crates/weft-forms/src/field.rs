//! Form Field Core
//!
//! Shared state of every field (name, label, value, flags, attributes) and
//! the [`FormField`] trait the concrete field types implement.

use std::fmt;

use weft_dom::{AttrValue, Attributes, ClassList, DomError, DomResult, ElementTree, NodeId, Params};

use crate::input::HiddenField;
use crate::{FormError, FormResult};

/// Submitted or preset value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    /// Multiple selections (checkboxes)
    List(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::List(items) => items.iter().all(String::is_empty),
        }
    }

    /// Whether `value` is (one of) the selected values
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(s) => s == value,
            Self::List(items) => items.iter().any(|item| item == value),
        }
    }

    /// First selected value
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(s) if !s.is_empty() => Some(s),
            Self::Single(_) => None,
            Self::List(items) => items.first().map(String::as_str),
        }
    }

    /// Human readable form: lists are joined with `, `
    pub fn display(&self) -> String {
        match self {
            Self::Single(s) => s.clone(),
            Self::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Construction parameters shared by all field types
#[derive(Debug, Clone, Default)]
pub struct FieldParams {
    pub(crate) name: Option<String>,
    pub(crate) label: Option<String>,
    pub(crate) value: FieldValue,
    pub(crate) hint: Option<String>,
    pub(crate) data_type: Option<String>,
    pub(crate) attrs: Attributes,
    pub(crate) required: bool,
    pub(crate) invalid: bool,
    pub(crate) hidden: bool,
}

impl FieldParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Plain attribute of the rendered element
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

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// State every field carries
#[derive(Debug, Clone)]
pub struct FieldState {
    name: String,
    label: Option<String>,
    value: FieldValue,
    hint: Option<String>,
    data_type: Option<String>,
    attrs: Attributes,
    readonly: bool,
    invalid: bool,
    required: bool,
    disabled: bool,
    hidden: bool,
}

impl FieldState {
    /// Fails when no (non-empty) name is given
    pub fn new(field_type: &'static str, mut params: FieldParams) -> FormResult<Self> {
        let name = match params.name.take() {
            Some(name) if !name.is_empty() => name,
            _ => {
                tracing::warn!("weft_forms::field: {} constructed without a name", field_type);
                return Err(FormError::MissingName { field_type });
            }
        };

        Ok(Self::named(name, params))
    }

    /// State for a name that is already known to be valid
    pub(crate) fn named(name: String, params: FieldParams) -> Self {
        let mut attrs = Attributes::new().with("name", name.as_str());
        attrs.merge(params.attrs);
        attrs.set("name", name.as_str());
        let disabled = attrs.get("disabled").is_some_and(|v| !v.is_omitted());

        Self {
            name,
            label: params.label,
            value: params.value,
            hint: params.hint,
            data_type: params.data_type,
            attrs,
            readonly: false,
            invalid: params.invalid,
            required: params.required,
            disabled,
            hidden: params.hidden,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// Stringified `id` attribute
    pub fn dom_id(&self) -> Option<String> {
        self.attrs
            .get("id")
            .filter(|v| !v.is_omitted())
            .map(AttrValue::stringify)
            .filter(|s| !s.is_empty())
    }

    pub fn set_dom_id(&mut self, id: impl Into<AttrValue>) {
        self.attrs.set("id", id);
    }

    pub fn css_classes(&self) -> ClassList {
        self.attrs.css_classes()
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
        self.toggle_class("readonly", readonly);
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
        self.toggle_class("invalid", invalid);
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
        self.toggle_class("required", required);
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Also sets or removes the `disabled` attribute
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.attrs.set("disabled", true);
        } else {
            self.attrs.remove("disabled");
        }
        self.toggle_class("disabled", disabled);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hidden fields render as hidden inputs inside a form
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn toggle_class(&mut self, class: &str, on: bool) {
        self.attrs.toggle_class(class, Some(on));
    }
}

/// A form field that renders into an element tree
pub trait FormField: fmt::Debug {
    fn state(&self) -> &FieldState;

    fn state_mut(&mut self) -> &mut FieldState;

    /// Lowercase type name used for wrapper classes (e.g. `select_field`)
    fn type_name(&self) -> &'static str;

    /// Editable element
    fn element(&self, _tree: &mut ElementTree) -> DomResult<NodeId> {
        Err(DomError::MissingOverride {
            type_name: std::any::type_name::<Self>(),
        })
    }

    /// Element shown in place of the input while readonly
    fn readonly_element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let state = self.state();
        tree.create(
            Params::new()
                .tag("div")
                .attrs(readonly_attributes(state.attributes()))
                .content(state.value().display()),
        )
    }

    fn render(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        if self.state().is_readonly() {
            self.readonly_element(tree)
        } else {
            self.element(tree)
        }
    }

    /// Hidden input carrying this field's name, id and value
    fn to_hidden_field(&self) -> HiddenField {
        HiddenField::from_state(self.state())
    }

    /// Emitted outside the field wrappers of a form
    fn is_hidden_input(&self) -> bool {
        false
    }
}

/// Field attributes without the input-only `type` and `value`
pub(crate) fn readonly_attributes(attrs: &Attributes) -> Attributes {
    attrs
        .iter()
        .filter(|(name, _)| *name != "type" && *name != "value")
        .map(|(name, value)| (name, value.clone()))
        .collect()
}

/// Field attributes plus `value` when the field has one
pub(crate) fn input_attributes(state: &FieldState) -> Attributes {
    let mut attrs = state.attributes().clone();
    if !state.value().is_empty() {
        attrs.set("value", state.value().display());
    }
    attrs
}
