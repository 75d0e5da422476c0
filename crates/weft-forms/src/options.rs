//! Option Fields
//!
//! Fields choosing from an ordered list of `(value, label)` options:
//! select boxes, radio button lists and checkbox lists. A boolean field is
//! a checkbox list with the single option `1`.

use weft_dom::{ContentList, DomResult, ElementTree, NodeId, Params};

use crate::FormResult;
use crate::field::{FieldParams, FieldState, FormField, readonly_attributes};

/// Ordered `(value, label)` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<(String, String)>,
}

impl OptionList {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(v, l)| (v.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label(&self, value: &str) -> Option<&str> {
        self.entries.iter().find(|(v, _)| v == value).map(|(_, l)| l.as_str())
    }

    fn push(&mut self, value: String, label: String) {
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((value, label)),
        }
    }
}

impl<V: Into<String>, L: Into<String>> FromIterator<(V, L)> for OptionList {
    fn from_iter<I: IntoIterator<Item = (V, L)>>(iter: I) -> Self {
        let mut list = OptionList::default();
        for (value, label) in iter {
            list.push(value.into(), label.into());
        }
        list
    }
}

/// Readonly view: labels of the selected values, or the raw value
fn readonly_options(tree: &mut ElementTree, state: &FieldState, options: &OptionList) -> DomResult<NodeId> {
    let value = state.value();
    let labels: Vec<&str> = options
        .iter()
        .filter(|(v, _)| value.contains(v))
        .map(|(_, l)| l)
        .collect();
    let text = if labels.is_empty() { value.display() } else { labels.join(", ") };
    tree.create(
        Params::new()
            .tag("div")
            .attrs(readonly_attributes(state.attributes()))
            .content(text),
    )
}

/// `ul` of `li` > (`input`, `label`) pairs for radio and checkbox lists
fn option_inputs(
    tree: &mut ElementTree,
    state: &FieldState,
    options: &OptionList,
    input_type: &str,
    list_class: &str,
) -> DomResult<NodeId> {
    let base = state
        .dom_id()
        .unwrap_or_else(|| state.name().replace('.', "_"));
    let mut items = Vec::with_capacity(options.len());
    for (value, label) in options.iter() {
        let option_id = format!("{base}_{value}");
        let input = tree.create(
            Params::new()
                .tag("input")
                .attr("type", input_type)
                .attr("value", value)
                .attr("name", state.name())
                .attr("id", option_id.as_str())
                .attr("checked", state.value().contains(value)),
        )?;
        let label = tree.create(
            Params::new()
                .tag("label")
                .attr("for", option_id)
                .content(label)
                .force_closing_tag(true),
        )?;
        items.push(tree.create(Params::new().tag("li").content(weft_dom::content![input, label]))?);
    }

    let mut attrs = readonly_attributes(state.attributes());
    attrs.remove("name");
    attrs.set("class", list_class);
    tree.create(Params::new().tag("ul").attrs(attrs).content(items))
}

macro_rules! option_field {
    ($(#[$meta:meta])* $name:ident, $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            state: FieldState,
            options: OptionList,
        }

        impl $name {
            pub fn new(params: FieldParams) -> FormResult<Self> {
                Ok(Self {
                    state: FieldState::new($type_name, params)?,
                    options: OptionList::default(),
                })
            }

            /// Replace the options
            pub fn options<I, V, L>(mut self, options: I) -> Self
            where
                I: IntoIterator<Item = (V, L)>,
                V: Into<String>,
                L: Into<String>,
            {
                self.options = options.into_iter().collect();
                self
            }

            /// Append an option (relabels an existing value)
            pub fn add_option(&mut self, value: impl Into<String>, label: impl Into<String>) {
                self.options.push(value.into(), label.into());
            }

            pub fn option_list(&self) -> &OptionList {
                &self.options
            }
        }
    };
}

option_field!(
    /// `<select>` with one `<option>` per entry
    SelectField,
    "select_field"
);
option_field!(
    /// Radio buttons, one per option
    RadioField,
    "radio_field"
);
option_field!(
    /// Checkboxes, one per option. The value may list several selections.
    CheckboxField,
    "checkbox_field"
);

impl SelectField {
    /// Select box for a name that is already known to be valid
    pub(crate) fn named(name: String, params: FieldParams, options: OptionList) -> Self {
        Self {
            state: FieldState::named(name, params),
            options,
        }
    }
}

impl FormField for SelectField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "select_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let mut entries = ContentList::new();
        for (value, label) in self.options.iter() {
            let option = tree.create(
                Params::new()
                    .tag("option")
                    .attr("value", value)
                    .attr("selected", self.state.value().contains(value))
                    .content(label)
                    .force_closing_tag(true),
            )?;
            entries.push(option);
        }
        tree.create(
            Params::new()
                .tag("select")
                .attrs(readonly_attributes(self.state.attributes()))
                .content(entries)
                .force_closing_tag(true),
        )
    }

    fn readonly_element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        readonly_options(tree, &self.state, &self.options)
    }
}

impl FormField for RadioField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "radio_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        option_inputs(tree, &self.state, &self.options, "radio", "radio_options")
    }

    fn readonly_element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        readonly_options(tree, &self.state, &self.options)
    }
}

impl FormField for CheckboxField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "checkbox_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        option_inputs(tree, &self.state, &self.options, "checkbox", "checkbox_options")
    }

    fn readonly_element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        readonly_options(tree, &self.state, &self.options)
    }
}

/// Single checkbox submitting `1` when checked
#[derive(Debug, Clone)]
pub struct BooleanField {
    state: FieldState,
}

impl BooleanField {
    pub fn new(params: FieldParams) -> FormResult<Self> {
        Ok(Self {
            state: FieldState::new("boolean_field", params)?,
        })
    }

    pub fn is_checked(&self) -> bool {
        self.state.value().contains("1")
    }
}

impl FormField for BooleanField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "boolean_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let input = tree.create(
            Params::new()
                .tag("input")
                .attr("type", "checkbox")
                .attr("value", "1")
                .attr("name", self.state.name())
                .attr("checked", self.is_checked()),
        )?;
        let item = tree.create(Params::new().tag("li").content(input))?;

        let mut attrs = readonly_attributes(self.state.attributes());
        attrs.remove("name");
        attrs.set("class", "checkbox_options");
        tree.create(Params::new().tag("ul").attrs(attrs).content(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use pretty_assertions::assert_eq;

    fn markup(field: &dyn FormField) -> String {
        let mut tree = ElementTree::new();
        let id = field.render(&mut tree).unwrap();
        tree.serialize(id).unwrap().as_str().to_string()
    }

    #[test]
    fn test_select_marks_current_value() {
        let field = SelectField::new(FieldParams::new().name("color").value("g"))
            .unwrap()
            .options([("r", "Red"), ("g", "Green")]);
        assert_eq!(
            markup(&field),
            concat!(
                r#"<select name="color">"#,
                r#"<option value="r">Red</option>"#,
                r#"<option value="g" selected="selected">Green</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn test_empty_select_keeps_pair() {
        let field = SelectField::new(FieldParams::new().name("none")).unwrap();
        assert_eq!(markup(&field), r#"<select name="none"></select>"#);
    }

    #[test]
    fn test_readonly_select_shows_label() {
        let mut field = SelectField::new(FieldParams::new().name("color").value("g"))
            .unwrap()
            .options([("r", "Red"), ("g", "Green")]);
        field.state_mut().set_readonly(true);
        assert_eq!(markup(&field), r#"<div name="color" class="readonly">Green</div>"#);
    }

    #[test]
    fn test_readonly_unknown_value_shows_value() {
        let mut field = SelectField::new(FieldParams::new().name("color").value("x"))
            .unwrap()
            .options([("r", "Red")]);
        field.state_mut().set_readonly(true);
        assert_eq!(markup(&field), r#"<div name="color" class="readonly">x</div>"#);
    }

    #[test]
    fn test_radio_options() {
        let field = RadioField::new(FieldParams::new().name("size").id("size").value("m"))
            .unwrap()
            .options([("s", "Small"), ("m", "Medium")]);
        assert_eq!(
            markup(&field),
            concat!(
                r#"<ul id="size" class="radio_options">"#,
                r#"<li><input type="radio" value="s" name="size" id="size_s" /><label for="size_s">Small</label></li>"#,
                r#"<li><input type="radio" value="m" name="size" id="size_m" checked="checked" /><label for="size_m">Medium</label></li>"#,
                "</ul>"
            )
        );
    }

    #[test]
    fn test_checkbox_list_value() {
        let mut field = CheckboxField::new(FieldParams::new().name("user.tags"))
            .unwrap()
            .options([("a", "A"), ("b", "B"), ("c", "C")]);
        field.state_mut().set_value(FieldValue::from(vec!["a", "c"]));
        let html = markup(&field);
        assert!(html.starts_with(r#"<ul class="checkbox_options">"#));
        assert!(html.contains(r#"<input type="checkbox" value="a" name="user.tags" id="user_tags_a" checked="checked" />"#));
        assert!(html.contains(r#"<input type="checkbox" value="b" name="user.tags" id="user_tags_b" />"#));
        assert!(html.contains(r#"id="user_tags_c" checked="checked""#));
    }

    #[test]
    fn test_readonly_checkbox_joins_labels() {
        let mut field = CheckboxField::new(FieldParams::new().name("tags").value(vec!["a", "b"]))
            .unwrap()
            .options([("a", "Alpha"), ("b", "Beta")]);
        field.state_mut().set_readonly(true);
        assert_eq!(markup(&field), r#"<div name="tags" class="readonly">Alpha, Beta</div>"#);
    }

    #[test]
    fn test_add_option_relabels() {
        let mut field = SelectField::new(FieldParams::new().name("n")).unwrap().options([("1", "one")]);
        field.add_option("1", "One");
        field.add_option("2", "Two");
        assert_eq!(field.option_list().len(), 2);
        assert_eq!(field.option_list().label("1"), Some("One"));
    }

    #[test]
    fn test_boolean_field() {
        let mut field = BooleanField::new(FieldParams::new().name("agree").id("agree")).unwrap();
        assert!(!field.is_checked());
        assert_eq!(
            markup(&field),
            r#"<ul id="agree" class="checkbox_options"><li><input type="checkbox" value="1" name="agree" /></li></ul>"#
        );

        field.state_mut().set_value("1");
        assert!(field.is_checked());
        assert!(markup(&field).contains(r#"name="agree" checked="checked" />"#));
    }
}
