//! Element Attributes
//!
//! Insertion-ordered attribute map. Names are not validated against any
//! markup vocabulary; values keep their type until render time.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classlist::ClassList;
use crate::sanitize::SafeString;

/// Attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Omitted from rendered output
    Null,
    /// `true` renders as a bare attribute, `false` is omitted
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Entries are joined with single spaces (e.g. CSS classes)
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// String value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this value is omitted when rendering
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Null | Self::Bool(false))
    }

    /// Plain string form. Lists join their non-empty entries with spaces.
    pub fn stringify(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(AttrValue::stringify)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<SafeString> for AttrValue {
    fn from(value: SafeString) -> Self {
        Self::Str(value.into_string())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered attribute collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
    by_name: HashMap<String, usize>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get attribute value by name
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.by_name.get(name).map(|&i| &self.entries[i].1)
    }

    /// Set attribute, returning the previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        let name = name.into();
        let value = value.into();
        if let Some(&index) = self.by_name.get(&name) {
            Some(std::mem::replace(&mut self.entries[index].1, value))
        } else {
            let index = self.entries.len();
            self.by_name.insert(name.clone(), index);
            self.entries.push((name, value));
            None
        }
    }

    /// Builder form of [`Attributes::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove attribute by name
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.by_name.remove(name)?;
        // Update indices for entries after the removed one
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Copy every attribute of `other` into this map, overwriting duplicates
    pub fn merge(&mut self, other: Attributes) {
        for (name, value) in other.entries {
            self.set(name, value);
        }
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Normalized view of the `class` attribute
    pub fn css_classes(&self) -> ClassList {
        self.get("class").map(ClassList::from_value).unwrap_or_default()
    }

    /// Add CSS classes, writing the class attribute back as a list
    pub fn add_class(&mut self, names: &[&str]) {
        let mut classes = self.css_classes();
        classes.add(names);
        self.store_classes(classes);
    }

    /// Remove a CSS class. The attribute is dropped once no class is left.
    pub fn remove_class(&mut self, name: &str) {
        let mut classes = self.css_classes();
        classes.remove(&[name]);
        self.store_classes(classes);
    }

    /// Toggle a CSS class, or force it on or off. Returns whether the
    /// class is now present.
    pub fn toggle_class(&mut self, name: &str, force: Option<bool>) -> bool {
        let mut classes = self.css_classes();
        let enabled = classes.toggle(name, force);
        self.store_classes(classes);
        enabled
    }

    fn store_classes(&mut self, classes: ClassList) {
        if classes.is_empty() {
            self.remove("class");
        } else {
            self.set("class", classes.into_value());
        }
    }

    pub(crate) fn entries(&self) -> &[(String, AttrValue)] {
        &self.entries
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
