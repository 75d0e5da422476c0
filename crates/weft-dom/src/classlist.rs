//! ClassList
//!
//! Normalized view of the polymorphic `class` attribute.

use crate::attributes::AttrValue;

/// Ordered, de-duplicated CSS class tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty class list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.push(token);
        }
        list
    }

    /// Normalize an attribute value (string, token or list of either)
    pub fn from_value(value: &AttrValue) -> Self {
        let mut list = Self::new();
        list.extend_from_value(value);
        list
    }

    fn extend_from_value(&mut self, value: &AttrValue) {
        match value {
            AttrValue::Null | AttrValue::Bool(false) => {}
            AttrValue::List(items) => {
                for item in items {
                    self.extend_from_value(item);
                }
            }
            other => {
                for token in other.stringify().split_whitespace() {
                    self.push(token);
                }
            }
        }
    }

    fn push(&mut self, token: &str) {
        if !token.is_empty() && !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }

    /// Get number of classes
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get class at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add class(es). Tokens containing whitespace are split.
    pub fn add(&mut self, tokens: &[&str]) {
        for token in tokens {
            for part in token.split_whitespace() {
                self.push(part);
            }
        }
    }

    /// Remove class(es)
    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
    }

    /// Toggle class, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let enable = force.unwrap_or(!self.contains(token));
        if enable {
            self.add(&[token]);
        } else {
            self.remove(&[token]);
        }
        enable
    }

    /// Space-separated form
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Attribute value written back to the element
    pub fn into_value(self) -> AttrValue {
        AttrValue::List(self.tokens.into_iter().map(AttrValue::Str).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}
