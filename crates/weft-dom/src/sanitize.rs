//! Sanitization
//!
//! Text values carry a flag telling whether they still need escaping.
//! Escaping is idempotent: sanitized text is never encoded twice.

use std::fmt;
use std::ops::Deref;

/// Text content of an element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Text {
    value: String,
    sanitized: bool,
}

impl Text {
    /// Text that still has to be escaped before it is trusted as markup
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            sanitized: false,
        }
    }

    /// Text flagged as safe. The value is left untouched.
    pub fn sanitized(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            sanitized: true,
        }
    }

    pub fn is_sanitized(&self) -> bool {
        self.sanitized
    }

    /// HTML-encode the value unless it is already sanitized
    pub fn sanitize(&mut self) -> &mut Self {
        if !self.sanitized {
            self.value = escape_html(&self.value);
            self.sanitized = true;
        }
        self
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<SafeString> for Text {
    fn from(value: SafeString) -> Self {
        Self::sanitized(value.0)
    }
}

/// Serialized markup. Always safe to embed without further escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SafeString(String);

impl SafeString {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for SafeString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SafeString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SafeString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<SafeString> for String {
    fn from(value: SafeString) -> Self {
        value.0
    }
}

/// Encode the markup-significant characters of `text`
pub fn escape_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&apos;"),
            _ => output.push(c),
        }
    }
    output
}
