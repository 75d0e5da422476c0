//! Javascript Snippets
//!
//! Builds small call chains such as `Cuba.Editor.open('article', 12); `
//! for event attributes and inline `script` tags.

use std::fmt;

use weft_dom::AttrValue;

/// Argument of a generated call
#[derive(Debug, Clone, PartialEq)]
pub enum JsArg {
    /// Single-quoted string literal
    Str(String),
    /// Emitted verbatim (identifiers, expressions)
    Raw(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Object literal `{k: v, ...}`
    Object(Vec<(String, JsArg)>),
}

impl JsArg {
    pub fn raw(token: impl Into<String>) -> Self {
        Self::Raw(token.into())
    }

    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<JsArg>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Script representation of this argument
    pub fn to_js(&self) -> String {
        match self {
            Self::Str(s) => format!("'{}'", s.replace('\'', "\\'")),
            Self::Raw(token) => token.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Object(entries) => {
                let fields: Vec<String> = entries.iter().map(|(k, v)| format!("{}: {}", k, v.to_js())).collect();
                format!("{{{}}}", fields.join(", "))
            }
        }
    }
}

impl From<&str> for JsArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for JsArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for JsArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for JsArg {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for JsArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for JsArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Script under construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Javascript {
    script: String,
}

impl Javascript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing script
    pub fn from_script(script: impl Into<String>) -> Self {
        Self { script: script.into() }
    }

    /// Start inside a namespace: `Javascript::namespace("Cuba")` → `Cuba.`
    pub fn namespace(name: &str) -> Self {
        Self::new().ns(name)
    }

    /// Append `name.`
    pub fn ns(mut self, name: &str) -> Self {
        self.script.push_str(name);
        self.script.push('.');
        self
    }

    /// Append `name(arg,...); `
    pub fn call<I, A>(mut self, name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<JsArg>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.into().to_js()).collect();
        self.script.push_str(name);
        self.script.push('(');
        self.script.push_str(&args.join(","));
        self.script.push_str("); ");
        self
    }

    /// Append raw code
    pub fn push(mut self, code: &str) -> Self {
        self.script.push_str(code);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.script
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Wrap the script in a `script` tag
    pub fn to_tag(&self) -> String {
        format!(
            "<script language=\"Javascript\" type=\"text/javascript\">\n{}\n</script>",
            self.script
        )
    }
}

impl fmt::Display for Javascript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.script)
    }
}

impl From<Javascript> for AttrValue {
    fn from(js: Javascript) -> Self {
        AttrValue::Str(js.script)
    }
}

impl From<Javascript> for String {
    fn from(js: Javascript) -> Self {
        js.script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_dom::{ElementTree, Params};

    #[test]
    fn test_namespaced_call() {
        let js = Javascript::namespace("Cuba")
            .ns("Editor")
            .call("open", [JsArg::from("article"), JsArg::from(12)]);
        assert_eq!(js.as_str(), "Cuba.Editor.open('article',12); ");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(JsArg::from("it's").to_js(), r"'it\'s'");
        assert_eq!(JsArg::raw("window").to_js(), "window");
    }

    #[test]
    fn test_object_argument() {
        let arg = JsArg::object([("id", JsArg::from(3)), ("mode", JsArg::from("edit"))]);
        assert_eq!(arg.to_js(), "{id: 3, mode: 'edit'}");
    }

    #[test]
    fn test_call_without_args() {
        let js = Javascript::new().call("reload", Vec::<JsArg>::new()).call("close", ["now"]);
        assert_eq!(js.to_string(), "reload(); close('now'); ");
    }

    #[test]
    fn test_to_tag() {
        let js = Javascript::from_script("init();");
        assert_eq!(
            js.to_tag(),
            "<script language=\"Javascript\" type=\"text/javascript\">\ninit();\n</script>"
        );
    }

    #[test]
    fn test_event_attribute() {
        let mut tree = ElementTree::new();
        let js = Javascript::new().call("alert", ["hi"]);
        let id = tree
            .create(Params::new().tag("a").attr("onclick", js).content("x"))
            .unwrap();
        assert_eq!(
            tree.serialize(id).unwrap().as_str(),
            r#"<a onclick="alert('hi'); ">x</a>"#
        );
    }
}
