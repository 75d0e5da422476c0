//! Markup Serialization
//!
//! Renders an element and its descendants to markup text. Output is cached
//! per element and reused until the element (or a descendant) is touched.
//!
//! Rules:
//! - void tags always render as `<tag attrs />`
//! - other tags self-close only when empty and not forced open
//! - `pseudo` elements render their children only
//! - attribute values are rendered raw with `"` escaped as `\"`

use crate::attributes::{AttrValue, Attributes};
use crate::counters;
use crate::node::Content;
use crate::sanitize::{SafeString, escape_html};
use crate::tree::ElementTree;
use crate::{DomResult, NodeId};

/// Tags that never enclose content
pub const DEFAULT_VOID_TAGS: &[&str] = &["br", "hr", "input"];

/// Serialization options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Tags that always render self-closing
    pub void_tags: Vec<String>,
    /// Escape text content that is not flagged as sanitized
    pub escape_text: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            void_tags: DEFAULT_VOID_TAGS.iter().map(|t| t.to_string()).collect(),
            escape_text: false,
        }
    }
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn void_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.void_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn escape_text(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    pub fn is_void(&self, tag: &str) -> bool {
        self.void_tags.iter().any(|t| t == tag)
    }
}

impl ElementTree {
    /// Render an element to markup.
    ///
    /// A clean element returns its cached string; otherwise the markup is
    /// recomputed, cached and the element is marked clean.
    pub fn serialize(&mut self, id: NodeId) -> DomResult<SafeString> {
        self.node(id)?;
        Ok(SafeString::new(self.render(id)))
    }

    fn render(&mut self, id: NodeId) -> String {
        let node = &self.nodes[id.index()];
        if !node.dirty {
            if let Some(cached) = &node.cache {
                return cached.as_str().to_string();
            }
        }

        let children = node.children.clone();
        let mut body = String::new();
        for child in &children {
            match child {
                Content::Node(child) => body.push_str(&self.render(*child)),
                Content::Text(text) if self.options.escape_text && !text.is_sanitized() => {
                    body.push_str(&escape_html(text.as_str()))
                }
                Content::Text(text) => body.push_str(text.as_str()),
            }
        }

        let node = &self.nodes[id.index()];
        let output = if node.is_pseudo() {
            body
        } else {
            let attrs = attribute_string(&node.attrs);
            let self_closing = self.options.is_void(&node.tag)
                || (children.is_empty() && node.force_closing_tag != Some(true));
            if self_closing {
                format!("<{}{} />", node.tag, attrs)
            } else {
                format!("<{tag}{attrs}>{body}</{tag}>", tag = node.tag)
            }
        };

        tracing::trace!("weft_dom::serializer: rendered {} ({} bytes)", id, output.len());
        counters::record_render();
        self.renders += 1;

        let node = &mut self.nodes[id.index()];
        node.dirty = false;
        node.cache = Some(SafeString::new(output.clone()));
        output
    }
}

/// Render attributes as ` name="value"` fragments in insertion order
fn attribute_string(attrs: &Attributes) -> String {
    let mut output = String::new();
    for (name, value) in attrs.iter() {
        let value = match value {
            AttrValue::Null | AttrValue::Bool(false) => continue,
            AttrValue::Bool(true) => name.to_string(),
            other => other.stringify(),
        };
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&value.replace('"', "\\\""));
        output.push('"');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::node::Params;
    use crate::sanitize::Text;

    fn render(params: Params) -> String {
        let mut tree = ElementTree::new();
        let id = tree.create(params).unwrap();
        tree.serialize(id).unwrap().into_string()
    }

    #[test]
    fn test_void_tags() {
        assert_eq!(render(Params::new().tag("br")), "<br />");
        assert_eq!(render(Params::new().tag("hr").force_closing_tag(true)), "<hr />");
        assert_eq!(
            render(Params::new().tag("input").attr("type", "text").content("ignored")),
            r#"<input type="text" />"#
        );
    }

    #[test]
    fn test_closing_tag_policy() {
        assert_eq!(render(Params::new().tag("p").content("x")), "<p>x</p>");
        assert_eq!(render(Params::new().tag("p")), "<p />");
        assert_eq!(render(Params::new().tag("p").force_closing_tag(false)), "<p />");
        assert_eq!(render(Params::new().tag("p").force_closing_tag(true)), "<p></p>");
    }

    #[test]
    fn test_attribute_formatting() {
        let params = Params::new()
            .attr("onclick", r#"alert("hi");"#)
            .attr("class", vec!["a", "", "b"])
            .attr("checked", true)
            .attr("disabled", false)
            .attr("title", None::<&str>)
            .attr("value", "")
            .attr("size", 3);
        assert_eq!(
            render(params),
            r#"<div onclick="alert(\"hi\");" class="a b" checked="checked" value="" size="3" />"#
        );
    }

    #[test]
    fn test_pseudo_renders_children_only() {
        let mut tree = ElementTree::new();
        let a = tree.create(Params::new().tag("b").content("1")).unwrap();
        let b = tree.create(Params::new().tag("i").content("2")).unwrap();
        let group = tree.create(Params::new().tag("pseudo").content(content![a, b])).unwrap();
        assert_eq!(tree.serialize(group).unwrap().as_str(), "<b>1</b><i>2</i>");
    }

    #[test]
    fn test_cache_hit_does_not_count() {
        let mut tree = ElementTree::new();
        let child = tree.create(Params::new().tag("span").content("x")).unwrap();
        let root = tree.create(Params::new().content(child)).unwrap();

        let first = tree.serialize(root).unwrap();
        let renders = tree.render_count();
        assert_eq!(renders, 2);

        let second = tree.serialize(root).unwrap();
        assert_eq!(first, second);
        assert_eq!(tree.render_count(), renders);
    }

    #[test]
    fn test_mutation_invalidates_only_the_path() {
        let mut tree = ElementTree::new();
        let left = tree.create(Params::new().tag("span").content("l")).unwrap();
        let right = tree.create(Params::new().tag("span").content("r")).unwrap();
        let root = tree.create(Params::new().content(content![left, right])).unwrap();
        tree.serialize(root).unwrap();
        let renders = tree.render_count();

        tree.set_content(left, "L").unwrap();
        assert_eq!(
            tree.serialize(root).unwrap().as_str(),
            "<div><span>L</span><span>r</span></div>"
        );
        assert_eq!(tree.render_count(), renders + 2);
    }

    #[test]
    fn test_text_is_verbatim_by_default() {
        assert_eq!(render(Params::new().content("<b>")), "<div><b></div>");
    }

    #[test]
    fn test_escape_text_option() {
        let mut tree = ElementTree::with_options(SerializeOptions::new().escape_text(true));
        let id = tree
            .create(Params::new().content(content!["a < b ", Text::sanitized("<br />")]))
            .unwrap();
        assert_eq!(tree.serialize(id).unwrap().as_str(), "<div>a &lt; b <br /></div>");
    }

    #[test]
    fn test_set_options_invalidates_cache() {
        let mut tree = ElementTree::new();
        let id = tree.create(Params::new().tag("img")).unwrap();
        assert_eq!(tree.serialize(id).unwrap().as_str(), "<img />");

        tree.set_options(SerializeOptions::new().void_tags(["img"]));
        tree.set_force_closing_tag(id, Some(true)).unwrap();
        assert_eq!(tree.serialize(id).unwrap().as_str(), "<img />");

        tree.set_options(SerializeOptions::new());
        assert_eq!(tree.serialize(id).unwrap().as_str(), "<img></img>");
    }

    #[test]
    fn test_unknown_node() {
        let mut tree = ElementTree::new();
        assert!(tree.serialize(NodeId(0)).is_err());
    }
}
