//! Element - tagged node of the tree
//!
//! Elements are owned by an [`ElementTree`](crate::ElementTree) arena and
//! addressed by [`NodeId`]. The parent link is a plain id and never owns
//! anything.

use std::fmt;

use crate::attributes::{AttrValue, Attributes};
use crate::sanitize::{SafeString, Text};
use crate::NodeId;

/// Tag used when none is given
pub const DEFAULT_TAG: &str = "div";

/// Grouping wrapper that renders only its children
pub const PSEUDO_TAG: &str = "pseudo";

/// A single child entry
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Node(NodeId),
    Text(Text),
}

impl Content {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(text) => Some(text),
            Self::Node(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

impl From<NodeId> for Content {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Text> for Content {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Self::Text(Text::new(value))
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Self::Text(Text::new(value))
    }
}

impl From<&String> for Content {
    fn from(value: &String) -> Self {
        Self::Text(Text::new(value.as_str()))
    }
}

impl From<SafeString> for Content {
    fn from(value: SafeString) -> Self {
        Self::Text(Text::from(value))
    }
}

impl From<i64> for Content {
    fn from(value: i64) -> Self {
        Self::Text(Text::new(value.to_string()))
    }
}

impl From<i32> for Content {
    fn from(value: i32) -> Self {
        Self::Text(Text::new(value.to_string()))
    }
}

impl From<f64> for Content {
    fn from(value: f64) -> Self {
        Self::Text(Text::new(value.to_string()))
    }
}

impl From<bool> for Content {
    fn from(value: bool) -> Self {
        Self::Text(Text::new(value.to_string()))
    }
}

/// Normalized content sequence
///
/// Empty strings and empty collections collapse to no content, the same
/// as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentList(Vec<Content>);

impl ContentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap entries as-is (no collapsing of empty text)
    pub fn from_entries(entries: Vec<Content>) -> Self {
        Self(entries)
    }

    /// Builder-style append
    pub fn with(mut self, entry: impl Into<Content>) -> Self {
        self.0.push(entry.into());
        self
    }

    pub fn push(&mut self, entry: impl Into<Content>) {
        self.0.push(entry.into());
    }

    /// Append every entry of `other`
    pub fn extend(&mut self, other: impl Into<ContentList>) {
        self.0.extend(other.into().0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Content> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Content> {
        self.0
    }
}

impl From<&str> for ContentList {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::new()
        } else {
            Self(vec![value.into()])
        }
    }
}

impl From<String> for ContentList {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::new()
        } else {
            Self(vec![value.into()])
        }
    }
}

impl From<&String> for ContentList {
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Text> for ContentList {
    fn from(text: Text) -> Self {
        if text.is_empty() {
            Self::new()
        } else {
            Self(vec![Content::Text(text)])
        }
    }
}

impl From<SafeString> for ContentList {
    fn from(value: SafeString) -> Self {
        Self::from(Text::from(value))
    }
}

impl From<NodeId> for ContentList {
    fn from(id: NodeId) -> Self {
        Self(vec![Content::Node(id)])
    }
}

impl From<Content> for ContentList {
    fn from(entry: Content) -> Self {
        match entry {
            Content::Text(text) => Self::from(text),
            node => Self(vec![node]),
        }
    }
}

impl From<i64> for ContentList {
    fn from(value: i64) -> Self {
        Self(vec![value.into()])
    }
}

impl From<f64> for ContentList {
    fn from(value: f64) -> Self {
        Self(vec![value.into()])
    }
}

impl<T: Into<Content>> From<Vec<T>> for ContentList {
    fn from(entries: Vec<T>) -> Self {
        Self(entries.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Content>, const N: usize> From<[T; N]> for ContentList {
    fn from(entries: [T; N]) -> Self {
        Self(entries.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ContentList>> From<Option<T>> for ContentList {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl<T: Into<Content>> FromIterator<T> for ContentList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for ContentList {
    type Item = Content;
    type IntoIter = std::vec::IntoIter<Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Build a [`ContentList`] from mixed nodes and text
///
/// ```rust
/// use weft_dom::{ElementTree, Params, content};
///
/// let mut tree = ElementTree::new();
/// let strong = tree.create(Params::new().tag("strong").content("bold")).unwrap();
/// let p = tree.create(Params::new().tag("p").content(content!["some ", strong, " text"])).unwrap();
/// assert_eq!(tree.serialize(p).unwrap().as_str(), "<p>some <strong>bold</strong> text</p>");
/// ```
#[macro_export]
macro_rules! content {
    () => { $crate::ContentList::new() };
    ($($entry:expr),+ $(,)?) => {
        $crate::ContentList::from_entries(vec![$($crate::Content::from($entry)),+])
    };
}

/// Element stored in the tree
#[derive(Clone)]
pub struct Element {
    pub(crate) gui_id: u64,
    pub(crate) tag: String,
    pub(crate) attrs: Attributes,
    pub(crate) children: Vec<Content>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) force_closing_tag: Option<bool>,
    pub(crate) dirty: bool,
    pub(crate) cache: Option<SafeString>,
    pub(crate) script: Option<ScriptHooks>,
}

/// Client code attached to an element. `initialize` runs before the
/// scripts of the element's descendants, `finalize` after them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ScriptHooks {
    pub(crate) initialize: String,
    pub(crate) finalize: String,
}

impl Element {
    pub(crate) fn new(gui_id: u64, tag: String, attrs: Attributes, force_closing_tag: Option<bool>) -> Self {
        Self {
            gui_id,
            tag,
            attrs,
            children: Vec::new(),
            parent: None,
            force_closing_tag,
            dirty: true,
            cache: None,
            script: None,
        }
    }

    /// Process-wide identity (not the markup `id`)
    pub fn gui_id(&self) -> u64 {
        self.gui_id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    /// Markup `id` attribute
    pub fn dom_id(&self) -> Option<&AttrValue> {
        self.attrs.get("id")
    }

    pub fn children(&self) -> &[Content] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn force_closing_tag(&self) -> Option<bool> {
        self.force_closing_tag
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_pseudo(&self) -> bool {
        self.tag == PSEUDO_TAG
    }

    /// Number of content entries
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when there is no content (attributes are not counted)
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_content(&self) -> bool {
        !self.children.is_empty()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element: <{}>, {:?} {{ {:?} }}", self.tag, self.attrs.entries(), self.children)
    }
}

/// Construction parameters for an element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pub(crate) tag: Option<String>,
    pub(crate) attrs: Attributes,
    pub(crate) content: Option<ContentList>,
    pub(crate) force_closing_tag: Option<bool>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set an attribute.
    ///
    /// The structural names `tag`, `content` and `force_closing_tag` are
    /// routed to their dedicated fields instead of the attribute map.
    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        let value = value.into();
        match name {
            "tag" => self.tag = Some(value.stringify()),
            "content" => self.content = Some(ContentList::from(value.stringify())),
            "force_closing_tag" => self.force_closing_tag = value.as_bool(),
            _ => {
                self.attrs.set(name, value);
            }
        }
        self
    }

    /// Merge a whole attribute map (no structural routing)
    pub fn attrs(mut self, attrs: Attributes) -> Self {
        self.attrs.merge(attrs);
        self
    }

    pub fn id(self, id: impl Into<AttrValue>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<AttrValue>) -> Self {
        self.attr("class", class)
    }

    pub fn content(mut self, content: impl Into<ContentList>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn force_closing_tag(mut self, force: bool) -> Self {
        self.force_closing_tag = Some(force);
        self
    }

    pub fn get_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn get_attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

impl From<Attributes> for Params {
    fn from(attrs: Attributes) -> Self {
        Self::new().attrs(attrs)
    }
}

impl From<&str> for Params {
    fn from(content: &str) -> Self {
        Self::new().content(content)
    }
}

impl From<String> for Params {
    fn from(content: String) -> Self {
        Self::new().content(content)
    }
}

impl From<NodeId> for Params {
    fn from(content: NodeId) -> Self {
        Self::new().content(content)
    }
}

impl From<ContentList> for Params {
    fn from(content: ContentList) -> Self {
        Self::new().content(content)
    }
}

/// Argument of the class shorthand ([`ElementTree::classed`](crate::ElementTree::classed))
#[derive(Debug, Clone)]
pub enum ClassArg {
    /// Replace content
    Content(ContentList),
    /// Merge attributes, replacing content when the params carry some
    Attrs(Params),
}

impl From<&str> for ClassArg {
    fn from(value: &str) -> Self {
        Self::Content(value.into())
    }
}

impl From<String> for ClassArg {
    fn from(value: String) -> Self {
        Self::Content(value.into())
    }
}

impl From<ContentList> for ClassArg {
    fn from(value: ContentList) -> Self {
        Self::Content(value)
    }
}

impl From<NodeId> for ClassArg {
    fn from(value: NodeId) -> Self {
        Self::Content(value.into())
    }
}

impl From<Params> for ClassArg {
    fn from(value: Params) -> Self {
        Self::Attrs(value)
    }
}

impl From<Attributes> for ClassArg {
    fn from(value: Attributes) -> Self {
        Self::Attrs(value.into())
    }
}
