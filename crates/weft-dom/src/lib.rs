//! Weft DOM - Element tree model
//!
//! Arena-backed element tree with dirty tracking, cached serialization
//! and a widget layer that lazily builds and rebuilds elements.
//!
//! # Example
//! ```rust
//! use weft_dom::{ElementTree, Params, content};
//!
//! let mut tree = ElementTree::new();
//! let first = tree.create(Params::new().tag("li").class("first").content("foo")).unwrap();
//! let second = tree.create(Params::new().tag("li").class("second").content("bar")).unwrap();
//! let list = tree.create(Params::new().tag("ul").id("list").content(content![first, second])).unwrap();
//! let root = tree.create(Params::new().content(list)).unwrap();
//!
//! assert_eq!(
//!     tree.serialize(root).unwrap().as_str(),
//!     r#"<div><ul id="list"><li class="first">foo</li><li class="second">bar</li></ul></div>"#
//! );
//! ```
//!
//! # Threading
//! An [`ElementTree`] has a single writer. It can be moved between threads,
//! but concurrent mutation needs external synchronization (one tree per
//! request or session).

mod attributes;
mod classlist;
mod counters;
mod node;
mod operations;
mod sanitize;
mod serializer;
mod snapshot;
mod tree;
mod widget;

pub use attributes::{AttrValue, Attributes};
pub use classlist::ClassList;
pub use counters::{element_count, render_count};
pub use node::{ClassArg, Content, ContentList, DEFAULT_TAG, Element, PSEUDO_TAG, Params};
pub use operations::Key;
pub use sanitize::{SafeString, Text, escape_html};
pub use serializer::{DEFAULT_VOID_TAGS, SerializeOptions};
pub use snapshot::{ElementSnapshot, SnapshotContent};
pub use tree::ElementTree;
pub use widget::{Component, Property, PropertyMode, Widget};

use std::fmt;

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena slot of this node
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result type for tree operations
pub type DomResult<T> = Result<T, DomError>;

/// Tree operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Hierarchy request error: {child} cannot be placed inside {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Missing method #element for {type_name}")]
    MissingOverride { type_name: &'static str },
}
