//! Tree Snapshots
//!
//! Owned, serde-friendly copies of a subtree. A snapshot can be stored or
//! sent elsewhere and restored into any [`ElementTree`].

use serde::{Deserialize, Serialize};

use crate::attributes::{AttrValue, Attributes};
use crate::node::{Content, ContentList, Params};
use crate::sanitize::Text;
use crate::tree::ElementTree;
use crate::{DomResult, NodeId};

/// Recursive copy of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, AttrValue)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<SnapshotContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_closing_tag: Option<bool>,
}

/// Content entry of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotContent {
    Text {
        value: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        sanitized: bool,
    },
    Element(ElementSnapshot),
}

impl ElementTree {
    /// Copy the subtree rooted at `id`
    pub fn snapshot(&self, id: NodeId) -> DomResult<ElementSnapshot> {
        let node = self.node(id)?;
        let mut content = Vec::with_capacity(node.children.len());
        for child in &node.children {
            content.push(match child {
                Content::Node(child) => SnapshotContent::Element(self.snapshot(*child)?),
                Content::Text(text) => SnapshotContent::Text {
                    value: text.as_str().to_string(),
                    sanitized: text.is_sanitized(),
                },
            });
        }
        Ok(ElementSnapshot {
            tag: node.tag.clone(),
            attributes: node.attrs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            content,
            force_closing_tag: node.force_closing_tag,
        })
    }

    /// Create a detached subtree equivalent to `snapshot`
    pub fn restore(&mut self, snapshot: &ElementSnapshot) -> DomResult<NodeId> {
        let mut content = ContentList::new();
        for entry in &snapshot.content {
            match entry {
                SnapshotContent::Element(child) => content.push(self.restore(child)?),
                SnapshotContent::Text { value, sanitized: true } => content.push(Text::sanitized(value.as_str())),
                SnapshotContent::Text { value, .. } => content.push(Text::new(value.as_str())),
            }
        }
        let mut params = Params::new()
            .tag(snapshot.tag.as_str())
            .attrs(snapshot.attributes.iter().cloned().collect::<Attributes>())
            .content(content);
        params.force_closing_tag = snapshot.force_closing_tag;
        self.create(params)
    }
}
