//! Element Operations
//!
//! Content mutation, lookup, swap/replace, CSS class helpers and
//! traversal on top of [`ElementTree`].

use crate::classlist::ClassList;
use crate::node::{Content, ContentList, Element, ScriptHooks};
use crate::tree::ElementTree;
use crate::{DomError, DomResult, NodeId};

/// Lookup key for [`ElementTree::at`] and [`ElementTree::replace_at`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Positional child access
    Index(usize),
    /// Depth-first search for a descendant with this `id` attribute
    Id(String),
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Key {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for Key {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl ElementTree {
    // =========================================================================
    // Content
    // =========================================================================

    /// Content entries of an element (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[Content] {
        self.get(id).map(Element::children).unwrap_or_default()
    }

    /// Number of content entries
    pub fn len(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// True when the element has no content. Attributes are not counted.
    pub fn is_empty(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    pub fn has_content(&self, id: NodeId) -> bool {
        !self.is_empty(id)
    }

    /// Append content at the end
    pub fn append(&mut self, id: NodeId, content: impl Into<ContentList>) -> DomResult<()> {
        let content = content.into();
        self.node(id)?;
        self.validate_content(Some(id), &content)?;
        let entries = self.adopt(id, content);
        self.nodes[id.index()].children.extend(entries);
        self.mark_dirty(id);
        Ok(())
    }

    /// Insert content before the first entry
    pub fn prepend(&mut self, id: NodeId, content: impl Into<ContentList>) -> DomResult<()> {
        let content = content.into();
        self.node(id)?;
        self.validate_content(Some(id), &content)?;
        let entries = self.adopt(id, content);
        self.nodes[id.index()].children.splice(0..0, entries);
        self.mark_dirty(id);
        Ok(())
    }

    /// Replace all content. Previous child elements become detached.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<ContentList>) -> DomResult<()> {
        let content = content.into();
        self.node(id)?;
        self.validate_content(Some(id), &content)?;
        let entries = self.adopt(id, content);
        let previous = std::mem::replace(&mut self.nodes[id.index()].children, entries);
        for child in previous.iter().filter_map(Content::as_node) {
            self.nodes[child.index()].parent = None;
        }
        self.mark_dirty(id);
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Child at a position, or the descendant element with a given `id`
    pub fn at(&self, id: NodeId, key: impl Into<Key>) -> Option<Content> {
        match key.into() {
            Key::Index(index) => self.children(id).get(index).cloned(),
            Key::Id(dom_id) => self.find_by_dom_id(id, &dom_id).map(Content::Node),
        }
    }

    /// First descendant (pre-order) whose `id` attribute equals `dom_id`
    pub fn find_by_dom_id(&self, id: NodeId, dom_id: &str) -> Option<NodeId> {
        self.descendants(id).into_iter().find(|&node| {
            self.nodes[node.index()]
                .dom_id()
                .is_some_and(|value| value.stringify() == dom_id)
        })
    }

    // =========================================================================
    // Replacement
    // =========================================================================

    /// Make `target` a copy of `other`.
    ///
    /// `target` takes over the tag, attributes and content of `other` but
    /// keeps its own `id` attribute. Child elements of `other` move under
    /// `target`, so `other` is left with its tag and attributes only.
    pub fn swap(&mut self, target: NodeId, other: NodeId) -> DomResult<()> {
        self.node(target)?;
        self.node(other)?;
        if target == other {
            return Ok(());
        }
        if self.is_ancestor_or_self(other, target) {
            return Err(DomError::HierarchyRequest {
                parent: target,
                child: other,
            });
        }

        let (tag, mut attrs, children) = {
            let source = &mut self.nodes[other.index()];
            (source.tag.clone(), source.attrs.clone(), std::mem::take(&mut source.children))
        };
        match self.nodes[target.index()].attrs.get("id").cloned() {
            Some(own_id) => {
                attrs.set("id", own_id);
            }
            None => {
                attrs.remove("id");
            }
        }

        let previous = std::mem::take(&mut self.nodes[target.index()].children);
        for child in previous.iter().filter_map(Content::as_node) {
            self.nodes[child.index()].parent = None;
        }
        for child in children.iter().filter_map(Content::as_node) {
            self.nodes[child.index()].parent = Some(target);
        }

        let node = &mut self.nodes[target.index()];
        tracing::trace!("weft_dom::operations: swap {} with {} <{}>", target, other, tag);
        node.tag = tag;
        node.attrs = attrs;
        node.children = children;

        self.mark_dirty(other);
        self.mark_dirty(target);
        Ok(())
    }

    /// Put `node` at `key`.
    ///
    /// An element entry is swapped with `node` (its identity is kept); a
    /// text entry is replaced by `node` itself. Returns `false` when
    /// nothing exists at `key`.
    pub fn replace_at(&mut self, id: NodeId, key: impl Into<Key>, node: NodeId) -> DomResult<bool> {
        self.node(id)?;
        self.node(node)?;
        match key.into() {
            Key::Id(dom_id) => match self.find_by_dom_id(id, &dom_id) {
                Some(found) => self.swap(found, node).map(|_| true),
                None => Ok(false),
            },
            Key::Index(index) => match self.children(id).get(index).cloned() {
                None => Ok(false),
                Some(Content::Node(child)) => self.swap(child, node).map(|_| true),
                Some(Content::Text(_)) => {
                    self.replace_text_entry(id, index, node)?;
                    Ok(true)
                }
            },
        }
    }

    fn replace_text_entry(&mut self, id: NodeId, mut index: usize, node: NodeId) -> DomResult<()> {
        if self.is_ancestor_or_self(node, id) {
            return Err(DomError::HierarchyRequest { parent: id, child: node });
        }
        if self.nodes[node.index()].parent == Some(id) {
            let children = &mut self.nodes[id.index()].children;
            if let Some(position) = children.iter().position(|c| c.as_node() == Some(node)) {
                children.remove(position);
                if position < index {
                    index -= 1;
                }
            }
            self.nodes[node.index()].parent = None;
        } else {
            self.detach(node);
        }
        self.nodes[id.index()].children[index] = Content::Node(node);
        self.nodes[node.index()].parent = Some(id);
        self.mark_dirty(id);
        Ok(())
    }

    // =========================================================================
    // CSS classes
    // =========================================================================

    /// Normalized class tokens of an element
    pub fn css_classes(&self, id: NodeId) -> ClassList {
        self.get(id).map(|n| n.attrs.css_classes()).unwrap_or_default()
    }

    pub fn add_class(&mut self, id: NodeId, names: &[&str]) -> DomResult<()> {
        self.node_mut(id)?.attrs.add_class(names);
        self.mark_dirty(id);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, name: &str) -> DomResult<()> {
        self.node_mut(id)?.attrs.remove_class(name);
        self.mark_dirty(id);
        Ok(())
    }

    // =========================================================================
    // Scripts
    // =========================================================================

    /// Attach client code to `id`. Two empty strings detach it.
    pub fn set_script(
        &mut self,
        id: NodeId,
        initialize: impl Into<String>,
        finalize: impl Into<String>,
    ) -> DomResult<()> {
        let (initialize, finalize) = (initialize.into(), finalize.into());
        let node = self.node_mut(id)?;
        node.script = if initialize.is_empty() && finalize.is_empty() {
            None
        } else {
            Some(ScriptHooks { initialize, finalize })
        };
        Ok(())
    }

    /// Client code of `id` and everything below it: the element's own
    /// `initialize`, then its children's scripts in document order, then its
    /// own `finalize`. Unknown ids yield an empty string.
    pub fn script(&self, id: NodeId) -> String {
        let mut output = String::new();
        self.collect_script(id, &mut output);
        output
    }

    fn collect_script(&self, id: NodeId, output: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        if let Some(hooks) = &node.script {
            output.push_str(&hooks.initialize);
        }
        for child in node.children.iter().filter_map(Content::as_node) {
            self.collect_script(child, output);
        }
        if let Some(hooks) = &node.script {
            output.push_str(&hooks.finalize);
        }
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Visit every descendant element depth-first, parents before their
    /// children. Text entries are skipped.
    pub fn recurse<F>(&self, id: NodeId, mut visitor: F)
    where
        F: FnMut(NodeId, &Element),
    {
        for node in self.descendants(id) {
            visitor(node, &self.nodes[node.index()]);
        }
    }

    /// Descendant elements in pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self
            .children(id)
            .iter()
            .rev()
            .filter_map(Content::as_node)
            .collect();
        while let Some(node) = stack.pop() {
            result.push(node);
            stack.extend(self.children(node).iter().rev().filter_map(Content::as_node));
        }
        result
    }
}
