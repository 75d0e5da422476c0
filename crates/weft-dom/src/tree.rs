//! Element Tree (arena-based allocation)
//!
//! Every element lives in a single `Vec` and is addressed by [`NodeId`].
//! Ids are never reused: detached elements stay valid arena entries.

use std::collections::HashSet;

use crate::attributes::{AttrValue, Attributes};
use crate::counters;
use crate::node::{ClassArg, Content, ContentList, DEFAULT_TAG, Element, Params};
use crate::serializer::SerializeOptions;
use crate::{DomError, DomResult, NodeId};

/// Arena owning every element of a document
///
/// The arena only grows. Detaching, replacing or rebuilding an element
/// leaves the old entries allocated, so a long-lived tree whose widgets
/// rebuild often should be dropped and rebuilt from scratch periodically.
#[derive(Debug, Default)]
pub struct ElementTree {
    pub(crate) nodes: Vec<Element>,
    pub(crate) options: SerializeOptions,
    pub(crate) renders: u64,
}

impl ElementTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree with custom serialization options
    pub fn with_options(options: SerializeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Replace serialization options. Every cached rendering is dropped.
    pub fn set_options(&mut self, options: SerializeOptions) {
        self.options = options;
        for node in &mut self.nodes {
            node.dirty = true;
            node.cache = None;
        }
    }

    /// Get an element by ID
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node(&self, id: NodeId) -> DomResult<&Element> {
        self.nodes.get(id.index()).ok_or(DomError::NotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Element> {
        self.nodes.get_mut(id.index()).ok_or(DomError::NotFound(id))
    }

    /// Number of elements in the arena (attached or not)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of serializations recomputed by this tree
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create an element. Node entries of the content are re-parented
    /// under the new element.
    pub fn create(&mut self, params: impl Into<Params>) -> DomResult<NodeId> {
        let Params {
            tag,
            attrs,
            content,
            force_closing_tag,
        } = params.into();
        let content = content.unwrap_or_default();
        self.validate_content(None, &content)?;

        let gui_id = counters::next_element_id();
        let id = NodeId(self.nodes.len() as u32);
        let tag = tag.unwrap_or_else(|| DEFAULT_TAG.to_string());
        tracing::trace!("weft_dom::tree: create {} <{}> (gui id {})", id, tag, gui_id);
        self.nodes.push(Element::new(gui_id, tag, attrs, force_closing_tag));

        let children = self.adopt(id, content);
        self.nodes[id.index()].children = children;
        Ok(id)
    }

    /// Create an element whose content is produced by `provider`.
    ///
    /// The provider runs before the element exists and may create the
    /// child elements itself. Its result overrides any content in `params`.
    pub fn create_with<C, F>(&mut self, params: impl Into<Params>, provider: F) -> DomResult<NodeId>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut ElementTree) -> DomResult<C>,
    {
        let content = provider(self)?.into();
        self.create(params.into().content(content))
    }

    // =========================================================================
    // Parent bookkeeping
    // =========================================================================

    /// Whether `ancestor` is `node` or one of its ancestors
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id.index()).and_then(|n| n.parent);
        }
        false
    }

    /// Check that every node entry exists and can be placed under `parent`
    pub(crate) fn validate_content(&self, parent: Option<NodeId>, content: &ContentList) -> DomResult<()> {
        for id in content.iter().filter_map(Content::as_node) {
            self.node(id)?;
            if let Some(parent) = parent {
                if self.is_ancestor_or_self(id, parent) {
                    return Err(DomError::HierarchyRequest { parent, child: id });
                }
            }
        }
        Ok(())
    }

    /// Re-parent node entries under `parent`, detaching them from any
    /// previous parent. Repeated nodes keep their first position.
    ///
    /// Content must have been validated.
    pub(crate) fn adopt(&mut self, parent: NodeId, content: ContentList) -> Vec<Content> {
        let mut seen = HashSet::new();
        let mut children = Vec::with_capacity(content.len());
        for entry in content {
            if let Content::Node(child) = entry {
                if !seen.insert(child) {
                    continue;
                }
                self.detach(child);
                self.nodes[child.index()].parent = Some(parent);
            }
            children.push(entry);
        }
        children
    }

    /// Remove `child` from its parent's content (the parent is touched)
    pub(crate) fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get_mut(child.index()).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent.index()) {
            node.children.retain(|c| c.as_node() != Some(child));
        }
        self.mark_dirty(parent);
    }

    /// Flag `id` and its ancestors for re-rendering. Propagation stops at
    /// the first ancestor that is already dirty.
    pub(crate) fn mark_dirty(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return;
        };
        node.dirty = true;
        node.cache = None;

        let mut current = node.parent;
        while let Some(parent) = current {
            let node = &mut self.nodes[parent.index()];
            if node.dirty {
                break;
            }
            node.dirty = true;
            node.cache = None;
            current = node.parent;
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn gui_id(&self, id: NodeId) -> Option<u64> {
        self.get(id).map(Element::gui_id)
    }

    pub fn is_dirty(&self, id: NodeId) -> Option<bool> {
        self.get(id).map(Element::is_dirty)
    }

    /// Mark an element (and its ancestors) for re-rendering
    pub fn touch(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        self.mark_dirty(id);
        Ok(())
    }

    // =========================================================================
    // Structural properties
    // =========================================================================

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Element::tag)
    }

    pub fn set_tag(&mut self, id: NodeId, tag: impl Into<String>) -> DomResult<()> {
        self.node_mut(id)?.tag = tag.into();
        self.mark_dirty(id);
        Ok(())
    }

    /// Markup `id` attribute
    pub fn dom_id(&self, id: NodeId) -> Option<&AttrValue> {
        self.get(id).and_then(Element::dom_id)
    }

    pub fn set_dom_id(&mut self, id: NodeId, dom_id: impl Into<AttrValue>) -> DomResult<()> {
        self.set_attr(id, "id", dom_id)
    }

    /// Set the `type` attribute
    pub fn set_type(&mut self, id: NodeId, value: impl Into<AttrValue>) -> DomResult<()> {
        self.set_attr(id, "type", value)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Element::parent)
    }

    pub fn force_closing_tag(&self, id: NodeId) -> Option<bool> {
        self.get(id).and_then(Element::force_closing_tag)
    }

    pub fn set_force_closing_tag(&mut self, id: NodeId, force: Option<bool>) -> DomResult<()> {
        self.node_mut(id)?.force_closing_tag = force;
        self.mark_dirty(id);
        Ok(())
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attributes(&self, id: NodeId) -> Option<&Attributes> {
        self.get(id).map(Element::attributes)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.get(id).and_then(|n| n.attrs.get(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<AttrValue>) -> DomResult<()> {
        self.node_mut(id)?.attrs.set(name, value);
        self.mark_dirty(id);
        Ok(())
    }

    /// Remove an attribute, returning its value
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> DomResult<Option<AttrValue>> {
        let previous = self.node_mut(id)?.attrs.remove(name);
        self.mark_dirty(id);
        Ok(previous)
    }

    /// Class shorthand: set `class` to `class` and replace the content.
    ///
    /// With [`ClassArg::Attrs`] the attributes are merged too, and the
    /// content is only replaced when the params carry some.
    pub fn classed(&mut self, id: NodeId, class: &str, arg: impl Into<ClassArg>) -> DomResult<()> {
        self.node(id)?;
        match arg.into() {
            ClassArg::Content(content) => self.apply_class(id, class, None, Some(content)),
            ClassArg::Attrs(params) => {
                let Params { attrs, content, .. } = params;
                self.apply_class(id, class, Some(attrs), content)
            }
        }
    }

    /// Block form of [`ElementTree::classed`]: content comes from `provider`
    pub fn classed_with<C, F>(
        &mut self,
        id: NodeId,
        class: &str,
        attrs: Option<Attributes>,
        provider: F,
    ) -> DomResult<()>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut ElementTree) -> DomResult<C>,
    {
        self.node(id)?;
        let content = provider(self)?.into();
        self.apply_class(id, class, attrs, Some(content))
    }

    /// Content is validated before anything is written, so a rejected
    /// content list leaves the element untouched.
    fn apply_class(
        &mut self,
        id: NodeId,
        class: &str,
        attrs: Option<Attributes>,
        content: Option<ContentList>,
    ) -> DomResult<()> {
        if let Some(content) = &content {
            self.validate_content(Some(id), content)?;
        }
        {
            let node = self.node_mut(id)?;
            node.attrs.set("class", class);
            if let Some(attrs) = attrs {
                node.attrs.merge(attrs);
            }
        }
        match content {
            Some(content) => self.set_content(id, content),
            None => {
                self.mark_dirty(id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;

    #[test]
    fn test_create_defaults() {
        let mut tree = ElementTree::new();
        let id = tree.create(Params::new()).unwrap();
        assert_eq!(tree.tag(id), Some(DEFAULT_TAG));
        assert_eq!(tree.is_dirty(id), Some(true));
        assert_eq!(tree.parent(id), None);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_gui_ids_are_unique() {
        let mut tree = ElementTree::new();
        let a = tree.create(Params::new()).unwrap();
        let b = tree.create(Params::new()).unwrap();
        assert!(tree.gui_id(b).unwrap() > tree.gui_id(a).unwrap());
    }

    #[test]
    fn test_create_sets_parent() {
        let mut tree = ElementTree::new();
        let child = tree.create(Params::new().tag("span")).unwrap();
        let parent = tree.create(Params::new().content(child)).unwrap();
        assert_eq!(tree.parent(child), Some(parent));
    }

    #[test]
    fn test_create_moves_child_from_old_parent() {
        let mut tree = ElementTree::new();
        let child = tree.create(Params::new().tag("span")).unwrap();
        let first = tree.create(Params::new().content(child)).unwrap();
        let second = tree.create(Params::new().content(child)).unwrap();

        assert_eq!(tree.parent(child), Some(second));
        assert!(tree.get(first).unwrap().is_empty());
    }

    #[test]
    fn test_create_with_unknown_child_fails() {
        let mut tree = ElementTree::new();
        let err = tree.create(Params::new().content(NodeId(42))).unwrap_err();
        assert_eq!(err, DomError::NotFound(NodeId(42)));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_duplicate_child_keeps_first_position() {
        let mut tree = ElementTree::new();
        let child = tree.create(Params::new()).unwrap();
        let parent = tree.create(Params::new().content(content![child, "x", child])).unwrap();
        assert_eq!(tree.get(parent).unwrap().len(), 2);
    }

    #[test]
    fn test_provider_overrides_content() {
        let mut tree = ElementTree::new();
        let id = tree
            .create_with(Params::new().content("ignored"), |tree| {
                tree.create(Params::new().tag("b").content("bold"))
            })
            .unwrap();
        let children = tree.get(id).unwrap().children();
        assert_eq!(children.len(), 1);
        assert!(children[0].is_node());
    }

    #[test]
    fn test_dirty_propagates_to_ancestors() {
        let mut tree = ElementTree::new();
        let leaf = tree.create(Params::new().tag("span")).unwrap();
        let middle = tree.create(Params::new().content(leaf)).unwrap();
        let root = tree.create(Params::new().content(middle)).unwrap();
        tree.serialize(root).unwrap();
        assert_eq!(tree.is_dirty(root), Some(false));
        assert_eq!(tree.is_dirty(leaf), Some(false));

        tree.set_attr(leaf, "title", "t").unwrap();
        assert_eq!(tree.is_dirty(leaf), Some(true));
        assert_eq!(tree.is_dirty(middle), Some(true));
        assert_eq!(tree.is_dirty(root), Some(true));
    }

    #[test]
    fn test_structural_accessors() {
        let mut tree = ElementTree::new();
        let id = tree.create(Params::new().id("box")).unwrap();
        tree.set_tag(id, "section").unwrap();
        tree.set_type(id, "note").unwrap();
        tree.set_force_closing_tag(id, Some(true)).unwrap();

        assert_eq!(tree.tag(id), Some("section"));
        assert_eq!(tree.dom_id(id), Some(&AttrValue::from("box")));
        assert_eq!(tree.attr(id, "type").and_then(AttrValue::as_str), Some("note"));
        assert_eq!(tree.force_closing_tag(id), Some(true));

        tree.set_dom_id(id, "other").unwrap();
        assert_eq!(tree.dom_id(id).and_then(AttrValue::as_str), Some("other"));
    }

    #[test]
    fn test_remove_attr() {
        let mut tree = ElementTree::new();
        let id = tree.create(Params::new().attr("title", "x")).unwrap();
        assert_eq!(tree.remove_attr(id, "title").unwrap(), Some(AttrValue::from("x")));
        assert_eq!(tree.attr(id, "title"), None);
        assert_eq!(tree.remove_attr(id, "title").unwrap(), None);
    }

    #[test]
    fn test_classed_content() {
        let mut tree = ElementTree::new();
        let id = tree.create(Params::new().content("old")).unwrap();
        tree.classed(id, "highlighted", "text").unwrap();
        assert_eq!(tree.serialize(id).unwrap().as_str(), r#"<div class="highlighted">text</div>"#);
    }

    #[test]
    fn test_classed_attrs_without_content_keeps_content() {
        let mut tree = ElementTree::new();
        let id = tree.create(Params::new().content("keep")).unwrap();
        tree.classed(id, "note", Params::new().attr("title", "t")).unwrap();
        assert_eq!(
            tree.serialize(id).unwrap().as_str(),
            r#"<div class="note" title="t">keep</div>"#
        );
    }

    #[test]
    fn test_classed_with_provider() {
        let mut tree = ElementTree::new();
        let id = tree.create(Params::new()).unwrap();
        tree.classed_with(id, "wrap", None, |tree| tree.create(Params::new().tag("hr")))
            .unwrap();
        assert_eq!(tree.serialize(id).unwrap().as_str(), r#"<div class="wrap"><hr /></div>"#);
    }

    #[test]
    fn test_classed_with_rejected_content_leaves_node_untouched() {
        let mut tree = ElementTree::new();
        let child = tree.create(Params::new().tag("span").content("x")).unwrap();
        let root = tree.create(child).unwrap();
        let before = tree.serialize(child).unwrap();

        let result = tree.classed_with(child, "hot", None, |_| Ok(root));
        assert_eq!(result, Err(DomError::HierarchyRequest { parent: child, child: root }));
        assert_eq!(tree.attr(child, "class"), None);
        assert_eq!(tree.is_dirty(child), Some(false));
        assert_eq!(tree.serialize(child).unwrap(), before);
    }

    #[test]
    fn test_classed_rejected_content_keeps_attributes() {
        let mut tree = ElementTree::new();
        let child = tree.create(Params::new().tag("em").attr("title", "t").content("y")).unwrap();
        let root = tree.create(child).unwrap();

        let params = Params::new().attr("title", "changed").content(root);
        assert!(tree.classed(child, "hot", params).is_err());
        assert!(tree.classed(child, "hot", root).is_err());
        assert_eq!(tree.attr(child, "class"), None);
        assert_eq!(tree.attr(child, "title"), Some(&AttrValue::from("t")));
        assert_eq!(tree.serialize(root).unwrap().as_str(), r#"<div><em title="t">y</em></div>"#);
    }

    #[test]
    fn test_unknown_node_errors() {
        let mut tree = ElementTree::new();
        assert_eq!(tree.set_attr(NodeId(3), "a", 1), Err(DomError::NotFound(NodeId(3))));
        assert_eq!(tree.tag(NodeId(3)), None);
        assert!(tree.touch(NodeId(3)).is_err());
    }
}
