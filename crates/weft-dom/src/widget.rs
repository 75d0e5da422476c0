//! Widgets
//!
//! A widget wraps a [`Component`] that knows how to build an element from
//! its own state. The element is built lazily on first access and rebuilt
//! in place (same [`NodeId`], same `id` attribute) after the component
//! changes.

use std::fmt;

use crate::attributes::AttrValue;
use crate::classlist::ClassList;
use crate::node::Content;
use crate::operations::Key;
use crate::sanitize::SafeString;
use crate::tree::ElementTree;
use crate::{DomError, DomResult, NodeId};

/// Element construction logic of a widget
pub trait Component {
    /// Build a fresh element from the current state
    fn element(&self, _tree: &mut ElementTree) -> DomResult<NodeId> {
        Err(DomError::MissingOverride {
            type_name: std::any::type_name::<Self>(),
        })
    }

    /// Script code initializing the widget on the client. Runs before the
    /// scripts of nested widgets.
    fn js_initialize(&self) -> String {
        String::new()
    }

    /// Script code run after the scripts of nested widgets
    fn js_finalize(&self) -> String {
        String::new()
    }
}

/// What assigning an element property does to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyMode {
    /// Mark dirty; the rebuild happens on next access
    #[default]
    Touch,
    /// Rebuild immediately
    Rebuild,
}

/// Component field that affects the built element
pub struct Property<C, T> {
    name: &'static str,
    field: fn(&mut C) -> &mut T,
    mode: PropertyMode,
}

impl<C, T> Property<C, T> {
    pub const fn new(name: &'static str, field: fn(&mut C) -> &mut T, mode: PropertyMode) -> Self {
        Self { name, field, mode }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn mode(&self) -> PropertyMode {
        self.mode
    }
}

impl<C, T> fmt::Debug for Property<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Lazily built, rebuildable element
#[derive(Debug)]
pub struct Widget<C> {
    component: C,
    node: Option<NodeId>,
    dirty: bool,
    build_count: u64,
}

impl<C: Component> Widget<C> {
    pub fn new(component: C) -> Self {
        Self {
            component,
            node: None,
            dirty: false,
            build_count: 0,
        }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    /// Raw access to the component. The widget is not touched.
    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    pub fn into_component(self) -> C {
        self.component
    }

    /// Assign an element property
    pub fn set<T>(&mut self, tree: &mut ElementTree, property: &Property<C, T>, value: T) -> DomResult<()> {
        *(property.field)(&mut self.component) = value;
        tracing::trace!("weft_dom::widget: set {} ({:?})", property.name, property.mode);
        match property.mode {
            PropertyMode::Touch => self.touch(),
            PropertyMode::Rebuild => {
                if self.node.is_some() {
                    self.rebuild(tree)?;
                }
            }
        }
        Ok(())
    }

    /// Mark the widget for rebuild on next access
    pub fn touch(&mut self) {
        if self.node.is_some() {
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_built(&self) -> bool {
        self.node.is_some()
    }

    /// Number of rebuilds after the initial build
    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    /// Backing element, building or rebuilding it when needed
    pub fn node(&mut self, tree: &mut ElementTree) -> DomResult<NodeId> {
        match self.node {
            Some(id) if !self.dirty => Ok(id),
            Some(_) => self.rebuild(tree),
            None => {
                let id = self.component.element(tree)?;
                tree.set_script(id, self.component.js_initialize(), self.component.js_finalize())?;
                tracing::debug!("weft_dom::widget: built {}", id);
                self.node = Some(id);
                Ok(id)
            }
        }
    }

    /// Rebuild the element from current state and swap it into the
    /// backing element.
    ///
    /// Each rebuild allocates a fresh subtree in `tree`. The husk of the
    /// fresh root and the previous children stay in the arena, detached.
    pub fn rebuild(&mut self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let Some(id) = self.node else {
            return self.node(tree);
        };
        let fresh = self.component.element(tree)?;
        tree.swap(id, fresh)?;
        tree.set_script(id, self.component.js_initialize(), self.component.js_finalize())?;
        self.build_count += 1;
        self.dirty = false;
        tracing::debug!("weft_dom::widget: rebuilt {} ({} builds)", id, self.build_count);
        Ok(id)
    }

    pub fn serialize(&mut self, tree: &mut ElementTree) -> DomResult<SafeString> {
        let id = self.node(tree)?;
        tree.serialize(id)
    }

    /// Client code of the widget and of every widget built into its
    /// element, in document order
    pub fn script(&mut self, tree: &mut ElementTree) -> DomResult<String> {
        let id = self.node(tree)?;
        Ok(tree.script(id))
    }

    // =========================================================================
    // Forwarded element access
    // =========================================================================

    pub fn tag(&mut self, tree: &mut ElementTree) -> DomResult<String> {
        let id = self.node(tree)?;
        Ok(tree.tag(id).unwrap_or_default().to_string())
    }

    pub fn attr(&mut self, tree: &mut ElementTree, name: &str) -> DomResult<Option<AttrValue>> {
        let id = self.node(tree)?;
        Ok(tree.attr(id, name).cloned())
    }

    pub fn set_attr(&mut self, tree: &mut ElementTree, name: &str, value: impl Into<AttrValue>) -> DomResult<()> {
        let id = self.node(tree)?;
        tree.set_attr(id, name, value)
    }

    pub fn dom_id(&mut self, tree: &mut ElementTree) -> DomResult<Option<AttrValue>> {
        let id = self.node(tree)?;
        Ok(tree.dom_id(id).cloned())
    }

    pub fn css_classes(&mut self, tree: &mut ElementTree) -> DomResult<ClassList> {
        let id = self.node(tree)?;
        Ok(tree.css_classes(id))
    }

    pub fn add_class(&mut self, tree: &mut ElementTree, names: &[&str]) -> DomResult<()> {
        let id = self.node(tree)?;
        tree.add_class(id, names)
    }

    pub fn remove_class(&mut self, tree: &mut ElementTree, name: &str) -> DomResult<()> {
        let id = self.node(tree)?;
        tree.remove_class(id, name)
    }

    pub fn children(&mut self, tree: &mut ElementTree) -> DomResult<Vec<Content>> {
        let id = self.node(tree)?;
        Ok(tree.children(id).to_vec())
    }

    pub fn len(&mut self, tree: &mut ElementTree) -> DomResult<usize> {
        let id = self.node(tree)?;
        Ok(tree.len(id))
    }

    pub fn is_empty(&mut self, tree: &mut ElementTree) -> DomResult<bool> {
        let id = self.node(tree)?;
        Ok(tree.is_empty(id))
    }

    pub fn at(&mut self, tree: &mut ElementTree, key: impl Into<Key>) -> DomResult<Option<Content>> {
        let id = self.node(tree)?;
        Ok(tree.at(id, key))
    }

    pub fn find_by_dom_id(&mut self, tree: &mut ElementTree, dom_id: &str) -> DomResult<Option<NodeId>> {
        let id = self.node(tree)?;
        Ok(tree.find_by_dom_id(id, dom_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Params;

    struct BoxWidget {
        content: String,
    }

    impl BoxWidget {
        const CONTENT: Property<BoxWidget, String> =
            Property::new("content", BoxWidget::content_mut, PropertyMode::Touch);
        const CONTENT_NOW: Property<BoxWidget, String> =
            Property::new("content", BoxWidget::content_mut, PropertyMode::Rebuild);

        fn content_mut(&mut self) -> &mut String {
            &mut self.content
        }
    }

    impl Component for BoxWidget {
        fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
            tree.create(Params::new().class("box").content(self.content.as_str()))
        }

        fn js_initialize(&self) -> String {
            "Box.init();".to_string()
        }
    }

    struct Unfinished;

    impl Component for Unfinished {}

    struct Panel {
        body: Option<NodeId>,
    }

    impl Component for Panel {
        fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
            tree.create(Params::new().class("panel").content(self.body))
        }

        fn js_initialize(&self) -> String {
            "Panel.open();".to_string()
        }

        fn js_finalize(&self) -> String {
            "Panel.ready();".to_string()
        }
    }

    fn boxed(content: &str) -> Widget<BoxWidget> {
        Widget::new(BoxWidget {
            content: content.to_string(),
        })
    }

    #[test]
    fn test_lazy_initial_build() {
        let mut tree = ElementTree::new();
        let mut widget = boxed("hello");
        assert!(!widget.is_built());
        assert_eq!(tree.node_count(), 0);

        assert_eq!(
            widget.serialize(&mut tree).unwrap().as_str(),
            r#"<div class="box">hello</div>"#
        );
        assert!(widget.is_built());
        assert_eq!(widget.build_count(), 0);
    }

    #[test]
    fn test_touch_property_rebuilds_on_access() {
        let mut tree = ElementTree::new();
        let mut widget = boxed("hello");
        let id = widget.node(&mut tree).unwrap();

        widget.set(&mut tree, &BoxWidget::CONTENT, "changed".to_string()).unwrap();
        assert!(widget.is_dirty());
        assert_eq!(widget.build_count(), 0);

        assert_eq!(
            widget.serialize(&mut tree).unwrap().as_str(),
            r#"<div class="box">changed</div>"#
        );
        assert_eq!(widget.build_count(), 1);
        assert_eq!(widget.node(&mut tree).unwrap(), id);

        widget.serialize(&mut tree).unwrap();
        assert_eq!(widget.build_count(), 1);
    }

    #[test]
    fn test_rebuild_property_rebuilds_immediately() {
        let mut tree = ElementTree::new();
        let mut widget = boxed("a");
        widget.node(&mut tree).unwrap();
        widget.set(&mut tree, &BoxWidget::CONTENT_NOW, "b".to_string()).unwrap();
        assert_eq!(widget.build_count(), 1);
        assert!(!widget.is_dirty());
    }

    #[test]
    fn test_rebuild_grows_arena_by_one_build() {
        let mut tree = ElementTree::new();
        let mut widget = boxed("a");
        let id = widget.node(&mut tree).unwrap();
        let after_build = tree.node_count();

        widget.rebuild(&mut tree).unwrap();
        widget.rebuild(&mut tree).unwrap();
        assert_eq!(tree.node_count(), after_build * 3);
        assert_eq!(widget.node(&mut tree).unwrap(), id);
        assert_eq!(tree.parent(id), None);
    }

    #[test]
    fn test_rebuild_keeps_dom_id() {
        let mut tree = ElementTree::new();
        let mut widget = boxed("a");
        widget.set_attr(&mut tree, "id", "my_box").unwrap();
        widget.component_mut().content = "b".to_string();
        widget.rebuild(&mut tree).unwrap();
        assert_eq!(
            widget.serialize(&mut tree).unwrap().as_str(),
            r#"<div class="box" id="my_box">b</div>"#
        );
    }

    #[test]
    fn test_rebuild_reaches_parent() {
        let mut tree = ElementTree::new();
        let mut widget = boxed("a");
        let id = widget.node(&mut tree).unwrap();
        let page = tree.create(Params::new().tag("body").content(id)).unwrap();
        tree.serialize(page).unwrap();

        widget.set(&mut tree, &BoxWidget::CONTENT_NOW, "b".to_string()).unwrap();
        assert_eq!(
            tree.serialize(page).unwrap().as_str(),
            r#"<body><div class="box">b</div></body>"#
        );
    }

    #[test]
    fn test_forwarded_reads() {
        let mut tree = ElementTree::new();
        let mut widget = boxed("a");
        assert_eq!(widget.tag(&mut tree).unwrap(), "div");
        assert!(widget.css_classes(&mut tree).unwrap().contains("box"));
        assert_eq!(widget.len(&mut tree).unwrap(), 1);
        assert_eq!(widget.script(&mut tree).unwrap(), "Box.init();");
    }

    #[test]
    fn test_missing_element_override() {
        let mut tree = ElementTree::new();
        let mut widget = Widget::new(Unfinished);
        let err = widget.node(&mut tree).unwrap_err();
        assert!(err.to_string().starts_with("Missing method #element for "));
        assert!(err.to_string().ends_with("Unfinished"));
        assert_eq!(widget.script(&mut tree), Err(err));
    }

    #[test]
    fn test_script_collects_nested_widgets() {
        let mut tree = ElementTree::new();
        let mut inner = boxed("a");
        let body = inner.node(&mut tree).unwrap();
        let mut outer = Widget::new(Panel { body: Some(body) });

        let expected = "Panel.open();Box.init();Panel.ready();";
        assert_eq!(outer.script(&mut tree).unwrap(), expected);
        assert_eq!(inner.script(&mut tree).unwrap(), "Box.init();");

        outer.rebuild(&mut tree).unwrap();
        assert_eq!(outer.script(&mut tree).unwrap(), expected);
        assert_eq!(
            outer.serialize(&mut tree).unwrap().as_str(),
            r#"<div class="panel"><div class="box">a</div></div>"#
        );
    }

    #[test]
    fn test_script_follows_component_state() {
        let mut tree = ElementTree::new();
        let mut panel = Widget::new(Panel { body: None });
        assert_eq!(panel.script(&mut tree).unwrap(), "Panel.open();Panel.ready();");

        let mut inner = boxed("b");
        let body = inner.node(&mut tree).unwrap();
        panel.component_mut().body = Some(body);
        panel.touch();
        assert_eq!(panel.script(&mut tree).unwrap(), "Panel.open();Box.init();Panel.ready();");
    }
}
