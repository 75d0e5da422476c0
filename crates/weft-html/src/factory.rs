//! HTML Tag Factory
//!
//! Shorthand constructors for common XHTML elements on top of an
//! [`ElementTree`].

use weft_dom::{AttrValue, Content, ContentList, DomResult, ElementTree, NodeId, PSEUDO_TAG, Params};

/// Tag factory borrowing a tree
#[derive(Debug)]
pub struct Html<'t> {
    tree: &'t mut ElementTree,
}

macro_rules! tag_helpers {
    ($($tag:ident, $with:ident;)*) => {
        impl<'t> Html<'t> {
            $(
                #[doc = concat!("Create a `", stringify!($tag), "` element")]
                pub fn $tag(&mut self, params: impl Into<Params>) -> DomResult<NodeId> {
                    self.element(stringify!($tag), params)
                }

                #[doc = concat!("Create a `", stringify!($tag), "` element with content from `provider`")]
                pub fn $with<C, F>(&mut self, params: impl Into<Params>, provider: F) -> DomResult<NodeId>
                where
                    C: Into<ContentList>,
                    F: FnOnce(&mut Html<'t>) -> DomResult<C>,
                {
                    self.element_with(stringify!($tag), params, provider)
                }
            )*
        }
    };
}

tag_helpers! {
    html, html_with;
    title, title_with;
    link, link_with;
    div, div_with;
    p, p_with;
    span, span_with;
    a, a_with;
    ul, ul_with;
    ol, ol_with;
    li, li_with;
    h1, h1_with;
    h2, h2_with;
    h3, h3_with;
    h4, h4_with;
    img, img_with;
    input, input_with;
    select, select_with;
    option, option_with;
    form, form_with;
    fieldset, fieldset_with;
    legend, legend_with;
    button, button_with;
    label, label_with;
    table, table_with;
    tr, tr_with;
    th, th_with;
    td, td_with;
    textarea, textarea_with;
}

impl<'t> Html<'t> {
    pub fn new(tree: &'t mut ElementTree) -> Self {
        Self { tree }
    }

    /// Underlying tree
    pub fn tree(&mut self) -> &mut ElementTree {
        self.tree
    }

    /// Create an element with an arbitrary tag
    pub fn element(&mut self, tag: &str, params: impl Into<Params>) -> DomResult<NodeId> {
        self.tree.create(params.into().tag(tag))
    }

    /// Create an element with an arbitrary tag and content from `provider`
    pub fn element_with<C, F>(&mut self, tag: &str, params: impl Into<Params>, provider: F) -> DomResult<NodeId>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut Html<'t>) -> DomResult<C>,
    {
        let params = params.into();
        let content = provider(self)?.into();
        self.element(tag, params.content(content))
    }

    pub fn br(&mut self) -> DomResult<NodeId> {
        self.element("br", Params::new())
    }

    /// Group the provider's content without an enclosing tag
    pub fn build<C, F>(&mut self, provider: F) -> DomResult<NodeId>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut Html<'t>) -> DomResult<C>,
    {
        self.element_with(PSEUDO_TAG, Params::new(), provider)
    }

    /// `ul` with positional CSS classes on its `li` children
    pub fn ulist(&mut self, params: impl Into<Params>) -> DomResult<NodeId> {
        let id = self.element("ul", params)?;
        self.decorate_list(id)
    }

    pub fn ulist_with<C, F>(&mut self, params: impl Into<Params>, provider: F) -> DomResult<NodeId>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut Html<'t>) -> DomResult<C>,
    {
        let id = self.element_with("ul", params, provider)?;
        self.decorate_list(id)
    }

    /// `ol` with positional CSS classes on its `li` children
    pub fn olist(&mut self, params: impl Into<Params>) -> DomResult<NodeId> {
        let id = self.element("ol", params)?;
        self.decorate_list(id)
    }

    pub fn olist_with<C, F>(&mut self, params: impl Into<Params>, provider: F) -> DomResult<NodeId>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut Html<'t>) -> DomResult<C>,
    {
        let id = self.element_with("ol", params, provider)?;
        self.decorate_list(id)
    }

    fn decorate_list(&mut self, list: NodeId) -> DomResult<NodeId> {
        if self.tree.is_empty(list) {
            self.tree.add_class(list, &["empty"])?;
            return Ok(list);
        }

        let last = self.tree.len(list) - 1;
        let items: Vec<NodeId> = self
            .tree
            .children(list)
            .iter()
            .filter_map(Content::as_node)
            .filter(|&child| self.tree.tag(child) == Some("li"))
            .collect();
        for (index, item) in items.into_iter().enumerate() {
            let position = format!("item_{}", index + 1);
            self.tree.add_class(item, &[position.as_str()])?;
            if index == 0 {
                self.tree.add_class(item, &["first"])?;
            }
            if index == last {
                self.tree.add_class(item, &["last"])?;
            }
        }
        Ok(list)
    }

    /// `img` element. `title` falls back to `description`; `alt` falls back
    /// to title, then description, then src. `description` is not rendered.
    pub fn image(&mut self, params: impl Into<Params>) -> DomResult<NodeId> {
        let mut attrs = params.into().get_attrs().clone();
        let description = attrs.remove("description").filter(|v| !v.is_omitted());
        if attrs.get("title").is_none_or(AttrValue::is_omitted) {
            if let Some(description) = &description {
                attrs.set("title", description.clone());
            }
        }
        if attrs.get("alt").is_none_or(AttrValue::is_omitted) {
            let fallback = attrs
                .get("title")
                .filter(|v| !v.is_omitted())
                .cloned()
                .or(description)
                .or_else(|| attrs.get("src").cloned());
            if let Some(alt) = fallback {
                attrs.set("alt", alt);
            }
        }
        self.tree.create(Params::from(attrs).tag("img"))
    }
}

/// Replace whitespace with non-breaking spaces
pub fn nowrap(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { "&nbsp;".to_string() } else { c.to_string() })
        .collect()
}
