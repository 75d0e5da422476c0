//! XML Builder
//!
//! Elements with arbitrary (optionally namespaced) tags and documents with
//! an XML prologue.

use weft_dom::{AttrValue, Attributes, ContentList, DomResult, ElementTree, NodeId, PSEUDO_TAG, Params};

/// XML element factory borrowing a tree
#[derive(Debug)]
pub struct Xml<'t> {
    tree: &'t mut ElementTree,
    namespace: Option<String>,
}

impl<'t> Xml<'t> {
    pub fn new(tree: &'t mut ElementTree) -> Self {
        Self { tree, namespace: None }
    }

    pub fn tree(&mut self) -> &mut ElementTree {
        self.tree
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Factory whose tags are prefixed with `name:` (nested calls join with `:`)
    pub fn ns(&mut self, name: &str) -> Xml<'_> {
        let namespace = match &self.namespace {
            Some(outer) => format!("{outer}:{name}"),
            None => name.to_string(),
        };
        Xml {
            tree: &mut *self.tree,
            namespace: Some(namespace),
        }
    }

    fn qualified(&self, tag: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{tag}"),
            None => tag.to_string(),
        }
    }

    pub fn element(&mut self, tag: &str, params: impl Into<Params>) -> DomResult<NodeId> {
        let tag = self.qualified(tag);
        self.tree.create(params.into().tag(tag))
    }

    pub fn element_with<C, F>(&mut self, tag: &str, params: impl Into<Params>, provider: F) -> DomResult<NodeId>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut Xml<'t>) -> DomResult<C>,
    {
        let params = params.into();
        let content = provider(self)?.into();
        self.element(tag, params.content(content))
    }

    /// Group the provider's content without an enclosing tag
    pub fn build<C, F>(&mut self, provider: F) -> DomResult<NodeId>
    where
        C: Into<ContentList>,
        F: FnOnce(&mut Xml<'_>) -> DomResult<C>,
    {
        let content = provider(self)?.into();
        self.tree.create(Params::new().tag(PSEUDO_TAG).content(content))
    }
}

/// XML document: prologue plus a root element
#[derive(Debug, Clone)]
pub struct XmlDocument {
    params: Attributes,
    root: NodeId,
}

impl XmlDocument {
    pub fn new(root: NodeId) -> Self {
        Self {
            params: Attributes::new().with("version", "1.0").with("encoding", "UTF-8"),
            root,
        }
    }

    /// Build the root element with an XML factory
    pub fn build<F>(tree: &mut ElementTree, provider: F) -> DomResult<Self>
    where
        F: FnOnce(&mut Xml<'_>) -> DomResult<NodeId>,
    {
        let root = provider(&mut Xml::new(tree))?;
        Ok(Self::new(root))
    }

    pub fn version(self, version: &str) -> Self {
        self.param("version", version)
    }

    pub fn encoding(self, encoding: &str) -> Self {
        self.param("encoding", encoding)
    }

    /// Extra prologue parameter (e.g. `standalone`)
    pub fn param(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.params.set(name, value);
        self
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// `<?xml ... ?>` line
    pub fn prologue(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .filter(|(_, v)| !v.is_omitted())
            .map(|(k, v)| format!("{k}=\"{v}\""))
            .collect();
        format!("<?xml {} ?>", params.join(" "))
    }

    pub fn render(&self, tree: &mut ElementTree) -> DomResult<String> {
        let body = tree.serialize(self.root)?;
        Ok(format!("{}\n{}", self.prologue(), body))
    }
}
