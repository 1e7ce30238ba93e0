//! The node tree that elements are built on.
//!
//! Nodes live in an [`indextree::Arena`]; removed nodes are only detached, so
//! their [`NodeId`]s stay valid and can be inserted again. Every structural or
//! attribute mutation bumps [`DOM::generation`], which live views use to decide
//! whether their cached snapshot is stale.

mod exception;
mod printing;

use core::mem;
use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;
use url::Url;

pub use exception::DomException;

/// Local names the table code distinguishes; everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalName {
    Table,
    Caption,
    Colgroup,
    Col,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Td,
    Th,
    Other(String),
}

impl LocalName {
    /// Map a tag name (any case) to its local name.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "table" => Self::Table,
            "caption" => Self::Caption,
            "colgroup" => Self::Colgroup,
            "col" => Self::Col,
            "thead" => Self::Thead,
            "tbody" => Self::Tbody,
            "tfoot" => Self::Tfoot,
            "tr" => Self::Tr,
            "td" => Self::Td,
            "th" => Self::Th,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Table => "table",
            Self::Caption => "caption",
            Self::Colgroup => "colgroup",
            Self::Col => "col",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tfoot => "tfoot",
            Self::Tr => "tr",
            Self::Td => "td",
            Self::Th => "th",
            Self::Other(name) => name,
        }
    }

    /// `thead`, `tbody` or `tfoot`.
    pub const fn is_table_section(&self) -> bool {
        matches!(self, Self::Thead | Self::Tbody | Self::Tfoot)
    }

    /// `td` or `th`.
    pub const fn is_table_cell(&self) -> bool {
        matches!(self, Self::Td | Self::Th)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        local_name: LocalName,
        namespace: Namespace,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
    /// Set when the node's computed style must be recomputed.
    pub needs_style_update: bool,
}

/// Notification produced by an attribute mutation, forwarded to elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub node: NodeId,
    pub name: String,
    pub old_value: Option<String>,
    pub value: Option<String>,
    /// Attributes set through [`DOM::set_attribute`] are never namespaced.
    pub namespace: Option<Namespace>,
}

/// Consumer of forced style invalidations.
pub trait StyleInvalidator {
    fn invalidate_style(&mut self, node: NodeId);
}

pub struct DOM {
    dom: Arena<DOMNode>,
    root: NodeId,
    generation: u64,
    url: Option<Url>,
}

impl Default for DOM {
    fn default() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DOMNode::default()),
            dom,
            generation: 0,
            url: None,
        }
    }
}

impl DOM {
    /// An empty document whose URL is the base for relative URL resolution.
    pub fn new(url: Url) -> Self {
        Self {
            url: Some(url),
            ..Self::default()
        }
    }

    /// The document node.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Counter bumped on every insertion, removal and attribute change.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Create a detached element.
    pub fn create_element(&mut self, local_name: LocalName, namespace: Namespace) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Element {
                local_name,
                namespace,
            },
            ..DOMNode::default()
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Text { text: text.into() },
            ..DOMNode::default()
        })
    }

    pub fn get(&self, node: NodeId) -> Option<&DOMNode> {
        self.dom.get(node).map(Node::get)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut DOMNode> {
        self.dom.get_mut(node).map(Node::get_mut)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.get(node).map(|data| &data.kind),
            Some(NodeKind::Element { .. })
        )
    }

    /// Local name of an element in any namespace.
    pub fn local_name(&self, node: NodeId) -> Option<&LocalName> {
        match &self.get(node)?.kind {
            NodeKind::Element { local_name, .. } => Some(local_name),
            NodeKind::Document | NodeKind::Text { .. } => None,
        }
    }

    pub fn is_html_element(&self, node: NodeId) -> bool {
        matches!(
            self.get(node).map(|data| &data.kind),
            Some(NodeKind::Element {
                namespace: Namespace::Html,
                ..
            })
        )
    }

    /// Whether `node` is an HTML element named `name`.
    pub fn is_html_element_named(&self, node: NodeId, name: &LocalName) -> bool {
        match self.get(node).map(|data| &data.kind) {
            Some(NodeKind::Element {
                local_name,
                namespace: Namespace::Html,
            }) => local_name == name,
            _ => false,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.get(node)?.parent()
    }

    /// The parent, if it is an element.
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|&parent| self.is_element(parent))
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.dom.get(node)?.first_child()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.dom.get(node)?.next_sibling()
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.dom.get(node)?.previous_sibling()
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.dom)
    }

    /// Children from last to first.
    pub fn reverse_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.dom).rev()
    }

    /// Descendants in tree order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.dom).skip(1)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node.ancestors(&self.dom).any(|candidate| candidate == ancestor)
    }

    /// Insert `node` into `parent` before `child`, or append when `child` is `None`.
    ///
    /// `node` is removed from its current parent first.
    /// Spec: <https://dom.spec.whatwg.org/#concept-node-pre-insert>
    ///
    /// # Errors
    /// - `HierarchyRequest` when `parent` cannot have children, `node` is an
    ///   inclusive ancestor of `parent`, `node` is a document, or a text node
    ///   would become a child of the document.
    /// - `NotFound` when `child` is not a child of `parent`.
    pub fn pre_insert(
        &mut self,
        node: NodeId,
        parent: NodeId,
        child: Option<NodeId>,
    ) -> Result<(), DomException> {
        let parent_kind = self
            .get(parent)
            .map(|data| &data.kind)
            .ok_or(DomException::NotFound("parent is not in this tree"))?;
        if matches!(parent_kind, NodeKind::Text { .. }) {
            return Err(DomException::HierarchyRequest(
                "text nodes cannot have children",
            ));
        }
        let parent_is_document = matches!(parent_kind, NodeKind::Document);
        if self.is_inclusive_ancestor(node, parent) {
            return Err(DomException::HierarchyRequest(
                "node is an inclusive ancestor of the parent",
            ));
        }
        match self.get(node).map(|data| &data.kind) {
            None => return Err(DomException::NotFound("node is not in this tree")),
            Some(NodeKind::Document) => {
                return Err(DomException::HierarchyRequest(
                    "a document cannot be inserted",
                ));
            }
            Some(NodeKind::Text { .. }) if parent_is_document => {
                return Err(DomException::HierarchyRequest(
                    "text cannot be a child of the document",
                ));
            }
            Some(NodeKind::Text { .. } | NodeKind::Element { .. }) => {}
        }
        if let Some(reference) = child
            && self.parent(reference) != Some(parent)
        {
            return Err(DomException::NotFound(
                "reference child is not a child of the parent",
            ));
        }

        let reference = if child == Some(node) {
            self.next_sibling(node)
        } else {
            child
        };
        node.detach(&mut self.dom);
        let inserted = match reference {
            Some(reference) => reference.checked_insert_before(node, &mut self.dom),
            None => parent.checked_append(node, &mut self.dom),
        };
        self.bump_generation();
        inserted.map_err(|_| DomException::HierarchyRequest("tree rejected the insertion"))
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// # Errors
    /// See [`DOM::pre_insert`].
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), DomException> {
        self.pre_insert(node, parent, None)
    }

    /// Detach `node` from its parent. No-op for parentless nodes.
    pub fn remove(&mut self, node: NodeId) {
        if self.parent(node).is_none() {
            return;
        }
        node.detach(&mut self.dom);
        self.bump_generation();
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?
            .attrs
            .iter()
            .find(|(attr_name, _)| attr_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.get(node)
            .into_iter()
            .flat_map(|data| data.attrs.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Set an attribute on an element; names are stored ASCII-lowercased.
    ///
    /// Returns the change notification, or `None` when `node` is not an element.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Option<AttributeChange> {
        if !self.is_element(node) {
            return None;
        }
        let name = name.to_ascii_lowercase();
        let value = value.into();
        let data = self.get_mut(node)?;
        let old_value = match data.attrs.iter_mut().find(|(attr_name, _)| *attr_name == name) {
            Some((_, existing)) => Some(mem::replace(existing, value.clone())),
            None => {
                data.attrs.push((name.clone(), value.clone()));
                None
            }
        };
        self.bump_generation();
        Some(AttributeChange {
            node,
            name,
            old_value,
            value: Some(value),
            namespace: None,
        })
    }

    /// Remove an attribute. Returns `None` when it was not present.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<AttributeChange> {
        let name = name.to_ascii_lowercase();
        let data = self.get_mut(node)?;
        let index = data
            .attrs
            .iter()
            .position(|(attr_name, _)| *attr_name == name)?;
        let (_, old_value) = data.attrs.remove(index);
        self.bump_generation();
        Some(AttributeChange {
            node,
            name,
            old_value: Some(old_value),
            value: None,
            namespace: None,
        })
    }

    pub fn needs_style_update(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|data| data.needs_style_update)
    }

    pub fn set_needs_style_update(&mut self, node: NodeId, needs: bool) {
        if let Some(data) = self.get_mut(node) {
            data.needs_style_update = needs;
        }
    }

    /// Parse `input` as a URL relative to the document URL.
    ///
    /// Spec: <https://html.spec.whatwg.org/multipage/urls-and-fetching.html#encoding-parsing-a-url>
    pub fn encoding_parse_url(&self, input: &str) -> Option<Url> {
        let trimmed = input.trim_matches(|character: char| character.is_ascii_whitespace());
        match &self.url {
            Some(base) => base.join(trimmed).ok(),
            None => Url::parse(trimmed).ok(),
        }
    }
}

impl StyleInvalidator for DOM {
    fn invalidate_style(&mut self, node: NodeId) {
        self.set_needs_style_update(node, true);
    }
}
