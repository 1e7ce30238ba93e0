//! Live, filtered views over the element tree.
//!
//! A collection never tracks mutations itself. Each query compares the tree's
//! generation against the one its snapshot was taken at and re-walks the tree
//! when they differ.
//!
//! Spec: <https://dom.spec.whatwg.org/#interface-htmlcollection>

use core::cell::RefCell;
use core::fmt;

use crate::dom::DOM;
use indextree::NodeId;

/// Which nodes under the root are candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Children,
    /// All descendants in tree order, excluding the root.
    Descendants,
}

type Filter = Box<dyn Fn(&DOM, NodeId) -> bool>;
type OrderKey = Box<dyn Fn(&DOM, NodeId) -> u8>;

struct Snapshot {
    generation: u64,
    elements: Vec<NodeId>,
}

pub struct HTMLCollection {
    root: NodeId,
    scope: Scope,
    filter: Filter,
    ordering: Option<OrderKey>,
    cache: RefCell<Option<Snapshot>>,
}

impl HTMLCollection {
    /// `filter` is only consulted for element candidates and must not mutate.
    pub fn new<F>(root: NodeId, scope: Scope, filter: F) -> Self
    where
        F: Fn(&DOM, NodeId) -> bool + 'static,
    {
        Self {
            root,
            scope,
            filter: Box::new(filter),
            ordering: None,
            cache: RefCell::new(None),
        }
    }

    /// Group members by `key` (ascending), keeping tree order within a group.
    #[must_use]
    pub fn with_ordering<K>(mut self, key: K) -> Self
    where
        K: Fn(&DOM, NodeId) -> u8 + 'static,
    {
        self.ordering = Some(Box::new(key));
        self
    }

    fn collect(&self, dom: &DOM) -> Vec<NodeId> {
        let accept = |node: &NodeId| dom.is_element(*node) && (self.filter)(dom, *node);
        let mut elements: Vec<NodeId> = match self.scope {
            Scope::Children => dom.children(self.root).filter(accept).collect(),
            Scope::Descendants => dom.descendants(self.root).filter(accept).collect(),
        };
        if let Some(key) = &self.ordering {
            elements.sort_by_key(|node| key(dom, *node));
        }
        elements
    }

    fn with_elements<R>(&self, dom: &DOM, read: impl FnOnce(&[NodeId]) -> R) -> R {
        let mut cache = self.cache.borrow_mut();
        let generation = dom.generation();
        let snapshot = match cache.take() {
            Some(snapshot) if snapshot.generation == generation => snapshot,
            _ => {
                let elements = self.collect(dom);
                log::trace!(
                    target: "html::collection",
                    "recomputed collection rooted at {:?} at generation {generation}: {} elements",
                    self.root,
                    elements.len()
                );
                Snapshot {
                    generation,
                    elements,
                }
            }
        };
        let result = read(&snapshot.elements);
        *cache = Some(snapshot);
        result
    }

    pub fn length(&self, dom: &DOM) -> usize {
        self.with_elements(dom, <[NodeId]>::len)
    }

    pub fn is_empty(&self, dom: &DOM) -> bool {
        self.length(dom) == 0
    }

    pub fn item(&self, dom: &DOM, index: usize) -> Option<NodeId> {
        self.with_elements(dom, |elements| elements.get(index).copied())
    }

    /// Current members as an owned snapshot.
    pub fn elements(&self, dom: &DOM) -> Vec<NodeId> {
        self.with_elements(dom, <[NodeId]>::to_vec)
    }

    /// Iterate the members as of this call; later mutations are not observed.
    pub fn iter(&self, dom: &DOM) -> impl Iterator<Item = NodeId> {
        self.elements(dom).into_iter()
    }
}

impl fmt::Debug for HTMLCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HTMLCollection")
            .field("root", &self.root)
            .field("scope", &self.scope)
            .field("ordered", &self.ordering.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomException, LocalName, Namespace};

    fn append(dom: &mut DOM, parent: NodeId, name: LocalName) -> Result<NodeId, DomException> {
        let node = dom.create_element(name, Namespace::Html);
        dom.append_child(parent, node)?;
        Ok(node)
    }

    #[test]
    fn children_scope_ignores_grandchildren() -> Result<(), DomException> {
        let mut dom = DOM::default();
        let table = dom.create_element(LocalName::Table, Namespace::Html);
        let body = append(&mut dom, table, LocalName::Tbody)?;
        append(&mut dom, body, LocalName::Tbody)?;
        let bodies = HTMLCollection::new(table, Scope::Children, |dom, node| {
            dom.is_html_element_named(node, &LocalName::Tbody)
        });
        assert_eq!(bodies.elements(&dom), vec![body]);
        Ok(())
    }

    #[test]
    fn descendants_exclude_root_and_text() -> Result<(), DomException> {
        let mut dom = DOM::default();
        let table = dom.create_element(LocalName::Table, Namespace::Html);
        let body = append(&mut dom, table, LocalName::Tbody)?;
        let row = append(&mut dom, body, LocalName::Tr)?;
        let text = dom.create_text("x");
        dom.append_child(row, text)?;
        let everything = HTMLCollection::new(table, Scope::Descendants, |_, _| true);
        assert_eq!(everything.elements(&dom), vec![body, row]);
        Ok(())
    }

    #[test]
    fn queries_reflect_mutations() -> Result<(), DomException> {
        let mut dom = DOM::default();
        let table = dom.create_element(LocalName::Table, Namespace::Html);
        let rows = HTMLCollection::new(table, Scope::Descendants, |dom, node| {
            dom.is_html_element_named(node, &LocalName::Tr)
        });
        assert!(rows.is_empty(&dom));
        let first = append(&mut dom, table, LocalName::Tr)?;
        assert_eq!(rows.length(&dom), 1);
        assert_eq!(rows.item(&dom, 0), Some(first));
        let second = append(&mut dom, table, LocalName::Tr)?;
        assert_eq!(rows.iter(&dom).collect::<Vec<_>>(), vec![first, second]);
        dom.remove(first);
        assert_eq!(rows.elements(&dom), vec![second]);
        assert_eq!(rows.item(&dom, 1), None);
        Ok(())
    }

    #[test]
    fn ordering_groups_but_keeps_tree_order() -> Result<(), DomException> {
        let mut dom = DOM::default();
        let root = dom.create_element(LocalName::Table, Namespace::Html);
        let late = append(&mut dom, root, LocalName::Tfoot)?;
        let early_a = append(&mut dom, root, LocalName::Thead)?;
        let middle = append(&mut dom, root, LocalName::Tbody)?;
        let early_b = append(&mut dom, root, LocalName::Thead)?;
        let view = HTMLCollection::new(root, Scope::Children, |_, _| true).with_ordering(
            |dom, node| match dom.local_name(node) {
                Some(LocalName::Thead) => 0,
                Some(LocalName::Tfoot) => 2,
                _ => 1,
            },
        );
        assert_eq!(view.elements(&dom), vec![early_a, early_b, middle, late]);
        Ok(())
    }
}
