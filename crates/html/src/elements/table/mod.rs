//! The `table` element: section accessors, the rows view and row editing.
//!
//! Spec: <https://html.spec.whatwg.org/multipage/tables.html#the-table-element>

mod hints;

use crate::collection::{HTMLCollection, Scope};
use crate::dom::{DOM, DomException, LocalName, Namespace};
use indextree::NodeId;
use once_cell::unsync::OnceCell;

pub use hints::CellPaddingInvalidation;

/// Host-side state for one `table` element.
///
/// Structural accessors take the tree explicitly; the wrapper itself only
/// owns the two lazily created views and the `cellpadding` state.
#[derive(Debug)]
pub struct HTMLTableElement {
    node: NodeId,
    rows: OnceCell<HTMLCollection>,
    t_bodies: OnceCell<HTMLCollection>,
    cellpadding: Option<u32>,
}

/// Row bucket used to order the rows view: head rows, then body, then foot.
fn row_group_rank(dom: &DOM, row: NodeId) -> u8 {
    match dom.parent(row).and_then(|parent| dom.local_name(parent)) {
        Some(LocalName::Thead) => 0,
        Some(LocalName::Tfoot) => 2,
        _ => 1,
    }
}

impl HTMLTableElement {
    /// Wrap an existing HTML `table` element.
    ///
    /// # Errors
    /// `TypeMismatch` when `node` is not an HTML `table`.
    pub fn new(dom: &DOM, node: NodeId) -> Result<Self, DomException> {
        if !dom.is_html_element_named(node, &LocalName::Table) {
            return Err(DomException::TypeMismatch("element is not a table"));
        }
        Ok(Self {
            node,
            rows: OnceCell::new(),
            t_bodies: OnceCell::new(),
            cellpadding: None,
        })
    }

    /// Create a detached `table` element and wrap it.
    pub fn create(dom: &mut DOM) -> Self {
        Self {
            node: dom.create_element(LocalName::Table, Namespace::Html),
            rows: OnceCell::new(),
            t_bodies: OnceCell::new(),
            cellpadding: None,
        }
    }

    pub const fn node(&self) -> NodeId {
        self.node
    }

    fn first_child_named(&self, dom: &DOM, name: &LocalName) -> Option<NodeId> {
        dom.children(self.node)
            .find(|&child| dom.is_html_element_named(child, name))
    }

    /// Detach the first child named `name`, if any.
    fn delete_first_child_named(&self, dom: &mut DOM, name: &LocalName) {
        if let Some(child) = self.first_child_named(dom, name) {
            log::debug!(target: "html::table", "removing {} {child:?}", name.as_str());
            dom.remove(child);
        }
    }

    fn create_child(dom: &mut DOM, name: LocalName) -> NodeId {
        dom.create_element(name, Namespace::Html)
    }

    /// The first child element that is neither a `caption` nor a `colgroup`.
    fn head_insertion_point(&self, dom: &DOM) -> Option<NodeId> {
        dom.children(self.node)
            .filter(|&child| dom.is_html_element(child))
            .find(|&child| {
                !dom.is_html_element_named(child, &LocalName::Caption)
                    && !dom.is_html_element_named(child, &LocalName::Colgroup)
            })
    }

    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-caption
    pub fn caption(&self, dom: &DOM) -> Option<NodeId> {
        self.first_child_named(dom, &LocalName::Caption)
    }

    /// Replace the caption; the new one becomes the first child.
    ///
    /// # Errors
    /// `TypeMismatch` when `caption` is not an HTML `caption`, otherwise any
    /// error from [`DOM::pre_insert`].
    pub fn set_caption(&self, dom: &mut DOM, caption: Option<NodeId>) -> Result<(), DomException> {
        if let Some(caption) = caption
            && !dom.is_html_element_named(caption, &LocalName::Caption)
        {
            return Err(DomException::TypeMismatch("element is not a caption"));
        }
        self.delete_caption(dom);
        if let Some(caption) = caption {
            let first_child = dom.first_child(self.node);
            dom.pre_insert(caption, self.node, first_child)?;
        }
        Ok(())
    }

    /// The existing caption, or a new one inserted as the first child.
    ///
    /// # Errors
    /// Any error from inserting the new caption.
    pub fn create_caption(&self, dom: &mut DOM) -> Result<NodeId, DomException> {
        if let Some(caption) = self.caption(dom) {
            return Ok(caption);
        }
        let caption = Self::create_child(dom, LocalName::Caption);
        let first_child = dom.first_child(self.node);
        dom.pre_insert(caption, self.node, first_child)?;
        log::debug!(target: "html::table", "created caption {caption:?}");
        Ok(caption)
    }

    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-deletecaption
    pub fn delete_caption(&self, dom: &mut DOM) {
        self.delete_first_child_named(dom, &LocalName::Caption);
    }

    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-thead
    pub fn t_head(&self, dom: &DOM) -> Option<NodeId> {
        self.first_child_named(dom, &LocalName::Thead)
    }

    /// Replace the head section, placing it after any leading captions and
    /// column groups.
    ///
    /// # Errors
    /// `TypeMismatch` (with the tree untouched) when `thead` is not an HTML
    /// `thead`, otherwise any error from [`DOM::pre_insert`].
    pub fn set_t_head(&self, dom: &mut DOM, thead: Option<NodeId>) -> Result<(), DomException> {
        if let Some(thead) = thead
            && !dom.is_html_element_named(thead, &LocalName::Thead)
        {
            return Err(DomException::TypeMismatch("element is not thead"));
        }
        self.delete_t_head(dom);
        let Some(thead) = thead else {
            return Ok(());
        };
        let before = self.head_insertion_point(dom);
        dom.pre_insert(thead, self.node, before)
    }

    /// The existing head section, or a new one.
    ///
    /// # Errors
    /// Any error from inserting the new thead.
    pub fn create_t_head(&self, dom: &mut DOM) -> Result<NodeId, DomException> {
        if let Some(thead) = self.t_head(dom) {
            return Ok(thead);
        }
        let thead = Self::create_child(dom, LocalName::Thead);
        let before = self.head_insertion_point(dom);
        dom.pre_insert(thead, self.node, before)?;
        log::debug!(target: "html::table", "created thead {thead:?} before {before:?}");
        Ok(thead)
    }

    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-deletethead
    pub fn delete_t_head(&self, dom: &mut DOM) {
        self.delete_first_child_named(dom, &LocalName::Thead);
    }

    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-tfoot
    pub fn t_foot(&self, dom: &DOM) -> Option<NodeId> {
        self.first_child_named(dom, &LocalName::Tfoot)
    }

    /// Replace the foot section; the new one is appended.
    ///
    /// # Errors
    /// `TypeMismatch` (with the tree untouched) when `tfoot` is not an HTML
    /// `tfoot`, otherwise any error from [`DOM::pre_insert`].
    pub fn set_t_foot(&self, dom: &mut DOM, tfoot: Option<NodeId>) -> Result<(), DomException> {
        if let Some(tfoot) = tfoot
            && !dom.is_html_element_named(tfoot, &LocalName::Tfoot)
        {
            return Err(DomException::TypeMismatch("element is not tfoot"));
        }
        self.delete_t_foot(dom);
        match tfoot {
            Some(tfoot) => dom.append_child(self.node, tfoot),
            None => Ok(()),
        }
    }

    /// The existing foot section, or a new one appended to the table.
    ///
    /// # Errors
    /// Any error from inserting the new tfoot.
    pub fn create_t_foot(&self, dom: &mut DOM) -> Result<NodeId, DomException> {
        if let Some(tfoot) = self.t_foot(dom) {
            return Ok(tfoot);
        }
        let tfoot = Self::create_child(dom, LocalName::Tfoot);
        dom.append_child(self.node, tfoot)?;
        log::debug!(target: "html::table", "created tfoot {tfoot:?}");
        Ok(tfoot)
    }

    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-deletetfoot
    pub fn delete_t_foot(&self, dom: &mut DOM) {
        self.delete_first_child_named(dom, &LocalName::Tfoot);
    }

    /// `tbody` children of the table, created on first use.
    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-tbodies
    pub fn t_bodies(&self) -> &HTMLCollection {
        self.t_bodies.get_or_init(|| {
            HTMLCollection::new(self.node, Scope::Children, |dom, element| {
                dom.is_html_element_named(element, &LocalName::Tbody)
            })
        })
    }

    /// Insert a new `tbody` right after the last existing one, or append it.
    ///
    /// # Errors
    /// Any error from inserting the new section.
    pub fn create_t_body(&self, dom: &mut DOM) -> Result<NodeId, DomException> {
        let tbody = Self::create_child(dom, LocalName::Tbody);
        let before = dom
            .reverse_children(self.node)
            .filter(|&child| dom.is_html_element(child))
            .find(|&child| dom.is_html_element_named(child, &LocalName::Tbody))
            .and_then(|last_tbody| dom.next_sibling(last_tbody));
        dom.pre_insert(tbody, self.node, before)?;
        log::debug!(target: "html::table", "created tbody {tbody:?} before {before:?}");
        Ok(tbody)
    }

    /// Rows belonging to this table: head rows, then rows directly in the
    /// table or a body section, then foot rows, each group in tree order.
    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-rows
    pub fn rows(&self) -> &HTMLCollection {
        let table = self.node;
        self.rows.get_or_init(|| {
            HTMLCollection::new(table, Scope::Descendants, move |dom, element| {
                if !dom.is_html_element_named(element, &LocalName::Tr) {
                    return false;
                }
                let Some(parent) = dom.parent_element(element) else {
                    return false;
                };
                if parent == table {
                    return true;
                }
                dom.is_html_element(parent)
                    && dom.local_name(parent).is_some_and(LocalName::is_table_section)
                    && dom.parent(parent) == Some(table)
            })
            .with_ordering(row_group_rank)
        })
    }

    /// Insert a new `tr` so that it ends up at `index` in [`Self::rows`];
    /// `-1` appends.
    ///
    /// # Errors
    /// `IndexSize` when `index < -1` or `index` exceeds the row count.
    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-insertrow
    pub fn insert_row(&self, dom: &mut DOM, index: i64) -> Result<NodeId, DomException> {
        let rows = self.rows();
        let rows_length = rows.length(dom);
        let length = i64::try_from(rows_length).unwrap_or(i64::MAX);
        if index < -1 || index > length {
            return Err(DomException::IndexSize(
                "index is negative or greater than the number of rows",
            ));
        }

        let row = Self::create_child(dom, LocalName::Tr);
        if rows_length == 0 {
            let stray_row = dom
                .reverse_children(self.node)
                .find(|&child| dom.is_html_element_named(child, &LocalName::Tr));
            if let Some(parent) = stray_row.and_then(|stray| dom.parent(stray)) {
                dom.append_child(parent, row)?;
            } else {
                let tbody = Self::create_child(dom, LocalName::Tbody);
                dom.append_child(tbody, row)?;
                dom.append_child(self.node, tbody)?;
                log::debug!(target: "html::table", "created tbody {tbody:?} for first row");
            }
        } else if index == -1 || index == length {
            let parent = rows
                .item(dom, rows_length - 1)
                .and_then(|last| dom.parent(last))
                .ok_or(DomException::NotFound("last row has no parent"))?;
            dom.append_child(parent, row)?;
        } else {
            let reference = usize::try_from(index)
                .ok()
                .and_then(|position| rows.item(dom, position))
                .ok_or(DomException::IndexSize("index does not name a row"))?;
            let parent = dom
                .parent(reference)
                .ok_or(DomException::NotFound("row has no parent"))?;
            dom.pre_insert(row, parent, Some(reference))?;
        }
        log::debug!(target: "html::table", "inserted row {row:?} at index {index}");
        Ok(row)
    }

    /// Remove the row at `index` in [`Self::rows`]; `-1` removes the last one.
    ///
    /// # Errors
    /// `IndexSize` when `index < -1` or `index` is not below the row count.
    // https://html.spec.whatwg.org/multipage/tables.html#dom-table-deleterow
    pub fn delete_row(&self, dom: &mut DOM, index: i64) -> Result<(), DomException> {
        let rows = self.rows();
        let rows_length = rows.length(dom);
        let length = i64::try_from(rows_length).unwrap_or(i64::MAX);
        if index < -1 || index >= length {
            return Err(DomException::IndexSize(
                "index is negative or greater than or equal to the number of rows",
            ));
        }

        let position = if index == -1 {
            let Some(last) = rows_length.checked_sub(1) else {
                return Ok(());
            };
            last
        } else {
            usize::try_from(index)
                .map_err(|_| DomException::IndexSize("index does not name a row"))?
        };
        if let Some(row) = rows.item(dom, position) {
            log::debug!(target: "html::table", "deleting row {row:?} at index {index}");
            dom.remove(row);
        }
        Ok(())
    }

    /// The `border` attribute as an unsigned integer, `0` when absent or invalid.
    pub fn border(&self, dom: &DOM) -> u32 {
        hints::parse_border(dom.attribute(self.node, "border").unwrap_or_default())
    }

    /// Padding applied to cells, as last set through `cellpadding`.
    pub const fn cellpadding(&self) -> Option<u32> {
        self.cellpadding
    }
}
