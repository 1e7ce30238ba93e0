#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

//! Table structure, live collections and presentational hints over an arena DOM.

pub mod collection;
pub mod dom;
pub mod elements;
pub mod numbers;

pub use collection::{HTMLCollection, Scope};
pub use dom::{AttributeChange, DOM, DomException, LocalName, Namespace, StyleInvalidator};
pub use elements::PresentationalHints;
pub use elements::table::{CellPaddingInvalidation, HTMLTableElement};
