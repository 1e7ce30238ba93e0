use thiserror::Error;

/// Typed failures surfaced by tree and element operations.
///
/// Spec: <https://webidl.spec.whatwg.org/#idl-DOMException-error-names>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomException {
    /// The operation would yield an incorrect node tree.
    #[error("HierarchyRequestError: {0}")]
    HierarchyRequest(&'static str),
    /// A node the operation relies on is not where it should be.
    #[error("NotFoundError: {0}")]
    NotFound(&'static str),
    /// A supplied object has the wrong type, e.g. a `tbody` given as `tHead`.
    #[error("TypeMismatchError: {0}")]
    TypeMismatch(&'static str),
    /// An index is outside the permitted range.
    #[error("IndexSizeError: {0}")]
    IndexSize(&'static str),
}
