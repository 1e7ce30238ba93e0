//! Element-specific behaviour layered over the generic tree.

pub mod table;

use crate::dom::DOM;
use css_cascade::CascadedProperties;

/// Elements that map legacy attributes onto style.
///
/// Spec: <https://html.spec.whatwg.org/multipage/rendering.html#presentational-hints>
pub trait PresentationalHints {
    /// Whether `name` can contribute hints. The generic element maps none.
    fn is_presentational_hint(&self, _name: &str) -> bool {
        false
    }

    /// Write this element's hints into `cascaded`.
    fn apply_presentational_hints(&self, dom: &DOM, cascaded: &mut CascadedProperties);
}
