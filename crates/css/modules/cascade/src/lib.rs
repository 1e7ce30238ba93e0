//! CSS Cascading and Inheritance Level 4 — Cascade, inheritance, and computed values.
//! Spec: <https://www.w3.org/TR/css-cascade-4/>
//!
//! This crate holds the per-element accumulator that declarations and
//! presentational hints are written into before computed values are derived.

#![forbid(unsafe_code)]

mod value;

use std::collections::BTreeMap;

pub use value::{
    ColorSyntax, CssWideKeyword, Keyword, PropertyId, StyleValue, parse_float_value,
};

/// Where a declaration came from.
/// Spec: Section 6.1 — Cascade origins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    UserAgent,
    User,
    Author,
}

/// Source of a cascaded entry, including presentational hints.
///
/// Hints are author-level but precede every author declaration, so any author
/// declaration beats them.
/// Spec: <https://html.spec.whatwg.org/multipage/rendering.html#presentational-hints>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CascadeSource {
    Declaration(Origin),
    PresentationalHint,
}

/// Rank sources: UA < User < presentational hint < Author.
const fn source_rank(source: CascadeSource) -> u8 {
    match source {
        CascadeSource::Declaration(Origin::UserAgent) => 0,
        CascadeSource::Declaration(Origin::User) => 1,
        CascadeSource::PresentationalHint => 2,
        CascadeSource::Declaration(Origin::Author) => 3,
    }
}

/// A winning value together with the source that set it.
#[derive(Clone, Debug, PartialEq)]
pub struct CascadedEntry {
    pub value: StyleValue,
    pub source: CascadeSource,
}

/// Per-element map from property to its current cascade winner.
///
/// Writes are accepted when the incoming source ranks at least as high as the
/// stored one; equal ranks resolve by write order (later wins).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CascadedProperties {
    properties: BTreeMap<PropertyId, CascadedEntry>,
}

impl CascadedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value from `source`. Returns whether it became the winner.
    pub fn set_property(
        &mut self,
        property: PropertyId,
        value: StyleValue,
        source: CascadeSource,
    ) -> bool {
        if let Some(existing) = self.properties.get(&property)
            && source_rank(existing.source) > source_rank(source)
        {
            log::trace!(
                target: "css_cascade",
                "refusing {property} from {source:?}; already set by {:?}",
                existing.source
            );
            return false;
        }
        self.properties
            .insert(property, CascadedEntry { value, source });
        true
    }

    /// Record a presentational hint for `property`.
    pub fn set_property_from_presentational_hint(
        &mut self,
        property: PropertyId,
        value: StyleValue,
    ) -> bool {
        self.set_property(property, value, CascadeSource::PresentationalHint)
    }

    pub fn property(&self, property: PropertyId) -> Option<&StyleValue> {
        self.properties.get(&property).map(|entry| &entry.value)
    }

    pub fn entry(&self, property: PropertyId) -> Option<&CascadedEntry> {
        self.properties.get(&property)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate winners in `PropertyId` order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &StyleValue)> {
        self.properties
            .iter()
            .map(|(property, entry)| (*property, &entry.value))
    }
}
