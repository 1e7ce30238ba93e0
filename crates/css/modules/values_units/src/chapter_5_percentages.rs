//! CSS Values & Units Level 3 — §5 Percentages
//! Spec: <https://www.w3.org/TR/css-values-3/#percentages>

/// A CSS <percentage>
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Percentage(pub f32); // stored as 0.0..=1.0

impl Percentage {
    /// Build from a percent number as written, e.g. `50.0` for `50%`.
    #[inline]
    pub fn from_percent(percent: f32) -> Self {
        Self(percent / 100.0)
    }
}
