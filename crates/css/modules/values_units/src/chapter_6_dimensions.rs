//! CSS Values & Units Level 3 — §6 Dimensions (absolute lengths)
//! Spec: <https://www.w3.org/TR/css-values-3/#absolute-lengths>

/// A CSS <length> resolved to CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub px: f32,
}

impl Length {
    /// An absolute length in CSS pixels.
    #[inline]
    pub const fn px(px: f32) -> Self {
        Self { px }
    }
}
