//! CSS Values and Units Module Level 3 — Property definition syntax and unit types.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the CSS Values table of contents.
// Each module links the section it implements.
pub mod chapter_3_identifiers;
pub mod chapter_5_percentages;
pub mod chapter_6_dimensions;
pub mod chapter_9_colors;

// Re-exports for ergonomic access from other crates.
pub use chapter_3_identifiers::{Ident, parse_ident, parse_keyword_value};
pub use chapter_5_percentages::Percentage;
pub use chapter_6_dimensions::Length;
pub use chapter_9_colors::{Color, hex_value};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// Tokens remained after a complete value was parsed.
    TrailingInput,
}
