//! Property identifiers and the specified-value model shared by the cascade.

use core::fmt;
use css_values_units::{Color, Length, Percentage, parse_keyword_value};
use url::Url;

/// Longhand properties that can be cascaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyId {
    BackgroundColor,
    BackgroundImage,
    BorderBottomColor,
    BorderBottomStyle,
    BorderBottomWidth,
    BorderLeftColor,
    BorderLeftStyle,
    BorderLeftWidth,
    BorderRightColor,
    BorderRightStyle,
    BorderRightWidth,
    BorderSpacing,
    BorderTopColor,
    BorderTopStyle,
    BorderTopWidth,
    Float,
    Height,
    MarginLeft,
    MarginRight,
    Width,
}

impl PropertyId {
    /// The CSS property name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "background-color",
            Self::BackgroundImage => "background-image",
            Self::BorderBottomColor => "border-bottom-color",
            Self::BorderBottomStyle => "border-bottom-style",
            Self::BorderBottomWidth => "border-bottom-width",
            Self::BorderLeftColor => "border-left-color",
            Self::BorderLeftStyle => "border-left-style",
            Self::BorderLeftWidth => "border-left-width",
            Self::BorderRightColor => "border-right-color",
            Self::BorderRightStyle => "border-right-style",
            Self::BorderRightWidth => "border-right-width",
            Self::BorderSpacing => "border-spacing",
            Self::BorderTopColor => "border-top-color",
            Self::BorderTopStyle => "border-top-style",
            Self::BorderTopWidth => "border-top-width",
            Self::Float => "float",
            Self::Height => "height",
            Self::MarginLeft => "margin-left",
            Self::MarginRight => "margin-right",
            Self::Width => "width",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Keyword values produced by presentational hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Auto,
    InlineEnd,
    InlineStart,
    Left,
    None,
    Outset,
    Right,
}

impl Keyword {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::InlineEnd => "inline-end",
            Self::InlineStart => "inline-start",
            Self::Left => "left",
            Self::None => "none",
            Self::Outset => "outset",
            Self::Right => "right",
        }
    }
}

/// Keywords every property accepts.
///
/// Spec: <https://drafts.csswg.org/css-values-4/#common-keywords>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssWideKeyword {
    Initial,
    Inherit,
    Unset,
    Revert,
    RevertLayer,
}

impl CssWideKeyword {
    /// Match an already lowercased identifier.
    pub fn from_ident(ident: &str) -> Option<Self> {
        Some(match ident {
            "initial" => Self::Initial,
            "inherit" => Self::Inherit,
            "unset" => Self::Unset,
            "revert" => Self::Revert,
            "revert-layer" => Self::RevertLayer,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Inherit => "inherit",
            Self::Unset => "unset",
            Self::Revert => "revert",
            Self::RevertLayer => "revert-layer",
        }
    }
}

/// Which grammar a color value was written in.
///
/// Legacy colors come from HTML attributes like `bgcolor` and serialize in
/// the legacy `rgb()` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSyntax {
    Legacy,
    Modern,
}

/// A specified value as stored in the cascade.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    CssWide(CssWideKeyword),
    Keyword(Keyword),
    Length(Length),
    Percentage(Percentage),
    Color { color: Color, syntax: ColorSyntax },
    Image(Url),
}

impl StyleValue {
    /// Convenience constructor for a color written with legacy syntax.
    pub const fn legacy_color(color: Color) -> Self {
        Self::Color {
            color,
            syntax: ColorSyntax::Legacy,
        }
    }
}

/// Parse `text` as a complete value of the `float` property, CSS-wide
/// keywords included.
///
/// Spec: <https://drafts.csswg.org/css-page-floats/#float-property>
pub fn parse_float_value(text: &str) -> Option<StyleValue> {
    let ident = parse_keyword_value(text).ok()?;
    if let Some(wide) = CssWideKeyword::from_ident(&ident.0) {
        return Some(StyleValue::CssWide(wide));
    }
    let keyword = match ident.0.as_str() {
        "left" => Keyword::Left,
        "right" => Keyword::Right,
        "none" => Keyword::None,
        "inline-start" => Keyword::InlineStart,
        "inline-end" => Keyword::InlineEnd,
        _ => return None,
    };
    Some(StyleValue::Keyword(keyword))
}
