//! CSS Color Module Level 4 — Color spaces, color values, and opacity.
//! Spec: <https://www.w3.org/TR/css-color-4/>
//!
//! Also hosts the HTML "legacy colour value" rules used by presentational
//! attributes such as `bgcolor`.
//! Spec: <https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#rules-for-parsing-a-legacy-colour-value>

#![forbid(unsafe_code)]

use css_values_units::{Color, hex_value};

/// Legacy colour strings longer than this are truncated before splitting.
const LEGACY_MAX_LENGTH: usize = 128;

/// Longest per-channel digit run kept before leading zeros are stripped.
const LEGACY_MAX_COMPONENT_LENGTH: usize = 8;

/// Parse a CSS <color> into 8-bit RGBA channels.
///
/// Supports named colors, hex forms (`#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`),
/// and functional notations like `rgb()/rgba()`.
///
/// Spec: <https://www.w3.org/TR/css-color-4/#typedef-color>
/// Spec: <https://www.w3.org/TR/css-color-4/#legacy-color-values>
pub type Rgba8Tuple = (u8, u8, u8, u8);
#[inline]
pub fn parse_css_color(input: &str) -> Option<Rgba8Tuple> {
    let parsed: csscolorparser::Color = input.parse().ok()?;
    let channels = parsed.to_rgba8();
    let red = channels[0];
    let green = channels[1];
    let blue = channels[2];
    let alpha = channels[3];
    Some((red, green, blue, alpha))
}

/// Look up a CSS named color keyword.
///
/// Strings made only of hex digits are never names; csscolorparser would read
/// them as prefix-less hex, which the legacy rules handle differently.
fn named_color(name: &str) -> Option<Color> {
    if !name.bytes().all(|byte| byte.is_ascii_alphabetic())
        || name.bytes().all(|byte| byte.is_ascii_hexdigit())
    {
        return None;
    }
    let (red, green, blue, _alpha) = parse_css_color(name)?;
    Some(Color::rgb(red, green, blue))
}

/// ASCII whitespace per the HTML standard (TAB, LF, FF, CR, SPACE).
const fn is_ascii_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}

/// Interpret a run of hex digit characters as one channel.
fn hex_component(digits: &[char]) -> Option<u8> {
    let value = digits.iter().try_fold(0_u32, |acc, digit| {
        let byte = u8::try_from(*digit).ok()?;
        Some(acc * 16 + u32::from(hex_value(byte)?))
    })?;
    u8::try_from(value).ok()
}

/// `#rgb`, where each digit is doubled.
fn parse_short_hex(input: &str) -> Option<Color> {
    let digits = input.strip_prefix('#')?;
    if digits.len() != 3 {
        return None;
    }
    let mut channels = [0_u8; 3];
    for (channel, byte) in channels.iter_mut().zip(digits.bytes()) {
        *channel = hex_value(byte)? * 17;
    }
    Some(Color::rgb(channels[0], channels[1], channels[2]))
}

/// Parse an attribute value with the legacy colour rules.
///
/// Returns `None` for the empty string and for `transparent`; every other
/// input yields some color, since non-hex characters are read as `0`.
pub fn parse_legacy_color_value(input: &str) -> Option<Color> {
    if input.is_empty() {
        return None;
    }
    let trimmed = input.trim_matches(is_ascii_whitespace);
    if trimmed.eq_ignore_ascii_case("transparent") {
        return None;
    }
    if let Some(color) = named_color(trimmed) {
        return Some(color);
    }
    if trimmed.chars().count() == 4
        && let Some(color) = parse_short_hex(trimmed)
    {
        return Some(color);
    }

    let mut digits: Vec<char> = Vec::with_capacity(trimmed.len());
    for character in trimmed.chars() {
        if u32::from(character) > 0xFFFF {
            digits.extend(['0', '0']);
        } else {
            digits.push(character);
        }
    }
    digits.truncate(LEGACY_MAX_LENGTH);
    if digits.first() == Some(&'#') {
        digits.remove(0);
    }
    for digit in &mut digits {
        if !digit.is_ascii_hexdigit() {
            *digit = '0';
        }
    }
    while digits.is_empty() || digits.len() % 3 != 0 {
        digits.push('0');
    }

    let mut length = digits.len() / 3;
    let components: Vec<&[char]> = digits.chunks(length).collect();
    let mut start = 0;
    if length > LEGACY_MAX_COMPONENT_LENGTH {
        start = length - LEGACY_MAX_COMPONENT_LENGTH;
        length = LEGACY_MAX_COMPONENT_LENGTH;
    }
    while length > 2
        && components
            .iter()
            .all(|component| component.get(start) == Some(&'0'))
    {
        start += 1;
        length -= 1;
    }
    let end = start + length.min(2);

    let mut channels = [0_u8; 3];
    for (channel, component) in channels.iter_mut().zip(&components) {
        *channel = hex_component(component.get(start..end)?)?;
    }
    Some(Color::rgb(channels[0], channels[1], channels[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_resolve() {
        assert_eq!(parse_legacy_color_value("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(
            parse_legacy_color_value("  Gray "),
            Some(Color::rgb(128, 128, 128))
        );
    }

    #[test]
    fn empty_and_transparent_fail() {
        assert_eq!(parse_legacy_color_value(""), None);
        assert_eq!(parse_legacy_color_value("TRANSPARENT"), None);
    }

    #[test]
    fn short_hex_doubles_digits() {
        assert_eq!(
            parse_legacy_color_value("#abc"),
            Some(Color::rgb(0xaa, 0xbb, 0xcc))
        );
    }

    #[test]
    fn six_digit_hex() {
        assert_eq!(
            parse_legacy_color_value("#102030"),
            Some(Color::rgb(0x10, 0x20, 0x30))
        );
    }

    #[test]
    fn garbage_is_coerced_to_digits() {
        // "chucknorris" -> c00c0000000 -> padded to c00c00000000 -> c00c / 0000 / 0000
        assert_eq!(
            parse_legacy_color_value("chucknorris"),
            Some(Color::rgb(0xc0, 0x00, 0x00))
        );
    }

    #[test]
    fn hex_looking_words_are_not_names() {
        assert_eq!(
            parse_legacy_color_value("abc"),
            Some(Color::rgb(0x0a, 0x0b, 0x0c))
        );
    }

    #[test]
    fn long_components_keep_low_digits() {
        // Three 10-digit components; the two high digits of each are dropped.
        assert_eq!(
            parse_legacy_color_value("#00ff00000000ee000000000000dd00"),
            Some(Color::rgb(0xff, 0xee, 0x00))
        );
    }

    #[test]
    fn odd_lengths_are_zero_padded() {
        // "0012345678" pads to "001234567800" -> 0012 / 3456 / 7800
        assert_eq!(
            parse_legacy_color_value("#0012345678"),
            Some(Color::rgb(0x00, 0x34, 0x78))
        );
    }
}
