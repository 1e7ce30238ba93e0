//! Numeric microsyntaxes used by presentational attributes.
//! Spec: <https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#numbers>

use css_cascade::StyleValue;
use css_values_units::{Length, Percentage};

/// Result of the rules for parsing dimension values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DimensionValue {
    /// A length in CSS pixels.
    Length(f32),
    /// A percentage as written, e.g. `50.0` for `50%`.
    Percentage(f32),
}

impl DimensionValue {
    fn magnitude(self) -> f32 {
        match self {
            Self::Length(value) | Self::Percentage(value) => value,
        }
    }
}

impl From<DimensionValue> for StyleValue {
    fn from(value: DimensionValue) -> Self {
        match value {
            DimensionValue::Length(px) => Self::Length(Length::px(px)),
            DimensionValue::Percentage(percent) => {
                Self::Percentage(Percentage::from_percent(percent))
            }
        }
    }
}

const fn is_ascii_whitespace(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

/// Byte cursor over an attribute value.
struct Cursor<'input> {
    bytes: &'input [u8],
    position: usize,
}

impl<'input> Cursor<'input> {
    const fn new(input: &'input str) -> Self {
        Self {
            bytes: input.as_bytes(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_ascii_whitespace) {
            self.position += 1;
        }
    }

    fn next_digit(&mut self) -> Option<u8> {
        let byte = self.peek().filter(u8::is_ascii_digit)?;
        self.position += 1;
        Some(byte - b'0')
    }
}

/// Rules for parsing integers. Trailing garbage is ignored; overflow fails.
///
/// Spec: <https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#rules-for-parsing-integers>
pub fn parse_integer(input: &str) -> Option<i32> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    let negative = match cursor.peek()? {
        b'-' => {
            cursor.position += 1;
            true
        }
        b'+' => {
            cursor.position += 1;
            false
        }
        _ => false,
    };
    let mut value = i32::from(cursor.next_digit()?);
    while let Some(digit) = cursor.next_digit() {
        value = value.checked_mul(10)?.checked_add(i32::from(digit))?;
    }
    Some(if negative { -value } else { value })
}

/// Rules for parsing dimension values.
///
/// Spec: <https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#rules-for-parsing-dimension-values>
pub fn parse_dimension_value(input: &str) -> Option<DimensionValue> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    let mut value = f64::from(cursor.next_digit()?);
    while let Some(digit) = cursor.next_digit() {
        value = value * 10.0 + f64::from(digit);
    }
    if cursor.peek() == Some(b'.') {
        cursor.position += 1;
        if !cursor.peek().is_some_and(|byte| byte.is_ascii_digit()) {
            return Some(DimensionValue::Length(value as f32));
        }
        let mut divisor = 1.0_f64;
        while let Some(digit) = cursor.next_digit() {
            divisor *= 10.0;
            value += f64::from(digit) / divisor;
        }
    }
    if cursor.peek() == Some(b'%') {
        return Some(DimensionValue::Percentage(value as f32));
    }
    Some(DimensionValue::Length(value as f32))
}

/// Rules for parsing non-zero dimension values.
///
/// Spec: <https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#rules-for-parsing-non-zero-dimension-values>
pub fn parse_nonzero_dimension_value(input: &str) -> Option<DimensionValue> {
    parse_dimension_value(input).filter(|value| value.magnitude() != 0.0)
}
