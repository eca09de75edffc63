//! Module: value::coercion
//! Responsibility: implicit type conversions of runtime values.
//! Does not own: comparison ordering or term encoding.
//! Boundary: pure functions over `Value`; never fail.

use crate::value::Value;

/// Truthiness used by logical operators and constant folding.
#[must_use]
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) | Value::Range(_) => true,
    }
}

/// Numeric conversion used by arithmetic.
///
/// Strings must be numeric in their entirety (surrounding whitespace is
/// ignored); anything else converts to `0`. Collections convert to the value
/// of their single element, or `0` when they hold zero or several elements.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null | Value::Object(_) => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return 0.0;
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0)
        }
        Value::Array(items) => match items.as_slice() {
            [single] => to_number(single),
            _ => 0.0,
        },
        Value::Range(range) => range.single().map_or(0.0, |n| n as f64),
    }
}

/// Integer conversion used for range bounds and array offsets.
///
/// Numbers truncate toward zero. Strings use their leading integer prefix
/// (`"4a"` is `4`, `"a4"` is `0`). Collections follow the single-element rule
/// of [`to_number`].
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn to_int64(value: &Value) -> i64 {
    match value {
        Value::Null | Value::Object(_) => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => {
            if n.is_finite() {
                n.trunc() as i64
            } else {
                0
            }
        }
        Value::String(s) => parse_int_prefix(s),
        Value::Array(items) => match items.as_slice() {
            [single] => to_int64(single),
            _ => 0,
        },
        Value::Range(range) => range.single().unwrap_or(0),
    }
}

// Leading whitespace, optional sign, then digits. No digits or overflow yields 0.
fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    let mut seen = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let digit = i64::from(byte - b'0');
        acc = match acc
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) })
        {
            Some(v) => v,
            None => return 0,
        };
    }

    if seen { acc } else { 0 }
}
