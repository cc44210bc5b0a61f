//! Numeric coercion of raw request parameters
//!
//! A raw value is numeric when it is a JSON number, or a string whose whole
//! content (ignoring surrounding whitespace) is a decimal or hexadecimal
//! literal. Anything else fails the request: there is no defaulting and no
//! partial parsing, so `"12abc"`, `"1."`, `"inf"` and `""` are all rejected.
//!
//! Accepted string forms:
//! - `[+-]? digits ('.' digits)? ([eE] [+-]? digits)?`
//! - `[+-]? '.' digits ([eE] [+-]? digits)?`
//! - `[+-]? 0x hexdigits`
//!
//! A single `_` may separate two digits (`"1_000.5"`).

use crate::error::{DispatchError, Result};
use crate::types::{ArgName, CalibrationArgs, RawParams};
use serde_json::Value;

/// Coerce one raw parameter value to a finite `f64`
///
/// `name` is only used to describe the failure.
pub fn coerce_float(name: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    };

    parsed.ok_or_else(|| DispatchError::NonNumeric {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Select the whitelisted parameters of a request and coerce each of them
///
/// Keys outside `whitelist` are dropped without inspection. A whitelisted
/// key that is present but not numeric fails the whole set, whether or not
/// the argument is required.
pub fn filter_and_coerce(raw: &RawParams, whitelist: &[ArgName]) -> Result<CalibrationArgs> {
    whitelist
        .iter()
        .filter_map(|name| raw.get(name.as_str()).map(|value| (*name, value)))
        .map(|(name, value)| coerce_float(name.as_str(), value).map(|f| (name, f)))
        .collect()
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());

    let (negative, body) = match trimmed.as_bytes().first()? {
        b'+' => (false, &trimmed[1..]),
        b'-' => (true, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit() || b == b'_') {
            return None;
        }
        let digits = strip_digit_separators(hex, |b| b.is_ascii_hexdigit())?;
        u64::from_str_radix(&digits, 16).ok()? as f64
    } else {
        let literal = strip_digit_separators(body, |b| b.is_ascii_digit())?;
        if !is_decimal_literal(&literal) {
            return None;
        }
        literal.parse::<f64>().ok()?
    };

    if !magnitude.is_finite() {
        return None;
    }

    Some(if negative { -magnitude } else { magnitude })
}

/// Remove `_` separators, each of which must sit between two digits
fn strip_digit_separators(text: &str, is_digit: impl Fn(u8) -> bool) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i.checked_sub(1).and_then(|j| bytes.get(j)).copied();
            let after = bytes.get(i + 1).copied();
            match (before, after) {
                (Some(l), Some(r)) if is_digit(l) && is_digit(r) => continue,
                _ => return None,
            }
        }
        out.push(b as char);
    }

    Some(out)
}

fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = count_digits(bytes);
    let int_digits = pos;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        if frac_digits == 0 {
            return false;
        }
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
