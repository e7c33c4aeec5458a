//! Best-effort coercion of loosely typed option values
//!
//! Option objects come from untyped callers. A malformed value for one key
//! is dropped on its own; it never rejects the rest of the object.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dom::{px, sanitize};

/// `"short"` duration in milliseconds
pub const SHORT_MS: i64 = 1000;
/// `"long"` duration in milliseconds
pub const LONG_MS: i64 = 4000;
/// Duration used for unrecognized duration strings
pub const FALLBACK_MS: i64 = 1000;
/// Default dwell time for timed widgets
pub const DEFAULT_LENGTH_MS: i64 = 2000;
/// Duration value meaning "stay until dismissed"
pub const PERSISTENT: i64 = -1;

/// Text value, sanitized. Numbers are rendered as text.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(sanitize(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Boolean value from a bool, a number or `"true"`/`"false"`
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Numeric value from a number or a numeric-prefixed string
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => float_prefix(s),
        _ => None,
    }
}

/// Duration in milliseconds
///
/// Numbers are truncated. Strings are tokens: `"short"`, `"long"`
/// (case-insensitive), anything else maps to [`FALLBACK_MS`].
pub fn length(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64),
        Value::String(s) => Some(length_token(s)),
        _ => None,
    }
}

/// Map a duration token to milliseconds
pub fn length_token(token: &str) -> i64 {
    match token.to_ascii_lowercase().as_str() {
        "short" => SHORT_MS,
        "long" => LONG_MS,
        _ => FALLBACK_MS,
    }
}

/// Dwell time for a toast or snackbar duration
///
/// [`PERSISTENT`] never expires; other non-positive values expire at once.
pub fn dwell_ms(length: i64) -> Option<u32> {
    if length == PERSISTENT {
        None
    } else {
        Some(length.clamp(0, i64::from(u32::MAX)) as u32)
    }
}

/// CSS length: bare numbers (or numeric strings) get a `px` suffix
pub fn css_size(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().map(px),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<f64>() {
                Ok(_) => Some(format!("{}px", trimmed)),
                Err(_) => Some(sanitize(trimmed)),
            }
        }
        _ => None,
    }
}

/// Leading decimal integer of a string, ignoring leading whitespace
pub fn int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading decimal number of a string, ignoring leading whitespace
pub fn float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'-' || bytes[exp_end] == b'+') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Build an option patch from an untyped options object
///
/// `null` is an empty patch; anything that is not an object is ignored.
pub fn patch_from_value<P: DeserializeOwned + Default>(value: Value) -> P {
    match value {
        Value::Null => P::default(),
        Value::Object(_) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::debug!("[options] ignoring malformed options: {}", e);
            P::default()
        }),
        other => {
            log::debug!("[options] ignoring non-object options: {}", other);
            P::default()
        }
    }
}

/// `deserialize_with` adapters that never fail
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(super::text(&Value::deserialize(d)?))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(super::flag(&Value::deserialize(d)?))
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(super::number(&Value::deserialize(d)?))
    }

    /// Opacity: anything that is not a number becomes NaN so it is clamped
    /// to the fallback opacity when the widget is shown
    pub fn opacity<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Some(super::number(&Value::deserialize(d)?).unwrap_or(f64::NAN)))
    }

    pub fn length<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(super::length(&Value::deserialize(d)?))
    }

    pub fn css_size<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(super::css_size(&Value::deserialize(d)?))
    }

    /// Raw string for keyword options, parsed by the caller
    pub fn keyword<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(d)? {
            Value::String(s) => Ok(Some(s.trim().to_ascii_lowercase())),
            _ => Ok(None),
        }
    }
}
