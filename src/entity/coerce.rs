//! Lenient parsing of form input and backend values

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Leading integer of `s`, ignoring surrounding text ("12abc" -> 12)
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Leading decimal number of `s` ("150.5 USD" -> 150.5)
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            digits += 1;
        }
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
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
    s[..end].parse().ok().filter(|v: &f64| v.is_finite())
}

/// Amount-like field: unparseable input becomes 0
pub fn amount_or_zero(s: &str) -> f64 {
    parse_float(s).unwrap_or(0.0)
}

/// Count-like field: unparseable input becomes 0
pub fn count_or_zero(s: &str) -> i64 {
    parse_int(s).unwrap_or(0)
}

/// Foreign key: unparseable input becomes null and is left for the backend to reject
pub fn reference_or_null(s: &str) -> Value {
    parse_int(s).map(Value::from).unwrap_or(Value::Null)
}

/// Optional text: empty becomes null
pub fn text_or_null(s: &str) -> Value {
    if s.trim().is_empty() {
        Value::Null
    } else {
        Value::String(s.to_string())
    }
}

/// Deserialize text that may arrive as null or as a number
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Deserialize text that may be missing, treating blank as absent
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = lenient_string(deserializer)?;
    Ok(if s.trim().is_empty() { None } else { Some(s) })
}

/// Deserialize a number that may arrive as null or as numeric text
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(&s),
        _ => None,
    })
}

/// Deserialize an integer that may arrive as null, float or numeric text
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_int(&s),
        _ => None,
    })
}

/// Deserialize a labelled enum; unknown or missing labels read as `None`
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let s = lenient_string(deserializer)?;
    Ok(s.trim().parse().ok())
}
