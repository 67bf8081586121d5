//! Best-effort numeric extraction from raw attribute values.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    // Optional sign, digit groups optionally separated by commas, optional
    // decimal part.  US-style grouping only (comma thousands separator,
    // period decimal point).
    static ref NUMBER: Regex =
        Regex::new(r"[-+]?([0-9]+,?)*\.?[0-9]+").expect("valid regex");
}

/// Pull a number out of a raw attribute value.
///
/// Numbers pass through unchanged, strings are scanned with
/// [`extract_number`], everything else (null, booleans, containers) is
/// `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => extract_number(s),
        _ => None,
    }
}

/// Find the first number in a possibly-formatted string,
/// e.g. `"1,500.25 units"` → `1500.25`.
pub fn extract_number(text: &str) -> Option<f64> {
    let found = NUMBER.find(text)?;
    let digits = found.as_str().replace(',', "");
    digits.parse::<f64>().ok().filter(|n| !n.is_nan())
}
