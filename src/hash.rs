//! Deterministic pseudo-random coloring by value hash.

use serde_json::Value;
use crate::NEUTRAL_GRAY;

/// Color a value by hashing its textual form.
///
/// Strings are hashed as-is, anything else is hashed over its JSON
/// serialization.  The 32-bit hash is used directly as an HSL hue in
/// `hsla(hue, 100%, 50%, 0.75)`; consuming renderers interpret hues modulo
/// 360, so the raw value is intentionally not reduced here.  Null values
/// (and the literal strings `"null"` / `"undefined"`) map to
/// [`NEUTRAL_GRAY`].
pub fn color_hash(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text == "null" || text == "undefined" {
        return NEUTRAL_GRAY.to_string();
    }

    // h = (h << 5) - h + unit over UTF-16 code units, wrapping at 32 bits
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    format!("hsla({}, 100%, 50%, 0.75)", hash)
}
