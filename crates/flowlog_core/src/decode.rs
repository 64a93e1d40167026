//! Recursive decoding of JSON-encoded string fields.

use serde_json::Value;

/// Recursively decode JSON-encoded strings inside a value.
///
/// The platform frequently returns `inputs`/`outputs`/`process_data` as
/// JSON-encoded strings, and the payloads inside them may themselves contain
/// further JSON-encoded strings at arbitrary depth. This transform parses
/// every string that is valid JSON, recurses into arrays and objects, and
/// leaves everything else untouched.
///
/// The transform is idempotent: applying it to an already-structured value is
/// a no-op, and strings that are not valid JSON pass through unchanged.
///
/// # Examples
///
/// ```
/// use flowlog_core::decode_nested;
/// use serde_json::json;
///
/// let raw = json!({"inputs": "{\"query\": \"hi\"}"});
/// let decoded = decode_nested(raw);
/// assert_eq!(decoded["inputs"]["query"], "hi");
/// ```
pub fn decode_nested(value: Value) -> Value {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => decode_nested(parsed),
            Err(_) => Value::String(s),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(decode_nested).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, decode_nested(v)))
                .collect(),
        ),
        other => other,
    }
}
