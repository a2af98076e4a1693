use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render any JSON value as display text
///
/// Strings are returned verbatim, null becomes an empty string, everything else is
/// rendered as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Custom deserializer for free-text fields that may hold any JSON type
pub fn deserialize_lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}
