//! Forgiving field readers for stored snapshots
//!
//! Snapshots may be hand-edited or written by older versions. A field that is
//! `null` or has the wrong shape falls back to its default instead of failing
//! the whole snapshot; list entries that cannot be read are skipped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a field, using `T::default()` when it is null or does not fit
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::warn!(
                error = %e,
                field = std::any::type_name::<T>(),
                "unreadable stored field; using the default"
            );
            Ok(T::default())
        }
    }
}

/// Read a list, keeping the entries that parse and dropping the rest
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(found = %kind(&other), "stored list is not an array; using an empty list");
            return Ok(Vec::new());
        }
    };

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if parsed.len() < total {
        tracing::warn!(
            dropped = total - parsed.len(),
            "skipped unreadable entries in a stored list"
        );
    }
    Ok(parsed)
}

/// Read an ID stored as a string or a bare number; anything else gets a fresh ID
pub fn id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(token) if !token.trim().is_empty() => T::from(token),
        Value::Number(n) => T::from(n.to_string()),
        _ => T::default(),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
