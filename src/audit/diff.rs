//! Top-level field diffs for audit entries

use serde_json::Value;
use std::collections::BTreeSet;

/// Describe what changed between two JSON values, or `None` if nothing did
///
/// Objects are compared one level deep in key order; any other pair of values
/// is reported as a single change.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    if before == after {
        return None;
    }

    let (Value::Object(b), Value::Object(a)) = (before, after) else {
        return Some(format!("{} -> {}", format_value(before), format_value(after)));
    };

    let keys: BTreeSet<&String> = b.keys().chain(a.keys()).collect();
    let changes: Vec<String> = keys
        .into_iter()
        .filter_map(|key| match (b.get(key), a.get(key)) {
            (Some(old), Some(new)) if old == new => None,
            (Some(old), Some(new)) => Some(format!(
                "{}: {} -> {}",
                key,
                format_value(old),
                format_value(new)
            )),
            (Some(old), None) => Some(format!("{}: {} -> (removed)", key, format_value(old))),
            (None, Some(new)) => Some(format!("{}: (added) -> {}", key, format_value(new))),
            (None, None) => None,
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) if fields.is_empty() => "{}".to_string(),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
