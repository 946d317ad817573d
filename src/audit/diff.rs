//! Diff generation for audit logging
//!
//! Summarizes what changed when a budget replaces an earlier one for the
//! same month.

use serde_json::Value;

/// Generate a human-readable diff between two JSON values
///
/// Nested objects (such as category limits) are walked and reported with
/// dotted field paths. Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, prefix: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let path = join_path(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) => collect_changes(before_val, after_val, &path, changes),
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        path,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_path(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        _ => {
            if before != after {
                let change = format!("{} -> {}", format_value(before), format_value(after));
                if prefix.is_empty() {
                    changes.push(change);
                } else {
                    changes.push(format!("{}: {}", prefix, change));
                }
            }
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let truncated: String = s.chars().take(47).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
