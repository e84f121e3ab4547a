use std::collections::HashMap;

use serde_json::{Map, Value};

fn prune<F>(value: &Value, path: &mut Vec<String>, pred: &mut F) -> Option<Value>
where
    F: FnMut(&[String], &Value) -> bool,
{
    match value {
        Value::Object(map) if !map.is_empty() => {
            let mut kept = Map::new();
            for (k, v) in map {
                path.push(k.clone());
                if let Some(v) = prune(v, path, pred) {
                    kept.insert(k.clone(), v);
                }
                path.pop();
            }
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
        Value::Array(items) if !items.is_empty() => {
            let mut kept = Vec::new();
            for (i, v) in items.iter().enumerate() {
                path.push(i.to_string());
                if let Some(v) = prune(v, path, pred) {
                    kept.push(v);
                }
                path.pop();
            }
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        leaf => pred(path, leaf).then(|| leaf.clone()),
    }
}

/// Keep the leaves for which `pred(path, leaf)` holds. Containers left empty
/// by the pruning are dropped; `None` when nothing survives.
pub fn filter<F>(value: &Value, mut pred: F) -> Option<Value>
where
    F: FnMut(&[String], &Value) -> bool,
{
    prune(value, &mut Vec::new(), &mut pred)
}

/// Keep only the listed top-level keys of an object; other values are returned unchanged.
pub fn filter_keys(value: &Value, keys: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Recursively rewrite every object key with `f`.
pub fn map_keys<F>(value: &Value, f: &mut F) -> Value
where
    F: FnMut(&str) -> String,
{
    match value {
        Value::Object(map) => Value::Object(map.iter().map(|(k, v)| (f(k), map_keys(v, f))).collect()),
        Value::Array(items) => Value::Array(items.iter().map(|v| map_keys(v, f)).collect()),
        leaf => leaf.clone(),
    }
}

/// Recursively rename object keys found in `mapping`; other keys are kept.
pub fn rename_keys(value: &Value, mapping: &HashMap<String, String>) -> Value {
    map_keys(value, &mut |k: &str| mapping.get(k).cloned().unwrap_or_else(|| k.to_string()))
}
