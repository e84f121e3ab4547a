use serde_json::{Map, Value};

use crate::error::{Error, Result};

fn walk(value: &Value, path: Option<&str>, sep: &str, out: &mut Map<String, Value>) -> Result<()> {
    let key = |k: &str| match path {
        None => k.to_string(),
        Some(prefix) => format!("{prefix}{sep}{k}"),
    };
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (k, v) in map {
                walk(v, Some(&key(k)), sep, out)?;
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, v) in items.iter().enumerate() {
                walk(v, Some(&key(&i.to_string())), sep, out)?;
            }
        }
        leaf => {
            let flat_key = path.unwrap_or_default();
            // The empty key is reserved for a scalar root.
            if out.contains_key(flat_key) || (flat_key.is_empty() && path.is_some()) {
                return Err(Error::invalid(format!(
                    "Flattened key '{flat_key}' is produced by more than one path (separator '{sep}')"
                )));
            }
            out.insert(flat_key.to_string(), leaf.clone());
        }
    }
    Ok(())
}

/// Flatten nested objects and arrays into a single-level map of `sep`-joined
/// paths to leaves. Array indices become path segments and empty containers
/// are kept as leaves. A scalar root maps from the empty key.
///
/// Fails when two paths join to the same key, e.g. a key that itself
/// contains `sep` next to the nested path it spells out.
pub fn flatten(value: &Value, sep: &str) -> Result<Map<String, Value>> {
    if sep.is_empty() {
        return Err(Error::invalid("Separator must not be empty"));
    }
    let mut out = Map::new();
    walk(value, None, sep, &mut out)?;
    Ok(out)
}

/// Turn objects whose keys are exactly `0..n` (in any order) back into arrays.
fn restore_arrays(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut indices: Vec<usize> = map.keys().filter_map(|k| k.parse().ok()).collect();
            indices.sort_unstable();
            let indexed = !map.is_empty()
                && indices.len() == map.len()
                && indices.iter().enumerate().all(|(i, &n)| i == n);
            if indexed {
                let mut items: Vec<(usize, Value)> = map.into_iter()
                    .filter_map(|(k, v)| Some((k.parse().ok()?, restore_arrays(v))))
                    .collect();
                items.sort_unstable_by_key(|(i, _)| *i);
                Value::Array(items.into_iter().map(|(_, v)| v).collect())
            } else {
                Value::Object(map.into_iter().map(|(k, v)| (k, restore_arrays(v))).collect())
            }
        }
        other => other,
    }
}

/// Rebuild a nested value from [`flatten`] output.
pub fn unflatten(flat: &Map<String, Value>, sep: &str) -> Result<Value> {
    if sep.is_empty() {
        return Err(Error::invalid("Separator must not be empty"));
    }
    if let Some(root) = flat.get("") {
        if flat.len() > 1 {
            return Err(Error::invalid("Root leaf mixed with nested keys"));
        }
        return Ok(root.clone());
    }

    // Objects only; index-keyed objects become arrays afterwards.
    let mut root = Value::Object(Map::new());
    for (key, leaf) in flat {
        let path: Vec<&str> = key.split(sep).collect();
        insert_object_path(&mut root, &path, leaf.clone())?;
    }
    Ok(restore_arrays(root))
}

fn insert_object_path(root: &mut Value, path: &[&str], leaf: Value) -> Result<()> {
    let mut node = root;
    for (depth, seg) in path.iter().enumerate() {
        let Value::Object(map) = node else {
            return Err(Error::invalid(format!("Key '{}' is both a leaf and a container", path[..depth].join("."))));
        };
        if depth + 1 == path.len() {
            if map.contains_key(*seg) {
                return Err(Error::invalid(format!("Duplicate key '{}'", path.join("."))));
            }
            map.insert(seg.to_string(), leaf);
            return Ok(());
        }
        node = map.entry(seg.to_string()).or_insert_with(|| Value::Object(Map::new()));
    }
    Ok(())
}

/// Recursively flatten nested arrays into a single list; other values are kept as items.
pub fn flat(values: &[Value]) -> Vec<Value> {
    let mut out = Vec::new();
    for v in values {
        match v {
            Value::Array(items) => out.extend(flat(items)),
            other => out.push(other.clone()),
        }
    }
    out
}

/// Flatten a list of lists by one level, or through every level when `recursive`.
/// A non-array argument is treated as a one-element list.
pub fn flatten_seq(value: &Value, recursive: bool) -> Vec<Value> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    };
    if recursive {
        return flat(items);
    }
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(inner) => out.extend(inner.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    out
}

/// Drop repeated values, keeping first occurrences in order.
pub fn uniq(values: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}
