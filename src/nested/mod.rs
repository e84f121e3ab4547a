//! Transformations over nested JSON values: flattening, deep merge, pruning,
//! key rewriting, diffing and dimension nesting.
//!
//! Nothing here touches the disk or the network. Failures are limited to
//! inputs of the wrong shape.

mod diff;
mod dims;
mod filter;
mod flatten;
mod merge;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub use self::diff::{diff, Diff};
pub use self::dims::nest_dimensions;
pub use self::filter::{filter, filter_keys, map_keys, rename_keys};
pub use self::flatten::{flat, flatten, flatten_seq, uniq, unflatten};
pub use self::merge::{merge, MergePolicy};

/// Nesting depth: 0 for scalars, 1 + deepest child for containers.
pub fn depth(value: &Value) -> usize {
    match value {
        Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
        Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Number of leaves, counting empty containers as leaves like [`flatten`] does.
pub fn leaf_count(value: &Value) -> usize {
    match value {
        Value::Object(map) if !map.is_empty() => map.values().map(leaf_count).sum(),
        Value::Array(items) if !items.is_empty() => items.iter().map(leaf_count).sum(),
        _ => 1,
    }
}

/// Follow `path` through objects (by key) and arrays (by index).
pub fn get_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, seg| match node {
        Value::Object(map) => map.get(*seg),
        Value::Array(items) => items.get(seg.parse::<usize>().ok()?),
        _ => None,
    })
}

/// Set `leaf` at `path`, creating intermediate objects as needed. Array
/// segments must name an existing index or the next one (append).
pub fn insert_path(value: &mut Value, path: &[&str], leaf: Value) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        *value = leaf;
        return Ok(());
    };

    let mut node = value;
    for (i, seg) in parents.iter().enumerate() {
        node = match node {
            Value::Object(map) => map.entry(seg.to_string()).or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => {
                let idx = array_index(seg, items.len(), &path[..=i])?;
                if idx == items.len() {
                    items.push(Value::Object(Map::new()));
                }
                &mut items[idx]
            }
            _ => return Err(Error::invalid(format!("'{}' is not a container", path[..i].join(".")))),
        };
    }

    match node {
        Value::Object(map) => {
            map.insert(last.to_string(), leaf);
        }
        Value::Array(items) => {
            let idx = array_index(last, items.len(), path)?;
            if idx == items.len() { items.push(leaf) } else { items[idx] = leaf }
        }
        _ => return Err(Error::invalid(format!("'{}' is not a container", parents.join(".")))),
    }
    Ok(())
}

fn array_index(seg: &str, len: usize, path: &[&str]) -> Result<usize> {
    match seg.parse::<usize>() {
        Ok(idx) if idx <= len => Ok(idx),
        _ => Err(Error::invalid(format!("Bad array index at '{}'", path.join(".")))),
    }
}
