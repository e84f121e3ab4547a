use serde_json::{Map, Value};

use crate::error::{Error, Result};

fn key_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build a nested object with one level per dimension, in order.
///
/// `[("a", [1, 2]), ("b", [3, 4])]` gives `{"1": {"3": .., "4": ..}, "2": {"3": .., "4": ..}}`.
/// Leaves are empty objects, or the entries of `fill` in row-major order when
/// given; `fill` must then hold exactly one value per leaf. Repeated dimension
/// values are collapsed.
pub fn nest_dimensions(dims: &[(String, Vec<Value>)], fill: Option<&[Value]>) -> Result<Value> {
    let levels: Vec<Vec<String>> = dims.iter()
        .map(|(_, values)| {
            let mut keys: Vec<String> = Vec::with_capacity(values.len());
            for k in values.iter().map(key_of) {
                if !keys.contains(&k) { keys.push(k) }
            }
            keys
        })
        .collect();

    for ((name, _), keys) in dims.iter().zip(&levels) {
        if keys.is_empty() {
            return Err(Error::invalid(format!("Dimension '{name}' has no values")));
        }
    }

    let leaves: usize = levels.iter().map(Vec::len).product();
    if let Some(fill) = fill {
        if fill.len() != leaves {
            return Err(Error::invalid(format!("Expected {leaves} fill values, got {}", fill.len())));
        }
    }

    let mut next = 0;
    Ok(build(&levels, fill, &mut next))
}

fn build(levels: &[Vec<String>], fill: Option<&[Value]>, next: &mut usize) -> Value {
    let Some((keys, rest)) = levels.split_first() else {
        let leaf = fill.and_then(|f| f.get(*next).cloned()).unwrap_or_else(|| Value::Object(Map::new()));
        *next += 1;
        return leaf;
    };
    Value::Object(keys.iter().map(|k| (k.clone(), build(rest, fill, next))).collect())
}
