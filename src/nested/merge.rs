use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// How [`merge`] resolves two non-object values under the same key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Gather both into an array: scalars are wrapped, arrays are extended.
    #[default]
    Collect,
    /// The later value wins.
    Overwrite,
    /// The earlier value wins.
    KeepFirst,
    /// Differing values are an error.
    Strict,
}

impl FromStr for MergePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "collect" => Ok(Self::Collect),
            "overwrite" | "last" => Ok(Self::Overwrite),
            "keep-first" | "keepfirst" | "first" => Ok(Self::KeepFirst),
            "strict" => Ok(Self::Strict),
            other => Err(Error::invalid(format!("Unknown merge policy: '{other}'"))),
        }
    }
}

fn merge_into(target: &mut Map<String, Value>, src: &Map<String, Value>, policy: MergePolicy, path: &mut Vec<String>) -> Result<()> {
    for (k, v) in src {
        let Some(current) = target.get_mut(k) else {
            target.insert(k.clone(), v.clone());
            continue;
        };
        path.push(k.clone());
        match (current, v) {
            (Value::Object(cur), Value::Object(new)) => merge_into(cur, new, policy, path)?,
            (current, v) => match policy {
                MergePolicy::Overwrite => *current = v.clone(),
                MergePolicy::KeepFirst => {}
                MergePolicy::Strict => {
                    if current != v {
                        return Err(Error::invalid(format!(
                            "Merge conflict at '{}': {current} vs {v}", path.join(".")
                        )));
                    }
                }
                MergePolicy::Collect => {
                    if !current.is_array() {
                        *current = Value::Array(vec![current.take()]);
                    }
                    if let Value::Array(items) = current {
                        match v {
                            Value::Array(more) => items.extend(more.iter().cloned()),
                            other => items.push(other.clone()),
                        }
                    }
                }
            },
        }
        path.pop();
    }
    Ok(())
}

/// Deep merge `values` from left to right. Nested objects merge recursively and
/// other conflicts are settled by `policy`. Every input must be an object.
pub fn merge(values: &[Value], policy: MergePolicy) -> Result<Value> {
    let mut out = Map::new();
    for (i, v) in values.iter().enumerate() {
        let Value::Object(map) = v else {
            return Err(Error::invalid(format!("Merge input {i} is not an object")));
        };
        merge_into(&mut out, map, policy, &mut Vec::new())?;
    }
    Ok(Value::Object(out))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn collect_gathers_conflicts() {
        let merged = merge(&[json!({"1": 2, "3": 4, "10": 11}), json!({"1": 6, "3": 7})], MergePolicy::Collect).unwrap();
        assert_eq!(merged, json!({"1": [2, 6], "3": [4, 7], "10": 11}));

        let d1 = json!({"1": 2, "3": {"4": {"5": 6, "7": 8}, "9": 10}, "11": 12});
        let d2 = json!({"1": -2, "3": {"4": {"-5": {"-6": -7}}}, "8": -9});
        let merged = merge(&[d1, d2], MergePolicy::Collect).unwrap();
        assert_eq!(merged, json!({"1": [2, -2], "3": {"4": {"-5": {"-6": -7}, "5": 6, "7": 8}, "9": 10}, "8": -9, "11": 12}));

        let lists = merge(&[json!({"a": [1]}), json!({"a": [2, 3]}), json!({"a": 4})], MergePolicy::Collect).unwrap();
        assert_eq!(lists, json!({"a": [1, 2, 3, 4]}));
    }

    #[test]
    fn other_policies() {
        let a = json!({"x": 1, "n": {"y": 1}});
        let b = json!({"x": 2, "n": {"z": 2}});
        assert_eq!(merge(&[a.clone(), b.clone()], MergePolicy::Overwrite).unwrap(), json!({"x": 2, "n": {"y": 1, "z": 2}}));
        assert_eq!(merge(&[a.clone(), b.clone()], MergePolicy::KeepFirst).unwrap(), json!({"x": 1, "n": {"y": 1, "z": 2}}));
        assert!(merge(&[a.clone(), b], MergePolicy::Strict).is_err());
        assert_eq!(merge(&[a.clone(), a.clone()], MergePolicy::Strict).unwrap(), a);
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(merge(&[json!({}), json!([1])], MergePolicy::Collect).is_err());
        assert_eq!(merge(&[], MergePolicy::Collect).unwrap(), json!({}));
    }
}
