use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Key-level comparison of two objects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diff {
    /// Keys only in the current object.
    pub added: BTreeSet<String>,
    /// Keys only in the past object.
    pub removed: BTreeSet<String>,
    /// Shared keys whose values differ.
    pub changed: BTreeSet<String>,
    /// Shared keys with equal values.
    pub unchanged: BTreeSet<String>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare `current` against `past`.
pub fn diff(current: &Map<String, Value>, past: &Map<String, Value>) -> Diff {
    let mut out = Diff::default();
    for (k, v) in current {
        match past.get(k) {
            None => { out.added.insert(k.clone()); }
            Some(old) if old == v => { out.unchanged.insert(k.clone()); }
            Some(_) => { out.changed.insert(k.clone()); }
        }
    }
    out.removed = past.keys().filter(|k| !current.contains_key(*k)).cloned().collect();
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn classifies_keys() {
        let d = diff(&obj(json!({"a": 1, "b": 2, "c": {"x": 1}})), &obj(json!({"b": 3, "c": {"x": 1}, "d": 4})));
        assert_eq!(d.added, BTreeSet::from(["a".to_string()]));
        assert_eq!(d.removed, BTreeSet::from(["d".to_string()]));
        assert_eq!(d.changed, BTreeSet::from(["b".to_string()]));
        assert_eq!(d.unchanged, BTreeSet::from(["c".to_string()]));
        assert!(!d.is_empty());

        let same = obj(json!({"k": [1, 2]}));
        assert!(diff(&same, &same).is_empty());
    }
}
