//! Deep merge of structured configuration documents.

use serde_yaml::{Mapping, Value};

/// Merges `overrides` on top of `base` and returns the merged document.
///
/// For every key of `overrides`: a mapping value is merged recursively into
/// the base value under the same key (a missing or non-mapping base value
/// counts as an empty mapping), any other value replaces the base value.
/// Sequences are replaced, never concatenated. Base keys keep their position,
/// keys only present in `overrides` are appended.
///
/// A non-mapping `overrides` document replaces `base` as a whole.
pub fn merge(base: &Value, overrides: &Value) -> Value {
    match overrides {
        Value::Mapping(overrides) => {
            let base = match base {
                Value::Mapping(base) => base.clone(),
                _ => Mapping::new(),
            };
            Value::Mapping(merge_mappings(base, overrides))
        }
        other => other.clone(),
    }
}

fn merge_mappings(mut base: Mapping, overrides: &Mapping) -> Mapping {
    for (key, value) in overrides {
        let merged = match value {
            Value::Mapping(_) => {
                let current = base.get(key).cloned().unwrap_or(Value::Null);
                merge(&current, value)
            }
            _ => value.clone(),
        };
        base.insert(key.clone(), merged);
    }
    base
}
