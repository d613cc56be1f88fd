//! Canonicalization: rebuild every object with keys in ascending order.
//! Diff-friendly output; arrays keep element order. Not used by resolution.

use serde_json::{Map, Value};

pub fn sort_json_keys_deep(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sort_json_keys_deep).collect()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), sort_json_keys_deep(&map[key]));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
