// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Nested parameter to query string serialization
//!
//! Produces `&`-joined `key=value` pairs with bracket notation for nested
//! keys. Top-level leaves are written bare; nested leaves are written under
//! the namespace, e.g. `data[person][name]=tester`. Nothing is
//! percent-encoded.

use super::value::ParamValue;
use crate::config::DEFAULT_NAMESPACE;

/// Serialize a parameter structure into a query string.
///
/// - a string is returned unchanged
/// - anything that is neither a mapping nor a string yields `""`
/// - mappings are walked in insertion order; every nested mapping is
///   serialized recursively and contributes one opaque segment
pub fn serialize(params: &ParamValue, path_prefix: Option<&str>, namespace: &str) -> String {
    let entries = match params {
        ParamValue::String(s) => return s.clone(),
        ParamValue::Map(entries) => entries.as_slice(),
        // Null is walked like an object with no keys
        ParamValue::Null => &[][..],
        _ => return String::new(),
    };

    let mut stack = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        if value.is_object_like() {
            let nested_prefix = match path_prefix {
                Some(prefix) => format!("{}[{}]", prefix, key),
                None => format!("[{}]", key),
            };
            stack.push(serialize(value, Some(&nested_prefix), namespace));
        } else {
            let leaf = value.to_leaf_string();
            match path_prefix {
                Some(prefix) => stack.push(format!("{}{}[{}]={}", namespace, prefix, key, leaf)),
                None => stack.push(format!("{}={}", key, leaf)),
            }
        }
    }

    stack.join("&")
}

/// Query serializer bound to a namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySerializer {
    namespace: String,
}

impl Default for QuerySerializer {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl QuerySerializer {
    /// Create a serializer writing nested keys under `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Get the namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Serialize from the top level
    pub fn serialize(&self, params: &ParamValue) -> String {
        serialize(params, None, &self.namespace)
    }

    /// Serialize as if `params` were nested under `path_prefix`
    pub fn serialize_at(&self, params: &ParamValue, path_prefix: &str) -> String {
        serialize(params, Some(path_prefix), &self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> ParamValue {
        ParamValue::from(value)
    }

    #[test]
    fn test_top_level_has_no_namespace() {
        let query = serialize(&params(json!({"name": "Test", "value": 30})), None, "data");
        assert_eq!(query, "name=Test&value=30");
    }

    #[test]
    fn test_nested_keys_use_namespace() {
        let data = params(json!({
            "name": "Test",
            "value": 30,
            "person": {"name": "tester", "age": 50}
        }));
        assert_eq!(
            serialize(&data, None, "data"),
            "name=Test&value=30&data[person][name]=tester&data[person][age]=50"
        );
    }

    #[test]
    fn test_deep_nesting_and_custom_namespace() {
        let data = params(json!({"a": {"b": {"c": 1}}, "d": 2}));
        assert_eq!(serialize(&data, None, "ns"), "ns[a][b][c]=1&d=2");
    }

    #[test]
    fn test_string_passes_through() {
        let data = ParamValue::from("already=encoded&x=1");
        assert_eq!(serialize(&data, None, "data"), "already=encoded&x=1");
        assert_eq!(serialize(&data, Some("[ignored]"), "data"), "already=encoded&x=1");
    }

    #[test]
    fn test_non_map_values_are_empty() {
        assert_eq!(serialize(&ParamValue::Absent, None, "data"), "");
        assert_eq!(serialize(&ParamValue::from(42), None, "data"), "");
        assert_eq!(serialize(&ParamValue::from(true), None, "data"), "");
        assert_eq!(serialize(&ParamValue::map(), None, "data"), "");
    }

    #[test]
    fn test_arrays_are_index_keyed() {
        let data = params(json!({"tags": ["x", "y"]}));
        assert_eq!(serialize(&data, None, "data"), "data[tags][0]=x&data[tags][1]=y");
    }

    #[test]
    fn test_nested_null_leaves_empty_segment() {
        let data = params(json!({"a": 1, "b": null, "c": 2}));
        assert_eq!(serialize(&data, None, "data"), "a=1&&c=2");
    }

    #[test]
    fn test_no_percent_encoding() {
        let data = params(json!({"q": "a b&c", "flag": false}));
        assert_eq!(serialize(&data, None, "data"), "q=a b&c&flag=false");
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let data = params(json!({"x": {"y": [1, 2]}, "z": "w"}));
        let serializer = QuerySerializer::default();
        assert_eq!(serializer.serialize(&data), serializer.serialize(&data));
        assert_eq!(serializer.namespace(), "data");
    }

    #[test]
    fn test_serialize_at_prefix() {
        let serializer = QuerySerializer::new("data");
        let data = params(json!({"name": "tester"}));
        assert_eq!(serializer.serialize_at(&data, "[person]"), "data[person][name]=tester");
    }
}
