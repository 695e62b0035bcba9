// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Parameter value representation

use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::Result;

/// A request parameter: a leaf or an ordered mapping of further parameters
///
/// Lists have no dedicated variant. A JSON array converts into a mapping
/// keyed by element index, so `["a", "b"]` behaves like `{"0": "a", "1": "b"}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    /// No value at all
    #[default]
    Absent,
    /// Explicit null
    Null,
    /// Boolean leaf
    Bool(bool),
    /// Numeric leaf
    Number(Number),
    /// String leaf
    String(String),
    /// Ordered mapping, iterated in insertion order
    Map(Vec<(String, ParamValue)>),
}

impl ParamValue {
    /// Create an empty mapping
    pub fn map() -> Self {
        ParamValue::Map(Vec::new())
    }

    /// Add or replace an entry, turning a non-mapping value into a mapping
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an entry. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();

        if !self.is_map() {
            *self = ParamValue::map();
        }

        if let ParamValue::Map(entries) = self {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// Look up an entry of a mapping
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        match self {
            ParamValue::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Check if this is a mapping
    pub fn is_map(&self) -> bool {
        matches!(self, ParamValue::Map(_))
    }

    /// Check if this is a string
    pub fn is_string(&self) -> bool {
        matches!(self, ParamValue::String(_))
    }

    /// Check if the serializer descends into this value instead of printing it.
    ///
    /// Null counts as an object here, the same way it does for a browser's
    /// `typeof` check.
    pub(crate) fn is_object_like(&self) -> bool {
        matches!(self, ParamValue::Map(_) | ParamValue::Null)
    }

    /// Render a leaf the way string interpolation would
    pub fn to_leaf_string(&self) -> String {
        match self {
            ParamValue::Absent => "undefined".to_string(),
            ParamValue::Null => "null".to_string(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Number(n) => format_number(n),
            ParamValue::String(s) => s.clone(),
            ParamValue::Map(_) => "[object Object]".to_string(),
        }
    }

    /// Build a parameter structure from any serializable value
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }
}

/// Integers print without a fractional part, everything else uses the
/// shortest decimal representation.
fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_float).unwrap_or_else(|| n.to_string())
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else {
        f.to_string()
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => ParamValue::Number(n),
            Value::String(s) => ParamValue::String(s),
            Value::Array(items) => ParamValue::Map(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.into()))
                    .collect(),
            ),
            Value::Object(entries) => {
                ParamValue::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        match Number::from_f64(f) {
            Some(n) => ParamValue::Number(n),
            // NaN and infinities have no JSON number form
            None => ParamValue::String(format_float(f)),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(n: $t) -> Self {
                    ParamValue::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u8, u16, u32, u64, usize);

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Absent)
    }
}
