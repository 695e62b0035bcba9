// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSONP script evaluation
//!
//! There is no JavaScript engine here. A JSONP response is a single call of
//! a global function with a JSON argument, which is all that is recognized:
//!
//! - `jsonp1234567({"a":1});`
//! - `window.jsonp1234567([1,2])`
//! - `/**/ typeof jsonp1234567 === 'function' && jsonp1234567({"a":1});`

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::registry::CallbackRegistry;
use crate::error::{Error, Result};

lazy_static! {
    static ref JSONP_CALL: Regex = Regex::new(
        r#"(?s)^\s*(?:/\*\*/)?\s*(?:typeof\s+[\w$.]+\s*===?\s*['"]function['"]\s*&&\s*)?(?:window\.)?([A-Za-z_$][\w$]*)\s*\((.*)\)\s*;?\s*$"#
    )
    .expect("JSONP call pattern is valid");
}

/// A parsed JSONP invocation
#[derive(Debug, Clone, PartialEq)]
pub struct JsonpCall {
    pub function: String,
    pub payload: Value,
}

/// Parse a JSONP response body
pub fn parse_jsonp(source: &str) -> Result<JsonpCall> {
    let captures = JSONP_CALL
        .captures(source)
        .ok_or_else(|| Error::other("script is not a JSONP call"))?;

    let function = captures[1].to_string();
    let argument = captures[2].trim();
    let payload = if argument.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(argument)?
    };

    Ok(JsonpCall { function, payload })
}

/// Run a JSONP response against the registry
///
/// Returns whether a registered callback was invoked.
pub fn execute_jsonp(source: &str, registry: &CallbackRegistry) -> Result<bool> {
    let call = parse_jsonp(source)?;
    Ok(registry.invoke(&call.function, call.payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_call() {
        let call = parse_jsonp(r#"jsonp1234567({"a":1});"#).unwrap();
        assert_eq!(call.function, "jsonp1234567");
        assert_eq!(call.payload, json!({"a": 1}));
    }

    #[test]
    fn test_guarded_call() {
        let call =
            parse_jsonp("/**/ typeof jsonp42 === 'function' && jsonp42([1,2]);").unwrap();
        assert_eq!(call.function, "jsonp42");
        assert_eq!(call.payload, json!([1, 2]));
    }

    #[test]
    fn test_window_prefix_and_multiline() {
        let call = parse_jsonp("window.cb(\n  {\"x\": \"(y)\"}\n)\n").unwrap();
        assert_eq!(call.function, "cb");
        assert_eq!(call.payload, json!({"x": "(y)"}));
    }

    #[test]
    fn test_empty_argument_is_null() {
        assert_eq!(parse_jsonp("cb()").unwrap().payload, Value::Null);
    }

    #[test]
    fn test_rejects_other_scripts() {
        assert!(parse_jsonp("var x = 1;").is_err());
        assert!(matches!(parse_jsonp("cb({not json})"), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_execute_invokes_registry() {
        let registry = CallbackRegistry::new();
        let seen = std::sync::Arc::new(parking_lot::Mutex::new(None));
        let sink = seen.clone();
        registry.register("jsonp7654321", move |v| *sink.lock() = Some(v));

        assert!(execute_jsonp("jsonp7654321(42)", &registry).unwrap());
        assert_eq!(*seen.lock(), Some(json!(42)));
        assert!(!execute_jsonp("jsonp7654321(42)", &registry).unwrap());
    }
}
