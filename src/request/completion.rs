// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Single-assignment completion cell

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// Success callback
pub type Resolve = Box<dyn FnOnce(Value) + Send + 'static>;

/// Failure callback
pub type Reject = Box<dyn FnOnce(Value) + Send + 'static>;

/// Decoded outcome of an exchange
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub ok: bool,
    /// Parsed JSON, or the raw text as a JSON string when it does not parse
    pub body: Value,
}

impl CompletionResult {
    /// Decode a finished response. Only 200 and 202 count as success.
    pub fn from_response(status: u16, response_text: &str) -> Self {
        let body = serde_json::from_str(response_text)
            .unwrap_or_else(|_| Value::String(response_text.to_string()));

        Self {
            ok: matches!(status, 200 | 202),
            body,
        }
    }
}

/// Holds a resolve/reject pair and lets exactly one of them run, once
#[derive(Clone)]
pub struct Completion {
    callbacks: Arc<Mutex<Option<(Resolve, Reject)>>>,
}

impl Completion {
    /// Create a pending completion
    pub fn new<R, J>(resolve: R, reject: J) -> Self
    where
        R: FnOnce(Value) + Send + 'static,
        J: FnOnce(Value) + Send + 'static,
    {
        Self {
            callbacks: Arc::new(Mutex::new(Some((Box::new(resolve), Box::new(reject))))),
        }
    }

    /// Deliver a decoded result. Returns false if already settled.
    pub fn settle(&self, result: CompletionResult) -> bool {
        if result.ok {
            self.resolve(result.body)
        } else {
            self.reject(result.body)
        }
    }

    /// Run the success callback. Returns false if already settled.
    pub fn resolve(&self, body: Value) -> bool {
        match self.take() {
            Some((resolve, _)) => {
                resolve(body);
                true
            }
            None => false,
        }
    }

    /// Run the failure callback. Returns false if already settled.
    pub fn reject(&self, body: Value) -> bool {
        match self.take() {
            Some((_, reject)) => {
                reject(body);
                true
            }
            None => false,
        }
    }

    /// Check if a callback already ran
    pub fn is_settled(&self) -> bool {
        self.callbacks.lock().is_none()
    }

    // The lock is released before the callback runs
    fn take(&self) -> Option<(Resolve, Reject)> {
        self.callbacks.lock().take()
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("settled", &self.is_settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Calls = Arc<Mutex<Vec<(&'static str, Value)>>>;

    fn recording() -> (Completion, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let on_resolve = calls.clone();
        let on_reject = calls.clone();
        let completion = Completion::new(
            move |v| on_resolve.lock().push(("resolve", v)),
            move |v| on_reject.lock().push(("reject", v)),
        );
        (completion, calls)
    }

    #[test]
    fn test_status_gate() {
        assert!(CompletionResult::from_response(200, "{}").ok);
        assert!(CompletionResult::from_response(202, "{}").ok);
        assert!(!CompletionResult::from_response(201, "{}").ok);
        assert!(!CompletionResult::from_response(404, "{}").ok);
        assert!(!CompletionResult::from_response(0, "").ok);
    }

    #[test]
    fn test_body_decoding() {
        assert_eq!(CompletionResult::from_response(200, r#"{"a":1}"#).body, json!({"a": 1}));
        assert_eq!(
            CompletionResult::from_response(200, "plain text").body,
            json!("plain text")
        );
        assert_eq!(CompletionResult::from_response(200, "").body, json!(""));
    }

    #[test]
    fn test_settles_once() {
        let (completion, calls) = recording();

        assert!(completion.settle(CompletionResult::from_response(404, r#"{"a":1}"#)));
        assert!(completion.is_settled());
        assert!(!completion.resolve(json!(2)));
        assert!(!completion.reject(json!(3)));

        assert_eq!(*calls.lock(), vec![("reject", json!({"a": 1}))]);
    }

    #[test]
    fn test_clones_share_the_cell() {
        let (completion, calls) = recording();
        let other = completion.clone();

        assert!(other.resolve(json!(42)));
        assert!(!completion.resolve(json!(43)));
        assert_eq!(*calls.lock(), vec![("resolve", json!(42))]);
    }
}
