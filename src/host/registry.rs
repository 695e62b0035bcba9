// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSONP callback registry

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

/// One-shot JSONP callback
pub type JsonpCallback = Box<dyn FnOnce(Value) + Send + Sync + 'static>;

/// Thread-safe function name -> callback table
///
/// Stands in for the page's global namespace. Each JSONP dispatch owns one
/// slot under its generated function name; the slot disappears when it is
/// invoked. Slots whose script never calls back stay registered.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Arc<DashMap<String, JsonpCallback>>,
}

impl CallbackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Returns false if it replaced an existing one.
    pub fn register<F>(&self, name: impl Into<String>, callback: F) -> bool
    where
        F: FnOnce(Value) + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self.callbacks.insert(name.clone(), Box::new(callback)).is_some();
        if replaced {
            tracing::warn!(function = %name, "JSONP callback name collision, previous callback dropped");
        }
        !replaced
    }

    /// Remove and run the callback registered under `name`
    ///
    /// Returns false if nothing is registered under that name.
    pub fn invoke(&self, name: &str, data: Value) -> bool {
        // Removed before running so the map is not locked during the call
        match self.callbacks.remove(name) {
            Some((_, callback)) => {
                tracing::debug!(function = %name, "Invoking JSONP callback");
                callback(data);
                true
            }
            None => {
                tracing::warn!(function = %name, "No JSONP callback registered");
                false
            }
        }
    }

    /// Drop a callback without running it
    pub fn remove(&self, name: &str) -> bool {
        self.callbacks.remove(name).is_some()
    }

    /// Check if a callback is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Registered function names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.callbacks.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of pending callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no callbacks are pending
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("pending", &self.names())
            .finish()
    }
}
