// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Namespace applied to nested query keys when none is given
pub const DEFAULT_NAMESPACE: &str = "data";

/// Default user agent for network-backed host capabilities
pub const DEFAULT_USER_AGENT: &str = concat!("yellowlab/", env!("CARGO_PKG_VERSION"));

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Namespace for nested query keys
    pub namespace: String,
    /// Query parameter that names the JSONP callback
    pub callback_param: String,
    /// Prefix of generated JSONP function names
    pub function_prefix: String,
    /// Prefix of injected script element ids
    pub script_id_prefix: String,
    /// Range the JSONP token is drawn from
    pub token_range: RangeInclusive<u32>,
    /// User agent sent by the network transport and script loader
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            callback_param: "callback".to_string(),
            function_prefix: "jsonp".to_string(),
            script_id_prefix: "yellow-lab-".to_string(),
            token_range: 1_000_000..=9_999_999,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the JSONP callback parameter name
    pub fn callback_param(mut self, param: impl Into<String>) -> Self {
        self.callback_param = param.into();
        self
    }

    /// Set the JSONP function name prefix
    pub fn function_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.function_prefix = prefix.into();
        self
    }

    /// Set the script element id prefix
    pub fn script_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.script_id_prefix = prefix.into();
        self
    }

    /// Set the JSONP token range
    pub fn token_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.token_range = range;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Config for servers that expect jQuery-style callback names
    pub fn for_jquery_endpoints() -> Self {
        Self {
            function_prefix: "jQuery".to_string(),
            ..Default::default()
        }
    }

    /// Check the config before a host is built from it
    pub fn validate(&self) -> Result<()> {
        if self.callback_param.is_empty() {
            return Err(Error::config("JSONP callback parameter must not be empty"));
        }
        if self.function_prefix.is_empty() {
            return Err(Error::config("JSONP function prefix must not be empty"));
        }
        if self.token_range.is_empty() {
            return Err(Error::config(format!(
                "JSONP token range {:?} is empty",
                self.token_range
            )));
        }
        Ok(())
    }
}
