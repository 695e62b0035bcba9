// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for yellowlab
//!
//! Only synchronous failures live here: a dispatcher that cannot be built,
//! a transport that cannot be configured, a `handle` that is misused.
//! Everything that happens after a request is sent is delivered through the
//! resolve/reject callbacks instead.

use thiserror::Error;

use crate::transport::TransportKind;

/// Result type alias for yellowlab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for yellowlab
#[derive(Error, Debug)]
pub enum Error {
    /// The host exposes neither a legacy nor a standard transport factory
    #[error("Host doesn't have a request object available")]
    TransportUnavailable,

    /// The transport produced by a factory is not of the factory's kind
    #[error("Transport kind mismatch: expected {expected}, got {actual}")]
    TransportTypeMismatch {
        expected: TransportKind,
        actual: TransportKind,
    },

    /// The host has no document head to inject JSONP scripts into
    #[error("Host doesn't have a script loader available")]
    ScriptLoaderUnavailable,

    /// `handle` was called on a dispatcher that already dispatched
    #[error("Request to {url} has already been dispatched")]
    AlreadyDispatched { url: String },

    /// Transport-level failure while configuring or sending
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP client failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the host lacked a transport capability
    pub fn is_transport_unavailable(&self) -> bool {
        matches!(self, Error::TransportUnavailable)
    }

    /// Check if this error was caused by misuse of the API rather than the host
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::AlreadyDispatched { .. } | Error::Config(_))
    }

    /// Check if the error comes from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::TransportUnavailable
                | Error::TransportTypeMismatch { .. }
                | Error::Transport(_)
                | Error::Http(_)
        )
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_unavailable() {
        let err = Error::TransportUnavailable;
        assert!(err.is_transport_unavailable());
        assert!(err.is_transport());
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_already_dispatched_is_caller_error() {
        let err = Error::AlreadyDispatched {
            url: "http://test.com".to_string(),
        };
        assert!(err.is_caller_error());
        assert_eq!(
            err.to_string(),
            "Request to http://test.com has already been dispatched"
        );
    }

    #[test]
    fn test_kind_mismatch_message() {
        let err = Error::TransportTypeMismatch {
            expected: TransportKind::Legacy,
            actual: TransportKind::Standard,
        };
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "Transport kind mismatch: expected Microsoft.XMLHTTP, got XMLHttpRequest"
        );
    }
}
