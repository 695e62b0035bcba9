// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Yellowlab - Minimal Async HTTP/JSONP Client
//!
//! Sends a request to a URL and hands the decoded reply to a resolve or
//! reject callback. Requests run through capabilities borrowed from a host:
//! a request object factory for HTTP, a document head for JSONP scripts.
//!
//! ## Features
//!
//! - Query strings: nested parameters flattened to `ns[a][b]=v`
//! - Request objects: legacy preferred over standard, with a kind check
//! - Exactly-once delivery: one of resolve/reject, after dispatch returns
//! - JSONP: script injection with a random callback token
//!
//! ## Example
//!
//! ```rust,no_run
//! use yellowlab::{ClientConfig, ParamValue, YellowLab};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YellowLab::network(ClientConfig::default())?;
//!
//!     let data = ParamValue::map().with("q", "rust");
//!     match client.get("https://example.com/search", data)?.await {
//!         Ok(body) => println!("{}", body),
//!         Err(body) => eprintln!("rejected: {}", body),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod query;
pub mod request;
pub mod transport;

pub use client::{Promise, Settlement, YellowLab};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use host::{CallbackRegistry, Document, Host, HostBuilder, ScriptElement, ScriptLoader};
pub use query::{ParamValue, QuerySerializer};
pub use request::{DispatchState, Method, Request};
pub use transport::{Transport, TransportFactory, TransportKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
