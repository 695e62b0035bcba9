// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport layer
//!
//! A transport is the host's request object: it is opened, configured with
//! headers, sent once, and reports its progress through a ready-state hook.
//! Hosts register one [`TransportFactory`] per capability they offer.

mod canned;
mod xhr;

use std::fmt;

use crate::error::Result;

pub use canned::{CannedFactory, CannedResponse, CannedTransport, RecordedRequest};
pub use xhr::{XhrFactory, XhrTransport};

/// Capability a transport belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// ActiveX-style request object, preferred when present
    Legacy,
    /// XMLHttpRequest-style request object
    Standard,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Legacy => write!(f, "{}", crate::request::constants::ACTIVEX),
            TransportKind::Standard => write!(f, "XMLHttpRequest"),
        }
    }
}

/// Request object ready states
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ReadyState {
    Unsent = 0,
    Opened = 1,
    HeadersReceived = 2,
    Loading = 3,
    Done = 4,
}

impl ReadyState {
    /// Numeric value as exposed by browser request objects
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if the exchange is fully loaded
    pub fn is_done(self) -> bool {
        self == ReadyState::Done
    }
}

/// Snapshot handed to the ready-state hook on every transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyStateEvent {
    pub ready_state: ReadyState,
    /// HTTP status, 0 until headers arrive or when the network failed
    pub status: u16,
    /// Response text, empty until the body is loaded
    pub response_text: String,
}

impl ReadyStateEvent {
    /// Event for a transition that carries no response yet
    pub fn progress(ready_state: ReadyState, status: u16) -> Self {
        Self {
            ready_state,
            status,
            response_text: String::new(),
        }
    }

    /// Event for the final transition
    pub fn done(status: u16, response_text: impl Into<String>) -> Self {
        Self {
            ready_state: ReadyState::Done,
            status,
            response_text: response_text.into(),
        }
    }
}

/// Hook invoked on ready-state transitions
pub type ReadyStateHook = Box<dyn FnMut(&ReadyStateEvent) + Send + 'static>;

/// A single-use request object
///
/// `send` consumes the transport: from then on it belongs to the host's
/// event loop until it reaches [`ReadyState::Done`]. Implementations must
/// not report `Done` before `send` returns.
///
/// The shipped transports spawn the exchange onto the current tokio
/// runtime. On a current-thread runtime the hook therefore only runs once
/// the caller yields. On a multi-thread runtime a worker may fire it as
/// soon as `send` has spawned the task, concurrently with the rest of the
/// caller's code; delivery is still exactly once.
pub trait Transport: Send {
    /// Capability this instance belongs to
    fn kind(&self) -> TransportKind;

    /// Install the ready-state hook
    fn set_on_ready_state_change(&mut self, hook: ReadyStateHook);

    /// Set method and target
    fn open(&mut self, method: &str, url: &str, asynchronous: bool) -> Result<()>;

    /// Add a request header; only valid after `open`
    fn set_request_header(&mut self, name: &str, value: &str) -> Result<()>;

    /// Start the exchange with `body` as payload
    fn send(self: Box<Self>, body: String) -> Result<()>;
}

/// Produces transports for one capability
pub trait TransportFactory: Send + Sync {
    /// Capability the produced transports are expected to belong to
    fn kind(&self) -> TransportKind;

    /// Create a fresh transport
    fn create(&self) -> Result<Box<dyn Transport>>;
}

/// Holder for an optional hook, shared by the transport implementations
#[derive(Default)]
pub(crate) struct HookSlot(Option<ReadyStateHook>);

impl HookSlot {
    pub(crate) fn set(&mut self, hook: ReadyStateHook) {
        self.0 = Some(hook);
    }

    pub(crate) fn fire(&mut self, event: &ReadyStateEvent) {
        if let Some(hook) = self.0.as_mut() {
            hook(event);
        }
    }
}
