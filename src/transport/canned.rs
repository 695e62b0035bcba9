// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Canned transport
//!
//! Answers every request with a preset status and body and records what was
//! sent. Hosts use it to stub the network; the factory can also claim one
//! kind while producing another, which exercises the kind check.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{HookSlot, ReadyState, ReadyStateEvent, ReadyStateHook, Transport, TransportFactory, TransportKind};
use crate::error::{Error, Result};

/// Response replayed by a canned transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    /// Create a canned response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// A request as it reached the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Get the first header with this name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport answering with a [`CannedResponse`]
pub struct CannedTransport {
    kind: TransportKind,
    response: CannedResponse,
    opened: Option<(String, String)>,
    headers: Vec<(String, String)>,
    hook: HookSlot,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedTransport {
    /// Create a standalone canned transport
    pub fn new(kind: TransportKind, response: CannedResponse) -> Self {
        Self::with_log(kind, response, Arc::new(Mutex::new(Vec::new())))
    }

    fn with_log(
        kind: TransportKind,
        response: CannedResponse,
        log: Arc<Mutex<Vec<RecordedRequest>>>,
    ) -> Self {
        Self {
            kind,
            response,
            opened: None,
            headers: Vec::new(),
            hook: HookSlot::default(),
            log,
        }
    }
}

impl Transport for CannedTransport {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn set_on_ready_state_change(&mut self, hook: ReadyStateHook) {
        self.hook.set(hook);
    }

    fn open(&mut self, method: &str, url: &str, _asynchronous: bool) -> Result<()> {
        self.opened = Some((method.to_string(), url.to_string()));
        self.headers.clear();
        self.hook.fire(&ReadyStateEvent::progress(ReadyState::Opened, 0));
        Ok(())
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<()> {
        if self.opened.is_none() {
            return Err(Error::transport("open() must be called before set_request_header()"));
        }
        self.headers.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn send(self: Box<Self>, body: String) -> Result<()> {
        let CannedTransport {
            response,
            opened,
            headers,
            mut hook,
            log,
            ..
        } = *self;

        let (method, url) = opened.ok_or_else(|| Error::transport("open() must be called before send()"))?;

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| Error::transport("send() requires a running tokio runtime"))?;

        log.lock().push(RecordedRequest {
            method,
            url,
            headers,
            body,
        });

        runtime.spawn(async move {
            hook.fire(&ReadyStateEvent::progress(ReadyState::HeadersReceived, response.status));
            hook.fire(&ReadyStateEvent::progress(ReadyState::Loading, response.status));
            hook.fire(&ReadyStateEvent::done(response.status, response.body));
        });

        Ok(())
    }
}

/// Factory handing out [`CannedTransport`]s
///
/// Responses are consumed in order; once the queue is empty the fallback
/// response is used for every further request.
#[derive(Clone)]
pub struct CannedFactory {
    kind: TransportKind,
    produces: TransportKind,
    queue: Arc<Mutex<VecDeque<CannedResponse>>>,
    fallback: CannedResponse,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedFactory {
    /// Create a factory answering every request with `response`
    pub fn new(kind: TransportKind, response: CannedResponse) -> Self {
        Self {
            kind,
            produces: kind,
            queue: Arc::new(Mutex::new(VecDeque::new())),
            fallback: response,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Standard-kind factory answering with `status` and `body`
    pub fn standard(status: u16, body: impl Into<String>) -> Self {
        Self::new(TransportKind::Standard, CannedResponse::new(status, body))
    }

    /// Legacy-kind factory answering with `status` and `body`
    pub fn legacy(status: u16, body: impl Into<String>) -> Self {
        Self::new(TransportKind::Legacy, CannedResponse::new(status, body))
    }

    /// Make the factory produce transports of another kind than it claims
    pub fn producing(mut self, kind: TransportKind) -> Self {
        self.produces = kind;
        self
    }

    /// Queue a response for the next request
    pub fn enqueue(&self, response: CannedResponse) {
        self.queue.lock().push_back(response);
    }

    /// Requests sent through transports of this factory
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().clone()
    }
}

impl TransportFactory for CannedFactory {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn create(&self) -> Result<Box<dyn Transport>> {
        let response = self
            .queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        Ok(Box::new(CannedTransport::with_log(
            self.produces,
            response,
            self.log.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_transport_completes_after_send() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();

        let mut transport = Box::new(CannedTransport::new(
            TransportKind::Standard,
            CannedResponse::ok(r#"{"a":1}"#),
        ));
        transport.set_on_ready_state_change(Box::new(move |e| sink.lock().push(e.clone())));
        transport.open("GET", "http://test.com", true).unwrap();
        transport.send(String::new()).unwrap();

        // Nothing but OPENED until the event loop runs
        assert_eq!(events.lock().len(), 1);

        tokio::task::yield_now().await;

        let events = events.lock();
        assert_eq!(events.len(), 4);
        assert_eq!(events[3], ReadyStateEvent::done(200, r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_factory_queue_then_fallback() {
        let factory = CannedFactory::standard(500, "fallback");
        factory.enqueue(CannedResponse::ok("first"));

        let first = factory.create().unwrap();
        let second = factory.create().unwrap();
        assert_eq!(first.kind(), TransportKind::Standard);
        assert_eq!(second.kind(), TransportKind::Standard);

        let mut first = first;
        first.open("POST", "http://test.com", true).unwrap();
        first.set_request_header("X-Requested-With", "XMLHttpRequest").unwrap();
        first.send("a=1".to_string()).unwrap();

        let requests = factory.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, "a=1");
        assert_eq!(requests[0].header("x-requested-with"), Some("XMLHttpRequest"));
    }

    #[test]
    fn test_factory_can_misreport_kind() {
        let factory = CannedFactory::legacy(200, "").producing(TransportKind::Standard);
        assert_eq!(factory.kind(), TransportKind::Legacy);
        assert_eq!(factory.create().unwrap().kind(), TransportKind::Standard);
    }

    #[test]
    fn test_send_before_open_fails() {
        let transport = Box::new(CannedTransport::new(
            TransportKind::Standard,
            CannedResponse::ok(""),
        ));
        assert!(transport.send(String::new()).is_err());
    }
}
