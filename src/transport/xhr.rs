// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Standard transport backed by reqwest

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use url::Url;

use super::{HookSlot, ReadyState, ReadyStateEvent, ReadyStateHook, Transport, TransportFactory, TransportKind};
use crate::config::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// XMLHttpRequest-style transport
///
/// Mirrors browser request object semantics: the body is dropped for GET
/// and HEAD, and a network failure completes with status 0 and no text
/// instead of an error.
pub struct XhrTransport {
    client: Client,
    method: Option<Method>,
    url: Option<Url>,
    headers: HeaderMap,
    hook: HookSlot,
}

impl XhrTransport {
    /// Create a transport using the given client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            method: None,
            url: None,
            headers: HeaderMap::new(),
            hook: HookSlot::default(),
        }
    }
}

impl Transport for XhrTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Standard
    }

    fn set_on_ready_state_change(&mut self, hook: ReadyStateHook) {
        self.hook.set(hook);
    }

    fn open(&mut self, method: &str, url: &str, asynchronous: bool) -> Result<()> {
        if !asynchronous {
            return Err(Error::transport("synchronous requests are not supported"));
        }

        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| Error::transport(format!("invalid method '{}': {}", method, e)))?;

        self.method = Some(method);
        self.url = Some(Url::parse(url)?);
        self.headers.clear();
        self.hook.fire(&ReadyStateEvent::progress(ReadyState::Opened, 0));
        Ok(())
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<()> {
        if self.method.is_none() {
            return Err(Error::transport("open() must be called before set_request_header()"));
        }

        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::transport(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::transport(format!("invalid header value: {}", e)))?;

        self.headers.append(name, value);
        Ok(())
    }

    fn send(self: Box<Self>, body: String) -> Result<()> {
        let XhrTransport {
            client,
            method,
            url,
            headers,
            mut hook,
        } = *self;

        let (method, url) = match (method, url) {
            (Some(method), Some(url)) => (method, url),
            _ => return Err(Error::transport("open() must be called before send()")),
        };

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| Error::transport("send() requires a running tokio runtime"))?;

        tracing::debug!(method = %method, url = %url, "Sending request");

        runtime.spawn(async move {
            let mut builder = client.request(method.clone(), url.clone()).headers(headers);
            if method != Method::GET && method != Method::HEAD {
                builder = builder.body(body);
            }

            match builder.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    hook.fire(&ReadyStateEvent::progress(ReadyState::HeadersReceived, status));
                    hook.fire(&ReadyStateEvent::progress(ReadyState::Loading, status));

                    let text = match response.text().await {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::warn!(url = %url, error = %e, "Failed to read response body");
                            String::new()
                        }
                    };
                    hook.fire(&ReadyStateEvent::done(status, text));
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Request failed");
                    hook.fire(&ReadyStateEvent::done(0, ""));
                }
            }
        });

        Ok(())
    }
}

/// Factory for [`XhrTransport`], sharing one HTTP client
#[derive(Clone)]
pub struct XhrFactory {
    client: Client,
}

impl XhrFactory {
    /// Create a factory with the default user agent
    pub fn new() -> Result<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a factory sending the given user agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Create a factory around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl TransportFactory for XhrFactory {
    fn kind(&self) -> TransportKind {
        TransportKind::Standard
    }

    fn create(&self) -> Result<Box<dyn Transport>> {
        Ok(Box::new(XhrTransport::new(self.client.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> XhrTransport {
        XhrTransport::new(Client::new())
    }

    #[test]
    fn test_open_rejects_sync() {
        let mut xhr = transport();
        assert!(xhr.open("GET", "http://test.com", false).is_err());
    }

    #[test]
    fn test_open_rejects_relative_url() {
        let mut xhr = transport();
        assert!(matches!(xhr.open("GET", "/relative", true), Err(Error::Url(_))));
    }

    #[test]
    fn test_header_before_open_fails() {
        let mut xhr = transport();
        assert!(xhr.set_request_header("Content-type", "application/json").is_err());
    }

    #[test]
    fn test_open_fires_opened() {
        let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut xhr = transport();
        xhr.set_on_ready_state_change(Box::new(move |e| sink.lock().push(e.ready_state)));
        xhr.open("PATCH", "http://test.com/a", true).unwrap();
        xhr.set_request_header("Content-type", "application/json").unwrap();

        assert_eq!(*seen.lock(), vec![ReadyState::Opened]);
        assert_eq!(xhr.headers.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_send_without_runtime_fails() {
        let mut xhr = Box::new(transport());
        xhr.open("GET", "http://test.com", true).unwrap();
        assert!(xhr.send(String::new()).is_err());
    }

    #[test]
    fn test_factory_kind() {
        let factory = XhrFactory::new().unwrap();
        assert_eq!(factory.kind(), TransportKind::Standard);
        assert_eq!(factory.create().unwrap().kind(), TransportKind::Standard);
    }
}
