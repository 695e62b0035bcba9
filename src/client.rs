// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! High level client

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use parking_lot::Mutex;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::host::Host;
use crate::query::ParamValue;
use crate::request::{Method, Request};

/// Outcome of a request: `Ok` when resolved, `Err` when rejected
pub type Settlement = std::result::Result<Value, Value>;

/// Future of a dispatched request
///
/// Never completes if the request is never settled, e.g. a JSONP endpoint
/// that does not call back.
#[derive(Debug)]
pub struct Promise {
    receiver: oneshot::Receiver<Settlement>,
    abandoned: bool,
}

impl Promise {
    /// Create a promise and the resolve/reject pair that settles it
    pub fn channel() -> (
        Self,
        impl FnOnce(Value) + Send + 'static,
        impl FnOnce(Value) + Send + 'static,
    ) {
        let (sender, receiver) = oneshot::channel();
        let sender = Arc::new(Mutex::new(Some(sender)));
        let on_reject = sender.clone();

        let resolve = move |value| {
            if let Some(sender) = sender.lock().take() {
                let _ = sender.send(Ok(value));
            }
        };
        let reject = move |value| {
            if let Some(sender) = on_reject.lock().take() {
                let _ = sender.send(Err(value));
            }
        };

        (
            Self {
                receiver,
                abandoned: false,
            },
            resolve,
            reject,
        )
    }

    /// Take the outcome if it has arrived
    pub fn try_settlement(&mut self) -> Option<Settlement> {
        match self.receiver.try_recv() {
            Ok(settlement) => settlement,
            Err(_) => {
                self.abandoned = true;
                None
            }
        }
    }
}

impl Future for Promise {
    type Output = Settlement;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.abandoned {
            return Poll::Pending;
        }

        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(settlement)) => Poll::Ready(settlement),
            Poll::Ready(Err(_)) => {
                // Callbacks dropped unsettled: stay pending
                self.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Client facade over a [`Host`]
#[derive(Debug, Clone)]
pub struct YellowLab {
    host: Host,
    namespace: String,
}

impl YellowLab {
    /// Create a client using the host's configured namespace
    pub fn new(host: Host) -> Self {
        let namespace = host.config().namespace.clone();
        Self { host, namespace }
    }

    /// Create a client talking to the network
    pub fn network(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(Host::network(config)?))
    }

    /// Override the query namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Namespace nested query keys are written under
    pub fn query_namespace(&self) -> &str {
        &self.namespace
    }

    /// Host requests run against
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Build a request without dispatching it
    pub fn new_request(
        &self,
        url: impl Into<String>,
        data: impl Into<ParamValue>,
        method: impl Into<Method>,
    ) -> Result<Request> {
        Request::with_namespace(&self.host, url, data, method, self.namespace.as_str())
    }

    /// Dispatch a request and return its promise
    pub fn retrieve(
        &self,
        url: impl Into<String>,
        data: impl Into<ParamValue>,
        method: impl Into<Method>,
    ) -> Result<Promise> {
        let request = self.new_request(url, data, method)?;
        let (promise, resolve, reject) = Promise::channel();
        request.handle(resolve, reject)?;
        Ok(promise)
    }

    /// `GET` request
    pub fn get(&self, url: impl Into<String>, data: impl Into<ParamValue>) -> Result<Promise> {
        self.retrieve(url, data, Method::Get)
    }

    /// `POST` request
    pub fn post(&self, url: impl Into<String>, data: impl Into<ParamValue>) -> Result<Promise> {
        self.retrieve(url, data, Method::Post)
    }

    /// JSONP request
    pub fn retrieve_jsonp(
        &self,
        url: impl Into<String>,
        data: impl Into<ParamValue>,
    ) -> Result<Promise> {
        self.retrieve(url, data, Method::Jsonp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::Document;
    use crate::transport::{CannedFactory, TransportKind};
    use serde_json::json;

    fn client(factory: CannedFactory) -> YellowLab {
        YellowLab::new(Host::builder().standard_transport(factory).build().unwrap())
    }

    #[tokio::test]
    async fn test_get_resolves() {
        let yellow = client(CannedFactory::standard(200, r#"{"ok":true}"#));
        let result = yellow.get("http://test.com", ParamValue::map()).unwrap().await;
        assert_eq!(result, Ok(json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_retrieve_rejects() {
        let yellow = client(CannedFactory::standard(500, "boom"));
        let result = yellow
            .retrieve("http://test.com", ParamValue::map(), "POST")
            .unwrap()
            .await;
        assert_eq!(result, Err(json!("boom")));
    }

    #[tokio::test]
    async fn test_namespace_reaches_query() {
        let factory = CannedFactory::standard(200, "");
        let yellow = client(factory.clone()).with_namespace("custom");
        assert_eq!(yellow.query_namespace(), "custom");

        let data = ParamValue::map().with("a", ParamValue::map().with("b", 1));
        yellow.post("http://test.com", data).unwrap().await.unwrap();

        assert_eq!(factory.requests()[0].body, "custom[a][b]=1");
    }

    #[test]
    fn test_default_namespace() {
        let yellow = client(CannedFactory::standard(200, ""));
        assert_eq!(yellow.query_namespace(), "data");
        let request = yellow.new_request("http://test.com", ParamValue::map(), "GET").unwrap();
        assert_eq!(request.namespace(), "data");
    }

    #[tokio::test]
    async fn test_kind_mismatch_surfaces() {
        let factory = CannedFactory::legacy(200, "").producing(TransportKind::Standard);
        let yellow = YellowLab::new(Host::builder().legacy_transport(factory).build().unwrap());
        let result = yellow.get("http://test.com", ParamValue::map());
        assert!(matches!(result, Err(Error::TransportTypeMismatch { .. })));
    }

    #[tokio::test]
    async fn test_jsonp_resolves_through_registry() {
        let document = Document::new();
        let yellow = YellowLab::new(Host::builder().script_loader(document).build().unwrap());
        let mut promise = yellow
            .retrieve_jsonp("http://test.com/api", ParamValue::map())
            .unwrap();
        assert_eq!(promise.try_settlement(), None);

        let name = yellow.host().callbacks().names().remove(0);
        assert!(yellow.host().callbacks().invoke(&name, json!([1, 2])));

        assert_eq!(promise.await, Ok(json!([1, 2])));
    }

    #[test]
    fn test_dropped_callbacks_stay_pending() {
        let (promise, resolve, reject) = Promise::channel();
        let mut promise = tokio_test::task::spawn(promise);
        tokio_test::assert_pending!(promise.poll());

        drop(resolve);
        drop(reject);
        tokio_test::assert_pending!(promise.poll());
    }

    #[test]
    fn test_first_settlement_wins() {
        let (mut promise, resolve, reject) = Promise::channel();
        reject(json!("no"));
        resolve(json!("yes"));
        assert_eq!(promise.try_settlement(), Some(Err(json!("no"))));
    }
}
