// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request dispatcher

use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;
use serde_json::Value;

use super::completion::{Completion, CompletionResult};
use super::constants::headers_for;
use super::Method;
use crate::error::{Error, Result};
use crate::host::{Host, ScriptElement};
use crate::query::{ParamValue, QuerySerializer};
use crate::transport::{ReadyStateEvent, Transport, TransportFactory};

/// Lifecycle of a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// `handle` has not been called
    Idle,
    /// Sent, no outcome yet
    Dispatched,
    /// Resolve ran
    Succeeded,
    /// Reject ran
    Failed,
}

impl DispatchState {
    /// Check if an outcome was delivered
    pub fn is_completed(self) -> bool {
        matches!(self, DispatchState::Succeeded | DispatchState::Failed)
    }
}

/// One request against a host
///
/// Built once per exchange and dispatched once with [`Request::handle`].
/// The transport factory is resolved at construction, so a host without a
/// request object fails here rather than at dispatch time.
pub struct Request {
    url: String,
    data: ParamValue,
    method: Method,
    namespace: String,
    host: Host,
    factory: Option<Arc<dyn TransportFactory>>,
    state: Arc<RwLock<DispatchState>>,
}

impl Request {
    /// Create a request using the host's configured namespace
    pub fn new(
        host: &Host,
        url: impl Into<String>,
        data: impl Into<ParamValue>,
        method: impl Into<Method>,
    ) -> Result<Self> {
        let namespace = host.config().namespace.clone();
        Self::with_namespace(host, url, data, method, namespace)
    }

    /// Create a request writing nested query keys under `namespace`
    pub fn with_namespace(
        host: &Host,
        url: impl Into<String>,
        data: impl Into<ParamValue>,
        method: impl Into<Method>,
        namespace: impl Into<String>,
    ) -> Result<Self> {
        let method = method.into();

        let factory = if method.is_jsonp() {
            if host.script_loader().is_none() {
                return Err(Error::ScriptLoaderUnavailable);
            }
            None
        } else {
            Some(host.select_transport_factory()?)
        };

        Ok(Self {
            url: url.into(),
            data: data.into(),
            method,
            namespace: namespace.into(),
            host: host.clone(),
            factory,
            state: Arc::new(RwLock::new(DispatchState::Idle)),
        })
    }

    /// Target URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parameters
    pub fn data(&self) -> &ParamValue {
        &self.data
    }

    /// Method tag
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Namespace for nested query keys
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Current lifecycle state
    pub fn state(&self) -> DispatchState {
        *self.state.read()
    }

    /// The query string this request sends
    pub fn query_string(&self) -> String {
        QuerySerializer::new(self.namespace.as_str()).serialize(&self.data)
    }

    /// Dispatch the request
    ///
    /// Exactly one of `resolve`/`reject` eventually runs, once; for JSONP
    /// only `resolve` can run, and neither runs if the remote script never
    /// calls back. An `Err` means nothing was delivered and nothing will be.
    ///
    /// On a current-thread runtime the callback runs after this returns. On
    /// a multi-thread runtime it may run on a worker while this is still
    /// returning.
    pub fn handle<R, J>(&self, resolve: R, reject: J) -> Result<()>
    where
        R: FnOnce(Value) + Send + 'static,
        J: FnOnce(Value) + Send + 'static,
    {
        {
            let mut state = self.state.write();
            if *state != DispatchState::Idle {
                return Err(Error::AlreadyDispatched {
                    url: self.url.clone(),
                });
            }
            *state = DispatchState::Dispatched;
        }

        let completion = Completion::new(resolve, reject);

        match self.method {
            Method::Jsonp => self.jsonp(completion),
            _ => self.http(completion),
        }
    }

    fn http(&self, completion: Completion) -> Result<()> {
        let query = self.query_string();

        let factory = self.factory.as_ref().ok_or(Error::TransportUnavailable)?;
        let mut transport = factory.create()?;

        if transport.kind() != factory.kind() {
            tracing::warn!(
                expected = %factory.kind(),
                actual = %transport.kind(),
                url = %self.url,
                "Request object is not of the expected kind, not sending"
            );
            return Err(Error::TransportTypeMismatch {
                expected: factory.kind(),
                actual: transport.kind(),
            });
        }

        self.setup(transport.as_mut(), completion)?;

        tracing::debug!(method = %self.method, url = %self.url, query = %query, "Dispatching request");
        transport.send(query)
    }

    fn setup(&self, transport: &mut dyn Transport, completion: Completion) -> Result<()> {
        let state = self.state.clone();
        let url = self.url.clone();

        transport.set_on_ready_state_change(Box::new(move |event: &ReadyStateEvent| {
            if !event.ready_state.is_done() {
                return;
            }

            let result = CompletionResult::from_response(event.status, &event.response_text);
            tracing::info!(url = %url, status = event.status, ok = result.ok, "Request completed");

            if completion.is_settled() {
                return;
            }
            *state.write() = if result.ok {
                DispatchState::Succeeded
            } else {
                DispatchState::Failed
            };
            completion.settle(result);
        }));

        transport.open(self.method.as_str(), &self.url, true)?;

        for (name, value) in headers_for(&self.method) {
            transport.set_request_header(name, value)?;
        }

        Ok(())
    }

    fn jsonp(&self, completion: Completion) -> Result<()> {
        let query = self.query_string();
        let loader = self.host.script_loader().ok_or(Error::ScriptLoaderUnavailable)?;
        let config = self.host.config();

        let token: u32 = rand::rng().random_range(config.token_range.clone());
        let function_name = format!("{}{}", config.function_prefix, token);

        let state = self.state.clone();
        self.host.callbacks().register(function_name.clone(), move |data| {
            *state.write() = DispatchState::Succeeded;
            completion.resolve(data);
        });

        let src = format!(
            "{}?{}={}&{}",
            self.url, config.callback_param, function_name, query
        );
        let script = ScriptElement::new(format!("{}{}", config.script_id_prefix, token), src);

        tracing::debug!(url = %self.url, token, function = %function_name, "Injecting JSONP script");

        if let Err(e) = loader.append_to_head(script, self.host.callbacks()) {
            self.host.callbacks().remove(&function_name);
            return Err(e);
        }

        Ok(())
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("namespace", &self.namespace)
            .field("data", &self.data)
            .field("state", &self.state())
            .finish()
    }
}
