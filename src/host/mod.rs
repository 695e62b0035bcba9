// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host capabilities
//!
//! Everything a dispatcher borrows from its environment: request object
//! factories, a document to inject JSONP scripts into, and the callback
//! table those scripts call back through.

mod document;
mod loader;
mod registry;
mod script;

use std::fmt;
use std::sync::Arc;

pub use document::{Document, ScriptElement, ScriptLoader};
pub use loader::NetworkScriptLoader;
pub use registry::{CallbackRegistry, JsonpCallback};
pub use script::{execute_jsonp, parse_jsonp, JsonpCall};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::transport::{TransportFactory, XhrFactory};

/// The environment requests run in
#[derive(Clone)]
pub struct Host {
    legacy: Option<Arc<dyn TransportFactory>>,
    standard: Option<Arc<dyn TransportFactory>>,
    script_loader: Option<Arc<dyn ScriptLoader>>,
    callbacks: CallbackRegistry,
    config: ClientConfig,
}

impl Host {
    /// Start building a host with no capabilities
    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    /// Host performing real network exchanges
    pub fn network(config: ClientConfig) -> Result<Self> {
        let loader = NetworkScriptLoader::with_user_agent(Document::new(), &config.user_agent)?;
        let factory = XhrFactory::with_user_agent(&config.user_agent)?;

        Self::builder()
            .standard_transport(factory)
            .script_loader(loader)
            .config(config)
            .build()
    }

    /// Pick the request object factory: legacy when present, else standard
    pub fn select_transport_factory(&self) -> Result<Arc<dyn TransportFactory>> {
        self.legacy
            .as_ref()
            .or(self.standard.as_ref())
            .cloned()
            .ok_or(Error::TransportUnavailable)
    }

    /// Check if any request object factory is registered
    pub fn has_transport(&self) -> bool {
        self.legacy.is_some() || self.standard.is_some()
    }

    /// Script injection capability
    pub fn script_loader(&self) -> Option<&Arc<dyn ScriptLoader>> {
        self.script_loader.as_ref()
    }

    /// Document scripts are injected into
    pub fn document(&self) -> Option<&Document> {
        self.script_loader.as_ref().map(|loader| loader.document())
    }

    /// JSONP callback table
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("legacy", &self.legacy.as_ref().map(|t| t.kind()))
            .field("standard", &self.standard.as_ref().map(|t| t.kind()))
            .field("script_loader", &self.script_loader.is_some())
            .field("callbacks", &self.callbacks)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`Host`]
#[derive(Default)]
pub struct HostBuilder {
    legacy: Option<Arc<dyn TransportFactory>>,
    standard: Option<Arc<dyn TransportFactory>>,
    script_loader: Option<Arc<dyn ScriptLoader>>,
    callbacks: Option<CallbackRegistry>,
    config: ClientConfig,
}

impl HostBuilder {
    /// Register the legacy request object factory
    pub fn legacy_transport(mut self, factory: impl TransportFactory + 'static) -> Self {
        self.legacy = Some(Arc::new(factory));
        self
    }

    /// Register the standard request object factory
    pub fn standard_transport(mut self, factory: impl TransportFactory + 'static) -> Self {
        self.standard = Some(Arc::new(factory));
        self
    }

    /// Register the script injection capability
    pub fn script_loader(mut self, loader: impl ScriptLoader + 'static) -> Self {
        self.script_loader = Some(Arc::new(loader));
        self
    }

    /// Share an existing callback registry
    pub fn callbacks(mut self, callbacks: CallbackRegistry) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// Set client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the host
    pub fn build(self) -> Result<Host> {
        self.config.validate()?;

        Ok(Host {
            legacy: self.legacy,
            standard: self.standard,
            script_loader: self.script_loader,
            callbacks: self.callbacks.unwrap_or_default(),
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{CannedFactory, TransportKind};

    #[test]
    fn test_no_transport() {
        let host = Host::builder().build().unwrap();
        assert!(!host.has_transport());
        assert!(matches!(
            host.select_transport_factory(),
            Err(Error::TransportUnavailable)
        ));
    }

    #[test]
    fn test_legacy_is_preferred() {
        let host = Host::builder()
            .standard_transport(CannedFactory::standard(200, ""))
            .legacy_transport(CannedFactory::legacy(200, ""))
            .build()
            .unwrap();
        assert_eq!(host.select_transport_factory().unwrap().kind(), TransportKind::Legacy);
    }

    #[test]
    fn test_standard_used_without_legacy() {
        let host = Host::builder()
            .standard_transport(CannedFactory::standard(200, ""))
            .build()
            .unwrap();
        assert_eq!(host.select_transport_factory().unwrap().kind(), TransportKind::Standard);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Host::builder()
            .config(ClientConfig::new().callback_param(""))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_document_comes_from_loader() {
        let host = Host::builder().script_loader(Document::new()).build().unwrap();
        assert_eq!(host.document().unwrap().script_count(), 0);
    }

    #[test]
    fn test_network_host() {
        let host = Host::network(ClientConfig::default()).unwrap();
        assert!(host.has_transport());
        assert!(host.script_loader().is_some());
    }
}
