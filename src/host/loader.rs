// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network-backed script loader

use reqwest::Client;

use super::document::{Document, ScriptElement, ScriptLoader};
use super::registry::CallbackRegistry;
use super::script::execute_jsonp;
use crate::config::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Appends scripts to a [`Document`] and loads them over HTTP
///
/// A loaded script is evaluated as a JSONP response against the registry
/// passed to [`ScriptLoader::append_to_head`]. Load failures and
/// unrecognized scripts are logged and otherwise ignored, like a script tag
/// that failed to load.
#[derive(Clone)]
pub struct NetworkScriptLoader {
    document: Document,
    client: Client,
}

impl NetworkScriptLoader {
    /// Create a loader with the default user agent
    pub fn new(document: Document) -> Result<Self> {
        Self::with_user_agent(document, DEFAULT_USER_AGENT)
    }

    /// Create a loader sending the given user agent
    pub fn with_user_agent(document: Document, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { document, client })
    }
}

impl ScriptLoader for NetworkScriptLoader {
    fn append_to_head(&self, script: ScriptElement, callbacks: &CallbackRegistry) -> Result<()> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| Error::transport("script loading requires a running tokio runtime"))?;

        let src = script.src.clone();
        let id = script.id.clone();
        self.document.append_child(script);

        let client = self.client.clone();
        let registry = callbacks.clone();

        runtime.spawn(async move {
            let source = match client.get(&src).send().await {
                Ok(response) => match response.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "Failed to read script");
                        return;
                    }
                },
                Err(e) => {
                    tracing::warn!(id = %id, src = %src, error = %e, "Failed to load script");
                    return;
                }
            };

            match execute_jsonp(&source, &registry) {
                Ok(invoked) => tracing::debug!(id = %id, invoked, "Script executed"),
                Err(e) => tracing::warn!(id = %id, error = %e, "Script is not a JSONP response"),
            }
        });

        Ok(())
    }

    fn document(&self) -> &Document {
        &self.document
    }
}
