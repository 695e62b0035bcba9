// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document head and script elements

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::registry::CallbackRegistry;
use crate::error::Result;
use crate::request::constants::values;

/// A `<script>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptElement {
    pub id: String,
    pub src: String,
    /// `type` attribute
    pub script_type: String,
}

impl ScriptElement {
    /// Create a JavaScript element
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            script_type: values::SCRIPT_TYPE.to_string(),
        }
    }

    /// Serialize as HTML
    pub fn outer_html(&self) -> String {
        format!(
            r#"<script type="{}" id="{}" src="{}"></script>"#,
            self.script_type, self.id, self.src
        )
    }
}

/// Minimal document: only the head's script elements are modelled
#[derive(Debug, Clone, Default)]
pub struct Document {
    head: Arc<RwLock<Vec<ScriptElement>>>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a script to the head
    pub fn append_child(&self, script: ScriptElement) {
        self.head.write().push(script);
    }

    /// Scripts in the head, in insertion order
    pub fn head_scripts(&self) -> Vec<ScriptElement> {
        self.head.read().clone()
    }

    /// Find a script by id
    pub fn get_element_by_id(&self, id: &str) -> Option<ScriptElement> {
        self.head.read().iter().find(|s| s.id == id).cloned()
    }

    /// Number of scripts in the head
    pub fn script_count(&self) -> usize {
        self.head.read().len()
    }

    /// Serialize the head as HTML
    pub fn head_html(&self) -> String {
        let scripts: String = self.head.read().iter().map(ScriptElement::outer_html).collect();
        format!("<head>{}</head>", scripts)
    }
}

/// Host capability to inject scripts into the page
pub trait ScriptLoader: Send + Sync {
    /// Append `script` under the document head and let the host run it
    ///
    /// A script that calls back does so through `callbacks`, the registry
    /// the dispatcher registered its function name in.
    fn append_to_head(&self, script: ScriptElement, callbacks: &CallbackRegistry) -> Result<()>;

    /// The document scripts are appended to
    fn document(&self) -> &Document;
}

/// A bare document records scripts without running them
impl ScriptLoader for Document {
    fn append_to_head(&self, script: ScriptElement, _callbacks: &CallbackRegistry) -> Result<()> {
        self.append_child(script);
        Ok(())
    }

    fn document(&self) -> &Document {
        self
    }
}
