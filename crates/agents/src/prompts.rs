//! Prompt template registry.
//!
//! Templates are plain text files loaded once from a directory at
//! startup, exposed by file stem, with `{name}` placeholder
//! substitution at render time. Required templates are checked up
//! front so a missing one fails the process before any request.

use crate::error::{AgentError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Template used once per chunk during ingestion; placeholder: `{text}`
pub const SUMMARIZE_TEMPLATE: &str = "summarize";

/// Template used by the chat endpoint; placeholders: `{query}`, `{info}`
pub const RESPONSE_TEMPLATE: &str = "response";

/// Named prompt templates, loaded once and shared
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    templates: HashMap<String, String>,
}

impl PromptRegistry {
    /// Load every `*.txt` file in a directory as a template named by
    /// its file stem.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            AgentError::Config(format!("cannot read prompt directory {}: {e}", dir.display()))
        })?;

        let mut templates = HashMap::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| AgentError::Config(format!("cannot read prompt directory: {e}")))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let body = std::fs::read_to_string(&path).map_err(|e| {
                AgentError::Config(format!("cannot read template {}: {e}", path.display()))
            })?;
            debug!("Loaded prompt template '{name}' ({} chars)", body.len());
            templates.insert(name.to_string(), body);
        }

        Ok(Self { templates })
    }

    /// Build a registry from in-memory templates
    pub fn from_templates(
        templates: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|(name, body)| (name.into(), body.into()))
                .collect(),
        }
    }

    /// Fail fast unless every named template is present
    pub fn require(&self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.templates.contains_key(*name) {
                return Err(AgentError::MissingTemplate((*name).to_string()));
            }
        }
        Ok(())
    }

    /// Render a template, substituting `{key}` placeholders
    pub fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| AgentError::MissingTemplate(name.to_string()))?;

        let mut rendered = template.clone();
        for (key, value) in vars {
            rendered = rendered.replace(&format!("{{{key}}}"), value);
        }
        Ok(rendered)
    }
}
