use std::{collections::HashMap, fs, path::Path, sync::Arc};

use anyhow::Context;
use serde::Serialize;

/// Error envelope sent to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub key: String,
    pub message: String,
}

/// Read-only table of error message templates keyed by error key.
#[derive(Clone, Default)]
pub struct Messages {
    m: Arc<HashMap<String, String>>,
}

impl Messages {
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self {
            m: Arc::new(templates),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read error messages from {}", path.display()))?;
        let templates: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("cannot parse error messages in {}", path.display()))?;
        log::info!("loaded {} error messages", templates.len());
        Ok(Self::new(templates))
    }

    pub fn resolve(&self, key: &str, detail: Option<&str>) -> ErrorBody {
        let Some(template) = self.m.get(key) else {
            log::warn!("error key '{}' has no message in the error table", key);
            return ErrorBody {
                key: key.to_string(),
                message: String::new(),
            };
        };

        let message = match detail.map(str::trim).filter(|d| !d.is_empty()) {
            Some(detail) => format!("{} {}", template, detail),
            None => template.clone(),
        };

        ErrorBody {
            key: key.to_string(),
            message,
        }
    }
}
