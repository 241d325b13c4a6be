//! Pane id persisted between separate CLI invocations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Last pane id a provider was tracking.
///
/// Only a hint: the id is revalidated against the multiplexer before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneRecord {
    pub provider: String,
    #[serde(default)]
    pub pane_id: Option<String>,
}

impl PaneRecord {
    /// Default record location in the system temp dir.
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join("opencode-shim-pane.json")
    }

    /// Load a record; a missing or unreadable file yields an empty record.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt pane record");
            Self::default()
        })
    }

    /// Pane id if the record belongs to `provider`.
    pub fn pane_for(&self, provider: &str) -> Option<String> {
        (self.provider == provider)
            .then(|| self.pane_id.clone())
            .flatten()
    }

    /// Write the record, or remove the file when no pane is tracked.
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.pane_id.is_none() {
            if path.exists() {
                std::fs::remove_file(path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }
            return Ok(());
        }

        let content = serde_json::to_string(self).context("Failed to encode pane record")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
