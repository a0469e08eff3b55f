//! Persisted view preferences.
//!
//! Two settings survive window close: whether the sidebar is expanded, and
//! the key of the panel that was active last. Stored as JSON in
//! `~/.config/paneldock/prefs.json`; read once at startup, written on every
//! sidebar toggle and selection change.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPrefs {
    /// Sidebar shows icon + title when true, icon only when false.
    #[serde(default)]
    pub sidebar_expanded: bool,
    /// Key of the last active panel, restored after the next rebuild.
    #[serde(default)]
    pub last_panel: Option<String>,
}

impl ViewPrefs {
    /// Load preferences, falling back to defaults if the file is missing or
    /// unreadable. A broken prefs file never blocks startup.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("no config directory available, using default preferences");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("no preferences at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(prefs) => prefs,
                Err(err) => {
                    tracing::warn!("failed to parse {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("failed to read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Save preferences, creating the config directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self).context("serializing preferences")?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
