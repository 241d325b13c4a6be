//! Configuration loading and management

mod tmux;

pub use tmux::TmuxSettings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::supervisor::LaunchOptions;

/// Launch backend used to run the agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Tmux,
}

impl ProviderKind {
    /// Name used in config files and pane records.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Attach the code-action server at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Filetypes to attach to; `None` attaches to every filetype
    #[serde(default)]
    pub filetypes: Option<Vec<String>>,

    /// Which backend launches the agent
    #[serde(default)]
    pub provider: ProviderKind,

    /// Command line that starts the agent
    #[serde(default = "default_cmd")]
    pub cmd: String,

    /// Base URL of the running agent's HTTP server
    #[serde(default = "default_url")]
    pub url: String,

    /// tmux provider settings
    #[serde(default)]
    pub tmux: TmuxSettings,
}

fn default_enabled() -> bool {
    true
}

fn default_cmd() -> String {
    "opencode --port 4096".to_string()
}

fn default_url() -> String {
    "http://127.0.0.1:4096".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            filetypes: None,
            provider: ProviderKind::default(),
            cmd: default_cmd(),
            url: default_url(),
            tmux: TmuxSettings::default(),
        }
    }
}

impl Config {
    /// Get the global config file path (~/.config/opencode-shim/config.toml)
    pub fn global_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opencode-shim")
            .join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from an explicit path, else the global file, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let global = Self::global_config_path();
        if global.exists() {
            return Self::from_file(&global);
        }

        Ok(Self::default())
    }

    /// Whether the code-action server should attach to a buffer of `filetype`.
    ///
    /// An unknown filetype only attaches when no allow-list is configured.
    pub fn attaches_to(&self, filetype: Option<&str>) -> bool {
        if !self.enabled {
            return false;
        }
        match (&self.filetypes, filetype) {
            (None, _) => true,
            (Some(allowed), Some(ft)) => allowed.iter().any(|a| a == ft),
            (Some(_), None) => false,
        }
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            cmd: self.cmd.clone(),
            split_flags: self.tmux.options.clone(),
            focus: self.tmux.focus,
            allow_passthrough: self.tmux.allow_passthrough,
        }
    }
}
