use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, XiaoxianError};

/// Top-level configuration for the Xiaoxian assistant.
///
/// Loaded from `~/.xiaoxian/config.toml` by default. Every section is
/// optional; missing keys fall back to the values the demo ships with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XiaoxianConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub attachments: AttachmentConfig,
}

impl XiaoxianConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: XiaoxianConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| XiaoxianError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// How the session list is ordered for the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOrder {
    /// Newest-created first; appending to a session never moves it.
    #[default]
    Creation,
    /// Most recently updated first; re-sorted after every append.
    Recent,
}

/// Conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Number of characters of the first message kept as the session title.
    pub title_max_chars: usize,
    /// Suffix appended to truncated titles.
    pub title_ellipsis: String,
    /// `chrono` format string for message timestamps.
    pub time_format: String,
    /// Sidebar ordering of sessions.
    pub session_order: SessionOrder,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 20,
            title_ellipsis: "...".to_string(),
            time_format: "%H:%M".to_string(),
            session_order: SessionOrder::Creation,
        }
    }
}

/// Attachment display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Display width budget for file name chips. Wide (non-Latin-1)
    /// characters count as two.
    pub display_width: usize,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self { display_width: 10 }
    }
}
