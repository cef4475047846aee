use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{OceanMindError, Result};

/// Environment variable consulted when the config file carries no API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Top-level configuration for the OceanMind application.
///
/// Loaded from `~/.oceanmind/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OceanMindConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub genai: GenAiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl OceanMindConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: OceanMindConfig = toml::from_str(&content)?;
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
            toml::to_string_pretty(self).map_err(|e| OceanMindError::Config(e.to_string()))?;
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
    /// API server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 3040,
        }
    }
}

/// Generative backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    /// API key. Empty means "consult the GEMINI_API_KEY environment variable".
    pub api_key: String,
    /// Model identifier passed to the generateContent endpoint.
    pub model: String,
    /// Base URL of the generative API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
        }
    }
}

impl GenAiConfig {
    /// Resolve the API credential: config value first, then the environment.
    ///
    /// Returns `None` when neither source provides a non-empty key. Absence is
    /// permanent for the process lifetime; callers short-circuit every backend
    /// operation to its documented fallback.
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.clone());
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Some(key),
            _ => None,
        }
    }
}

/// Dashboard view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Default latitude used until geolocation resolves (Mumbai).
    pub default_lat: f64,
    /// Default longitude used until geolocation resolves (Mumbai).
    pub default_lng: f64,
    /// Number of alerts requested per snapshot.
    pub alert_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_lat: 18.94,
            default_lng: 72.82,
            alert_count: 3,
        }
    }
}

/// Conversational assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum user message length in characters.
    pub max_message_length: usize,
    /// Number of most recent messages serialized per backend call.
    /// Zero means unlimited: the full transcript is resent every turn.
    pub history_window: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: 2000,
            history_window: 0,
        }
    }
}
