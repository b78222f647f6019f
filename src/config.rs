use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::api::{DEFAULT_ENDPOINT, DEFAULT_MAX_PAGES};
use crate::core::characters::portrait::DEFAULT_CDN_BASE;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub tui: TuiConfig,
    pub data: DataConfig,
}

/// Character API and portrait CDN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Collection endpoint the pagination starts from.
    pub endpoint: String,
    /// Base URL for portrait images.
    pub cdn_base: String,
    /// Maximum pages followed per fetch (`0` = unlimited).
    pub max_pages: u32,
    /// Per-request timeout. Unset relies on the transport default.
    pub request_timeout_secs: Option<u64>,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
    /// Provide the enlarged-portrait modal.
    pub image_modal: bool,
    /// Download and draw portraits. When off, cards show a text placeholder.
    pub portraits: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout_secs: None,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: true,
            image_modal: true,
            portraits: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/springdex/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("springdex"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("springdex").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
