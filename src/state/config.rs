//! Application configuration
//!
//! Stored as pretty-printed JSON in the user's config directory:
//! - Linux: ~/.config/travel-companion/config.json
//! - macOS: ~/Library/Application Support/travel-companion/config.json
//! - Windows: %APPDATA%\travel-companion\config.json
//!
//! `TRAVEL_COMPANION_CONFIG` overrides the location. Every field has a
//! default, so a partial (or missing) file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data::Language;
use crate::error::ConfigError;

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "TRAVEL_COMPANION_CONFIG";

/// Lowest and highest map zoom levels
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 20;

/// Top-level configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    // ========== Simulated latencies ==========

    /// How long simulated voice capture "listens" before producing text
    pub voice_delay_ms: u64,
    /// How long the simulated classifier takes per photo
    pub analysis_delay_ms: u64,
    /// How long a simulated offline-area download takes
    pub download_delay_ms: u64,
    /// Upper bound on a position acquisition
    pub location_timeout_ms: u64,

    // ========== Screen defaults ==========

    /// Target language selected when the Translate screen opens
    pub default_language: Language,
    /// Zoom level the Maps screen opens at (clamped to 1..=20)
    pub default_zoom: u8,

    // ========== Host capabilities ==========

    pub location: LocationConfig,
    pub connectivity: ConnectivityConfig,
}

/// Simulated device position
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// When false every acquisition fails with "permission denied"
    pub permission_granted: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Report this host fault code instead of a position
    /// (1 denied, 2 unavailable, 3 timeout, anything else unknown)
    pub fault_code: Option<u16>,
}

/// Reachability probe used to track online/offline state
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// `host:port` to open a TCP connection to
    pub probe_address: String,
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            voice_delay_ms: 2_000,
            analysis_delay_ms: 3_000,
            download_delay_ms: 3_000,
            location_timeout_ms: 5_000,
            default_language: Language::Spanish,
            default_zoom: 15,
            location: LocationConfig::default(),
            connectivity: ConnectivityConfig::default(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        // Puerta del Sol, Madrid
        Self {
            permission_granted: true,
            latitude: Some(40.4168),
            longitude: Some(-3.7038),
            fault_code: None,
        }
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_address: "1.1.1.1:53".to_string(),
            interval_ms: 5_000,
            timeout_ms: 1_500,
        }
    }
}

impl AppConfig {
    /// Resolve the config file path (env override first, then the platform
    /// config directory)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        path.push("travel-companion");
        path.push("config.json");
        Ok(path)
    }

    /// Load from `path`. A missing file is not an error: defaults are returned.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = self.to_json().map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Convert to pretty JSON for the config file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON (missing fields take their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn voice_delay(&self) -> Duration {
        Duration::from_millis(self.voice_delay_ms)
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.location_timeout_ms)
    }

    /// Initial zoom, forced into the valid range
    pub fn initial_zoom(&self) -> u8 {
        self.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}
