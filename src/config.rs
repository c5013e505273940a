//! Configuration loading and validation.
//!
//! The application reads an optional TOML file (`config.toml` in the working
//! directory, or the path in `HOMENET_VIZ_CONFIG`). Every key has a default,
//! so a missing file simply means default settings and no live metrics feed.
//!
//! ```toml
//! [animation]
//! node-radius = 15.0
//! packet-speed = 2.0
//! spawn-interval-ms = 1000
//!
//! [metrics]
//! database-url = "https://smart-home-demo.example-rtdb.io"
//! path = "networkStatus"
//! poll-interval-secs = 5
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::AnimationSettings;
use crate::topology::TopologyKind;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "HOMENET_VIZ_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Error type for configuration loading failures.
#[derive(Debug)]
pub enum ConfigLoadError {
    FileReadError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::FileReadError(msg) => write!(f, "Failed to read config file: {}", msg),
            ConfigLoadError::ParseError(msg) => write!(f, "Failed to parse config file: {}", msg),
            ConfigLoadError::ValidationError(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

/// `[animation]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnimationConfig {
    pub node_radius: f32,
    pub packet_radius: f32,
    /// Pixels per 16 ms reference frame.
    pub packet_speed: f32,
    pub spawn_interval_ms: u64,
    /// Delay between repaint requests while the animation runs.
    pub frame_interval_ms: u64,
    pub show_labels: bool,
    /// Topology shown on first launch; unknown names mean star.
    pub initial_topology: Option<String>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let settings = AnimationSettings::default();
        Self {
            node_radius: settings.node_radius,
            packet_radius: settings.packet_radius,
            packet_speed: settings.packet_speed,
            spawn_interval_ms: settings.spawn_interval_ms as u64,
            frame_interval_ms: 16,
            show_labels: settings.show_labels,
            initial_topology: None,
        }
    }
}

impl AnimationConfig {
    pub fn settings(&self) -> AnimationSettings {
        AnimationSettings {
            node_radius: self.node_radius,
            packet_radius: self.packet_radius,
            packet_speed: self.packet_speed,
            spawn_interval_ms: self.spawn_interval_ms as f64,
            show_labels: self.show_labels,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn initial_topology(&self) -> TopologyKind {
        self.initial_topology.as_deref().map(TopologyKind::from_name).unwrap_or_default()
    }
}

fn default_metrics_path() -> String {
    "networkStatus".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

/// `[metrics]` table: where the live network metrics record lives.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct MetricsConfig {
    /// Base URL of the real-time database REST endpoint.
    pub database_url: String,
    /// Location of the record inside the database.
    #[serde(default = "default_metrics_path")]
    pub path: String,
    /// Optional token passed as the `auth` query parameter.
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl MetricsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Live metrics feed; absent means the feed reports "unavailable".
    #[serde(default)]
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigLoadError> {
        let config: AppConfig = toml::from_str(content).map_err(|e| ConfigLoadError::ParseError(e.to_string()))?;
        config.validate().map_err(ConfigLoadError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("{}", path.display()))
            .map_err(|e| ConfigLoadError::FileReadError(format!("{:#}", e)))?;
        Self::parse(&content)
    }

    /// Resolve the configuration path from the environment, falling back to `config.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path` if it exists.
    ///
    /// A missing file yields the defaults. A broken file also yields the
    /// defaults, together with the error so the UI can report it.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigLoadError>) {
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return (Self::default(), None);
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                (config, None)
            }
            Err(e) => {
                log::error!("{}", e);
                (Self::default(), Some(e))
            }
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), String> {
        let animation = &self.animation;
        if !(animation.node_radius > 0.0 && animation.node_radius <= 100.0) {
            return Err(format!("node-radius {} must be in (0, 100]", animation.node_radius));
        }
        if !(animation.packet_radius > 0.0) {
            return Err(format!("packet-radius {} must be positive", animation.packet_radius));
        }
        if !(animation.packet_speed > 0.0) {
            return Err(format!("packet-speed {} must be positive", animation.packet_speed));
        }
        if animation.spawn_interval_ms == 0 {
            return Err("spawn-interval-ms must be positive".to_string());
        }
        if animation.frame_interval_ms == 0 || animation.frame_interval_ms > 1000 {
            return Err(format!("frame-interval-ms {} must be in 1-1000", animation.frame_interval_ms));
        }

        if let Some(metrics) = &self.metrics {
            if !(metrics.database_url.starts_with("http://") || metrics.database_url.starts_with("https://")) {
                return Err(format!("database-url '{}' must be an http(s) URL", metrics.database_url));
            }
            if metrics.path.trim_matches('/').is_empty() {
                return Err("metrics path must not be empty".to_string());
            }
            if metrics.poll_interval_secs == 0 {
                return Err("poll-interval-secs must be positive".to_string());
            }
        }
        Ok(())
    }
}
