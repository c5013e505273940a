//! Live metrics record and the status shown in the UI.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Network metrics as stored in the real-time database.
///
/// All values are display strings; the application never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkMetrics {
    pub signal_strength: String,
    pub latency: String,
    pub delivery_rate: String,
    pub last_updated: String,
}

/// Latest state of the live metrics feed. The UI keeps only the most recent one.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsStatus {
    /// No answer received yet.
    Connecting,
    /// A record was fetched at the given local time.
    Live(NetworkMetrics, DateTime<Local>),
    /// The feed is not configured or the record does not exist.
    Unavailable,
    /// Advisory text for the last failed fetch.
    Error(String),
}

impl MetricsStatus {
    /// One-line advisory for the UI, if the status warrants one.
    pub fn advisory(&self) -> Option<String> {
        match self {
            MetricsStatus::Connecting => Some("Connecting to live metrics...".to_string()),
            MetricsStatus::Live(..) => None,
            MetricsStatus::Unavailable => Some("Live metrics are currently unavailable.".to_string()),
            MetricsStatus::Error(message) => Some(format!("Could not refresh live metrics: {}", message)),
        }
    }

    pub fn metrics(&self) -> Option<&NetworkMetrics> {
        match self {
            MetricsStatus::Live(metrics, _) => Some(metrics),
            _ => None,
        }
    }
}
