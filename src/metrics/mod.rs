//! Live network metrics pulled from a remote real-time database.
//!
//! The animation never depends on this feed; it only fills the metrics
//! column of the top panel.

pub mod client;
pub mod feed;
pub mod types;

pub use client::MetricsClient;
pub use feed::metrics_feed_task;
pub use types::{MetricsStatus, NetworkMetrics};
