// UI module for the smart-home topology visualizer
//
// This module organizes the UI into separate components:
// - `top_panel`: Topology selector, live metrics and animation counters
// - `right_panel`: Explanation of the selected topology
// - `canvas`: Central panel hosting the packet animation
// - `app_state`: Application state management and main update loop

pub mod app_state;
pub mod canvas;
pub mod right_panel;
pub mod top_panel;

use crate::metrics::MetricsStatus;

pub use app_state::AppState;

#[derive(Debug)]
pub enum UIRefreshState {
    Alert(String),
    MetricsUpdated(MetricsStatus),
}

#[derive(Debug)]
pub enum UICommand {
    RefreshMetrics,
}
