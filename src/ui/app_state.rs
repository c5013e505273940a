//! # Application State Management
//!
//! This module implements the central `AppState` struct which owns the
//! animation driver, the latest live metrics status and the user's topology
//! selection. It implements the `eframe::App` trait to integrate with the
//! egui application framework.
//!
//! ## Responsibilities
//!
//! - Processes incoming messages from the metrics feed via `ui_refresh_rx`
//! - Sends refresh requests to the metrics feed via `ui_command_tx`
//! - Coordinates rendering of all UI panels (top, right, canvas)
//! - Persists the selected topology and panel width across sessions
//!
//! ## State Management
//!
//! The interface is rebuilt every frame (immediate mode). The animation
//! driver keeps its own state between frames and is torn down when the
//! application state is dropped.

use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::UIRefreshState;
use crate::animation::{AnimationDriver, EguiFrameScheduler};
use crate::config::AppConfig;
use crate::metrics::MetricsStatus;
use crate::topology::TopologyKind;

/// Central application state.
pub struct AppState {
    /// Optional alert message to display in a modal dialog.
    pub alert: Option<String>,
    /// Receiver for UI refresh messages from the metrics feed.
    pub ui_refresh_rx: crate::UIRefreshQueueReceiver,
    /// Sender for commands from the UI to the metrics feed.
    pub ui_command_tx: crate::UICommandQueueSender,

    /// Topology chosen in the top panel.
    pub selected_topology: TopologyKind,
    /// Frame loop, layout and packets for the canvas.
    pub driver: AnimationDriver<EguiFrameScheduler>,
    /// Whether node labels are drawn on the canvas.
    pub show_labels: bool,

    /// Latest status of the live metrics feed (last write wins).
    pub metrics_status: MetricsStatus,
    /// Whether the metrics feed is configured at all.
    pub metrics_configured: bool,

    /// Width of the right explanation panel in pixels.
    pub right_panel_width: f32,
}

/// Settings persisted across application sessions.
#[derive(Default, Serialize, Deserialize)]
struct PersistedSettings {
    topology: Option<TopologyKind>,
    right_panel_width: Option<f32>,
}

impl AppState {
    /// Create a new AppState, loading persisted settings if available.
    ///
    /// # Parameters
    ///
    /// * `rx` - Receiver for UI refresh messages from the metrics feed
    /// * `tx` - Sender for commands to the metrics feed
    /// * `config` - Loaded application configuration
    /// * `alert` - Start-up problem to show immediately, if any
    /// * `cc` - eframe creation context (egui context and storage)
    pub fn new(
        rx: crate::UIRefreshQueueReceiver,
        tx: crate::UICommandQueueSender,
        config: &AppConfig,
        alert: Option<String>,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let persisted: PersistedSettings = cc.storage.and_then(|s| eframe::get_value(s, "app_settings")).unwrap_or_default();
        let selected_topology = persisted.topology.unwrap_or_else(|| config.animation.initial_topology());

        let scheduler = EguiFrameScheduler::new(cc.egui_ctx.clone(), config.animation.frame_interval());
        let driver = AnimationDriver::new(scheduler, StdRng::from_entropy(), config.animation.settings(), selected_topology);

        Self {
            alert,
            ui_refresh_rx: rx,
            ui_command_tx: tx,
            selected_topology,
            driver,
            show_labels: config.animation.show_labels,
            metrics_status: MetricsStatus::Connecting,
            metrics_configured: config.metrics.is_some(),
            right_panel_width: persisted.right_panel_width.unwrap_or(340.0),
        }
    }

    /// Ask the metrics feed for an immediate refresh.
    pub fn request_metrics_refresh(&mut self) {
        if self.ui_command_tx.try_send(super::UICommand::RefreshMetrics).is_err() {
            log::debug!("Refresh request dropped, command queue full");
        }
    }

    /// Apply one message from the background feed.
    fn apply_refresh(&mut self, msg: UIRefreshState) {
        match msg {
            UIRefreshState::Alert(alert_msg) => {
                self.alert = Some(alert_msg);
            }
            UIRefreshState::MetricsUpdated(status) => {
                self.metrics_status = status;
            }
        }
    }
}

impl eframe::App for AppState {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            topology: Some(self.selected_topology),
            right_panel_width: Some(self.right_panel_width),
        };
        eframe::set_value(storage, "app_settings", &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(msg) = self.ui_refresh_rx.try_receive() {
            self.apply_refresh(msg);
        }

        if self.alert.is_some() {
            egui::Window::new("Alert")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.label(self.alert.as_deref().unwrap_or_default());
                        ui.add_space(20.0);

                        if ui.button("OK").clicked() {
                            self.alert = None; // Reset alert state
                        }
                        ui.add_space(10.0);
                    });
                });
        }

        // Panels layout: top (fixed), right (resizable), canvas fills the remaining space
        super::top_panel::render(ctx, self);
        super::right_panel::render(ctx, self);
        super::canvas::render(ctx, self);
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.driver.unmount();
    }
}
