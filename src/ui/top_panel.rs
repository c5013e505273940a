//! # Top Panel - Topology Selection, Live Metrics and Animation Counters
//!
//! This module renders the fixed-height top panel displaying:
//! - Column 1: Topology selector
//! - Column 2: Live network metrics from the remote feed (or an advisory message)
//! - Column 3: Animation counters and display options

use crate::animation::DriverPhase;
use crate::metrics::MetricsStatus;
use crate::topology::TopologyKind;
use crate::ui::AppState;
use eframe::egui;

/// Render the top panel with the selector, live metrics and animation controls.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state for reading metrics and updating controls
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_metrics").exact_height(150.0).show(ctx, |ui| {
        ui.columns(3, |cols| {
            // Column 1: Title + topology selector
            cols[0].vertical(|ui| {
                ui.heading("Smart-Home Topologies");
                ui.separator();
                render_selector(ui, state);
            });

            // Column 2: Live metrics
            cols[1].vertical(|ui| {
                render_live_metrics(ui, state);
            });

            // Column 3: Animation counters and options
            cols[2].vertical(|ui| {
                render_animation_controls(ui, state);
            });
        });
    });
}

/// One toggle button per topology; the canvas picks the change up on its next frame.
fn render_selector(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label("Choose a topology:");
    ui.horizontal_wrapped(|ui| {
        for kind in TopologyKind::ALL {
            ui.selectable_value(&mut state.selected_topology, kind, kind.title());
        }
    });
}

/// Render the live metrics column.
///
/// Shows the latest record from the remote feed, or the advisory text for
/// the current feed status. Values are displayed exactly as received.
fn render_live_metrics(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Live Network Metrics");
    ui.separator();

    let status = &state.metrics_status;
    let metrics = status.metrics();

    ui.horizontal(|ui| {
        ui.label("Signal strength:");
        ui.label(egui::RichText::new(display(metrics.map(|m| m.signal_strength.as_str()))).strong());
        ui.label("  Latency:");
        ui.label(egui::RichText::new(display(metrics.map(|m| m.latency.as_str()))).strong());
    });
    ui.horizontal(|ui| {
        ui.label("Delivery rate:");
        ui.label(egui::RichText::new(display(metrics.map(|m| m.delivery_rate.as_str()))).strong());
    });
    ui.horizontal(|ui| {
        ui.label("Last updated:");
        ui.label(egui::RichText::new(display(metrics.map(|m| m.last_updated.as_str()))).monospace());
    });

    match status {
        MetricsStatus::Live(_, fetched_at) => {
            ui.label(egui::RichText::new(format!("Fetched at {}", fetched_at.format("%H:%M:%S"))).weak());
        }
        other => {
            if let Some(advisory) = other.advisory() {
                ui.label(egui::RichText::new(advisory).color(ui.visuals().warn_fg_color));
            }
        }
    }

    if state.metrics_configured && ui.button("Refresh").clicked() {
        state.request_metrics_refresh();
    }
}

/// Placeholder for values the feed has not provided.
fn display(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

fn phase_label(phase: DriverPhase) -> &'static str {
    match phase {
        DriverPhase::Idle => "Waiting for canvas",
        DriverPhase::Running => "Running",
        DriverPhase::Terminated => "Stopped",
    }
}

/// Render the animation counters and display options.
fn render_animation_controls(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Animation");
    ui.separator();

    let stats = state.driver.stats();
    ui.horizontal(|ui| {
        ui.label("State:");
        ui.label(egui::RichText::new(phase_label(state.driver.phase())).strong());
        ui.label("  Packets in flight:");
        ui.label(egui::RichText::new(format!("{:<5}", stats.in_flight)).monospace().strong());
    });
    ui.horizontal(|ui| {
        ui.label("Spawned:");
        ui.label(egui::RichText::new(stats.spawned.to_string()).strong());
        ui.label("  Delivered:");
        ui.label(egui::RichText::new(stats.delivered.to_string()).strong());
    });
    if let Some(layout) = state.driver.layout() {
        ui.horizontal(|ui| {
            ui.label("Nodes:");
            ui.label(egui::RichText::new(layout.nodes.len().to_string()).strong());
            ui.label("  Routes:");
            ui.label(egui::RichText::new(layout.paths.len().to_string()).strong());
        });
    }

    ui.checkbox(&mut state.show_labels, "Show device labels");
}
