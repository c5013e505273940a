//! # Central Canvas
//!
//! Hosts the packet animation in the central panel. Each egui frame it:
//! 1. Detects canvas resizes and topology changes and forwards them to the driver
//! 2. Hands the driver an egui painter wrapped as a drawing surface
//! 3. Lets the driver run its pending frame (which requests the next repaint)
//!
//! A canvas with no usable area (e.g. a collapsed window) is reported to the
//! driver as a missing surface, so the frame is skipped rather than drawn
//! into nothing.

use crate::render::PainterSurface;
use crate::ui::AppState;
use eframe::egui;

/// Render the central canvas panel.
///
/// # Parameters
///
/// * `ctx` - egui context for rendering
/// * `state` - Mutable application state owning the animation driver
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(format!("{} network", state.selected_topology.title()));
        ui.separator();

        // Animation clock in milliseconds since the app started
        let now_ms = ctx.input(|i| i.time) * 1000.0;

        let rect = ui.available_rect_before_wrap();
        let (width, height) = (rect.width().floor(), rect.height().floor());
        let usable = width > 0.0 && height > 0.0;

        if usable && state.driver.size() != Some((width, height)) {
            state.driver.resize(width, height, now_ms);
        }
        state.driver.set_topology(state.selected_topology, now_ms);
        state.driver.set_show_labels(state.show_labels);

        if !usable {
            state.driver.on_frame(now_ms, None);
            return;
        }

        let _ = ui.allocate_rect(rect, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let mut surface = PainterSurface::new(&painter, rect);
        state.driver.on_frame(now_ms, Some(&mut surface));
    });
}
