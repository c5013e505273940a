//! # Right Panel - Topology Explainer
//!
//! Renders a resizable side panel describing the selected topology: how it
//! is wired, where it shines, where it struggles, and what it typically looks
//! like in a smart home.

use crate::topology::TopologyKind;
use crate::ui::AppState;
use eframe::egui;

/// Static explanation for one topology.
pub struct TopologyInfo {
    pub summary: &'static str,
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
    pub smart_home_example: &'static str,
}

/// Explanation text for `kind`.
pub fn topology_info(kind: TopologyKind) -> TopologyInfo {
    match kind {
        TopologyKind::Star => TopologyInfo {
            summary: "Every device talks directly to a central hub. The hub relays all traffic, \
                      so devices never need to know about each other.",
            strengths: &["Simple to set up and troubleshoot", "A failing device does not affect the others", "Easy to add new devices"],
            weaknesses: &["The hub is a single point of failure", "Range is limited to the hub's reach"],
            smart_home_example: "A Wi-Fi router with lights, cameras and speakers connected to it.",
        },
        TopologyKind::Mesh => TopologyInfo {
            summary: "Devices connect to many neighbours and forward each other's messages, \
                      so traffic can take several routes through the house.",
            strengths: &["No single point of failure", "Coverage grows with every device", "Routes heal around dead nodes"],
            weaknesses: &["More complex routing", "Battery devices may spend energy relaying"],
            smart_home_example: "Zigbee, Z-Wave or Thread sensors and switches spread across rooms.",
        },
        TopologyKind::Bus => TopologyInfo {
            summary: "All devices tap into one shared line. A message placed on the line travels \
                      past every device until it reaches its destination.",
            strengths: &["Very little cabling", "Cheap to extend along the line"],
            weaknesses: &["A break in the line splits the network", "Devices share bandwidth and contend for the line"],
            smart_home_example: "Wired KNX or RS-485 installations running along a wall.",
        },
        TopologyKind::Tree => TopologyInfo {
            summary: "Hubs are arranged in levels: a main router feeds room hubs, and each room \
                      hub serves its own devices.",
            strengths: &["Scales room by room", "Easy to isolate problems to one branch"],
            weaknesses: &["Losing a branch hub cuts off its devices", "The root still carries all cross-branch traffic"],
            smart_home_example: "A router with a range extender per floor, each serving that floor's gadgets.",
        },
        TopologyKind::Hybrid => TopologyInfo {
            summary: "Combines topologies: here a hub-based star cluster is bridged to a \
                      self-organizing mesh cluster.",
            strengths: &["Uses the best layout for each part of the home", "Flexible as the home grows"],
            weaknesses: &["Harder to plan and maintain", "The bridge becomes a critical link"],
            smart_home_example: "Wi-Fi cameras on a hub plus a Thread mesh of lights joined by a border router.",
        },
    }
}

/// Render the explanation panel for the selected topology.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Application state (selected topology, panel width)
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let panel = egui::SidePanel::right("topology_info")
        .resizable(true)
        .default_width(state.right_panel_width)
        .show(ctx, |ui| {
            let kind = state.selected_topology;
            let info = topology_info(kind);

            ui.heading(format!("{} topology", kind.title()));
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(info.summary);
                ui.add_space(8.0);

                ui.label(egui::RichText::new("Strengths").strong());
                for item in info.strengths {
                    ui.label(format!("+ {}", item));
                }
                ui.add_space(8.0);

                ui.label(egui::RichText::new("Drawbacks").strong());
                for item in info.weaknesses {
                    ui.label(format!("- {}", item));
                }
                ui.add_space(8.0);

                ui.label(egui::RichText::new("In a smart home").strong());
                ui.label(info.smart_home_example);
            });
        });

    // Remember the width the user dragged the panel to
    state.right_panel_width = panel.response.rect.width();
}
