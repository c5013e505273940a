//! Per-topology colour schemes.

use egui::Color32;

use crate::topology::TopologyKind;

/// Colours used to draw one topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub link: Color32,
    pub node: Color32,
    pub hub: Color32,
    pub outline: Color32,
    pub label: Color32,
    pub packet: Color32,
}

const BACKGROUND: Color32 = Color32::from_rgb(15, 23, 42);
const OUTLINE: Color32 = Color32::from_rgb(226, 232, 240);
const LABEL: Color32 = Color32::from_rgb(203, 213, 225);

impl Palette {
    pub fn for_topology(kind: TopologyKind) -> Self {
        let (link, node, hub, packet) = match kind {
            TopologyKind::Star => (
                Color32::from_rgb(96, 165, 250),
                Color32::from_rgb(59, 130, 246),
                Color32::from_rgb(29, 78, 216),
                Color32::from_rgb(250, 204, 21),
            ),
            TopologyKind::Mesh => (
                Color32::from_rgb(74, 222, 128),
                Color32::from_rgb(34, 197, 94),
                Color32::from_rgb(21, 128, 61),
                Color32::from_rgb(244, 114, 182),
            ),
            TopologyKind::Bus => (
                Color32::from_rgb(251, 146, 60),
                Color32::from_rgb(249, 115, 22),
                Color32::from_rgb(194, 65, 12),
                Color32::from_rgb(56, 189, 248),
            ),
            TopologyKind::Tree => (
                Color32::from_rgb(192, 132, 252),
                Color32::from_rgb(168, 85, 247),
                Color32::from_rgb(126, 34, 206),
                Color32::from_rgb(52, 211, 153),
            ),
            TopologyKind::Hybrid => (
                Color32::from_rgb(45, 212, 191),
                Color32::from_rgb(20, 184, 166),
                Color32::from_rgb(15, 118, 110),
                Color32::from_rgb(251, 113, 133),
            ),
        };
        Self {
            background: BACKGROUND,
            link,
            node,
            hub,
            outline: OUTLINE,
            label: LABEL,
            packet,
        }
    }
}
