//! Stateless drawing of a [`Layout`].
//!
//! Connections are drawn first so node circles sit on top of the lines. The
//! caller is responsible for clearing the surface at the start of a frame.

use crate::topology::{Layout, NodeRole};

use super::{Palette, Surface};

/// Tunables for drawing a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub node_radius: f32,
    pub link_width: f32,
    pub label_size: f32,
    pub show_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            node_radius: 15.0,
            link_width: 2.0,
            label_size: 12.0,
            show_labels: true,
        }
    }
}

/// Hubs are drawn a little larger than devices.
fn radius_for(role: NodeRole, base: f32) -> f32 {
    match role {
        NodeRole::Hub => base * 1.3,
        NodeRole::SubHub => base * 1.15,
        NodeRole::Device => base,
    }
}

/// Draw every connection once, then every node with its outline and label.
pub fn render_layout(surface: &mut dyn Surface, layout: &Layout, palette: &Palette, options: &RenderOptions) {
    for connection in &layout.connections {
        surface.line(connection.from, connection.to, options.link_width, palette.link);
    }

    for node in &layout.nodes {
        let radius = radius_for(node.role, options.node_radius);
        let fill = match node.role {
            NodeRole::Hub | NodeRole::SubHub => palette.hub,
            NodeRole::Device => palette.node,
        };
        surface.circle_filled(node.position, radius, fill);
        surface.circle_stroke(node.position, radius, 1.5, palette.outline);

        if options.show_labels {
            let mut anchor = node.position;
            anchor.y += radius + 4.0;
            surface.text(anchor, &node.label, options.label_size, palette.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawOp, RecordingSurface};
    use crate::topology::{TopologyKind, generate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draws_each_connection_once_and_every_node() {
        let mut rng = StdRng::seed_from_u64(3);
        for kind in TopologyKind::ALL {
            let layout = generate(kind, 640.0, 480.0, 15.0, &mut rng);
            let mut surface = RecordingSurface::default();
            render_layout(&mut surface, &layout, &Palette::for_topology(kind), &RenderOptions::default());

            assert_eq!(surface.lines(), layout.connections.len());
            assert!(surface.lines() <= layout.paths.len());
            assert_eq!(surface.filled_circles(), layout.nodes.len());
            let labels: Vec<&str> = layout.nodes.iter().map(|n| n.label.as_str()).collect();
            assert_eq!(surface.texts(), labels);
        }
    }

    #[test]
    fn labels_hang_below_nodes_and_can_be_hidden() {
        let mut rng = StdRng::seed_from_u64(0);
        let layout = generate(TopologyKind::Tree, 400.0, 400.0, 10.0, &mut rng);
        let mut surface = RecordingSurface::default();
        render_layout(&mut surface, &layout, &Palette::for_topology(TopologyKind::Tree), &RenderOptions::default());

        let first_text = surface.ops.iter().find_map(|op| match op {
            DrawOp::Text { anchor, .. } => Some(*anchor),
            _ => None,
        });
        let root = layout.nodes[0].position;
        assert!(first_text.is_some_and(|a| a.x == root.x && a.y > root.y));

        let options = RenderOptions {
            show_labels: false,
            ..RenderOptions::default()
        };
        let mut hidden = RecordingSurface::default();
        render_layout(&mut hidden, &layout, &Palette::for_topology(TopologyKind::Tree), &options);
        assert!(hidden.texts().is_empty());
    }
}
