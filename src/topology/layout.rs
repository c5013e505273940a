//! Layout generation for the five topology kinds.
//!
//! Every variant returns a fresh [`Layout`]: node positions, the physical
//! connections to draw, and the directed paths packets can travel. Star, bus
//! and tree are pure functions of the canvas size; mesh and hybrid draw their
//! randomized clusters from the supplied rng, so repeated calls give different
//! positions for those two kinds.

use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::placement::{Region, scatter};
use super::types::{Connection, Layout, Node, NodeRole, Path, Point, TopologyKind};

/// Devices around the hub in the star layout.
pub const STAR_DEVICES: usize = 5;
/// Devices in the fully connected mesh layout.
pub const MESH_DEVICES: usize = 5;
/// Devices attached to the bus line.
pub const BUS_DEVICES: usize = 5;
/// Devices in each cluster of the hybrid layout.
pub const HYBRID_CLUSTER_DEVICES: usize = 3;

const STAR_LABELS: [&str; STAR_DEVICES] = ["Smart Light", "Thermostat", "Camera", "Door Lock", "Speaker"];
const MESH_LABELS: [&str; MESH_DEVICES] = ["Motion Sensor", "Light Switch", "Smart Plug", "Leak Sensor", "Blinds"];
const BUS_LABELS: [&str; BUS_DEVICES] = ["Doorbell", "Garage", "Sprinkler", "Alarm", "Meter"];
const HYBRID_STAR_LABELS: [&str; HYBRID_CLUSTER_DEVICES] = ["Camera", "Thermostat", "Door Lock"];
const HYBRID_MESH_LABELS: [&str; HYBRID_CLUSTER_DEVICES] = ["Light 1", "Light 2", "Light 3"];

/// Fraction of `min(width, height)` used as the star radius.
const STAR_RADIUS_FRACTION: f32 = 0.35;
/// Horizontal extent of the bus line as fractions of the width.
const BUS_START_FRACTION: f32 = 0.1;
const BUS_END_FRACTION: f32 = 0.9;

/// Compute nodes, connections and paths for `kind` on a `width` x `height` canvas.
pub fn generate<R: Rng + ?Sized>(kind: TopologyKind, width: f32, height: f32, node_radius: f32, rng: &mut R) -> Layout {
    match kind {
        TopologyKind::Star => star(width, height),
        TopologyKind::Mesh => mesh(width, height, node_radius, rng),
        TopologyKind::Bus => bus(width, height, node_radius),
        TopologyKind::Tree => tree(width, height),
        TopologyKind::Hybrid => hybrid(width, height, node_radius, rng),
    }
}

/// Points evenly spaced on a circle, starting at the top and going clockwise.
fn ring(center: Point, radius: f32, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = -FRAC_PI_2 + TAU * i as f32 / count as f32;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Connect every unordered pair among `indices` in both directions.
fn connect_all(layout: &mut Layout, indices: &[usize]) {
    for (i, &a) in indices.iter().enumerate() {
        for &b in &indices[i + 1..] {
            let (from, to) = (layout.anchor(a), layout.anchor(b));
            layout.connect_both_ways(from, to);
        }
    }
}

fn star(width: f32, height: f32) -> Layout {
    let mut layout = Layout::new(TopologyKind::Star);
    let center = Point::new(width / 2.0, height / 2.0);
    layout.nodes.push(Node::new(center, "Smart Hub", NodeRole::Hub));

    let radius = STAR_RADIUS_FRACTION * width.min(height);
    for (position, label) in ring(center, radius, STAR_DEVICES).into_iter().zip(STAR_LABELS) {
        layout.nodes.push(Node::new(position, label, NodeRole::Device));
        layout.connect_both_ways(center, position);
    }
    layout
}

fn mesh<R: Rng + ?Sized>(width: f32, height: f32, node_radius: f32, rng: &mut R) -> Layout {
    let mut layout = Layout::new(TopologyKind::Mesh);
    let region = Region::new(0.0, 0.0, width, height).padded(2.0 * node_radius);
    let positions = scatter(rng, region, MESH_DEVICES, 4.0 * node_radius);
    for (position, label) in positions.into_iter().zip(MESH_LABELS) {
        layout.nodes.push(Node::new(position, label, NodeRole::Device));
    }
    let all: Vec<usize> = (0..layout.nodes.len()).collect();
    connect_all(&mut layout, &all);
    layout
}

fn bus(width: f32, height: f32, node_radius: f32) -> Layout {
    let mut layout = Layout::new(TopologyKind::Bus);
    let line_y = height / 2.0;
    let start_x = width * BUS_START_FRACTION;
    let end_x = width * BUS_END_FRACTION;
    let spacing = (end_x - start_x) / (BUS_DEVICES - 1) as f32;

    layout.connections.push(Connection {
        from: Point::new(start_x, line_y),
        to: Point::new(end_x, line_y),
    });

    for (i, label) in BUS_LABELS.iter().enumerate() {
        let x = start_x + spacing * i as f32;
        let anchor = Point::new(x, line_y);
        let position = Point::new(x, line_y + 2.0 * node_radius);
        layout.connections.push(Connection { from: anchor, to: position });
        layout.nodes.push(Node::new(position, *label, NodeRole::Device).with_anchor(anchor));
    }

    // Packets ride the bus line itself, hopping between neighbouring taps.
    for i in 0..BUS_DEVICES - 1 {
        let (a, b) = (layout.anchor(i), layout.anchor(i + 1));
        layout.paths.push(Path::link(a, b));
        layout.paths.push(Path::link(b, a));
    }
    layout
}

fn tree(width: f32, height: f32) -> Layout {
    let mut layout = Layout::new(TopologyKind::Tree);
    let at = |fx: f32, fy: f32| Point::new(width * fx, height * fy);

    layout.nodes.push(Node::new(at(0.5, 0.15), "Router", NodeRole::Hub));
    layout.nodes.push(Node::new(at(0.25, 0.45), "Living Room Hub", NodeRole::SubHub));
    layout.nodes.push(Node::new(at(0.75, 0.45), "Bedroom Hub", NodeRole::SubHub));
    layout.nodes.push(Node::new(at(0.125, 0.8), "TV", NodeRole::Device));
    layout.nodes.push(Node::new(at(0.375, 0.8), "Speaker", NodeRole::Device));
    layout.nodes.push(Node::new(at(0.625, 0.8), "Lamp", NodeRole::Device));
    layout.nodes.push(Node::new(at(0.875, 0.8), "Fan", NodeRole::Device));

    // (parent, child) pairs, plus the peer link between the two sub-hubs.
    const EDGES: [(usize, usize); 7] = [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6), (1, 2)];
    for (parent, child) in EDGES {
        let (a, b) = (layout.anchor(parent), layout.anchor(child));
        layout.connect_both_ways(a, b);
    }
    layout
}

fn hybrid<R: Rng + ?Sized>(width: f32, height: f32, node_radius: f32, rng: &mut R) -> Layout {
    let mut layout = Layout::new(TopologyKind::Hybrid);
    let half = width / 2.0;

    // Star cluster on the left half
    let hub = Point::new(half / 2.0, height / 2.0);
    layout.nodes.push(Node::new(hub, "Smart Hub", NodeRole::Hub));
    let radius = STAR_RADIUS_FRACTION * half.min(height);
    for (position, label) in ring(hub, radius, HYBRID_CLUSTER_DEVICES).into_iter().zip(HYBRID_STAR_LABELS) {
        layout.nodes.push(Node::new(position, label, NodeRole::Device));
        layout.connect_both_ways(hub, position);
    }

    // Mesh cluster on the right half
    let region = Region::new(half, 0.0, width, height).padded(2.0 * node_radius);
    let first_mesh = layout.nodes.len();
    let positions = scatter(rng, region, HYBRID_CLUSTER_DEVICES, 4.0 * node_radius);
    for (position, label) in positions.into_iter().zip(HYBRID_MESH_LABELS) {
        layout.nodes.push(Node::new(position, label, NodeRole::Device));
    }
    let mesh_indices: Vec<usize> = (first_mesh..layout.nodes.len()).collect();
    connect_all(&mut layout, &mesh_indices);

    // Bridge from the star hub to the first mesh device
    let gateway = layout.anchor(first_mesh);
    layout.connect_both_ways(hub, gateway);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RADIUS: f32 = 15.0;

    fn assert_paths_end_on_nodes(layout: &Layout) {
        for path in &layout.paths {
            assert!(path.len() >= 2);
            let (first, last) = (path.first().unwrap(), path.last().unwrap());
            assert_ne!(first, last, "{:?} path has coincident endpoints", layout.kind);
            assert!(layout.nodes.iter().any(|n| n.anchor == *first), "{:?}: {:?} is not a node", layout.kind, first);
            assert!(layout.nodes.iter().any(|n| n.anchor == *last), "{:?}: {:?} is not a node", layout.kind, last);
        }
    }

    fn assert_min_spacing(nodes: &[Node], min_distance: f32) {
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert!(a.position.distance(&b.position) >= min_distance);
            }
        }
    }

    #[test]
    fn every_path_endpoint_is_a_node() {
        let mut rng = StdRng::seed_from_u64(42);
        for (width, height) in [(400.0, 300.0), (800.0, 600.0), (1280.0, 420.0)] {
            for kind in TopologyKind::ALL {
                let layout = generate(kind, width, height, RADIUS, &mut rng);
                assert_eq!(layout.kind, kind);
                assert_paths_end_on_nodes(&layout);
            }
        }
    }

    #[test]
    fn narrow_canvases_keep_links_between_distinct_nodes() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for (kind, width, height) in [
                (TopologyKind::Mesh, 60.0, 300.0),
                (TopologyKind::Mesh, 400.0, 60.0),
                (TopologyKind::Hybrid, 120.0, 300.0),
            ] {
                let layout = generate(kind, width, height, RADIUS, &mut rng);
                assert_paths_end_on_nodes(&layout);
                for c in &layout.connections {
                    assert_ne!(c.from, c.to, "{:?} {}x{} has a zero-length link", kind, width, height);
                }
            }
        }
    }

    #[test]
    fn star_on_small_canvas() {
        let mut rng = StdRng::seed_from_u64(0);
        let layout = generate(TopologyKind::Star, 400.0, 300.0, RADIUS, &mut rng);
        assert_eq!(layout.nodes.len(), 6);
        assert_eq!(layout.paths.len(), 10);
        assert_eq!(layout.connections.len(), 5);

        let hub = layout.nodes[0].position;
        assert_eq!(hub, Point::new(200.0, 150.0));
        for device in &layout.nodes[1..] {
            assert!((device.position.distance(&hub) - 105.0).abs() < 1e-3);
        }
    }

    #[test]
    fn mesh_is_fully_connected_and_spaced() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = generate(TopologyKind::Mesh, 400.0, 300.0, RADIUS, &mut rng);
            assert_eq!(layout.nodes.len(), 5);
            assert_eq!(layout.paths.len(), 20);
            assert_eq!(layout.connections.len(), 10);
            assert_min_spacing(&layout.nodes, 4.0 * RADIUS);
            for node in &layout.nodes {
                assert!(node.position.x >= 2.0 * RADIUS && node.position.x <= 400.0 - 2.0 * RADIUS);
                assert!(node.position.y >= 2.0 * RADIUS && node.position.y <= 300.0 - 2.0 * RADIUS);
            }
        }
    }

    #[test]
    fn bus_counts_do_not_depend_on_size() {
        let mut rng = StdRng::seed_from_u64(0);
        for (width, height) in [(200.0, 100.0), (640.0, 480.0), (1920.0, 1080.0)] {
            let layout = generate(TopologyKind::Bus, width, height, RADIUS, &mut rng);
            assert_eq!(layout.nodes.len(), 5);
            assert_eq!(layout.paths.len(), 8);
            // One bus line plus a stub per device
            assert_eq!(layout.connections.len(), 6);

            let line_y = height / 2.0;
            for node in &layout.nodes {
                assert_eq!(node.anchor.y, line_y);
                assert_eq!(node.position.y, line_y + 2.0 * RADIUS);
            }
            assert!((layout.nodes[0].anchor.x - width * 0.1).abs() < 1e-3);
            assert!((layout.nodes[4].anchor.x - width * 0.9).abs() < 1e-3);
            for path in &layout.paths {
                assert!(path.points().iter().all(|p| p.y == line_y));
            }
        }
    }

    #[test]
    fn tree_counts_do_not_depend_on_size() {
        let mut rng = StdRng::seed_from_u64(0);
        for (width, height) in [(300.0, 300.0), (1024.0, 768.0)] {
            let layout = generate(TopologyKind::Tree, width, height, RADIUS, &mut rng);
            assert_eq!(layout.nodes.len(), 7);
            assert_eq!(layout.paths.len(), 14);
            assert_eq!(layout.nodes.iter().filter(|n| n.role == NodeRole::Hub).count(), 1);
            assert_eq!(layout.nodes.iter().filter(|n| n.role == NodeRole::SubHub).count(), 2);
        }
    }

    #[test]
    fn hybrid_has_one_bridge_between_clusters() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = generate(TopologyKind::Hybrid, 800.0, 400.0, RADIUS, &mut rng);
            assert_eq!(layout.nodes.len(), 7);
            assert_eq!(layout.paths.len(), 14);

            let mesh = &layout.nodes[4..];
            assert_min_spacing(mesh, 4.0 * RADIUS);
            assert!(mesh.iter().all(|n| n.position.x >= 400.0));
            assert!(layout.nodes[..4].iter().all(|n| n.position.x < 400.0));

            let crossing = layout
                .paths
                .iter()
                .filter(|p| (p.first().unwrap().x < 400.0) != (p.last().unwrap().x < 400.0))
                .count();
            assert_eq!(crossing, 2);
        }
    }

    #[test]
    fn unknown_name_generates_star() {
        let mut rng = StdRng::seed_from_u64(0);
        let layout = generate(TopologyKind::from_name("token-ring"), 400.0, 300.0, RADIUS, &mut rng);
        assert_eq!(layout.kind, TopologyKind::Star);
        assert_eq!(layout.nodes.len(), 6);
    }
}
