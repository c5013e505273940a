//! Core data structures shared by the layout generator, renderer and packet engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 2D point in canvas pixels (origin at the top-left corner of the canvas).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// The five topologies the application can show.
///
/// Parsing never fails: anything unrecognized falls back to [`TopologyKind::Star`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyKind {
    #[default]
    Star,
    Mesh,
    Bus,
    Tree,
    Hybrid,
}

impl TopologyKind {
    pub const ALL: [TopologyKind; 5] = [
        TopologyKind::Star,
        TopologyKind::Mesh,
        TopologyKind::Bus,
        TopologyKind::Tree,
        TopologyKind::Hybrid,
    ];

    /// Lenient parse used for external selections; unknown names map to star.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "star" => TopologyKind::Star,
            "mesh" => TopologyKind::Mesh,
            "bus" => TopologyKind::Bus,
            "tree" => TopologyKind::Tree,
            "hybrid" => TopologyKind::Hybrid,
            other => {
                log::debug!("Unknown topology '{}', falling back to star", other);
                TopologyKind::Star
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TopologyKind::Star => "Star",
            TopologyKind::Mesh => "Mesh",
            TopologyKind::Bus => "Bus",
            TopologyKind::Tree => "Tree",
            TopologyKind::Hybrid => "Hybrid",
        }
    }
}

impl FromStr for TopologyKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TopologyKind::from_name(s))
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title().to_ascii_lowercase())
    }
}

/// What a node represents; only affects how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Hub,
    SubHub,
    Device,
}

/// A drawn device or hub.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Centre of the drawn circle.
    pub position: Point,
    /// Where the node attaches to its medium. Paths start and end here.
    /// Same as `position` except for bus devices, which hang below the line.
    pub anchor: Point,
    pub label: String,
    pub role: NodeRole,
}

impl Node {
    pub fn new(position: Point, label: impl Into<String>, role: NodeRole) -> Self {
        Self {
            position,
            anchor: position,
            label: label.into(),
            role,
        }
    }

    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }
}

/// A physical connection, drawn once regardless of how many directions carry packets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: Point,
    pub to: Point,
}

/// Ordered sequence of points a packet travels across.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// A directed two-point path.
    pub fn link(from: Point, to: Point) -> Self {
        Self::new(vec![from, to])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }
}

/// Everything the renderer and packet engine need for one topology.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub kind: TopologyKind,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub paths: Vec<Path>,
}

impl Layout {
    pub fn new(kind: TopologyKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            connections: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Add a physical connection plus a path in each direction.
    pub(crate) fn connect_both_ways(&mut self, a: Point, b: Point) {
        self.connections.push(Connection { from: a, to: b });
        self.paths.push(Path::link(a, b));
        self.paths.push(Path::link(b, a));
    }

    /// Anchor of the node at `index`. Panics on out-of-range indices, which are layout bugs.
    pub(crate) fn anchor(&self, index: usize) -> Point {
        self.nodes[index].anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_topology_names_fall_back_to_star() {
        assert_eq!(TopologyKind::from_name("mesh"), TopologyKind::Mesh);
        assert_eq!(TopologyKind::from_name("  HYBRID "), TopologyKind::Hybrid);
        assert_eq!(TopologyKind::from_name("ring"), TopologyKind::Star);
        assert_eq!(TopologyKind::from_name(""), TopologyKind::Star);
        assert_eq!("tree".parse::<TopologyKind>(), Ok(TopologyKind::Tree));
    }

    #[test]
    fn point_lerp_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.lerp(&b, 0.5), Point::new(1.5, 2.0));
    }
}
