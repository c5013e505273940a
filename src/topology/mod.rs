//! Topology layouts.
//!
//! - `types`: points, nodes, connections, paths and the topology kinds
//! - `placement`: spaced random placement with a grid fallback
//! - `layout`: one generator per topology kind

pub mod layout;
pub mod placement;
pub mod types;

pub use layout::generate;
pub use types::{Layout, NodeRole, Path, Point, TopologyKind};
