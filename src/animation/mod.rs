//! Packet animation.
//!
//! - `packet`: spawn/advance/render of packets and the spawn interval timer
//! - `scheduler`: frame request abstraction (egui repaints in the app, manual in tests)
//! - `driver`: the Idle/Running frame loop owning all animation state

pub mod driver;
pub mod packet;
pub mod scheduler;

pub use driver::{AnimationDriver, AnimationSettings, DriverPhase};
pub use scheduler::EguiFrameScheduler;
