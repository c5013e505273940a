//! Animation driver: the per-frame loop tying layout, renderer and packets together.
//!
//! ## States
//!
//! - `Idle`: no frame pending. Entered on construction (before the first
//!   size is known) and after `cancel`.
//! - `Running`: exactly one frame requested from the scheduler.
//! - `Terminated`: after `unmount`; every further input is ignored.
//!
//! ## Frame step
//!
//! 1. Compute the elapsed time since the previous step
//! 2. Clear the surface and draw the layout (generated once per topology/size)
//! 3. Run the spawn policy
//! 4. Advance and draw the packets
//! 5. Request the next frame
//!
//! Resizes and topology changes cancel the pending frame, drop every packet
//! in flight and restart from `Idle`, so there is never more than one frame
//! loop and no packet outlives the layout it was spawned on.

use rand::Rng;
use rand::rngs::StdRng;

use crate::render::{Palette, RenderOptions, Surface, render_layout};
use crate::topology::{Layout, TopologyKind, generate};

use super::packet::{self, Packet, SpawnPolicy};
use super::scheduler::{FrameHandle, FrameScheduler};

/// Tunables for the animation, normally taken from the `[animation]` config table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub node_radius: f32,
    pub packet_radius: f32,
    /// Pixels travelled per 16 ms reference frame.
    pub packet_speed: f32,
    pub spawn_interval_ms: f64,
    pub show_labels: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            node_radius: 15.0,
            packet_radius: 5.0,
            packet_speed: 2.0,
            spawn_interval_ms: 1000.0,
            show_labels: true,
        }
    }
}

/// Observable driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Running,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DriverState {
    Idle,
    Running { pending: FrameHandle, last_frame_ms: f64 },
    Terminated,
}

/// Counters shown next to the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverStats {
    pub spawned: u64,
    pub delivered: u64,
    /// Packets currently travelling.
    pub in_flight: u64,
}

pub struct AnimationDriver<S: FrameScheduler, R: Rng = StdRng> {
    scheduler: S,
    rng: R,
    settings: AnimationSettings,
    state: DriverState,
    topology: TopologyKind,
    size: Option<(f32, f32)>,
    layout: Option<Layout>,
    packets: Vec<Packet>,
    spawner: SpawnPolicy,
    stats: DriverStats,
}

impl<S: FrameScheduler, R: Rng> AnimationDriver<S, R> {
    pub fn new(scheduler: S, rng: R, settings: AnimationSettings, topology: TopologyKind) -> Self {
        Self {
            scheduler,
            rng,
            spawner: SpawnPolicy::new(settings.spawn_interval_ms, 0.0),
            settings,
            state: DriverState::Idle,
            topology,
            size: None,
            layout: None,
            packets: Vec::new(),
            stats: DriverStats::default(),
        }
    }

    pub fn phase(&self) -> DriverPhase {
        match self.state {
            DriverState::Idle => DriverPhase::Idle,
            DriverState::Running { .. } => DriverPhase::Running,
            DriverState::Terminated => DriverPhase::Terminated,
        }
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match self.state {
            DriverState::Running { pending, .. } => Some(pending),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn topology(&self) -> TopologyKind {
        self.topology
    }

    pub fn size(&self) -> Option<(f32, f32)> {
        self.size
    }

    #[cfg(test)]
    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn stats(&self) -> DriverStats {
        DriverStats {
            in_flight: self.packets.len() as u64,
            ..self.stats
        }
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.settings.show_labels = show;
    }

    /// React to a new canvas size: cancel, drop packets and restart with the new dimensions.
    ///
    /// Non-positive sizes leave the driver idle until a usable size arrives.
    pub fn resize(&mut self, width: f32, height: f32, now_ms: f64) {
        if self.state == DriverState::Terminated {
            return;
        }
        self.cancel();
        self.packets.clear();
        self.layout = None;

        if width <= 0.0 || height <= 0.0 {
            log::debug!("Ignoring degenerate canvas size {}x{}", width, height);
            self.size = None;
            return;
        }
        log::debug!("Canvas resized to {}x{}", width, height);
        self.size = Some((width, height));
        self.start(now_ms);
    }

    /// Switch topology, restarting the loop with an empty packet collection.
    pub fn set_topology(&mut self, topology: TopologyKind, now_ms: f64) {
        if self.state == DriverState::Terminated || topology == self.topology {
            return;
        }
        log::info!("Topology changed: {} -> {}", self.topology, topology);
        self.cancel();
        self.packets.clear();
        self.layout = None;
        self.topology = topology;
        if self.size.is_some() {
            self.start(now_ms);
        }
    }

    /// Cancel the pending frame, if any. Calling this while idle does nothing.
    pub fn cancel(&mut self) {
        if let DriverState::Running { pending, .. } = self.state {
            self.scheduler.cancel(pending);
            self.state = DriverState::Idle;
        }
    }

    /// Final teardown. No further frames are requested or processed.
    pub fn unmount(&mut self) {
        self.cancel();
        self.packets.clear();
        self.state = DriverState::Terminated;
        log::debug!("Animation driver unmounted");
    }

    fn start(&mut self, now_ms: f64) {
        self.spawner.reset(now_ms);
        let pending = self.scheduler.request_frame();
        self.state = DriverState::Running {
            pending,
            last_frame_ms: now_ms,
        };
    }

    /// Run the pending frame, whatever its handle. Convenience for hosts that
    /// call back once per repaint without tracking handles themselves.
    pub fn on_frame(&mut self, now_ms: f64, surface: Option<&mut dyn Surface>) -> bool {
        match self.pending_frame() {
            Some(handle) => self.step(handle, now_ms, surface),
            None => false,
        }
    }

    /// Execute one animation step for `handle`.
    ///
    /// Returns `true` when a frame was drawn. Stale handles and steps while
    /// not running are ignored. A missing surface skips the work for this
    /// cycle and re-arms the single pending frame.
    pub fn step(&mut self, handle: FrameHandle, now_ms: f64, surface: Option<&mut dyn Surface>) -> bool {
        let last_frame_ms = match self.state {
            DriverState::Running { pending, last_frame_ms } if pending == handle => last_frame_ms,
            _ => return false,
        };
        let Some((width, height)) = self.size else {
            self.state = DriverState::Idle;
            return false;
        };

        let Some(surface) = surface else {
            log::trace!("Surface not ready, skipping frame");
            self.state = DriverState::Running {
                pending: self.scheduler.request_frame(),
                last_frame_ms: now_ms,
            };
            return false;
        };

        let elapsed_ms = (now_ms - last_frame_ms).max(0.0) as f32;
        let palette = Palette::for_topology(self.topology);
        surface.clear(palette.background);

        if self.layout.is_none() {
            self.layout = Some(generate(self.topology, width, height, self.settings.node_radius, &mut self.rng));
        }
        if let Some(layout) = &self.layout {
            let options = RenderOptions {
                node_radius: self.settings.node_radius,
                show_labels: self.settings.show_labels,
                ..RenderOptions::default()
            };
            render_layout(surface, layout, &palette, &options);

            if let Some(packet) = self.spawner.poll(now_ms, &layout.paths, &mut self.rng) {
                self.packets.push(packet);
                self.stats.spawned += 1;
            }
        }

        let delivered = packet::advance(&mut self.packets, elapsed_ms, self.settings.packet_speed);
        self.stats.delivered += delivered as u64;
        packet::render(&self.packets, surface, self.settings.packet_radius, palette.packet);

        self.state = DriverState::Running {
            pending: self.scheduler.request_frame(),
            last_frame_ms: now_ms,
        };
        true
    }

    #[cfg(test)]
    pub(crate) fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
