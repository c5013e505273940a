//! Frame scheduling abstraction for the animation driver.
//!
//! The driver never loops on its own: after each step it asks a
//! [`FrameScheduler`] for exactly one more frame and remembers the returned
//! handle. A frame callback only performs work when it carries the handle the
//! driver is waiting for, so cancelling simply forgets the handle.

use eframe::egui;
use std::time::Duration;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Ask for the next frame callback.
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a previously requested frame. Unknown handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Requests repaints from an egui context.
///
/// egui cannot withdraw a repaint request. The driver drops the cancelled
/// handle, so the repaint that still arrives performs no step.
pub struct EguiFrameScheduler {
    ctx: egui::Context,
    frame_interval: Duration,
    next_handle: u64,
}

impl EguiFrameScheduler {
    pub fn new(ctx: egui::Context, frame_interval: Duration) -> Self {
        Self {
            ctx,
            frame_interval,
            next_handle: 0,
        }
    }
}

impl FrameScheduler for EguiFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        self.ctx.request_repaint_after(self.frame_interval);
        FrameHandle(self.next_handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        log::trace!("Cancelled frame {:?}", handle);
    }
}

/// Deterministic scheduler for tests: records requests and cancellations.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pub pending: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

#[cfg(test)]
impl ManualScheduler {
    /// Take the oldest pending frame, as the host would when it fires.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

#[cfg(test)]
impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}
