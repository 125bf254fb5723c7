//! Frame scheduling driven by the host's per-frame loop.

use crate::application::{FrameHandle, FrameScheduler};

/// Single-slot refresh scheduler.
///
/// The host calls [`FrameLoop::advance`] once per display refresh with the
/// current time; if a callback was requested it is handed back and the slot is
/// emptied, so the consumer must re-arm explicitly.
#[derive(Debug, Default)]
pub struct FrameLoop {
    now_ms: f64,
    next_id: u64,
    armed: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new display frame at `now_ms`, returning the callback due in it.
    pub fn advance(&mut self, now_ms: f64) -> Option<FrameHandle> {
        self.now_ms = now_ms;
        self.armed.take()
    }

    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    pub fn armed(&self) -> Option<FrameHandle> {
        self.armed
    }
}

impl FrameScheduler for FrameLoop {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.armed = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }
}
