//! Capabilities the playback controller consumes from its host.

use crate::domain::Grid;

/// Draws the grid onto whatever surface the host owns.
///
/// Called with a borrowed grid for the duration of the call only.
pub trait Renderer {
    fn draw(&mut self, grid: &Grid);
}

/// Identifies one requested display refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Display refresh scheduling plus a monotonic clock in milliseconds.
pub trait FrameScheduler {
    fn now_ms(&self) -> f64;

    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }

    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}
