//! Playback controller and the host capabilities it consumes.

mod command;
mod host;
mod playback;

pub use command::Command;
pub use host::{FrameHandle, FrameScheduler, Renderer};
pub use playback::{
    DEFAULT_CELL_SIZE, DEFAULT_RATE, MAX_RATE, MIN_RATE, PlaybackController, PlaybackState,
    cell_at,
};
