// Domain layer - simulation engine
pub mod domain;

// Application layer - playback control
pub mod application;

// Infrastructure layer - scheduling, UI, rendering, input
pub mod timing;
pub mod ui;
pub mod rendering;
pub mod input;

pub mod config;
pub mod logger;

// Re-exports for convenience
pub use application::{Command, PlaybackController, PlaybackState, Renderer, FrameScheduler};
pub use config::GameConfig;
pub use domain::{Cell, Grid, LifeError, Simulation};
pub use rendering::CanvasRenderer;
pub use timing::FrameLoop;
