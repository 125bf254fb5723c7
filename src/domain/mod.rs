//! Simulation engine: grid storage, the B3/S23 transition and its error types.

mod cell;
mod error;
mod grid;
mod simulation;

pub use cell::Cell;
pub use error::{LifeError, Result};
pub use grid::{Grid, PARALLEL_THRESHOLD};
pub use simulation::Simulation;
