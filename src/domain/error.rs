//! Error types for the simulation engine.

use std::fmt;

/// Contract violations reported by [`Simulation`](super::Simulation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// Width or height was zero.
    InvalidDimensions {
        width: usize,
        height: usize,
    },
    /// A `(row, col)` pair fell outside the grid.
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::OutOfBounds { row, col, height, width } => {
                write!(
                    f,
                    "cell ({row}, {col}) out of bounds for {height} rows x {width} columns"
                )
            }
        }
    }
}

impl std::error::Error for LifeError {}

pub type Result<T> = std::result::Result<T, LifeError>;
