//! Startup configuration.

use macroquad::prelude::Color;

use crate::application::{DEFAULT_CELL_SIZE, DEFAULT_RATE};

/// Window and canvas sizing, in pixels.
pub struct WindowConfig {
    pub title: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Game of Life"),
            canvas_width: 800,
            canvas_height: 600,
        }
    }
}

/// Colours used by the canvas renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub grid_line: Color,
    pub dead: Color,
    pub alive: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid_line: Color::from_rgba(0x33, 0x33, 0x33, 255),
            dead: Color::from_rgba(0, 0, 0, 255),
            alive: Color::from_rgba(255, 255, 255, 255),
        }
    }
}

/// Game configuration.
///
/// - `cell_size`: edge length of one cell on the canvas
/// - `default_rate`: ticks per second when playback starts
/// - `seed`: fixed seed for randomize, `None` draws from OS entropy
pub struct GameConfig {
    pub window: WindowConfig,
    pub cell_size: u32,
    pub default_rate: f64,
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            cell_size: DEFAULT_CELL_SIZE,
            default_rate: DEFAULT_RATE,
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rate(mut self, ticks_per_second: f64) -> Self {
        self.default_rate = ticks_per_second;
        self
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Grid `(width, height)` in cells: the canvas divided by the cell size.
    ///
    /// A zero cell size yields a zero-sized grid, which the engine rejects.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        if self.cell_size == 0 {
            return (0, 0);
        }
        (
            (self.window.canvas_width / self.cell_size) as usize,
            (self.window.canvas_height / self.cell_size) as usize,
        )
    }
}
