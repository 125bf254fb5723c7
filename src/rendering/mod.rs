use anyhow::Context;
use macroquad::prelude::*;
use tracing::warn;

use crate::application::{FrameScheduler, PlaybackController, Renderer};
use crate::config::Palette;
use crate::domain::Grid;
use crate::ui::{Button, PANEL_WIDTH, Slider, panel_x};

/// Pixel size of the canvas for a grid: one shared 1px line between cells plus the outer border.
pub fn surface_size(grid_width: usize, grid_height: usize, cell_size: u32) -> (usize, usize) {
    let cell = cell_size as usize;
    (grid_width * cell + 1, grid_height * cell + 1)
}

/// Rasterises the grid into a CPU-side image.
///
/// Every cell gets a 1px grid line border and a `(cell_size - 1)` square interior
/// filled with the alive or dead colour. The host uploads the image to a texture
/// whenever [`take_dirty`](Self::take_dirty) reports a change.
pub struct CanvasRenderer {
    grid_width: usize,
    grid_height: usize,
    cell_size: u32,
    palette: Palette,
    image: Image,
    dirty: bool,
}

impl CanvasRenderer {
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        cell_size: u32,
        palette: Palette,
    ) -> anyhow::Result<Self> {
        let (width, height) = surface_size(grid_width, grid_height, cell_size);
        let width = u16::try_from(width).context("canvas surface too wide")?;
        let height = u16::try_from(height).context("canvas surface too tall")?;

        Ok(Self {
            grid_width,
            grid_height,
            cell_size,
            palette,
            image: Image::gen_image_color(width, height, palette.grid_line),
            dirty: true,
        })
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Whether the image changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, grid: &Grid) {
        if (grid.width(), grid.height()) != (self.grid_width, self.grid_height) {
            warn!(
                grid_width = grid.width(),
                grid_height = grid.height(),
                "grid does not match canvas surface, skipping draw"
            );
            return;
        }

        let grid_line: [u8; 4] = self.palette.grid_line.into();
        let alive: [u8; 4] = self.palette.alive.into();
        let dead: [u8; 4] = self.palette.dead.into();

        let stride = self.image.width();
        let cell = self.cell_size as usize;
        let inner = cell.saturating_sub(1);
        let pixels = self.image.get_image_data_mut();
        pixels.fill(grid_line);

        for (row, col, state) in grid.iter_cells() {
            let color = if state.is_alive() { alive } else { dead };
            let (x0, y0) = (col * cell + 1, row * cell + 1);
            for y in y0..y0 + inner {
                let start = y * stride + x0;
                pixels[start..start + inner].fill(color);
            }
        }

        self.dirty = true;
    }
}

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw the uploaded canvas texture at the top-left corner
pub fn draw_canvas(texture: &Texture2D) {
    draw_texture(texture, 0.0, 0.0, WHITE);
}

fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255),
    );
}

/// Draw the control panel: buttons, rate slider and playback status
pub fn draw_controls<S: FrameScheduler>(
    controller: &PlaybackController<S>,
    buttons: &[Button],
    slider: &Slider,
    mouse_pos: (f32, f32),
) {
    draw_panel_background();

    buttons.iter().for_each(|btn| btn.draw(mouse_pos));
    slider.draw(mouse_pos);

    let px = panel_x() + 10.0;
    let simulation = controller.simulation();
    let value_color = Color::from_rgba(180, 180, 180, 255);

    let labels = [
        ("Generation:", px, 330.0, 16.0, WHITE),
        (
            &format!("{}", simulation.generation()),
            px, 350.0, 20.0,
            Color::from_rgba(0, 255, 150, 255)
        ),
        ("Population:", px, 380.0, 16.0, WHITE),
        (&format_number(simulation.population()), px, 400.0, 14.0, value_color),
        ("Grid:", px, 430.0, 16.0, WHITE),
        (
            &format!("{} x {}", simulation.width(), simulation.height()),
            px, 450.0, 14.0, value_color
        ),
        ("Status:", px, 480.0, 16.0, WHITE),
        (
            if controller.is_running() { "Running" } else { "Paused" },
            px,
            500.0,
            16.0,
            if controller.is_running() {
                Color::from_rgba(0, 255, 0, 255)
            } else {
                Color::from_rgba(255, 165, 0, 255)
            }
        ),
        ("Space: Play/Pause", px, 540.0, 12.0, GRAY),
        ("S: Step  C: Clear", px, 555.0, 12.0, GRAY),
        ("R: Random", px, 570.0, 12.0, GRAY),
        ("Up/Down: Speed", px, 585.0, 12.0, GRAY),
    ];

    labels.iter().for_each(|(text, x, y, size, color)| {
        draw_text(text, *x, *y, *size, *color);
    });
}
