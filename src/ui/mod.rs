mod button;
mod slider;

pub use button::Button;
pub use slider::Slider;

use macroquad::prelude::screen_width;

use crate::application::{MAX_RATE, MIN_RATE};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;
const BUTTON_WIDTH: f32 = PANEL_WIDTH - 20.0;

/// Button order as returned by [`create_buttons`]
pub const PLAY_PAUSE: usize = 0;
pub const STEP: usize = 1;
pub const CLEAR: usize = 2;
pub const RANDOM: usize = 3;

/// X position where the control panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Panel buttons, top to bottom
pub fn create_buttons() -> Vec<Button> {
    let px = panel_x() + 10.0;
    ["Play", "Step", "Clear", "Random"]
        .iter()
        .enumerate()
        .map(|(i, label)| {
            Button::new(px, 20.0 + i as f32 * 50.0, BUTTON_WIDTH, BUTTON_HEIGHT, *label)
        })
        .collect()
}

/// Reflect playback state on the buttons: Play/Pause label, Step disabled while running
pub fn sync_buttons(buttons: &mut [Button], running: bool) {
    if let Some(play) = buttons.get_mut(PLAY_PAUSE) {
        play.set_label(if running { "Pause" } else { "Play" });
    }
    if let Some(step) = buttons.get_mut(STEP) {
        step.set_enabled(!running);
    }
}

pub fn create_rate_slider(rate: f64) -> Slider {
    Slider::new(
        panel_x() + 10.0,
        260.0,
        BUTTON_WIDTH,
        "Speed",
        MIN_RATE as u32,
        MAX_RATE as u32,
        rate.round() as u32,
    )
}
