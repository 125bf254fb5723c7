use macroquad::prelude::*;

use crate::application::{Command, FrameScheduler, PlaybackController, Renderer};
use crate::ui::{Button, CLEAR, PLAY_PAUSE, RANDOM, STEP};

/// Rate change per Up/Down key press, in ticks per second
pub const RATE_STEP: f64 = 1.0;

const KEY_BINDINGS: [KeyCode; 6] = [
    KeyCode::Space,
    KeyCode::S,
    KeyCode::C,
    KeyCode::R,
    KeyCode::Up,
    KeyCode::Down,
];

/// Keyboard shortcut table
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Space => Some(Command::TogglePlayback),
        KeyCode::S => Some(Command::Step),
        KeyCode::C => Some(Command::Clear),
        KeyCode::R => Some(Command::Randomize),
        KeyCode::Up => Some(Command::AdjustRate(RATE_STEP)),
        KeyCode::Down => Some(Command::AdjustRate(-RATE_STEP)),
        _ => None,
    }
}

/// Command bound to a panel button index
pub fn command_for_button(index: usize) -> Option<Command> {
    match index {
        PLAY_PAUSE => Some(Command::TogglePlayback),
        STEP => Some(Command::Step),
        CLEAR => Some(Command::Clear),
        RANDOM => Some(Command::Randomize),
        _ => None,
    }
}

/// Commands from keys pressed this frame
pub fn process_keyboard_input() -> Vec<Command> {
    KEY_BINDINGS
        .iter()
        .filter(|&&key| is_key_pressed(key))
        .filter_map(|&key| command_for_key(key))
        .collect()
}

/// Commands from buttons clicked this frame
pub fn process_button_clicks(buttons: &[Button], mouse_pos: (f32, f32)) -> Vec<Command> {
    buttons
        .iter()
        .enumerate()
        .filter(|(_, btn)| btn.is_clicked(mouse_pos))
        .filter_map(|(idx, _)| command_for_button(idx))
        .collect()
}

/// Toggle the cell under a left click inside the canvas area
pub fn handle_canvas_click<S: FrameScheduler, R: Renderer>(
    controller: &mut PlaybackController<S>,
    renderer: &mut R,
    mouse_pos: (f32, f32),
    canvas_width: f32,
) {
    if mouse_pos.0 >= canvas_width || !is_mouse_button_pressed(MouseButton::Left) {
        return;
    }
    controller.click(mouse_pos.0, mouse_pos.1, renderer);
}
