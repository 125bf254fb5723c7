use macroquad::prelude::*;

const TRACK_HEIGHT: f32 = 6.0;
const KNOB_RADIUS: f32 = 8.0;

/// Horizontal integer slider, used for the playback rate.
#[derive(Clone)]
pub struct Slider {
    x: f32,
    y: f32,
    width: f32,
    min: u32,
    max: u32,
    value: u32,
    label: String,
    dragging: bool,
}

impl Slider {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        label: impl Into<String>,
        min: u32,
        max: u32,
        value: u32,
    ) -> Self {
        Self {
            x,
            y,
            width,
            min,
            max,
            value: value.clamp(min, max),
            label: label.into(),
            dragging: false,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Value under a horizontal pixel position, clamped to the track
    pub fn value_at(&self, mouse_x: f32) -> u32 {
        let t = ((mouse_x - self.x) / self.width).clamp(0.0, 1.0);
        let span = (self.max - self.min) as f32;
        self.min + (t * span).round() as u32
    }

    fn knob_x(&self) -> f32 {
        let span = (self.max - self.min).max(1) as f32;
        self.x + (self.value - self.min) as f32 / span * self.width
    }

    fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x - KNOB_RADIUS
            && mouse_pos.0 <= self.x + self.width + KNOB_RADIUS
            && (mouse_pos.1 - self.y).abs() <= KNOB_RADIUS
    }

    /// Handle dragging. Returns the new value when it changed this frame.
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> Option<u32> {
        if is_mouse_button_pressed(MouseButton::Left) && self.is_hovered(mouse_pos) {
            self.dragging = true;
        }
        if !is_mouse_button_down(MouseButton::Left) {
            self.dragging = false;
        }
        if !self.dragging {
            return None;
        }

        let value = self.value_at(mouse_pos.0);
        if value == self.value {
            return None;
        }
        self.value = value;
        Some(value)
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(
            &format!("{}: {} ticks/s", self.label, self.value),
            self.x,
            self.y - 14.0,
            16.0,
            WHITE,
        );
        draw_rectangle(
            self.x,
            self.y - TRACK_HEIGHT / 2.0,
            self.width,
            TRACK_HEIGHT,
            Color::from_rgba(70, 70, 70, 255),
        );

        let knob_color = if self.dragging || self.is_hovered(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_circle(self.knob_x(), self.y, KNOB_RADIUS, knob_color);
    }
}
