use anyhow::Context;
use macroquad::prelude::*;
use tracing::{error, info};

use life_canvas::{
    CanvasRenderer, Command, FrameLoop, GameConfig, PlaybackController, input, logger, rendering,
    ui,
};

fn window_conf() -> Conf {
    let config = GameConfig::default();
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.canvas_width as i32 + ui::PANEL_WIDTH as i32,
        window_height: config.window.canvas_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn setup(config: &GameConfig) -> anyhow::Result<(PlaybackController<FrameLoop>, CanvasRenderer)> {
    let controller = PlaybackController::from_config(config, FrameLoop::new())
        .context("failed to create simulation")?;
    let simulation = controller.simulation();
    let canvas = CanvasRenderer::new(
        simulation.width(),
        simulation.height(),
        config.cell_size,
        config.palette,
    )
    .context("failed to create canvas")?;
    Ok((controller, canvas))
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(err) = logger::init() {
        eprintln!("failed to initialise logging: {err:#}");
    }

    let config = GameConfig::default();
    let (mut controller, mut canvas) = match setup(&config) {
        Ok(parts) => parts,
        Err(err) => {
            error!("{err:#}");
            return;
        }
    };
    info!(
        width = controller.simulation().width(),
        height = controller.simulation().height(),
        rate = controller.rate(),
        "game of life ready"
    );

    controller.redraw(&mut canvas);
    canvas.take_dirty();
    let texture = Texture2D::from_image(canvas.image());
    texture.set_filter(FilterMode::Nearest);
    let canvas_width = config.window.canvas_width as f32;

    let mut buttons = ui::create_buttons();
    let mut slider = ui::create_rate_slider(controller.rate());

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let now_ms = get_time() * 1000.0;
        let mouse_pos = mouse_position();

        // The frame loop hands back the refresh callback the controller armed last frame.
        if controller.scheduler_mut().advance(now_ms).is_some() {
            controller.on_frame(now_ms, &mut canvas);
        }

        let mut commands = input::process_button_clicks(&buttons, mouse_pos);
        commands.extend(input::process_keyboard_input());
        if let Some(rate) = slider.update(mouse_pos) {
            commands.push(Command::SetRate(rate as f64));
        }
        for command in commands {
            controller.dispatch(command, &mut canvas);
        }
        input::handle_canvas_click(&mut controller, &mut canvas, mouse_pos, canvas_width);

        ui::sync_buttons(&mut buttons, controller.is_running());
        slider.set_value(controller.rate().round() as u32);

        if canvas.take_dirty() {
            texture.update(canvas.image());
        }

        clear_background(BLACK);
        rendering::draw_canvas(&texture);
        rendering::draw_controls(&controller, &buttons, &slider, mouse_pos);

        next_frame().await;
    }

    controller.destroy();
}
