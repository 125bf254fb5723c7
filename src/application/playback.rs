use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace, warn};

use super::{Command, FrameHandle, FrameScheduler, Renderer};
use crate::config::GameConfig;
use crate::domain::{Cell, Result, Simulation};

pub const MIN_RATE: f64 = 1.0;
pub const MAX_RATE: f64 = 60.0;
pub const DEFAULT_RATE: f64 = 10.0;
pub const DEFAULT_CELL_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Running,
}

/// Map a canvas pixel to `(row, col)`, or `None` if it lies off the grid.
pub fn cell_at(
    x: f32,
    y: f32,
    cell_size: u32,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    // Written this way round so NaN is rejected too.
    if cell_size == 0 || !(x >= 0.0 && y >= 0.0) {
        return None;
    }
    let col = (x / cell_size as f32) as usize;
    let row = (y / cell_size as f32) as usize;
    (row < height && col < width).then_some((row, col))
}

/// Drives a [`Simulation`] from host events.
///
/// While running, each display refresh delivered through [`on_frame`](Self::on_frame)
/// adds the elapsed time to an accumulator and fires one tick per full period of
/// `1000 / rate` milliseconds, so the tick rate does not depend on the refresh rate.
/// At most one refresh callback is pending at a time; it is re-armed after every
/// frame and cancelled on pause.
pub struct PlaybackController<S: FrameScheduler> {
    simulation: Simulation,
    scheduler: S,
    rng: StdRng,
    state: PlaybackState,
    rate: f64,
    accumulator_ms: f64,
    last_frame_ms: f64,
    pending_frame: Option<FrameHandle>,
    cell_size: u32,
}

impl<S: FrameScheduler> PlaybackController<S> {
    /// Paused controller at the default rate, randomizing from OS entropy.
    pub fn new(simulation: Simulation, scheduler: S) -> Self {
        Self {
            simulation,
            scheduler,
            rng: StdRng::from_os_rng(),
            state: PlaybackState::Paused,
            rate: DEFAULT_RATE,
            accumulator_ms: 0.0,
            last_frame_ms: 0.0,
            pending_frame: None,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    /// Build the simulation and controller described by `config`.
    pub fn from_config(config: &GameConfig, scheduler: S) -> Result<Self> {
        let (width, height) = config.grid_dimensions();
        let simulation = Simulation::new(width, height)?;

        let mut controller = Self::new(simulation, scheduler).with_cell_size(config.cell_size);
        controller.set_rate(config.default_rate);
        if let Some(seed) = config.seed {
            controller = controller.with_seed(seed);
        }
        Ok(controller)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Target rate in ticks per second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Milliseconds per tick at the current rate
    pub fn period_ms(&self) -> f64 {
        1000.0 / self.rate
    }

    /// Time carried over toward the next tick
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulator_ms
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn generation(&self) -> u64 {
        self.simulation.generation()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn play(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = PlaybackState::Running;
        self.last_frame_ms = self.scheduler.now_ms();
        self.accumulator_ms = 0.0;
        self.pending_frame = Some(self.scheduler.request_frame());
        info!(rate = self.rate, generation = self.generation(), "playback started");
    }

    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = PlaybackState::Paused;
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        info!(generation = self.generation(), "playback paused");
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Running => self.pause(),
            PlaybackState::Paused => self.play(),
        }
    }

    /// Advance exactly one generation. Ignored while running.
    pub fn step<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        if self.is_running() {
            warn!("step ignored while playback is running");
            return false;
        }
        self.simulation.tick();
        renderer.draw(self.simulation.grid());
        true
    }

    /// Change the target rate, clamped to `MIN_RATE..=MAX_RATE`.
    ///
    /// Time already accumulated is kept and measured against the new period on
    /// the next frame.
    pub fn set_rate(&mut self, ticks_per_second: f64) {
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            warn!(requested = ticks_per_second, "ignoring non-positive playback rate");
            return;
        }
        self.rate = ticks_per_second.clamp(MIN_RATE, MAX_RATE);
        debug!(rate = self.rate, "playback rate changed");
    }

    pub fn adjust_rate(&mut self, delta: f64) {
        self.set_rate((self.rate + delta).clamp(MIN_RATE, MAX_RATE));
    }

    /// Handle one display refresh. Returns the number of ticks fired.
    ///
    /// Frames arriving while paused or after their callback was cancelled do
    /// nothing. Draws once if any tick fired, then re-arms the next callback.
    /// A non-finite timestamp is skipped and leaves the timing state untouched.
    pub fn on_frame<R: Renderer + ?Sized>(&mut self, timestamp_ms: f64, renderer: &mut R) -> u32 {
        if !self.is_running() || self.pending_frame.take().is_none() {
            return 0;
        }
        if !timestamp_ms.is_finite() {
            warn!(timestamp_ms, "skipping frame with non-finite timestamp");
            self.pending_frame = Some(self.scheduler.request_frame());
            return 0;
        }

        let elapsed = (timestamp_ms - self.last_frame_ms).max(0.0);
        self.last_frame_ms = timestamp_ms;
        self.accumulator_ms += elapsed;

        let period = self.period_ms();
        let mut ticks = 0;
        while self.accumulator_ms >= period {
            self.simulation.tick();
            self.accumulator_ms -= period;
            ticks += 1;
        }

        if ticks > 0 {
            renderer.draw(self.simulation.grid());
            trace!(ticks, generation = self.generation(), "frame advanced");
        }

        self.pending_frame = Some(self.scheduler.request_frame());
        ticks
    }

    pub fn toggle_cell<R: Renderer + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        renderer: &mut R,
    ) -> Result<Cell> {
        let cell = self.simulation.toggle_cell(row, col)?;
        debug!(row, col, alive = cell.is_alive(), "cell toggled");
        renderer.draw(self.simulation.grid());
        Ok(cell)
    }

    /// Toggle the cell under a canvas pixel. Clicks off the grid are dropped.
    pub fn click<R: Renderer + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        renderer: &mut R,
    ) -> Option<(usize, usize)> {
        let (row, col) = cell_at(
            x,
            y,
            self.cell_size,
            self.simulation.width(),
            self.simulation.height(),
        )?;
        self.toggle_cell(row, col, renderer).ok()?;
        Some((row, col))
    }

    /// Pause, then kill every cell and reset the generation counter.
    pub fn clear<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.pause();
        self.simulation.clear();
        info!("grid cleared");
        renderer.draw(self.simulation.grid());
    }

    /// Pause, then re-roll every cell. The generation counter is kept.
    pub fn randomize<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.pause();
        self.simulation.randomize(&mut self.rng);
        info!(population = self.simulation.population(), "grid randomized");
        renderer.draw(self.simulation.grid());
    }

    pub fn redraw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw(self.simulation.grid());
    }

    pub fn dispatch<R: Renderer + ?Sized>(&mut self, command: Command, renderer: &mut R) {
        match command {
            Command::TogglePlayback => self.toggle(),
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Step => {
                self.step(renderer);
            }
            Command::Clear => self.clear(renderer),
            Command::Randomize => self.randomize(renderer),
            Command::SetRate(rate) => self.set_rate(rate),
            Command::AdjustRate(delta) => self.adjust_rate(delta),
        }
    }

    /// Stop playback and release the simulation.
    pub fn destroy(mut self) {
        self.pause();
        info!(generation = self.generation(), "playback controller destroyed");
    }
}

impl<S: FrameScheduler> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grid;
    use crate::timing::FrameLoop;

    #[derive(Default)]
    struct RecordingRenderer {
        draws: usize,
        last: Option<Grid>,
    }

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, grid: &Grid) {
            self.draws += 1;
            self.last = Some(grid.clone());
        }
    }

    fn controller(width: usize, height: usize) -> PlaybackController<FrameLoop> {
        let simulation = Simulation::new(width, height).unwrap();
        PlaybackController::new(simulation, FrameLoop::new()).with_seed(11)
    }

    fn blinker() -> PlaybackController<FrameLoop> {
        let mut c = controller(3, 3);
        let mut r = RecordingRenderer::default();
        for col in 0..3 {
            c.toggle_cell(1, col, &mut r).unwrap();
        }
        c
    }

    /// Deliver a display refresh the way the host loop does.
    fn frame(c: &mut PlaybackController<FrameLoop>, now_ms: f64, r: &mut RecordingRenderer) -> u32 {
        match c.scheduler_mut().advance(now_ms) {
            Some(_) => c.on_frame(now_ms, r),
            None => 0,
        }
    }

    #[test]
    fn test_starts_paused_at_default_rate() {
        let c = controller(4, 4);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.rate(), DEFAULT_RATE);
        assert_eq!(c.scheduler().armed(), None);
    }

    #[test]
    fn test_stalled_frame_fires_every_elapsed_period() {
        let mut c = blinker();
        let mut r = RecordingRenderer::default();
        c.set_rate(2.0);
        c.play();

        assert_eq!(frame(&mut c, 1500.0, &mut r), 3);
        assert_eq!(c.generation(), 3);
        assert_eq!(r.draws, 1);
        // odd number of blinker ticks leaves it vertical
        assert!(c.simulation().cell_state(0, 1).unwrap().is_alive());
    }

    #[test]
    fn test_leftover_time_carries_between_frames() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        c.play();

        let ticks: Vec<u32> = [40.0, 80.0, 120.0, 160.0, 200.0]
            .into_iter()
            .map(|t| frame(&mut c, t, &mut r))
            .collect();

        assert_eq!(ticks, vec![0, 0, 1, 0, 1]);
        assert_eq!(c.generation(), 2);
        assert_eq!(r.draws, 2);
    }

    #[test]
    fn test_play_records_reference_timestamp() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        c.scheduler_mut().set_now(5000.0);
        c.play();

        assert_eq!(frame(&mut c, 5050.0, &mut r), 0);
        assert_eq!(frame(&mut c, 5100.0, &mut r), 1);
    }

    #[test]
    fn test_play_is_idempotent() {
        let mut c = controller(4, 4);
        c.play();
        let armed = c.scheduler().armed();
        c.play();
        assert!(c.is_running());
        assert_eq!(c.scheduler().armed(), armed);
    }

    #[test]
    fn test_pause_cancels_pending_frame() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        c.play();
        c.pause();
        c.pause();

        assert_eq!(c.scheduler().armed(), None);
        assert_eq!(frame(&mut c, 10_000.0, &mut r), 0);
        assert_eq!(c.on_frame(10_000.0, &mut r), 0);
        assert_eq!(c.generation(), 0);
        assert_eq!(r.draws, 0);
    }

    #[test]
    fn test_non_finite_timestamp_is_skipped() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        c.play();

        assert_eq!(frame(&mut c, f64::NAN, &mut r), 0);
        assert_eq!(frame(&mut c, f64::INFINITY, &mut r), 0);
        assert!(c.scheduler().armed().is_some());
        assert_eq!(c.accumulated_ms(), 0.0);

        // Timing resumes from the last good reference at 0 ms.
        assert_eq!(frame(&mut c, 100.0, &mut r), 1);
        assert_eq!(frame(&mut c, 200.0, &mut r), 1);
        assert_eq!(c.generation(), 2);
    }

    #[test]
    fn test_frame_rearms_callback() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        c.play();
        frame(&mut c, 16.0, &mut r);
        assert!(c.scheduler().armed().is_some());
    }

    #[test]
    fn test_step_only_while_paused() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();

        assert!(c.step(&mut r));
        assert_eq!(c.generation(), 1);
        assert_eq!(r.draws, 1);

        c.play();
        assert!(!c.step(&mut r));
        assert_eq!(c.generation(), 1);
        assert_eq!(r.draws, 1);
    }

    #[test]
    fn test_toggle_switches_state() {
        let mut c = controller(4, 4);
        c.toggle();
        assert_eq!(c.state(), PlaybackState::Running);
        c.toggle();
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_rate_change_keeps_accumulated_time() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        c.set_rate(2.0);
        c.play();

        assert_eq!(frame(&mut c, 400.0, &mut r), 0);
        assert_eq!(c.accumulated_ms(), 400.0);

        c.set_rate(10.0);
        assert_eq!(c.accumulated_ms(), 400.0);
        assert_eq!(frame(&mut c, 400.0, &mut r), 4);
    }

    #[test]
    fn test_rate_is_clamped_and_validated() {
        let mut c = controller(4, 4);
        c.set_rate(120.0);
        assert_eq!(c.rate(), MAX_RATE);
        c.set_rate(0.0);
        c.set_rate(-3.0);
        c.set_rate(f64::NAN);
        assert_eq!(c.rate(), MAX_RATE);
        c.set_rate(0.25);
        assert_eq!(c.rate(), MIN_RATE);
        c.adjust_rate(4.0);
        assert_eq!(c.rate(), 5.0);
        c.adjust_rate(-100.0);
        assert_eq!(c.rate(), MIN_RATE);
    }

    #[test]
    fn test_backwards_timestamp_adds_nothing() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        c.scheduler_mut().set_now(1000.0);
        c.play();
        assert_eq!(frame(&mut c, 500.0, &mut r), 0);
        assert_eq!(c.accumulated_ms(), 0.0);
    }

    #[test]
    fn test_clear_pauses_and_resets() {
        let mut c = blinker();
        let mut r = RecordingRenderer::default();
        c.step(&mut r);
        c.play();
        c.clear(&mut r);

        assert!(!c.is_running());
        assert_eq!(c.scheduler().armed(), None);
        assert_eq!(c.generation(), 0);
        assert_eq!(r.last.as_ref().map(Grid::population), Some(0));
    }

    #[test]
    fn test_randomize_pauses_and_keeps_generation() {
        let mut c = controller(16, 16);
        let mut r = RecordingRenderer::default();
        c.step(&mut r);
        c.play();
        c.randomize(&mut r);

        assert!(!c.is_running());
        assert_eq!(c.generation(), 1);
        assert_eq!(r.draws, 2);
        assert!(c.simulation().population() > 0);
    }

    #[test]
    fn test_seeded_randomize_is_reproducible() {
        let mut r = RecordingRenderer::default();
        let mut a = controller(12, 12);
        let mut b = controller(12, 12);
        a.randomize(&mut r);
        b.randomize(&mut r);
        assert_eq!(a.simulation().grid(), b.simulation().grid());
    }

    #[test]
    fn test_click_maps_pixels_to_cells() {
        let mut c = controller(8, 6);
        let mut r = RecordingRenderer::default();

        assert_eq!(c.click(25.0, 12.0, &mut r), Some((1, 2)));
        assert!(c.simulation().cell_state(1, 2).unwrap().is_alive());
        assert_eq!(r.draws, 1);

        assert_eq!(c.click(80.0, 5.0, &mut r), None);
        assert_eq!(c.click(-1.0, 5.0, &mut r), None);
        assert_eq!(r.draws, 1);
        assert_eq!(c.generation(), 0);
    }

    #[test]
    fn test_toggle_cell_out_of_bounds() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();
        assert!(c.toggle_cell(4, 0, &mut r).is_err());
        assert_eq!(r.draws, 0);
    }

    #[test]
    fn test_cell_at_edges() {
        assert_eq!(cell_at(0.0, 0.0, 10, 5, 5), Some((0, 0)));
        assert_eq!(cell_at(49.9, 49.9, 10, 5, 5), Some((4, 4)));
        assert_eq!(cell_at(50.0, 0.0, 10, 5, 5), None);
        assert_eq!(cell_at(f32::NAN, 0.0, 10, 5, 5), None);
        assert_eq!(cell_at(1.0, 1.0, 0, 5, 5), None);
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let mut c = controller(4, 4);
        let mut r = RecordingRenderer::default();

        c.dispatch(Command::Step, &mut r);
        c.dispatch(Command::SetRate(30.0), &mut r);
        c.dispatch(Command::AdjustRate(-5.0), &mut r);
        c.dispatch(Command::Play, &mut r);
        c.dispatch(Command::Step, &mut r);

        assert_eq!(c.generation(), 1);
        assert_eq!(c.rate(), 25.0);
        assert!(c.is_running());

        c.dispatch(Command::TogglePlayback, &mut r);
        assert!(!c.is_running());
    }

    #[test]
    fn test_destroy_cancels_pending_frame() {
        let mut frames = FrameLoop::new();
        {
            let mut c = PlaybackController::new(Simulation::new(4, 4).unwrap(), &mut frames);
            c.play();
            c.destroy();
        }
        assert_eq!(frames.armed(), None);
    }

    #[test]
    fn test_drop_cancels_pending_frame() {
        let mut frames = FrameLoop::new();
        {
            let mut c = PlaybackController::new(Simulation::new(4, 4).unwrap(), &mut frames);
            c.play();
        }
        assert_eq!(frames.armed(), None);
    }

    #[test]
    fn test_from_config() {
        let config = GameConfig::default().with_rate(4.0).with_seed(9);
        let c = PlaybackController::from_config(&config, FrameLoop::new()).unwrap();
        assert_eq!((c.simulation().width(), c.simulation().height()), (80, 60));
        assert_eq!(c.rate(), 4.0);
        assert_eq!(c.cell_size(), 10);

        let bad = GameConfig::default().with_cell_size(0);
        assert!(PlaybackController::from_config(&bad, FrameLoop::new()).is_err());
    }
}
