/// Discrete user commands delivered by the input surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    TogglePlayback,
    Play,
    Pause,
    Step,
    Clear,
    Randomize,
    /// Absolute rate in ticks per second
    SetRate(f64),
    /// Relative rate change in ticks per second
    AdjustRate(f64),
}
