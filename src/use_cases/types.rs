// Use-case level inputs/outputs for the frame loop.

/// Controls sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Held for as long as the engine should burn.
    pub thrust: bool,
    pub fire: bool,
    pub hyperspace: bool,
    pub toggle_pause: bool,
    pub quit: bool,
    pub debug_extra_life: bool,
    pub debug_clear_rocks: bool,
}

/// Port for whatever produces player input.
pub trait InputSource: Send {
    fn poll(&mut self, delta: f32) -> Controls;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    GameOver,
    Shutdown,
}
