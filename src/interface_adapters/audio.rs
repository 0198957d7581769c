// Audio sink that logs cues instead of playing them.

use std::sync::{Mutex, PoisonError};

use tracing::trace;

use crate::domain::errors::AssetError;
use crate::domain::ports::AudioSink;

const SOUNDS: [&str; 12] = [
    "explosion_tiny.wav",
    "explosion_small.wav",
    "explosion_medium.wav",
    "explosion_large.wav",
    "explosion_alien.wav",
    "explosion_ship.wav",
    "fire.wav",
    "fire_alien.wav",
    "fuel_burn.wav",
    "hyperspace.wav",
    "move_alien_big.wav",
    "move_alien_small.wav",
];

#[derive(Debug, Default)]
pub struct TracingAudio {
    log: Mutex<Vec<String>>,
}

impl TracingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every accepted cue so far, as `play|start|stop <sound>`.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, action: &str, name: &str) -> Result<(), AssetError> {
        if !SOUNDS.contains(&name) {
            return Err(AssetError::NotFound {
                name: name.to_string(),
            });
        }
        trace!(action, sound = name, "audio cue");
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{action} {name}"));
        Ok(())
    }
}

impl AudioSink for TracingAudio {
    fn play(&self, name: &str) -> Result<(), AssetError> {
        self.record("play", name)
    }

    fn start_loop(&self, name: &str) -> Result<(), AssetError> {
        self.record("start", name)
    }

    fn stop_loop(&self, name: &str) -> Result<(), AssetError> {
        self.record("stop", name)
    }
}
