// Scripted pilot standing in for a keyboard in headless runs.

use tracing::debug;

use crate::use_cases::types::{Controls, InputSource};

const FIRE_EVERY_SECS: f32 = 0.25;
const HYPERSPACE_EVERY_SECS: f32 = 12.0;
const TURN_CYCLE_SECS: f32 = 4.0;
const THRUST_CYCLE_SECS: f32 = 3.0;
const THRUST_BURST_SECS: f32 = 0.6;

/// Spins, thrusts in bursts, fires steadily and jumps to hyperspace now and then.
#[derive(Debug, Default)]
pub struct AutopilotInput {
    elapsed: f32,
    last_fire: f32,
    last_jump: f32,
    quit_after: Option<f32>,
}

impl AutopilotInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests quit once `seconds` of input have been produced.
    pub fn quit_after(mut self, seconds: f32) -> Self {
        self.quit_after = Some(seconds);
        self
    }
}

impl InputSource for AutopilotInput {
    fn poll(&mut self, delta: f32) -> Controls {
        self.elapsed += delta;
        if self.quit_after.is_some_and(|limit| self.elapsed >= limit) {
            debug!(elapsed = self.elapsed, "autopilot quitting");
            return Controls {
                quit: true,
                ..Controls::default()
            };
        }

        let turn = self.elapsed % TURN_CYCLE_SECS;
        let mut controls = Controls {
            rotate_right: turn < 1.0,
            rotate_left: (2.0..2.5).contains(&turn),
            thrust: self.elapsed % THRUST_CYCLE_SECS < THRUST_BURST_SECS,
            ..Controls::default()
        };

        if self.elapsed - self.last_fire >= FIRE_EVERY_SECS {
            self.last_fire = self.elapsed;
            controls.fire = true;
        }
        if self.elapsed - self.last_jump >= HYPERSPACE_EVERY_SECS {
            self.last_jump = self.elapsed;
            controls.hyperspace = true;
        }
        controls
    }
}
