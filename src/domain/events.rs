// Event topics and payloads carried by the event bus.

use crate::domain::entities::{AlienSize, RockSize};
use std::fmt;

/// Closed set of topics the simulation publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    RockSpawned,
    RockDestroyed,
    AlienSpawned,
    AlienDestroyed,
    AlienLeftPlayfield,
    AlienFire,
    SpaceshipFire,
    SpaceshipThrust,
    SpaceshipDestroyed,
    SpaceshipEnterHyperspace,
    SpaceshipExtraLife,
    LevelStarted,
    GameOver,
}

impl Topic {
    pub const ALL: [Topic; 13] = [
        Topic::RockSpawned,
        Topic::RockDestroyed,
        Topic::AlienSpawned,
        Topic::AlienDestroyed,
        Topic::AlienLeftPlayfield,
        Topic::AlienFire,
        Topic::SpaceshipFire,
        Topic::SpaceshipThrust,
        Topic::SpaceshipDestroyed,
        Topic::SpaceshipEnterHyperspace,
        Topic::SpaceshipExtraLife,
        Topic::LevelStarted,
        Topic::GameOver,
    ];

    /// Wire name used in logs, e.g. `rock:destroyed`.
    pub fn name(self) -> &'static str {
        match self {
            Topic::RockSpawned => "rock:spawned",
            Topic::RockDestroyed => "rock:destroyed",
            Topic::AlienSpawned => "alien:spawned",
            Topic::AlienDestroyed => "alien:destroyed",
            Topic::AlienLeftPlayfield => "alien:left_playfield",
            Topic::AlienFire => "alien:fire",
            Topic::SpaceshipFire => "spaceship:fire",
            Topic::SpaceshipThrust => "spaceship:thrust",
            Topic::SpaceshipDestroyed => "spaceship:destroyed",
            Topic::SpaceshipEnterHyperspace => "spaceship:enter_hyperspace",
            Topic::SpaceshipExtraLife => "spaceship:extra_life",
            Topic::LevelStarted => "level:started",
            Topic::GameOver => "game:over",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A published event together with its topic-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RockSpawned(RockSize),
    RockDestroyed(RockSize),
    AlienSpawned(AlienSize),
    AlienDestroyed(AlienSize),
    AlienLeftPlayfield(AlienSize),
    AlienFire,
    SpaceshipFire,
    /// True when thrust starts, false when it stops.
    SpaceshipThrust(bool),
    SpaceshipDestroyed,
    SpaceshipEnterHyperspace,
    SpaceshipExtraLife,
    LevelStarted(u32),
    GameOver,
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::RockSpawned(_) => Topic::RockSpawned,
            GameEvent::RockDestroyed(_) => Topic::RockDestroyed,
            GameEvent::AlienSpawned(_) => Topic::AlienSpawned,
            GameEvent::AlienDestroyed(_) => Topic::AlienDestroyed,
            GameEvent::AlienLeftPlayfield(_) => Topic::AlienLeftPlayfield,
            GameEvent::AlienFire => Topic::AlienFire,
            GameEvent::SpaceshipFire => Topic::SpaceshipFire,
            GameEvent::SpaceshipThrust(_) => Topic::SpaceshipThrust,
            GameEvent::SpaceshipDestroyed => Topic::SpaceshipDestroyed,
            GameEvent::SpaceshipEnterHyperspace => Topic::SpaceshipEnterHyperspace,
            GameEvent::SpaceshipExtraLife => Topic::SpaceshipExtraLife,
            GameEvent::LevelStarted(_) => Topic::LevelStarted,
            GameEvent::GameOver => Topic::GameOver,
        }
    }
}
