use serde::Deserialize;

/// Level flow, lives and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowTuning {
    pub starting_lives: i32,

    /// Lives can never be granted beyond this.
    pub max_lives: i32,

    /// Points per extra life.
    pub extra_life_every: u64,

    /// How long the "Level N" banner stays up, in milliseconds.
    pub banner_ms: u64,

    /// Pause between the banner going up and the level populating, in milliseconds.
    pub level_warmup_ms: u64,

    /// Big rocks spawned on top of the level number.
    pub extra_rocks: u32,

    /// Wait between the ship exploding and the respawn decision, in milliseconds.
    pub respawn_delay_ms: u64,

    /// Poll period while waiting for a clear respawn spot, in milliseconds.
    pub respawn_poll_ms: u64,

    /// Length of each of the two hyperspace phases, in milliseconds.
    pub hyperspace_phase_ms: u64,

    /// Fragments drawn while the ship is in hyperspace.
    pub hyperspace_fragments: u32,

    pub rock_points: RockPoints,
    pub alien_points: AlienPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RockPoints {
    pub tiny: u64,
    pub small: u64,
    pub medium: u64,
    pub big: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlienPoints {
    pub small: u64,
    pub big: u64,
}

impl Default for FlowTuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            max_lives: 20,
            extra_life_every: 10_000,
            banner_ms: 2000,
            level_warmup_ms: 500,
            extra_rocks: 3,
            respawn_delay_ms: 4000,
            respawn_poll_ms: 100,
            hyperspace_phase_ms: 1000,
            hyperspace_fragments: 4,
            rock_points: RockPoints::default(),
            alien_points: AlienPoints::default(),
        }
    }
}

impl Default for RockPoints {
    fn default() -> Self {
        Self {
            tiny: 100,
            small: 75,
            medium: 50,
            big: 25,
        }
    }
}

impl Default for AlienPoints {
    fn default() -> Self {
        Self {
            small: 250,
            big: 500,
        }
    }
}
