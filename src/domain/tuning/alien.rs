use serde::Deserialize;

/// Gameplay tuning for aliens and their background behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlienTuning {
    /// Top speed of a small alien in pixels per second; big aliens fly at half.
    pub max_speed: f32,

    /// Largest aiming error of a big alien in radians; small aliens use a third.
    pub max_bullet_drift: f32,

    /// Spawn attempt period at level zero, in seconds.
    pub spawn_delay_secs: f32,

    /// Spawn period reduction per level, in seconds.
    pub spawn_delay_step_secs: f32,

    /// Spawn period floor, in seconds.
    pub min_spawn_delay_secs: f32,

    /// Action period at level zero, in milliseconds.
    pub action_delay_ms: f32,

    /// Action period reduction per level, in milliseconds.
    pub action_delay_step_ms: f32,

    /// Action period floor, in milliseconds.
    pub min_action_delay_ms: f32,

    /// Probability of picking a new movement target on an action tick.
    pub retarget_chance: f32,

    /// Probability of firing on an action tick that did not retarget.
    pub fire_chance: f32,

    /// Probability of being removed, rather than wrapped, when leaving the field.
    pub leave_chance: f32,

    /// Free space required around a spawn point, as a fraction of the hitbox.
    pub spawn_clearance: f32,

    /// Number of debris pieces left behind by an explosion.
    pub wreck_pieces: u32,

    /// Lifespan range of that debris, in milliseconds.
    pub wreck_lifespan_ms: (u32, u32),
}

impl Default for AlienTuning {
    fn default() -> Self {
        Self {
            max_speed: 300.0,
            max_bullet_drift: std::f32::consts::FRAC_PI_2,
            spawn_delay_secs: 10.0,
            spawn_delay_step_secs: 1.25,
            min_spawn_delay_secs: 1.0,
            action_delay_ms: 3000.0,
            action_delay_step_ms: 300.0,
            min_action_delay_ms: 500.0,
            retarget_chance: 0.3,
            fire_chance: 0.5,
            leave_chance: 0.2,
            spawn_clearance: 0.25,
            wreck_pieces: 6,
            wreck_lifespan_ms: (200, 400),
        }
    }
}
