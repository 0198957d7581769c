use serde::Deserialize;

/// Gameplay tuning for the player ship.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Rotation speed in radians per second.
    pub rotate_speed: f32,

    /// Maximum speed in pixels per second.
    pub max_speed: f32,

    /// Velocity added each frame while thrusting, along the heading.
    pub fuel_boost: f32,

    /// Fraction of velocity shed per second while coasting.
    pub decay: f32,

    /// Free space required around the centre before respawning, as a fraction of the hitbox.
    pub spawn_clearance: f32,

    /// Lifespan range of the pieces left behind by an explosion, in milliseconds.
    pub wreck_lifespan_ms: (u32, u32),
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            rotate_speed: std::f32::consts::PI * 3.0,
            max_speed: 400.0,
            fuel_boost: 40.0,
            decay: 2.0,
            spawn_clearance: 0.5,
            wreck_lifespan_ms: (1000, 2000),
        }
    }
}
