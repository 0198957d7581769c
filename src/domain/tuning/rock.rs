use serde::Deserialize;

/// Gameplay tuning for rocks.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RockTuning {
    /// Speed bound for the whole family; each rock uses `max_speed / (size + 2)`.
    pub max_speed: f32,

    /// Spin bound in radians per second; each rock spins at up to a quarter of it.
    pub max_rotate: f32,

    /// Number of children spawned when a rock breaks, inclusive.
    pub children: (u32, u32),

    /// Share of the impact velocity inherited by each child.
    pub impact_transfer: f32,

    /// Lifespan range of the rubble left behind, in milliseconds.
    pub rubble_lifespan_ms: (u32, u32),
}

impl Default for RockTuning {
    fn default() -> Self {
        Self {
            max_speed: 200.0,
            max_rotate: std::f32::consts::PI * 6.0,
            children: (2, 4),
            impact_transfer: 0.1,
            rubble_lifespan_ms: (300, 600),
        }
    }
}
