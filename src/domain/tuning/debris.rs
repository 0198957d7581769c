use serde::Deserialize;

/// Gameplay tuning for cosmetic debris.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebrisTuning {
    /// Speed bound per axis in pixels per second.
    pub max_speed: f32,

    /// Spin bound in radians per second.
    pub max_rotate: f32,
}

impl Default for DebrisTuning {
    fn default() -> Self {
        Self {
            max_speed: 500.0,
            max_rotate: std::f32::consts::PI * 12.0,
        }
    }
}
