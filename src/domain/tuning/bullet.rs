use serde::Deserialize;

/// Gameplay tuning for bullets, shared by the ship and aliens.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    /// Muzzle speed in pixels per second.
    pub speed: f32,

    /// Age in milliseconds at which a bullet expires.
    pub lifetime_ms: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: 500.0,
            lifetime_ms: 1250.0,
        }
    }
}
