//! Gameplay tuning, grouped by concern.
//!
//! Keep this separate from runtime configuration (playfield size, frame rate,
//! session length). Every field has a default, so a tuning file only needs to
//! name the values it overrides.

pub mod alien;
pub mod bullet;
pub mod debris;
pub mod flow;
pub mod rock;
pub mod ship;

pub use alien::AlienTuning;
pub use bullet::BulletTuning;
pub use debris::DebrisTuning;
pub use flow::FlowTuning;
pub use rock::RockTuning;
pub use ship::ShipTuning;

use serde::Deserialize;

use crate::domain::errors::TuningError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship: ShipTuning,
    pub bullet: BulletTuning,
    pub rock: RockTuning,
    pub debris: DebrisTuning,
    pub alien: AlienTuning,
    pub flow: FlowTuning,
}

impl Tuning {
    /// Rejects values that would make a random draw or a timer invalid once play starts.
    pub fn validate(&self) -> Result<(), TuningError> {
        let Tuning {
            ship,
            bullet,
            rock,
            debris,
            alien,
            flow,
        } = self;

        ordered("ship.wreck_lifespan_ms", ship.wreck_lifespan_ms)?;
        positive("bullet.speed", bullet.speed)?;
        positive("bullet.lifetime_ms", bullet.lifetime_ms)?;

        positive("rock.max_speed", rock.max_speed)?;
        positive("rock.max_rotate", rock.max_rotate)?;
        ordered("rock.children", rock.children)?;
        ordered("rock.rubble_lifespan_ms", rock.rubble_lifespan_ms)?;

        positive("debris.max_speed", debris.max_speed)?;
        positive("debris.max_rotate", debris.max_rotate)?;

        positive("alien.max_speed", alien.max_speed)?;
        positive("alien.max_bullet_drift", alien.max_bullet_drift)?;
        positive("alien.min_spawn_delay_secs", alien.min_spawn_delay_secs)?;
        positive("alien.min_action_delay_ms", alien.min_action_delay_ms)?;
        probability("alien.retarget_chance", alien.retarget_chance)?;
        probability("alien.fire_chance", alien.fire_chance)?;
        probability("alien.leave_chance", alien.leave_chance)?;
        ordered("alien.wreck_lifespan_ms", alien.wreck_lifespan_ms)?;

        if flow.starting_lives <= 0 || flow.starting_lives > flow.max_lives {
            return Err(invalid(
                "flow.starting_lives",
                format!("must be within 1..={}, got {}", flow.max_lives, flow.starting_lives),
            ));
        }
        if flow.respawn_poll_ms == 0 {
            return Err(invalid("flow.respawn_poll_ms", "must be greater than 0".to_string()));
        }
        if flow.hyperspace_phase_ms == 0 {
            return Err(invalid("flow.hyperspace_phase_ms", "must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}

// Also rejects NaN.
fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        return Ok(());
    }
    Err(invalid(field, format!("must be greater than 0, got {value}")))
}

fn probability(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(invalid(field, format!("must be between 0 and 1, got {value}")))
}

fn ordered(field: &'static str, (min, max): (u32, u32)) -> Result<(), TuningError> {
    if min <= max {
        return Ok(());
    }
    Err(invalid(field, format!("min {min} exceeds max {max}")))
}
