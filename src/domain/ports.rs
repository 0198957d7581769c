// Ports for collaborators outside the simulation core.

use std::sync::Arc;

use glam::Vec2;

use crate::domain::entities::{Entity, SharedEntity};
use crate::domain::errors::AssetError;
use crate::domain::events::GameEvent;
use crate::domain::geometry::{Playfield, Rect};
use crate::domain::sprite::SpriteSheet;
use crate::domain::tuning::Tuning;

// Port for drawing one frame of a sprite sheet.
pub trait Canvas: Send + Sync {
    fn draw_sprite(
        &self,
        sheet: &SpriteSheet,
        source: Rect,
        position: Vec2,
        heading: Vec2,
    ) -> Result<(), AssetError>;
}

// Port for looking up texture dimensions by file name.
pub trait AssetSource: Send + Sync {
    fn texture_size(&self, name: &str) -> Result<(u32, u32), AssetError>;
}

// Port for named sounds and loops.
pub trait AudioSink: Send + Sync {
    fn play(&self, name: &str) -> Result<(), AssetError>;
    fn start_loop(&self, name: &str) -> Result<(), AssetError>;
    fn stop_loop(&self, name: &str) -> Result<(), AssetError>;
}

/// Everything an entity may reach while it updates, collides or breaks apart.
///
/// Implementations must not take entity locks: entities call this while
/// their own lock is held.
pub trait WorldContext: Send + Sync {
    fn playfield(&self) -> Playfield;
    fn tuning(&self) -> &Tuning;
    fn level(&self) -> u32;
    fn sprite(&self, name: &str, rows: u32, cols: u32) -> Result<Arc<SpriteSheet>, AssetError>;
    /// Queues an entity for the next update; it is never visible immediately.
    fn spawn(&self, entity: Entity) -> SharedEntity;
    fn publish(&self, event: GameEvent);
    /// Removes one life and returns what is left.
    fn lose_life(&self) -> i32;
}
