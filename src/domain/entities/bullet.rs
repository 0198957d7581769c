// Bullets fired by the ship and by aliens.

use std::sync::Arc;

use glam::Vec2;

use crate::domain::entities::{Entity, EntityId, EntityKind};
use crate::domain::errors::{AssetError, EntityError};
use crate::domain::geometry::Rect;
use crate::domain::physics::Body;
use crate::domain::ports::{Canvas, WorldContext};
use crate::domain::sprite::SpriteSheet;

#[derive(Debug)]
pub struct Bullet {
    pub id: EntityId,
    pub body: Body,
    sheet: Arc<SpriteSheet>,
    alive: bool,
    player_fired: bool,
    age_ms: f32,
    lifetime_ms: f32,
}

impl Bullet {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        player_fired: bool,
        world: &dyn WorldContext,
    ) -> Result<Self, AssetError> {
        let sheet = world.sprite("bullet.png", 1, 1)?;
        Ok(Self {
            id: EntityId::next(),
            body: Body {
                velocity,
                ..Body::at(position)
            },
            sheet,
            alive: true,
            player_fired,
            age_ms: 0.0,
            lifetime_ms: world.tuning().bullet.lifetime_ms,
        })
    }

    pub fn is_player_fired(&self) -> bool {
        self.player_fired
    }

    pub(crate) fn update(&mut self, delta: f32, world: &dyn WorldContext) {
        self.body.apply_physics(delta);
        self.body.position = world.playfield().wraparound(self.body.position);
        self.age_ms += delta * 1000.0;
    }

    pub(crate) fn draw(&self, canvas: &dyn Canvas) -> Result<(), AssetError> {
        self.sheet
            .draw(canvas, 0, 0, self.body.position, self.body.rotation)
    }

    pub fn is_alive(&self) -> bool {
        self.alive && self.age_ms < self.lifetime_ms
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.body.position.x, self.body.position.y, 1.0, 1.0)
    }

    /// Consumes the bullet against a destructible target, unless the target is on the firer's side.
    pub(crate) fn on_collision(
        &mut self,
        other: &mut Entity,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        if !other.is_destructible() {
            return Ok(());
        }
        match other.kind() {
            EntityKind::Ship if self.player_fired => return Ok(()),
            EntityKind::Alien if !self.player_fired => return Ok(()),
            _ => {}
        }

        self.alive = false;
        other.on_destruction(self.body.velocity, world)
    }
}
