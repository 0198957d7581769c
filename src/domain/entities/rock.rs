// Rocks: the main hazard, breaking into smaller rocks when destroyed.

use std::sync::Arc;

use glam::Vec2;

use crate::domain::entities::{Debris, Entity, EntityId, EntityKind};
use crate::domain::errors::{AssetError, EntityError};
use crate::domain::events::GameEvent;
use crate::domain::geometry::Rect;
use crate::domain::physics::Body;
use crate::domain::ports::{Canvas, WorldContext};
use crate::domain::random;
use crate::domain::sprite::SpriteSheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RockSize {
    Tiny,
    Small,
    Medium,
    Big,
}

impl RockSize {
    /// Size of the children this rock breaks into, if any.
    pub fn smaller(self) -> Option<RockSize> {
        match self {
            RockSize::Tiny => None,
            RockSize::Small => Some(RockSize::Tiny),
            RockSize::Medium => Some(RockSize::Small),
            RockSize::Big => Some(RockSize::Medium),
        }
    }

    fn tier(self) -> u32 {
        match self {
            RockSize::Tiny => 0,
            RockSize::Small => 1,
            RockSize::Medium => 2,
            RockSize::Big => 3,
        }
    }

    pub fn sprite_name(self) -> &'static str {
        match self {
            RockSize::Tiny => "rock_tiny.png",
            RockSize::Small => "rock_small.png",
            RockSize::Medium => "rock_medium.png",
            RockSize::Big => "rock_big.png",
        }
    }
}

#[derive(Debug)]
pub struct Rock {
    pub id: EntityId,
    pub body: Body,
    sheet: Arc<SpriteSheet>,
    /// Radians per second.
    spin: f32,
    alive: bool,
    size: RockSize,
}

impl Rock {
    /// A rock drifting in a random direction; bigger rocks drift slower.
    pub fn new(size: RockSize, position: Vec2, world: &dyn WorldContext) -> Result<Self, AssetError> {
        let tuning = world.tuning().rock;
        let sheet = world.sprite(size.sprite_name(), 1, 1)?;
        let max_speed = tuning.max_speed / (size.tier() + 2) as f32;

        Ok(Self {
            id: EntityId::next(),
            body: Body {
                velocity: Vec2::new(
                    random::range(-max_speed, max_speed),
                    random::range(-max_speed, max_speed),
                ),
                ..Body::at(position)
            },
            sheet,
            spin: random::up_to(tuning.max_rotate) / 4.0 * random::sign(),
            alive: true,
            size,
        })
    }

    pub fn size(&self) -> RockSize {
        self.size
    }

    pub(crate) fn update(&mut self, delta: f32, world: &dyn WorldContext) {
        self.body.rotate(self.spin * delta);
        self.body.apply_physics(delta);
        self.body.position = world.playfield().wraparound(self.body.position);
    }

    pub(crate) fn draw(&self, canvas: &dyn Canvas) -> Result<(), AssetError> {
        self.sheet
            .draw(canvas, 0, 0, self.body.position, self.body.rotation)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn hitbox(&self) -> Rect {
        self.sheet.rectangle(self.body.position)
    }

    /// Rocks smash anything destructible except other rocks.
    pub(crate) fn on_collision(
        &mut self,
        other: &mut Entity,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        if !other.is_destructible() || other.kind() == EntityKind::Rock {
            return Ok(());
        }
        other.on_destruction(self.body.velocity, world)
    }

    /// Breaks the rock into smaller ones pushed along `impact`, plus a burst of rubble.
    pub(crate) fn on_destruction(
        &mut self,
        impact: Vec2,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        if !self.alive {
            return Ok(());
        }
        self.alive = false;
        let tuning = world.tuning().rock;

        if let Some(child_size) = self.size.smaller() {
            let (min_children, max_children) = tuning.children;
            for _ in 0..random::int_inclusive(min_children, max_children) {
                let mut child = Rock::new(child_size, self.body.position, world)?;
                let nudge = impact.normalize_or_zero() * child.sheet.size().x / 2.0;
                child.body.position += nudge;
                child.body.velocity += impact * tuning.impact_transfer;
                world.spawn(Entity::Rock(child));
                world.publish(GameEvent::RockSpawned(child_size));
            }
        }

        let rubble = world.sprite("shrapnel.png", 5, 1)?;
        let tier = self.size.tier();
        let (min_life, max_life) = tuning.rubble_lifespan_ms;
        for _ in 0..random::int_range(tier + 2, tier * 2 + 4) {
            let frame = random::int_range(0, rubble.frame_count());
            world.spawn(Entity::Debris(Debris::new(
                self.body.position,
                rubble.clone(),
                frame,
                random::int_inclusive(min_life, max_life),
                &world.tuning().debris,
            )));
        }

        world.publish(GameEvent::RockDestroyed(self.size));
        Ok(())
    }
}
