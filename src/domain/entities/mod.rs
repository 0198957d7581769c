//! Simulated objects and the method table the collection drives them through.

pub mod alien;
pub mod bullet;
pub mod debris;
pub mod rock;
pub mod ship;

pub use alien::{Alien, AlienSize};
pub use bullet::Bullet;
pub use debris::Debris;
pub use rock::{Rock, RockSize};
pub use ship::Spaceship;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use crate::domain::errors::EntityError;
use crate::domain::geometry::Rect;
use crate::domain::ports::{Canvas, WorldContext};

/// Process-unique, monotonically increasing entity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ship,
    Rock,
    Bullet,
    Alien,
    Debris,
}

#[derive(Debug)]
pub enum Entity {
    Ship(Spaceship),
    Rock(Rock),
    Bullet(Bullet),
    Alien(Alien),
    Debris(Debris),
}

/// Entities are shared between the collection and the behaviours that steer them.
pub type SharedEntity = Arc<Mutex<Entity>>;

/// Locks a shared entity, recovering the data if a previous holder panicked.
pub fn lock(entity: &SharedEntity) -> MutexGuard<'_, Entity> {
    entity.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Entity {
    pub fn share(self) -> SharedEntity {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> EntityId {
        match self {
            Entity::Ship(s) => s.id,
            Entity::Rock(r) => r.id,
            Entity::Bullet(b) => b.id,
            Entity::Alien(a) => a.id,
            Entity::Debris(d) => d.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Ship(_) => EntityKind::Ship,
            Entity::Rock(_) => EntityKind::Rock,
            Entity::Bullet(_) => EntityKind::Bullet,
            Entity::Alien(_) => EntityKind::Alien,
            Entity::Debris(_) => EntityKind::Debris,
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            Entity::Ship(s) => s.body.position,
            Entity::Rock(r) => r.body.position,
            Entity::Bullet(b) => b.body.position,
            Entity::Alien(a) => a.body.position,
            Entity::Debris(d) => d.body.position,
        }
    }

    /// Advances the entity by one frame. Movement and ageing cannot fail.
    pub fn update(&mut self, delta: f32, world: &dyn WorldContext) {
        match self {
            Entity::Ship(s) => s.update(delta, world),
            Entity::Rock(r) => r.update(delta, world),
            Entity::Bullet(b) => b.update(delta, world),
            Entity::Alien(a) => a.update(delta, world),
            Entity::Debris(d) => d.update(delta, world),
        }
    }

    pub fn draw(&self, canvas: &dyn Canvas) -> Result<(), EntityError> {
        match self {
            Entity::Ship(s) => s.draw(canvas)?,
            Entity::Rock(r) => r.draw(canvas)?,
            Entity::Bullet(b) => b.draw(canvas)?,
            Entity::Alien(a) => a.draw(canvas)?,
            Entity::Debris(d) => d.draw(canvas)?,
        }
        Ok(())
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Entity::Ship(s) => s.is_alive(),
            Entity::Rock(r) => r.is_alive(),
            Entity::Bullet(b) => b.is_alive(),
            Entity::Alien(a) => a.is_alive(),
            Entity::Debris(d) => d.is_alive(),
        }
    }

    /// Hostile entities keep a level running until they are gone.
    pub fn is_enemy(&self) -> bool {
        matches!(self, Entity::Rock(_) | Entity::Alien(_))
    }

    /// Collision rectangle; `None` means the entity does not collide right now.
    pub fn hitbox(&self) -> Option<Rect> {
        match self {
            Entity::Ship(s) => s.hitbox(),
            Entity::Rock(r) => Some(r.hitbox()),
            Entity::Bullet(b) => Some(b.hitbox()),
            Entity::Alien(a) => Some(a.hitbox()),
            Entity::Debris(_) => None,
        }
    }

    pub fn is_destructible(&self) -> bool {
        matches!(self, Entity::Ship(_) | Entity::Rock(_) | Entity::Alien(_))
    }

    /// Reaction of `self` to touching `other`; the collection calls it both ways round.
    pub fn on_collision(
        &mut self,
        other: &mut Entity,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        match self {
            Entity::Rock(r) => r.on_collision(other, world),
            Entity::Bullet(b) => b.on_collision(other, world),
            Entity::Alien(a) => a.on_collision(other, world),
            // The ship is always the anvil; debris never collides.
            Entity::Ship(_) | Entity::Debris(_) => Ok(()),
        }
    }

    /// Destroys the entity with the velocity of whatever hit it. Indestructible entities ignore it.
    pub fn on_destruction(
        &mut self,
        impact: Vec2,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        match self {
            Entity::Ship(s) => s.on_destruction(impact, world),
            Entity::Rock(r) => r.on_destruction(impact, world),
            Entity::Alien(a) => a.on_destruction(impact, world),
            Entity::Bullet(_) | Entity::Debris(_) => Ok(()),
        }
    }
}
