// Alien saucers: wander the field and shoot at the ship on their own timer.

use std::sync::Arc;

use glam::Vec2;

use crate::domain::cancel::CancelToken;
use crate::domain::entities::{Bullet, Debris, Entity, EntityId, EntityKind};
use crate::domain::errors::{AssetError, EntityError};
use crate::domain::events::GameEvent;
use crate::domain::geometry::{Playfield, Rect};
use crate::domain::physics::Body;
use crate::domain::ports::{Canvas, WorldContext};
use crate::domain::random;
use crate::domain::sprite::SpriteSheet;
use crate::domain::tuning::AlienTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlienSize {
    Small,
    Big,
}

impl AlienSize {
    /// Big until level 3; after that small aliens show up with probability `level / 10`.
    pub fn for_level(level: u32) -> AlienSize {
        if level > 2 && random::int_range(0, 10) < level {
            AlienSize::Small
        } else {
            AlienSize::Big
        }
    }

    fn sprite(self) -> (&'static str, u32, u32) {
        match self {
            AlienSize::Small => ("alien_small.png", 3, 3),
            AlienSize::Big => ("alien_big.png", 2, 2),
        }
    }

    fn animation_frames(self) -> u32 {
        match self {
            AlienSize::Small => 7,
            AlienSize::Big => 4,
        }
    }
}

#[derive(Debug)]
pub struct Alien {
    pub id: EntityId,
    pub body: Body,
    sheet: Arc<SpriteSheet>,
    size: AlienSize,
    alive: bool,
    /// Seconds alive, drives the animation.
    age: f32,
    /// Widest aiming error in radians, rolled once per alien.
    bullet_drift: f32,
    runner: Option<CancelToken>,
}

impl Alien {
    pub fn new(size: AlienSize, position: Vec2, world: &dyn WorldContext) -> Result<Self, AssetError> {
        let (name, rows, cols) = size.sprite();
        let tuning = world.tuning().alien;
        let mut bullet_drift = random::up_to(tuning.max_bullet_drift);
        if size == AlienSize::Small {
            bullet_drift /= 3.0;
        }
        let mut alien = Self {
            id: EntityId::next(),
            body: Body {
                max_speed: tuning.max_speed,
                ..Body::at(position)
            },
            sheet: world.sprite(name, rows, cols)?,
            size,
            alive: true,
            age: 0.0,
            bullet_drift,
            runner: None,
        };
        alien.randomize_target(world.playfield(), &tuning);
        Ok(alien)
    }

    pub fn size(&self) -> AlienSize {
        self.size
    }

    /// Hands the alien the token of the behaviour steering it, so destruction can stop it.
    pub fn attach_runner(&mut self, token: CancelToken) {
        self.runner = Some(token);
    }

    pub fn runner(&self) -> Option<&CancelToken> {
        self.runner.as_ref()
    }

    pub fn bullet_drift(&self) -> f32 {
        self.bullet_drift
    }

    /// Heads for a random point on the field. Big aliens fly at half speed.
    pub fn randomize_target(&mut self, playfield: Playfield, tuning: &AlienTuning) {
        let target = playfield.random_position();
        let direction = (target - self.body.position).normalize_or_zero();
        let mut speed = random::range(tuning.max_speed / 3.0, tuning.max_speed);
        if self.size == AlienSize::Big {
            speed /= 2.0;
        }
        self.body.velocity = direction * speed;
    }

    /// Fires at `target`, off by a random angle within this alien's drift.
    pub fn fire_at(&mut self, target: Vec2, world: &dyn WorldContext) -> Result<(), EntityError> {
        let tuning = world.tuning();
        let drift = if self.bullet_drift > 0.0 {
            random::range(-self.bullet_drift, self.bullet_drift)
        } else {
            0.0
        };
        let aim = (target - self.body.position)
            .try_normalize()
            .unwrap_or(self.body.heading());
        let direction = Vec2::from_angle(drift).rotate(aim);

        let size = self.sheet.size();
        let muzzle = self.body.position + direction * size.x.max(size.y) / 2.0;
        let bullet = Bullet::new(muzzle, direction * tuning.bullet.speed, false, world)?;
        world.spawn(Entity::Bullet(bullet));
        world.publish(GameEvent::AlienFire);
        Ok(())
    }

    pub(crate) fn update(&mut self, delta: f32, world: &dyn WorldContext) {
        self.age += delta;
        self.body.apply_physics(delta);

        let playfield = world.playfield();
        if !playfield.is_outside(self.body.position) {
            return;
        }
        if random::chance(world.tuning().alien.leave_chance) {
            self.alive = false;
            self.stop_runner();
            world.publish(GameEvent::AlienLeftPlayfield(self.size));
        } else {
            self.body.position = playfield.wraparound(self.body.position);
        }
    }

    pub(crate) fn draw(&self, canvas: &dyn Canvas) -> Result<(), AssetError> {
        let frame = (self.age * 2.0).floor() as u32 % self.size.animation_frames();
        self.sheet
            .draw_index(canvas, frame, self.body.position, Vec2::X)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn hitbox(&self) -> Rect {
        self.sheet.rectangle(self.body.position)
    }

    /// Ramming the ship destroys it; the alien survives.
    pub(crate) fn on_collision(
        &mut self,
        other: &mut Entity,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        if other.kind() == EntityKind::Ship {
            other.on_destruction(self.body.velocity, world)?;
        }
        Ok(())
    }

    pub(crate) fn on_destruction(
        &mut self,
        _impact: Vec2,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        if !self.alive {
            return Ok(());
        }
        self.alive = false;
        self.stop_runner();

        let tuning = world.tuning();
        let wreck = world.sprite("shrapnel.png", 5, 1)?;
        let (min_life, max_life) = tuning.alien.wreck_lifespan_ms;
        for _ in 0..tuning.alien.wreck_pieces {
            let frame = random::int_range(0, wreck.frame_count());
            world.spawn(Entity::Debris(Debris::new(
                self.body.position,
                wreck.clone(),
                frame,
                random::int_inclusive(min_life, max_life),
                &tuning.debris,
            )));
        }

        world.publish(GameEvent::AlienDestroyed(self.size));
        Ok(())
    }

    fn stop_runner(&mut self) {
        if let Some(token) = self.runner.take() {
            token.cancel();
        }
    }
}
