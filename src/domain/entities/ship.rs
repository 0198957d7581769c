// The player ship.

use std::sync::Arc;

use glam::Vec2;

use crate::domain::entities::{Bullet, Debris, Entity, EntityId};
use crate::domain::errors::{AssetError, EntityError};
use crate::domain::events::GameEvent;
use crate::domain::geometry::{Playfield, Rect};
use crate::domain::physics::Body;
use crate::domain::ports::{Canvas, WorldContext};
use crate::domain::random;
use crate::domain::sprite::SpriteSheet;
use crate::domain::tuning::ShipTuning;

/// First frame of the four wreck pieces in the ship sheet.
const WRECK_FIRST_FRAME: u32 = 3;
const WRECK_PIECES: u32 = 4;

#[derive(Debug)]
pub struct Spaceship {
    pub id: EntityId,
    pub body: Body,
    sheet: Arc<SpriteSheet>,
    tuning: ShipTuning,
    alive: bool,
    fuel_burning: bool,
    in_hyperspace: bool,
    /// Seconds spent thrusting, drives the flame animation.
    burn_time: f32,
}

impl Spaceship {
    /// A fresh ship at the centre of the field, nose up, standing still.
    pub fn new(world: &dyn WorldContext) -> Result<Self, AssetError> {
        let tuning = world.tuning().ship;
        Ok(Self {
            id: EntityId::next(),
            body: Body {
                rotation: Vec2::new(0.0, -1.0),
                max_speed: tuning.max_speed,
                ..Body::at(world.playfield().center())
            },
            sheet: world.sprite("spaceship.png", 7, 1)?,
            tuning,
            alive: true,
            fuel_burning: false,
            in_hyperspace: false,
            burn_time: 0.0,
        })
    }

    /// The area that must be clear before a ship can appear at the centre.
    pub fn spawn_zone(&self, playfield: Playfield) -> Rect {
        self.sheet
            .rectangle(playfield.center())
            .extend(self.tuning.spawn_clearance)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn in_hyperspace(&self) -> bool {
        self.in_hyperspace
    }

    pub fn is_thrusting(&self) -> bool {
        self.fuel_burning
    }

    pub fn sheet(&self) -> Arc<SpriteSheet> {
        self.sheet.clone()
    }

    /// Turns counter-clockwise. A wrecked or jumping ship does not turn.
    pub fn rotate_left(&mut self, delta: f32) {
        self.turn(-self.tuning.rotate_speed * delta);
    }

    pub fn rotate_right(&mut self, delta: f32) {
        self.turn(self.tuning.rotate_speed * delta);
    }

    fn turn(&mut self, radians: f32) {
        if self.alive && !self.in_hyperspace {
            self.body.rotate(radians);
        }
    }

    /// Starts or stops the engine, announcing only actual changes.
    pub fn set_thrust(&mut self, on: bool, world: &dyn WorldContext) {
        let on = on && self.alive && !self.in_hyperspace;
        if on == self.fuel_burning {
            return;
        }
        self.fuel_burning = on;
        world.publish(GameEvent::SpaceshipThrust(on));
    }

    /// Spawns a bullet just ahead of the nose, carrying the ship's own velocity.
    pub fn fire(&mut self, world: &dyn WorldContext) -> Result<(), EntityError> {
        if !self.alive || self.in_hyperspace {
            return Ok(());
        }
        let heading = self.body.heading();
        let size = self.sheet.size();
        let muzzle = self.body.position + heading * size.x.max(size.y) / 2.0;
        let velocity = heading * world.tuning().bullet.speed + self.body.velocity;

        let bullet = Bullet::new(muzzle, velocity, true, world)?;
        world.spawn(Entity::Bullet(bullet));
        world.publish(GameEvent::SpaceshipFire);
        Ok(())
    }

    /// Freezes the ship and hands it to the hyperspace sequence.
    pub fn enter_hyperspace(&mut self, world: &dyn WorldContext) {
        if !self.alive || self.in_hyperspace {
            return;
        }
        self.fuel_burning = false;
        self.in_hyperspace = true;
        self.body.freeze();
        world.publish(GameEvent::SpaceshipEnterHyperspace);
    }

    /// Ends a jump at `position`; control returns on the next frame.
    pub fn exit_hyperspace(&mut self, position: Vec2) {
        self.body.position = position;
        self.body.freeze();
        self.in_hyperspace = false;
    }

    pub(crate) fn update(&mut self, delta: f32, world: &dyn WorldContext) {
        if self.fuel_burning {
            self.body.acceleration = self.body.heading() * self.tuning.fuel_boost;
            self.burn_time += delta;
        } else {
            // Coasting sheds `decay` of the velocity per second.
            self.body.acceleration = Vec2::ZERO;
            self.body.velocity *= (1.0 - self.tuning.decay * delta).max(0.0);
        }
        self.body.apply_physics(delta);
        self.body.position = world.playfield().wraparound(self.body.position);
    }

    pub(crate) fn draw(&self, canvas: &dyn Canvas) -> Result<(), AssetError> {
        if self.in_hyperspace {
            return Ok(());
        }
        self.sheet
            .draw_index(canvas, self.frame_index(), self.body.position, self.body.rotation)
    }

    /// Frame 0 when coasting, alternating flame frames 1 and 2 while thrusting.
    fn frame_index(&self) -> u32 {
        if !self.fuel_burning {
            return 0;
        }
        if self.burn_time.fract() < 0.5 { 1 } else { 2 }
    }

    /// No hitbox while in hyperspace.
    pub fn hitbox(&self) -> Option<Rect> {
        (!self.in_hyperspace).then(|| self.sheet.rectangle(self.body.position))
    }

    /// Blows the ship into pieces and takes a life. Ignored in hyperspace.
    pub(crate) fn on_destruction(
        &mut self,
        _impact: Vec2,
        world: &dyn WorldContext,
    ) -> Result<(), EntityError> {
        if !self.alive || self.in_hyperspace {
            return Ok(());
        }
        self.alive = false;
        self.fuel_burning = false;

        let (min_life, max_life) = self.tuning.wreck_lifespan_ms;
        for piece in 0..WRECK_PIECES {
            world.spawn(Entity::Debris(Debris::new(
                self.body.position,
                self.sheet.clone(),
                WRECK_FIRST_FRAME + piece,
                random::int_inclusive(min_life, max_life),
                &world.tuning().debris,
            )));
        }

        let lives = world.lose_life();
        tracing::info!(lives, "spaceship destroyed");
        world.publish(GameEvent::SpaceshipDestroyed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntityKind;
    use crate::domain::test_support::RecordingWorld;

    #[test]
    fn when_ship_is_created_then_it_sits_at_the_centre_facing_up() {
        let world = RecordingWorld::new();
        let ship = Spaceship::new(&world).expect("ship");

        assert_eq!(ship.body.position, world.playfield().center());
        assert_eq!(ship.body.heading(), Vec2::new(0.0, -1.0));
        assert!(ship.is_alive());
    }

    #[test]
    fn when_thrusting_then_ship_accelerates_along_heading_up_to_max_speed() {
        let world = RecordingWorld::new();
        let mut ship = Spaceship::new(&world).expect("ship");

        ship.set_thrust(true, &world);
        for _ in 0..100 {
            ship.update(1.0 / 60.0, &world);
        }

        assert!(ship.body.velocity.y < 0.0);
        assert!(ship.body.velocity.length() <= ship.tuning.max_speed + 1e-3);
        assert_eq!(world.events(), vec![GameEvent::SpaceshipThrust(true)]);
    }

    #[test]
    fn when_coasting_then_velocity_decays_each_second() {
        let world = RecordingWorld::new();
        let mut ship = Spaceship::new(&world).expect("ship");
        ship.body.velocity = Vec2::new(100.0, 0.0);

        ship.update(0.25, &world);

        // decay 2.0 per second sheds half the velocity over a quarter second
        assert!(ship.body.velocity.abs_diff_eq(Vec2::new(50.0, 0.0), 1e-3));
    }

    #[test]
    fn when_thrust_is_held_then_only_the_change_is_announced() {
        let world = RecordingWorld::new();
        let mut ship = Spaceship::new(&world).expect("ship");

        ship.set_thrust(true, &world);
        ship.set_thrust(true, &world);
        ship.set_thrust(false, &world);

        assert_eq!(
            world.events(),
            vec![GameEvent::SpaceshipThrust(true), GameEvent::SpaceshipThrust(false)]
        );
    }

    #[test]
    fn when_firing_then_bullet_leaves_the_nose_with_ship_velocity_added() {
        let world = RecordingWorld::new();
        let mut ship = Spaceship::new(&world).expect("ship");
        ship.body.velocity = Vec2::new(20.0, 0.0);

        ship.fire(&world).expect("fire");

        let bullets = world.spawned_bullets();
        assert_eq!(bullets.len(), 1);
        let (player_fired, velocity) = bullets[0];
        assert!(player_fired);
        assert!(velocity.abs_diff_eq(Vec2::new(20.0, -500.0), 1e-3));
        let muzzle = world.spawned_positions(EntityKind::Bullet)[0];
        assert!(muzzle.abs_diff_eq(world.playfield().center() + Vec2::new(0.0, -16.0), 1e-3));
        assert_eq!(world.events(), vec![GameEvent::SpaceshipFire]);
    }

    #[test]
    fn when_destroyed_then_four_pieces_spawn_and_one_life_is_lost() {
        let world = RecordingWorld::new();
        let mut ship = Spaceship::new(&world).expect("ship");

        ship.on_destruction(Vec2::X, &world).expect("destruction");
        ship.on_destruction(Vec2::X, &world).expect("destruction");

        assert!(!ship.is_alive());
        assert_eq!(world.spawned_count(), 4);
        assert_eq!(world.lives_lost(), 1);
        assert_eq!(world.events(), vec![GameEvent::SpaceshipDestroyed]);
    }

    #[test]
    fn when_in_hyperspace_then_ship_cannot_be_hit_or_destroyed() {
        let world = RecordingWorld::new();
        let mut ship = Spaceship::new(&world).expect("ship");

        ship.enter_hyperspace(&world);
        ship.on_destruction(Vec2::X, &world).expect("destruction");

        assert!(ship.is_alive());
        assert!(ship.hitbox().is_none());
        assert_eq!(world.lives_lost(), 0);
        assert_eq!(world.events(), vec![GameEvent::SpaceshipEnterHyperspace]);

        ship.exit_hyperspace(Vec2::new(10.0, 10.0));
        assert!(ship.hitbox().is_some());
        assert_eq!(ship.body.position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn when_in_hyperspace_then_ship_does_not_turn() {
        let world = RecordingWorld::new();
        let mut ship = Spaceship::new(&world).expect("ship");
        ship.enter_hyperspace(&world);
        let heading = ship.body.heading();

        ship.rotate_left(0.5);
        ship.rotate_right(0.25);

        assert_eq!(ship.body.heading(), heading);

        ship.exit_hyperspace(Vec2::new(10.0, 10.0));
        ship.rotate_right(0.25);
        assert_ne!(ship.body.heading(), heading);
    }
}
