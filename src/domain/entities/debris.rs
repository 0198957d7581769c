// Cosmetic fragments left behind by explosions and hyperspace jumps.

use std::sync::Arc;

use glam::Vec2;

use crate::domain::entities::EntityId;
use crate::domain::errors::AssetError;
use crate::domain::physics::Body;
use crate::domain::ports::{Canvas, WorldContext};
use crate::domain::random;
use crate::domain::sprite::SpriteSheet;
use crate::domain::tuning::DebrisTuning;

#[derive(Debug)]
pub struct Debris {
    pub id: EntityId,
    pub body: Body,
    sheet: Arc<SpriteSheet>,
    frame: u32,
    /// Radians per second.
    spin: f32,
    lifespan_ms: f32,
    age_ms: f32,
}

impl Debris {
    /// A piece flying off in a random direction with a random spin.
    pub fn new(
        position: Vec2,
        sheet: Arc<SpriteSheet>,
        frame: u32,
        lifespan_ms: u32,
        tuning: &DebrisTuning,
    ) -> Self {
        let speed = tuning.max_speed;
        let heading = Vec2::new(random::range(-1.0, 1.0), random::range(-1.0, 1.0));
        let body = Body {
            position,
            rotation: heading.try_normalize().unwrap_or(Vec2::X),
            velocity: Vec2::new(random::range(-speed, speed), random::range(-speed, speed)),
            acceleration: Vec2::ZERO,
            max_speed: speed,
        };

        Self {
            id: EntityId::next(),
            body,
            sheet,
            frame,
            spin: random::up_to(tuning.max_rotate) * random::sign(),
            lifespan_ms: lifespan_ms as f32,
            age_ms: 0.0,
        }
    }

    /// Redirects the piece so it reaches `target` after `seconds`, living at least that long.
    pub fn steer_to(&mut self, target: Vec2, seconds: f32) {
        let seconds = seconds.max(f32::EPSILON);
        self.body.max_speed = 0.0;
        self.body.acceleration = Vec2::ZERO;
        self.body.velocity = (target - self.body.position) / seconds;
        self.lifespan_ms = self.lifespan_ms.max(self.age_ms + seconds * 1000.0);
    }

    pub(crate) fn update(&mut self, delta: f32, world: &dyn WorldContext) {
        self.body.rotate(self.spin * delta);
        self.body.apply_physics(delta);
        self.body.position = world.playfield().wraparound(self.body.position);
        self.age_ms += delta * 1000.0;
    }

    pub(crate) fn draw(&self, canvas: &dyn Canvas) -> Result<(), AssetError> {
        self.sheet
            .draw_index(canvas, self.frame, self.body.position, self.body.rotation)
    }

    pub fn is_alive(&self) -> bool {
        self.age_ms < self.lifespan_ms
    }
}
