// Rigid-body state shared by every moving entity.

use glam::Vec2;

/// Position, heading and motion of an entity.
///
/// `rotation` is a heading vector rather than an angle. `acceleration` is a
/// full per-step velocity change chosen by the owner and is not scaled by
/// the frame delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub rotation: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Maximum velocity magnitude; zero or negative disables the clamp.
    pub max_speed: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: Vec2::X,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: 0.0,
        }
    }
}

impl Body {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Integrates one step: add acceleration, clamp speed, then move by `velocity * delta`.
    pub fn apply_physics(&mut self, delta: f32) {
        self.velocity += self.acceleration;
        if self.max_speed > 0.0 {
            self.velocity = self.velocity.clamp_length_max(self.max_speed);
        }
        self.position += self.velocity * delta;
    }

    /// Turns the heading by `radians` (positive is clockwise in screen space).
    pub fn rotate(&mut self, radians: f32) {
        self.rotation = Vec2::from_angle(radians).rotate(self.rotation);
    }

    pub fn heading(&self) -> Vec2 {
        self.rotation.normalize_or_zero()
    }

    /// Stops all motion in place.
    pub fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(velocity: Vec2, acceleration: Vec2, max_speed: f32) -> Body {
        Body {
            velocity,
            acceleration,
            max_speed,
            ..Body::default()
        }
    }

    #[test]
    fn when_applying_physics_then_velocity_is_clamped_before_moving() {
        let cases = [
            // (velocity, acceleration, max, delta, want position, want velocity)
            (Vec2::new(1.0, 2.0), Vec2::ZERO, 0.0, 1.0, Vec2::new(1.0, 2.0), Vec2::new(1.0, 2.0)),
            (Vec2::new(1.0, 0.0), Vec2::ZERO, 0.0, 0.3, Vec2::new(0.3, 0.0), Vec2::new(1.0, 0.0)),
            (Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0), 0.0, 1.0, Vec2::new(3.0, 0.0), Vec2::new(3.0, 0.0)),
            (Vec2::new(2.0, 0.0), Vec2::new(5.0, 0.0), 3.0, 1.0, Vec2::new(3.0, 0.0), Vec2::new(3.0, 0.0)),
            (Vec2::new(3.0, 0.0), Vec2::new(5.0, 0.0), 1.0, 0.5, Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.0)),
        ];

        for (velocity, acceleration, max_speed, delta, want_pos, want_vel) in cases {
            let mut b = body(velocity, acceleration, max_speed);
            b.apply_physics(delta);
            assert!(b.position.abs_diff_eq(want_pos, 1e-5), "position {} != {}", b.position, want_pos);
            assert!(b.velocity.abs_diff_eq(want_vel, 1e-5), "velocity {} != {}", b.velocity, want_vel);
        }
    }

    #[test]
    fn when_rotating_a_quarter_turn_then_heading_is_perpendicular() {
        let mut b = Body::default();
        b.rotate(std::f32::consts::FRAC_PI_2);
        assert!(b.heading().abs_diff_eq(Vec2::Y, 1e-5));
    }

    proptest! {
        #[test]
        fn without_acceleration_position_moves_by_velocity_times_delta(
            vx in 0.0f32..500.0,
            vy in 0.0f32..500.0,
            delta in 0.0f32..0.1,
        ) {
            let velocity = Vec2::new(vx, vy);
            let mut b = body(velocity, Vec2::ZERO, 0.0);
            b.apply_physics(delta);
            prop_assert_eq!(b.velocity, velocity);
            prop_assert!(b.position.abs_diff_eq(velocity * delta, 1e-3));
        }

        #[test]
        fn speed_never_exceeds_a_positive_max(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            ax in -500.0f32..500.0,
            ay in -500.0f32..500.0,
            max_speed in 1.0f32..400.0,
            delta in 0.0f32..0.1,
        ) {
            let mut b = body(Vec2::new(vx, vy), Vec2::new(ax, ay), max_speed);
            b.apply_physics(delta);
            prop_assert!(b.velocity.length() <= max_speed * (1.0 + 1e-5));
        }
    }
}
