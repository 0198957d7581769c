// Thin helpers over the thread-local RNG.
//
// Bounds violations are programming errors and panic. Each call draws a fresh
// thread RNG handle so nothing non-Send is ever held across an await.

use glam::Vec2;
use rand::Rng;

/// Returns true with the given probability. Panics outside `0.0..=1.0`.
pub fn chance(probability: f32) -> bool {
    assert!(
        (0.0..=1.0).contains(&probability),
        "chance must be between 0 and 1, got {probability}"
    );
    rand::thread_rng().gen_bool(f64::from(probability))
}

/// Uniform float in `min..max`. Panics if `min >= max`.
pub fn range(min: f32, max: f32) -> f32 {
    assert!(min < max, "min ({min}) must be less than max ({max})");
    rand::thread_rng().gen_range(min..max)
}

/// Uniform float in `0..max`. Panics if `max <= 0`.
pub fn up_to(max: f32) -> f32 {
    range(0.0, max)
}

/// Uniform integer in `min..max`. Panics if `min >= max`.
pub fn int_range(min: u32, max: u32) -> u32 {
    assert!(min < max, "min ({min}) must be less than max ({max})");
    rand::thread_rng().gen_range(min..max)
}

/// Uniform integer in `min..=max`. Panics if `min > max`.
pub fn int_inclusive(min: u32, max: u32) -> u32 {
    assert!(min <= max, "min ({min}) must not exceed max ({max})");
    rand::thread_rng().gen_range(min..=max)
}

pub fn choice<T: Copy>(options: &[T]) -> T {
    assert!(!options.is_empty(), "cannot choose from an empty slice");
    options[rand::thread_rng().gen_range(0..options.len())]
}

/// Either 1.0 or -1.0.
pub fn sign() -> f32 {
    if chance(0.5) { 1.0 } else { -1.0 }
}

/// Unit vector pointing in a uniformly random direction.
pub fn direction() -> Vec2 {
    Vec2::from_angle(range(0.0, std::f32::consts::TAU))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "chance must be between 0 and 1")]
    fn when_chance_is_above_one_then_it_panics() {
        chance(1.5);
    }

    #[test]
    #[should_panic(expected = "must be less than max")]
    fn when_range_is_empty_then_it_panics() {
        range(3.0, 3.0);
    }

    #[test]
    fn when_range_is_valid_then_values_stay_inside() {
        for _ in 0..100 {
            let v = range(-2.0, 5.0);
            assert!((-2.0..5.0).contains(&v));
            let n = int_inclusive(2, 4);
            assert!((2..=4).contains(&n));
        }
    }

    #[test]
    fn when_direction_is_drawn_then_it_is_unit_length() {
        let d = direction();
        assert!((d.length() - 1.0).abs() < 1e-4);
    }
}
