// Playfield geometry: hitbox rectangles and the wrap-around field.

use crate::domain::random;
use glam::Vec2;

/// Axis-aligned rectangle in world space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            width: size.x,
            height: size.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Grows the rectangle by `factor` of its size, keeping the centre fixed.
    pub fn extend(&self, factor: f32) -> Rect {
        let size = Vec2::new(self.width, self.height) * (1.0 + factor);
        Rect::centered(self.center(), size)
    }
}

/// The visible playfield. Positions outside it either wrap or leave the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Moves a position that crossed an edge onto the opposite edge.
    pub fn wraparound(&self, mut p: Vec2) -> Vec2 {
        if p.x < 0.0 {
            p.x = self.width;
        } else if p.x > self.width {
            p.x = 0.0;
        }
        if p.y < 0.0 {
            p.y = self.height;
        } else if p.y > self.height {
            p.y = 0.0;
        }
        p
    }

    pub fn is_outside(&self, p: Vec2) -> bool {
        p.x < 0.0 || p.x > self.width || p.y < 0.0 || p.y > self.height
    }

    pub fn random_position(&self) -> Vec2 {
        Vec2::new(random::up_to(self.width), random::up_to(self.height))
    }

    /// A random point on one of the four edges, horizontal and vertical edges equally likely.
    pub fn random_border_position(&self) -> Vec2 {
        if random::chance(0.5) {
            Vec2::new(
                random::up_to(self.width),
                random::choice(&[0.0, self.height]),
            )
        } else {
            Vec2::new(
                random::choice(&[0.0, self.width]),
                random::up_to(self.height),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_position_crosses_an_edge_then_it_wraps_to_the_opposite_edge() {
        let field = Playfield::new(800.0, 600.0);
        let cases = [
            (Vec2::new(-10.0, 300.0), Vec2::new(800.0, 300.0)),
            (Vec2::new(810.0, 300.0), Vec2::new(0.0, 300.0)),
            (Vec2::new(400.0, -10.0), Vec2::new(400.0, 600.0)),
            (Vec2::new(400.0, 610.0), Vec2::new(400.0, 0.0)),
            (Vec2::new(400.0, 300.0), Vec2::new(400.0, 300.0)),
        ];

        for (input, expected) in cases {
            assert_eq!(field.wraparound(input), expected, "wrapping {input}");
        }
    }

    #[test]
    fn when_position_is_beyond_any_edge_then_it_is_outside() {
        let field = Playfield::new(800.0, 600.0);

        assert!(field.is_outside(Vec2::new(-10.0, 300.0)));
        assert!(field.is_outside(Vec2::new(810.0, 300.0)));
        assert!(field.is_outside(Vec2::new(400.0, -10.0)));
        assert!(field.is_outside(Vec2::new(400.0, 610.0)));
        assert!(!field.is_outside(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn when_border_position_is_drawn_then_it_lies_on_an_edge() {
        let field = Playfield::new(800.0, 600.0);

        for _ in 0..200 {
            let p = field.random_border_position();
            let on_vertical_edge = p.x == 0.0 || p.x == field.width;
            let on_horizontal_edge = p.y == 0.0 || p.y == field.height;
            assert!(on_vertical_edge || on_horizontal_edge, "{p} is not on an edge");
            assert!(!field.is_outside(p));
        }
    }

    #[test]
    fn when_rectangles_share_only_an_edge_then_they_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn when_rectangle_is_extended_then_centre_is_kept() {
        let rect = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        let wider = rect.extend(0.5);

        assert_eq!(wider.center(), rect.center());
        assert_eq!(wider.width, 30.0);
        assert_eq!(wider.height, 15.0);
        assert!(wider.contains(Vec2::new(36.0, 50.0)));
        assert!(!rect.contains(Vec2::new(36.0, 50.0)));
    }
}
