// Sprite sheet grid math. Pixels live behind the `Canvas` port.

use crate::domain::errors::AssetError;
use crate::domain::geometry::Rect;
use crate::domain::ports::Canvas;
use glam::Vec2;

/// A texture split into an evenly sized `rows` x `cols` grid of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub name: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub rows: u32,
    pub cols: u32,
}

impl SpriteSheet {
    /// Slices a `width` x `height` texture into frames, failing when the grid does not divide it.
    pub fn new(
        name: impl Into<String>,
        (width, height): (u32, u32),
        rows: u32,
        cols: u32,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        if rows == 0 || cols == 0 || width % cols != 0 || height % rows != 0 {
            return Err(AssetError::GridMismatch {
                name,
                width,
                height,
                rows,
                cols,
            });
        }

        Ok(Self {
            frame_width: width / cols,
            frame_height: height / rows,
            name,
            rows,
            cols,
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Row and column of frame `index`, counting row by row.
    pub fn frame_location(&self, index: u32) -> Result<(u32, u32), AssetError> {
        if index >= self.frame_count() {
            return Err(AssetError::FrameOutOfBounds {
                name: self.name.clone(),
                index,
            });
        }
        Ok((index / self.cols, index % self.cols))
    }

    /// Source rectangle of a single frame inside the texture.
    pub fn frame(&self, row: u32, col: u32) -> Result<Rect, AssetError> {
        if row >= self.rows || col >= self.cols {
            return Err(AssetError::CellOutOfBounds {
                name: self.name.clone(),
                row,
                col,
            });
        }
        Ok(Rect::new(
            (col * self.frame_width) as f32,
            (row * self.frame_height) as f32,
            self.frame_width as f32,
            self.frame_height as f32,
        ))
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.frame_width as f32, self.frame_height as f32)
    }

    /// Where one frame lands when drawn centred on `center`; doubles as the hitbox.
    pub fn rectangle(&self, center: Vec2) -> Rect {
        Rect::centered(center, self.size())
    }

    pub fn draw(
        &self,
        canvas: &dyn Canvas,
        row: u32,
        col: u32,
        position: Vec2,
        heading: Vec2,
    ) -> Result<(), AssetError> {
        let source = self.frame(row, col)?;
        canvas.draw_sprite(self, source, position, heading)
    }

    pub fn draw_index(
        &self,
        canvas: &dyn Canvas,
        index: u32,
        position: Vec2,
        heading: Vec2,
    ) -> Result<(), AssetError> {
        let (row, col) = self.frame_location(index)?;
        self.draw(canvas, row, col, position, heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_grid_does_not_divide_texture_then_construction_fails() {
        let err = SpriteSheet::new("odd.png", (10, 10), 3, 1).expect_err("3 rows cannot split 10px");
        assert!(matches!(err, AssetError::GridMismatch { rows: 3, .. }));
    }

    #[test]
    fn when_frames_are_counted_row_by_row_then_location_wraps_columns() {
        let sheet = SpriteSheet::new("alien.png", (72, 72), 3, 3).expect("grid divides");

        assert_eq!(sheet.frame_count(), 9);
        assert_eq!(sheet.frame_location(4), Ok((1, 1)));
        assert_eq!(sheet.frame_location(7), Ok((2, 1)));
        assert!(sheet.frame_location(9).is_err());
    }

    #[test]
    fn when_cell_is_inside_grid_then_frame_is_the_matching_slice() {
        let sheet = SpriteSheet::new("ship.png", (32, 224), 7, 1).expect("grid divides");

        assert_eq!(sheet.frame(3, 0), Ok(Rect::new(0.0, 96.0, 32.0, 32.0)));
        assert!(matches!(
            sheet.frame(0, 1),
            Err(AssetError::CellOutOfBounds { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn when_rectangle_is_requested_then_it_is_centred_on_the_point() {
        let sheet = SpriteSheet::new("rock.png", (40, 40), 1, 1).expect("grid divides");
        let rect = sheet.rectangle(Vec2::new(100.0, 100.0));
        assert_eq!(rect, Rect::new(80.0, 80.0, 40.0, 40.0));
    }
}
