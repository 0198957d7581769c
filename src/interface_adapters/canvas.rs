// Canvas that counts draw calls per sheet instead of rasterising.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use glam::Vec2;
use tracing::trace;

use crate::domain::errors::AssetError;
use crate::domain::geometry::Rect;
use crate::domain::ports::Canvas;
use crate::domain::sprite::SpriteSheet;

#[derive(Debug, Default)]
pub struct TracingCanvas {
    draws: Mutex<HashMap<String, u64>>,
}

impl TracingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_draws(&self) -> u64 {
        self.draws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    pub fn draws_of(&self, sheet: &str) -> u64 {
        self.draws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(sheet)
            .copied()
            .unwrap_or(0)
    }
}

impl Canvas for TracingCanvas {
    fn draw_sprite(
        &self,
        sheet: &SpriteSheet,
        source: Rect,
        position: Vec2,
        heading: Vec2,
    ) -> Result<(), AssetError> {
        trace!(
            sheet = %sheet.name,
            source_x = source.x,
            source_y = source.y,
            x = position.x,
            y = position.y,
            angle = heading.to_angle(),
            "draw"
        );
        *self
            .draws
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(sheet.name.clone())
            .or_insert(0) += 1;
        Ok(())
    }
}
