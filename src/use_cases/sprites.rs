// Sprite sheets cached by file name.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::domain::errors::AssetError;
use crate::domain::ports::AssetSource;
use crate::domain::sprite::SpriteSheet;

pub struct SpriteCache {
    assets: Arc<dyn AssetSource>,
    sheets: RwLock<HashMap<String, Arc<SpriteSheet>>>,
}

impl SpriteCache {
    pub fn new(assets: Arc<dyn AssetSource>) -> Self {
        Self {
            assets,
            sheets: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached sheet for `name`, slicing it into `rows` x `cols` on first use.
    pub fn get(&self, name: &str, rows: u32, cols: u32) -> Result<Arc<SpriteSheet>, AssetError> {
        if let Some(sheet) = self
            .sheets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(sheet.clone());
        }

        let size = self.assets.texture_size(name)?;
        let sheet = Arc::new(SpriteSheet::new(name, size, rows, cols)?);
        debug!(name, rows, cols, frame_width = sheet.frame_width, frame_height = sheet.frame_height, "sprite sheet loaded");

        let mut sheets = self.sheets.write().unwrap_or_else(PoisonError::into_inner);
        // Another task may have loaded it meanwhile; keep the first.
        Ok(sheets.entry(name.to_string()).or_insert(sheet).clone())
    }
}
