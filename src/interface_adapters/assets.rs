// Asset source backed by a fixed texture catalog instead of image files.

use std::collections::HashMap;

use crate::domain::errors::AssetError;
use crate::domain::ports::AssetSource;

/// Texture names and their pixel sizes (width, height).
const CATALOG: [(&str, (u32, u32)); 9] = [
    ("spaceship.png", (32, 224)),
    ("rock_big.png", (96, 96)),
    ("rock_medium.png", (64, 64)),
    ("rock_small.png", (40, 40)),
    ("rock_tiny.png", (24, 24)),
    ("bullet.png", (4, 4)),
    ("shrapnel.png", (8, 40)),
    ("alien_small.png", (72, 72)),
    ("alien_big.png", (96, 96)),
];

#[derive(Debug, Clone)]
pub struct HeadlessAssets {
    textures: HashMap<String, (u32, u32)>,
}

impl HeadlessAssets {
    pub fn new() -> Self {
        Self {
            textures: CATALOG
                .iter()
                .map(|(name, size)| (name.to_string(), *size))
                .collect(),
        }
    }

    /// Adds or resizes a texture.
    pub fn with_texture(mut self, name: &str, width: u32, height: u32) -> Self {
        self.textures.insert(name.to_string(), (width, height));
        self
    }
}

impl Default for HeadlessAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for HeadlessAssets {
    fn texture_size(&self, name: &str) -> Result<(u32, u32), AssetError> {
        self.textures
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::NotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_texture_is_catalogued_then_its_size_is_returned() {
        let assets = HeadlessAssets::new();
        assert_eq!(assets.texture_size("spaceship.png"), Ok((32, 224)));
    }

    #[test]
    fn when_texture_is_added_then_it_overrides_the_catalog() {
        let assets = HeadlessAssets::new()
            .with_texture("spaceship.png", 64, 448)
            .with_texture("title.png", 320, 80);

        assert_eq!(assets.texture_size("spaceship.png"), Ok((64, 448)));
        assert_eq!(assets.texture_size("title.png"), Ok((320, 80)));
        assert!(assets.texture_size("missing.png").is_err());
    }
}
