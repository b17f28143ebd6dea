//! Loads the five sprite sheets the viewport tile path cuts rectangles
//! from.

use std::path::Path;

use image::RgbaImage;

use crate::error::{CompositorError, Result};
use crate::sprite_table::Sheet;

/// The five sprite sheets, decoded once and kept in memory for the
/// lifetime of a render run.
pub struct SpriteSheets {
    player: RgbaImage,
    wall: RgbaImage,
    floor: RgbaImage,
    feat: RgbaImage,
    main: RgbaImage,
    icons: RgbaImage,
}

impl SpriteSheets {
    /// Loads all five sheets from `dir`. Each file must be readable as a
    /// PNG; a missing file is a fatal resource error.
    pub fn load(dir: &Path) -> Result<Self> {
        let load_one = |name: &str| -> Result<RgbaImage> {
            let path = dir.join(name);
            if !path.exists() {
                return Err(CompositorError::MissingAsset { path });
            }
            let img = image::open(&path).map_err(|_| CompositorError::MissingAsset { path: path.clone() })?;
            Ok(img.to_rgba8())
        };

        Ok(SpriteSheets {
            player: load_one("player.png")?,
            wall: load_one("wall.png")?,
            floor: load_one("floor.png")?,
            feat: load_one("feat.png")?,
            main: load_one("main.png")?,
            icons: load_one("icons.png")?,
        })
    }

    pub fn sheet(&self, which: Sheet) -> &RgbaImage {
        match which {
            Sheet::Player => &self.player,
            Sheet::Wall => &self.wall,
            Sheet::Floor => &self.floor,
            Sheet::Feat => &self.feat,
            Sheet::Main => &self.main,
            Sheet::Icons => &self.icons,
        }
    }

    /// The sheet's on-disk filename, for error messages.
    pub fn sheet_name(which: Sheet) -> &'static str {
        match which {
            Sheet::Player => "player.png",
            Sheet::Wall => "wall.png",
            Sheet::Floor => "floor.png",
            Sheet::Feat => "feat.png",
            Sheet::Main => "main.png",
            Sheet::Icons => "icons.png",
        }
    }

    /// Builds a `SpriteSheets` with every sheet set to the same in-memory
    /// image, for exercising the tile-stamping math without real assets on
    /// disk.
    #[cfg(test)]
    pub fn from_images_for_test(image: RgbaImage) -> Self {
        SpriteSheets {
            player: image.clone(),
            wall: image.clone(),
            floor: image.clone(),
            feat: image.clone(),
            main: image.clone(),
            icons: image,
        }
    }
}
