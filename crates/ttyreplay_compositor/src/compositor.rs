//! Turns one grid dump into a (29*32) x (81*32) RGB bitmap by stamping a
//! 32x32 tile per cell: a sprite rectangle inside the in-game viewport, or
//! a freshly rasterized font glyph everywhere else.
//!
//! Grounded on `icy_engine::buffers_rendering`'s per-cell background-fill
//! then glyph-blend loop, adapted from "one glyph cell" to "one sprite-or-
//! glyph tile".

use image::{GenericImageView, Rgb, RgbImage};

use ttyreplay_term::{Grid, GRID_COLUMNS, GRID_ROWS};

use crate::error::{CompositorError, Result};
use crate::font::FontFaces;
use crate::sprite_sheets::SpriteSheets;
use crate::sprite_table;

/// Pixel size of one stamped tile.
pub const TILE: u32 = 32;

/// In-game viewport bounds: cells with `col < VIEWPORT_COLS && row <
/// VIEWPORT_ROWS` are sprite-rendered; everything else is font-rendered.
pub const VIEWPORT_COLS: usize = 38;
pub const VIEWPORT_ROWS: usize = 18;

pub const IMAGE_WIDTH: u32 = GRID_COLUMNS as u32 * TILE;
pub const IMAGE_HEIGHT: u32 = GRID_ROWS as u32 * TILE;

/// Composites an entire grid into one RGB bitmap.
pub fn compose(grid: &Grid, sheets: &SpriteSheets, fonts: &FontFaces) -> Result<RgbImage> {
    let mut image = RgbImage::new(IMAGE_WIDTH, IMAGE_HEIGHT);

    for (row, col, cell) in grid.iter_cells() {
        let tile = if col < VIEWPORT_COLS && row < VIEWPORT_ROWS {
            sprite_tile(cell.fg.id(), cell.bg.id(), cell.glyph, sheets)?
        } else {
            font_tile(cell.fg, cell.bg, cell.glyph, fonts)
        };
        stamp(&mut image, row, col, &tile);
    }

    Ok(image)
}

/// One rendered 32x32 tile, row-major RGB triples.
type Tile = [[u8; 3]; (TILE * TILE) as usize];

fn stamp(image: &mut RgbImage, row: usize, col: usize, tile: &Tile) {
    let origin_x = col as u32 * TILE;
    let origin_y = row as u32 * TILE;
    for y in 0..TILE {
        for x in 0..TILE {
            let [r, g, b] = tile[(y * TILE + x) as usize];
            image.put_pixel(origin_x + x, origin_y + y, Rgb([r, g, b]));
        }
    }
}

/// Cuts the looked-up sprite rectangle from its sheet, centers it in a
/// black 32x32 tile, and drops alpha.
fn sprite_tile(fg_id: u32, bg_id: u32, glyph: char, sheets: &SpriteSheets) -> Result<Tile> {
    let rect = sprite_table::lookup(fg_id, bg_id, glyph);
    let sheet_img = sheets.sheet(rect.sheet);

    if rect.x + rect.w > sheet_img.width() || rect.y + rect.h > sheet_img.height() {
        return Err(CompositorError::InvalidSpriteRect {
            sheet: SpriteSheets::sheet_name(rect.sheet),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        });
    }

    let mut tile = [[0u8; 3]; (TILE * TILE) as usize];
    let off_x = (TILE - rect.w) / 2;
    let off_y = (TILE - rect.h) / 2;

    let cropped = sheet_img.view(rect.x, rect.y, rect.w, rect.h);
    for (x, y, pixel) in cropped.pixels() {
        let dst_x = off_x + x;
        let dst_y = off_y + y;
        if dst_x < TILE && dst_y < TILE {
            let idx = (dst_y * TILE + dst_x) as usize;
            tile[idx] = [pixel[0], pixel[1], pixel[2]];
        }
    }

    Ok(tile)
}

/// Fills the tile with `bg`, then blends the rasterized glyph (bold iff
/// `fg` is a bright palette entry) on top at pixel offset `(0, -1)`.
fn font_tile(fg: ttyreplay_term::PaletteColor, bg: ttyreplay_term::PaletteColor, glyph: char, fonts: &FontFaces) -> Tile {
    let (br, bgr, bb) = bg.rgb().get_rgb();
    let mut tile = [[br, bgr, bb]; (TILE * TILE) as usize];

    if glyph == ' ' {
        return tile;
    }

    let (metrics, bitmap) = fonts.rasterize(glyph, fg.bright);
    let (fr, fgr, fb) = fg.rgb().get_rgb();

    // Fixed baseline leaving descender room in the 32px tile at 28px font
    // size, then a `(0, -1)` nudge to match the reference renderer's glyph
    // placement.
    const BASELINE_Y: i32 = 26;
    let top = BASELINE_Y - metrics.ymin - metrics.height as i32;
    let off_x = metrics.xmin;
    let off_y = top - 1;

    for gy in 0..metrics.height {
        let dst_y = off_y + gy as i32;
        if dst_y < 0 || dst_y >= TILE as i32 {
            continue;
        }
        for gx in 0..metrics.width {
            let dst_x = off_x + gx as i32;
            if dst_x < 0 || dst_x >= TILE as i32 {
                continue;
            }
            let coverage = bitmap[gy * metrics.width + gx];
            if coverage == 0 {
                continue;
            }
            let idx = (dst_y as u32 * TILE + dst_x as u32) as usize;
            let alpha = coverage as f32 / 255.0;
            let inv = 1.0 - alpha;
            tile[idx] = [
                (fr as f32 * alpha + tile[idx][0] as f32 * inv) as u8,
                (fgr as f32 * alpha + tile[idx][1] as f32 * inv) as u8,
                (fb as f32 * alpha + tile[idx][2] as f32 * inv) as u8,
            ];
        }
    }

    tile
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use pretty_assertions::assert_eq;

    #[test]
    fn composed_image_has_spec_dimensions() {
        assert_eq!(IMAGE_WIDTH, 2592);
        assert_eq!(IMAGE_HEIGHT, 928);
    }

    #[test]
    fn stamp_places_tile_at_row_col_origin() {
        let mut image = RgbImage::new(IMAGE_WIDTH, IMAGE_HEIGHT);
        let mut tile: Tile = [[0, 0, 0]; (TILE * TILE) as usize];
        tile[0] = [9, 9, 9];
        stamp(&mut image, 2, 3, &tile);
        assert_eq!(*image.get_pixel(3 * TILE, 2 * TILE), Rgb([9, 9, 9]));
        assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn sprite_tile_centers_a_rect_smaller_than_the_tile() {
        let sheets = crate::sprite_sheets::SpriteSheets::from_images_for_test(RgbaImage::from_pixel(64, 64, image::Rgba([10, 20, 30, 255])));
        // `lookup(8, 1, ' ')` resolves to a 32x32 floor rect, already
        // tile-sized, so it fills every pixel with the sheet color.
        let tile = sprite_tile(8, 1, ' ', &sheets).unwrap();
        assert!(tile.iter().all(|&px| px == [10, 20, 30]));
    }

    #[test]
    fn sprite_tile_out_of_bounds_rect_is_an_error() {
        let sheets = crate::sprite_sheets::SpriteSheets::from_images_for_test(RgbaImage::new(4, 4));
        let err = sprite_tile(8, 1, ' ', &sheets).unwrap_err();
        assert!(matches!(err, CompositorError::InvalidSpriteRect { .. }));
    }
}
