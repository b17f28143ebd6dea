//! Monospaced font rasterization for the status/message region of a tile.
//!
//! Grounded on `icy_draw`'s `ttf_import.rs` (fontdue font loading) and
//! `icy_engine_gui`'s `render_unicode.rs` (per-glyph coverage blending into
//! an RGB buffer). Unlike those call sites, a tile here is rendered once per
//! cell rather than once per buffer, so there is no glyph cache across
//! calls — each tile is independent compositor work.

use fontdue::{Font, FontSettings};

use crate::error::{CompositorError, Result};

/// The regular and bold faces of the bundled monospaced font, loaded once
/// per compositor run.
pub struct FontFaces {
    regular: Font,
    bold: Font,
}

/// Pixel size the source renders status-region glyphs at.
const FONT_SIZE: f32 = 28.0;

impl FontFaces {
    /// Loads both faces from the two font-collection indices of `Menlo.ttc`
    /// (0 = regular, 1 = bold), per the external-interface contract.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let collection_settings = |index: u32| FontSettings {
            collection_index: index,
            ..FontSettings::default()
        };
        let regular = Font::from_bytes(bytes, collection_settings(0))
            .map_err(|e| CompositorError::FontRasterFailure(format!("regular face: {e}")))?;
        let bold = Font::from_bytes(bytes, collection_settings(1))
            .map_err(|e| CompositorError::FontRasterFailure(format!("bold face: {e}")))?;
        Ok(FontFaces { regular, bold })
    }

    fn face(&self, bold: bool) -> &Font {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    /// Rasterizes `glyph` at the fixed tile font size, returning its
    /// coverage bitmap and metrics (width, height, and the offsets needed
    /// to place it within a 32x32 tile at pixel offset `(0, -1)`).
    pub fn rasterize(&self, glyph: char, bold: bool) -> (fontdue::Metrics, Vec<u8>) {
        self.face(bold).rasterize(glyph, FONT_SIZE)
    }
}
