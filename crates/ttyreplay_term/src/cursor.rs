//! Cursor position and the current graphic-rendition state.

use crate::grid::{GRID_COLUMNS, GRID_ROWS};
use crate::palette::PaletteColor;

/// The cursor's position within the grid. Kept separate from the graphics
/// state, mirroring how the buffer model separates position from
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Cursor { x: 0, y: 0 }
    }

    pub fn set_position(&mut self, x: usize, y: usize) {
        self.x = x.min(GRID_COLUMNS - 1);
        self.y = y.min(GRID_ROWS - 1);
    }
}

/// The current SGR-selected colors and the "bright" intensity bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsState {
    pub fg: PaletteColor,
    pub bg: PaletteColor,
    pub bright_mode: bool,
}

impl GraphicsState {
    pub fn new() -> Self {
        GraphicsState {
            fg: PaletteColor::WHITE,
            bg: PaletteColor::BLACK,
            bright_mode: false,
        }
    }

    pub fn reset(&mut self) {
        *self = GraphicsState::new();
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState::new()
    }
}

/// The scroll region, inclusive bounds in internal (0-based) row
/// coordinates. Default is rows 0..=23 (ANSI rows 1-24).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRegion {
    pub top: usize,
    pub bottom: usize,
}

impl ScrollRegion {
    /// Rows 1-24 in ANSI terms, i.e. internal rows 0..=23. Rows 24-28 (the
    /// five bottom rows) sit outside the default region and are the status
    /// lines in the recorded sessions.
    pub fn new() -> Self {
        ScrollRegion { top: 0, bottom: 23 }
    }
}

impl Default for ScrollRegion {
    fn default() -> Self {
        ScrollRegion::new()
    }
}
