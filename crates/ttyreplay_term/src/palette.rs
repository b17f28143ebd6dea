//! The fixed 16-color ANSI palette shared by the screen model and the compositor.

use std::fmt::Display;

use crate::error::TermError;

/// An RGB triple. Kept as a thin wrapper (rather than a bare tuple) so call
/// sites read `color.get_rgb()` the same way across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn get_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(value: Color) -> (u8, u8, u8) {
        (value.r, value.g, value.b)
    }
}

/// One of the eight basic ANSI hues, before the dim/bright split is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

const HUES: [Hue; 8] = [
    Hue::Black,
    Hue::Red,
    Hue::Green,
    Hue::Yellow,
    Hue::Blue,
    Hue::Magenta,
    Hue::Cyan,
    Hue::White,
];

impl Hue {
    fn from_basic_index(index: u8) -> Option<Hue> {
        HUES.get(index as usize).copied()
    }
}

/// One of the sixteen palette entries: a hue plus a brightness bit.
///
/// The numeric id (1..=16) is the same ordering used by grid dump CSV
/// records: dim colors 1-8, bright colors 9-16, both in `Hue` enum order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor {
    pub hue: Hue,
    pub bright: bool,
}

impl PaletteColor {
    pub const fn new(hue: Hue, bright: bool) -> Self {
        PaletteColor { hue, bright }
    }

    pub const WHITE: PaletteColor = PaletteColor::new(Hue::White, false);
    pub const BLACK: PaletteColor = PaletteColor::new(Hue::Black, false);

    /// 1-based index into the fixed 16-entry palette: dim 1-8, bright 9-16.
    pub fn id(self) -> u32 {
        let base = self.hue as u32; // 0..=7
        if self.bright { base + 9 } else { base + 1 }
    }

    pub fn from_id(id: u32) -> Result<PaletteColor, TermError> {
        if !(1..=16).contains(&id) {
            return Err(TermError::InvalidColorId { id });
        }
        let (bright, base) = if id >= 9 { (true, id - 9) } else { (false, id - 1) };
        let hue = Hue::from_basic_index(base as u8).expect("base is always 0..=7");
        Ok(PaletteColor::new(hue, bright))
    }

    /// Basic SGR color selection (30-37/40-47), biased bright by the caret's
    /// `bright_mode` flag.
    pub fn from_basic_index(index: u8, bright_mode: bool) -> Option<PaletteColor> {
        Hue::from_basic_index(index).map(|hue| PaletteColor::new(hue, bright_mode))
    }

    /// Direct bright selection (90-97/100-107) — always bright regardless of
    /// `bright_mode`.
    pub fn from_bright_index(index: u8) -> Option<PaletteColor> {
        Hue::from_basic_index(index).map(|hue| PaletteColor::new(hue, true))
    }

    pub fn rgb(self) -> Color {
        PALETTE[(self.id() - 1) as usize]
    }
}

impl Default for PaletteColor {
    fn default() -> Self {
        PaletteColor::WHITE
    }
}

/// The sixteen colors in fixed id order (1..=16): dim black..white, then
/// bright black..white. Values are the exact RGB triples named by the
/// external interface.
pub const PALETTE: [Color; 16] = [
    Color::new(0, 0, 0),       // 1 dim black
    Color::new(205, 0, 0),     // 2 dim red
    Color::new(0, 205, 0),     // 3 dim green
    Color::new(205, 205, 0),   // 4 dim yellow
    Color::new(0, 0, 238),     // 5 dim blue
    Color::new(205, 0, 205),   // 6 dim magenta
    Color::new(0, 205, 205),   // 7 dim cyan
    Color::new(229, 229, 229), // 8 dim white
    Color::new(127, 127, 127), // 9 bright black
    Color::new(255, 0, 0),     // 10 bright red
    Color::new(0, 255, 0),     // 11 bright green
    Color::new(255, 255, 0),   // 12 bright yellow
    Color::new(0, 0, 255),     // 13 bright blue
    Color::new(255, 0, 255),   // 14 bright magenta
    Color::new(0, 255, 255),   // 15 bright cyan
    Color::new(255, 255, 255), // 16 bright white
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trips() {
        for id in 1..=16u32 {
            let color = PaletteColor::from_id(id).unwrap();
            assert_eq!(color.id(), id);
        }
    }

    #[test]
    fn invalid_id_is_an_error() {
        assert!(PaletteColor::from_id(0).is_err());
        assert!(PaletteColor::from_id(17).is_err());
    }

    #[test]
    fn dim_and_bright_white_match_spec_rgb() {
        assert_eq!(PaletteColor::new(Hue::White, false).rgb().get_rgb(), (229, 229, 229));
        assert_eq!(PaletteColor::new(Hue::White, true).rgb().get_rgb(), (255, 255, 255));
    }

    #[test]
    fn basic_index_honors_bright_mode() {
        let dim = PaletteColor::from_basic_index(1, false).unwrap();
        let bright = PaletteColor::from_basic_index(1, true).unwrap();
        assert_eq!(dim.rgb().get_rgb(), (205, 0, 0));
        assert_eq!(bright.rgb().get_rgb(), (255, 0, 0));
    }

    #[test]
    fn bright_index_ignores_bright_mode() {
        let c = PaletteColor::from_bright_index(4).unwrap();
        assert_eq!(c.rgb().get_rgb(), (0, 0, 255));
    }

    #[test]
    fn default_cell_colors_are_white_on_black() {
        assert_eq!(PaletteColor::default(), PaletteColor::WHITE);
        assert_eq!(PaletteColor::BLACK.id(), 1);
    }
}
