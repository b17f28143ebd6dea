//! The screen model: an 81x29 grid plus cursor, scroll region, and current
//! graphic-rendition state, mutated by applying decoded events.

use crate::cursor::{Cursor, GraphicsState, ScrollRegion};
use crate::decoder::Event;
use crate::grid::{Cell, Grid, GRID_COLUMNS, GRID_ROWS};
use crate::palette::PaletteColor;

/// Default scroll region bottom in 0-based coordinates: ANSI row 24.
const DEFAULT_SCROLL_BOTTOM: usize = 23;

/// Coerces a count parameter: 0 (meaning "omitted") means 1, matching the
/// decoder's default-parameter rule.
fn count(n: u32) -> usize {
    if n == 0 {
        1
    } else {
        n as usize
    }
}

/// Coerces a 1-based position parameter the same way.
fn one_based(n: u32) -> usize {
    if n == 0 {
        1
    } else {
        n as usize
    }
}

#[derive(Debug, Clone)]
pub struct Screen {
    grid: Grid,
    cursor: Cursor,
    scroll: ScrollRegion,
    graphics: GraphicsState,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            grid: Grid::new(),
            cursor: Cursor::new(),
            scroll: ScrollRegion::new(),
            graphics: GraphicsState::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn scroll_region(&self) -> ScrollRegion {
        self.scroll
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::PrintGlyph(glyph) => self.print_glyph(glyph),
            Event::Backspace => self.backspace(),
            Event::CR => self.cursor.x = 0,
            Event::LF => self.line_feed(),

            Event::CursorUp(n) => self.cursor.y = self.cursor.y.saturating_sub(count(n)),
            Event::CursorForward(n) => self.cursor.x = (self.cursor.x + count(n)).min(GRID_COLUMNS - 1),
            Event::CursorAbsoluteCol(n) => self.cursor.x = (one_based(n) - 1).min(GRID_COLUMNS - 1),
            Event::CursorAbsoluteRow(n) => self.cursor.y = (one_based(n) - 1).min(GRID_ROWS - 1),
            Event::CursorPosition(col, row) => self.cursor_position(col, row),

            Event::EraseInLine(mode) => self.erase_in_line(mode),
            Event::EraseInDisplay(mode) => self.erase_in_display(mode),
            Event::EraseChars(n) => self.erase_chars(n),
            Event::DeleteCharsBeforeCursor(n) => self.delete_chars_before_cursor(n),

            Event::InsertLines(n) => self.shift_down(self.cursor.y, self.scroll.bottom, count(n)),
            Event::DeleteLines(n) => self.shift_up(self.cursor.y, self.scroll.bottom, count(n)),
            Event::ScrollUp(n) => self.shift_up(self.scroll.top, self.scroll.bottom, count(n)),
            Event::ScrollDown(n) => self.shift_down(self.scroll.top, self.scroll.bottom, count(n)),
            Event::ReverseIndex => self.shift_down(self.scroll.top.saturating_sub(1), self.scroll.bottom, 1),

            Event::SetScrollRegion(top, bottom) => self.set_scroll_region(top, bottom),

            Event::Sgr(param) => self.apply_sgr(param),

            Event::Ignored => {}
        }
    }

    fn print_glyph(&mut self, glyph: char) {
        let cell = Cell::new(self.graphics.fg, self.graphics.bg, glyph);
        self.grid.set(self.cursor.y, self.cursor.x, cell);
        self.cursor.x += 1;
        if self.cursor.x >= GRID_COLUMNS {
            self.cursor.x = 0;
            self.cursor.y += 1;
        }
        self.maybe_scroll();
    }

    fn backspace(&mut self) {
        self.cursor.x = self.cursor.x.saturating_sub(1);
        self.grid.set(self.cursor.y, self.cursor.x, Cell::default());
    }

    fn line_feed(&mut self) {
        self.cursor.x = 0;
        self.cursor.y += 1;
        self.maybe_scroll();
    }

    /// Scrolls the active region up one row at a time until the cursor is
    /// back within bounds. Only triggered by operations that can push the
    /// cursor past `scroll.bottom`: printing, line feed, and absolute
    /// cursor positioning.
    fn maybe_scroll(&mut self) {
        while self.cursor.y > self.scroll.bottom {
            self.shift_up(self.scroll.top, self.scroll.bottom, 1);
            self.cursor.y -= 1;
        }
        self.cursor.y = self.cursor.y.min(GRID_ROWS - 1);
    }

    fn cursor_position(&mut self, col: u32, row: u32) {
        let row = one_based(row);
        let internal_y = row - 1;
        let internal_x = if col == 0 { 0 } else { (col - 1) as usize };
        self.cursor.y = internal_y.min(GRID_ROWS - 1);
        self.cursor.x = internal_x.min(GRID_COLUMNS - 1);
        self.maybe_scroll();
    }

    fn erase_in_line(&mut self, mode: u32) {
        match mode {
            0 => self.grid.clear_row_range(self.cursor.y, self.cursor.x, GRID_COLUMNS - 1),
            1 => self.grid.clear_row_range(self.cursor.y, 0, self.cursor.x),
            2 => self.grid.clear_row(self.cursor.y),
            _ => {}
        }
    }

    fn erase_in_display(&mut self, mode: u32) {
        match mode {
            0 => {
                self.grid.clear_row_range(self.cursor.y, self.cursor.x, GRID_COLUMNS - 1);
                for row in (self.cursor.y + 1)..GRID_ROWS {
                    self.grid.clear_row(row);
                }
            }
            1 => {
                self.grid.clear_row_range(self.cursor.y, 0, self.cursor.x);
                for row in 0..self.cursor.y {
                    self.grid.clear_row(row);
                }
            }
            2 | 3 => self.grid.clear(),
            _ => {}
        }
    }

    fn erase_chars(&mut self, n: u32) {
        let n = count(n);
        let end = (self.cursor.x + n - 1).min(GRID_COLUMNS - 1);
        self.grid.clear_row_range(self.cursor.y, self.cursor.x, end);
    }

    fn delete_chars_before_cursor(&mut self, n: u32) {
        if self.cursor.x == 0 {
            return;
        }
        let n = count(n);
        let start = self.cursor.x.saturating_sub(n);
        let end = self.cursor.x - 1;
        self.grid.clear_row_range(self.cursor.y, start, end);
    }

    /// Shifts rows `[top, bottom]` down by one, `count` times: each
    /// iteration copies row `r-1` into row `r` (from the bottom up) and
    /// blanks row `top`.
    fn shift_down(&mut self, top: usize, bottom: usize, count: usize) {
        if top >= GRID_ROWS || bottom >= GRID_ROWS || top > bottom {
            log::warn!("clamped shift_down with out-of-range region top={top} bottom={bottom}");
            return;
        }
        for _ in 0..count {
            for row in (top + 1..=bottom).rev() {
                self.grid.copy_row(row, row - 1);
            }
            self.grid.clear_row(top);
        }
    }

    /// Shifts rows `[top, bottom]` up by one, `count` times: each iteration
    /// copies row `r+1` into row `r` and blanks row `bottom`.
    fn shift_up(&mut self, top: usize, bottom: usize, count: usize) {
        if top >= GRID_ROWS || bottom >= GRID_ROWS || top > bottom {
            log::warn!("clamped shift_up with out-of-range region top={top} bottom={bottom}");
            return;
        }
        for _ in 0..count {
            for row in top..bottom {
                self.grid.copy_row(row, row + 1);
            }
            self.grid.clear_row(bottom);
        }
    }

    fn set_scroll_region(&mut self, top: u32, bottom: u32) {
        let top0 = if top == 0 { 0 } else { top as usize - 1 }.min(GRID_ROWS - 1);
        let bottom0 = if bottom == 0 { DEFAULT_SCROLL_BOTTOM } else { bottom as usize - 1 }.min(GRID_ROWS - 1);
        self.scroll.top = top0.min(bottom0);
        self.scroll.bottom = bottom0.max(top0);
    }

    fn apply_sgr(&mut self, param: u32) {
        match param {
            0 => self.graphics.reset(),
            1 => self.graphics.bright_mode = true,
            30..=37 => {
                if let Some(c) = PaletteColor::from_basic_index((param - 30) as u8, self.graphics.bright_mode) {
                    self.graphics.fg = c;
                }
            }
            40..=47 => {
                if let Some(c) = PaletteColor::from_basic_index((param - 40) as u8, self.graphics.bright_mode) {
                    self.graphics.bg = c;
                }
            }
            39 => self.graphics.fg = PaletteColor::WHITE,
            49 => self.graphics.bg = PaletteColor::BLACK,
            90..=97 => {
                if let Some(c) = PaletteColor::from_bright_index((param - 90) as u8) {
                    self.graphics.fg = c;
                }
            }
            100..=107 => {
                if let Some(c) = PaletteColor::from_bright_index((param - 100) as u8) {
                    self.graphics.bg = c;
                }
            }
            _ => {}
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_at(screen: &Screen, row: usize, col: usize) -> Cell {
        screen.grid().get(row, col)
    }

    #[test]
    fn scenario_print_cr_lf() {
        let mut screen = Screen::new();
        for event in [
            Event::PrintGlyph('A'),
            Event::PrintGlyph('B'),
            Event::CR,
            Event::LF,
            Event::PrintGlyph('C'),
        ] {
            screen.apply(event);
        }
        assert_eq!(cell_at(&screen, 0, 0).glyph, 'A');
        assert_eq!(cell_at(&screen, 0, 1).glyph, 'B');
        assert_eq!(cell_at(&screen, 1, 0).glyph, 'C');
        assert_eq!(screen.cursor(), Cursor { x: 1, y: 1 });
    }

    #[test]
    fn scenario_sgr_red_then_reset() {
        let mut screen = Screen::new();
        screen.apply(Event::Sgr(31));
        screen.apply(Event::PrintGlyph('X'));
        screen.apply(Event::Sgr(0));
        screen.apply(Event::PrintGlyph('Y'));
        assert_eq!(cell_at(&screen, 0, 0).fg, PaletteColor::from_id(2).unwrap());
        assert_eq!(cell_at(&screen, 0, 1).fg, PaletteColor::WHITE);
    }

    #[test]
    fn scenario_bright_green() {
        let mut screen = Screen::new();
        screen.apply(Event::Sgr(1));
        screen.apply(Event::Sgr(32));
        screen.apply(Event::PrintGlyph('G'));
        assert_eq!(cell_at(&screen, 0, 0).fg, PaletteColor::from_id(11).unwrap());
    }

    #[test]
    fn scenario_clear_then_position() {
        let mut screen = Screen::new();
        screen.apply(Event::PrintGlyph('Q'));
        screen.apply(Event::EraseInDisplay(2));
        screen.apply(Event::CursorPosition(10, 5));
        screen.apply(Event::PrintGlyph('Z'));
        assert_eq!(cell_at(&screen, 0, 0).glyph, ' ');
        assert_eq!(cell_at(&screen, 4, 9).glyph, 'Z');
    }

    #[test]
    fn scenario_utf8_glyph_advances_cursor() {
        let mut screen = Screen::new();
        screen.apply(Event::CursorPosition(4, 3));
        screen.apply(Event::PrintGlyph('≈'));
        assert_eq!(cell_at(&screen, 2, 3).glyph, '≈');
        assert_eq!(screen.cursor(), Cursor { x: 4, y: 2 });
    }

    #[test]
    fn print_wraps_at_right_edge() {
        let mut screen = Screen::new();
        screen.apply(Event::CursorPosition(81, 1));
        screen.apply(Event::PrintGlyph('A'));
        assert_eq!(screen.cursor(), Cursor { x: 0, y: 1 });
    }

    #[test]
    fn print_crossing_bottom_margin_scrolls_once() {
        let mut screen = Screen::new();
        let top = screen.scroll_region().top;
        let bottom = screen.scroll_region().bottom;
        screen.apply(Event::CursorPosition(1, (bottom + 1) as u32));
        let pre_scroll_second_row = cell_at(&screen, top + 1, 0);
        screen.apply(Event::LF);
        assert_eq!(screen.cursor().y, bottom);
        assert_eq!(cell_at(&screen, top, 0), pre_scroll_second_row);
    }

    #[test]
    fn cursor_forward_clamps_without_wrapping() {
        let mut screen = Screen::new();
        screen.apply(Event::CursorForward(1000));
        assert_eq!(screen.cursor(), Cursor { x: GRID_COLUMNS - 1, y: 0 });
    }

    #[test]
    fn cursor_up_has_no_floor_clamp_beyond_zero() {
        let mut screen = Screen::new();
        screen.apply(Event::CursorUp(5));
        assert_eq!(screen.cursor(), Cursor { x: 0, y: 0 });
    }

    #[test]
    fn erase_chars_clears_inclusive_range() {
        let mut screen = Screen::new();
        for glyph in ['A', 'B', 'C', 'D'] {
            screen.apply(Event::PrintGlyph(glyph));
        }
        screen.apply(Event::CursorPosition(1, 1));
        screen.apply(Event::EraseChars(2));
        assert_eq!(cell_at(&screen, 0, 0).glyph, ' ');
        assert_eq!(cell_at(&screen, 0, 1).glyph, ' ');
        assert_eq!(cell_at(&screen, 0, 2).glyph, 'C');
    }

    #[test]
    fn delete_chars_before_cursor_does_not_shift() {
        let mut screen = Screen::new();
        for glyph in ['A', 'B', 'C'] {
            screen.apply(Event::PrintGlyph(glyph));
        }
        screen.apply(Event::DeleteCharsBeforeCursor(2));
        assert_eq!(cell_at(&screen, 0, 0).glyph, ' ');
        assert_eq!(cell_at(&screen, 0, 1).glyph, ' ');
        assert_eq!(cell_at(&screen, 0, 2).glyph, 'C');
    }

    #[test]
    fn invariant_cursor_always_in_bounds() {
        let mut screen = Screen::new();
        screen.apply(Event::CursorPosition(999, 999));
        assert!(screen.cursor().x < GRID_COLUMNS);
        assert!(screen.cursor().y < GRID_ROWS);
    }

    #[test]
    fn sgr_reset_is_idempotent() {
        let mut once = Screen::new();
        once.apply(Event::Sgr(31));
        once.apply(Event::Sgr(1));
        once.apply(Event::Sgr(0));

        let mut twice = Screen::new();
        twice.apply(Event::Sgr(31));
        twice.apply(Event::Sgr(1));
        twice.apply(Event::Sgr(0));
        twice.apply(Event::Sgr(0));

        once.apply(Event::PrintGlyph('Z'));
        twice.apply(Event::PrintGlyph('Z'));
        assert_eq!(cell_at(&once, 0, 0), cell_at(&twice, 0, 0));
    }

    #[test]
    fn invariant_scroll_region_within_grid() {
        let mut screen = Screen::new();
        screen.apply(Event::SetScrollRegion(5, 50));
        let region = screen.scroll_region();
        assert!(region.top <= region.bottom);
        assert!(region.bottom < GRID_ROWS);
    }
}
