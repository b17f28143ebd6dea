//! The grid dump: a full-grid snapshot and its CSV encoding.
//!
//! No `csv` crate appears anywhere in the corpus this workspace is
//! grounded on, so the reader/writer here are hand-rolled. The format is
//! deliberately narrow (five comma-delimited fields, one glyph per
//! record) rather than a general CSV dialect, which keeps the quoting
//! rule simple: quote the glyph field only when the glyph itself is a
//! comma or a double quote.

use std::io::{BufRead, BufReader, Read, Write};

use crate::error::{Result, TermError};
use crate::grid::{Grid, GRID_COLUMNS, GRID_ROWS};
use crate::palette::PaletteColor;

/// A full snapshot of the grid, labeled by the input ttyrec frame it was
/// produced from.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDump {
    pub frame_no: usize,
    pub grid: Grid,
}

impl GridDump {
    pub fn from_grid(frame_no: usize, grid: &Grid) -> Self {
        GridDump { frame_no, grid: grid.clone() }
    }

    /// Writes `row,col,fg_id,bg_id,glyph` records in row-major order.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        for (row, col, cell) in self.grid.iter_cells() {
            writeln!(
                writer,
                "{},{},{},{},{}",
                row,
                col,
                cell.fg.id(),
                cell.bg.id(),
                quote_glyph(cell.glyph)
            )?;
        }
        Ok(())
    }

    pub fn read<R: Read>(frame_no: usize, reader: R) -> Result<Self> {
        let mut grid = Grid::new();
        let reader = BufReader::new(reader);
        let mut count = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let (row, col, fg_id, bg_id, glyph) = parse_record(&line, line_no + 1)?;
            let fg = PaletteColor::from_id(fg_id)?;
            let bg = PaletteColor::from_id(bg_id)?;
            grid.set(row, col, crate::grid::Cell::new(fg, bg, glyph));
            count += 1;
        }

        let expected = GRID_ROWS * GRID_COLUMNS;
        if count != expected {
            return Err(TermError::DumpRecordCountMismatch { count, expected });
        }

        Ok(GridDump { frame_no, grid })
    }
}

fn quote_glyph(glyph: char) -> String {
    if glyph == ',' || glyph == '"' {
        format!("\"{}\"", glyph.to_string().replace('"', "\"\""))
    } else {
        glyph.to_string()
    }
}

fn unquote_glyph(field: &str) -> Option<char> {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        let inner = &field[1..field.len() - 1];
        let unescaped = inner.replace("\"\"", "\"");
        unescaped.chars().next()
    } else {
        field.chars().next()
    }
}

fn parse_record(line: &str, line_no: usize) -> Result<(usize, usize, u32, u32, char)> {
    let malformed = |message: &str| TermError::MalformedDumpRecord { line: line_no, message: message.to_string() };

    // The glyph field may itself contain a quoted comma, so split the first
    // four plain fields off the front and treat the remainder as the glyph.
    let mut parts = line.splitn(5, ',');
    let row: usize = parts.next().ok_or_else(|| malformed("missing row"))?.parse().map_err(|_| malformed("bad row"))?;
    let col: usize = parts.next().ok_or_else(|| malformed("missing col"))?.parse().map_err(|_| malformed("bad col"))?;
    let fg_id: u32 = parts.next().ok_or_else(|| malformed("missing fg_id"))?.parse().map_err(|_| malformed("bad fg_id"))?;
    let bg_id: u32 = parts.next().ok_or_else(|| malformed("missing bg_id"))?.parse().map_err(|_| malformed("bad bg_id"))?;
    let glyph_field = parts.next().ok_or_else(|| malformed("missing glyph"))?;
    let glyph = unquote_glyph(glyph_field).ok_or_else(|| malformed("empty glyph"))?;

    if row >= GRID_ROWS || col >= GRID_COLUMNS {
        return Err(malformed("row/col out of bounds"));
    }

    Ok((row, col, fg_id, bg_id, glyph))
}
