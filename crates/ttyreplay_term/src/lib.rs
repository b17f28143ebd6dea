#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::too_many_lines,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate
)]

mod cursor;
pub use cursor::*;

mod grid;
pub use grid::*;

mod palette;
pub use palette::*;

mod error;
pub use error::*;

mod framer;
pub use framer::*;

pub mod decoder;
pub use decoder::Event;

mod screen;
pub use screen::Screen;

mod dump;
pub use dump::*;

/// Applies an entire ttyrec session to a fresh [`Screen`], yielding one
/// [`GridDump`] per input frame whose grid differs from the previously
/// emitted dump.
pub fn replay_session<R: std::io::Read>(reader: R) -> Result<Vec<GridDump>> {
    Ok(replay_session_cancellable(reader, None)?.dumps)
}

/// The result of replaying a session that may have been interrupted partway
/// through.
#[derive(Debug)]
pub struct ReplaySession {
    pub dumps: Vec<GridDump>,
    pub cancelled: bool,
}

/// Same as [`replay_session`], but checks `cancel` once per input frame and
/// stops cleanly (returning whatever dumps were retained so far) instead of
/// consuming the rest of the file when it is set.
pub fn replay_session_cancellable<R: std::io::Read>(
    reader: R,
    cancel: Option<&std::sync::atomic::AtomicBool>,
) -> Result<ReplaySession> {
    let mut framer = Framer::new(reader);
    let mut decoder = decoder::Decoder::new();
    let mut screen = Screen::new();
    let mut dumps = Vec::new();
    let mut last_grid: Option<Grid> = None;
    // Matches the original player's `frameno` counter: it starts at 0 but is
    // incremented to 1 on the first successful frame read, before that
    // frame is processed or dumped — so the first dump this pipeline ever
    // writes is `1.csv`, not `0.csv`.
    let mut frame_no = 0usize;

    while let Some(frame) = framer.next_frame()? {
        frame_no += 1;

        if cancel.is_some_and(|flag| flag.load(std::sync::atomic::Ordering::Relaxed)) {
            log::warn!("replay interrupted at frame {frame_no}");
            return Ok(ReplaySession { dumps, cancelled: true });
        }

        for event in decoder.decode_frame(frame_no, &frame.payload)? {
            screen.apply(event);
        }
        if last_grid.as_ref() != Some(screen.grid()) {
            dumps.push(GridDump::from_grid(frame_no, screen.grid()));
            last_grid = Some(screen.grid().clone());
        }
    }

    Ok(ReplaySession { dumps, cancelled: false })
}
