#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate
)]

mod error;
pub use error::*;

pub mod sprite_table;

mod sprite_sheets;
pub use sprite_sheets::SpriteSheets;

mod font;
pub use font::FontFaces;

mod compositor;
pub use compositor::{compose, IMAGE_HEIGHT, IMAGE_WIDTH, TILE, VIEWPORT_COLS, VIEWPORT_ROWS};

mod png_writer;
pub use png_writer::write_png;

mod pool;
pub use pool::{render_parallel, render_sequential, JobOutcome, RenderAssets, RenderJob, RenderResult};
