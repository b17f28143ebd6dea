//! Compositor-specific errors, mirroring `ttyreplay_term::TermError`'s
//! `thiserror` shape.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompositorError {
    #[error("missing asset: {path}")]
    MissingAsset { path: PathBuf },

    #[error("sprite rect out of bounds on sheet {sheet}: x={x} y={y} w={w} h={h}")]
    InvalidSpriteRect { sheet: &'static str, x: u32, y: u32, w: u32, h: u32 },

    #[error("font rasterization failed: {0}")]
    FontRasterFailure(String),

    #[error("reading grid dump: {0}")]
    DumpReadFailure(String),

    #[error(transparent)]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompositorError>;
