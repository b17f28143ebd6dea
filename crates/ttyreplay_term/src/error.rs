//! Unified error types for ttyreplay_term

use thiserror::Error;

/// Main error type for ttyreplay_term operations
#[derive(Debug, Error)]
pub enum TermError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Framing errors ===
    #[error("short read in frame {frame}: expected {expected} bytes at offset {offset}, got {actual}")]
    ShortRead { frame: usize, offset: usize, expected: usize, actual: usize },

    #[error("negative delay before frame {frame}")]
    NegativeDelay { frame: usize },

    // === Decoder errors ===
    #[error("unknown escape final byte {byte:#04x} in frame {frame} at offset {offset}")]
    UnknownEscapeFinal { frame: usize, offset: usize, byte: u8 },

    #[error("unknown UTF-8 sequence (lead byte {lead:#04x}) in frame {frame} at offset {offset}")]
    UnknownUtf8Sequence { frame: usize, offset: usize, lead: u8 },

    #[error("unrecognized private mode {param} ({final_byte}) in frame {frame}")]
    UnrecognizedPrivateMode { frame: usize, param: i32, final_byte: char },

    #[error("unexpected control byte {byte:#04x} in frame {frame} at offset {offset}")]
    UnknownControlByte { frame: usize, offset: usize, byte: u8 },

    // === Dump codec errors ===
    #[error("malformed grid dump record on line {line}: {message}")]
    MalformedDumpRecord { line: usize, message: String },

    #[error("grid dump has {count} records, expected {expected}")]
    DumpRecordCountMismatch { count: usize, expected: usize },

    #[error("invalid color id {id} (valid range is 1..=16)")]
    InvalidColorId { id: u32 },
}

/// Result type alias for ttyreplay_term operations
pub type Result<T> = std::result::Result<T, TermError>;
