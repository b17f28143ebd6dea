//! The ttyrec byte framer: `(sec, usec, len)` headers followed by payloads.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Result, TermError};

const HEADER_LEN: usize = 12;

/// One ttyrec frame: a timestamp and its payload bytes.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sec: u32,
    pub usec: u32,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn timestamp(&self) -> f64 {
        self.sec as f64 + self.usec as f64 / 1_000_000.0
    }
}

/// Reads ttyrec frames from an underlying byte source.
pub struct Framer<R> {
    reader: R,
    frame_index: usize,
}

impl<R: Read> Framer<R> {
    pub fn new(reader: R) -> Self {
        Framer { reader, frame_index: 0 }
    }

    /// Reads the next frame, or `Ok(None)` on a clean end-of-file at a frame
    /// boundary. A short read mid-header or mid-payload is a fatal format
    /// error.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let mut header = [0u8; HEADER_LEN];
        let mut read_so_far = 0;
        loop {
            match self.reader.read(&mut header[read_so_far..])? {
                0 if read_so_far == 0 => return Ok(None),
                0 => {
                    return Err(TermError::ShortRead {
                        frame: self.frame_index,
                        offset: read_so_far,
                        expected: HEADER_LEN,
                        actual: read_so_far,
                    });
                }
                n => read_so_far += n,
            }
            if read_so_far == HEADER_LEN {
                break;
            }
        }

        let mut cursor = &header[..];
        let sec = cursor.read_u32::<LittleEndian>()?;
        let usec = cursor.read_u32::<LittleEndian>()?;
        let len = cursor.read_u32::<LittleEndian>()? as usize;

        let mut payload = vec![0u8; len];
        self.reader.read_exact(&mut payload).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                TermError::ShortRead {
                    frame: self.frame_index,
                    offset: HEADER_LEN,
                    expected: len,
                    actual: 0,
                }
            } else {
                TermError::Io(e)
            }
        })?;

        let frame = Frame { sec, usec, payload };
        self.frame_index += 1;
        Ok(Some(frame))
    }
}

/// Computes the inter-frame delay (in seconds) of every frame after the
/// first, given their timestamps. `delay[i] = ts[i] - ts[i-1]`, for
/// `i in 1..frames.len()`. A negative delay is a fatal error — ttyrec
/// timestamps must be non-decreasing.
pub fn frame_delays(timestamps: &[f64]) -> Result<Vec<f64>> {
    log::debug!("computing delays for {} frames", timestamps.len());
    let mut delays = Vec::with_capacity(timestamps.len().saturating_sub(1));
    for (i, window) in timestamps.windows(2).enumerate() {
        let delay = window[1] - window[0];
        if delay < 0.0 {
            return Err(TermError::NegativeDelay { frame: i + 1 });
        }
        delays.push(delay);
    }
    Ok(delays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn frame_bytes(sec: u32, usec: u32, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&sec.to_le_bytes());
        buf.extend_from_slice(&usec.to_le_bytes());
        buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn reads_a_single_frame() {
        let bytes = frame_bytes(1, 500_000, b"hello");
        let mut framer = Framer::new(Cursor::new(bytes));
        let frame = framer.next_frame().unwrap().unwrap();
        assert_eq!(frame.sec, 1);
        assert_eq!(frame.usec, 500_000);
        assert_eq!(frame.payload, b"hello");
        assert!(framer.next_frame().unwrap().is_none());
    }

    #[test]
    fn reads_multiple_frames_in_order() {
        let mut bytes = frame_bytes(0, 0, b"A");
        bytes.extend(frame_bytes(0, 250_000, b"B"));
        let mut framer = Framer::new(Cursor::new(bytes));
        assert_eq!(framer.next_frame().unwrap().unwrap().payload, b"A");
        assert_eq!(framer.next_frame().unwrap().unwrap().payload, b"B");
        assert!(framer.next_frame().unwrap().is_none());
    }

    #[test]
    fn empty_input_is_clean_eof() {
        let mut framer = Framer::new(Cursor::new(Vec::new()));
        assert!(framer.next_frame().unwrap().is_none());
    }

    #[test]
    fn short_header_is_fatal() {
        let mut framer = Framer::new(Cursor::new(vec![0u8; 5]));
        assert!(matches!(framer.next_frame(), Err(TermError::ShortRead { .. })));
    }

    #[test]
    fn short_payload_is_fatal() {
        let mut bytes = frame_bytes(0, 0, b"0123456789");
        bytes.truncate(bytes.len() - 3);
        let mut framer = Framer::new(Cursor::new(bytes));
        assert!(matches!(framer.next_frame(), Err(TermError::ShortRead { .. })));
    }

    #[test]
    fn negative_delay_is_fatal() {
        let err = frame_delays(&[1.0, 0.5]).unwrap_err();
        assert!(matches!(err, TermError::NegativeDelay { frame: 1 }));
    }

    #[test]
    fn delays_match_timestamp_differences() {
        let delays = frame_delays(&[0.0, 0.25, 1.0]).unwrap();
        assert_eq!(delays, vec![0.25, 0.75]);
    }
}
