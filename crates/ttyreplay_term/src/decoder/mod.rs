//! Byte-stream decoder: turns a ttyrec frame's payload into a stream of
//! [`Event`]s, carrying an incomplete trailing sequence over to the next
//! frame.

pub mod events;

pub use events::Event;

use crate::error::{Result, TermError};

/// Private display modes the corpus toggles but the screen model never
/// needs to act on (cursor visibility, alternate screen, bracketed paste,
/// and similar). Anything outside this set is a format error: the corpus
/// is closed, so an unrecognized mode is either a bug or new input the
/// table must be extended for.
const ALLOWED_PRIVATE_MODES: [u32; 11] = [1, 7, 12, 25, 1047, 1048, 1049, 1051, 1052, 1060, 1061];

enum Step {
    /// A complete unit was parsed, producing zero or more events (SGR with
    /// several parameters decomposes into several), and consumed `usize`
    /// bytes.
    Done(Vec<Event>, usize),
    /// Not enough bytes yet to tell whether this is a complete sequence;
    /// the caller should stash the remainder and retry once more input
    /// arrives.
    Incomplete,
}

/// Decodes one ttyrec session's byte stream, frame by frame.
#[derive(Default)]
pub struct Decoder {
    carry: Vec<u8>,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder { carry: Vec::new() }
    }

    /// Decodes one frame's payload, prepending any carry-over from the
    /// previous call. Returns the events produced; any sequence left
    /// incomplete at the end of `payload` is retained for the next call.
    pub fn decode_frame(&mut self, frame: usize, payload: &[u8]) -> Result<Vec<Event>> {
        let mut buf = std::mem::take(&mut self.carry);
        buf.extend_from_slice(payload);

        let mut events = Vec::new();
        let mut i = 0usize;
        while i < buf.len() {
            match decode_one(frame, i, &buf[i..]) {
                Ok(Step::Done(mut produced, consumed)) => {
                    debug_assert!(consumed > 0);
                    for event in &produced {
                        if matches!(event, Event::Ignored) {
                            log::trace!("frame {frame} offset {i}: ignored sequence");
                        }
                    }
                    events.append(&mut produced);
                    i += consumed;
                }
                Ok(Step::Incomplete) => {
                    self.carry = buf[i..].to_vec();
                    return Ok(events);
                }
                Err(err) => {
                    log::error!("frame {frame} offset {i}: {err}");
                    return Err(err);
                }
            }
        }
        Ok(events)
    }

    /// True if a prior frame left an incomplete sequence pending.
    pub fn has_pending_carry(&self) -> bool {
        !self.carry.is_empty()
    }
}

fn decode_one(frame: usize, offset: usize, bytes: &[u8]) -> Result<Step> {
    match bytes[0] {
        0x1b => decode_escape(frame, offset, bytes),
        0x08 => Ok(Step::Done(vec![Event::Backspace], 1)),
        0x0d => Ok(Step::Done(vec![Event::CR], 1)),
        0x0a => Ok(Step::Done(vec![Event::LF], 1)),
        0x20..=0x7e => Ok(Step::Done(vec![Event::PrintGlyph(bytes[0] as char)], 1)),
        0xe2 => decode_utf8_e2(frame, offset, bytes),
        b if b < 0x20 || b == 0x7f => Err(TermError::UnknownControlByte { frame, offset, byte: b }),
        b => Err(TermError::UnknownUtf8Sequence { frame, offset, lead: b }),
    }
}

fn decode_escape(frame: usize, offset: usize, bytes: &[u8]) -> Result<Step> {
    if bytes.len() < 2 {
        return Ok(Step::Incomplete);
    }
    match bytes[1] {
        b'[' => decode_csi(frame, offset, bytes),
        b'7' | b'8' | b'=' | b'>' => Ok(Step::Done(vec![Event::Ignored], 2)),
        b'M' => Ok(Step::Done(vec![Event::ReverseIndex], 2)),
        b'(' => {
            if bytes.len() < 3 {
                return Ok(Step::Incomplete);
            }
            if bytes[2] == b'B' {
                Ok(Step::Done(vec![Event::Ignored], 3))
            } else {
                Err(TermError::UnknownEscapeFinal { frame, offset, byte: bytes[2] })
            }
        }
        b')' => {
            if bytes.len() < 3 {
                return Ok(Step::Incomplete);
            }
            if bytes[2] == b'0' {
                Ok(Step::Done(vec![Event::Ignored], 3))
            } else {
                Err(TermError::UnknownEscapeFinal { frame, offset, byte: bytes[2] })
            }
        }
        other => Err(TermError::UnknownEscapeFinal { frame, offset, byte: other }),
    }
}

fn decode_csi(frame: usize, offset: usize, bytes: &[u8]) -> Result<Step> {
    debug_assert_eq!(bytes[0], 0x1b);
    debug_assert_eq!(bytes[1], b'[');

    let mut idx = 2;
    if idx >= bytes.len() {
        return Ok(Step::Incomplete);
    }

    let private = bytes[idx] == b'?';
    if private {
        idx += 1;
        if idx >= bytes.len() {
            return Ok(Step::Incomplete);
        }
    }

    let param_start = idx;
    while bytes[idx].is_ascii_digit() || bytes[idx] == b';' {
        idx += 1;
        if idx >= bytes.len() {
            return Ok(Step::Incomplete);
        }
    }
    let params_bytes = &bytes[param_start..idx];
    let final_byte = bytes[idx];
    let consumed = idx + 1;

    let params = parse_params(params_bytes);

    if private {
        let param = params.first().copied().unwrap_or(0);
        return match final_byte {
            b'h' | b'l' | b'c' => {
                if ALLOWED_PRIVATE_MODES.contains(&param) {
                    Ok(Step::Done(vec![Event::Ignored], consumed))
                } else {
                    Err(TermError::UnrecognizedPrivateMode {
                        frame,
                        param: param as i32,
                        final_byte: final_byte as char,
                    })
                }
            }
            _ => Err(TermError::UnknownEscapeFinal { frame, offset, byte: final_byte }),
        };
    }

    let p = |n: usize| params.get(n).copied().unwrap_or(0);

    let event = match final_byte {
        b'A' => Event::CursorUp(p(0)),
        b'C' => Event::CursorForward(p(0)),
        b'G' => Event::CursorAbsoluteCol(p(0)),
        b'd' => Event::CursorAbsoluteRow(p(0)),
        b'H' => Event::CursorPosition(p(1), p(0)),
        b'J' => Event::EraseInDisplay(p(0)),
        b'K' => Event::EraseInLine(p(0)),
        b'X' => Event::EraseChars(p(0)),
        b'P' => Event::DeleteCharsBeforeCursor(p(0)),
        b'L' => Event::InsertLines(p(0)),
        b'M' => Event::DeleteLines(p(0)),
        b'S' => Event::ScrollUp(p(0)),
        b'T' => Event::ScrollDown(p(0)),
        b'r' => Event::SetScrollRegion(p(0), p(1)),
        b'l' if p(0) == 4 => return Ok(Step::Done(vec![Event::Ignored], consumed)),
        b'm' => {
            let sgr_params = if params.is_empty() { vec![0] } else { params };
            return Ok(Step::Done(sgr_params.into_iter().map(Event::Sgr).collect(), consumed));
        }
        other => return Err(TermError::UnknownEscapeFinal { frame, offset, byte: other }),
    };

    Ok(Step::Done(vec![event], consumed))
}

fn parse_params(bytes: &[u8]) -> Vec<u32> {
    if bytes.is_empty() {
        return Vec::new();
    }
    bytes
        .split(|&b| b == b';')
        .map(|field| {
            if field.is_empty() {
                0
            } else {
                std::str::from_utf8(field).ok().and_then(|s| s.parse().ok()).unwrap_or(0)
            }
        })
        .collect()
}

const UTF8_E2_TABLE: [((u8, u8), char); 10] = [
    ((0x80, 0xa0), '\u{2020}'), // †
    ((0x88, 0x86), '\u{2206}'), // ∆
    ((0x88, 0x9e), '\u{221e}'), // ∞
    ((0x88, 0xa9), '\u{2229}'), // ∩
    ((0x89, 0x88), '\u{2248}'), // ≈
    ((0x8c, 0xa0), '\u{2320}'), // ⌠
    ((0x96, 0x93), '\u{2593}'), // ▓
    ((0x97, 0x8b), '\u{25cb}'), // ○
    ((0x98, 0xbc), '\u{263c}'), // ☼
    ((0x99, 0xa3), '\u{2663}'), // ♣
];

fn decode_utf8_e2(frame: usize, offset: usize, bytes: &[u8]) -> Result<Step> {
    if bytes.len() < 3 {
        return Ok(Step::Incomplete);
    }
    let key = (bytes[1], bytes[2]);
    for (candidate, glyph) in UTF8_E2_TABLE {
        if candidate == key {
            return Ok(Step::Done(vec![Event::PrintGlyph(glyph)], 3));
        }
    }
    Err(TermError::UnknownUtf8Sequence { frame, offset, lead: 0xe2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_ascii() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"AB").unwrap();
        assert_eq!(events, vec![Event::PrintGlyph('A'), Event::PrintGlyph('B')]);
    }

    #[test]
    fn decodes_cr_lf_and_backspace() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"\r\n\x08").unwrap();
        assert_eq!(events, vec![Event::CR, Event::LF, Event::Backspace]);
    }

    #[test]
    fn decodes_single_sgr_param() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"\x1b[31m").unwrap();
        assert_eq!(events, vec![Event::Sgr(31)]);
    }

    #[test]
    fn decomposes_multi_param_sgr() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"\x1b[1;32m").unwrap();
        assert_eq!(events, vec![Event::Sgr(1), Event::Sgr(32)]);
    }

    #[test]
    fn bare_sgr_defaults_to_zero() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"\x1b[m").unwrap();
        assert_eq!(events, vec![Event::Sgr(0)]);
    }

    #[test]
    fn decodes_cursor_position_with_missing_params_as_zero() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"\x1b[5;10H").unwrap();
        assert_eq!(events, vec![Event::CursorPosition(10, 5)]);
    }

    #[test]
    fn decodes_allowed_private_mode_as_ignored() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"\x1b[?25l").unwrap();
        assert_eq!(events, vec![Event::Ignored]);
    }

    #[test]
    fn unrecognized_private_mode_is_an_error() {
        let mut decoder = Decoder::new();
        let err = decoder.decode_frame(0, b"\x1b[?9999h").unwrap_err();
        assert!(matches!(err, TermError::UnrecognizedPrivateMode { param: 9999, .. }));
    }

    #[test]
    fn decodes_recognized_utf8_glyph() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, &[0xe2, 0x89, 0x88]).unwrap();
        assert_eq!(events, vec![Event::PrintGlyph('≈')]);
    }

    #[test]
    fn unrecognized_utf8_lead_is_an_error() {
        let mut decoder = Decoder::new();
        let err = decoder.decode_frame(0, &[0xc3, 0xa9]).unwrap_err();
        assert!(matches!(err, TermError::UnknownUtf8Sequence { lead: 0xc3, .. }));
    }

    #[test]
    fn unrecognized_e2_sequence_is_an_error() {
        let mut decoder = Decoder::new();
        let err = decoder.decode_frame(0, &[0xe2, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, TermError::UnknownUtf8Sequence { lead: 0xe2, .. }));
    }

    #[test]
    fn carries_incomplete_escape_across_frames() {
        let mut decoder = Decoder::new();
        let first = decoder.decode_frame(0, b"A\x1b[3").unwrap();
        assert_eq!(first, vec![Event::PrintGlyph('A')]);
        assert!(decoder.has_pending_carry());
        let second = decoder.decode_frame(1, b"1m").unwrap();
        assert_eq!(second, vec![Event::Sgr(31)]);
        assert!(!decoder.has_pending_carry());
    }

    #[test]
    fn carries_incomplete_utf8_sequence_across_frames() {
        let mut decoder = Decoder::new();
        let first = decoder.decode_frame(0, &[0xe2, 0x89]).unwrap();
        assert!(first.is_empty());
        let second = decoder.decode_frame(1, &[0x88]).unwrap();
        assert_eq!(second, vec![Event::PrintGlyph('≈')]);
    }

    #[test]
    fn replace_mode_csi_4_l_is_ignored() {
        let mut decoder = Decoder::new();
        let events = decoder.decode_frame(0, b"\x1b[4l").unwrap();
        assert_eq!(events, vec![Event::Ignored]);
    }

    #[test]
    fn reverse_index_is_distinct_from_delete_lines() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode_frame(0, b"\x1bM").unwrap(), vec![Event::ReverseIndex]);
        assert_eq!(decoder.decode_frame(1, b"\x1b[2M").unwrap(), vec![Event::DeleteLines(2)]);
    }

    #[test]
    fn unknown_escape_final_is_an_error() {
        let mut decoder = Decoder::new();
        let err = decoder.decode_frame(0, b"\x1bZ").unwrap_err();
        assert!(matches!(err, TermError::UnknownEscapeFinal { byte: b'Z', .. }));
    }
}
