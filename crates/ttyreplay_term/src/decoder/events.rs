//! The terminal event vocabulary the decoder emits and the screen model
//! consumes.

/// One decoded terminal event. Numeric parameters are passed through
/// exactly as the decoder parsed them (missing parameters default to 0);
/// any minimum-value coercion ("0 means 1") is the screen model's job, not
/// the decoder's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PrintGlyph(char),
    Backspace,
    CR,
    LF,

    CursorUp(u32),
    CursorForward(u32),
    CursorAbsoluteCol(u32),
    CursorAbsoluteRow(u32),
    CursorPosition(u32, u32),

    EraseInLine(u32),
    EraseInDisplay(u32),
    EraseChars(u32),
    DeleteCharsBeforeCursor(u32),

    InsertLines(u32),
    DeleteLines(u32),
    ScrollUp(u32),
    ScrollDown(u32),
    ReverseIndex,

    SetScrollRegion(u32, u32),

    Sgr(u32),

    /// A recognized-but-inert sequence: character-set selection, save/
    /// restore cursor, or one of the enumerated private display modes.
    Ignored,
}
