//! The in-game viewport's sprite dispatch table: `(fg_id, bg_id, glyph) ->
//! sprite rectangle`. Reproduced verbatim from the corpus's tile
//! constructor — this is data, not control flow, so additions belong here
//! as new rows, never as new branches elsewhere.

/// Which of the five sprite sheets a rectangle is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Player,
    Wall,
    Floor,
    Feat,
    Main,
    Icons,
}

/// A source rectangle within one sheet, to be centered into a 32x32 tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub sheet: Sheet,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl SpriteRect {
    const fn new(sheet: Sheet, x: u32, y: u32, w: u32, h: u32) -> Self {
        SpriteRect { sheet, x, y, w, h }
    }
}

/// The sprite used when no table entry matches: a floor tile.
pub const DEFAULT_SPRITE: SpriteRect = SpriteRect::new(Sheet::Floor, 32, 0, 32, 32);

struct Entry {
    fg_id: u32,
    bg_id: u32,
    glyph: char,
    rect: SpriteRect,
}

macro_rules! entry {
    ($fg:expr, $bg:expr, $glyph:expr, $sheet:expr, $x:expr, $y:expr, $w:expr, $h:expr) => {
        Entry {
            fg_id: $fg,
            bg_id: $bg,
            glyph: $glyph,
            rect: SpriteRect::new($sheet, $x, $y, $w, $h),
        }
    };
}

// Color ids follow the shared palette ordering: dim 1-8 (black, red, green,
// yellow, blue, magenta, cyan, white), bright 9-16 in the same hue order.
#[rustfmt::skip]
static TABLE: &[Entry] = &[
    entry!(8, 1, ' ', Sheet::Floor, 0, 0, 32, 32),    // empty, seen
    entry!(5, 1, ' ', Sheet::Floor, 0, 0, 32, 32),    // empty, unseen
    entry!(8, 1, '.', Sheet::Floor, 64, 0, 32, 32),   // floor, seen
    entry!(5, 1, '.', Sheet::Floor, 544, 0, 32, 32),  // floor, unseen
    entry!(5, 1, '≈', Sheet::Floor, 576, 0, 32, 32),  // water
    entry!(4, 1, '#', Sheet::Wall, 0, 0, 32, 32),     // wall, seen
    entry!(5, 1, '#', Sheet::Wall, 352, 32, 32, 32),  // wall, unseen
    entry!(4, 1, '>', Sheet::Feat, 192, 224, 30, 25), // downstairs trapdoor, untraveled
    entry!(16, 9, '>', Sheet::Feat, 128, 224, 32, 32),// downstairs, untraveled
    entry!(3, 1, '<', Sheet::Feat, 160, 224, 32, 32), // upstairs, traveled
    entry!(1, 3, '<', Sheet::Feat, 160, 224, 32, 32), // upstairs
    entry!(13, 9, '<', Sheet::Feat, 96, 224, 32, 32), // exit
    entry!(1, 5, '.', Sheet::Icons, 160, 32, 18, 16), // autotravel footstep, out of LOS
    entry!(1, 8, '.', Sheet::Icons, 160, 32, 18, 16), // autotravel footstep, in LOS
    entry!(12, 9, '$', Sheet::Main, 0, 690, 30, 30),  // gold
    entry!(2, 1, '.', Sheet::Main, 190, 690, 30, 25), // bloodstain
    entry!(1, 2, '.', Sheet::Main, 190, 690, 30, 25), // bloodstain, inverted
    entry!(1, 8, '@', Sheet::Player, 331, 1766, 22, 30), // player
    entry!(8, 1, '@', Sheet::Player, 331, 1766, 22, 30), // player, inverted
    entry!(8, 1, 'b', Sheet::Player, 127, 694, 32, 25),  // bat
    entry!(8, 5, 'b', Sheet::Player, 127, 694, 32, 25),  // bat, sleeping
    entry!(3, 1, 'l', Sheet::Player, 249, 742, 28, 21),  // frilled lizard
    entry!(3, 5, 'l', Sheet::Player, 249, 742, 28, 21),  // frilled lizard, sleeping
    entry!(3, 1, '†', Sheet::Main, 696, 690, 32, 20),    // frilled lizard corpse
    entry!(16, 9, 'r', Sheet::Player, 523, 742, 28, 25), // quoka
    entry!(16, 13, 'r', Sheet::Player, 523, 742, 28, 25),// quoka, sleeping
    entry!(16, 9, '†', Sheet::Main, 849, 690, 32, 21),   // quoka corpse
    entry!(4, 5, 'K', Sheet::Player, 876, 1446, 30, 31), // kobold, sleeping
    entry!(4, 1, 'K', Sheet::Player, 876, 1446, 30, 31), // kobold
    entry!(4, 1, 'r', Sheet::Player, 400, 742, 31, 21),  // rat
    entry!(4, 1, 'B', Sheet::Player, 96, 694, 31, 29),   // giant cockroach
    entry!(1, 4, 'B', Sheet::Player, 96, 694, 31, 29),   // giant cockroach, unaware
    entry!(8, 5, 'g', Sheet::Player, 851, 1446, 25, 26), // goblin, sleeping
    entry!(8, 1, 'g', Sheet::Player, 851, 1446, 25, 26), // goblin
    entry!(3, 1, 'S', Sheet::Player, 406, 998, 32, 24),  // adder
    entry!(3, 5, 'S', Sheet::Player, 406, 998, 32, 24),  // adder, sleeping
    entry!(13, 9, '^', Sheet::Feat, 304, 192, 32, 22),   // teleport trap
    entry!(8, 5, 'J', Sheet::Player, 528, 1318, 32, 24), // ectoplasm, sleeping
    entry!(8, 1, 'J', Sheet::Player, 528, 1318, 32, 24), // ectoplasm
    entry!(8, 1, '!', Sheet::Main, 910, 504, 25, 27),    // potion
    entry!(4, 1, ')', Sheet::Main, 809, 192, 32, 29),    // hunting sling
    entry!(2, 1, '[', Sheet::Main, 137, 288, 29, 29),    // robe
    entry!(1, 2, '[', Sheet::Main, 137, 288, 29, 29),    // robe, walked on / stashed
    entry!(15, 9, ')', Sheet::Main, 851, 128, 28, 28),   // long sword
    entry!(7, 1, '(', Sheet::Main, 633, 224, 15, 11),    // sling bullet
    entry!(13, 9, '?', Sheet::Main, 433, 412, 27, 28),   // unknown scroll
    entry!(8, 1, ')', Sheet::Main, 32, 128, 31, 29),     // whip / common weapon
    entry!(7, 1, ')', Sheet::Main, 437, 128, 17, 17),    // common dagger
];

/// Looks up the sprite rectangle for a viewport cell, falling back to
/// [`DEFAULT_SPRITE`] when no entry matches. Lookup is total: every
/// `(fg_id, bg_id, glyph)` triple resolves to some rectangle.
pub fn lookup(fg_id: u32, bg_id: u32, glyph: char) -> SpriteRect {
    TABLE
        .iter()
        .find(|e| e.fg_id == fg_id && e.bg_id == bg_id && e.glyph == glyph)
        .map(|e| e.rect)
        .unwrap_or(DEFAULT_SPRITE)
}
