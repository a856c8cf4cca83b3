//! Custom character glyphs for the tonnage bar graph.
//!
//! The bar is two character cells tall. Each cell is drawn with one of five
//! 5x8 patterns, uploaded into a programmable character slot on the LCD.
//!
//! ```text
//!  top-empty  top-half   full     bottom-half  bottom-empty
//!   #####      #####     #####      #...#        #...#
//!   #...#      #...#     #####      #...#        #...#
//!   #...#      #...#     #####      #...#        #...#
//!   #...#      #...#     #####      #####        #...#
//!   #...#      #...#     #####      #####        #...#
//!   #...#      #####     #####      #####        #...#
//!   #...#      #####     #####      #####        #...#
//!   #...#      #####     #####      #####        #####
//! ```

use core::fmt;

/// Number of pixel rows in a custom character cell.
pub const GLYPH_ROWS: usize = 8;

/// Mask of the pixel columns that are significant in each row.
pub const GLYPH_ROW_MASK: u8 = 0b0001_1111;

/// Number of programmable character slots on an HD44780 controller.
pub const SLOT_COUNT: u8 = 8;

/// An 8-row, 5-pixel-wide custom character bitmap.
///
/// Row 0 is the top of the cell. Only the low five bits of each row are
/// displayed; bit 4 is the leftmost pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphPattern(pub [u8; GLYPH_ROWS]);

impl GlyphPattern {
    /// Returns the raw row bytes.
    pub const fn rows(&self) -> &[u8; GLYPH_ROWS] {
        &self.0
    }

    /// Returns true if the pixel at (`col`, `row`) is lit.
    ///
    /// `col` 0 is the leftmost pixel. Out-of-range coordinates read as unlit.
    pub fn is_lit(&self, col: usize, row: usize) -> bool {
        if col >= 5 {
            return false;
        }
        self.0
            .get(row)
            .is_some_and(|bits| *bits & (0b1_0000_u8 >> col) != 0)
    }
}

const BOTTOM_EMPTY: GlyphPattern = GlyphPattern([
    0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
]);

const BOTTOM_HALF: GlyphPattern = GlyphPattern([
    0b10001, 0b10001, 0b10001, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111,
]);

const TOP_EMPTY: GlyphPattern = GlyphPattern([
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001,
]);

const TOP_HALF: GlyphPattern = GlyphPattern([
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111, 0b11111, 0b11111,
]);

const FULL: GlyphPattern = GlyphPattern([
    0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111,
]);

/// Indexed by `BarGlyph as usize`.
static BAR_GLYPHS: [GlyphPattern; 5] = [BOTTOM_EMPTY, BOTTOM_HALF, TOP_EMPTY, TOP_HALF, FULL];

/// The five bar-graph glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BarGlyph {
    /// Lower cell outline with only the base closed.
    BottomEmpty = 0,
    /// Lower cell filled from the base up through five rows.
    BottomHalf = 1,
    /// Upper cell outline with only the cap closed.
    TopEmpty = 2,
    /// Upper cell filled in its lower three rows.
    TopHalf = 3,
    /// Solid cell.
    Full = 4,
}

impl BarGlyph {
    /// All glyphs, in table order.
    pub const ALL: [BarGlyph; 5] = [
        BarGlyph::BottomEmpty,
        BarGlyph::BottomHalf,
        BarGlyph::TopEmpty,
        BarGlyph::TopHalf,
        BarGlyph::Full,
    ];

    /// Returns the bitmap for this glyph.
    pub fn pattern(self) -> &'static GlyphPattern {
        &BAR_GLYPHS[self as usize]
    }

    /// Looks up the glyph whose bitmap equals `pattern`.
    pub fn from_pattern(pattern: &GlyphPattern) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.pattern() == pattern)
    }
}

/// A programmable character slot (`0..8`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct GlyphSlot(u8);

/// Slot holding the upper half of the tonnage bar.
pub const TONNAGE_TOP: GlyphSlot = GlyphSlot(0);

/// Slot holding the lower half of the tonnage bar.
pub const TONNAGE_BOTTOM: GlyphSlot = GlyphSlot(1);

impl GlyphSlot {
    /// Creates a slot, returning `None` if `index` is not below [`SLOT_COUNT`].
    pub const fn new(index: u8) -> Option<Self> {
        if index < SLOT_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// The slot index, which is also the character code that displays it.
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Error for a slot index outside `0..8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidSlot(pub u8);

impl fmt::Display for InvalidSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glyph slot {} out of range 0..{}", self.0, SLOT_COUNT)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidSlot {}

impl TryFrom<u8> for GlyphSlot {
    type Error = InvalidSlot;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(InvalidSlot(index))
    }
}

impl From<GlyphSlot> for u8 {
    fn from(slot: GlyphSlot) -> u8 {
        slot.0
    }
}
