//! Mock implementations for testing without hardware.
//!
//! This module provides a test double for the display trait, enabling
//! development and testing on desktop without a physical LCD.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockLcd`] | [`CharacterLcd`] | Simulated 16x2 screen and glyph slots |
//!
//! # Example
//!
//! ```rust
//! use cst_tonnage::glyph::{BarGlyph, TONNAGE_TOP};
//! use cst_tonnage::hal::MockLcd;
//! use cst_tonnage::traits::CharacterLcd;
//!
//! let mut lcd = MockLcd::new();
//! lcd.set_custom_glyph(TONNAGE_TOP, BarGlyph::Full.pattern()).unwrap();
//! lcd.move_cursor(3, 1).unwrap();
//! lcd.write_glyph(TONNAGE_TOP).unwrap();
//!
//! assert_eq!(lcd.bar_glyph_at(3, 1), Some(BarGlyph::Full));
//! assert_eq!(lcd.upload_count, 1);
//! ```
//!
//! [`CharacterLcd`]: crate::traits::CharacterLcd

use alloc::vec::Vec;
use core::fmt;

use heapless::String as HString;

use crate::glyph::{BarGlyph, GlyphPattern, GlyphSlot, SLOT_COUNT};
use crate::traits::CharacterLcd;

/// Columns on the simulated display.
pub const MOCK_COLUMNS: usize = 16;

/// Rows on the simulated display.
pub const MOCK_ROWS: usize = 2;

/// Errors reported by [`MockLcd`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockLcdError {
    /// The mock was built with [`MockLcd::failing`].
    Injected,
    /// A cursor move or write went off the 16x2 screen.
    OutOfBounds {
        /// Offending column
        col: u8,
        /// Offending row
        row: u8,
    },
}

impl fmt::Display for MockLcdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Injected => write!(f, "injected failure"),
            Self::OutOfBounds { col, row } => write!(f, "({}, {}) is off screen", col, row),
        }
    }
}

/// Mock character LCD for testing.
///
/// Keeps a 16x2 grid of character codes plus the eight custom glyph slots,
/// and counts calls. Codes `0..8` in the grid refer to custom slots.
///
/// # Example
///
/// ```rust
/// use cst_tonnage::hal::MockLcd;
/// use cst_tonnage::traits::CharacterLcd;
///
/// let mut lcd = MockLcd::new();
/// lcd.move_cursor(0, 1).unwrap();
/// lcd.write_text("WEIGHT").unwrap();
///
/// assert_eq!(lcd.text(0, 1, 6).as_str(), "WEIGHT");
/// assert_eq!(lcd.cursor(), (6, 1));
/// ```
#[derive(Debug)]
pub struct MockLcd {
    cells: [[u8; MOCK_COLUMNS]; MOCK_ROWS],
    cursor: (u8, u8),
    /// Contents of the custom glyph slots.
    pub slots: [Option<GlyphPattern>; SLOT_COUNT as usize],
    /// Every glyph upload, oldest first.
    pub uploads: Vec<(GlyphSlot, GlyphPattern)>,
    /// Number of times `set_custom_glyph` was called.
    pub upload_count: usize,
    /// Number of trait calls of any kind.
    pub call_count: usize,
    /// When set, every call fails with [`MockLcdError::Injected`].
    pub fail: bool,
}

impl Default for MockLcd {
    fn default() -> Self {
        Self {
            cells: [[b' '; MOCK_COLUMNS]; MOCK_ROWS],
            cursor: (0, 0),
            slots: [None; SLOT_COUNT as usize],
            uploads: Vec::new(),
            upload_count: 0,
            call_count: 0,
            fail: false,
        }
    }
}

impl MockLcd {
    /// Creates a blank mock display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Resets the call counters and upload log, keeping screen contents.
    pub fn reset_counts(&mut self) {
        self.uploads.clear();
        self.upload_count = 0;
        self.call_count = 0;
    }

    /// Current (col, row) of the write cursor.
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Raw character code at a cell.
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Up to `len` printable characters starting at (`col`, `row`).
    ///
    /// Custom glyph cells read as `#`.
    pub fn text(&self, col: usize, row: usize, len: usize) -> HString<MOCK_COLUMNS> {
        let mut out = HString::new();
        let Some(cells) = self.cells.get(row) else {
            return out;
        };
        for &code in cells.iter().skip(col).take(len) {
            let ch = if code < SLOT_COUNT { '#' } else { char::from(code) };
            let _ = out.push(ch);
        }
        out
    }

    /// Bitmap shown at a cell, if the cell holds an uploaded custom glyph.
    pub fn glyph_at(&self, col: usize, row: usize) -> Option<GlyphPattern> {
        let code = self.cell(col, row)?;
        self.slots.get(usize::from(code)).copied().flatten()
    }

    /// Which bar glyph is shown at a cell, if any.
    pub fn bar_glyph_at(&self, col: usize, row: usize) -> Option<BarGlyph> {
        BarGlyph::from_pattern(&self.glyph_at(col, row)?)
    }

    fn begin_call(&mut self) -> Result<(), MockLcdError> {
        self.call_count += 1;
        if self.fail {
            Err(MockLcdError::Injected)
        } else {
            Ok(())
        }
    }

    fn put(&mut self, code: u8) -> Result<(), MockLcdError> {
        let (col, row) = self.cursor;
        let cell = self
            .cells
            .get_mut(usize::from(row))
            .and_then(|r| r.get_mut(usize::from(col)))
            .ok_or(MockLcdError::OutOfBounds { col, row })?;
        *cell = code;
        self.cursor.0 = col.saturating_add(1);
        Ok(())
    }
}

impl CharacterLcd for MockLcd {
    type Error = MockLcdError;

    fn set_custom_glyph(
        &mut self,
        slot: GlyphSlot,
        pattern: &GlyphPattern,
    ) -> Result<(), MockLcdError> {
        self.begin_call()?;
        self.upload_count += 1;
        self.uploads.push((slot, *pattern));
        if let Some(s) = self.slots.get_mut(usize::from(slot.index())) {
            *s = Some(*pattern);
        }
        Ok(())
    }

    fn move_cursor(&mut self, col: u8, row: u8) -> Result<(), MockLcdError> {
        self.begin_call()?;
        if usize::from(col) >= MOCK_COLUMNS || usize::from(row) >= MOCK_ROWS {
            return Err(MockLcdError::OutOfBounds { col, row });
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), MockLcdError> {
        self.begin_call()?;
        for byte in text.bytes() {
            self.put(byte)?;
        }
        Ok(())
    }

    fn write_glyph(&mut self, slot: GlyphSlot) -> Result<(), MockLcdError> {
        self.begin_call()?;
        self.put(slot.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{TONNAGE_BOTTOM, TONNAGE_TOP};

    #[test]
    fn mock_lcd_default() {
        let lcd = MockLcd::new();
        assert_eq!(lcd.cursor(), (0, 0));
        assert_eq!(lcd.text(0, 0, 16).as_str(), "                ");
        assert_eq!(lcd.upload_count, 0);
        assert!(lcd.slots.iter().all(Option::is_none));
    }

    #[test]
    fn mock_lcd_text_advances_cursor() {
        let mut lcd = MockLcd::new();
        lcd.move_cursor(2, 0).unwrap();
        lcd.write_text("LOW").unwrap();
        assert_eq!(lcd.cursor(), (5, 0));
        assert_eq!(lcd.text(2, 0, 3).as_str(), "LOW");
        assert_eq!(lcd.call_count, 2);
    }

    #[test]
    fn mock_lcd_write_past_edge() {
        let mut lcd = MockLcd::new();
        lcd.move_cursor(14, 1).unwrap();
        assert_eq!(
            lcd.write_text("ABC"),
            Err(MockLcdError::OutOfBounds { col: 16, row: 1 })
        );
        assert_eq!(lcd.text(14, 1, 2).as_str(), "AB");
    }

    #[test]
    fn mock_lcd_cursor_bounds() {
        let mut lcd = MockLcd::new();
        assert!(lcd.move_cursor(16, 0).is_err());
        assert!(lcd.move_cursor(0, 2).is_err());
        assert_eq!(lcd.cursor(), (0, 0));
    }

    #[test]
    fn mock_lcd_glyph_upload_updates_screen() {
        let mut lcd = MockLcd::new();
        lcd.set_custom_glyph(TONNAGE_BOTTOM, BarGlyph::BottomEmpty.pattern())
            .unwrap();
        lcd.move_cursor(7, 1).unwrap();
        lcd.write_glyph(TONNAGE_BOTTOM).unwrap();
        assert_eq!(lcd.bar_glyph_at(7, 1), Some(BarGlyph::BottomEmpty));

        // Re-uploading changes what is already on screen
        lcd.set_custom_glyph(TONNAGE_BOTTOM, BarGlyph::Full.pattern())
            .unwrap();
        assert_eq!(lcd.bar_glyph_at(7, 1), Some(BarGlyph::Full));
        assert_eq!(lcd.text(7, 1, 1).as_str(), "#");
        assert_eq!(lcd.uploads.len(), 2);
    }

    #[test]
    fn mock_lcd_glyph_without_upload() {
        let mut lcd = MockLcd::new();
        lcd.write_glyph(TONNAGE_TOP).unwrap();
        assert_eq!(lcd.cell(0, 0), Some(0));
        assert_eq!(lcd.glyph_at(0, 0), None);
    }

    #[test]
    fn mock_lcd_failing() {
        let mut lcd = MockLcd::new().failing();
        assert_eq!(lcd.write_text("X"), Err(MockLcdError::Injected));
        assert_eq!(
            lcd.set_custom_glyph(TONNAGE_TOP, BarGlyph::Full.pattern()),
            Err(MockLcdError::Injected)
        );
        assert_eq!(lcd.upload_count, 0);
        assert_eq!(lcd.call_count, 2);
    }

    #[test]
    fn mock_lcd_reset_counts() {
        let mut lcd = MockLcd::new();
        lcd.write_text("HEAVY").unwrap();
        lcd.set_custom_glyph(TONNAGE_TOP, BarGlyph::Full.pattern())
            .unwrap();
        lcd.reset_counts();
        assert_eq!(lcd.call_count, 0);
        assert_eq!(lcd.upload_count, 0);
        assert!(lcd.uploads.is_empty());
        assert_eq!(lcd.text(0, 0, 5).as_str(), "HEAVY");
    }
}
