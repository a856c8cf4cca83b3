//! Character LCD abstraction.
//!
//! This module defines the [`CharacterLcd`] trait: the four driver primitives
//! the tonnage indicator needs from an HD44780-style character display.

use crate::glyph::{GlyphPattern, GlyphSlot};

/// Character LCD driver with programmable glyph slots.
///
/// Implementors provide hardware-specific access to displays like an
/// HD44780 on an I2C backpack, or recording doubles for testing.
///
/// # Example
///
/// ```ignore
/// use cst_tonnage::traits::CharacterLcd;
/// use cst_tonnage::glyph::{GlyphPattern, GlyphSlot};
///
/// struct MyLcd { /* ... */ }
///
/// impl CharacterLcd for MyLcd {
///     type Error = ();
///
///     fn set_custom_glyph(&mut self, slot: GlyphSlot, pattern: &GlyphPattern) -> Result<(), ()> {
///         Ok(())
///     }
///     fn move_cursor(&mut self, col: u8, row: u8) -> Result<(), ()> { Ok(()) }
///     fn write_text(&mut self, text: &str) -> Result<(), ()> { Ok(()) }
///     fn write_glyph(&mut self, slot: GlyphSlot) -> Result<(), ()> { Ok(()) }
/// }
/// ```
pub trait CharacterLcd {
    /// Error type for display operations.
    type Error;

    /// Uploads an 8-row bitmap into a programmable character slot.
    ///
    /// Characters already on screen that use `slot` change appearance
    /// immediately. Implementations must leave the write cursor where it
    /// was, or callers must reposition before the next write.
    fn set_custom_glyph(&mut self, slot: GlyphSlot, pattern: &GlyphPattern)
        -> Result<(), Self::Error>;

    /// Positions the write cursor. Both coordinates are zero-based.
    fn move_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Writes literal text at the cursor, advancing it.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Writes the custom character stored in `slot` at the cursor.
    fn write_glyph(&mut self, slot: GlyphSlot) -> Result<(), Self::Error>;
}

impl<T: CharacterLcd + ?Sized> CharacterLcd for &mut T {
    type Error = T::Error;

    fn set_custom_glyph(
        &mut self,
        slot: GlyphSlot,
        pattern: &GlyphPattern,
    ) -> Result<(), Self::Error> {
        (**self).set_custom_glyph(slot, pattern)
    }

    fn move_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        (**self).move_cursor(col, row)
    }

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        (**self).write_text(text)
    }

    fn write_glyph(&mut self, slot: GlyphSlot) -> Result<(), Self::Error> {
        (**self).write_glyph(slot)
    }
}
