//! HD44780 character LCD on a PCF8574 I2C backpack.
//!
//! Works with any bus implementing [`embedded_hal::i2c::I2c`] and any delay
//! implementing [`embedded_hal::delay::DelayNs`], so the same driver runs on
//! ESP32 (`esp-idf-hal`) or other HALs.
//!
//! # Wiring
//!
//! PCF8574 pin mapping: P0=RS, P1=RW (tied low), P2=E, P3=Backlight,
//! P4-P7=D4-D7. The controller runs in 4-bit mode.
//!
//! # Example
//!
//! ```ignore
//! use cst_tonnage::hal::Hd44780I2c;
//! use cst_tonnage::config::LcdConfig;
//!
//! let mut lcd = Hd44780I2c::new(i2c, delay, &LcdConfig::default());
//! lcd.init()?;
//! tonnage.render(&mut lcd);
//! ```

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::LcdConfig;
use crate::glyph::{GlyphPattern, GlyphSlot, GLYPH_ROW_MASK};
use crate::traits::CharacterLcd;

const LCD_RS: u8 = 0x01;
const LCD_ENABLE: u8 = 0x04;
const LCD_BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_CGRAM: u8 = 0x40;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of column 0 on each row.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Errors from the HD44780 driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hd44780Error<E> {
    /// The I2C transfer failed.
    Bus(E),
    /// The requested position is outside the configured geometry.
    OutOfBounds {
        /// Requested column
        col: u8,
        /// Requested row
        row: u8,
    },
}

impl<E: fmt::Debug> fmt::Display for Hd44780Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "I2C error: {:?}", e),
            Self::OutOfBounds { col, row } => {
                write!(f, "cursor ({}, {}) outside display", col, row)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Hd44780Error<E> {}

/// HD44780 driver speaking through a PCF8574 I2C expander.
pub struct Hd44780I2c<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    columns: u8,
    rows: u8,
    backlight: bool,
    cursor: (u8, u8),
}

impl<I2C, D> Hd44780I2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates the driver. Call [`init`](Self::init) before drawing.
    pub fn new(i2c: I2C, delay: D, config: &LcdConfig) -> Self {
        Self {
            i2c,
            delay,
            address: config.i2c_address,
            columns: config.columns,
            rows: config.rows.min(ROW_OFFSETS.len() as u8),
            backlight: config.backlight,
            cursor: (0, 0),
        }
    }

    /// Runs the 4-bit power-up sequence and clears the screen.
    ///
    /// Custom glyph slots hold garbage after power-up; callers drawing
    /// glyphs must upload them again after this.
    pub fn init(&mut self) -> Result<(), Hd44780Error<I2C::Error>> {
        self.delay.delay_ms(50);

        // Force 8-bit mode three times, then drop to 4-bit
        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03, false)?;
        self.write_nibble(0x02, false)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_INCREMENT)
    }

    /// Clears the screen and homes the cursor.
    pub fn clear(&mut self) -> Result<(), Hd44780Error<I2C::Error>> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        self.cursor = (0, 0);
        Ok(())
    }

    /// Turns the backlight on or off.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), Hd44780Error<I2C::Error>> {
        self.backlight = on;
        let level = self.backlight_bit();
        self.i2c.write(self.address, &[level]).map_err(Hd44780Error::Bus)
    }

    /// Gives back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            LCD_BACKLIGHT
        } else {
            0
        }
    }

    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), Hd44780Error<I2C::Error>> {
        let rs_bit = if rs { LCD_RS } else { 0 };
        let data = (nibble << 4) | self.backlight_bit() | rs_bit;

        // Latch on the falling edge of E
        self.i2c
            .write(self.address, &[data | LCD_ENABLE])
            .map_err(Hd44780Error::Bus)?;
        self.delay.delay_us(1);
        self.i2c
            .write(self.address, &[data])
            .map_err(Hd44780Error::Bus)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn send(&mut self, byte: u8, rs: bool) -> Result<(), Hd44780Error<I2C::Error>> {
        self.write_nibble(byte >> 4, rs)?;
        self.write_nibble(byte & 0x0F, rs)
    }

    fn command(&mut self, byte: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        self.send(byte, false)
    }

    fn data(&mut self, byte: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        self.send(byte, true)
    }

    fn ddram_address(&self, col: u8, row: u8) -> Option<u8> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        ROW_OFFSETS
            .get(usize::from(row))
            .map(|offset| offset.wrapping_add(col))
    }

    fn put(&mut self, code: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        self.data(code)?;
        self.cursor.0 = self.cursor.0.saturating_add(1);
        Ok(())
    }
}

impl<I2C, D> CharacterLcd for Hd44780I2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = Hd44780Error<I2C::Error>;

    fn set_custom_glyph(
        &mut self,
        slot: GlyphSlot,
        pattern: &GlyphPattern,
    ) -> Result<(), Self::Error> {
        self.command(CMD_SET_CGRAM | (slot.index() << 3))?;
        for row in pattern.rows() {
            self.data(row & GLYPH_ROW_MASK)?;
        }

        // CGRAM writes move the address counter; point it back at the screen
        let (col, row) = self.cursor;
        let address = ROW_OFFSETS
            .get(usize::from(row))
            .map_or(0, |offset| offset.wrapping_add(col));
        self.command(CMD_SET_DDRAM | (address & 0x7F))
    }

    fn move_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        let address = self
            .ddram_address(col, row)
            .ok_or(Hd44780Error::OutOfBounds { col, row })?;
        self.command(CMD_SET_DDRAM | address)?;
        self.cursor = (col, row);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        for ch in text.chars() {
            let code = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.put(code)?;
        }
        Ok(())
    }

    fn write_glyph(&mut self, slot: GlyphSlot) -> Result<(), Self::Error> {
        self.put(slot.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{BarGlyph, TONNAGE_BOTTOM};
    use alloc::{vec, vec::Vec};
    use embedded_hal::i2c::{ErrorType, Operation};

    /// Records every byte written to the expander.
    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<u8>,
        fail: bool,
    }

    impl ErrorType for RecordingBus {
        type Error = embedded_hal::i2c::ErrorKind;
    }

    impl I2c for RecordingBus {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(embedded_hal::i2c::ErrorKind::Bus);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.extend_from_slice(bytes);
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Reassembles (byte, is_data) pairs from latched nibbles.
    fn decode(writes: &[u8]) -> Vec<(u8, bool)> {
        let latched: Vec<u8> = writes
            .iter()
            .copied()
            .filter(|w| w & LCD_ENABLE != 0)
            .collect();
        latched
            .chunks(2)
            .filter(|pair| pair.len() == 2)
            .map(|pair| ((pair[0] & 0xF0) | (pair[1] >> 4), pair[0] & LCD_RS != 0))
            .collect()
    }

    fn driver() -> Hd44780I2c<RecordingBus, NoDelay> {
        Hd44780I2c::new(RecordingBus::default(), NoDelay, &LcdConfig::default())
    }

    #[test]
    fn move_cursor_row_offsets() {
        let mut lcd = driver();
        lcd.move_cursor(7, 1).unwrap();
        let (bus, _) = lcd.release();
        assert_eq!(decode(&bus.writes), vec![(0x80 | 0x47, false)]);
    }

    #[test]
    fn move_cursor_out_of_bounds() {
        let mut lcd = driver();
        assert_eq!(
            lcd.move_cursor(16, 0),
            Err(Hd44780Error::OutOfBounds { col: 16, row: 0 })
        );
        assert_eq!(
            lcd.move_cursor(0, 2),
            Err(Hd44780Error::OutOfBounds { col: 0, row: 2 })
        );
    }

    #[test]
    fn custom_glyph_upload_framing() {
        let mut lcd = driver();
        lcd.move_cursor(3, 0).unwrap();
        lcd.set_custom_glyph(TONNAGE_BOTTOM, BarGlyph::BottomHalf.pattern())
            .unwrap();
        let (bus, _) = lcd.release();
        let bytes = decode(&bus.writes);

        assert_eq!(bytes.len(), 1 + 1 + 8 + 1);
        // CGRAM address for slot 1
        assert_eq!(bytes[1], (0x48, false));
        let rows: Vec<u8> = bytes[2..10].iter().map(|(b, _)| *b).collect();
        assert_eq!(rows.as_slice(), BarGlyph::BottomHalf.pattern().rows());
        assert!(bytes[2..10].iter().all(|(_, data)| *data));
        // Cursor restored to (3, 0)
        assert_eq!(bytes[10], (0x83, false));
    }

    #[test]
    fn text_and_glyph_are_data_writes() {
        let mut lcd = driver();
        lcd.write_text("Hé").unwrap();
        lcd.write_glyph(TONNAGE_BOTTOM).unwrap();
        let (bus, _) = lcd.release();
        assert_eq!(
            decode(&bus.writes),
            vec![(b'H', true), (b'?', true), (1, true)]
        );
    }

    #[test]
    fn backlight_bit_follows_config() {
        let config = LcdConfig::default().with_backlight(false);
        let mut lcd = Hd44780I2c::new(RecordingBus::default(), NoDelay, &config);
        lcd.write_text("A").unwrap();
        let (bus, _) = lcd.release();
        assert!(bus.writes.iter().all(|w| w & LCD_BACKLIGHT == 0));

        let mut lcd = driver();
        lcd.write_text("A").unwrap();
        let (bus, _) = lcd.release();
        assert!(bus.writes.iter().all(|w| w & LCD_BACKLIGHT != 0));
    }

    #[test]
    fn init_ends_in_entry_mode() {
        let mut lcd = driver();
        lcd.init().unwrap();
        let (bus, _) = lcd.release();
        let bytes = decode(&bus.writes[8..]);
        assert_eq!(
            bytes,
            vec![
                (CMD_FUNCTION_4BIT_2LINE, false),
                (CMD_DISPLAY_ON, false),
                (CMD_CLEAR, false),
                (CMD_ENTRY_INCREMENT, false),
            ]
        );
    }

    #[test]
    fn bus_errors_surface() {
        let bus = RecordingBus {
            fail: true,
            ..RecordingBus::default()
        };
        let mut lcd = Hd44780I2c::new(bus, NoDelay, &LcdConfig::default());
        assert_eq!(
            lcd.write_text("A"),
            Err(Hd44780Error::Bus(embedded_hal::i2c::ErrorKind::Bus))
        );
    }
}
