//! Configuration for the tonnage indicator and its display.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use cst_tonnage::config::{Config, LcdConfig, TonnageConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert!(config.validate().is_ok());
//!
//! // Or customize
//! let config = Config::default()
//!     .with_tonnage(TonnageConfig::default().with_bar_column(10))
//!     .with_lcd(LcdConfig::default().with_i2c_address(0x3F));
//! ```

use core::fmt;

use heapless::String as HString;

use crate::glyph::{GlyphSlot, TONNAGE_BOTTOM, TONNAGE_TOP};
use crate::tonnage::{TonnageLevel, LABEL_WIDTH};
use crate::traits::CharacterLcd;

/// Maximum length for short config strings (device names, IDs)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .filter(|(i, c)| i + c.len_utf8() <= MAX_SHORT_STRING)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Tonnage indicator layout and glyph slots
    pub tonnage: TonnageConfig,
    /// Character LCD geometry and bus address
    pub lcd: LcdConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set tonnage configuration
    pub fn with_tonnage(mut self, tonnage: TonnageConfig) -> Self {
        self.tonnage = tonnage;
        self
    }

    /// Set LCD configuration
    pub fn with_lcd(mut self, lcd: LcdConfig) -> Self {
        self.lcd = lcd;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Checks the tonnage layout on its own and against the LCD geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tonnage.validate()?;
        if self.lcd.rows < 2 {
            return Err(ConfigError::TooFewRows(self.lcd.rows));
        }
        let label_last = self.tonnage.label_column.saturating_add(LABEL_WIDTH - 1);
        let widest = self.tonnage.bar_column.max(label_last);
        if widest >= self.lcd.columns {
            return Err(ConfigError::ColumnOutOfRange(widest));
        }
        Ok(())
    }
}

/// Reasons a [`Config`] is rejected by `validate()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Top and bottom halves of the bar share one glyph slot.
    SharedSlot(GlyphSlot),
    /// The bar column falls inside the label text.
    BarOverlapsLabel {
        /// Configured label column
        label_column: u8,
        /// Configured bar column
        bar_column: u8,
    },
    /// A configured column does not fit on the display.
    ColumnOutOfRange(u8),
    /// The display has fewer than the two rows the indicator uses.
    TooFewRows(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedSlot(slot) => {
                write!(f, "top and bottom glyphs both use slot {}", slot.index())
            }
            Self::BarOverlapsLabel {
                label_column,
                bar_column,
            } => write!(
                f,
                "bar column {} overlaps label starting at column {}",
                bar_column, label_column
            ),
            Self::ColumnOutOfRange(col) => write!(f, "column {} is off the display", col),
            Self::TooFewRows(rows) => write!(f, "display has {} rows, need 2", rows),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

// ============================================================================
// Tonnage Config
// ============================================================================

/// Tonnage indicator configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TonnageConfig {
    /// Level shown at startup (raw 0..=3; anything else starts at LIGHT)
    pub initial_level: u8,
    /// Column where the two text lines start
    pub label_column: u8,
    /// Column of the two-cell bar graph
    pub bar_column: u8,
    /// Slot holding the upper bar glyph
    pub top_slot: GlyphSlot,
    /// Slot holding the lower bar glyph
    pub bottom_slot: GlyphSlot,
}

impl Default for TonnageConfig {
    fn default() -> Self {
        Self {
            initial_level: 0,
            label_column: 0,
            bar_column: 7,
            top_slot: TONNAGE_TOP,
            bottom_slot: TONNAGE_BOTTOM,
        }
    }
}

impl TonnageConfig {
    /// Set the startup level
    pub fn with_initial_level(mut self, level: TonnageLevel) -> Self {
        self.initial_level = level as u8;
        self
    }

    /// Set the label column
    pub fn with_label_column(mut self, col: u8) -> Self {
        self.label_column = col;
        self
    }

    /// Set the bar graph column
    pub fn with_bar_column(mut self, col: u8) -> Self {
        self.bar_column = col;
        self
    }

    /// Set both glyph slots
    pub fn with_slots(mut self, top: GlyphSlot, bottom: GlyphSlot) -> Self {
        self.top_slot = top;
        self.bottom_slot = bottom;
        self
    }

    /// Startup level, with out-of-range values normalized to LIGHT.
    pub fn initial_level(&self) -> TonnageLevel {
        TonnageLevel::from_raw_or_light(self.initial_level)
    }

    /// Rejects shared slots and a bar that would overwrite the label.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_slot == self.bottom_slot {
            return Err(ConfigError::SharedSlot(self.top_slot));
        }
        let label_end = self.label_column.saturating_add(LABEL_WIDTH);
        if self.bar_column >= self.label_column && self.bar_column < label_end {
            return Err(ConfigError::BarOverlapsLabel {
                label_column: self.label_column,
                bar_column: self.bar_column,
            });
        }
        Ok(())
    }
}

// ============================================================================
// LCD Config
// ============================================================================

/// Character LCD configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LcdConfig {
    /// 7-bit I2C address of the PCF8574 backpack
    pub i2c_address: u8,
    /// Characters per row
    pub columns: u8,
    /// Number of rows
    pub rows: u8,
    /// Whether the backlight is on
    pub backlight: bool,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x27,
            columns: 16,
            rows: 2,
            backlight: true,
        }
    }
}

impl LcdConfig {
    /// Set the I2C address
    pub fn with_i2c_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }

    /// Set the display geometry
    pub fn with_size(mut self, columns: u8, rows: u8) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Turn the backlight on or off
    pub fn with_backlight(mut self, on: bool) -> Self {
        self.backlight = on;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
    /// Control stand ID (for multi-throttle layouts)
    pub id: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("cst-tonnage"),
            id: short_string("stand1"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the device ID
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = short_string(id);
        self
    }

    /// Writes the name on row 0 and the ID on row 1, cut to `columns`.
    ///
    /// Shown at power-up before the first tonnage render. Clear the display
    /// afterwards, since render only redraws the label and bar cells.
    pub fn show_splash<L: CharacterLcd>(&self, lcd: &mut L, columns: u8) -> Result<(), L::Error> {
        lcd.move_cursor(0, 0)?;
        lcd.write_text(fit_columns(&self.name, columns))?;
        lcd.move_cursor(0, 1)?;
        lcd.write_text(fit_columns(&self.id, columns))
    }
}

fn fit_columns(s: &str, columns: u8) -> &str {
    match s.char_indices().nth(usize::from(columns)) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockLcd;
    use alloc::string::String;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.tonnage.bar_column, 7);
        assert_eq!(config.tonnage.top_slot, TONNAGE_TOP);
        assert_eq!(config.lcd.i2c_address, 0x27);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn shared_slot_rejected() {
        let tonnage = TonnageConfig::default().with_slots(TONNAGE_TOP, TONNAGE_TOP);
        assert_eq!(tonnage.validate(), Err(ConfigError::SharedSlot(TONNAGE_TOP)));
    }

    #[test]
    fn bar_inside_label_rejected() {
        let tonnage = TonnageConfig::default().with_bar_column(5);
        assert!(matches!(
            tonnage.validate(),
            Err(ConfigError::BarOverlapsLabel { bar_column: 5, .. })
        ));

        // Right after the label is fine
        let tonnage = TonnageConfig::default().with_bar_column(6);
        assert_eq!(tonnage.validate(), Ok(()));
    }

    #[test]
    fn bar_left_of_label_allowed() {
        let tonnage = TonnageConfig::default()
            .with_bar_column(0)
            .with_label_column(2);
        assert_eq!(tonnage.validate(), Ok(()));
    }

    #[test]
    fn bar_off_display_rejected() {
        let config =
            Config::default().with_tonnage(TonnageConfig::default().with_bar_column(16));
        assert_eq!(config.validate(), Err(ConfigError::ColumnOutOfRange(16)));
    }

    #[test]
    fn single_row_display_rejected() {
        let config = Config::default().with_lcd(LcdConfig::default().with_size(16, 1));
        assert_eq!(config.validate(), Err(ConfigError::TooFewRows(1)));
    }

    #[test]
    fn out_of_range_initial_level_starts_light() {
        let tonnage = TonnageConfig {
            initial_level: 9,
            ..TonnageConfig::default()
        };
        assert_eq!(tonnage.initial_level(), TonnageLevel::Light);

        let tonnage = TonnageConfig::default().with_initial_level(TonnageLevel::Medium);
        assert_eq!(tonnage.initial_level(), TonnageLevel::Medium);
    }

    #[test]
    fn short_string_truncation() {
        let long_input: String = core::iter::repeat('a').take(100).collect();
        let s = short_string(&long_input);
        assert_eq!(s.len(), MAX_SHORT_STRING);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::default()
            .with_lcd(LcdConfig::default().with_i2c_address(0x3F).with_backlight(false))
            .with_device(DeviceConfig::default().with_name("Yard Stand"));

        assert_eq!(config.lcd.i2c_address, 0x3F);
        assert!(!config.lcd.backlight);
        assert_eq!(config.device.name.as_str(), "Yard Stand");
    }

    #[test]
    fn splash_shows_name_and_id() {
        let mut lcd = MockLcd::new();
        let device = DeviceConfig::default();

        device.show_splash(&mut lcd, 16).unwrap();

        assert_eq!(lcd.text(0, 0, 16).as_str(), "cst-tonnage     ");
        assert_eq!(lcd.text(0, 1, 16).as_str(), "stand1          ");
    }

    #[test]
    fn splash_cuts_long_name_to_width() {
        let mut lcd = MockLcd::new();
        let device = DeviceConfig::default()
            .with_name("Helper District Control Stand")
            .with_id("east-helper-07");

        device.show_splash(&mut lcd, 16).unwrap();

        assert_eq!(lcd.text(0, 0, 16).as_str(), "Helper District ");
        assert_eq!(lcd.text(0, 1, 16).as_str(), "east-helper-07  ");

        // Narrower than the mock screen
        let mut lcd = MockLcd::new();
        device.show_splash(&mut lcd, 6).unwrap();
        assert_eq!(lcd.text(0, 0, 8).as_str(), "Helper  ");
    }
}
