//! Tonnage indicator state and rendering.
//!
//! This module provides [`TonnageState`], the value the host control loop
//! owns to show the simulated train weight on a two-line character LCD.
//!
//! # Screen Layout
//!
//! ```text
//! col: 0123456 7
//!      MEDIUM  #   <- label, top half of bar
//!      WEIGHT  #   <- caption, bottom half of bar
//! ```
//!
//! The bar is drawn with two custom glyphs. Uploading glyphs is the slow
//! part of a refresh, so it only happens when the level has changed since
//! the last upload.
//!
//! # Example
//!
//! ```rust
//! use cst_tonnage::{TonnageState, TonnageLevel, hal::MockLcd};
//!
//! let mut lcd = MockLcd::new();
//! let mut tonnage = TonnageState::new();
//!
//! tonnage.render(&mut lcd);
//! assert_eq!(lcd.text(0, 0, 6).as_str(), "LIGHT ");
//!
//! tonnage.increment();
//! tonnage.increment();
//! tonnage.render(&mut lcd);
//! assert_eq!(tonnage.level(), TonnageLevel::Medium);
//! assert_eq!(lcd.upload_count, 4);
//! ```

use core::fmt;

use crate::config::TonnageConfig;
use crate::glyph::BarGlyph;
use crate::traits::CharacterLcd;

/// Width of every label and caption, in characters.
pub const LABEL_WIDTH: u8 = 6;

/// Engine weight category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TonnageLevel {
    /// Light engine, no train
    #[default]
    Light = 0,
    /// Low weight
    Low = 1,
    /// Medium weight
    Medium = 2,
    /// Heavy weight
    Heavy = 3,
}

impl TonnageLevel {
    /// All levels, lightest first.
    pub const ALL: [TonnageLevel; 4] = [
        TonnageLevel::Light,
        TonnageLevel::Low,
        TonnageLevel::Medium,
        TonnageLevel::Heavy,
    ];

    /// Converts a raw level, normalizing anything out of range to `Light`.
    pub fn from_raw_or_light(raw: u8) -> Self {
        Self::try_from(raw).unwrap_or(Self::Light)
    }

    /// Next heavier level, saturating at `Heavy`.
    pub const fn heavier(self) -> Self {
        match self {
            Self::Light => Self::Low,
            Self::Low => Self::Medium,
            Self::Medium | Self::Heavy => Self::Heavy,
        }
    }

    /// Next lighter level, saturating at `Light`.
    pub const fn lighter(self) -> Self {
        match self {
            Self::Light | Self::Low => Self::Light,
            Self::Medium => Self::Low,
            Self::Heavy => Self::Medium,
        }
    }

    /// First display line, space-padded to [`LABEL_WIDTH`].
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "LIGHT ",
            Self::Low => "LOW   ",
            Self::Medium => "MEDIUM",
            Self::Heavy => "HEAVY ",
        }
    }

    /// Second display line.
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Light => "ENGINE",
            Self::Low | Self::Medium | Self::Heavy => "WEIGHT",
        }
    }

    /// Glyphs for the (top, bottom) cells of the bar.
    ///
    /// The pairing is not a plain two-bits-per-cell split: level 2 jumps the
    /// bottom cell to full while the top cell shows its lower rows, giving a
    /// four-step fill from two slots.
    pub const fn glyphs(self) -> (BarGlyph, BarGlyph) {
        match self {
            Self::Light => (BarGlyph::TopEmpty, BarGlyph::BottomEmpty),
            Self::Low => (BarGlyph::TopEmpty, BarGlyph::BottomHalf),
            Self::Medium => (BarGlyph::TopHalf, BarGlyph::Full),
            Self::Heavy => (BarGlyph::Full, BarGlyph::Full),
        }
    }
}

impl fmt::Display for TonnageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label().trim_end(), self.caption())
    }
}

/// Error for a raw level above 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidLevel(pub u8);

impl fmt::Display for InvalidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tonnage level {} out of range 0..=3", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidLevel {}

impl TryFrom<u8> for TonnageLevel {
    type Error = InvalidLevel;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Light),
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Heavy),
            _ => Err(InvalidLevel(raw)),
        }
    }
}

impl From<TonnageLevel> for u8 {
    fn from(level: TonnageLevel) -> u8 {
        level as u8
    }
}

/// Tonnage indicator state.
///
/// Holds the selected level and the level whose glyphs are currently in the
/// LCD's custom character slots. The host owns this value and passes the
/// display in on every render.
///
/// # Thread Safety
///
/// Plain data with no interior mutability. Call everything from the control
/// loop that owns the display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TonnageState {
    current: TonnageLevel,
    /// `None` until the first upload, or after `invalidate()`.
    last_rendered: Option<TonnageLevel>,
    layout: TonnageConfig,
}

impl Default for TonnageState {
    fn default() -> Self {
        Self::new()
    }
}

impl TonnageState {
    /// Creates a state at `Light` with the default layout.
    pub fn new() -> Self {
        Self::with_config(TonnageConfig::default())
    }

    /// Creates a state using `config` for layout, slots, and startup level.
    pub fn with_config(config: TonnageConfig) -> Self {
        Self {
            current: config.initial_level(),
            last_rendered: None,
            layout: config,
        }
    }

    /// Current level.
    pub fn level(&self) -> TonnageLevel {
        self.current
    }

    /// Level whose glyphs were last uploaded, if any.
    pub fn last_rendered(&self) -> Option<TonnageLevel> {
        self.last_rendered
    }

    /// Layout this state renders with.
    pub fn config(&self) -> &TonnageConfig {
        &self.layout
    }

    /// Sets the level directly.
    pub fn set_level(&mut self, level: TonnageLevel) {
        self.current = level;
    }

    /// Moves one level heavier. No-op at `Heavy`.
    pub fn increment(&mut self) {
        self.current = self.current.heavier();
    }

    /// Moves one level lighter. No-op at `Light`.
    pub fn decrement(&mut self) {
        self.current = self.current.lighter();
    }

    /// True if the next render will upload glyphs.
    pub fn needs_glyph_upload(&self) -> bool {
        self.last_rendered != Some(self.current)
    }

    /// Forces the next render to upload glyphs.
    ///
    /// Call this after anything that may have clobbered the custom
    /// character slots, such as re-initializing the LCD.
    pub fn invalidate(&mut self) {
        self.last_rendered = None;
    }

    /// Draws the indicator, ignoring display errors.
    ///
    /// Every write is attempted even if an earlier one failed.
    pub fn render<L: CharacterLcd>(&mut self, lcd: &mut L) {
        let _ = self.draw(lcd, |_| Ok(()));
    }

    /// Draws the indicator, stopping at the first display error.
    ///
    /// Glyphs count as uploaded only once both slots were written, so a
    /// failed upload is retried on the next call.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the display.
    pub fn try_render<L: CharacterLcd>(&mut self, lcd: &mut L) -> Result<(), L::Error> {
        self.draw(lcd, |result| result)
    }

    /// Runs the draw sequence, passing each write's result through `check`.
    fn draw<L, F>(&mut self, lcd: &mut L, mut check: F) -> Result<(), L::Error>
    where
        L: CharacterLcd,
        F: FnMut(Result<(), L::Error>) -> Result<(), L::Error>,
    {
        let level = self.current;
        let TonnageConfig {
            label_column,
            bar_column,
            top_slot,
            bottom_slot,
            ..
        } = self.layout;

        check(lcd.move_cursor(label_column, 0))?;
        check(lcd.write_text(level.label()))?;
        check(lcd.move_cursor(label_column, 1))?;
        check(lcd.write_text(level.caption()))?;

        if self.needs_glyph_upload() {
            let (top, bottom) = level.glyphs();
            check(lcd.set_custom_glyph(top_slot, top.pattern()))?;
            check(lcd.set_custom_glyph(bottom_slot, bottom.pattern()))?;
            self.last_rendered = Some(level);
        }

        check(lcd.move_cursor(bar_column, 0))?;
        check(lcd.write_glyph(top_slot))?;
        check(lcd.move_cursor(bar_column, 1))?;
        check(lcd.write_glyph(bottom_slot))
    }
}
