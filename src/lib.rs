//! # cst-tonnage
//!
//! Tonnage (simulated train weight) indicator for a control-stand throttle,
//! drawn on a two-line character LCD.
//!
//! ## Features
//!
//! - **Four weight levels**: LIGHT ENGINE, LOW, MEDIUM and HEAVY WEIGHT
//! - **Bar graph from two glyphs**: a two-cell-tall bar built from custom characters
//! - **Minimal LCD traffic**: glyphs are only re-uploaded when the level changes
//! - **Hardware abstraction**: any display implementing [`CharacterLcd`]
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `glyph` - Bar-graph bitmaps and glyph slots
//! - `tonnage` - Level state, glyph policy, and rendering
//! - `stepper` - Step counter reserved for animated changes
//! - `traits` - Display driver abstraction
//! - `hal` - Concrete implementations (mock for testing, HD44780 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use cst_tonnage::{TonnageState, TonnageLevel, hal::MockLcd, glyph::BarGlyph};
//!
//! let mut lcd = MockLcd::new();
//! let mut tonnage = TonnageState::new();
//!
//! // Buttons on the control stand
//! tonnage.increment();
//! tonnage.increment();
//!
//! // Once per control loop tick
//! tonnage.render(&mut lcd);
//!
//! assert_eq!(tonnage.level(), TonnageLevel::Medium);
//! assert_eq!(lcd.text(0, 0, 6).as_str(), "MEDIUM");
//! assert_eq!(lcd.bar_glyph_at(7, 1), Some(BarGlyph::Full));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Bar-graph glyph bitmaps and programmable slots.
pub mod glyph;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Animation step counter stub.
pub mod stepper;
/// Tonnage level state and rendering.
pub mod tonnage;
/// Core traits for display hardware abstraction.
pub mod traits;

/// Configuration for layout, display, and device identity.
pub mod config;

// Re-exports for convenience
pub use glyph::{BarGlyph, GlyphPattern, GlyphSlot, InvalidSlot, TONNAGE_BOTTOM, TONNAGE_TOP};
pub use stepper::TonnageStepper;
pub use tonnage::{InvalidLevel, TonnageLevel, TonnageState};
pub use traits::CharacterLcd;

// Config re-exports
pub use config::{Config, ConfigError, DeviceConfig, LcdConfig, TonnageConfig};
