//! Trait definitions for display hardware abstraction.
//!
//! This module defines the abstractions that allow cst-tonnage to:
//! - Run on different displays (HD44780 over I2C, desktop mock)
//! - Be tested on desktop without hardware
//!
//! # Submodules
//!
//! - `lcd`: Character LCD driver primitives
//!
//! # Display Abstraction
//!
//! [`CharacterLcd`] covers cursor positioning, text output, and the
//! programmable glyph slots the tonnage bar graph is drawn with.

pub mod lcd;

pub use lcd::*;
