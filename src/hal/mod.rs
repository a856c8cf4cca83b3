//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`].
//!
//! # Available Implementations
//!
//! - `mock`: Test implementation for desktop development
//! - `hd44780`: HD44780 LCD on a PCF8574 I2C backpack (requires `hd44780` feature)

pub mod mock;

#[cfg(feature = "hd44780")]
pub mod hd44780;

pub use mock::*;

#[cfg(feature = "hd44780")]
pub use hd44780::*;
