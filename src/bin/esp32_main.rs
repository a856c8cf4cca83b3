//! ESP32-C3 SuperMini tonnage display bench firmware.
//!
//! Drives an HD44780 16x2 LCD on a PCF8574 backpack and sweeps the tonnage
//! indicator LIGHT -> HEAVY -> LIGHT, one level per second. Useful for
//! checking wiring and glyph appearance before the indicator is wired to
//! the control stand's buttons.
//!
//! # Wiring
//!
//! - SDA → GPIO8
//! - SCL → GPIO9
//! - VCC → 5V (backpack), GND → GND
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! ```

use cst_tonnage::hal::Hd44780I2c;
use cst_tonnage::{Config, TonnageLevel, TonnageState};
use esp_idf_hal::delay::Ets;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use std::thread;
use std::time::Duration;

/// Time each level stays on screen
const STEP_INTERVAL_MS: u64 = 1000;

/// Time the device name stays on screen at power-up
const SPLASH_MS: u64 = 2000;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    println!();
    println!("================================");
    println!("  cst-tonnage display bench");
    println!("================================");
    println!();

    let config = Config::default();
    config.validate()?;
    println!("  {} ({})", config.device.name, config.device.id);
    println!();

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize LCD (PCF8574 on GPIO8/9)
    // =========================================================================
    let i2c_config = I2cConfig::new().baudrate(100.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &i2c_config,
    )?;
    let mut lcd = Hd44780I2c::new(i2c, Ets, &config.lcd);
    lcd.init()?;
    println!(
        "[OK] LCD initialized ({}x{} @ 0x{:02X})",
        config.lcd.columns, config.lcd.rows, config.lcd.i2c_address
    );

    config.device.show_splash(&mut lcd, config.lcd.columns)?;
    thread::sleep(Duration::from_millis(SPLASH_MS));
    lcd.clear()?;

    let mut tonnage = TonnageState::with_config(config.tonnage.clone());
    println!("[OK] Tonnage starts at {}", tonnage.level());

    // =========================================================================
    // Sweep loop
    // =========================================================================
    let mut rising = true;
    loop {
        if let Err(e) = tonnage.try_render(&mut lcd) {
            println!("[LCD] Render failed: {}", e);
        }

        thread::sleep(Duration::from_millis(STEP_INTERVAL_MS));

        let before = tonnage.level();
        if rising {
            tonnage.increment();
        } else {
            tonnage.decrement();
        }
        match tonnage.level() {
            TonnageLevel::Heavy => rising = false,
            TonnageLevel::Light => rising = true,
            _ => {}
        }
        if tonnage.level() != before {
            println!("[TONNAGE] {} -> {}", before, tonnage.level());
        }
    }
}
