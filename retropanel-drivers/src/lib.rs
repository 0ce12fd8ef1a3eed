//! Chip drivers for the RetroPanel control panel
//!
//! - `keypad`: TCA8418 I2C keypad-matrix controller (up to 8x10 keys)
//! - `display`: three cascaded IS31FL3737 LED-matrix boards driven as
//!   one 18-character text display
//!
//! All drivers speak `embedded_hal::i2c::I2c`. The panel shares one bus;
//! the display board state does not own it and takes the bus per call.

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod keypad;
