//! Hardware abstraction traits
//!
//! These traits are the seams between the board-agnostic panel logic and
//! the chip drivers. Implementations live in `retropanel-drivers`.

mod display;
mod keypad;

pub use display::{DisplayError, TextDisplay};
pub use keypad::{InitError, KeypadScanner, ScanError};
