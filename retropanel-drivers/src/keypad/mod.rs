//! Keypad matrix scanning

mod tca8418;

pub use tca8418::{Tca8418, DEFAULT_KEYPAD_ADDRESS, MAX_FIFO_EVENTS, READ_RETRIES};
