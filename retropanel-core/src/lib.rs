//! Board-agnostic core logic for the RetroPanel firmware
//!
//! This crate contains all panel logic that does not depend on specific
//! hardware implementations:
//!
//! - Hardware abstraction traits (keypad scanner, text display)
//! - Key event types and debounce filtering
//! - Scroll session for the 18-character marquee display
//! - Trigger (observer) dispatch for key presses/releases
//! - Preset orchestration
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod debounce;
pub mod event;
pub mod panel;
pub mod scroll;
pub mod time;
pub mod traits;
pub mod trigger;
