//! Key events produced by the keypad scanner

use crate::time::Tick;

/// Maximum confirmed events returned by a single poll
///
/// The TCA8418 FIFO is 10 entries deep; a little headroom covers
/// confirmations that were pending from earlier polls.
pub const MAX_EVENTS_PER_POLL: usize = 16;

/// Queue of confirmed events drained by one poll
pub type EventQueue = heapless::Vec<KeyEvent, MAX_EVENTS_PER_POLL>;

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    Pressed,
    Released,
}

/// A debounced key transition on the matrix
///
/// Immutable once created; produced by the scanner, consumed by the
/// orchestrator and any registered triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Matrix row (0-7)
    pub row: u8,
    /// Matrix column (0-9)
    pub column: u8,
    /// 1-based key code: row * 10 + column + 1
    pub keycode: u8,
    /// Press or release
    pub action: KeyAction,
    /// Tick at which the raw transition occurred
    pub tick: Tick,
}

impl KeyEvent {
    /// Create an event for a matrix position
    pub fn new(row: u8, column: u8, action: KeyAction, tick: Tick) -> Self {
        Self {
            row,
            column,
            keycode: row * 10 + column + 1,
            action,
            tick,
        }
    }

    /// Returns true for press events
    pub fn is_press(&self) -> bool {
        self.action == KeyAction::Pressed
    }

    /// Returns true for release events
    pub fn is_release(&self) -> bool {
        self.action == KeyAction::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keycode_numbering() {
        // 1-based, row-major with 10 columns per row
        assert_eq!(KeyEvent::new(0, 0, KeyAction::Pressed, 0).keycode, 1);
        assert_eq!(KeyEvent::new(2, 3, KeyAction::Pressed, 0).keycode, 24);
        assert_eq!(KeyEvent::new(7, 9, KeyAction::Released, 0).keycode, 80);
    }

    #[test]
    fn test_action_predicates() {
        let press = KeyEvent::new(1, 1, KeyAction::Pressed, 10);
        let release = KeyEvent::new(1, 1, KeyAction::Released, 20);
        assert!(press.is_press());
        assert!(!press.is_release());
        assert!(release.is_release());
    }
}
