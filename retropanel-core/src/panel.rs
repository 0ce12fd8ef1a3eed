//! Panel orchestrator
//!
//! Wires confirmed key presses to preset selection and drives the
//! display. Runs as one step of the single-threaded control loop; the
//! keypad and display never share state directly.

use crate::event::EventQueue;
use crate::scroll::ScrollMode;
use crate::time::Tick;
use crate::traits::{DisplayError, KeypadScanner, ScanError, TextDisplay};

/// A preset button binding: pressing (row, column) shows `label`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preset {
    pub row: u8,
    pub column: u8,
    pub label: &'static str,
}

/// Default bindings: the top button row selects display modes
pub const DEFAULT_PRESETS: &[Preset] = &[
    Preset { row: 0, column: 0, label: "MODERN" },
    Preset { row: 0, column: 1, label: "RETRO" },
    Preset { row: 0, column: 2, label: "CLOCK" },
    Preset { row: 0, column: 3, label: "ANIMATION" },
];

/// Orchestrator tying the scanner to the display
pub struct Panel<'p, K, D> {
    keypad: K,
    display: D,
    presets: &'p [Preset],
    scroll_mode: ScrollMode,
    active: Option<usize>,
    overflows: u32,
}

impl<'p, K: KeypadScanner, D: TextDisplay> Panel<'p, K, D> {
    pub fn new(keypad: K, display: D, presets: &'p [Preset], scroll_mode: ScrollMode) -> Self {
        Self {
            keypad,
            display,
            presets,
            scroll_mode,
            active: None,
            overflows: 0,
        }
    }

    /// The currently selected preset, if any
    pub fn active_preset(&self) -> Option<&Preset> {
        self.active.map(|i| &self.presets[i])
    }

    /// FIFO overflows seen since construction (recovered, counted)
    pub fn overflow_count(&self) -> u32 {
        self.overflows
    }

    /// Returns true once the keypad has latched a transport fault
    pub fn keypad_faulted(&self) -> bool {
        self.keypad.is_faulted()
    }

    /// Run one control-loop step
    ///
    /// Polls the keypad, applies preset presses, advances the scroll and
    /// flushes the display. Keypad faults do not stop display service;
    /// only display transport errors surface to the caller.
    pub fn service(&mut self, now: Tick) -> Result<(), DisplayError> {
        let mut events = EventQueue::new();
        match self.keypad.poll(now, &mut events) {
            Ok(()) => {}
            // Recovered locally; confirmed events were not lost
            Err(ScanError::Overflow) => self.overflows = self.overflows.wrapping_add(1),
            // Scanner latched Faulted; keep servicing the display
            Err(ScanError::Transport) => {}
        }

        for event in events.iter().filter(|e| e.is_press()) {
            let hit = self
                .presets
                .iter()
                .position(|p| p.row == event.row && p.column == event.column);
            if let Some(index) = hit {
                self.active = Some(index);
                self.display
                    .set_text(self.presets[index].label, self.scroll_mode, now);
            }
        }

        self.display.tick(now);
        self.display.flush()
    }
}
