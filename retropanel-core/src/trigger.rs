//! Key trigger dispatch
//!
//! External observers register for a specific cell and action; when the
//! scanner confirms a matching event the callbacks run in registration
//! order. Multiple observers per cell are allowed.

use heapless::Vec;

use crate::event::{KeyAction, KeyEvent};

/// Maximum registered triggers
pub const MAX_TRIGGERS: usize = 16;

/// Trigger registration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerError {
    /// No free trigger slots
    TableFull,
}

struct Entry<'a> {
    row: u8,
    column: u8,
    action: KeyAction,
    callback: &'a mut (dyn FnMut(&KeyEvent) + 'a),
}

/// Ordered observer table keyed by (row, column, action)
#[derive(Default)]
pub struct TriggerTable<'a> {
    entries: Vec<Entry<'a>, MAX_TRIGGERS>,
}

impl<'a> TriggerTable<'a> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a callback for press events on a cell
    pub fn on_press(
        &mut self,
        row: u8,
        column: u8,
        callback: &'a mut (dyn FnMut(&KeyEvent) + 'a),
    ) -> Result<(), TriggerError> {
        self.register(row, column, KeyAction::Pressed, callback)
    }

    /// Register a callback for release events on a cell
    pub fn on_release(
        &mut self,
        row: u8,
        column: u8,
        callback: &'a mut (dyn FnMut(&KeyEvent) + 'a),
    ) -> Result<(), TriggerError> {
        self.register(row, column, KeyAction::Released, callback)
    }

    fn register(
        &mut self,
        row: u8,
        column: u8,
        action: KeyAction,
        callback: &'a mut (dyn FnMut(&KeyEvent) + 'a),
    ) -> Result<(), TriggerError> {
        self.entries
            .push(Entry {
                row,
                column,
                action,
                callback,
            })
            .map_err(|_| TriggerError::TableFull)
    }

    /// Invoke all triggers matching the event, in registration order
    pub fn dispatch(&mut self, event: &KeyEvent) {
        for entry in self.entries.iter_mut() {
            if entry.row == event.row
                && entry.column == event.column
                && entry.action == event.action
            {
                (entry.callback)(event);
            }
        }
    }

    /// Number of registered triggers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no triggers are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
