//! Debounce filter for the keypad matrix
//!
//! Raw transitions from the key event FIFO are held until they stay
//! stable for a settle window; a bounce that reverts inside the window
//! is discarded without emitting an event. The filter owns all per-cell
//! state and is reset wholesale when the scanner resynchronizes after a
//! FIFO overflow.

use crate::event::{EventQueue, KeyAction, KeyEvent};
use crate::time::{elapsed, Tick};

/// Maximum matrix rows supported by the TCA8418
pub const MAX_ROWS: usize = 8;

/// Maximum matrix columns supported by the TCA8418
pub const MAX_COLUMNS: usize = 10;

/// Default settle window in milliseconds
pub const DEFAULT_SETTLE_MS: u32 = 10;

/// Per-cell debounce state
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct CellState {
    /// Most recent raw level (true = pressed)
    raw_level: bool,
    /// Last confirmed level
    stable_level: bool,
    /// Tick of the most recent raw transition
    last_change_tick: Tick,
    /// A raw transition is awaiting confirmation
    pending: bool,
}

/// Debounce filter for an up-to-8x10 key matrix
pub struct DebounceFilter {
    cells: [[CellState; MAX_COLUMNS]; MAX_ROWS],
    rows: u8,
    columns: u8,
    settle_ms: u32,
}

impl DebounceFilter {
    /// Create a filter for a matrix of the given size
    ///
    /// `rows` and `columns` are clamped to the supported maximums by the
    /// caller (the scanner validates size during initialization).
    pub fn new(rows: u8, columns: u8, settle_ms: u32) -> Self {
        Self {
            cells: [[CellState::default(); MAX_COLUMNS]; MAX_ROWS],
            rows,
            columns,
            settle_ms,
        }
    }

    /// Record a raw level transition for a cell
    ///
    /// A transition back to the stable level cancels any pending
    /// confirmation (bounce rejection). Repeated edges in the same
    /// direction keep the original transition tick so chatter cannot
    /// postpone confirmation indefinitely.
    pub fn record(&mut self, row: u8, column: u8, pressed: bool, now: Tick) {
        if row >= self.rows || column >= self.columns {
            return;
        }
        let cell = &mut self.cells[row as usize][column as usize];

        if pressed == cell.stable_level {
            // Bounce back to the confirmed level, or a redundant edge
            cell.raw_level = pressed;
            cell.pending = false;
            return;
        }

        if cell.raw_level != pressed {
            cell.raw_level = pressed;
            cell.last_change_tick = now;
            cell.pending = true;
        }
    }

    /// Collect transitions whose settle window has elapsed
    ///
    /// Confirmed events are appended in chronological order of their raw
    /// transitions. Cells that confirm are committed to their new stable
    /// level so each physical transition emits exactly once. When the
    /// queue fills, the remaining cells stay pending and confirm on the
    /// next collect; no confirmed transition is ever dropped.
    pub fn collect(&mut self, now: Tick, out: &mut EventQueue) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let cell = &mut self.cells[row as usize][column as usize];
                if !cell.pending || elapsed(now, cell.last_change_tick) < self.settle_ms {
                    continue;
                }
                if out.is_full() {
                    // Commit nothing that cannot be emitted
                    return;
                }
                cell.stable_level = cell.raw_level;
                cell.pending = false;

                let action = if cell.stable_level {
                    KeyAction::Pressed
                } else {
                    KeyAction::Released
                };
                let event = KeyEvent::new(row, column, action, cell.last_change_tick);

                // Insert sorted by transition tick; cannot fail, fullness
                // is checked above
                let pos = out
                    .iter()
                    .position(|e| elapsed(event.tick, e.tick) > u32::MAX / 2)
                    .unwrap_or(out.len());
                let _ = out.insert(pos, event);
            }
        }
    }

    /// Drop all state back to released
    ///
    /// Used when the scanner resynchronizes after an overflow. Held keys
    /// must be reseeded via [`record`](Self::record) from a level read;
    /// they re-confirm (and re-emit a press) after one settle window.
    pub fn reset(&mut self) {
        self.cells = [[CellState::default(); MAX_COLUMNS]; MAX_ROWS];
    }

    /// Confirmed level of a cell
    pub fn is_pressed(&self, row: u8, column: u8) -> bool {
        if row >= self.rows || column >= self.columns {
            return false;
        }
        self.cells[row as usize][column as usize].stable_level
    }

    /// Settle window in milliseconds
    pub fn settle_ms(&self) -> u32 {
        self.settle_ms
    }
}
