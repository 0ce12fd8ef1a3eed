//! Keypad scanner trait

use crate::event::EventQueue;
use crate::time::Tick;

/// Errors during scanner initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Matrix size outside 1-8 rows x 1-10 columns
    UnsupportedSize,
    /// The transport rejected device configuration
    Transport,
}

/// Errors during polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// Bus read/write failed beyond the retry bound; scanner is faulted
    Transport,
    /// Event queue overran; stale state was cleared and resynchronized.
    /// Only raw (unconfirmed) transitions can have been lost.
    Overflow,
}

/// Debounced matrix keypad scanner
///
/// State machine: Uninitialized -> Ready -> (polling) -> Faulted.
/// A faulted scanner is inert until [`initialize`](Self::initialize) is
/// called again.
pub trait KeypadScanner {
    /// Configure the matrix size and prepare the device
    ///
    /// Flushes any events pending from before initialization and resets
    /// all debounce state. Recovers a faulted scanner.
    fn initialize(&mut self, rows: u8, columns: u8) -> Result<(), InitError>;

    /// Drain pending raw transitions and append confirmed events
    ///
    /// Safe to call at any cadence; events are not lost as long as the
    /// device FIFO does not overrun. Events are appended in
    /// chronological order. A faulted or uninitialized scanner appends
    /// nothing and returns Ok.
    fn poll(&mut self, now: Tick, events: &mut EventQueue) -> Result<(), ScanError>;

    /// Returns true once a transport fault has latched
    fn is_faulted(&self) -> bool;
}
