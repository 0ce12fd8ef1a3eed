//! Text display trait

use crate::scroll::ScrollMode;
use crate::time::Tick;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus write failed; dirty state is preserved for the next flush
    Transport,
    /// Operation before the boards were initialized
    NotInitialized,
}

/// 18-character scrolling text display
///
/// The display is rendered into per-board buffers; only boards with
/// changed cells are written on [`flush`](Self::flush).
pub trait TextDisplay {
    /// Replace the displayed text
    ///
    /// Always resets the scroll offset to 0 and recomputes whether the
    /// new text scrolls under `mode`.
    fn set_text(&mut self, text: &str, mode: ScrollMode, now: Tick);

    /// Advance the scroll session if its delay has elapsed
    ///
    /// Must be invoked at least as often as the scroll delay.
    fn tick(&mut self, now: Tick);

    /// Write dirty cells to the boards, in board order
    ///
    /// On failure dirty flags are preserved, so the next flush retries
    /// exactly the cells that failed plus any new changes.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Blank all boards and cancel any active scroll session
    fn clear(&mut self) -> Result<(), DisplayError>;
}
