//! Marquee scroll session for the 18-character display
//!
//! The logical display is 18 characters wide (three 6-character boards).
//! A `ScrollSession` owns the message text and the scroll offset, and is
//! advanced by the control loop at the configured delay. The renderer
//! asks it for the visible 18-glyph window each time it changes.

use heapless::Vec;

use crate::time::{elapsed, Tick};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters visible across the three cascaded boards
pub const VISIBLE_CHARS: usize = 18;

/// Maximum message length in glyphs
pub const MAX_TEXT_LEN: usize = 128;

/// Blank glyphs inserted between loop cycles in Always mode
pub const WRAP_GAP: usize = 3;

/// Glyph used for padding and the wrap gap
pub const BLANK_GLYPH: u8 = b' ';

/// Scroll policy for the current message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScrollMode {
    /// Scroll only when the text is wider than the display
    #[default]
    Auto,
    /// Loop continuously regardless of length
    Always,
    /// Static; truncate or pad to the display width
    Never,
}

/// Scroll state for one message
///
/// Created when display text is set, replaced when new text arrives.
/// In Auto mode the offset never exceeds `len - 18`; reaching the end
/// holds the final window for one extra delay interval before the loop
/// restarts at offset 0. Always mode wraps circularly through the text
/// plus a 3-blank gap with no end pause, giving a continuous marquee.
pub struct ScrollSession {
    text: Vec<u8, MAX_TEXT_LEN>,
    offset: usize,
    mode: ScrollMode,
    delay_ms: u32,
    last_advance_tick: Tick,
    active: bool,
    end_pause: bool,
}

impl ScrollSession {
    /// Start a session for the given message
    ///
    /// Text beyond [`MAX_TEXT_LEN`] glyphs is truncated. The offset
    /// always starts at 0.
    pub fn new(text: &[u8], mode: ScrollMode, delay_ms: u32, now: Tick) -> Self {
        let mut glyphs = Vec::new();
        let take = text.len().min(MAX_TEXT_LEN);
        // Cannot fail: length checked above
        let _ = glyphs.extend_from_slice(&text[..take]);

        let active = match mode {
            ScrollMode::Never => false,
            ScrollMode::Always => !glyphs.is_empty(),
            ScrollMode::Auto => glyphs.len() > VISIBLE_CHARS,
        };

        Self {
            text: glyphs,
            offset: 0,
            mode,
            delay_ms,
            last_advance_tick: now,
            active,
            end_pause: false,
        }
    }

    /// Start an empty, inactive session
    pub fn empty(now: Tick) -> Self {
        Self::new(&[], ScrollMode::Never, 0, now)
    }

    /// Whether this session scrolls
    pub fn is_scrolling(&self) -> bool {
        self.active
    }

    /// Current scroll offset in glyphs
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Message length in glyphs
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Scroll mode of this session
    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// Largest offset reachable in Auto mode
    fn max_offset(&self) -> usize {
        self.text.len().saturating_sub(VISIBLE_CHARS)
    }

    /// Cycle length in Always mode (text plus wrap gap)
    fn cycle_len(&self) -> usize {
        self.text.len() + WRAP_GAP
    }

    /// Advance the scroll position if the delay has elapsed
    ///
    /// Must be called at least as often as the scroll delay. Returns
    /// true when the visible window changed.
    pub fn tick(&mut self, now: Tick) -> bool {
        if !self.active {
            return false;
        }
        if elapsed(now, self.last_advance_tick) < self.delay_ms {
            return false;
        }
        self.last_advance_tick = now;

        match self.mode {
            ScrollMode::Always => {
                self.offset = (self.offset + 1) % self.cycle_len();
                true
            }
            ScrollMode::Auto => {
                if self.offset < self.max_offset() {
                    self.offset += 1;
                    true
                } else if !self.end_pause {
                    // Hold the final window for one full delay interval
                    self.end_pause = true;
                    false
                } else {
                    self.end_pause = false;
                    self.offset = 0;
                    true
                }
            }
            ScrollMode::Never => false,
        }
    }

    /// The 18 glyphs currently visible
    ///
    /// Static sessions are truncated or right-padded with blanks. Always
    /// mode reads circularly; positions inside the wrap gap are blank.
    pub fn window(&self) -> [u8; VISIBLE_CHARS] {
        let mut out = [BLANK_GLYPH; VISIBLE_CHARS];

        match self.mode {
            ScrollMode::Always if self.active => {
                let cycle = self.cycle_len();
                for (i, slot) in out.iter_mut().enumerate() {
                    let pos = (self.offset + i) % cycle;
                    if pos < self.text.len() {
                        *slot = self.text[pos];
                    }
                }
            }
            _ => {
                let start = self.offset.min(self.text.len());
                let end = (start + VISIBLE_CHARS).min(self.text.len());
                out[..end - start].copy_from_slice(&self.text[start..end]);
            }
        }

        out
    }
}
