//! Property tests for the scroll session invariants

use proptest::prelude::*;
use retropanel_core::scroll::{ScrollMode, ScrollSession, MAX_TEXT_LEN, VISIBLE_CHARS};

const DELAY: u32 = 100;

fn sample_text(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'A' + (i % 26) as u8).collect()
}

proptest! {
    /// In Auto mode the offset never exceeds len - 18
    #[test]
    fn auto_offset_never_exceeds_bound(
        len in (VISIBLE_CHARS + 1)..MAX_TEXT_LEN,
        ticks in 1u32..200,
    ) {
        let text = sample_text(len);
        let mut s = ScrollSession::new(&text, ScrollMode::Auto, DELAY, 0);
        let max = len - VISIBLE_CHARS;
        for t in 1..=ticks {
            s.tick(t * DELAY);
            prop_assert!(s.offset() <= max);
        }
    }

    /// The Auto window is always exactly text[offset..offset + 18]
    #[test]
    fn auto_window_matches_text_at_offset(
        len in (VISIBLE_CHARS + 1)..64usize,
        ticks in 0u32..100,
    ) {
        let text = sample_text(len);
        let mut s = ScrollSession::new(&text, ScrollMode::Auto, DELAY, 0);
        for t in 1..=ticks {
            s.tick(t * DELAY);
        }
        let off = s.offset();
        prop_assert_eq!(&s.window()[..], &text[off..off + VISIBLE_CHARS]);
    }

    /// A full Auto cycle visits every offset and returns to 0 after the
    /// end pause
    #[test]
    fn auto_cycle_returns_to_start(len in (VISIBLE_CHARS + 1)..48usize) {
        let text = sample_text(len);
        let mut s = ScrollSession::new(&text, ScrollMode::Auto, DELAY, 0);
        let max = len - VISIBLE_CHARS;

        let mut now = 0;
        for expected in 1..=max {
            now += DELAY;
            prop_assert!(s.tick(now));
            prop_assert_eq!(s.offset(), expected);
        }
        // End pause consumes one full interval without movement
        now += DELAY;
        prop_assert!(!s.tick(now));
        prop_assert_eq!(s.offset(), max);
        // Then the cycle restarts
        now += DELAY;
        prop_assert!(s.tick(now));
        prop_assert_eq!(s.offset(), 0);
    }

    /// Always mode windows are always fully populated (text or gap blanks)
    #[test]
    fn always_window_is_full_width(len in 1usize..40, ticks in 0u32..60) {
        let text = sample_text(len);
        let mut s = ScrollSession::new(&text, ScrollMode::Always, DELAY, 0);
        for t in 1..=ticks {
            s.tick(t * DELAY);
        }
        let window = s.window();
        prop_assert_eq!(window.len(), VISIBLE_CHARS);
        for glyph in window {
            prop_assert!(glyph == b' ' || glyph.is_ascii_uppercase());
        }
    }
}
