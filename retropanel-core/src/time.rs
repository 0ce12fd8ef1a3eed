//! Monotonic tick arithmetic
//!
//! The control loop hands every operation a millisecond tick taken from
//! the host's monotonic clock. Ticks wrap at `u32::MAX`; all comparisons
//! go through [`elapsed`] so wrap-around is handled uniformly.

/// Monotonic millisecond tick
pub type Tick = u32;

/// Milliseconds elapsed between `since` and `now`, wrap-safe
#[inline]
pub fn elapsed(now: Tick, since: Tick) -> u32 {
    now.wrapping_sub(since)
}
