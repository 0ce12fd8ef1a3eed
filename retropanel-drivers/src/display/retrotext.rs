//! Three-board scrolling text renderer
//!
//! Eighteen 4x6 character cells span three cascaded IS31FL3737 boards.
//! The panel is mounted upside-down, so glyph pixels are flipped across
//! both axes before they reach a board; each board then folds its 24x6
//! slice of the sign onto the chip's 12x12 matrix (left half on SW1-6,
//! right half on SW7-12).
//!
//! Cells track a dirty flag so a flush only rewrites boards whose
//! contents changed. A failed write leaves the flags set and the next
//! flush retries the same boards.

use embedded_hal::i2c::I2c;

use retropanel_core::scroll::{ScrollMode, ScrollSession, BLANK_GLYPH, VISIBLE_CHARS};
use retropanel_core::time::Tick;
use retropanel_core::traits::{DisplayError, TextDisplay};

use super::font::{glyph_row, FONT_HEIGHT, FONT_WIDTH};
use super::is31fl3737::{Is31fl3737, MATRIX_WIDTH};

/// Character cells per board
pub const CELLS_PER_BOARD: usize = 6;

const BOARD_COUNT: usize = 3;

/// Sign width in pixels (18 cells x 4 columns)
const SIGN_WIDTH: usize = VISIBLE_CHARS * FONT_WIDTH;

/// Pixels each board covers along the sign
const BOARD_PIXEL_WIDTH: usize = CELLS_PER_BOARD * FONT_WIDTH;

/// PWM value for a lit pixel; overall brightness comes from the chips'
/// global current setting
const PIXEL_ON: u8 = 255;

#[derive(Clone, Copy)]
struct DisplayCell {
    glyph: u8,
    dirty: bool,
}

/// 18-character text display over three IS31FL3737 boards
///
/// Owns the bus handle and the scroll session. Text changes and scroll
/// advances only mark cells dirty; bus traffic happens in
/// [`flush`](TextDisplay::flush).
pub struct RetroText<I2C> {
    bus: I2C,
    boards: [Is31fl3737; BOARD_COUNT],
    cells: [DisplayCell; VISIBLE_CHARS],
    session: ScrollSession,
    scroll_delay_ms: u32,
    brightness: u8,
    initialized: bool,
}

impl<I2C: I2c> RetroText<I2C> {
    /// Create the display with board addresses in physical order
    /// (rightmost third of the sign first)
    pub fn new(bus: I2C, addresses: [u8; BOARD_COUNT], brightness: u8, scroll_delay_ms: u32) -> Self {
        Self {
            bus,
            boards: [
                Is31fl3737::new(addresses[0]),
                Is31fl3737::new(addresses[1]),
                Is31fl3737::new(addresses[2]),
            ],
            cells: [DisplayCell {
                glyph: BLANK_GLYPH,
                dirty: false,
            }; VISIBLE_CHARS],
            session: ScrollSession::empty(0),
            scroll_delay_ms,
            brightness,
            initialized: false,
        }
    }

    /// Reset and configure all three boards
    ///
    /// Global current is set to half the configured brightness; the
    /// chips run hot at full current.
    pub fn initialize(&mut self) -> Result<(), DisplayError> {
        let current = self.brightness / 2;
        for board in self.boards.iter_mut() {
            board
                .begin(&mut self.bus)
                .map_err(|_| DisplayError::Transport)?;
            board
                .set_global_current(&mut self.bus, current)
                .map_err(|_| DisplayError::Transport)?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Whether the current message is scrolling
    pub fn is_scrolling(&self) -> bool {
        self.session.is_scrolling()
    }

    /// Release the bus handle
    pub fn release(self) -> I2C {
        self.bus
    }

    /// Compare the visible window against the cells and mark changes
    fn render(&mut self) {
        let window = self.session.window();
        for (cell, glyph) in self.cells.iter_mut().zip(window.iter()) {
            if cell.glyph != *glyph {
                cell.glyph = *glyph;
                cell.dirty = true;
            }
        }
    }

    /// Physical board holding a cell
    ///
    /// The upside-down mount reverses board order relative to reading
    /// order: cell 0 renders on the last board.
    fn board_for_cell(cell: usize) -> usize {
        BOARD_COUNT - 1 - cell / CELLS_PER_BOARD
    }

    /// Rebuild one board's shadow buffer from the cells it holds
    fn rebuild_board(&mut self, board: usize) {
        self.boards[board].clear();
        for (index, cell) in self.cells.iter().enumerate() {
            if Self::board_for_cell(index) != board {
                continue;
            }
            let origin = index * FONT_WIDTH;
            for row in 0..FONT_HEIGHT {
                let bits = glyph_row(cell.glyph, row);
                for col in 0..FONT_WIDTH {
                    if bits & (0x10 << col) == 0 {
                        continue;
                    }
                    let x = origin + (FONT_WIDTH - 1 - col);
                    let (px, py) = Self::map_pixel(x, row);
                    self.boards[board].set_pixel(px, py, PIXEL_ON);
                }
            }
        }
    }

    /// Map a sign pixel to board-local matrix coordinates
    ///
    /// Flips both axes for the upside-down mount, then folds the
    /// board's 24x6 slice onto the 12x12 matrix: columns 12-23 move to
    /// rows 6-11.
    fn map_pixel(x: usize, y: usize) -> (usize, usize) {
        let sx = SIGN_WIDTH - 1 - x;
        let sy = FONT_HEIGHT - 1 - y;
        let local_x = sx % BOARD_PIXEL_WIDTH;
        if local_x < MATRIX_WIDTH {
            (local_x, sy)
        } else {
            (local_x - MATRIX_WIDTH, sy + FONT_HEIGHT)
        }
    }
}

impl<I2C: I2c> TextDisplay for RetroText<I2C> {
    fn set_text(&mut self, text: &str, mode: ScrollMode, now: Tick) {
        self.session = ScrollSession::new(text.as_bytes(), mode, self.scroll_delay_ms, now);
        self.render();
    }

    fn tick(&mut self, now: Tick) {
        if self.session.tick(now) {
            self.render();
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        for board in 0..BOARD_COUNT {
            let dirty = self
                .cells
                .iter()
                .enumerate()
                .any(|(index, cell)| cell.dirty && Self::board_for_cell(index) == board);
            if !dirty {
                continue;
            }
            self.rebuild_board(board);
            self.boards[board]
                .show(&mut self.bus)
                .map_err(|_| DisplayError::Transport)?;
            for (index, cell) in self.cells.iter_mut().enumerate() {
                if Self::board_for_cell(index) == board {
                    cell.dirty = false;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.session = ScrollSession::empty(0);
        for cell in self.cells.iter_mut() {
            if cell.glyph != BLANK_GLYPH {
                cell.glyph = BLANK_GLYPH;
                cell.dirty = true;
            }
        }
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    const ADDRESSES: [u8; 3] = [0x50, 0x5A, 0x5F];
    const DELAY: u32 = 100;

    struct Inner {
        writes: heapless::Vec<(u8, heapless::Vec<u8, 72>), 256>,
        failing: bool,
    }

    /// Logs writes per address; can be switched to fail every transfer
    struct FlakyBus {
        inner: RefCell<Inner>,
    }

    impl FlakyBus {
        fn new() -> Self {
            Self {
                inner: RefCell::new(Inner {
                    writes: heapless::Vec::new(),
                    failing: false,
                }),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.inner.borrow_mut().failing = failing;
        }

        fn clear_log(&self) {
            self.inner.borrow_mut().writes.clear();
        }

        /// PWM bursts (65-byte writes) sent to an address
        fn bursts_to(&self, address: u8) -> heapless::Vec<heapless::Vec<u8, 72>, 8> {
            self.inner
                .borrow()
                .writes
                .iter()
                .filter(|(a, w)| *a == address && w.len() == 65)
                .map(|(_, w)| w.clone())
                .collect()
        }
    }

    impl ErrorType for &FlakyBus {
        type Error = ErrorKind;
    }

    impl embedded_hal::i2c::I2c for &FlakyBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            let mut inner = self.inner.borrow_mut();
            if inner.failing {
                return Err(ErrorKind::Other);
            }
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        let mut copy = heapless::Vec::new();
                        copy.extend_from_slice(bytes).unwrap();
                        inner.writes.push((address, copy)).unwrap();
                    }
                    Operation::Read(buf) => buf.fill(0),
                }
            }
            Ok(())
        }
    }

    fn ready_display(bus: &FlakyBus) -> RetroText<&FlakyBus> {
        let mut display = RetroText::new(bus, ADDRESSES, 128, DELAY);
        display.initialize().unwrap();
        bus.clear_log();
        display
    }

    #[test]
    fn test_flush_before_initialize_fails() {
        let bus = FlakyBus::new();
        let mut display = RetroText::new(&bus, ADDRESSES, 128, DELAY);
        display.set_text("HELLO", ScrollMode::Never, 0);
        assert_eq!(display.flush(), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_short_text_touches_only_its_board() {
        let bus = FlakyBus::new();
        let mut display = ready_display(&bus);

        // Cells 0-2 live on the last physical board (0x5F)
        display.set_text("ABC", ScrollMode::Never, 0);
        display.flush().unwrap();

        assert_eq!(bus.bursts_to(0x5F).len(), 3);
        assert!(bus.bursts_to(0x5A).is_empty());
        assert!(bus.bursts_to(0x50).is_empty());
    }

    #[test]
    fn test_flush_without_changes_is_silent() {
        let bus = FlakyBus::new();
        let mut display = ready_display(&bus);

        display.set_text("STATIC", ScrollMode::Never, 0);
        display.flush().unwrap();
        bus.clear_log();

        display.tick(DELAY * 4);
        display.flush().unwrap();
        assert!(bus.inner.borrow().writes.is_empty());
    }

    #[test]
    fn test_failed_flush_preserves_dirty_cells() {
        let bus = FlakyBus::new();
        let mut display = ready_display(&bus);

        display.set_text("RETRY", ScrollMode::Never, 0);
        bus.set_failing(true);
        assert_eq!(display.flush(), Err(DisplayError::Transport));

        bus.set_failing(false);
        bus.clear_log();
        display.flush().unwrap();
        assert_eq!(bus.bursts_to(0x5F).len(), 3);
    }

    #[test]
    fn test_scroll_advance_rewrites_all_boards() {
        let bus = FlakyBus::new();
        let mut display = ready_display(&bus);

        display.set_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", ScrollMode::Auto, 0);
        assert!(display.is_scrolling());
        display.flush().unwrap();
        bus.clear_log();

        // Every cell shifts by one glyph
        display.tick(DELAY);
        display.flush().unwrap();
        for address in ADDRESSES {
            assert_eq!(bus.bursts_to(address).len(), 3);
        }
    }

    #[test]
    fn test_glyph_pixels_flipped_onto_last_board() {
        let bus = FlakyBus::new();
        let mut display = ready_display(&bus);

        // 'T' top bar occupies sign pixels (0,0)-(2,0); flipped they
        // land on the last board's second half, row 11, columns 9-11.
        // CS10-CS12 remap to registers 11-13 of row 11.
        display.set_text("T", ScrollMode::Never, 0);
        display.flush().unwrap();

        let bursts = bus.bursts_to(0x5F);
        let last = bursts
            .iter()
            .find(|w| w[0] == 128)
            .expect("third chunk present");
        for register in [11 * 16 + 11, 11 * 16 + 12, 11 * 16 + 13] {
            assert_eq!(last[register - 128 + 1], PIXEL_ON);
        }
    }

    #[test]
    fn test_clear_blanks_displayed_boards() {
        let bus = FlakyBus::new();
        let mut display = ready_display(&bus);

        display.set_text("WXYZ", ScrollMode::Never, 0);
        display.flush().unwrap();
        bus.clear_log();

        display.clear().unwrap();
        assert!(!display.is_scrolling());
        let bursts = bus.bursts_to(0x5F);
        assert_eq!(bursts.len(), 3);
        // Everything back to zero
        for burst in bursts.iter() {
            assert!(burst[1..].iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn test_set_text_restarts_scroll() {
        let bus = FlakyBus::new();
        let mut display = ready_display(&bus);

        display.set_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", ScrollMode::Auto, 0);
        display.tick(DELAY);
        display.set_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", ScrollMode::Auto, DELAY);
        display.flush().unwrap();
        bus.clear_log();

        // Fresh session: nothing advances until a full delay elapses
        display.tick(DELAY + 1);
        display.flush().unwrap();
        assert!(bus.inner.borrow().writes.is_empty());
    }
}
