//! TCA8418 I2C keypad matrix controller
//!
//! The chip scans up to an 8x10 matrix and queues raw press/release
//! transitions in a 10-entry FIFO. This driver drains the FIFO, runs the
//! transitions through the debounce filter and emits confirmed
//! [`KeyEvent`]s, dispatching any registered triggers.
//!
//! Event byte format (confirmed against hardware; some library headers
//! document it backwards):
//! - Bit 7: 1 = press, 0 = release
//! - Bits 6-0: 1-based key code, `row * 10 + column + 1` (0x01-0x50)

use embedded_hal::i2c::I2c;

use retropanel_core::debounce::{DebounceFilter, DEFAULT_SETTLE_MS, MAX_COLUMNS, MAX_ROWS};
use retropanel_core::event::{EventQueue, KeyEvent};
use retropanel_core::time::Tick;
use retropanel_core::traits::{InitError, KeypadScanner, ScanError};
use retropanel_core::trigger::{TriggerError, TriggerTable};

/// Fixed TCA8418 I2C address
pub const DEFAULT_KEYPAD_ADDRESS: u8 = 0x34;

/// FIFO depth; at most this many raw events are drained per poll
pub const MAX_FIFO_EVENTS: u8 = 10;

/// Transport read retries before latching a fault (initial try + 3)
pub const READ_RETRIES: u8 = 3;

// Register map
const REG_CFG: u8 = 0x01;
const REG_INT_STAT: u8 = 0x02;
const REG_KEY_LCK_EC: u8 = 0x03;
const REG_KEY_EVENT_A: u8 = 0x04;
const REG_GPIO_DAT_STAT_1: u8 = 0x14;
const REG_GPIO_DAT_STAT_2: u8 = 0x15;
const REG_GPIO_DAT_STAT_3: u8 = 0x16;
const REG_KP_GPIO_1: u8 = 0x1D;
const REG_KP_GPIO_2: u8 = 0x1E;
const REG_KP_GPIO_3: u8 = 0x1F;
const REG_GPI_EM_1: u8 = 0x20;
const REG_GPI_EM_2: u8 = 0x21;
const REG_GPI_EM_3: u8 = 0x22;
const REG_GPIO_DIR_1: u8 = 0x23;
const REG_GPIO_DIR_2: u8 = 0x24;
const REG_GPIO_DIR_3: u8 = 0x25;

// CFG register bits
const CFG_KE_IEN: u8 = 0x01;
const CFG_OVR_FLOW_IEN: u8 = 0x08;

// INT_STAT register bits
const INT_STAT_K_INT: u8 = 0x01;
const INT_STAT_OVR_FLOW: u8 = 0x08;

// Event count bits in KEY_LCK_EC
const EVENT_COUNT_MASK: u8 = 0x0F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum State {
    Uninitialized,
    Ready,
    Faulted,
}

/// Decode a FIFO event byte into (pressed, row, column)
///
/// Returns None for the empty marker (0x00) and for GPI events outside
/// the matrix key-code range.
fn decode_event(raw: u8) -> Option<(bool, u8, u8)> {
    let pressed = raw & 0x80 != 0;
    let code = raw & 0x7F;
    if code == 0 || code > 0x50 {
        return None;
    }
    let index = code - 1;
    Some((pressed, index / 10, index % 10))
}

/// TCA8418 keypad scanner
///
/// State machine: Uninitialized -> Ready -> Faulted (terminal until
/// reinitialized). Transport reads are retried up to [`READ_RETRIES`]
/// times; exhausting the retries latches `Faulted` and subsequent polls
/// return empty without touching the bus.
pub struct Tca8418<'t, I2C> {
    i2c: I2C,
    address: u8,
    settle_ms: u32,
    rows: u8,
    columns: u8,
    filter: DebounceFilter,
    triggers: TriggerTable<'t>,
    state: State,
}

impl<'t, I2C: I2c> Tca8418<'t, I2C> {
    /// Create a scanner on the shared bus
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_KEYPAD_ADDRESS)
    }

    /// Create a scanner with a non-default address (address translator)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            settle_ms: DEFAULT_SETTLE_MS,
            rows: 0,
            columns: 0,
            filter: DebounceFilter::new(0, 0, DEFAULT_SETTLE_MS),
            triggers: TriggerTable::new(),
            state: State::Uninitialized,
        }
    }

    /// Override the debounce settle window (before `initialize`)
    pub fn set_settle_ms(&mut self, settle_ms: u32) {
        self.settle_ms = settle_ms;
    }

    /// Register a callback for confirmed presses on a cell
    ///
    /// Multiple observers per cell are allowed; dispatch follows
    /// registration order.
    pub fn register_press_trigger(
        &mut self,
        row: u8,
        column: u8,
        callback: &'t mut (dyn FnMut(&KeyEvent) + 't),
    ) -> Result<(), TriggerError> {
        self.triggers.on_press(row, column, callback)
    }

    /// Register a callback for confirmed releases on a cell
    pub fn register_release_trigger(
        &mut self,
        row: u8,
        column: u8,
        callback: &'t mut (dyn FnMut(&KeyEvent) + 't),
    ) -> Result<(), TriggerError> {
        self.triggers.on_release(row, column, callback)
    }

    /// Release the bus handle
    pub fn release(self) -> I2C {
        self.i2c
    }

    // Init-path register access: a single failure aborts initialization
    fn init_read(&mut self, reg: u8) -> Result<u8, InitError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| InitError::Transport)?;
        Ok(buf[0])
    }

    fn init_write(&mut self, reg: u8, value: u8) -> Result<(), InitError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| InitError::Transport)
    }

    // Poll-path register access: bounded retries, then latch Faulted
    fn scan_read(&mut self, reg: u8) -> Result<u8, ScanError> {
        let mut buf = [0u8; 1];
        for _ in 0..=READ_RETRIES {
            if self
                .i2c
                .write_read(self.address, &[reg], &mut buf)
                .is_ok()
            {
                return Ok(buf[0]);
            }
        }
        self.state = State::Faulted;
        Err(ScanError::Transport)
    }

    fn scan_write(&mut self, reg: u8, value: u8) -> Result<(), ScanError> {
        for _ in 0..=READ_RETRIES {
            if self.i2c.write(self.address, &[reg, value]).is_ok() {
                return Ok(());
            }
        }
        self.state = State::Faulted;
        Err(ScanError::Transport)
    }

    /// Verify the device answers on the bus
    fn detect_device(&mut self) -> Result<(), InitError> {
        self.init_read(REG_CFG)?;
        self.init_read(REG_INT_STAT)?;
        Ok(())
    }

    /// Program matrix size and interrupt configuration
    fn configure_matrix(&mut self) -> Result<(), InitError> {
        // All pins as inputs
        self.init_write(REG_GPIO_DIR_1, 0x00)?;
        self.init_write(REG_GPIO_DIR_2, 0x00)?;
        self.init_write(REG_GPIO_DIR_3, 0x00)?;

        // GPI event mode for all pins
        self.init_write(REG_GPI_EM_1, 0xFF)?;
        self.init_write(REG_GPI_EM_2, 0xFF)?;
        self.init_write(REG_GPI_EM_3, 0xFF)?;

        // KP_GPIO selection: register 1 = ROW0-7, register 2 = COL0-7,
        // register 3 = COL8-9
        let row_mask = mask_low_bits(self.rows);
        let col_mask_low = mask_low_bits(self.columns.min(8));
        let col_mask_high = mask_low_bits(self.columns.saturating_sub(8));

        self.init_write(REG_KP_GPIO_1, row_mask)?;
        self.init_write(REG_KP_GPIO_2, col_mask_low)?;
        if self.columns > 8 {
            self.init_write(REG_KP_GPIO_3, col_mask_high)?;
        }

        // Key event + FIFO overflow interrupts
        self.init_write(REG_CFG, CFG_KE_IEN | CFG_OVR_FLOW_IEN)
    }

    /// Drain and discard everything in the FIFO
    fn flush_fifo(&mut self) -> Result<(), ScanError> {
        // FIFO holds 10; a small margin covers events arriving mid-flush
        for _ in 0..(2 * MAX_FIFO_EVENTS) {
            if self.scan_read(REG_KEY_EVENT_A)? == 0 {
                break;
            }
        }
        self.scan_write(REG_INT_STAT, INT_STAT_K_INT | INT_STAT_OVR_FLOW)
    }

    /// Reseed the debounce filter from a level snapshot
    ///
    /// The FIFO is edge-based, so a key held across an overflow flush
    /// would otherwise never re-report. The GPIO data-status registers
    /// give a snapshot of active rows/columns; pairing is unambiguous
    /// while only one row or only one column is active, so every held
    /// key in such a snapshot is reseeded. With two or more of each the
    /// pairs cannot be recovered (matrix ghosting) and reseeding is
    /// skipped.
    fn reseed_held_keys(&mut self, now: Tick) -> Result<(), ScanError> {
        let row_bits = self.scan_read(REG_GPIO_DAT_STAT_1)? & mask_low_bits(self.rows);
        let col_low = self.scan_read(REG_GPIO_DAT_STAT_2)? & mask_low_bits(self.columns.min(8));
        let col_high = if self.columns > 8 {
            self.scan_read(REG_GPIO_DAT_STAT_3)? & mask_low_bits(self.columns - 8)
        } else {
            0
        };
        let col_bits = (col_low as u16) | ((col_high as u16) << 8);

        if row_bits == 0 || col_bits == 0 {
            return Ok(());
        }
        if row_bits.count_ones() > 1 && col_bits.count_ones() > 1 {
            return Ok(());
        }
        for row in 0..self.rows {
            if row_bits & (1 << row) == 0 {
                continue;
            }
            for column in 0..self.columns {
                if col_bits & (1 << column) == 0 {
                    continue;
                }
                self.filter.record(row, column, true, now);
            }
        }
        Ok(())
    }

    /// Clear stale state after a FIFO overrun
    ///
    /// Transitions whose settle window already elapsed are confirmed,
    /// not stale: they are collected into `events` (and dispatched)
    /// before the filter state is dropped.
    fn resync(&mut self, now: Tick, events: &mut EventQueue) -> Result<(), ScanError> {
        self.flush_fifo()?;
        let first_new = events.len();
        self.filter.collect(now, events);
        for event in &events[first_new..] {
            self.triggers.dispatch(event);
        }
        self.filter.reset();
        self.reseed_held_keys(now)
    }
}

impl<I2C: I2c> KeypadScanner for Tca8418<'_, I2C> {
    fn initialize(&mut self, rows: u8, columns: u8) -> Result<(), InitError> {
        if rows == 0 || rows as usize > MAX_ROWS || columns == 0 || columns as usize > MAX_COLUMNS
        {
            return Err(InitError::UnsupportedSize);
        }
        self.rows = rows;
        self.columns = columns;
        self.state = State::Uninitialized;

        self.detect_device()?;
        self.configure_matrix()?;

        // Discard events queued before initialization
        for _ in 0..(2 * MAX_FIFO_EVENTS) {
            if self.init_read(REG_KEY_EVENT_A)? == 0 {
                break;
            }
        }
        self.init_write(REG_INT_STAT, INT_STAT_K_INT | INT_STAT_OVR_FLOW)?;

        self.filter = DebounceFilter::new(rows, columns, self.settle_ms);
        self.state = State::Ready;
        Ok(())
    }

    fn poll(&mut self, now: Tick, events: &mut EventQueue) -> Result<(), ScanError> {
        if self.state != State::Ready {
            // Inert until (re)initialized
            return Ok(());
        }

        let int_stat = self.scan_read(REG_INT_STAT)?;

        if int_stat & INT_STAT_OVR_FLOW != 0 {
            self.resync(now, events)?;
            return Err(ScanError::Overflow);
        }

        if int_stat & INT_STAT_K_INT != 0 {
            let count = (self.scan_read(REG_KEY_LCK_EC)? & EVENT_COUNT_MASK).min(MAX_FIFO_EVENTS);
            for _ in 0..count {
                let raw = self.scan_read(REG_KEY_EVENT_A)?;
                if raw == 0 {
                    break;
                }
                if let Some((pressed, row, column)) = decode_event(raw) {
                    self.filter.record(row, column, pressed, now);
                }
            }
            self.scan_write(REG_INT_STAT, INT_STAT_K_INT)?;
        }

        let first_new = events.len();
        self.filter.collect(now, events);
        for event in &events[first_new..] {
            self.triggers.dispatch(event);
        }
        Ok(())
    }

    fn is_faulted(&self) -> bool {
        self.state == State::Faulted
    }
}

/// Mask with the lowest `n` bits set
fn mask_low_bits(n: u8) -> u8 {
    if n >= 8 {
        0xFF
    } else {
        (1u8 << n) - 1
    }
}
