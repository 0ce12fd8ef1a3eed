//! IS31FL3737 12x12 LED matrix driver
//!
//! Register access is paged: writes to the unlock register followed by
//! the command register select one of four pages (LED control, PWM,
//! auto-breath, function). The PWM page is a 12-row buffer with a
//! 16-byte stride, pushed with auto-increment burst writes.
//!
//! The driver state does not own the bus; the panel shares one bus
//! across three boards and the keypad controller, so the bus handle is
//! passed into each call.

use embedded_hal::i2c::I2c;

// Special registers
const REG_UNLOCK: u8 = 0xFE;
const REG_COMMAND: u8 = 0xFD;
const UNLOCK_VALUE: u8 = 0xC5;

// Pages
const PAGE_LED_CTRL: u8 = 0x00;
const PAGE_PWM: u8 = 0x01;
const PAGE_FUNCTION: u8 = 0x03;

// Function page registers
const REG_CONFIG: u8 = 0x00;
const REG_GLOBAL_CURRENT: u8 = 0x01;
const REG_RESET: u8 = 0x11;

// Configuration register: SSD=1 leaves software shutdown
const CONFIG_SSD: u8 = 0x01;

/// Logical matrix width in pixels
pub const MATRIX_WIDTH: usize = 12;

/// Logical matrix height in pixels
pub const MATRIX_HEIGHT: usize = 12;

/// Columns per row in PWM register space
const REGISTER_STRIDE: usize = 16;

/// Hardware PWM register span (12 rows x 16-byte stride)
const HW_REGISTER_SIZE: usize = MATRIX_HEIGHT * REGISTER_STRIDE;

/// Burst chunk size; keeps each transaction under typical controller
/// buffer limits (chunk + 1 address byte)
const CHUNK_SIZE: usize = 64;

/// One IS31FL3737 board
///
/// Holds the PWM shadow buffer and the board's I2C address. All bus
/// traffic goes through the handle passed per call.
pub struct Is31fl3737 {
    address: u8,
    pwm: [u8; MATRIX_WIDTH * MATRIX_HEIGHT],
    global_current: u8,
    initialized: bool,
}

impl Is31fl3737 {
    /// Create a board at the given I2C address (not yet initialized)
    pub fn new(address: u8) -> Self {
        Self {
            address,
            pwm: [0; MATRIX_WIDTH * MATRIX_HEIGHT],
            global_current: 128,
            initialized: false,
        }
    }

    /// Board I2C address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Whether `begin` completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reset and configure the chip for normal operation
    pub fn begin<I2C: I2c>(&mut self, bus: &mut I2C) -> Result<(), I2C::Error> {
        self.reset(bus)?;
        self.enable_all_leds(bus)?;
        self.configure_function_page(bus)?;
        self.clear();

        // Leave the chip on the PWM page for normal operation
        self.select_page(bus, PAGE_PWM)?;
        self.initialized = true;
        Ok(())
    }

    /// Software reset (reading the reset register clears the chip)
    pub fn reset<I2C: I2c>(&mut self, bus: &mut I2C) -> Result<(), I2C::Error> {
        self.select_page(bus, PAGE_FUNCTION)?;
        let mut dummy = [0u8; 1];
        bus.write_read(self.address, &[REG_RESET], &mut dummy)?;
        self.initialized = false;
        Ok(())
    }

    fn enable_all_leds<I2C: I2c>(&mut self, bus: &mut I2C) -> Result<(), I2C::Error> {
        self.select_page(bus, PAGE_LED_CTRL)?;
        // LED on/off control registers 0x00-0x17, 8 LEDs per register
        for reg in 0x00..=0x17 {
            self.write_register(bus, reg, 0xFF)?;
        }
        Ok(())
    }

    fn configure_function_page<I2C: I2c>(&mut self, bus: &mut I2C) -> Result<(), I2C::Error> {
        self.select_page(bus, PAGE_FUNCTION)?;
        self.write_register(bus, REG_CONFIG, CONFIG_SSD)?;
        self.write_register(bus, REG_GLOBAL_CURRENT, self.global_current)
    }

    /// Zero the PWM shadow buffer (hardware unchanged until `show`)
    pub fn clear(&mut self) {
        self.pwm = [0; MATRIX_WIDTH * MATRIX_HEIGHT];
    }

    /// Set one pixel's PWM value in the shadow buffer
    pub fn set_pixel(&mut self, x: usize, y: usize, brightness: u8) {
        if x >= MATRIX_WIDTH || y >= MATRIX_HEIGHT {
            return;
        }
        self.pwm[y * MATRIX_WIDTH + x] = brightness;
    }

    /// Read back a pixel from the shadow buffer
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        if x >= MATRIX_WIDTH || y >= MATRIX_HEIGHT {
            return 0;
        }
        self.pwm[y * MATRIX_WIDTH + x]
    }

    /// Update the global current control (brightness)
    pub fn set_global_current<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
        current: u8,
    ) -> Result<(), I2C::Error> {
        self.global_current = current;
        if self.initialized {
            self.select_page(bus, PAGE_FUNCTION)?;
            self.write_register(bus, REG_GLOBAL_CURRENT, current)?;
            self.select_page(bus, PAGE_PWM)?;
        }
        Ok(())
    }

    /// Push the shadow buffer to the chip
    ///
    /// Maps the 12x12 logical buffer into the 16-byte-stride register
    /// layout and writes it in auto-increment bursts.
    pub fn show<I2C: I2c>(&mut self, bus: &mut I2C) -> Result<(), I2C::Error> {
        self.select_page(bus, PAGE_PWM)?;

        let mut hw = [0u8; HW_REGISTER_SIZE];
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                hw[register_offset(x, y)] = self.pwm[y * MATRIX_WIDTH + x];
            }
        }

        let mut written = 0;
        while written < HW_REGISTER_SIZE {
            let len = (HW_REGISTER_SIZE - written).min(CHUNK_SIZE);
            let mut chunk = [0u8; CHUNK_SIZE + 1];
            chunk[0] = written as u8; // starting register, auto-increments
            chunk[1..=len].copy_from_slice(&hw[written..written + len]);
            bus.write(self.address, &chunk[..=len])?;
            written += len;
        }
        Ok(())
    }

    fn select_page<I2C: I2c>(&mut self, bus: &mut I2C, page: u8) -> Result<(), I2C::Error> {
        bus.write(self.address, &[REG_UNLOCK, UNLOCK_VALUE])?;
        bus.write(self.address, &[REG_COMMAND, page])
    }

    fn write_register<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
        reg: u8,
        value: u8,
    ) -> Result<(), I2C::Error> {
        bus.write(self.address, &[reg, value])
    }
}

/// PWM register offset for a logical pixel
///
/// Hardware quirk: CS7-CS12 (1-based) are remapped to CS9-CS14 in
/// register space, leaving a two-column hole after CS6.
fn register_offset(x: usize, y: usize) -> usize {
    let mut cs = x + 1;
    if (7..=12).contains(&cs) {
        cs += 2;
    }
    y * REGISTER_STRIDE + (cs - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Records every write as (address, bytes); reads return zero
    struct WriteLog {
        inner: RefCell<heapless::Vec<(u8, heapless::Vec<u8, 72>), 128>>,
    }

    impl WriteLog {
        fn new() -> Self {
            Self {
                inner: RefCell::new(heapless::Vec::new()),
            }
        }

        fn writes(&self) -> heapless::Vec<(u8, heapless::Vec<u8, 72>), 128> {
            self.inner.borrow().clone()
        }
    }

    impl ErrorType for &WriteLog {
        type Error = ErrorKind;
    }

    impl embedded_hal::i2c::I2c for &WriteLog {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        let mut copy = heapless::Vec::new();
                        copy.extend_from_slice(bytes).unwrap();
                        self.inner.borrow_mut().push((address, copy)).unwrap();
                    }
                    Operation::Read(buf) => buf.fill(0),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_register_offset_remaps_upper_columns() {
        // CS1-CS6 map straight through
        assert_eq!(register_offset(0, 0), 0);
        assert_eq!(register_offset(5, 0), 5);
        // CS7 onward shift by two register columns
        assert_eq!(register_offset(6, 0), 8);
        assert_eq!(register_offset(11, 0), 13);
        // Row stride is 16
        assert_eq!(register_offset(0, 1), 16);
        assert_eq!(register_offset(11, 11), 11 * 16 + 13);
    }

    #[test]
    fn test_begin_configures_chip() {
        let log = WriteLog::new();
        let mut bus = &log;
        let mut board = Is31fl3737::new(0x50);
        board.begin(&mut bus).unwrap();
        assert!(board.is_initialized());

        let writes = log.writes();
        // Page selects always unlock first
        assert!(writes
            .iter()
            .any(|(_, w)| w.as_slice() == [REG_UNLOCK, UNLOCK_VALUE]));
        // All 24 LED control registers enabled
        let led_enables = writes
            .iter()
            .filter(|(_, w)| w.len() == 2 && w[1] == 0xFF && w[0] <= 0x17)
            .count();
        assert!(led_enables >= 24);
        // Normal operation + default current
        assert!(writes
            .iter()
            .any(|(_, w)| w.as_slice() == [REG_CONFIG, CONFIG_SSD]));
        assert!(writes
            .iter()
            .any(|(_, w)| w.as_slice() == [REG_GLOBAL_CURRENT, 128]));
    }

    #[test]
    fn test_show_writes_full_pwm_page_in_chunks() {
        let log = WriteLog::new();
        let mut bus = &log;
        let mut board = Is31fl3737::new(0x5A);
        board.set_pixel(0, 0, 200);
        board.set_pixel(6, 2, 77);
        board.show(&mut bus).unwrap();

        let writes = log.writes();
        // 192 register bytes in 64-byte chunks = 3 bursts (+ page select)
        let bursts: heapless::Vec<_, 8> = writes
            .iter()
            .filter(|(_, w)| w.len() == CHUNK_SIZE + 1)
            .collect();
        assert_eq!(bursts.len(), 3);
        assert_eq!(bursts[0].1[0], 0);
        assert_eq!(bursts[1].1[0], 64);
        assert_eq!(bursts[2].1[0], 128);

        // Pixel (0,0) lands at register 0 (first data byte of burst 0)
        assert_eq!(bursts[0].1[1], 200);
        // Pixel (6,2) remaps to CS9: register 2*16 + 8 = 40
        assert_eq!(bursts[0].1[1 + 40], 77);
    }

    #[test]
    fn test_set_pixel_bounds_checked() {
        let mut board = Is31fl3737::new(0x50);
        board.set_pixel(12, 0, 255);
        board.set_pixel(0, 12, 255);
        for y in 0..MATRIX_HEIGHT {
            for x in 0..MATRIX_WIDTH {
                assert_eq!(board.pixel(x, y), 0);
            }
        }
    }

    #[test]
    fn test_clear_zeroes_shadow_buffer() {
        let mut board = Is31fl3737::new(0x50);
        board.set_pixel(3, 3, 42);
        board.clear();
        assert_eq!(board.pixel(3, 3), 0);
    }
}
