//! Configuration type definitions
//!
//! These types mirror the panel's user-facing configuration surface.
//! Validation happens at load time; the drivers assume a validated
//! config.

use crate::debounce::{DEFAULT_SETTLE_MS, MAX_COLUMNS, MAX_ROWS};
use crate::scroll::ScrollMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of cascaded display boards
pub const BOARD_COUNT: usize = 3;

/// Default I2C addresses for the three boards (ADDR pin to GND/SDA/VCC)
pub const DEFAULT_BOARD_ADDRESSES: [u8; BOARD_COUNT] = [0x50, 0x5A, 0x5F];

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Rows outside 1-8
    InvalidRows,
    /// Columns outside 1-10
    InvalidColumns,
    /// Two boards share an I2C address
    DuplicateBoardAddress,
    /// Scroll delay of zero would advance every tick
    ZeroScrollDelay,
}

/// Panel configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Keypad matrix rows (1-8)
    pub rows: u8,
    /// Keypad matrix columns (1-10)
    pub columns: u8,
    /// Debounce settle window in milliseconds
    pub settle_ms: u32,
    /// I2C addresses of the three display boards, left to right
    pub board_addresses: [u8; BOARD_COUNT],
    /// Display brightness (0-255)
    pub brightness: u8,
    /// Scroll delay in milliseconds
    pub scroll_delay_ms: u32,
    /// Scroll policy
    pub scroll_mode: ScrollMode,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 10,
            settle_ms: DEFAULT_SETTLE_MS,
            board_addresses: DEFAULT_BOARD_ADDRESSES,
            brightness: 128,
            scroll_delay_ms: 250,
            scroll_mode: ScrollMode::Auto,
        }
    }
}

impl PanelConfig {
    /// Validate field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.rows as usize > MAX_ROWS {
            return Err(ConfigError::InvalidRows);
        }
        if self.columns == 0 || self.columns as usize > MAX_COLUMNS {
            return Err(ConfigError::InvalidColumns);
        }
        for i in 0..BOARD_COUNT {
            for j in (i + 1)..BOARD_COUNT {
                if self.board_addresses[i] == self.board_addresses[j] {
                    return Err(ConfigError::DuplicateBoardAddress);
                }
            }
        }
        if self.scroll_delay_ms == 0 {
            return Err(ConfigError::ZeroScrollDelay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PanelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_row_bounds() {
        let mut config = PanelConfig::default();
        config.rows = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRows));
        config.rows = 9;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRows));
        config.rows = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_column_bounds() {
        let mut config = PanelConfig::default();
        config.columns = 11;
        assert_eq!(config.validate(), Err(ConfigError::InvalidColumns));
        config.columns = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidColumns));
    }

    #[test]
    fn test_duplicate_board_address() {
        let mut config = PanelConfig::default();
        config.board_addresses = [0x50, 0x50, 0x5F];
        assert_eq!(config.validate(), Err(ConfigError::DuplicateBoardAddress));
    }

    #[test]
    fn test_zero_scroll_delay() {
        let mut config = PanelConfig::default();
        config.scroll_delay_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroScrollDelay));
    }
}
