//! Link timing configuration
//!
//! All protocol timing is derived from the serial line configuration; there
//! are no independently tunable timeouts.

use antiphon_hal::SerialConfig;

/// Configuration for one link endpoint
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Serial line parameters (baud rate drives all timing)
    pub serial: SerialConfig,
}

impl LinkConfig {
    /// Create a configuration from serial line parameters
    pub fn new(serial: SerialConfig) -> Self {
        Self { serial }
    }

    /// Pause inserted after each transmitted byte, in microseconds
    ///
    /// Sized to let the receiving UART clear two character slots before the
    /// next byte arrives, so a slow peer never overruns.
    pub fn inter_byte_delay_us(&self) -> u32 {
        2 * (10_000_000 / self.serial.baudrate)
    }

    /// Overall budget for one multi-step exchange, in milliseconds
    ///
    /// Three character times per frame byte at the configured baud rate,
    /// never less than one clock tick.
    pub fn exchange_budget_ms(&self, frame_len: usize) -> u32 {
        // Multiply before dividing: the per-character quotient truncates to
        // zero above 100 kBd.
        let budget_us = frame_len as u64 * 3 * 100_000 / self.serial.baudrate as u64;
        ((budget_us / 1000) as u32).max(1)
    }
}
