//! UART channel interface trait
//!
//! This module defines the byte-oriented UART interface that platform
//! implementations must provide. The interface is deliberately unbuffered:
//! a channel holds at most one pending received byte, matching the hardware
//! receive register it abstracts.

use crate::platform::{
    error::{PlatformError, UartError},
    Result,
};

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Data bits (typically 8)
    pub data_bits: u8,
    /// Parity mode
    pub parity: UartParity,
    /// Stop bits
    pub stop_bits: UartStopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: 8,
            parity: UartParity::None,
            stop_bits: UartStopBits::One,
        }
    }
}

impl UartConfig {
    /// Create a configuration with the given baud rate and 8N1 framing
    pub fn with_baud_rate(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }

    /// Compute the 16-bit baud divisor for the given system clock
    ///
    /// Uses the ATmega4809 double-speed baud generation relation:
    ///
    /// ```text
    /// divisor = clock_hz / (2 * baud_rate) - 1
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart(UartError::InvalidBaudRate)` if the baud
    /// rate is zero, the computed divisor would be zero or negative, or the
    /// divisor does not fit the 16-bit BAUD register.
    pub fn divisor(&self, clock_hz: u32) -> Result<u16> {
        if self.baud_rate == 0 {
            return Err(PlatformError::Uart(UartError::InvalidBaudRate));
        }
        let quotient = clock_hz as u64 / (2 * self.baud_rate as u64);
        if quotient < 2 {
            // divisor would be zero or negative
            return Err(PlatformError::Uart(UartError::InvalidBaudRate));
        }
        u16::try_from(quotient - 1).map_err(|_| PlatformError::Uart(UartError::InvalidBaudRate))
    }
}

/// UART parity modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartParity {
    /// No parity
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// UART stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartStopBits {
    /// One stop bit
    One,
    /// Two stop bits
    Two,
}

/// UART channel interface trait
///
/// Platform implementations must provide this interface for serial
/// communication. Channels are fully configured by their platform
/// constructor (`Platform::create_uart`), so a value of an implementing
/// type is always ready for use.
///
/// # Safety Invariants
///
/// - Only one owner per UART peripheral instance
/// - No concurrent access to the same UART from multiple contexts
/// - Readiness flags are read from the peripheral at time of use, never
///   cached
pub trait UartInterface {
    /// Send one byte, blocking until the peripheral accepts it
    ///
    /// Busy-waits on the data-register-empty flag, then writes the byte.
    /// Returning guarantees the byte was accepted by the transmitter, not
    /// that it has left the wire.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the write operation fails.
    fn send(&mut self, byte: u8) -> Result<()>;

    /// Receive one byte, blocking until one is available
    ///
    /// Busy-waits on the receive-complete flag, then returns the byte.
    /// On hardware this never times out; the mock platform returns
    /// `PlatformError::Uart(UartError::Timeout)` instead of spinning forever
    /// when nothing was injected.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the read operation fails.
    fn receive(&mut self) -> Result<u8>;

    /// Poll for one byte without blocking
    ///
    /// Checks the receive-complete flag once. Returns `Ok(Some(byte))` if a
    /// byte was pending, `Ok(None)` otherwise. The two-case return type
    /// keeps "no data" out of band of the 256 valid byte values.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the read operation fails.
    fn poll(&mut self) -> Result<Option<u8>>;

    /// Flush the transmitter
    ///
    /// Blocks until the transmit data register is empty.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the flush operation fails.
    fn flush(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ATmega4809 running at the full 20 MHz main clock
    const CLOCK_HZ: u32 = 20_000_000;

    #[test]
    fn test_divisor_9600() {
        let config = UartConfig::with_baud_rate(9600);
        assert_eq!(config.divisor(CLOCK_HZ).unwrap(), 1040);
    }

    #[test]
    fn test_divisor_115200() {
        let config = UartConfig::with_baud_rate(115_200);
        assert_eq!(config.divisor(CLOCK_HZ).unwrap(), 85);
    }

    #[test]
    fn test_divisor_rejects_zero_baud() {
        let config = UartConfig::with_baud_rate(0);
        assert_eq!(
            config.divisor(CLOCK_HZ),
            Err(PlatformError::Uart(UartError::InvalidBaudRate))
        );
    }

    #[test]
    fn test_divisor_rejects_zero_divisor() {
        // quotient of 1 would give a divisor of 0
        let config = UartConfig::with_baud_rate(6_000_000);
        assert_eq!(
            config.divisor(CLOCK_HZ),
            Err(PlatformError::Uart(UartError::InvalidBaudRate))
        );
    }

    #[test]
    fn test_divisor_rejects_negative_divisor() {
        // baud rate above clock / 4 truncates the quotient to zero
        let config = UartConfig::with_baud_rate(CLOCK_HZ);
        assert_eq!(
            config.divisor(CLOCK_HZ),
            Err(PlatformError::Uart(UartError::InvalidBaudRate))
        );
    }

    #[test]
    fn test_divisor_rejects_oversized_divisor() {
        // 20 MHz at 100 baud needs a divisor of 99_999, past the 16-bit register
        let config = UartConfig::with_baud_rate(100);
        assert_eq!(
            config.divisor(CLOCK_HZ),
            Err(PlatformError::Uart(UartError::InvalidBaudRate))
        );
    }

    #[test]
    fn test_default_config() {
        let config = UartConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.data_bits, 8);
        assert_eq!(config.parity, UartParity::None);
        assert_eq!(config.stop_bits, UartStopBits::One);
    }
}
