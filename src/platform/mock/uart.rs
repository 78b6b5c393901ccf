//! Mock UART implementation for testing

use crate::platform::{
    error::{PlatformError, UartError},
    traits::{UartConfig, UartInterface},
    Result,
};
use heapless::Vec;

/// Capacity of the transmit log
pub const TX_LOG_CAPACITY: usize = 1024;

/// Mock UART implementation
///
/// Models the hardware receive path as a single-slot register: injecting a
/// second byte before the first is polled overwrites it (most recent byte
/// wins) and counts an overrun. There is deliberately no receive queue;
/// at-most-one-pending-byte is the semantics the bridge is written against.
///
/// Transmitted bytes are appended to an in-memory log for test
/// verification.
///
/// # Example
///
/// ```
/// use nano_link::platform::mock::MockUart;
/// use nano_link::platform::traits::UartInterface;
///
/// let mut uart = MockUart::new(Default::default());
///
/// assert_eq!(uart.poll().unwrap(), None);
///
/// uart.inject_rx_byte(b'x');
/// assert_eq!(uart.poll().unwrap(), Some(b'x'));
/// assert_eq!(uart.poll().unwrap(), None);
///
/// uart.send(b'y').unwrap();
/// assert_eq!(uart.tx_log(), b"y");
/// ```
#[derive(Debug)]
pub struct MockUart {
    config: UartConfig,
    rx_slot: Option<u8>,
    rx_overruns: u32,
    tx_log: Vec<u8, TX_LOG_CAPACITY>,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            rx_slot: None,
            rx_overruns: 0,
            tx_log: Vec::new(),
        }
    }

    /// Inject one received byte (for test setup)
    ///
    /// Overwrites any pending byte, recording an overrun, exactly as the
    /// hardware receive register would.
    pub fn inject_rx_byte(&mut self, byte: u8) {
        if self.rx_slot.replace(byte).is_some() {
            self.rx_overruns += 1;
        }
    }

    /// Get transmitted bytes (for test verification)
    pub fn tx_log(&self) -> &[u8] {
        &self.tx_log
    }

    /// Clear the transmit log
    pub fn clear_tx_log(&mut self) {
        self.tx_log.clear();
    }

    /// Number of receive overruns since construction
    pub fn rx_overruns(&self) -> u32 {
        self.rx_overruns
    }

    /// Get current baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl UartInterface for MockUart {
    fn send(&mut self, byte: u8) -> Result<()> {
        self.tx_log
            .push(byte)
            .map_err(|_| PlatformError::Uart(UartError::WriteFailed))
    }

    fn receive(&mut self) -> Result<u8> {
        // Spinning on an in-memory slot would hang the test runner, so the
        // mock substitutes a timeout for the hardware busy-wait.
        self.rx_slot
            .take()
            .ok_or(PlatformError::Uart(UartError::Timeout))
    }

    fn poll(&mut self) -> Result<Option<u8>> {
        Ok(self.rx_slot.take())
    }

    fn flush(&mut self) -> Result<()> {
        // Sent bytes are accepted immediately; nothing pending
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_without_data() {
        let mut uart = MockUart::new(UartConfig::default());
        assert_eq!(uart.poll().unwrap(), None);
        // Stays empty on repeated polls
        assert_eq!(uart.poll().unwrap(), None);
    }

    #[test]
    fn test_injected_byte_observed_exactly_once() {
        let mut uart = MockUart::new(UartConfig::default());

        for value in 0..=255u8 {
            uart.inject_rx_byte(value);
            assert_eq!(uart.poll().unwrap(), Some(value));
            assert_eq!(uart.poll().unwrap(), None);
        }
        assert_eq!(uart.rx_overruns(), 0);
    }

    #[test]
    fn test_overrun_keeps_most_recent_byte() {
        let mut uart = MockUart::new(UartConfig::default());

        uart.inject_rx_byte(b'a');
        uart.inject_rx_byte(b'b');

        assert_eq!(uart.poll().unwrap(), Some(b'b'));
        assert_eq!(uart.poll().unwrap(), None);
        assert_eq!(uart.rx_overruns(), 1);
    }

    #[test]
    fn test_blocking_receive() {
        let mut uart = MockUart::new(UartConfig::default());

        assert_eq!(
            uart.receive(),
            Err(PlatformError::Uart(UartError::Timeout))
        );

        uart.inject_rx_byte(0x42);
        assert_eq!(uart.receive().unwrap(), 0x42);
    }

    #[test]
    fn test_send_appends_to_log() {
        let mut uart = MockUart::new(UartConfig::default());

        uart.send(b'h').unwrap();
        uart.send(b'i').unwrap();
        assert_eq!(uart.tx_log(), b"hi");

        uart.clear_tx_log();
        assert!(uart.tx_log().is_empty());
    }

    #[test]
    fn test_send_fails_when_log_full() {
        let mut uart = MockUart::new(UartConfig::default());

        for _ in 0..TX_LOG_CAPACITY {
            uart.send(b'.').unwrap();
        }
        assert_eq!(
            uart.send(b'!'),
            Err(PlatformError::Uart(UartError::WriteFailed))
        );
    }

    #[test]
    fn test_flush_is_noop() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.send(b'z').unwrap();
        uart.flush().unwrap();
        assert_eq!(uart.tx_log(), b"z");
    }
}
