//! Root platform trait
//!
//! This module defines the root Platform trait that aggregates the
//! peripheral interfaces used by the serial bridge.

use super::{GpioInterface, TimerInterface, UartConfig, UartInterface};
use crate::platform::Result;

/// Root platform trait
///
/// This trait aggregates the peripheral interfaces and provides platform
/// initialization and peripheral construction. Implementations provide
/// concrete types for each interface via associated types, so dispatch is
/// resolved at compile time.
///
/// A UART channel returned by [`Platform::create_uart`] is fully
/// initialized: baud divisor written, receiver and transmitter enabled, TX
/// pin set as output and RX pin as input. "Channel used before
/// initialization" is therefore unrepresentable in this API.
pub trait Platform: Sized {
    /// UART peripheral type
    type Uart: UartInterface;

    /// GPIO peripheral type
    type Gpio: GpioInterface;

    /// Timer peripheral type
    type Timer: TimerInterface;

    /// Initialize the platform
    ///
    /// Performs platform-specific one-time setup (taking peripheral
    /// singletons, pin routing).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if initialization
    /// fails, including a second call on hardware.
    fn init() -> Result<Self>;

    /// Get system clock frequency in Hz
    ///
    /// Used for baud divisor computation.
    fn system_clock_hz(&self) -> u32;

    /// Create a UART channel instance
    ///
    /// The channel index selects both the peripheral and its fixed pin
    /// assignment; the mapping is not reconfigurable at runtime.
    ///
    /// # Arguments
    ///
    /// * `channel` - Channel index (0..=3 on the ATmega4809)
    /// * `config` - UART configuration
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the channel index is
    /// invalid or the channel was already created, and
    /// `PlatformError::Uart(UartError::InvalidBaudRate)` if the configured
    /// baud rate yields no valid divisor for the system clock.
    fn create_uart(&mut self, channel: u8, config: UartConfig) -> Result<Self::Uart>;

    /// Create a GPIO pin instance in output mode
    ///
    /// Pin numbers encode port and bit as `port_index * 8 + bit`
    /// (PA0 = 0, PE2 = 34).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the pin is already in
    /// use or the pin number is invalid.
    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio>;

    /// Get timer instance
    fn timer(&self) -> &Self::Timer;

    /// Get mutable timer instance
    fn timer_mut(&mut self) -> &mut Self::Timer;
}
