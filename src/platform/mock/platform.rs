//! Mock Platform implementation for testing

use crate::platform::{
    error::PlatformError,
    traits::{Platform, UartConfig},
    Result,
};
use heapless::Vec;

use super::{MockGpio, MockTimer, MockUart};

/// Mock Platform implementation
///
/// Provides mock peripheral implementations for hardware-free testing.
/// Channel and pin bookkeeping mirrors the hardware platform: each channel
/// index and pin number can be created exactly once.
///
/// # Example
///
/// ```
/// use nano_link::platform::mock::MockPlatform;
/// use nano_link::platform::traits::{Platform, UartInterface};
///
/// let mut platform = MockPlatform::new();
/// let mut uart = platform.create_uart(0, Default::default()).unwrap();
/// uart.send(b'!').unwrap();
/// ```
#[derive(Debug)]
pub struct MockPlatform {
    timer: MockTimer,
    uart_taken: [bool; Self::MAX_CHANNELS as usize],
    gpio_allocated: Vec<u8, 8>,
}

impl MockPlatform {
    /// Create a new mock platform
    pub fn new() -> Self {
        Self {
            timer: MockTimer::new(),
            uart_taken: [false; Self::MAX_CHANNELS as usize],
            gpio_allocated: Vec::new(),
        }
    }

    /// Number of UART channels, matching the ATmega4809
    pub const MAX_CHANNELS: u8 = 4;

    /// Maximum GPIO pin number (PF7 with `port_index * 8 + bit` encoding)
    pub const MAX_GPIO: u8 = 47;
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MockPlatform {
    type Uart = MockUart;
    type Gpio = MockGpio;
    type Timer = MockTimer;

    fn init() -> Result<Self> {
        Ok(Self::new())
    }

    fn system_clock_hz(&self) -> u32 {
        20_000_000 // Simulated 20 MHz main clock
    }

    fn create_uart(&mut self, channel: u8, config: UartConfig) -> Result<Self::Uart> {
        if channel >= Self::MAX_CHANNELS {
            return Err(PlatformError::ResourceUnavailable);
        }
        if self.uart_taken[channel as usize] {
            return Err(PlatformError::ResourceUnavailable);
        }
        // Reject configurations the hardware divisor cannot express
        config.divisor(self.system_clock_hz())?;
        self.uart_taken[channel as usize] = true;
        Ok(MockUart::new(config))
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        if pin > Self::MAX_GPIO {
            return Err(PlatformError::ResourceUnavailable);
        }
        if self.gpio_allocated.contains(&pin) {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.gpio_allocated
            .push(pin)
            .map_err(|_| PlatformError::ResourceUnavailable)?;
        Ok(MockGpio::new_output())
    }

    fn timer(&self) -> &Self::Timer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Self::Timer {
        &mut self.timer
    }
}
