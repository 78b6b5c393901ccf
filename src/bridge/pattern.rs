//! Transmit-only test pattern
//!
//! The board's loopback-free smoke test: every cycle, channel `i` sends the
//! ASCII digit of its index repeated `i + 1` times with a short gap between
//! bytes, then the transmitter idles for the cycle period and toggles the
//! indicator once. Watching the LED and the four TX lines with a scope is
//! enough to verify wiring and baud configuration.

use crate::platform::{GpioInterface, PlatformError, Result, TimerInterface, UartInterface};
use heapless::Vec;

use super::BridgeConfig;

/// Maximum number of channels in pattern mode
pub const MAX_CHANNELS: usize = 4;

/// Transmit-only test pattern driver
#[derive(Debug)]
pub struct PatternTransmitter<U, G, T> {
    channels: Vec<U, MAX_CHANNELS>,
    indicator: G,
    timer: T,
    cycle_period_ms: u32,
    byte_gap_us: u32,
}

impl<U, G, T> PatternTransmitter<U, G, T>
where
    U: UartInterface,
    G: GpioInterface,
    T: TimerInterface,
{
    /// Create a transmitter with no channels yet
    pub fn new(indicator: G, timer: T, config: &BridgeConfig) -> Self {
        Self {
            channels: Vec::new(),
            indicator,
            timer,
            cycle_period_ms: config.pattern_period_ms,
            byte_gap_us: config.pattern_gap_us,
        }
    }

    /// Add a channel; its position determines the byte it transmits
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` once `MAX_CHANNELS`
    /// channels are registered.
    pub fn add_channel(&mut self, channel: U) -> Result<()> {
        self.channels
            .push(channel)
            .map_err(|_| PlatformError::ResourceUnavailable)
    }

    /// Run one transmit cycle
    ///
    /// Channel `i` sends `'0' + i` exactly `i + 1` times, paced by the
    /// configured byte gap. After all channels have transmitted, waits the
    /// cycle period and toggles the indicator.
    ///
    /// # Errors
    ///
    /// Propagates any send, delay or indicator failure.
    pub fn run_cycle(&mut self) -> Result<()> {
        for (index, channel) in self.channels.iter_mut().enumerate() {
            let byte = b'0' + index as u8;
            for _ in 0..=index {
                channel.send(byte)?;
                self.timer.delay_us(self.byte_gap_us)?;
            }
        }
        self.timer.delay_ms(self.cycle_period_ms)?;
        self.indicator.toggle()?;
        Ok(())
    }

    /// Run cycles until the callback asks for shutdown
    ///
    /// # Errors
    ///
    /// Propagates the first failure from [`PatternTransmitter::run_cycle`].
    pub fn run_until<F>(&mut self, mut should_stop: F) -> Result<()>
    where
        F: FnMut() -> bool,
    {
        while !should_stop() {
            self.run_cycle()?;
        }
        Ok(())
    }

    /// Indicator pin (for state inspection)
    pub fn indicator(&self) -> &G {
        &self.indicator
    }

    /// Channel by index
    pub fn channel(&self, index: usize) -> Option<&U> {
        self.channels.get(index)
    }

    /// Timer (for elapsed-time inspection)
    pub fn timer(&self) -> &T {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockTimer, MockUart};
    use crate::platform::traits::UartConfig;

    fn transmitter_with_channels(
        count: usize,
    ) -> PatternTransmitter<MockUart, MockGpio, MockTimer> {
        let config = BridgeConfig::default();
        let mut transmitter =
            PatternTransmitter::new(MockGpio::new_output(), MockTimer::new(), &config);
        for _ in 0..count {
            transmitter
                .add_channel(MockUart::new(UartConfig::default()))
                .unwrap();
        }
        transmitter
    }

    #[test]
    fn test_cycle_emits_index_bytes() {
        let mut transmitter = transmitter_with_channels(4);
        transmitter.run_cycle().unwrap();

        assert_eq!(transmitter.channel(0).unwrap().tx_log(), b"0");
        assert_eq!(transmitter.channel(1).unwrap().tx_log(), b"11");
        assert_eq!(transmitter.channel(2).unwrap().tx_log(), b"222");
        assert_eq!(transmitter.channel(3).unwrap().tx_log(), b"3333");
    }

    #[test]
    fn test_cycle_toggles_indicator_once() {
        let mut transmitter = transmitter_with_channels(4);

        transmitter.run_cycle().unwrap();
        assert!(transmitter.indicator().read());

        transmitter.run_cycle().unwrap();
        assert!(!transmitter.indicator().read());
    }

    #[test]
    fn test_cycle_pacing() {
        let mut transmitter = transmitter_with_channels(4);
        transmitter.run_cycle().unwrap();

        // 10 bytes at 200 us gaps plus the 500 ms cycle period
        let expected_us = 10 * 200 + 500_000;
        assert_eq!(transmitter.timer().now_us(), expected_us);
    }

    #[test]
    fn test_run_until_counts_cycles() {
        let mut transmitter = transmitter_with_channels(1);

        let mut cycles = 0;
        transmitter
            .run_until(|| {
                cycles += 1;
                cycles > 3
            })
            .unwrap();

        assert_eq!(transmitter.channel(0).unwrap().tx_log(), b"000");
    }

    #[test]
    fn test_add_channel_limit() {
        let mut transmitter = transmitter_with_channels(MAX_CHANNELS);
        let overflow = transmitter.add_channel(MockUart::new(UartConfig::default()));
        assert_eq!(overflow.unwrap_err(), PlatformError::ResourceUnavailable);
    }
}
