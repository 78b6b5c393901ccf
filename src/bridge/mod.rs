//! Serial bridge logic
//!
//! This module contains the two operating modes of the firmware: the
//! bidirectional channel [`forwarder`] and the transmit-only test
//! [`pattern`], plus the startup LED blink the board shows before the
//! channels come up. [`Bridge::build`] is the front door: it performs the
//! boot wiring against any [`Platform`] and dispatches on
//! [`BridgeConfig::mode`]. Everything here is written against the platform
//! traits and is exercised on the host through the mock platform.

pub mod config;
pub mod forwarder;
pub mod pattern;

pub use config::{BridgeConfig, BridgeMode};
pub use forwarder::{ChannelPair, Forwarder};
pub use pattern::PatternTransmitter;

use crate::platform::{GpioInterface, Platform, Result, TimerInterface, UartConfig};

/// Indicator LED pin (PE2 on the Nano Every), `port_index * 8 + bit`
/// encoding
pub const INDICATOR_PIN: u8 = 34;

/// Number of startup blinks before the channels come up
pub const STARTUP_BLINK_COUNT: u8 = 50;

/// Startup blink period in milliseconds
pub const STARTUP_BLINK_PERIOD_MS: u32 = 30;

/// A configured bridge, ready to run
///
/// Built by [`Bridge::build`], which runs the boot sequence (startup
/// blink, channel creation, pairing) and selects the operating mode from
/// the configuration. The firmware entry point reduces to:
///
/// ```
/// use nano_link::bridge::{Bridge, BridgeConfig};
/// use nano_link::platform::mock::MockPlatform;
/// use nano_link::platform::traits::Platform;
///
/// let mut platform = MockPlatform::init().unwrap();
/// let mut bridge = Bridge::build(&mut platform, &BridgeConfig::default()).unwrap();
/// # let mut once = false;
/// # let stop = move || core::mem::replace(&mut once, true);
/// bridge.run_until(stop).unwrap();
/// ```
///
/// On hardware the stop callback is `|| false` and `run_until` never
/// returns.
pub enum Bridge<'a, P: Platform> {
    /// Bidirectional forwarding between channel pairs 0-1 and 2-3
    Passthrough(Forwarder<P::Uart, P::Gpio>),
    /// Periodic test bytes on all four channels
    TransmitPattern(PatternTransmitter<P::Uart, P::Gpio, &'a mut P::Timer>),
}

impl<'a, P: Platform> Bridge<'a, P> {
    /// Wire the bridge from a platform and a configuration
    ///
    /// Creates the indicator LED, blinks it [`STARTUP_BLINK_COUNT`] times,
    /// then creates the four channels at the configured baud rate and
    /// assembles the mode selected by `config.mode`.
    ///
    /// # Errors
    ///
    /// Propagates peripheral creation failures, including
    /// `UartError::InvalidBaudRate` for a baud rate the divisor cannot
    /// express.
    pub fn build(platform: &'a mut P, config: &BridgeConfig) -> Result<Self> {
        let mut led = platform.create_gpio(INDICATOR_PIN)?;
        startup_blink(
            &mut led,
            platform.timer_mut(),
            STARTUP_BLINK_COUNT,
            STARTUP_BLINK_PERIOD_MS,
        )?;

        let uart_config = UartConfig::with_baud_rate(config.baud_rate);
        match config.mode {
            BridgeMode::Passthrough => {
                let mut forwarder = Forwarder::new(led, config.line_terminator);
                forwarder.add_pair(ChannelPair::new(
                    platform.create_uart(0, uart_config)?,
                    platform.create_uart(1, uart_config)?,
                ))?;
                forwarder.add_pair(ChannelPair::new(
                    platform.create_uart(2, uart_config)?,
                    platform.create_uart(3, uart_config)?,
                ))?;
                Ok(Bridge::Passthrough(forwarder))
            }
            BridgeMode::TransmitPattern => {
                let ch0 = platform.create_uart(0, uart_config)?;
                let ch1 = platform.create_uart(1, uart_config)?;
                let ch2 = platform.create_uart(2, uart_config)?;
                let ch3 = platform.create_uart(3, uart_config)?;
                let mut transmitter =
                    PatternTransmitter::new(led, platform.timer_mut(), config);
                transmitter.add_channel(ch0)?;
                transmitter.add_channel(ch1)?;
                transmitter.add_channel(ch2)?;
                transmitter.add_channel(ch3)?;
                Ok(Bridge::TransmitPattern(transmitter))
            }
        }
    }

    /// Run the selected mode until the callback asks for shutdown
    ///
    /// # Errors
    ///
    /// Propagates the first failure from the running mode.
    pub fn run_until<F>(&mut self, should_stop: F) -> Result<()>
    where
        F: FnMut() -> bool,
    {
        match self {
            Bridge::Passthrough(forwarder) => forwarder.run_until(should_stop),
            Bridge::TransmitPattern(transmitter) => transmitter.run_until(should_stop),
        }
    }
}

/// Blink the indicator before the channels are configured
///
/// The board flashes the LED `count` times at `period_ms` intervals on
/// power-up so a watcher can tell the firmware booted even with nothing
/// wired to the serial headers.
pub fn startup_blink<G, T>(led: &mut G, timer: &mut T, count: u8, period_ms: u32) -> Result<()>
where
    G: GpioInterface,
    T: TimerInterface,
{
    for _ in 0..count {
        timer.delay_ms(period_ms)?;
        led.toggle()?;
    }
    Ok(())
}
