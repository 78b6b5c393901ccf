//! ATmega4809 platform root
//!
//! Takes the device peripherals once, routes the USART pins through PORTMUX
//! and hands out exclusively-owned channel and pin drivers.

use crate::platform::{
    error::PlatformError,
    traits::{Platform, UartConfig},
    Result,
};
use avr_device::atmega4809::{self, Peripherals};
use heapless::Vec;

use super::{Atmega4809Gpio, Atmega4809Timer, Atmega4809Uart};

/// Main clock frequency in Hz
///
/// Assumes the 20 MHz internal oscillator with the prescaler disabled
/// (FREQSEL fuse at 20 MHz, CLKCTRL left at reset routing).
pub const CPU_CLOCK_HZ: u32 = 20_000_000;

/// Number of USART channels on the device
const CHANNEL_COUNT: u8 = 4;

/// Fixed channel-index to pin assignment: (port, TX bit, RX bit)
///
/// Port index follows the PA..PF ordering used by the pin encoding.
const CHANNEL_PINS: [(u8, u8, u8); CHANNEL_COUNT as usize] = [
    (0, 0, 1), // USART0: PA0 TX, PA1 RX
    (2, 4, 5), // USART1: PC4 TX, PC5 RX
    (5, 4, 5), // USART2: PF4 TX, PF5 RX
    (1, 0, 1), // USART3: PB0 TX, PB1 RX
];

/// ATmega4809 platform implementation
///
/// Owns the peripheral singletons. Each USART channel and GPIO pin can be
/// created exactly once; a second request fails with
/// `PlatformError::ResourceUnavailable`.
pub struct Atmega4809Platform {
    timer: Atmega4809Timer,
    uart_taken: [bool; CHANNEL_COUNT as usize],
    gpio_allocated: Vec<u8, 8>,
}

impl Atmega4809Platform {
    fn port_block(port_index: u8) -> Option<&'static atmega4809::porta::RegisterBlock> {
        // All PORTx peripherals share the PORTA register block layout
        let ptr = match port_index {
            0 => atmega4809::PORTA::ptr(),
            1 => atmega4809::PORTB::ptr(),
            2 => atmega4809::PORTC::ptr(),
            3 => atmega4809::PORTD::ptr(),
            4 => atmega4809::PORTE::ptr(),
            5 => atmega4809::PORTF::ptr(),
            _ => return None,
        };
        Some(unsafe { &*ptr })
    }

    fn usart_block(channel: u8) -> Option<&'static atmega4809::usart0::RegisterBlock> {
        let ptr = match channel {
            0 => atmega4809::USART0::ptr(),
            1 => atmega4809::USART1::ptr(),
            2 => atmega4809::USART2::ptr(),
            3 => atmega4809::USART3::ptr(),
            _ => return None,
        };
        Some(unsafe { &*ptr })
    }
}

impl Platform for Atmega4809Platform {
    type Uart = Atmega4809Uart;
    type Gpio = Atmega4809Gpio;
    type Timer = Atmega4809Timer;

    fn init() -> Result<Self> {
        let dp = Peripherals::take().ok_or(PlatformError::InitializationFailed)?;

        // Route the USARTs to the Nano Every pin headers
        dp.PORTMUX.usartroutea().write(|w| {
            w.usart0()
                .default()
                .usart1()
                .alt1()
                .usart2()
                .alt1()
                .usart3()
                .default()
        });

        // Register access past this point goes through the ptr()-based
        // handles; the singleton arrays below keep ownership exclusive.
        Ok(Self {
            timer: Atmega4809Timer::new(CPU_CLOCK_HZ),
            uart_taken: [false; CHANNEL_COUNT as usize],
            gpio_allocated: Vec::new(),
        })
    }

    fn system_clock_hz(&self) -> u32 {
        CPU_CLOCK_HZ
    }

    fn create_uart(&mut self, channel: u8, config: UartConfig) -> Result<Self::Uart> {
        if channel >= CHANNEL_COUNT {
            return Err(PlatformError::ResourceUnavailable);
        }
        if self.uart_taken[channel as usize] {
            return Err(PlatformError::ResourceUnavailable);
        }
        let divisor = config.divisor(CPU_CLOCK_HZ)?;

        let (port_index, tx_bit, rx_bit) = CHANNEL_PINS[channel as usize];
        let port = Self::port_block(port_index).ok_or(PlatformError::ResourceUnavailable)?;
        port.dirset().write(|w| unsafe { w.bits(1 << tx_bit) });
        port.dirclr().write(|w| unsafe { w.bits(1 << rx_bit) });

        let regs = Self::usart_block(channel).ok_or(PlatformError::ResourceUnavailable)?;
        self.uart_taken[channel as usize] = true;
        Ok(Atmega4809Uart::new(regs, config, divisor))
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        let port_index = pin / 8;
        let bit = pin % 8;
        let port = Self::port_block(port_index).ok_or(PlatformError::ResourceUnavailable)?;
        if self.gpio_allocated.contains(&pin) {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.gpio_allocated
            .push(pin)
            .map_err(|_| PlatformError::ResourceUnavailable)?;
        Ok(Atmega4809Gpio::new_output(port, bit))
    }

    fn timer(&self) -> &Self::Timer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Self::Timer {
        &mut self.timer
    }
}
