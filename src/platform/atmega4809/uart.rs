//! ATmega4809 USART implementation
//!
//! All four USART peripherals share one register block layout, so one
//! driver type covers every channel; the platform hands it the right block
//! and keeps the singleton bookkeeping.

use crate::platform::{
    traits::{UartConfig, UartInterface, UartParity, UartStopBits},
    Result,
};
use avr_device::atmega4809::usart0::RegisterBlock;

/// ATmega4809 USART channel
///
/// Exclusive handle over one USART register block. Constructed only through
/// `Atmega4809Platform::create_uart`, which enforces single ownership per
/// channel and writes the pin directions before handing the block over.
pub struct Atmega4809Uart {
    regs: &'static RegisterBlock,
    config: UartConfig,
}

impl Atmega4809Uart {
    /// Program the peripheral and wrap it
    ///
    /// `divisor` has already been validated against the 16-bit BAUD
    /// register by the caller.
    pub(crate) fn new(regs: &'static RegisterBlock, config: UartConfig, divisor: u16) -> Self {
        regs.baud().write(|w| unsafe { w.bits(divisor) });
        regs.ctrlc().write(|w| {
            let w = w.chsize()._8bit();
            let w = match config.parity {
                UartParity::None => w.pmode().disabled(),
                UartParity::Even => w.pmode().even(),
                UartParity::Odd => w.pmode().odd(),
            };
            w.sbmode().bit(config.stop_bits == UartStopBits::Two)
        });
        regs.ctrlb().write(|w| w.rxen().set_bit().txen().set_bit());
        Self { regs, config }
    }

    /// Get the configured baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl UartInterface for Atmega4809Uart {
    fn send(&mut self, byte: u8) -> Result<()> {
        // Busy-wait for the data register empty flag (DREIF)
        while self.regs.status().read().dreif().bit_is_clear() {}
        self.regs.txdatal().write(|w| unsafe { w.bits(byte) });
        Ok(())
    }

    fn receive(&mut self) -> Result<u8> {
        // Busy-wait for the receive complete flag (RXCIF)
        while self.regs.status().read().rxcif().bit_is_clear() {}
        Ok(self.regs.rxdatal().read().bits())
    }

    fn poll(&mut self) -> Result<Option<u8>> {
        if self.regs.status().read().rxcif().bit_is_set() {
            Ok(Some(self.regs.rxdatal().read().bits()))
        } else {
            Ok(None)
        }
    }

    fn flush(&mut self) -> Result<()> {
        while self.regs.status().read().dreif().bit_is_clear() {}
        Ok(())
    }
}
