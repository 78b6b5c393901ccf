//! ATmega4809 GPIO implementation
//!
//! Minimal pin driver over the VPORT-style PORTx register blocks. The
//! bridge only needs an output pin for the indicator LED, but input mode is
//! supported for symmetry with the trait.

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use avr_device::atmega4809::porta::RegisterBlock;

/// ATmega4809 GPIO pin
///
/// Exclusive handle over one bit of one port. Constructed only through
/// `Atmega4809Platform::create_gpio`.
pub struct Atmega4809Gpio {
    port: &'static RegisterBlock,
    mask: u8,
    mode: GpioMode,
}

impl Atmega4809Gpio {
    /// Wrap one pin of a port register block in output mode
    pub(crate) fn new_output(port: &'static RegisterBlock, bit: u8) -> Self {
        let mask = 1 << bit;
        port.dirset().write(|w| unsafe { w.bits(mask) });
        Self {
            port,
            mask,
            mode: GpioMode::Output,
        }
    }

    fn require_output(&self) -> Result<()> {
        match self.mode {
            GpioMode::Output => Ok(()),
            GpioMode::Input => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }
}

impl GpioInterface for Atmega4809Gpio {
    fn set_high(&mut self) -> Result<()> {
        self.require_output()?;
        self.port.outset().write(|w| unsafe { w.bits(self.mask) });
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.require_output()?;
        self.port.outclr().write(|w| unsafe { w.bits(self.mask) });
        Ok(())
    }

    fn toggle(&mut self) -> Result<()> {
        self.require_output()?;
        self.port.outtgl().write(|w| unsafe { w.bits(self.mask) });
        Ok(())
    }

    fn read(&self) -> bool {
        self.port.in_().read().bits() & self.mask != 0
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        match mode {
            GpioMode::Output => self.port.dirset().write(|w| unsafe { w.bits(self.mask) }),
            GpioMode::Input => self.port.dirclr().write(|w| unsafe { w.bits(self.mask) }),
        }
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
