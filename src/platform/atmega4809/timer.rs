//! ATmega4809 busy-wait timer
//!
//! Calibrated spin delay in the spirit of avr-libc's `_delay_us`. No
//! hardware timer peripheral is claimed; the delay loop burns a known
//! number of CPU cycles and `now_us` accounts the time spent in delays.

use crate::platform::{traits::TimerInterface, Result};

/// Approximate cycles consumed per spin-loop iteration (nop plus loop
/// overhead).
const CYCLES_PER_ITERATION: u64 = 4;

/// ATmega4809 busy-wait timer
pub struct Atmega4809Timer {
    clock_hz: u32,
    elapsed_us: u64,
}

impl Atmega4809Timer {
    /// Create a timer calibrated for the given CPU clock
    pub(crate) fn new(clock_hz: u32) -> Self {
        Self {
            clock_hz,
            elapsed_us: 0,
        }
    }

    fn spin(&self, us: u32) {
        let cycles = us as u64 * self.clock_hz as u64 / 1_000_000;
        let mut iterations = cycles / CYCLES_PER_ITERATION;
        while iterations > 0 {
            avr_device::asm::nop();
            iterations -= 1;
        }
    }
}

impl TimerInterface for Atmega4809Timer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.spin(us);
        self.elapsed_us = self.elapsed_us.wrapping_add(us as u64);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        // Chunked so the cycle computation cannot overflow for long waits
        for _ in 0..ms {
            self.delay_us(1000)?;
        }
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.elapsed_us
    }
}
