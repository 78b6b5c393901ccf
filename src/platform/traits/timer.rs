//! Timer interface trait
//!
//! This module defines the delay and timing interface that platform
//! implementations must provide. The bridge uses it for the inter-byte and
//! inter-cycle pacing of the transmit test pattern and the startup blink.

use crate::platform::Result;

/// Timer interface trait
///
/// # Safety Invariants
///
/// - Monotonic time source (never goes backwards)
/// - Delays block for at least the requested duration
pub trait TimerInterface {
    /// Delay for specified number of microseconds
    ///
    /// # Errors
    ///
    /// Propagates the platform's failure, if its time source can fail.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Delay for specified number of milliseconds
    ///
    /// # Errors
    ///
    /// Propagates the platform's failure, if its time source can fail.
    fn delay_ms(&mut self, ms: u32) -> Result<()>;

    /// Get current time in microseconds
    ///
    /// Returns a monotonic timestamp in microseconds since platform
    /// initialization.
    fn now_us(&self) -> u64;

    /// Get current time in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

// Forwarding impl so the platform can lend its timer to a component that
// owns a timer generically.
impl<T: TimerInterface + ?Sized> TimerInterface for &mut T {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        (**self).delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        (**self).delay_ms(ms)
    }

    fn now_us(&self) -> u64 {
        (**self).now_us()
    }

    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
