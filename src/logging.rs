//! Logging abstraction
//!
//! Provides unified logging macros that work across targets:
//! - Host tests: `println!`
//! - ATmega4809 firmware: no-op (the serial lines carry payload, and there
//!   is no debug transport on the board)
//!
//! For diagnostics that should go out over a spare serial channel,
//! [`SerialWriter`] adapts any [`UartInterface`] to `ufmt::uWrite` so
//! `uwrite!`/`uwriteln!` can format directly onto the wire.

use crate::platform::{PlatformError, UartInterface};

/// `ufmt` writer over a UART channel
///
/// # Example
///
/// ```
/// use nano_link::logging::SerialWriter;
/// use nano_link::platform::mock::MockUart;
/// use ufmt::uwriteln;
///
/// let mut uart = MockUart::new(Default::default());
/// uwriteln!(SerialWriter::new(&mut uart), "boot ok, {} channels", 4).unwrap();
/// ```
pub struct SerialWriter<'a, U> {
    uart: &'a mut U,
}

impl<'a, U: UartInterface> SerialWriter<'a, U> {
    /// Wrap a UART channel
    pub fn new(uart: &'a mut U) -> Self {
        Self { uart }
    }
}

impl<U: UartInterface> ufmt::uWrite for SerialWriter<'_, U> {
    type Error = PlatformError;

    fn write_str(&mut self, s: &str) -> core::result::Result<(), PlatformError> {
        for &byte in s.as_bytes() {
            self.uart.send(byte)?;
        }
        Ok(())
    }
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(all(not(feature = "atmega4809"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(all(not(feature = "atmega4809"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(all(not(feature = "atmega4809"), test))]
        println!("[WARN] {}", format!($($arg)*));
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(all(not(feature = "atmega4809"), test))]
        println!("[ERROR] {}", format!($($arg)*));
    }};
}
