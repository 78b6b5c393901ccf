//! Mock platform implementation for testing
//!
//! In-memory peripheral implementations that let the bridge logic run in
//! host tests without hardware. The mock UART reproduces the hardware's
//! single-slot receive register, including its overwrite-on-overrun
//! behavior.

pub mod gpio;
pub mod platform;
pub mod timer;
pub mod uart;

pub use gpio::MockGpio;
pub use platform::MockPlatform;
pub use timer::MockTimer;
pub use uart::MockUart;
