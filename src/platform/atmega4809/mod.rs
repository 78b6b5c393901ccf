//! ATmega4809 platform implementation
//!
//! Register-level backend for the Arduino Nano Every, built on the
//! `avr-device` peripheral access crate. Covers the four USART channels,
//! the board LED on PE2 and a busy-wait timer.
//!
//! Pin routing (PORTMUX) matches the board's wiring:
//!
//! | Channel | USART  | TX  | RX  | Route   |
//! |---------|--------|-----|-----|---------|
//! | 0       | USART0 | PA0 | PA1 | default |
//! | 1       | USART1 | PC4 | PC5 | alt1    |
//! | 2       | USART2 | PF4 | PF5 | alt1    |
//! | 3       | USART3 | PB0 | PB1 | default |

pub mod gpio;
pub mod platform;
pub mod timer;
pub mod uart;

pub use gpio::Atmega4809Gpio;
pub use platform::{Atmega4809Platform, CPU_CLOCK_HZ};
pub use timer::Atmega4809Timer;
pub use uart::Atmega4809Uart;
