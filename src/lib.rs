#![cfg_attr(not(test), no_std)]

//! nano_link - UART test/passthrough firmware for the Arduino Nano Every
//!
//! This library drives up to four hardware UART channels on the ATmega4809
//! and either transmits a fixed test pattern on each channel or forwards
//! bytes between paired channels, toggling the board LED whenever a line
//! terminator passes through.
//!
//! All hardware access goes through the platform abstraction in [`platform`],
//! so the forwarding logic in [`bridge`] runs unchanged against the mock
//! platform on a host machine or against the ATmega4809 backend on the board.

// Platform abstraction layer (UART, GPIO, timer)
pub mod platform;

// Channel forwarding and test-pattern transmission
pub mod bridge;

// Logging macros and serial diagnostics writer
pub mod logging;

// The library is the top of the firmware image, so it links the panic
// handler for target builds.
#[cfg(feature = "atmega4809")]
use panic_halt as _;
