//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the serial bridge. All
//! register-level code is isolated to the platform implementations so the
//! bridge logic never touches a peripheral directly.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "atmega4809")]
pub mod atmega4809;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{GpioInterface, Platform, TimerInterface, UartConfig, UartInterface};
