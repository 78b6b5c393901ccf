//! Bridge configuration
//!
//! The operating mode is a configuration value chosen at startup rather
//! than a compile-time switch; device families are interchangeable
//! `Platform` implementations selected by Cargo feature.

/// Operating mode of the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMode {
    /// Forward bytes between paired channels in both directions
    Passthrough,
    /// Periodically transmit fixed test bytes on every channel
    TransmitPattern,
}

/// Bridge configuration
#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig {
    /// Operating mode
    pub mode: BridgeMode,
    /// Baud rate applied to every channel
    pub baud_rate: u32,
    /// Byte that toggles the indicator when forwarded
    pub line_terminator: u8,
    /// Pattern mode: pause between transmit cycles, in milliseconds
    pub pattern_period_ms: u32,
    /// Pattern mode: gap between consecutive bytes, in microseconds
    pub pattern_gap_us: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mode: BridgeMode::Passthrough,
            baud_rate: 9600,
            line_terminator: b'\n',
            pattern_period_ms: 500,
            pattern_gap_us: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.mode, BridgeMode::Passthrough);
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.line_terminator, b'\n');
        assert_eq!(config.pattern_period_ms, 500);
        assert_eq!(config.pattern_gap_us, 200);
    }
}
