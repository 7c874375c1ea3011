//! Controller configuration parameters
//!
//! All tunable timing and polarity parameters for the pump controller.
//! There is no persistent storage; the firmware runs with
//! [`ControllerConfig::default`] unless a caller builds its own.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One week in milliseconds.
pub const WEEK_MS: u32 = 7 * 24 * 60 * 60 * 1000;

/// Longest interval the wrap-safe `u32` millisecond arithmetic can
/// distinguish from a rollover.
const MAX_INTERVAL_MS: u32 = 1 << 31;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Arbitration pass period (milliseconds)
    pub tick_interval_ms: u32,
    /// Maximum continuous pump run time before a forced stop (milliseconds)
    pub pump_timeout_ms: u32,
    /// Interval between scheduled top-up checks (milliseconds)
    pub weekly_interval_ms: u32,
    /// Periodic status report interval (milliseconds)
    pub status_interval_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,

    // --- Inputs ---
    /// Minimum time between accepted button transitions (milliseconds)
    pub button_debounce_ms: u32,
    /// Consecutive agreeing float-switch samples needed to change level
    pub level_confirm_samples: u8,

    // --- Outputs ---
    /// `true` if the relay coil is energised by a HIGH output
    pub relay_active_high: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 500,
            pump_timeout_ms: 30_000,
            weekly_interval_ms: WEEK_MS,
            status_interval_ms: 60_000,
            watchdog_timeout_ms: 5_000,

            // Inputs
            button_debounce_ms: 20,
            level_confirm_samples: 1,

            // Outputs
            relay_active_high: true,
        }
    }
}

impl ControllerConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.pump_timeout_ms <= self.tick_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "pump_timeout_ms must exceed tick_interval_ms",
            ));
        }
        if self.weekly_interval_ms <= self.pump_timeout_ms {
            return Err(ConfigError::ValidationFailed(
                "weekly_interval_ms must exceed pump_timeout_ms",
            ));
        }
        if self.weekly_interval_ms >= MAX_INTERVAL_MS {
            return Err(ConfigError::ValidationFailed(
                "weekly_interval_ms must be below 2^31 ms",
            ));
        }
        if self.status_interval_ms <= self.tick_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "status_interval_ms must exceed tick_interval_ms",
            ));
        }
        if self.watchdog_timeout_ms <= self.tick_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_ms must exceed tick_interval_ms",
            ));
        }
        if !(1..=16).contains(&self.level_confirm_samples) {
            return Err(ConfigError::ValidationFailed(
                "level_confirm_samples must be 1–16",
            ));
        }
        Ok(())
    }
}
