//! GPIO pin assignments for the pump controller board.
//!
//! Single source of truth: `main` builds every driver from these numbers
//! rather than hard-coding pins.  Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// Inputs (pull-up enabled, contact to ground)
// ---------------------------------------------------------------------------

/// Reed float switch.  LOW = contact closed = tank full.
pub const FLOAT_SWITCH_GPIO: i32 = 4;

/// Momentary push-button for manual pump toggle.  LOW = pressed.
pub const BUTTON_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Pump relay coil driver.  Polarity set by `relay_active_high`.
pub const RELAY_GPIO: i32 = 6;

/// Status LED, lit when HIGH.
pub const STATUS_LED_GPIO: i32 = 7;
