//! Unified error types for the pump controller firmware.
//!
//! The control loop itself never fails: sensor errors degrade to a
//! fail-safe reading and actuator errors are logged by the adapter.
//! These types exist for the edges of the system (configuration,
//! console input, pin reads) so that every fallible call has a typed
//! result.  All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// GPIO read returned an error.
    GpioReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl core::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Console errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// Line contained nothing but whitespace.
    Empty,
    /// Line did not name a known command.
    UnknownCommand,
    /// Line exceeded the fixed-capacity input buffer.
    LineTooLong,
    /// Line was not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::LineTooLong => write!(f, "line too long"),
            Self::InvalidUtf8 => write!(f, "invalid UTF-8"),
        }
    }
}
