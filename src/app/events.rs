//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to the serial console, drive
//! an indicator, record them in a test.

use core::fmt;

use serde::Serialize;

use crate::error::SensorError;
use crate::sensors::WaterLevel;

/// Why the pump changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionReason {
    /// Push-button edge.
    Manual,
    /// Float switch reports full while the pump runs.
    TankFull,
    /// Weekly check found the tank below full.
    WeeklyRefill,
    /// Continuous run time reached the safety limit.
    Timeout,
    /// Console or other external request.
    Command,
}

impl fmt::Display for TransitionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "manual",
            Self::TankFull => "tank full",
            Self::WeeklyRefill => "weekly refill",
            Self::Timeout => "timeout",
            Self::Command => "command",
        })
    }
}

/// Result of a weekly top-up check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklyOutcome {
    /// Level was below full; a refill was requested.
    RefillRequested,
    /// Level was already full; nothing to do.
    LevelNormal,
}

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started with the relay released.
    Started,

    /// Pump switched on.
    PumpStarted { reason: TransitionReason },

    /// Pump switched off after running `run_ms`.
    PumpStopped { reason: TransitionReason, run_ms: u32 },

    /// Level is low and the pump is off.
    LowLevelWarning,

    /// The weekly check fired.
    WeeklyCheck(WeeklyOutcome),

    /// The safety timeout forced the pump off.
    TimeoutAlert { run_ms: u32 },

    /// The float switch could not be read; level assumed low.
    SensorFault(SensorError),

    /// The float switch is readable again.
    SensorRecovered,

    /// Periodic status snapshot.
    Status(StatusReport),
}

/// Point-in-time controller status, suitable for logging or a console reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub pump_on: bool,
    pub water_level: WaterLevel,
    pub seconds_to_next_weekly_check: u32,
    pub uptime_seconds: u64,
    /// Seconds the pump has been running; `None` while off.
    pub pump_run_seconds: Option<u32>,
    /// Latched by a timeout stop, cleared by the next start.
    pub timeout_alarm: bool,
}
