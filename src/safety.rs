//! Safety supervisor.
//!
//! Two conditions force the pump off regardless of who switched it on:
//!
//! | Check | Condition | Stop reason |
//! |-------|-----------|-------------|
//! | level cutoff | pump on and tank `Full` | `TankFull` |
//! | run-time limit | pump on for `>= pump_timeout_ms` | `Timeout` |
//!
//! The supervisor only *decides*; the [`AppService`](crate::app::service::AppService)
//! performs the stop through the pump actuator so the relay keeps a
//! single writer.  The level cutoff runs right after manual handling and
//! the run-time limit runs last in every pass, after the weekly check,
//! so nothing later in the pass can leave an over-limit pump running.

use crate::app::actuator::PumpActuator;
use crate::config::ControllerConfig;
use crate::scheduler::Millis;
use crate::sensors::WaterLevel;

/// A safety condition that requires the pump to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyTrip {
    TankFull,
    Timeout { run_ms: u32 },
}

pub struct SafetySupervisor {
    pump_timeout_ms: Millis,
    /// Timeout trips since boot.
    timeout_trips: u32,
}

impl SafetySupervisor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            pump_timeout_ms: config.pump_timeout_ms,
            timeout_trips: 0,
        }
    }

    /// Level cutoff: a running pump must stop as soon as the tank reads full.
    pub fn check_level(&self, level: WaterLevel, pump: &PumpActuator) -> Option<SafetyTrip> {
        (pump.is_on() && level == WaterLevel::Full).then_some(SafetyTrip::TankFull)
    }

    /// Run-time limit, inclusive of the limit itself.
    pub fn check_runtime(&mut self, pump: &PumpActuator, now_ms: Millis) -> Option<SafetyTrip> {
        if !pump.is_on() {
            return None;
        }
        let run_ms = pump.run_ms(now_ms);
        if run_ms < self.pump_timeout_ms {
            return None;
        }
        self.timeout_trips = self.timeout_trips.saturating_add(1);
        Some(SafetyTrip::Timeout { run_ms })
    }

    pub fn timeout_trips(&self) -> u32 {
        self.timeout_trips
    }
}
