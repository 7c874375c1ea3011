//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade (routed to the UART console by `esp_idf_logger` on the device).
//!
//! The low-level warning is raised on every pass while the tank is low
//! and the pump is off; only the first of a consecutive run is logged.

use log::{error, info, warn};

use crate::app::events::{AppEvent, WeeklyOutcome};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    low_warning_active: bool,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the sink is inside a run of low-level warnings.
    pub fn low_warning_active(&self) -> bool {
        self.low_warning_active
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::LowLevelWarning => {
                if !self.low_warning_active {
                    warn!("LEVEL | water low, pump off");
                }
                self.low_warning_active = true;
                return;
            }
            // Periodic snapshots say nothing about the level.
            AppEvent::Status(_) => {}
            _ => self.low_warning_active = false,
        }

        match event {
            AppEvent::Started => info!("START | relay released"),
            AppEvent::PumpStarted { reason } => info!("PUMP  | on ({reason})"),
            AppEvent::PumpStopped { reason, run_ms } => {
                info!("PUMP  | off ({reason}) after {}.{:03} s", run_ms / 1000, run_ms % 1000)
            }
            AppEvent::WeeklyCheck(WeeklyOutcome::RefillRequested) => {
                info!("WEEK  | level low, refill requested")
            }
            AppEvent::WeeklyCheck(WeeklyOutcome::LevelNormal) => info!("WEEK  | level normal"),
            AppEvent::TimeoutAlert { run_ms } => {
                error!("ALERT | pump timeout after {run_ms} ms, forced off")
            }
            AppEvent::SensorFault(e) => error!("FAULT | float switch: {e}, assuming low"),
            AppEvent::SensorRecovered => info!("FAULT | float switch recovered"),
            AppEvent::Status(report) => match serde_json::to_string(report) {
                Ok(json) => info!("STATUS | {json}"),
                Err(e) => warn!("STATUS | serialise failed: {e}"),
            },
            AppEvent::LowLevelWarning => {}
        }
    }
}
