//! Application service — the pump controller core.
//!
//! [`AppService`] owns every piece of mutable controller state: the pump
//! actuator, the input sampler, the weekly schedule clock and the safety
//! supervisor.  All I/O flows through port traits injected at call sites,
//! so the whole controller runs against mock adapters on the host.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │          AppService           │
//! ActuatorPort ◀──│ Sampler · Rules · Safety · Pump│
//!                 └──────────────────────────────┘
//! ```
//!
//! ## Arbitration order (one pass per [`AppService::tick`])
//!
//! 1. Manual toggle on a button edge.
//! 2. Level cutoff: `Full` while running stops the pump, even if step 1
//!    just started it.
//! 3. Low-level warning while the pump is off.
//! 4. Weekly check: refill if the tank is not full.
//! 5. Run-time limit.
//!
//! Step 4 can restart a pump that step 2 or a previous pass's step 5
//! stopped if the level reading still says `Low`.  The order is kept as
//! is; the run-time limit still bounds every activation.

use log::info;

use crate::config::ControllerConfig;
use crate::error::ConfigError;
use crate::safety::{SafetySupervisor, SafetyTrip};
use crate::scheduler::{IntervalTimer, Millis, elapsed_ms};
use crate::sensors::{InputSampler, SensorHealthChange, WaterLevel};

use super::actuator::{PumpActuator, PumpState};
use super::commands::AppCommand;
use super::events::{AppEvent, StatusReport, TransitionReason, WeeklyOutcome};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The pump controller.
pub struct AppService {
    config: ControllerConfig,
    pump: PumpActuator,
    sampler: InputSampler,
    safety: SafetySupervisor,
    weekly: IntervalTimer,
    /// Latched by a timeout stop, cleared by the next start.
    timeout_alarm: bool,
    uptime_ms: u64,
    last_seen_ms: Millis,
}

impl AppService {
    /// Construct the controller from a validated configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pump: PumpActuator::new(),
            sampler: InputSampler::new(config.button_debounce_ms, config.level_confirm_samples),
            safety: SafetySupervisor::new(&config),
            weekly: IntervalTimer::new(config.weekly_interval_ms, 0),
            timeout_alarm: false,
            uptime_ms: 0,
            last_seen_ms: 0,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Release the relay and start the weekly and uptime clocks at `now_ms`.
    pub fn start(
        &mut self,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        self.pump.force_off(hw);
        self.weekly.reset(now_ms);
        self.last_seen_ms = now_ms;
        sink.emit(&AppEvent::Started);
        info!(
            "controller started: timeout {} ms, weekly check every {} ms",
            self.config.pump_timeout_ms, self.config.weekly_interval_ms
        );
    }

    // ── Per-tick arbitration ──────────────────────────────────

    /// Run one arbitration pass.
    ///
    /// `hw` satisfies both [`SensorPort`] and [`ActuatorPort`], which
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.
    pub fn tick(
        &mut self,
        now_ms: Millis,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.advance_uptime(now_ms);

        let sample = self.sampler.sample(hw, now_ms);
        match sample.health {
            Some(SensorHealthChange::Faulted(e)) => sink.emit(&AppEvent::SensorFault(e)),
            Some(SensorHealthChange::Recovered) => sink.emit(&AppEvent::SensorRecovered),
            None => {}
        }
        let level = sample.water_level;

        // 1. Manual toggle
        if sample.button_edge {
            match self.pump.state() {
                PumpState::Off => self.start_pump(TransitionReason::Manual, now_ms, hw, sink),
                PumpState::On => self.stop_pump(TransitionReason::Manual, now_ms, hw, sink),
            }
        }

        // 2. Level cutoff
        if let Some(SafetyTrip::TankFull) = self.safety.check_level(level, &self.pump) {
            self.stop_pump(TransitionReason::TankFull, now_ms, hw, sink);
        }

        // 3. Low-level warning
        if level == WaterLevel::Low && !self.pump.is_on() {
            sink.emit(&AppEvent::LowLevelWarning);
        }

        // 4. Weekly check
        if self.weekly.is_due(now_ms) {
            self.weekly.reset(now_ms);
            if level != WaterLevel::Full {
                sink.emit(&AppEvent::WeeklyCheck(WeeklyOutcome::RefillRequested));
                self.start_pump(TransitionReason::WeeklyRefill, now_ms, hw, sink);
            } else {
                sink.emit(&AppEvent::WeeklyCheck(WeeklyOutcome::LevelNormal));
            }
        }

        // 5. Run-time limit
        if let Some(SafetyTrip::Timeout { run_ms }) = self.safety.check_runtime(&self.pump, now_ms) {
            self.stop_pump(TransitionReason::Timeout, now_ms, hw, sink);
            self.timeout_alarm = true;
            sink.emit(&AppEvent::TimeoutAlert { run_ms });
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Switch the pump on on behalf of an external collaborator.
    pub fn request_start(
        &mut self,
        reason: TransitionReason,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        self.start_pump(reason, now_ms, hw, sink);
    }

    /// Switch the pump off on behalf of an external collaborator.
    pub fn request_stop(
        &mut self,
        reason: TransitionReason,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        self.stop_pump(reason, now_ms, hw, sink);
    }

    /// Process a command from the console or another remote source.
    ///
    /// Commands go through the same actuator entry points as the button,
    /// and the next pass applies the level cutoff and run-time limit to
    /// them like to any other activation.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::StartPump => {
                self.request_start(TransitionReason::Command, now_ms, hw, sink)
            }
            AppCommand::StopPump => self.request_stop(TransitionReason::Command, now_ms, hw, sink),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of the controller for the console and the periodic report.
    pub fn status(&self, now_ms: Millis) -> StatusReport {
        let uptime_ms = self.uptime_ms + u64::from(elapsed_ms(now_ms, self.last_seen_ms));
        StatusReport {
            pump_on: self.pump.is_on(),
            water_level: self.sampler.water_level(),
            seconds_to_next_weekly_check: self.weekly.remaining_ms(now_ms) / 1000,
            uptime_seconds: uptime_ms / 1000,
            pump_run_seconds: self
                .pump
                .is_on()
                .then(|| self.pump.run_ms(now_ms) / 1000),
            timeout_alarm: self.timeout_alarm,
        }
    }

    /// Emit a [`AppEvent::Status`] snapshot.
    pub fn report_status(&self, now_ms: Millis, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Status(self.status(now_ms)));
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn is_pump_on(&self) -> bool {
        self.pump.is_on()
    }

    /// Last filtered float-switch level.
    pub fn water_level(&self) -> WaterLevel {
        self.sampler.water_level()
    }

    pub fn timeout_alarm(&self) -> bool {
        self.timeout_alarm
    }

    /// Timeout trips since boot.
    pub fn timeout_trips(&self) -> u32 {
        self.safety.timeout_trips()
    }

    /// Timestamp of the last weekly check (or of startup).
    pub fn last_weekly_check_ms(&self) -> Millis {
        self.weekly.last_ms()
    }

    // ── Internal ──────────────────────────────────────────────

    fn start_pump(
        &mut self,
        reason: TransitionReason,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        if self.pump.start(reason, now_ms, hw, sink) {
            self.timeout_alarm = false;
        }
    }

    fn stop_pump(
        &mut self,
        reason: TransitionReason,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        self.pump.stop(reason, now_ms, hw, sink);
    }

    fn advance_uptime(&mut self, now_ms: Millis) {
        self.uptime_ms += u64::from(elapsed_ms(now_ms, self.last_seen_ms));
        self.last_seen_ms = now_ms;
    }
}
