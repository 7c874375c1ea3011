//! Mock hardware, clock and event sink for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO.

use core::cell::Cell;

use pumpctl::app::events::{AppEvent, TransitionReason};
use pumpctl::app::ports::{ActuatorPort, EventSink, MonotonicClock, SensorPort};
use pumpctl::app::service::AppService;
use pumpctl::config::ControllerConfig;
use pumpctl::error::SensorError;
use pumpctl::scheduler::Millis;
use pumpctl::sensors::WaterLevel;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Relay(bool),
    Indicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub level: Result<WaterLevel, SensorError>,
    /// Electrical button level: `true` = released.
    pub button_high: bool,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(level: WaterLevel) -> Self {
        Self {
            level: Ok(level),
            button_high: true,
            calls: Vec::new(),
        }
    }

    pub fn press(&mut self) {
        self.button_high = false;
    }

    pub fn release(&mut self) {
        self.button_high = true;
    }

    /// Physical relay state after the last write.
    pub fn relay_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Relay(on) => Some(*on),
                ActuatorCall::Indicator(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn relay_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Relay(_)))
            .count()
    }
}

impl SensorPort for MockHardware {
    fn read_water_level(&mut self) -> Result<WaterLevel, SensorError> {
        self.level
    }

    fn read_button_raw(&mut self) -> bool {
        self.button_high
    }
}

impl ActuatorPort for MockHardware {
    fn drive_relay(&mut self, energised: bool) {
        self.calls.push(ActuatorCall::Relay(energised));
    }

    fn set_indicator(&mut self, lit: bool) {
        self.calls.push(ActuatorCall::Indicator(lit));
    }
}

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    now: Cell<Millis>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl MonotonicClock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn starts(&self) -> Vec<TransitionReason> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PumpStarted { reason } => Some(*reason),
                _ => None,
            })
            .collect()
    }

    pub fn stops(&self) -> Vec<TransitionReason> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PumpStopped { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Bench: controller wired to mocks ──────────────────────────

pub struct Bench {
    pub app: AppService,
    pub hw: MockHardware,
    pub clock: ManualClock,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Bench {
    pub fn new(config: ControllerConfig, level: WaterLevel, start_ms: Millis) -> Self {
        let mut app = AppService::new(config).expect("valid config");
        let mut hw = MockHardware::new(level);
        let clock = ManualClock::new(start_ms);
        let mut sink = RecordingSink::default();
        app.start(clock.now_ms(), &mut hw, &mut sink);
        Self {
            app,
            hw,
            clock,
            sink,
        }
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    /// Advance by one tick interval and run a pass.
    pub fn step(&mut self) {
        let tick = self.app.config().tick_interval_ms;
        self.clock.advance(tick);
        self.tick_now();
    }

    /// Run a pass at the current clock time.
    pub fn tick_now(&mut self) {
        self.app
            .tick(self.clock.now_ms(), &mut self.hw, &mut self.sink);
    }

    /// Step until `ms` have elapsed.
    pub fn run_for(&mut self, ms: Millis) {
        let tick = self.app.config().tick_interval_ms;
        for _ in 0..ms / tick {
            self.step();
        }
    }
}

/// Default timing with a short weekly interval so scenarios stay small.
pub fn fast_config() -> ControllerConfig {
    ControllerConfig {
        weekly_interval_ms: 60_000,
        ..ControllerConfig::default()
    }
}
