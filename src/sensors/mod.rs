//! Input sampling: the float switch and the push-button, once per pass.
//!
//! [`InputSampler`] owns the per-input filtering state and produces one
//! [`Sample`] each tick for the arbitration logic:
//!
//! ```text
//!  SensorPort::read_water_level ──▶ fail-safe map ──▶ LevelFilter ──┐
//!                                                                   ├─▶ Sample
//!  SensorPort::read_button_raw ──▶ active-low map ──▶ EdgeDetector ─┘
//! ```

pub mod water_level;

use serde::Serialize;

use crate::app::ports::SensorPort;
use crate::drivers::button::{EdgeDetector, pressed_from_raw};
use crate::error::SensorError;
use crate::scheduler::Millis;
use water_level::LevelFilter;

/// Binary tank level reported by the float switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterLevel {
    Full,
    Low,
}

/// Change in float-switch health observed during a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorHealthChange {
    /// First failed read of a fault episode.
    Faulted(SensorError),
    /// First good read after a fault episode.
    Recovered,
}

/// Inputs for one arbitration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub water_level: WaterLevel,
    /// One-shot: true only on the pass where a press was accepted.
    pub button_edge: bool,
    pub health: Option<SensorHealthChange>,
}

/// Debounced, fail-safe input sampler.
pub struct InputSampler {
    button: EdgeDetector,
    level: LevelFilter,
    sensor_faulted: bool,
}

impl InputSampler {
    pub fn new(button_debounce_ms: Millis, level_confirm_samples: u8) -> Self {
        Self {
            button: EdgeDetector::new(button_debounce_ms),
            level: LevelFilter::new(level_confirm_samples),
            sensor_faulted: false,
        }
    }

    /// Read both inputs through `hw`.
    ///
    /// An unreadable float switch counts as [`WaterLevel::Low`]: a dead
    /// sensor must never look like a full tank and block refills, and the
    /// run-time limit still bounds any pump activation.
    pub fn sample(&mut self, hw: &mut impl SensorPort, now_ms: Millis) -> Sample {
        let (raw_level, health) = match hw.read_water_level() {
            Ok(level) => {
                let health = self
                    .sensor_faulted
                    .then_some(SensorHealthChange::Recovered);
                self.sensor_faulted = false;
                (level, health)
            }
            Err(e) => {
                let health = (!self.sensor_faulted).then_some(SensorHealthChange::Faulted(e));
                self.sensor_faulted = true;
                (WaterLevel::Low, health)
            }
        };
        let water_level = self.level.update(raw_level);

        let pressed = pressed_from_raw(hw.read_button_raw());
        let button_edge = self.button.update(pressed, now_ms);

        Sample {
            water_level,
            button_edge,
            health,
        }
    }

    /// Last filtered water level.
    pub fn water_level(&self) -> WaterLevel {
        self.level.level()
    }
}
