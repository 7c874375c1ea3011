//! Indicator pattern engine with priority-based pattern selection.
//!
//! Generates a time-varying on/off level for the single status LED.  The
//! main loop calls [`IndicatorEngine::tick`] every [`LED_STEP_MS`] and
//! feeds the result to `ActuatorPort::set_indicator`.
//!
//! ## Priority hierarchy (highest first)
//!
//! 1. **Timeout alarm** latched: rapid flash
//! 2. **Pump running**: solid
//! 3. **Low level** while idle: slow blink
//! 4. **Idle, level normal**: heartbeat
//!
//! ## Pattern types
//!
//! | Pattern     | Description                    | Rate   |
//! |-------------|--------------------------------|--------|
//! | Solid       | Constantly lit                 | —      |
//! | SlowBlink   | 50 % square wave               | 1 Hz   |
//! | RapidFlash  | Very fast on/off               | 8 Hz   |
//! | Heartbeat   | 100 ms blip, then pause        | 0.5 Hz |
//! | Off         | Dark                           | —      |

use crate::app::events::StatusReport;
use crate::sensors::WaterLevel;

/// Recommended step between engine ticks.
pub const LED_STEP_MS: u32 = 25;

/// Pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPattern {
    Solid,
    SlowBlink,
    RapidFlash,
    Heartbeat,
    Off,
}

/// Pick the pattern for a controller snapshot.
pub fn pattern_for(status: &StatusReport) -> IndicatorPattern {
    if status.timeout_alarm {
        IndicatorPattern::RapidFlash
    } else if status.pump_on {
        IndicatorPattern::Solid
    } else if status.water_level == WaterLevel::Low {
        IndicatorPattern::SlowBlink
    } else {
        IndicatorPattern::Heartbeat
    }
}

/// Indicator pattern engine.  Stack-allocated, no heap.
pub struct IndicatorEngine {
    phase_ms: u32,
    pattern: IndicatorPattern,
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self {
            phase_ms: 0,
            pattern: IndicatorPattern::Off,
        }
    }

    /// Select a pattern.  The phase restarts only if the pattern changed.
    pub fn set_pattern(&mut self, pattern: IndicatorPattern) {
        if pattern != self.pattern {
            self.pattern = pattern;
            self.phase_ms = 0;
        }
    }

    /// Current output level, then advance the phase by `delta_ms`.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        let lit = self.level();
        self.phase_ms = self.phase_ms.wrapping_add(delta_ms);
        lit
    }

    fn level(&self) -> bool {
        match self.pattern {
            IndicatorPattern::Solid => true,
            IndicatorPattern::Off => false,
            IndicatorPattern::SlowBlink => (self.phase_ms % 1000) < 500,
            IndicatorPattern::RapidFlash => (self.phase_ms % 125) < 63,
            IndicatorPattern::Heartbeat => (self.phase_ms % 2000) < 100,
        }
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}
