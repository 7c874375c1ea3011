//! Float-switch water level sensor.
//!
//! A reed float switch closes its contact when the tank is full.  The
//! contact pulls a GPIO (configured with pull-up) to ground, so:
//!
//! | Contact | Pin level | Reading |
//! |---------|-----------|---------|
//! | closed  | LOW       | `Full`  |
//! | open    | HIGH      | `Low`   |
//!
//! The level is a slow physical signal and is not debounced by default.
//! [`LevelFilter`] adds an optional N-consecutive-sample confirmation.

use embedded_hal::digital::InputPin;

use super::WaterLevel;
use crate::error::SensorError;

/// Float switch on an `embedded-hal` input pin.
pub struct FloatSwitch<P> {
    pin: P,
}

impl<P: InputPin> FloatSwitch<P> {
    /// The pin must already be configured as an input with pull-up.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn read(&mut self) -> Result<WaterLevel, SensorError> {
        match self.pin.is_low() {
            Ok(true) => Ok(WaterLevel::Full),
            Ok(false) => Ok(WaterLevel::Low),
            Err(_) => Err(SensorError::GpioReadFailed),
        }
    }
}

/// Adopts a new level only after `required` consecutive agreeing samples.
///
/// With `required == 1` every sample is adopted immediately.
#[derive(Debug, Clone, Copy)]
pub struct LevelFilter {
    required: u8,
    stable: WaterLevel,
    candidate: WaterLevel,
    streak: u8,
}

impl LevelFilter {
    /// Initial level is `Low` until samples say otherwise.
    pub fn new(required: u8) -> Self {
        Self {
            required: required.max(1),
            stable: WaterLevel::Low,
            candidate: WaterLevel::Low,
            streak: 0,
        }
    }

    /// Feed one sample; returns the filtered level.
    pub fn update(&mut self, sample: WaterLevel) -> WaterLevel {
        if sample == self.stable {
            self.candidate = sample;
            self.streak = 0;
            return self.stable;
        }

        if sample == self.candidate {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.candidate = sample;
            self.streak = 1;
        }

        if self.streak >= self.required {
            self.stable = sample;
            self.streak = 0;
        }
        self.stable
    }

    pub fn level(&self) -> WaterLevel {
        self.stable
    }
}
