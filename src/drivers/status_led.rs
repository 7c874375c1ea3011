//! Status LED driver.
//!
//! A single LED on a push-pull GPIO, lit when the pin is HIGH.  The
//! blink pattern comes from [`IndicatorEngine`](super::led_patterns::IndicatorEngine);
//! this driver only latches the requested level.

use embedded_hal::digital::{OutputPin, PinState};
use log::debug;

pub struct StatusLed<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Takes the pin and switches the LED off.
    pub fn new(mut pin: P) -> Self {
        if pin.set_low().is_err() {
            debug!("status LED write failed");
        }
        Self { pin, lit: false }
    }

    pub fn set(&mut self, lit: bool) {
        if lit == self.lit {
            return;
        }
        // A stuck LED is cosmetic; don't spam the log at pattern rate.
        if self.pin.set_state(PinState::from(lit)).is_err() {
            debug!("status LED write failed");
        }
        self.lit = lit;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
