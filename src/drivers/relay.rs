//! Pump relay driver.
//!
//! One digital output drives the relay coil (usually through a transistor
//! or an opto-isolated relay board).  Boards differ in coil polarity, so
//! the driver maps "energised" to a pin level:
//!
//! | `active_high` | energised | released |
//! |---------------|-----------|----------|
//! | `true`        | HIGH      | LOW      |
//! | `false`       | LOW       | HIGH     |
//!
//! The relay is released as soon as the driver takes the pin.  The driver
//! is a dumb output; the pump actuator decides when it switches.

use embedded_hal::digital::{OutputPin, PinState};
use log::error;

pub struct RelayDriver<P> {
    pin: P,
    active_high: bool,
    energised: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    pub fn new(pin: P, active_high: bool) -> Self {
        let mut relay = Self {
            pin,
            active_high,
            energised: true,
        };
        relay.set(false);
        relay
    }

    /// Drive the coil.  A failed write is logged; the commanded state is
    /// still recorded so the next call retries the pin.
    pub fn set(&mut self, energised: bool) {
        let state = PinState::from(energised == self.active_high);
        if self.pin.set_state(state).is_err() {
            error!(
                "relay: GPIO write failed (requested {})",
                if energised { "ON" } else { "OFF" }
            );
        }
        self.energised = energised;
    }

    pub fn is_energised(&self) -> bool {
        self.energised
    }
}
