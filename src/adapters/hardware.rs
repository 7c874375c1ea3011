//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the float switch, push-button, relay and status LED drivers and
//! exposes them through [`SensorPort`] and [`ActuatorPort`].  This is the
//! only module that touches pins.  Every driver is generic over
//! `embedded-hal` pins, so the same adapter runs on ESP-IDF `PinDriver`s
//! and on host fakes.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::button::PushButton;
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_led::StatusLed;
use crate::error::SensorError;
use crate::sensors::WaterLevel;
use crate::sensors::water_level::FloatSwitch;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<F, B, R, L> {
    float_switch: FloatSwitch<F>,
    button: PushButton<B>,
    relay: RelayDriver<R>,
    led: StatusLed<L>,
}

impl<F, B, R, L> HardwareAdapter<F, B, R, L>
where
    F: InputPin,
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
{
    pub fn new(
        float_switch: FloatSwitch<F>,
        button: PushButton<B>,
        relay: RelayDriver<R>,
        led: StatusLed<L>,
    ) -> Self {
        Self {
            float_switch,
            button,
            relay,
            led,
        }
    }

    pub fn relay_energised(&self) -> bool {
        self.relay.is_energised()
    }

    pub fn indicator_lit(&self) -> bool {
        self.led.is_lit()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<F, B, R, L> SensorPort for HardwareAdapter<F, B, R, L>
where
    F: InputPin,
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
{
    fn read_water_level(&mut self) -> Result<WaterLevel, SensorError> {
        self.float_switch.read()
    }

    fn read_button_raw(&mut self) -> bool {
        self.button.read_raw()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<F, B, R, L> ActuatorPort for HardwareAdapter<F, B, R, L>
where
    F: InputPin,
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
{
    fn drive_relay(&mut self, energised: bool) {
        self.relay.set(energised);
    }

    fn set_indicator(&mut self, lit: bool) {
        self.led.set(lit);
    }
}
