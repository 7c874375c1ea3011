//! Port traits — the hexagonal boundary between the controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (float switch, push-button, relay, clock, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the controller core never touches
//! hardware directly and runs unchanged against mocks on the host.

use crate::error::SensorError;
use crate::scheduler::Millis;
use crate::sensors::WaterLevel;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per arbitration pass.
pub trait SensorPort {
    /// Current float-switch reading.
    ///
    /// An `Err` is not fatal; the input sampler treats it as
    /// [`WaterLevel::Low`] and reports a sensor fault.
    fn read_water_level(&mut self) -> Result<WaterLevel, SensorError>;

    /// Raw electrical level of the push-button input.
    ///
    /// The button is active-low with a pull-up, so `true` (HIGH) means
    /// *released*.  Polarity is resolved by the input sampler.
    fn read_button_raw(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.
pub trait ActuatorPort {
    /// Energise or release the pump relay.
    ///
    /// Only the pump actuator calls this; nothing else in the firmware
    /// may write the relay output.
    fn drive_relay(&mut self, energised: bool);

    /// Light or extinguish the status indicator LED.
    fn set_indicator(&mut self, lit: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; callers use
/// [`elapsed_ms`](crate::scheduler::elapsed_ms) for differences.
pub trait MonotonicClock {
    fn now_ms(&self) -> Millis;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide how they are rendered.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
