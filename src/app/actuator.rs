//! Pump actuator: the single writer of the relay output.
//!
//! Every pump transition in the firmware goes through [`PumpActuator`], so
//! its [`PumpState`] is the one source of truth for "is the pump on" and
//! the relay is always the physical projection of that state.
//!
//! `start` and `stop` are idempotent: a request that would not change the
//! state touches neither the relay nor the activation clock, and emits no
//! event.

use super::events::{AppEvent, TransitionReason};
use super::ports::{ActuatorPort, EventSink};
use crate::scheduler::{Millis, elapsed_ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Off,
    On,
}

pub struct PumpActuator {
    state: PumpState,
    /// Timestamp of the last Off → On transition. Stale while Off.
    activation_ms: Millis,
}

impl PumpActuator {
    pub fn new() -> Self {
        Self {
            state: PumpState::Off,
            activation_ms: 0,
        }
    }

    /// Switch on. Returns `true` if the state changed.
    pub fn start(
        &mut self,
        reason: TransitionReason,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.state == PumpState::On {
            return false;
        }
        self.state = PumpState::On;
        self.activation_ms = now_ms;
        hw.drive_relay(true);
        sink.emit(&AppEvent::PumpStarted { reason });
        true
    }

    /// Switch off. Returns `true` if the state changed.
    pub fn stop(
        &mut self,
        reason: TransitionReason,
        now_ms: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.state == PumpState::Off {
            return false;
        }
        let run_ms = self.run_ms(now_ms);
        self.state = PumpState::Off;
        hw.drive_relay(false);
        sink.emit(&AppEvent::PumpStopped { reason, run_ms });
        true
    }

    /// Release the relay without a transition, used once at boot.
    pub fn force_off(&mut self, hw: &mut impl ActuatorPort) {
        self.state = PumpState::Off;
        hw.drive_relay(false);
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == PumpState::On
    }

    /// Continuous run time of the current activation, `0` while off.
    pub fn run_ms(&self, now_ms: Millis) -> u32 {
        match self.state {
            PumpState::On => elapsed_ms(now_ms, self.activation_ms),
            PumpState::Off => 0,
        }
    }

    pub fn activation_ms(&self) -> Option<Millis> {
        self.is_on().then_some(self.activation_ms)
    }
}

impl Default for PumpActuator {
    fn default() -> Self {
        Self::new()
    }
}
