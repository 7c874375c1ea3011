//! Push-button driver with lockout debounce and press-edge detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up: the pin reads HIGH when
//! released and LOW while pressed.  [`PushButton`] only reports the raw
//! level; [`EdgeDetector`] turns successive samples into a one-shot
//! press edge.
//!
//! ## Debounce
//!
//! Lockout style: a level change is accepted immediately, then further
//! changes are ignored until `debounce_ms` has elapsed.  At the 500 ms
//! control rate this never hides a real press, while faster sampling
//! filters contact chatter.
//!
//! | Sample | Accepted | Edge |
//! |--------|----------|------|
//! | released → pressed, lockout over | pressed | yes |
//! | pressed → pressed | pressed | no |
//! | pressed → released, lockout over | released | no |
//! | any change inside lockout | unchanged | no |

use embedded_hal::digital::InputPin;
use log::warn;

use crate::scheduler::{Millis, elapsed_ms};

/// Raw push-button input on an `embedded-hal` pin.
pub struct PushButton<P> {
    pin: P,
}

impl<P: InputPin> PushButton<P> {
    /// The pin must already be configured as an input with pull-up.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Electrical level: `true` = HIGH = released.
    ///
    /// A failed read is reported as released so a flaky input can never
    /// synthesise a press.
    pub fn read_raw(&mut self) -> bool {
        self.pin.is_high().unwrap_or_else(|_| {
            warn!("button: GPIO read failed, treating as released");
            true
        })
    }
}

/// Map the active-low electrical level to "pressed".
#[inline]
pub const fn pressed_from_raw(raw_high: bool) -> bool {
    !raw_high
}

/// Debounced rising-edge detector for the "pressed" signal.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    debounce_ms: Millis,
    pressed: bool,
    last_change_ms: Option<Millis>,
}

impl EdgeDetector {
    /// Starts in the released state.
    pub fn new(debounce_ms: Millis) -> Self {
        Self {
            debounce_ms,
            pressed: false,
            last_change_ms: None,
        }
    }

    /// Feed one sample.  Returns `true` exactly once per accepted press.
    pub fn update(&mut self, pressed_now: bool, now_ms: Millis) -> bool {
        if pressed_now == self.pressed {
            return false;
        }
        if let Some(last) = self.last_change_ms {
            if elapsed_ms(now_ms, last) < self.debounce_ms {
                return false;
            }
        }
        self.pressed = pressed_now;
        self.last_change_ms = Some(now_ms);
        pressed_now
    }

    /// Current debounced state.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
