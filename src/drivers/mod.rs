//! Pin-level drivers: push-button, relay, status LED, and the task watchdog.

pub mod button;
pub mod led_patterns;
pub mod relay;
pub mod status_led;
pub mod watchdog;
