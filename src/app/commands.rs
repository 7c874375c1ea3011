//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (serial
//! console, future remote links) that the
//! [`AppService`](super::service::AppService) serialises with the
//! physical inputs.

/// Commands that external adapters can send into the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch the pump on (subject to the same safety rules as the button).
    StartPump,

    /// Switch the pump off.
    StopPump,
}
