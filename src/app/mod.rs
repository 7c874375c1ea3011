//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the rules of the pump controller: input
//! arbitration, the pump actuator, and the weekly schedule.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod actuator;
pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
