//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to                     |
//! |------------|------------------|---------------------------------|
//! | `hardware` | SensorPort       | float switch, push-button GPIO  |
//! |            | ActuatorPort     | relay and status LED GPIO       |
//! | `log_sink` | EventSink        | Serial log output               |
//! | `time`     | MonotonicClock   | ESP32 high-resolution timer     |
//! | `console`  | —                | UART text commands → AppCommand |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod time;
