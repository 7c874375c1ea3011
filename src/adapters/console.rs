//! Serial console adapter: line-oriented text commands.
//!
//! A reader thread assembles bytes from the UART console (stdin) into
//! lines, parses them, and hands the commands to the control loop over a
//! bounded `embassy-sync` channel.  The control loop drains the channel
//! once per pass, before arbitration, so console requests are serialised
//! with the physical inputs and go through the same actuator entry points.
//!
//! ```text
//! ┌───────────────┐  ConsoleCommand  ┌──────────────┐
//! │ Reader thread │─────────────────▶│ Control loop │
//! │ (stdin bytes) │  CONSOLE_CHANNEL │  (tick)      │
//! └───────────────┘                  └──────────────┘
//! ```
//!
//! | Command    | Effect                                |
//! |------------|---------------------------------------|
//! | `status`   | print the controller status           |
//! | `pump_on`  | request a start (reason `command`)    |
//! | `pump_off` | request a stop (reason `command`)     |
//! | `config`   | print the active configuration (JSON) |
//! | `help`     | list commands                         |

use core::fmt::Write as _;
use std::io::Read;
use std::thread::JoinHandle;
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use crate::app::commands::AppCommand;
use crate::app::events::StatusReport;
use crate::config::ControllerConfig;
use crate::error::ConsoleError;

/// Longest accepted command line, excluding the terminator.
pub const LINE_CAPACITY: usize = 64;

/// Channel depth for console commands.
const CONSOLE_DEPTH: usize = 4;

/// Reader-thread stack (bytes).
const READER_STACK_SIZE: usize = 4096;

/// Poll interval while the console has no input.
const IDLE_POLL: Duration = Duration::from_millis(20);

/// Console command channel: reader thread → control loop.
pub static CONSOLE_CHANNEL: Channel<CriticalSectionRawMutex, ConsoleCommand, CONSOLE_DEPTH> =
    Channel::new();

pub const HELP_TEXT: &str = "commands:\n  \
    status    show pump, level, uptime and next weekly check\n  \
    pump_on   switch the pump on\n  \
    pump_off  switch the pump off\n  \
    config    show the active configuration\n  \
    help      show this list";

// ───────────────────────────────────────────────────────────────
// Parsing
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Status,
    PumpOn,
    PumpOff,
    Config,
    Help,
}

impl ConsoleCommand {
    /// The controller command this console command maps to, if any.
    pub fn app_command(self) -> Option<AppCommand> {
        match self {
            Self::PumpOn => Some(AppCommand::StartPump),
            Self::PumpOff => Some(AppCommand::StopPump),
            Self::Status | Self::Config | Self::Help => None,
        }
    }
}

/// Parse one console line.  Surrounding whitespace and case are ignored.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, ConsoleError> {
    let word = line.trim();
    if word.is_empty() {
        return Err(ConsoleError::Empty);
    }
    if word.len() > LINE_CAPACITY {
        return Err(ConsoleError::LineTooLong);
    }
    const TABLE: [(&str, ConsoleCommand); 5] = [
        ("status", ConsoleCommand::Status),
        ("pump_on", ConsoleCommand::PumpOn),
        ("pump_off", ConsoleCommand::PumpOff),
        ("config", ConsoleCommand::Config),
        ("help", ConsoleCommand::Help),
    ];
    TABLE
        .iter()
        .find(|(name, _)| word.eq_ignore_ascii_case(name))
        .map(|&(_, cmd)| cmd)
        .ok_or(ConsoleError::UnknownCommand)
}

// ───────────────────────────────────────────────────────────────
// Line assembly
// ───────────────────────────────────────────────────────────────

/// Accumulates console bytes into fixed-capacity lines.
///
/// `\n` and `\r` both terminate a line; blank lines (including the gap in
/// a `\r\n` pair) are skipped.  Bytes past [`LINE_CAPACITY`] are dropped
/// and the line is reported as [`ConsoleError::LineTooLong`].
#[derive(Default)]
pub struct LineAssembler {
    buf: heapless::String<LINE_CAPACITY>,
    overflowed: bool,
    non_ascii: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.  Returns a parse result when a line completes.
    pub fn push(&mut self, byte: u8) -> Option<Result<ConsoleCommand, ConsoleError>> {
        match byte {
            b'\n' | b'\r' => self.finish(),
            _ if !byte.is_ascii() => {
                self.non_ascii = true;
                None
            }
            _ => {
                if self.buf.push(char::from(byte)).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Option<Result<ConsoleCommand, ConsoleError>> {
        let result = if self.overflowed {
            Some(Err(ConsoleError::LineTooLong))
        } else if self.non_ascii {
            Some(Err(ConsoleError::InvalidUtf8))
        } else if self.buf.trim().is_empty() {
            None
        } else {
            Some(parse_line(&self.buf))
        };
        self.buf.clear();
        self.overflowed = false;
        self.non_ascii = false;
        result
    }
}

// ───────────────────────────────────────────────────────────────
// Hand-off
// ───────────────────────────────────────────────────────────────

/// Queue a command for the control loop.  Returns `false` if the channel
/// is full and the command was dropped.
pub fn submit(cmd: ConsoleCommand) -> bool {
    if CONSOLE_CHANNEL.try_send(cmd).is_err() {
        warn!("console: command queue full, dropping {cmd:?}");
        return false;
    }
    true
}

/// Take the next pending command, if any.  Never blocks.
pub fn next_command() -> Option<ConsoleCommand> {
    CONSOLE_CHANNEL.try_receive().ok()
}

/// Spawn the console reader thread on stdin.
pub fn spawn_console_reader() -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("console".into())
        .stack_size(READER_STACK_SIZE)
        .spawn(|| {
            info!("console: reader started");
            let mut assembler = LineAssembler::new();
            let mut stdin = std::io::stdin();
            let mut byte = [0u8; 1];
            loop {
                match stdin.read(&mut byte) {
                    Ok(1) => match assembler.push(byte[0]) {
                        Some(Ok(cmd)) => {
                            submit(cmd);
                        }
                        Some(Err(e)) => println!("{}", render_error(e)),
                        None => {}
                    },
                    // UART console reports "no data" as EOF or WouldBlock.
                    Ok(_) => std::thread::sleep(IDLE_POLL),
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                    Err(_) => std::thread::sleep(IDLE_POLL),
                }
            }
        })
}

// ───────────────────────────────────────────────────────────────
// Rendering
// ───────────────────────────────────────────────────────────────

/// Human-readable status reply.
pub fn render_status(status: &StatusReport) -> heapless::String<256> {
    let mut out = heapless::String::new();
    let level = match status.water_level {
        crate::sensors::WaterLevel::Full => "full",
        crate::sensors::WaterLevel::Low => "low",
    };
    let secs = status.seconds_to_next_weekly_check;
    // Capacity covers the longest possible rendering; a write error
    // would only truncate the reply.
    let _ = write!(
        out,
        "pump: {}\nlevel: {level}\nnext weekly check: {}d {:02}h {:02}m {:02}s\nuptime: {} s",
        if status.pump_on { "ON" } else { "OFF" },
        secs / 86_400,
        (secs / 3_600) % 24,
        (secs / 60) % 60,
        secs % 60,
        status.uptime_seconds,
    );
    if let Some(run) = status.pump_run_seconds {
        let _ = write!(out, "\npump running: {run} s");
    }
    if status.timeout_alarm {
        let _ = out.push_str("\nALARM: last run hit the safety timeout");
    }
    out
}

/// Error reply for a rejected line.
pub fn render_error(err: ConsoleError) -> heapless::String<64> {
    let mut out = heapless::String::new();
    let _ = write!(out, "error: {err} (try 'help')");
    out
}

/// Active configuration as a JSON line.
pub fn render_config(config: &ControllerConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string(config)
}
