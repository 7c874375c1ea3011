//! Console log output through `LogEventSink`.
//!
//! The `log` facade takes one global logger per process, so records are
//! tagged with the emitting thread and each test only looks at its own.

use std::sync::Mutex;
use std::thread::{self, ThreadId};

use log::{Level, LevelFilter, Log, Metadata, Record};

use pumpctl::adapters::log_sink::LogEventSink;
use pumpctl::app::service::AppService;
use pumpctl::sensors::WaterLevel;

use crate::mock_hw::{MockHardware, fast_config};

static RECORDS: Mutex<Vec<(ThreadId, Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = RECORDS.lock() {
            records.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn install() {
    // Another test may have installed it already.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
}

/// Drain the records logged by the calling thread.
fn take_own() -> Vec<(Level, String)> {
    let me = thread::current().id();
    let mut records = RECORDS.lock().unwrap();
    let (own, rest): (Vec<_>, Vec<_>) = records.drain(..).partition(|(id, _, _)| *id == me);
    *records = rest;
    own.into_iter().map(|(_, level, line)| (level, line)).collect()
}

#[test]
fn each_pump_event_is_logged_once() {
    install();
    let mut app = AppService::new(fast_config()).unwrap();
    let mut hw = MockHardware::new(WaterLevel::Low);
    let mut sink = LogEventSink::new();
    app.start(0, &mut hw, &mut sink);
    take_own();

    hw.press();
    app.tick(500, &mut hw, &mut sink);
    hw.release();
    let lines = take_own();
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].1.contains("on (manual)"));

    for i in 2..=61 {
        app.tick(i * 500, &mut hw, &mut sink);
    }
    assert!(!app.is_pump_on());
    let lines = take_own();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert_eq!(lines[0].0, Level::Info);
    assert!(lines[0].1.contains("off (timeout)"));
    assert_eq!(lines[1].0, Level::Error);
    assert!(lines[1].1.contains("pump timeout"));
}
