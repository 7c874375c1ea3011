//! Water pump controller firmware — main entry point.
//!
//! Hexagonal architecture with a single fixed-rate control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   SystemClock   Console        │
//! │  (Sensor+Actuator) (EventSink)    (Monotonic)   (reader thread)│
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Sampler · Arbitration · Safety · Pump actuator        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  PeriodicTickers: control pass · status report · LED step      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use log::info;

use pumpctl::adapters::console::{self, ConsoleCommand, HELP_TEXT};
use pumpctl::adapters::hardware::HardwareAdapter;
use pumpctl::adapters::log_sink::LogEventSink;
use pumpctl::adapters::time::SystemClock;
use pumpctl::app::ports::{ActuatorPort, MonotonicClock};
use pumpctl::app::service::AppService;
use pumpctl::config::ControllerConfig;
use pumpctl::drivers::button::PushButton;
use pumpctl::drivers::led_patterns::{IndicatorEngine, LED_STEP_MS, pattern_for};
use pumpctl::drivers::relay::RelayDriver;
use pumpctl::drivers::status_led::StatusLed;
use pumpctl::drivers::watchdog::Watchdog;
use pumpctl::pins;
use pumpctl::scheduler::PeriodicTicker;
use pumpctl::sensors::water_level::FloatSwitch;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  pumpctl v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // No persistent storage: the controller always boots on defaults.
    let config = ControllerConfig::default();
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    // ── 2. Pins and drivers ───────────────────────────────────
    // SAFETY: each GPIO number is claimed exactly once, here.
    let (float_pin, button_pin, relay_pin, led_pin) = unsafe {
        (
            AnyIOPin::new(pins::FLOAT_SWITCH_GPIO),
            AnyIOPin::new(pins::BUTTON_GPIO),
            AnyIOPin::new(pins::RELAY_GPIO),
            AnyIOPin::new(pins::STATUS_LED_GPIO),
        )
    };

    let mut float_in = PinDriver::input(float_pin)?;
    float_in.set_pull(Pull::Up)?;
    let mut button_in = PinDriver::input(button_pin)?;
    button_in.set_pull(Pull::Up)?;

    let mut hw = HardwareAdapter::new(
        FloatSwitch::new(float_in),
        PushButton::new(button_in),
        RelayDriver::new(PinDriver::output(relay_pin)?, config.relay_active_high),
        StatusLed::new(PinDriver::output(led_pin)?),
    );

    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();
    let mut indicator = IndicatorEngine::new();

    // ── 3. Controller ─────────────────────────────────────────
    let mut app = AppService::new(config.clone())?;
    let boot_ms = clock.now_ms();
    app.start(boot_ms, &mut hw, &mut sink);

    let _console = console::spawn_console_reader()?;
    println!("{HELP_TEXT}");

    let mut control = PeriodicTicker::immediate(config.tick_interval_ms, boot_ms);
    let mut status = PeriodicTicker::new(config.status_interval_ms, boot_ms);
    let mut led_step = PeriodicTicker::immediate(LED_STEP_MS, boot_ms);

    info!("System ready. Entering control loop.");

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        let now = clock.now_ms();

        if control.poll(now) {
            while let Some(cmd) = console::next_command() {
                match cmd {
                    ConsoleCommand::Status => {
                        println!("{}", console::render_status(&app.status(now)))
                    }
                    ConsoleCommand::Config => match console::render_config(app.config()) {
                        Ok(json) => println!("{json}"),
                        Err(e) => println!("error: {e}"),
                    },
                    ConsoleCommand::Help => println!("{HELP_TEXT}"),
                    ConsoleCommand::PumpOn | ConsoleCommand::PumpOff => {
                        if let Some(app_cmd) = cmd.app_command() {
                            app.handle_command(app_cmd, now, &mut hw, &mut sink);
                        }
                    }
                }
            }

            app.tick(now, &mut hw, &mut sink);
            indicator.set_pattern(pattern_for(&app.status(now)));
            watchdog.feed();
        }

        if status.poll(now) {
            app.report_status(now, &mut sink);
        }

        if led_step.poll(now) {
            hw.set_indicator(indicator.tick(LED_STEP_MS));
        }

        let now = clock.now_ms();
        let wait_ms = control
            .until_due_ms(now)
            .min(status.until_due_ms(now))
            .min(led_step.until_due_ms(now));
        std::thread::sleep(Duration::from_millis(u64::from(wait_ms.max(1))));
    }
}
