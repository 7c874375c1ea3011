//! Integration tests for `AppService` driven tick by tick against
//! `MockHardware` and a manual clock.

use pumpctl::app::events::{AppEvent, TransitionReason, WeeklyOutcome};
use pumpctl::config::ControllerConfig;
use pumpctl::error::SensorError;
use pumpctl::sensors::WaterLevel;

use crate::mock_hw::{Bench, fast_config};

// ── Weekly top-up ─────────────────────────────────────────────

#[test]
fn weekly_refill_stops_when_tank_reads_full() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);

    b.run_for(59_500);
    assert!(!b.app.is_pump_on());

    b.step(); // t = 60 s
    assert!(b.app.is_pump_on());
    assert!(b.hw.relay_on());
    assert_eq!(b.sink.starts(), vec![TransitionReason::WeeklyRefill]);

    b.run_for(9_500);
    b.hw.level = Ok(WaterLevel::Full);
    b.step(); // t = 70 s, 10 s into the run

    assert!(!b.app.is_pump_on());
    assert!(!b.hw.relay_on());
    assert!(b.sink.events.contains(&AppEvent::PumpStopped {
        reason: TransitionReason::TankFull,
        run_ms: 10_000,
    }));
    assert_eq!(b.sink.count(|e| matches!(e, AppEvent::TimeoutAlert { .. })), 0);
}

#[test]
fn weekly_check_fires_while_running_without_resetting_run_time() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);
    b.run_for(40_000);
    b.app
        .request_start(TransitionReason::Command, 40_000, &mut b.hw, &mut b.sink);

    b.run_for(20_000); // t = 60 s
    assert_eq!(b.app.last_weekly_check_ms(), 60_000);
    assert!(
        b.sink
            .events
            .contains(&AppEvent::WeeklyCheck(WeeklyOutcome::RefillRequested))
    );
    assert_eq!(b.sink.starts(), vec![TransitionReason::Command]);

    b.run_for(10_000); // t = 70 s, 30 s after the command start
    assert!(!b.app.is_pump_on());
    assert_eq!(b.sink.stops(), vec![TransitionReason::Timeout]);
}

#[test]
fn weekly_check_with_full_tank_only_observes() {
    let mut b = Bench::new(fast_config(), WaterLevel::Full, 0);
    b.run_for(60_000);

    assert!(b.sink.starts().is_empty());
    assert!(
        b.sink
            .events
            .contains(&AppEvent::WeeklyCheck(WeeklyOutcome::LevelNormal))
    );
    assert_eq!(b.app.status(60_000).seconds_to_next_weekly_check, 60);
}

#[test]
fn weekly_refill_can_restart_pump_right_after_timeout() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);
    b.run_for(29_000);
    b.hw.press();
    b.step(); // t = 29.5 s, manual start
    b.hw.release();

    b.run_for(30_000); // t = 59.5 s: timeout
    assert!(!b.app.is_pump_on());
    b.step(); // t = 60 s: weekly check, level still low
    assert!(b.app.is_pump_on());

    assert_eq!(
        b.sink.starts(),
        vec![TransitionReason::Manual, TransitionReason::WeeklyRefill]
    );
    assert_eq!(b.sink.stops(), vec![TransitionReason::Timeout]);
    assert!(!b.app.timeout_alarm());
}

// ── Manual control ────────────────────────────────────────────

#[test]
fn held_button_toggles_once_and_next_press_stops() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);
    b.hw.press();
    for _ in 0..10 {
        b.step();
    }
    assert!(b.app.is_pump_on());
    assert_eq!(b.sink.starts(), vec![TransitionReason::Manual]);

    b.hw.release();
    b.step();
    b.hw.press();
    b.step();
    assert!(!b.app.is_pump_on());
    assert_eq!(b.sink.stops(), vec![TransitionReason::Manual]);
}

#[test]
fn manual_start_on_full_tank_never_leaves_pump_running() {
    let mut b = Bench::new(fast_config(), WaterLevel::Full, 0);
    b.hw.press();
    b.step();

    assert!(!b.app.is_pump_on());
    assert!(!b.hw.relay_on());
    assert_eq!(b.sink.stops(), vec![TransitionReason::TankFull]);
}

// ── Safety timeout ────────────────────────────────────────────

#[test]
fn timeout_alert_latches_and_loop_keeps_running() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);
    b.hw.press();
    b.step(); // t = 0.5 s
    b.hw.release();

    b.run_for(30_000); // t = 30.5 s
    assert!(!b.app.is_pump_on());
    assert!(b.app.timeout_alarm());
    assert_eq!(b.app.timeout_trips(), 1);
    assert_eq!(
        b.sink.count(|e| *e == AppEvent::TimeoutAlert { run_ms: 30_000 }),
        1
    );

    b.step();
    b.hw.press();
    b.step();
    assert!(b.app.is_pump_on());
    assert!(!b.app.timeout_alarm());
}

#[test]
fn timeout_and_weekly_clock_survive_rollover() {
    let start = u32::MAX - 5_000;
    let mut b = Bench::new(fast_config(), WaterLevel::Low, start);
    b.app
        .request_start(TransitionReason::Command, start, &mut b.hw, &mut b.sink);

    b.run_for(29_500);
    assert!(b.app.is_pump_on());
    b.step();
    assert!(!b.app.is_pump_on());
    assert_eq!(b.sink.stops(), vec![TransitionReason::Timeout]);
    assert_eq!(b.sink.count(|e| matches!(e, AppEvent::WeeklyCheck(_))), 0);
    assert_eq!(b.app.status(b.now()).uptime_seconds, 30);
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn unreadable_float_switch_is_treated_as_low() {
    let mut b = Bench::new(fast_config(), WaterLevel::Full, 0);
    b.step();
    b.hw.level = Err(SensorError::GpioReadFailed);
    b.run_for(2_000);

    assert_eq!(b.app.water_level(), WaterLevel::Low);
    assert_eq!(b.sink.count(|e| matches!(e, AppEvent::SensorFault(_))), 1);
    assert!(b.sink.events.contains(&AppEvent::LowLevelWarning));

    b.hw.level = Ok(WaterLevel::Full);
    b.step();
    assert_eq!(b.sink.count(|e| *e == AppEvent::SensorRecovered), 1);
    assert_eq!(b.app.water_level(), WaterLevel::Full);
}

#[test]
fn level_confirmation_delays_cutoff() {
    let config = ControllerConfig {
        level_confirm_samples: 3,
        ..fast_config()
    };
    let mut b = Bench::new(config, WaterLevel::Low, 0);
    b.app
        .request_start(TransitionReason::Command, 0, &mut b.hw, &mut b.sink);

    b.hw.level = Ok(WaterLevel::Full);
    b.step();
    b.step();
    assert!(b.app.is_pump_on());
    b.step();
    assert!(!b.app.is_pump_on());
}

#[test]
fn low_level_warning_only_while_pump_is_off() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);
    let warnings = |b: &Bench| b.sink.count(|e| *e == AppEvent::LowLevelWarning);

    b.app
        .request_start(TransitionReason::Command, 0, &mut b.hw, &mut b.sink);
    b.run_for(5_000);
    assert!(b.app.is_pump_on());
    assert_eq!(warnings(&b), 0);

    let now = b.now();
    b.app
        .request_stop(TransitionReason::Command, now, &mut b.hw, &mut b.sink);
    b.step();
    assert_eq!(warnings(&b), 1);

    b.hw.level = Ok(WaterLevel::Full);
    b.sink.clear();
    b.run_for(2_000);
    assert_eq!(warnings(&b), 0);
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn periodic_status_event_carries_snapshot() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);
    b.run_for(5_000);
    b.sink.clear();
    b.app.report_status(5_000, &mut b.sink);

    match b.sink.events.as_slice() {
        [AppEvent::Status(s)] => {
            assert!(!s.pump_on);
            assert_eq!(s.water_level, WaterLevel::Low);
            assert_eq!(s.uptime_seconds, 5);
            assert_eq!(s.seconds_to_next_weekly_check, 55);
        }
        other => panic!("unexpected events: {other:?}"),
    }
}
