//! Console → channel → controller hand-off.
//!
//! `CONSOLE_CHANNEL` is a process-wide static, so everything that touches
//! it lives in a single test to keep parallel test threads from racing.

use pumpctl::adapters::console::{self, ConsoleCommand, LineAssembler};
use pumpctl::app::events::TransitionReason;
use pumpctl::sensors::WaterLevel;

use crate::mock_hw::{Bench, fast_config};

fn drain_into(b: &mut Bench) -> Vec<ConsoleCommand> {
    let now = b.now();
    let mut seen = Vec::new();
    while let Some(cmd) = console::next_command() {
        if let Some(app_cmd) = cmd.app_command() {
            b.app.handle_command(app_cmd, now, &mut b.hw, &mut b.sink);
        }
        seen.push(cmd);
    }
    seen
}

#[test]
fn typed_commands_reach_the_controller_through_the_channel() {
    let mut b = Bench::new(fast_config(), WaterLevel::Low, 0);
    let mut assembler = LineAssembler::new();

    for &byte in b"pump_on\r\nstatus\n" {
        if let Some(Ok(cmd)) = assembler.push(byte) {
            assert!(console::submit(cmd));
        }
    }
    b.step();
    assert_eq!(
        drain_into(&mut b),
        vec![ConsoleCommand::PumpOn, ConsoleCommand::Status]
    );
    assert!(b.app.is_pump_on());
    assert_eq!(b.sink.starts(), vec![TransitionReason::Command]);

    // Commands still obey the level cutoff on the next pass.
    b.hw.level = Ok(WaterLevel::Full);
    b.step();
    assert!(!b.app.is_pump_on());
    assert_eq!(b.sink.stops(), vec![TransitionReason::TankFull]);

    // The queue is bounded; overflow drops the newest command.
    for _ in 0..4 {
        assert!(console::submit(ConsoleCommand::Help));
    }
    assert!(!console::submit(ConsoleCommand::PumpOn));
    assert_eq!(drain_into(&mut b), vec![ConsoleCommand::Help; 4]);
    assert!(!b.app.is_pump_on());

    assert!(console::submit(ConsoleCommand::PumpOff));
    assert_eq!(drain_into(&mut b), vec![ConsoleCommand::PumpOff]);
    assert_eq!(b.sink.stops(), vec![TransitionReason::TankFull]);
}
