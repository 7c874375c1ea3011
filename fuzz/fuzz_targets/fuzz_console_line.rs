//! Fuzz target: console `LineAssembler::push` and `parse_line`
//!
//! Drives arbitrary byte sequences through the line assembler and the
//! parser and asserts that neither panics, that the assembler never
//! yields an empty-line error, and that whatever `parse_line` accepts is
//! a known command name.
//!
//! cargo fuzz run fuzz_console_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use pumpctl::adapters::console::{LineAssembler, parse_line};
use pumpctl::error::ConsoleError;

fuzz_target!(|data: &[u8]| {
    let mut assembler = LineAssembler::new();
    for &byte in data {
        if let Some(result) = assembler.push(byte) {
            assert_ne!(result, Err(ConsoleError::Empty), "blank lines are skipped");
        }
    }

    if let Ok(text) = core::str::from_utf8(data) {
        if parse_line(text).is_ok() {
            let word = text.trim().to_ascii_lowercase();
            assert!(
                ["status", "pump_on", "pump_off", "config", "help"].contains(&word.as_str()),
                "accepted unknown command {word:?}"
            );
        }
    }
});
