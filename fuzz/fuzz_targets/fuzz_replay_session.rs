#![no_main]
use criteria_composer::session::{InputFormat, Session};
use criteria_composer::{replay, EngineConfig};
use libfuzzer_sys::fuzz_target;

/// Fuzz session parsing and replay.
///
/// Exercises every engine action with arbitrary arguments; replay must
/// never panic and must always leave at least one group behind.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(session) = Session::parse(s, InputFormat::Yaml) {
            let report = replay(&session, &EngineConfig::default());
            assert!(!report.summary.groups.is_empty());
        }
    }
});
