#![no_main]
use criteria_composer::session::{parse_groups, InputFormat};
use criteria_composer::{EngineConfig, ExternalDecision, FilterEngine, RecordingSink};
use libfuzzer_sys::fuzz_target;

/// Fuzz draft ingestion.
///
/// Any draft that parses must seed an engine, serialize without blank
/// groups, and be recognized as an echo once emitted.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(groups) = parse_groups(s, InputFormat::Json) else {
        return;
    };

    let mut engine = FilterEngine::new(groups, &EngineConfig::default(), RecordingSink::new());
    assert!(!engine.groups().is_empty());

    let criteria = engine.criteria();
    assert!(criteria.groups.iter().all(|g| g.constraint_count() > 0));

    engine.add_group();
    if let Some(applied) = engine.sink().last_apply().cloned() {
        assert_eq!(
            engine.sync_external_groups(applied.groups),
            ExternalDecision::Echo
        );
    }
});
