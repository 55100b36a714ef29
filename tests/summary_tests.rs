//! Deviation counts and "All" semantics in scoped (report) contexts.

use criteria_composer::{
    Dimension, EngineConfig, FilterContext, FilterEngine, NumericFilter, NumericMode,
    RecordingSink, ScopeDefaults, SinkEvent,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn report_context() -> FilterContext {
    FilterContext::scoped(ScopeDefaults {
        status: strings(&["COMPLETE"]),
        category: strings(&["steel", "paper"]),
        country: strings(&["FR", "DE", "NL"]),
    })
}

fn report_engine() -> FilterEngine {
    let config = EngineConfig::builder().context(report_context()).build();
    FilterEngine::new(Vec::new(), &config, RecordingSink::new())
}

// ============================================================================
// Scoped "All"
// ============================================================================

#[test]
fn test_scoped_all_serializes_full_domain() {
    let engine = report_engine();
    let criteria = engine.criteria();

    assert_eq!(criteria.status, strings(&["COMPLETE"]));
    assert_eq!(criteria.category, strings(&["paper", "steel"]));
    assert_eq!(criteria.country, strings(&["DE", "FR", "NL"]));
    assert!(engine.summary().is_default());
}

#[test]
fn test_scoped_subset_counts_selected_values() {
    let mut engine = report_engine();
    engine.toggle(Dimension::Country, "DE");
    engine.toggle(Dimension::Country, "NL");

    let summary = engine.summary();
    assert_eq!(summary.country, 2);
    assert_eq!(summary.total, 2);
    assert_eq!(engine.criteria().country, strings(&["DE", "NL"]));
}

#[test]
fn test_scoped_selecting_every_value_is_all() {
    let mut engine = report_engine();
    engine.toggle(Dimension::Category, "steel");
    engine.toggle(Dimension::Category, "paper");

    assert!(engine.selector(Dimension::Category).is_all());
    assert!(engine.summary().is_default());
    assert_eq!(
        engine.sink().events(),
        &[
            SinkEvent::CategoryChange {
                values: strings(&["steel"])
            },
            SinkEvent::CategoryChange {
                values: strings(&["paper", "steel"])
            },
        ]
    );
}

// ============================================================================
// Mixed deviations
// ============================================================================

#[test]
fn test_total_adds_dimensions_and_groups() {
    let mut engine = report_engine();
    let id = engine.active_group_id().clone();
    engine.set_boolean_filter(&id, "recycled", Some(true)).unwrap();
    engine
        .set_numeric_filter(&id, "capacity_tph", NumericMode::Equals, Some(12.0), None, None)
        .unwrap();
    engine
        .set_numeric_filter(&id, "moisture_pct", NumericMode::Range, None, None, None)
        .unwrap();
    engine.toggle(Dimension::Country, "FR");

    let summary = engine.summary();
    assert_eq!(summary.group(&id), Some(2));
    assert_eq!(summary.country, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.summary_line(), "3 active (Country: 1, Constraints: 2)");
    assert_eq!(summary.badge().as_deref(), Some("3"));

    let applied = engine.sink().last_apply().unwrap();
    assert_eq!(
        applied.groups[0].numeric_filters.get("capacity_tph"),
        Some(&NumericFilter::equals(Some(12.0)))
    );
    assert!(!applied.groups[0].numeric_filters.contains_key("moisture_pct"));
}

#[test]
fn test_summary_serializes_for_hosts() {
    let mut engine = report_engine();
    engine.toggle(Dimension::Status, "COMPLETE");

    // With a single scoped status, ticking it is the same as All.
    assert!(engine.selector(Dimension::Status).is_all());

    let json = serde_json::to_value(engine.summary()).unwrap();
    assert_eq!(json["total"], 0);
    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Context switches
// ============================================================================

#[test]
fn test_switch_to_normal_reports_changed_dimensions() {
    let mut engine = report_engine();
    engine.toggle(Dimension::Country, "DE");
    engine.sink_mut().take();

    engine.set_context(FilterContext::default());

    let events = engine.sink().events();
    assert!(events.contains(&SinkEvent::StatusChange {
        values: strings(&["COMPLETE", "DELETED", "INCOMPLETE", "NONE"])
    }));
    assert!(events.contains(&SinkEvent::CategoryChange { values: vec![] }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, SinkEvent::CountryChange { .. })));
    assert_eq!(engine.criteria().country, strings(&["DE"]));
    assert_eq!(engine.summary().country, 1);
}

#[test]
fn test_same_context_is_a_no_op() {
    let mut engine = report_engine();
    engine.set_context(report_context());
    assert!(engine.sink().events().is_empty());
}
