//! Outbound callbacks.

use crate::model::{Criteria, Dimension};
use serde::Serialize;

/// Receives everything the engine reports to its external owner.
///
/// All methods default to no-ops so hosts implement only what they consume.
pub trait CriteriaSink {
    /// A net-new draft was produced.
    fn on_apply(&mut self, _criteria: &Criteria) {}

    fn on_status_change(&mut self, _values: &[String]) {}

    fn on_category_change(&mut self, _values: &[String]) {}

    fn on_country_change(&mut self, _values: &[String]) {}

    /// The user cleared everything. Distinct from an apply with empty criteria.
    fn on_reset(&mut self) {}
}

/// Route a dimension change to the matching callback.
pub(crate) fn notify_dimension<S: CriteriaSink + ?Sized>(sink: &mut S, dimension: Dimension, values: &[String]) {
    match dimension {
        Dimension::Status => sink.on_status_change(values),
        Dimension::Category => sink.on_category_change(values),
        Dimension::Country => sink.on_country_change(values),
    }
}

impl<S: CriteriaSink + ?Sized> CriteriaSink for &mut S {
    fn on_apply(&mut self, criteria: &Criteria) {
        (**self).on_apply(criteria);
    }

    fn on_status_change(&mut self, values: &[String]) {
        (**self).on_status_change(values);
    }

    fn on_category_change(&mut self, values: &[String]) {
        (**self).on_category_change(values);
    }

    fn on_country_change(&mut self, values: &[String]) {
        (**self).on_country_change(values);
    }

    fn on_reset(&mut self) {
        (**self).on_reset();
    }
}

impl<S: CriteriaSink + ?Sized> CriteriaSink for Box<S> {
    fn on_apply(&mut self, criteria: &Criteria) {
        (**self).on_apply(criteria);
    }

    fn on_status_change(&mut self, values: &[String]) {
        (**self).on_status_change(values);
    }

    fn on_category_change(&mut self, values: &[String]) {
        (**self).on_category_change(values);
    }

    fn on_country_change(&mut self, values: &[String]) {
        (**self).on_country_change(values);
    }

    fn on_reset(&mut self) {
        (**self).on_reset();
    }
}

/// A sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl CriteriaSink for NoOpSink {}

/// One recorded outbound event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SinkEvent {
    Apply { criteria: Criteria },
    StatusChange { values: Vec<String> },
    CategoryChange { values: Vec<String> },
    CountryChange { values: Vec<String> },
    Reset,
}

/// A sink that keeps every event, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every criteria passed to `on_apply`.
    pub fn applies(&self) -> impl Iterator<Item = &Criteria> {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::Apply { criteria } => Some(criteria),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_apply(&self) -> Option<&Criteria> {
        self.applies().last()
    }

    #[must_use]
    pub fn apply_count(&self) -> usize {
        self.applies().count()
    }
}

impl CriteriaSink for RecordingSink {
    fn on_apply(&mut self, criteria: &Criteria) {
        self.events.push(SinkEvent::Apply {
            criteria: criteria.clone(),
        });
    }

    fn on_status_change(&mut self, values: &[String]) {
        self.events.push(SinkEvent::StatusChange {
            values: values.to_vec(),
        });
    }

    fn on_category_change(&mut self, values: &[String]) {
        self.events.push(SinkEvent::CategoryChange {
            values: values.to_vec(),
        });
    }

    fn on_country_change(&mut self, values: &[String]) {
        self.events.push(SinkEvent::CountryChange {
            values: values.to_vec(),
        });
    }

    fn on_reset(&mut self) {
        self.events.push(SinkEvent::Reset);
    }
}
