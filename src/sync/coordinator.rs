//! Echo-suppressing sync coordinator.
//!
//! The local draft and the owner's copy are the same store seen from two
//! sides. Every local edit that changes the draft is emitted; the owner then
//! typically hands the emitted value straight back. The coordinator tells
//! those round-trips (echoes) apart from independent external changes by
//! comparing content, never identity:
//!
//! * `last_committed` is the raw draft that last produced an emission (blank
//!   groups included).
//! * `last_emitted` is what was actually sent, after blank groups were pruned.
//!
//! A local draft equal to `last_committed` is a no-op. An external draft whose
//! pruned form equals `last_emitted` is an echo and is ignored, so in-flight
//! local edits (such as a freshly added blank group) are not clobbered.

use super::snapshot::Snapshot;
use crate::model::{Dimension, FilterGroup};
use crate::serializer::clean_groups;
use std::collections::BTreeMap;

/// Lifecycle of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing seeded yet; the first draft observed is the seed
    Uninitialized,
    /// Trackers hold the last committed and emitted drafts
    Idle,
}

/// Outcome of a local draft mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftChange {
    /// Content equals the last committed draft
    Unchanged,
    /// Net-new draft; carries the pruned groups to emit
    Emit(Vec<FilterGroup>),
}

/// Outcome of an externally supplied value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalDecision {
    /// Round-trip of our own last emission
    Echo,
    /// Same content as the local state
    Unchanged,
    /// Independent change; the local state must be replaced
    Adopt,
}

#[derive(Debug, Clone)]
pub struct SyncCoordinator {
    phase: SyncPhase,
    last_committed: Option<Snapshot<Vec<FilterGroup>>>,
    last_emitted: Option<Snapshot<Vec<FilterGroup>>>,
    dimensions: BTreeMap<Dimension, Snapshot<Vec<String>>>,
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncCoordinator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SyncPhase::Uninitialized,
            last_committed: None,
            last_emitted: None,
            dimensions: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// The pruned groups last sent out, if any.
    #[must_use]
    pub fn last_emitted(&self) -> Option<&[FilterGroup]> {
        self.last_emitted.as_ref().map(|s| s.value().as_slice())
    }

    /// Record the initial seed. Never emits.
    pub fn seed(&mut self, draft: &[FilterGroup]) {
        self.record(draft);
        self.phase = SyncPhase::Idle;
        tracing::debug!("Sync seeded with {} group(s)", draft.len());
    }

    /// Record the wire value a dimension starts from.
    pub fn seed_dimension(&mut self, dimension: Dimension, wire: &[String]) {
        self.dimensions
            .insert(dimension, Snapshot::new(wire.to_vec()));
    }

    /// Decide whether a local draft must be emitted.
    pub fn on_draft_change(&mut self, draft: &[FilterGroup]) -> DraftChange {
        if self.phase == SyncPhase::Uninitialized {
            self.seed(draft);
            return DraftChange::Unchanged;
        }
        if self
            .last_committed
            .as_ref()
            .is_some_and(|s| s.matches(&draft.to_vec()))
        {
            return DraftChange::Unchanged;
        }

        let emitted = self.record(draft);
        tracing::debug!("Draft changed; emitting {} group(s)", emitted.len());
        DraftChange::Emit(emitted)
    }

    /// Decide what to do with a draft supplied by the external owner.
    ///
    /// On [`ExternalDecision::Adopt`] both trackers are reset to the incoming
    /// draft; the caller replaces its local state wholesale.
    pub fn on_external_draft(&mut self, incoming: &[FilterGroup]) -> ExternalDecision {
        if self.phase == SyncPhase::Uninitialized {
            self.seed(incoming);
            return ExternalDecision::Adopt;
        }

        let pruned = clean_groups(incoming);
        if self.last_emitted.as_ref().is_some_and(|s| s.matches(&pruned)) {
            tracing::debug!("External draft is an echo of the last emission; ignoring");
            return ExternalDecision::Echo;
        }
        if self
            .last_committed
            .as_ref()
            .is_some_and(|s| s.matches(&incoming.to_vec()))
        {
            return ExternalDecision::Unchanged;
        }

        tracing::debug!("Adopting external draft with {} group(s)", incoming.len());
        self.record(incoming);
        ExternalDecision::Adopt
    }

    /// Whether a dimension's new wire value must be reported outward.
    pub fn on_dimension_change(&mut self, dimension: Dimension, wire: &[String]) -> bool {
        let wire = wire.to_vec();
        if self
            .dimensions
            .get(&dimension)
            .is_some_and(|s| s.matches(&wire))
        {
            return false;
        }
        self.dimensions.insert(dimension, Snapshot::new(wire));
        true
    }

    /// Decide what to do with a dimension value supplied by the owner.
    pub fn on_external_dimension(&mut self, dimension: Dimension, wire: &[String]) -> ExternalDecision {
        let wire = wire.to_vec();
        if self
            .dimensions
            .get(&dimension)
            .is_some_and(|s| s.matches(&wire))
        {
            return ExternalDecision::Echo;
        }
        self.dimensions.insert(dimension, Snapshot::new(wire));
        ExternalDecision::Adopt
    }

    /// Reset both trackers to `draft` without emitting (user reset or adoption).
    pub fn reset_trackers(&mut self, draft: &[FilterGroup]) {
        self.record(draft);
        self.phase = SyncPhase::Idle;
    }

    fn record(&mut self, draft: &[FilterGroup]) -> Vec<FilterGroup> {
        let emitted = clean_groups(draft);
        self.last_committed = Some(Snapshot::new(draft.to_vec()));
        self.last_emitted = Some(Snapshot::new(emitted.clone()));
        emitted
    }
}
