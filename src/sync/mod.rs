//! Reconciliation between the local draft and its external owner.

mod coordinator;
mod snapshot;

pub use coordinator::{DraftChange, ExternalDecision, SyncCoordinator, SyncPhase};
pub use snapshot::Snapshot;
