//! **Live filter-criteria composition.**
//!
//! `criteria-composer` turns incremental filter-panel edits into a normalized,
//! backend-consumable [`Criteria`] object and keeps the local draft consistent
//! with an externally owned copy, without echo loops.
//!
//! Three contracts hold at all times:
//!
//! - **Boolean composition**: constraints inside a [`FilterGroup`] are OR'd;
//!   groups are AND'd.
//! - **Tri-state dimensions**: status, category and country are each either
//!   "All" or an explicit subset. Unchecking the last value reverts to All;
//!   what All means depends on the [`FilterContext`].
//! - **Live, echo-safe sync**: every net-new draft is emitted immediately, and
//!   a round-trip of that emission from the owner is recognized and ignored.
//!
//! ## Modules
//!
//! - **[`model`]**: groups, numeric entries, dimensions, host context,
//!   catalogue and the emitted criteria.
//! - **[`store`]**: [`FilterGroupStore`], the ordered, never-empty group list.
//! - **[`selector`]**: [`DimensionSelector`], the tri-state selection logic.
//! - **[`serializer`]** and **[`summary`]**: pure functions from state to
//!   criteria and to deviation-from-default counts.
//! - **[`sync`]**: [`SyncCoordinator`], echo suppression.
//! - **[`engine`]**: [`FilterEngine`], the facade wiring it all to a
//!   [`CriteriaSink`].
//! - **[`catalogue`]**: token-gated catalogue refresh through
//!   [`CatalogueSource`].
//!
//! ## Getting Started
//!
//! ```
//! use criteria_composer::{EngineConfig, FilterEngine, RecordingSink};
//!
//! let mut engine = FilterEngine::new(Vec::new(), &EngineConfig::default(), RecordingSink::new());
//! let group = engine.active_group_id().clone();
//!
//! engine.set_boolean_filter(&group, "recycled", Some(true)).unwrap();
//! engine.set_boolean_filter(&group, "virgin", Some(false)).unwrap();
//!
//! let applied = engine.sink().last_apply().unwrap();
//! assert_eq!(applied.groups.len(), 1);
//! assert_eq!(engine.summary().total, 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `http-catalogue` (default): [`catalogue::HttpCatalogueSource`], a
//!   `reqwest` client with a file cache.

#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]

pub mod catalogue;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod selector;
pub mod serializer;
pub mod session;
pub mod store;
pub mod summary;
pub mod sync;
pub mod utils;
pub mod viewmodel;

pub use catalogue::{CatalogueSource, RefreshOutcome, RefreshTicket, StaticCatalogueSource};
pub use config::{ConfigError, EngineConfig, EngineConfigBuilder, Validatable};
pub use engine::{CriteriaSink, EngineAction, FilterEngine, NoOpSink, RecordingSink, SinkEvent};
pub use error::{CriteriaError, ErrorContext, OptionContext, Result};
pub use model::{
    Catalogue, CatalogueScope, Criteria, Dimension, FieldDescriptor, FilterContext, FilterGroup,
    GroupId, NumericFilter, NumericMode, ScopeDefaults,
};
pub use selector::{DimensionSelections, DimensionSelector};
pub use serializer::serialize;
pub use session::{replay, ReplayReport, Session};
pub use store::{FilterGroupStore, StoreWarning};
pub use summary::ActiveFilterSummary;
pub use sync::{ExternalDecision, SyncCoordinator};
