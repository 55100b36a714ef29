//! The filter engine facade.
//!
//! [`FilterEngine`] owns the group store, the three dimension selectors, the
//! current catalogue and the sync coordinator, and reports to a
//! [`CriteriaSink`]. Every editing operation is synchronous: it mutates
//! state, runs change detection and, when the draft is net-new, emits the
//! serialized [`Criteria`] through `on_apply`. Dimension edits report their
//! wire value through the matching `on_*_change` callback instead.

mod action;
mod sink;

pub use action::{EngineAction, GroupRef};
pub use sink::{CriteriaSink, NoOpSink, RecordingSink, SinkEvent};

use crate::catalogue::{CatalogueRefresher, CatalogueSource, RefreshOutcome, RefreshTicket, RequestToken};
use crate::config::EngineConfig;
use crate::error;
use crate::model::{
    Catalogue, CatalogueScope, Criteria, Dimension, FilterContext, FilterGroup, GroupId, NumericMode,
};
use crate::selector::{DimensionSelections, DimensionSelector};
use crate::serializer::{dimension_wire, serialize};
use crate::store::{FilterGroupStore, StoreWarning};
use crate::summary::ActiveFilterSummary;
use crate::sync::{DraftChange, ExternalDecision, SyncCoordinator};
use crate::viewmodel::{build_tab, FilterTab, RowSource, TabView, WarningBanner};
use std::collections::BTreeSet;

/// Live filter-criteria engine.
pub struct FilterEngine<S: CriteriaSink = RecordingSink> {
    store: FilterGroupStore,
    selections: DimensionSelections,
    context: FilterContext,
    catalogue: Catalogue,
    sync: SyncCoordinator,
    refresher: CatalogueRefresher,
    warnings: WarningBanner,
    sink: S,
}

impl<S: CriteriaSink> FilterEngine<S> {
    /// Seed an engine from the owner's draft. Seeding never emits.
    ///
    /// A catalogue request for the initial category scope is left pending;
    /// see [`take_pending_refresh`](Self::take_pending_refresh).
    pub fn new(initial_groups: Vec<FilterGroup>, config: &EngineConfig, sink: S) -> Self {
        let context = config.context.clone();
        let mut engine = Self {
            store: FilterGroupStore::from_groups(initial_groups, config.groups.clone()),
            selections: DimensionSelections::for_context(&context),
            context,
            catalogue: Catalogue::empty(),
            sync: SyncCoordinator::new(),
            refresher: CatalogueRefresher::new(),
            warnings: WarningBanner::from_config(&config.warnings),
            sink,
        };
        engine.sync.seed(&engine.store.to_vec());
        engine.seed_dimensions();
        let scope = engine.category_scope();
        engine.refresher.issue(scope);
        engine
    }

    fn seed_dimensions(&mut self) {
        for dimension in Dimension::ALL {
            let wire = self.wire(dimension);
            self.sync.seed_dimension(dimension, &wire);
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// The criteria the current draft serializes to.
    #[must_use]
    pub fn criteria(&self) -> Criteria {
        serialize(self.store.groups(), &self.selections, &self.context)
    }

    #[must_use]
    pub fn summary(&self) -> ActiveFilterSummary {
        ActiveFilterSummary::compute(self.store.groups(), &self.selections, &self.context)
    }

    #[must_use]
    pub const fn store(&self) -> &FilterGroupStore {
        &self.store
    }

    /// Snapshot of the raw draft, blank groups included.
    #[must_use]
    pub fn groups(&self) -> Vec<FilterGroup> {
        self.store.to_vec()
    }

    #[must_use]
    pub const fn active_group_id(&self) -> &GroupId {
        self.store.active_id()
    }

    #[must_use]
    pub const fn selector(&self, dimension: Dimension) -> &DimensionSelector {
        self.selections.get(dimension)
    }

    #[must_use]
    pub const fn selections(&self) -> &DimensionSelections {
        &self.selections
    }

    #[must_use]
    pub const fn context(&self) -> &FilterContext {
        &self.context
    }

    #[must_use]
    pub const fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The current warning, if any (auto-clear applied).
    pub fn warning(&mut self) -> Option<&str> {
        self.warnings.message()
    }

    pub fn dismiss_warning(&mut self) {
        self.warnings.clear();
    }

    /// Rows of one tab, for the active group.
    #[must_use]
    pub fn tab_view(&self, tab: FilterTab) -> TabView {
        let dimension = match tab {
            FilterTab::Dimension(d) => d,
            FilterTab::Materials | FilterTab::Technical => Dimension::Status,
        };
        build_tab(
            tab,
            RowSource {
                selector: self.selections.get(dimension),
                group: self.store.get(self.store.active_id()),
                catalogue: &self.catalogue,
                context: &self.context,
            },
        )
    }

    // ------------------------------------------------------------------
    // Group operations
    // ------------------------------------------------------------------

    /// Append a fresh group and make it active.
    pub fn add_group(&mut self) -> GroupId {
        let id = self.store.add_group();
        self.commit_draft();
        id
    }

    pub fn delete_group(&mut self, id: &GroupId) -> Result<(), StoreWarning> {
        let outcome = self.store.delete_group(id);
        self.finish(outcome)
    }

    pub fn duplicate_group(&mut self, id: &GroupId) -> Result<GroupId, StoreWarning> {
        let outcome = self.store.duplicate_group(id);
        self.finish(outcome)
    }

    pub fn rename_group(&mut self, id: &GroupId, name: impl Into<String>) -> Result<(), StoreWarning> {
        let outcome = self.store.rename_group(id, name);
        self.finish(outcome)
    }

    pub fn set_active_group(&mut self, id: &GroupId) -> Result<(), StoreWarning> {
        let outcome = self.store.set_active_group(id);
        self.finish(outcome)
    }

    pub fn clear_group(&mut self, id: &GroupId) -> Result<(), StoreWarning> {
        let outcome = self.store.clear_group(id);
        self.finish(outcome)
    }

    pub fn set_boolean_filter(
        &mut self,
        id: &GroupId,
        field: &str,
        value: Option<bool>,
    ) -> Result<(), StoreWarning> {
        let outcome = self.store.set_boolean_filter(id, field, value);
        self.finish(outcome)
    }

    pub fn set_numeric_filter(
        &mut self,
        id: &GroupId,
        field: &str,
        mode: NumericMode,
        value: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<(), StoreWarning> {
        let outcome = self.store.set_numeric_filter(id, field, mode, value, min, max);
        self.finish(outcome)
    }

    pub fn clear_numeric_filter(&mut self, id: &GroupId, field: &str) -> Result<(), StoreWarning> {
        let outcome = self.store.clear_numeric_filter(id, field);
        self.finish(outcome)
    }

    /// Commit on success; log and surface the warning on rejection.
    fn finish<T>(&mut self, outcome: Result<T, StoreWarning>) -> Result<T, StoreWarning> {
        match outcome {
            Ok(value) => {
                self.commit_draft();
                Ok(value)
            }
            Err(warning) => Err(self.reject(warning)),
        }
    }

    fn reject(&mut self, warning: StoreWarning) -> StoreWarning {
        tracing::warn!("{warning}");
        self.warnings.set(warning.to_string());
        warning
    }

    fn commit_draft(&mut self) {
        if let DraftChange::Emit(groups) = self.sync.on_draft_change(&self.store.to_vec()) {
            let criteria = Criteria {
                groups,
                status: self.wire(Dimension::Status),
                category: self.wire(Dimension::Category),
                country: self.wire(Dimension::Country),
            };
            self.sink.on_apply(&criteria);
        }
    }

    // ------------------------------------------------------------------
    // Dimension operations
    // ------------------------------------------------------------------

    /// Click on one value of a dimension.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        if self.selections.get_mut(dimension).toggle(value) {
            self.commit_dimension(dimension);
        }
    }

    /// Click on a dimension's synthetic "All" entry.
    pub fn select_all(&mut self, dimension: Dimension) {
        if self.selections.get_mut(dimension).select_all() {
            self.commit_dimension(dimension);
        }
    }

    fn wire(&self, dimension: Dimension) -> Vec<String> {
        dimension_wire(self.selections.get(dimension), &self.context)
    }

    fn commit_dimension(&mut self, dimension: Dimension) {
        let wire = self.wire(dimension);
        if self.sync.on_dimension_change(dimension, &wire) {
            tracing::debug!("{} changed to {:?}", dimension, wire);
            sink::notify_dimension(&mut self.sink, dimension, &wire);
            if dimension == Dimension::Category {
                let scope = self.category_scope();
                self.refresher.issue(scope);
            }
        }
    }

    /// Scope a catalogue request is keyed by.
    #[must_use]
    pub fn category_scope(&self) -> CatalogueScope {
        CatalogueScope::new(self.wire(Dimension::Category))
    }

    // ------------------------------------------------------------------
    // Reset and external updates
    // ------------------------------------------------------------------

    /// Clear everything: one blank group, every dimension at All.
    ///
    /// Reports through `on_reset`, then through the `on_*_change` callback of
    /// every dimension whose wire value moved back to All.
    pub fn reset(&mut self) {
        self.store.reset();
        self.selections.select_all();
        self.sync.reset_trackers(&self.store.to_vec());
        self.warnings.clear();
        self.sink.on_reset();
        for dimension in Dimension::ALL {
            self.commit_dimension(dimension);
        }
    }

    /// Reconcile a draft supplied by the owner. Echoes of our own last
    /// emission are ignored; independent changes replace the local draft.
    pub fn sync_external_groups(&mut self, groups: Vec<FilterGroup>) -> ExternalDecision {
        let decision = self.sync.on_external_draft(&groups);
        if decision == ExternalDecision::Adopt {
            self.store.replace_all(groups);
            self.sync.reset_trackers(&self.store.to_vec());
        }
        decision
    }

    /// Reconcile a dimension value supplied by the owner.
    pub fn sync_external_dimension(&mut self, dimension: Dimension, values: &[String]) -> ExternalDecision {
        let values: Vec<String> = values
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let decision = self.sync.on_external_dimension(dimension, &values);
        if decision == ExternalDecision::Adopt
            && self.selections.get_mut(dimension).adopt(&values)
            && dimension == Dimension::Category
        {
            let scope = self.category_scope();
            self.refresher.issue(scope);
        }
        decision
    }

    /// Switch host context. Selectors follow the new All values; dimensions
    /// whose wire value changes are reported.
    pub fn set_context(&mut self, context: FilterContext) {
        if context == self.context {
            return;
        }
        tracing::debug!("Switching context to {}", context.mode_name());
        self.selections.rescope(&context);
        self.context = context;
        for dimension in Dimension::ALL {
            self.commit_dimension(dimension);
        }
    }

    // ------------------------------------------------------------------
    // Catalogue
    // ------------------------------------------------------------------

    /// Install a catalogue supplied by the owner.
    pub fn set_catalogue(&mut self, catalogue: Catalogue) {
        let domain: BTreeSet<String> = catalogue.country_domain.iter().cloned().collect();
        self.catalogue = catalogue;
        if self.selections.country.retain_domain(&domain) {
            tracing::debug!("Dropped country picks outside the refreshed domain");
            self.commit_dimension(Dimension::Country);
        }
    }

    /// Request a refresh of the current category scope, superseding any
    /// request in flight.
    pub fn request_catalogue_refresh(&mut self) -> RefreshTicket {
        let scope = self.category_scope();
        self.refresher.issue(scope)
    }

    /// The newest request not yet handed to the host.
    pub fn take_pending_refresh(&mut self) -> Option<RefreshTicket> {
        self.refresher.take_pending()
    }

    /// Hand back the result of a request.
    ///
    /// Results for superseded tokens are dropped. Failures keep the previous
    /// catalogue in place.
    pub fn complete_catalogue_refresh(&mut self, token: RequestToken, result: error::Result<Catalogue>) -> RefreshOutcome {
        if !self.refresher.settle(token) {
            return RefreshOutcome::Stale;
        }
        match result {
            Ok(catalogue) => {
                self.set_catalogue(catalogue);
                RefreshOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Keeping previous catalogue: {e}");
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetch the pending (or a fresh) request synchronously from `source`.
    pub fn refresh_catalogue(&mut self, source: &dyn CatalogueSource) -> RefreshOutcome {
        let ticket = match self.take_pending_refresh() {
            Some(ticket) => ticket,
            None => self.request_catalogue_refresh(),
        };
        tracing::debug!("Fetching catalogue {} from {}", ticket.token, source.name());
        let result = source.fetch(&ticket.scope);
        self.complete_catalogue_refresh(ticket.token, result)
    }

    // ------------------------------------------------------------------
    // Action dispatch
    // ------------------------------------------------------------------

    fn resolve(&self, group: Option<&GroupRef>) -> Result<GroupId, StoreWarning> {
        match group {
            None => Ok(self.store.active_id().clone()),
            Some(GroupRef::Id(id)) => Ok(GroupId::new(id.as_str())),
            Some(GroupRef::Index(index)) => self
                .store
                .get_index(*index)
                .map(|g| g.id.clone())
                .ok_or_else(|| StoreWarning::UnknownGroup(GroupId::new(format!("#{index}")))),
        }
    }

    /// Apply one recorded action.
    pub fn dispatch(&mut self, action: EngineAction) -> Result<(), StoreWarning> {
        tracing::trace!("Dispatching {}", action.name());
        match action {
            EngineAction::AddGroup => {
                self.add_group();
            }
            EngineAction::DeleteGroup { group } => {
                let id = self.target(group.as_ref())?;
                self.delete_group(&id)?;
            }
            EngineAction::DuplicateGroup { group } => {
                let id = self.target(group.as_ref())?;
                self.duplicate_group(&id)?;
            }
            EngineAction::RenameGroup { group, name } => {
                let id = self.target(group.as_ref())?;
                self.rename_group(&id, name)?;
            }
            EngineAction::SelectGroup { group } => {
                let id = self.target(Some(&group))?;
                self.set_active_group(&id)?;
            }
            EngineAction::ClearGroup { group } => {
                let id = self.target(group.as_ref())?;
                self.clear_group(&id)?;
            }
            EngineAction::SetBoolean { group, field, value } => {
                let id = self.target(group.as_ref())?;
                self.set_boolean_filter(&id, &field, value)?;
            }
            EngineAction::SetNumeric {
                group,
                field,
                mode,
                value,
                min,
                max,
            } => {
                let id = self.target(group.as_ref())?;
                self.set_numeric_filter(&id, &field, mode, value, min, max)?;
            }
            EngineAction::ClearNumeric { group, field } => {
                let id = self.target(group.as_ref())?;
                self.clear_numeric_filter(&id, &field)?;
            }
            EngineAction::Toggle { dimension, value } => self.toggle(dimension, &value),
            EngineAction::SelectAll { dimension } => self.select_all(dimension),
            EngineAction::Reset => self.reset(),
            EngineAction::ExternalGroups { groups } => {
                self.sync_external_groups(groups);
            }
            EngineAction::ExternalDimension { dimension, values } => {
                self.sync_external_dimension(dimension, &values);
            }
            EngineAction::SetContext { context } => self.set_context(context),
            EngineAction::SetCatalogue { catalogue } => self.set_catalogue(catalogue),
            EngineAction::RefreshCatalogue => {
                self.request_catalogue_refresh();
            }
        }
        Ok(())
    }

    fn target(&mut self, group: Option<&GroupRef>) -> Result<GroupId, StoreWarning> {
        self.resolve(group).map_err(|warning| self.reject(warning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScopeDefaults;

    fn engine() -> FilterEngine {
        FilterEngine::new(Vec::new(), &EngineConfig::default(), RecordingSink::new())
    }

    #[test]
    fn test_seed_never_emits() {
        let engine = engine();
        assert!(engine.sink().events().is_empty());
        assert_eq!(engine.groups().len(), 1);
    }

    #[test]
    fn test_edit_emits_once() {
        let mut engine = engine();
        let id = engine.active_group_id().clone();
        engine.set_boolean_filter(&id, "recycled", Some(true)).unwrap();
        engine.set_boolean_filter(&id, "recycled", Some(true)).unwrap();
        assert_eq!(engine.sink().apply_count(), 1);
    }

    #[test]
    fn test_signed_zero_edit_is_unchanged() {
        let mut engine = engine();
        let id = engine.active_group_id().clone();
        for value in [0.0, -0.0] {
            engine
                .set_numeric_filter(&id, "capacity_tph", NumericMode::Equals, Some(value), None, None)
                .unwrap();
        }
        assert_eq!(engine.sink().apply_count(), 1);
    }

    #[test]
    fn test_rejected_operation_sets_warning() {
        let mut engine = engine();
        let id = engine.active_group_id().clone();
        assert_eq!(engine.delete_group(&id), Err(StoreWarning::LastGroup));
        assert_eq!(engine.warning(), Some("At least one filter group is required"));
        assert!(engine.sink().events().is_empty());
    }

    #[test]
    fn test_dimension_change_reports_wire_value() {
        let mut engine = engine();
        engine.toggle(Dimension::Country, "DE");
        engine.select_all(Dimension::Country);
        assert_eq!(
            engine.sink().events(),
            &[
                SinkEvent::CountryChange {
                    values: vec!["DE".to_string()]
                },
                SinkEvent::CountryChange { values: vec![] },
            ]
        );
    }

    #[test]
    fn test_category_change_issues_refresh() {
        let mut engine = engine();
        let initial = engine.take_pending_refresh().unwrap();
        assert_eq!(initial.scope, CatalogueScope::default());

        engine.toggle(Dimension::Category, "steel");
        let ticket = engine.take_pending_refresh().unwrap();
        assert_eq!(ticket.scope, CatalogueScope::new(["steel"]));
        assert!(ticket.token > initial.token);
    }

    #[test]
    fn test_set_context_rescopes() {
        let mut engine = engine();
        engine.set_context(FilterContext::scoped(ScopeDefaults {
            status: vec!["COMPLETE".into()],
            category: vec![],
            country: vec!["DE".into(), "FR".into()],
        }));
        assert_eq!(engine.criteria().country, vec!["DE".to_string(), "FR".to_string()]);
        assert_eq!(engine.criteria().status, vec!["COMPLETE".to_string()]);
        assert!(engine.summary().is_default());
    }

    #[test]
    fn test_dispatch_by_index() {
        let mut engine = engine();
        engine
            .dispatch(EngineAction::SetBoolean {
                group: Some(GroupRef::Index(0)),
                field: "recycled".into(),
                value: Some(true),
            })
            .unwrap();
        assert_eq!(engine.criteria().groups.len(), 1);

        let missing = engine.dispatch(EngineAction::ClearGroup {
            group: Some(GroupRef::Index(9)),
        });
        assert!(missing.is_err());
        assert!(engine.warning().is_some());
    }
}
