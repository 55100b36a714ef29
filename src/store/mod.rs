//! Ordered collection of filter groups.
//!
//! The store owns the draft the user is editing. Every operation is
//! synchronous and total: a stale group id or an attempt to delete the last
//! group yields a [`StoreWarning`] and leaves the store untouched, so callers
//! can surface the warning without ever aborting an edit session.

use crate::config::GroupConfig;
use crate::model::{FilterGroup, GroupId, NumericFilter, NumericMode};
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

/// A rejected store operation. Non-fatal; meant for a warning banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreWarning {
    #[error("At least one filter group is required")]
    LastGroup,

    #[error("Filter group '{0}' no longer exists")]
    UnknownGroup(GroupId),

    #[error("Field name must not be empty")]
    EmptyField,
}

/// The ordered set of filter groups, never empty.
#[derive(Debug, Clone)]
pub struct FilterGroupStore {
    groups: IndexMap<GroupId, FilterGroup>,
    active: GroupId,
    naming: GroupConfig,
    /// Groups minted so far; drives default names
    created: usize,
}

impl Default for FilterGroupStore {
    fn default() -> Self {
        Self::new(GroupConfig::default())
    }
}

impl FilterGroupStore {
    /// A store holding a single empty group.
    #[must_use]
    pub fn new(naming: GroupConfig) -> Self {
        Self::from_groups(Vec::new(), naming)
    }

    /// Seed from an external draft. An empty draft yields one empty group;
    /// duplicate ids in the draft are re-minted so every id stays unique.
    #[must_use]
    pub fn from_groups(groups: Vec<FilterGroup>, naming: GroupConfig) -> Self {
        let mut store = Self {
            groups: IndexMap::new(),
            active: GroupId::new(""),
            naming,
            created: 0,
        };
        store.install(groups);
        store
    }

    fn install(&mut self, groups: Vec<FilterGroup>) {
        self.groups.clear();
        let mut seen = HashSet::new();
        for mut group in groups {
            if !seen.insert(group.id.clone()) {
                tracing::debug!("Re-minting duplicate group id {}", group.id);
                group.id = GroupId::generate();
                seen.insert(group.id.clone());
            }
            self.groups.insert(group.id.clone(), group);
        }
        self.created = self.created.max(self.groups.len());

        if self.groups.is_empty() {
            let group = self.mint_group();
            self.groups.insert(group.id.clone(), group);
        }
        if !self.groups.contains_key(&self.active) {
            self.active = self.first_id();
        }
    }

    fn mint_group(&mut self) -> FilterGroup {
        self.created += 1;
        FilterGroup::new(GroupId::generate(), self.naming.default_name(self.created))
    }

    fn first_id(&self) -> GroupId {
        self.groups
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| GroupId::new(""))
    }

    fn group_mut(&mut self, id: &GroupId) -> Result<&mut FilterGroup, StoreWarning> {
        self.groups
            .get_mut(id)
            .ok_or_else(|| StoreWarning::UnknownGroup(id.clone()))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &FilterGroup> {
        self.groups.values()
    }

    /// Snapshot of the draft.
    #[must_use]
    pub fn to_vec(&self) -> Vec<FilterGroup> {
        self.groups.values().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: &GroupId) -> Option<&FilterGroup> {
        self.groups.get(id)
    }

    /// Group at a position, in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&FilterGroup> {
        self.groups.get_index(index).map(|(_, g)| g)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group the user is currently editing.
    #[must_use]
    pub const fn active_id(&self) -> &GroupId {
        &self.active
    }

    #[must_use]
    pub const fn naming(&self) -> &GroupConfig {
        &self.naming
    }

    // ------------------------------------------------------------------
    // Group management
    // ------------------------------------------------------------------

    /// Append a fresh empty group and make it active.
    pub fn add_group(&mut self) -> GroupId {
        let group = self.mint_group();
        let id = group.id.clone();
        self.groups.insert(id.clone(), group);
        self.active = id.clone();
        id
    }

    /// Remove a group. The last remaining group cannot be removed.
    pub fn delete_group(&mut self, id: &GroupId) -> Result<(), StoreWarning> {
        let index = self
            .groups
            .get_index_of(id)
            .ok_or_else(|| StoreWarning::UnknownGroup(id.clone()))?;
        if self.groups.len() == 1 {
            return Err(StoreWarning::LastGroup);
        }

        self.groups.shift_remove_index(index);
        if &self.active == id {
            let neighbour = index.min(self.groups.len() - 1);
            if let Some((next, _)) = self.groups.get_index(neighbour) {
                self.active = next.clone();
            }
        }
        Ok(())
    }

    /// Deep-copy a group right after the original, under a new id and a
    /// derived name. The copy becomes active.
    pub fn duplicate_group(&mut self, id: &GroupId) -> Result<GroupId, StoreWarning> {
        let index = self
            .groups
            .get_index_of(id)
            .ok_or_else(|| StoreWarning::UnknownGroup(id.clone()))?;
        let source = &self.groups[index];

        let mut copy = source.clone();
        copy.id = GroupId::generate();
        copy.name = self.naming.copy_name(&source.name);
        self.created += 1;

        let new_id = copy.id.clone();
        self.groups.shift_insert(index + 1, new_id.clone(), copy);
        self.active = new_id.clone();
        Ok(new_id)
    }

    /// Replace a group's label.
    pub fn rename_group(&mut self, id: &GroupId, name: impl Into<String>) -> Result<(), StoreWarning> {
        self.group_mut(id)?.name = name.into();
        Ok(())
    }

    /// Mark a group as the one being edited.
    pub fn set_active_group(&mut self, id: &GroupId) -> Result<(), StoreWarning> {
        if !self.groups.contains_key(id) {
            return Err(StoreWarning::UnknownGroup(id.clone()));
        }
        self.active = id.clone();
        Ok(())
    }

    /// Empty both filter maps of a group.
    pub fn clear_group(&mut self, id: &GroupId) -> Result<(), StoreWarning> {
        let group = self.group_mut(id)?;
        group.boolean_filters.clear();
        group.numeric_filters.clear();
        Ok(())
    }

    /// Replace the whole draft (external adoption).
    pub fn replace_all(&mut self, groups: Vec<FilterGroup>) {
        self.install(groups);
    }

    /// Back to a single empty group.
    pub fn reset(&mut self) {
        self.created = 0;
        self.install(Vec::new());
    }

    // ------------------------------------------------------------------
    // Filter values
    // ------------------------------------------------------------------

    /// Set (`Some`) or remove (`None`, "don't care") one boolean constraint.
    pub fn set_boolean_filter(
        &mut self,
        id: &GroupId,
        field: &str,
        value: Option<bool>,
    ) -> Result<(), StoreWarning> {
        let field = non_empty_field(field)?;
        let group = self.group_mut(id)?;
        match value {
            Some(v) => {
                group.boolean_filters.insert(field.to_string(), v);
            }
            None => {
                group.boolean_filters.remove(field);
            }
        }
        Ok(())
    }

    /// Switch or update one numeric constraint; see [`NumericFilter::updated`]
    /// for how prior bounds carry over on a mode switch.
    pub fn set_numeric_filter(
        &mut self,
        id: &GroupId,
        field: &str,
        mode: NumericMode,
        value: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<(), StoreWarning> {
        let field = non_empty_field(field)?;
        let group = self.group_mut(id)?;
        let next = NumericFilter::updated(group.numeric_filters.get(field), mode, value, min, max);
        group.numeric_filters.insert(field.to_string(), next);
        Ok(())
    }

    /// Remove one numeric constraint.
    pub fn clear_numeric_filter(&mut self, id: &GroupId, field: &str) -> Result<(), StoreWarning> {
        self.group_mut(id)?.numeric_filters.remove(field);
        Ok(())
    }
}

fn non_empty_field(field: &str) -> Result<&str, StoreWarning> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        Err(StoreWarning::EmptyField)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FilterGroupStore {
        FilterGroupStore::default()
    }

    #[test]
    fn test_new_store_has_one_group() {
        let store = store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_index(0).map(|g| g.name.as_str()), Some("Group 1"));
        assert_eq!(store.active_id(), &store.get_index(0).unwrap().id);
    }

    #[test]
    fn test_add_group_appends_and_activates() {
        let mut store = store();
        let id = store.add_group();
        assert_eq!(store.len(), 2);
        assert_eq!(store.active_id(), &id);
        assert_eq!(store.get(&id).map(|g| g.name.as_str()), Some("Group 2"));
    }

    #[test]
    fn test_delete_last_group_rejected() {
        let mut store = store();
        let id = store.get_index(0).unwrap().id.clone();
        assert_eq!(store.delete_group(&id), Err(StoreWarning::LastGroup));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_active_moves_to_neighbour() {
        let mut store = store();
        let first = store.get_index(0).unwrap().id.clone();
        let second = store.add_group();
        store.delete_group(&second).unwrap();
        assert_eq!(store.active_id(), &first);
    }

    #[test]
    fn test_stale_id_is_noop() {
        let mut store = store();
        let before = store.to_vec();
        let stale = GroupId::new("gone");
        assert_eq!(
            store.rename_group(&stale, "x"),
            Err(StoreWarning::UnknownGroup(stale.clone()))
        );
        assert!(store.set_boolean_filter(&stale, "recycled", Some(true)).is_err());
        assert!(store.delete_group(&stale).is_err());
        assert_eq!(store.to_vec(), before);
    }

    #[test]
    fn test_duplicate_deep_copies() {
        let mut store = store();
        let id = store.get_index(0).unwrap().id.clone();
        store.set_boolean_filter(&id, "recycled", Some(true)).unwrap();
        store
            .set_numeric_filter(&id, "capacity_tph", NumericMode::Range, None, Some(1.0), None)
            .unwrap();

        let copy_id = store.duplicate_group(&id).unwrap();
        store.set_boolean_filter(&copy_id, "recycled", Some(false)).unwrap();

        let original = store.get(&id).unwrap();
        let copy = store.get(&copy_id).unwrap();
        assert_eq!(copy.name, "Group 1 (Copy)");
        assert_eq!(original.boolean_filters.get("recycled"), Some(&true));
        assert_eq!(copy.numeric_filters, original.numeric_filters);
        assert_eq!(store.get_index(1).map(|g| &g.id), Some(&copy_id));
    }

    #[test]
    fn test_boolean_none_removes_entry() {
        let mut store = store();
        let id = store.active_id().clone();
        store.set_boolean_filter(&id, "virgin", Some(false)).unwrap();
        store.set_boolean_filter(&id, "virgin", None).unwrap();
        assert!(store.get(&id).unwrap().boolean_filters.is_empty());
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut store = store();
        let id = store.active_id().clone();
        assert_eq!(
            store.set_boolean_filter(&id, "  ", Some(true)),
            Err(StoreWarning::EmptyField)
        );
    }

    #[test]
    fn test_clear_group() {
        let mut store = store();
        let id = store.active_id().clone();
        store.set_boolean_filter(&id, "recycled", Some(true)).unwrap();
        store
            .set_numeric_filter(&id, "capacity_tph", NumericMode::Equals, Some(4.0), None, None)
            .unwrap();
        store.clear_group(&id).unwrap();
        assert!(store.get(&id).unwrap().is_blank());
    }

    #[test]
    fn test_seed_reminting_duplicate_ids() {
        let groups = vec![
            FilterGroup::new(GroupId::new("a"), "One"),
            FilterGroup::new(GroupId::new("a"), "Two"),
        ];
        let store = FilterGroupStore::from_groups(groups, GroupConfig::default());
        assert_eq!(store.len(), 2);
        assert_ne!(store.get_index(0).unwrap().id, store.get_index(1).unwrap().id);
    }

    #[test]
    fn test_reset_restarts_naming() {
        let mut store = store();
        store.add_group();
        store.add_group();
        store.reset();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_index(0).unwrap().name, "Group 1");
    }
}
