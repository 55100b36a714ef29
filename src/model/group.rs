//! Filter groups: OR-combined bundles of boolean and numeric constraints.

use super::numeric::NumericFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of a filter group, stable for the group's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A named bundle of constraints. Constraints inside a group are OR'd together;
/// groups are AND'd with each other.
///
/// Deserialization is lenient: a group missing its id gets a fresh one, a
/// missing name falls back to `"Group"`, and missing or `null` filter maps are
/// treated as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFilterGroup")]
pub struct FilterGroup {
    pub id: GroupId,
    pub name: String,
    /// `true` = must have, `false` = must not have; absent = don't care
    pub boolean_filters: BTreeMap<String, bool>,
    pub numeric_filters: BTreeMap<String, NumericFilter>,
}

impl FilterGroup {
    /// An empty group.
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            boolean_filters: BTreeMap::new(),
            numeric_filters: BTreeMap::new(),
        }
    }

    /// Builder-style boolean constraint.
    #[must_use]
    pub fn with_boolean(mut self, field: impl Into<String>, value: bool) -> Self {
        self.boolean_filters.insert(field.into(), value);
        self
    }

    /// Builder-style numeric constraint.
    #[must_use]
    pub fn with_numeric(mut self, field: impl Into<String>, filter: NumericFilter) -> Self {
        self.numeric_filters.insert(field.into(), filter);
        self
    }

    /// True when neither map holds any entry, meaningful or not.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.boolean_filters.is_empty() && self.numeric_filters.is_empty()
    }

    /// Number of constraints that would survive serialization.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.boolean_filters.len()
            + self
                .numeric_filters
                .values()
                .filter(|f| f.is_meaningful())
                .count()
    }

    /// The group as it goes on the wire, or `None` if nothing meaningful is left.
    #[must_use]
    pub fn cleaned(&self) -> Option<Self> {
        let numeric_filters: BTreeMap<String, NumericFilter> = self
            .numeric_filters
            .iter()
            .filter_map(|(field, filter)| filter.cleaned().map(|f| (field.clone(), f)))
            .collect();

        if self.boolean_filters.is_empty() && numeric_filters.is_empty() {
            return None;
        }

        Some(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            boolean_filters: self.boolean_filters.clone(),
            numeric_filters,
        })
    }
}

/// Wire form accepted on ingestion before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawFilterGroup {
    id: Option<String>,
    name: Option<String>,
    #[serde(alias = "filters")]
    boolean_filters: Option<BTreeMap<String, Option<bool>>>,
    numeric_filters: Option<BTreeMap<String, Option<NumericFilter>>>,
}

impl From<RawFilterGroup> for FilterGroup {
    fn from(raw: RawFilterGroup) -> Self {
        let id = raw
            .id
            .filter(|id| !id.trim().is_empty())
            .map_or_else(GroupId::generate, GroupId::from);
        let name = raw.name.unwrap_or_else(|| "Group".to_string());

        let boolean_filters = raw
            .boolean_filters
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect();
        let numeric_filters = raw
            .numeric_filters
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect();

        Self {
            id,
            name,
            boolean_filters,
            numeric_filters,
        }
    }
}
