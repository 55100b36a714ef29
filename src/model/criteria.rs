//! The emitted, backend-consumable criteria object.

use super::dimension::Dimension;
use super::group::FilterGroup;
use serde::{Deserialize, Serialize};

/// Normalized criteria as handed to `on_apply`.
///
/// Wire shape: `{ groups: [...], status: [...], category: [...], country: [...] }`.
/// Groups are AND'd together; the constraints inside one group are OR'd.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    pub groups: Vec<FilterGroup>,
    pub status: Vec<String>,
    pub category: Vec<String>,
    pub country: Vec<String>,
}

impl Criteria {
    /// Wire value of one dimension.
    #[must_use]
    pub fn dimension(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Status => &self.status,
            Dimension::Category => &self.category,
            Dimension::Country => &self.country,
        }
    }

    /// Total number of constraints across all emitted groups.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.groups.iter().map(FilterGroup::constraint_count).sum()
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
