//! Host context: what "everything" means for each dimension.
//!
//! In normal mode the absence of a category or country restriction already
//! means "no restriction", so their All value is the empty set. Status always
//! travels explicitly, so its All value is the list of known statuses. In
//! scoped (report) mode the domain is restricted upstream and consumers cannot
//! infer it, so every All value is the scope's full domain.

use super::dimension::Dimension;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Statuses every record can carry in normal mode.
pub const DEFAULT_KNOWN_STATUSES: &[&str] = &["COMPLETE", "INCOMPLETE", "DELETED", "NONE"];

/// Configured value sets of a scoped (report) context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScopeDefaults {
    /// Statuses the report was configured with
    pub status: Vec<String>,
    /// Categories available in the report's scope
    pub category: Vec<String>,
    /// Countries available in the report's scope
    pub country: Vec<String>,
}

/// The host context the engine runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FilterContext {
    /// Unscoped filtering over the whole dataset
    Normal {
        #[serde(default = "default_known_statuses")]
        known_statuses: Vec<String>,
    },
    /// Filtering inside a pre-restricted report scope
    Scoped(ScopeDefaults),
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::Normal {
            known_statuses: default_known_statuses(),
        }
    }
}

fn default_known_statuses() -> Vec<String> {
    DEFAULT_KNOWN_STATUSES.iter().map(ToString::to_string).collect()
}

impl FilterContext {
    /// Normal mode with the given known statuses.
    pub fn normal<I, S>(known_statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Normal {
            known_statuses: known_statuses.into_iter().map(Into::into).collect(),
        }
    }

    /// Scoped mode with the report's configured sets.
    #[must_use]
    pub const fn scoped(defaults: ScopeDefaults) -> Self {
        Self::Scoped(defaults)
    }

    #[must_use]
    pub const fn is_scoped(&self) -> bool {
        matches!(self, Self::Scoped(_))
    }

    /// Short name for logs and badges.
    #[must_use]
    pub const fn mode_name(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "normal",
            Self::Scoped(_) => "scoped",
        }
    }

    /// The set that denotes "everything" for a dimension.
    #[must_use]
    pub fn all_value(&self, dimension: Dimension) -> BTreeSet<String> {
        self.domain(dimension).iter().cloned().collect()
    }

    /// The selection a dimension is measured against when counting deviations.
    ///
    /// Coincides with [`all_value`](Self::all_value): a dimension in its All
    /// state never counts as a deviation.
    #[must_use]
    pub fn default_selection(&self, dimension: Dimension) -> BTreeSet<String> {
        self.all_value(dimension)
    }

    /// The configured domain list for a dimension, in configured order.
    #[must_use]
    pub fn domain(&self, dimension: Dimension) -> &[String] {
        match (self, dimension) {
            (Self::Normal { known_statuses }, Dimension::Status) => known_statuses,
            (Self::Normal { .. }, Dimension::Category | Dimension::Country) => &[],
            (Self::Scoped(scope), Dimension::Status) => &scope.status,
            (Self::Scoped(scope), Dimension::Category) => &scope.category,
            (Self::Scoped(scope), Dimension::Country) => &scope.country,
        }
    }
}
