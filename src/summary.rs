//! Deviation-from-default counts for badges.
//!
//! A dimension counts only when its wire value differs (as a set) from the
//! context default, contributing the number of selected values, or exactly
//! one when the selection is empty while the default is not. A group
//! contributes its present boolean entries plus its meaningful numeric
//! entries.

use crate::model::{Dimension, FilterContext, FilterGroup, GroupId};
use crate::selector::DimensionSelections;
use crate::serializer::dimension_wire;
use serde::Serialize;
use std::collections::BTreeSet;

/// Constraint count of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDeviation {
    pub id: GroupId,
    pub name: String,
    pub count: usize,
}

/// Per-dimension and aggregate deviation counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveFilterSummary {
    pub status: usize,
    pub category: usize,
    pub country: usize,
    pub groups: Vec<GroupDeviation>,
    pub total: usize,
}

impl ActiveFilterSummary {
    /// Compute the summary for the current draft.
    #[must_use]
    pub fn compute<'a, I>(groups: I, selections: &DimensionSelections, context: &FilterContext) -> Self
    where
        I: IntoIterator<Item = &'a FilterGroup>,
    {
        let groups: Vec<GroupDeviation> = groups
            .into_iter()
            .map(|g| GroupDeviation {
                id: g.id.clone(),
                name: g.name.clone(),
                count: g.constraint_count(),
            })
            .collect();

        let dim = |d: Dimension| {
            let wire: BTreeSet<String> = dimension_wire(selections.get(d), context)
                .into_iter()
                .collect();
            dimension_deviation(&wire, &context.default_selection(d))
        };

        let mut summary = Self {
            status: dim(Dimension::Status),
            category: dim(Dimension::Category),
            country: dim(Dimension::Country),
            groups,
            total: 0,
        };
        summary.total = summary.status
            + summary.category
            + summary.country
            + summary.groups.iter().map(|g| g.count).sum::<usize>();
        summary
    }

    /// Deviation of one dimension.
    #[must_use]
    pub const fn dimension(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Status => self.status,
            Dimension::Category => self.category,
            Dimension::Country => self.country,
        }
    }

    /// Deviation of one group, if present.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<usize> {
        self.groups.iter().find(|g| &g.id == id).map(|g| g.count)
    }

    /// Whether nothing deviates from the default.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.total == 0
    }

    /// Badge text: the total, or nothing when at default.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        (self.total > 0).then(|| self.total.to_string())
    }

    /// One-line human description.
    #[must_use]
    pub fn summary_line(&self) -> String {
        if self.is_default() {
            return "No filters active".to_string();
        }
        let mut parts = Vec::new();
        for dimension in Dimension::ALL {
            let n = self.dimension(dimension);
            if n > 0 {
                parts.push(format!("{}: {n}", dimension.label()));
            }
        }
        let constraints: usize = self.groups.iter().map(|g| g.count).sum();
        if constraints > 0 {
            parts.push(format!("Constraints: {constraints}"));
        }
        format!("{} active ({})", self.total, parts.join(", "))
    }
}

fn dimension_deviation(selection: &BTreeSet<String>, default: &BTreeSet<String>) -> usize {
    if selection == default {
        0
    } else if selection.is_empty() {
        1
    } else {
        selection.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_deviation_rules() {
        let default: BTreeSet<String> = ["A", "B"].iter().map(ToString::to_string).collect();
        let one: BTreeSet<String> = ["A"].iter().map(ToString::to_string).collect();
        assert_eq!(dimension_deviation(&default, &default), 0);
        assert_eq!(dimension_deviation(&one, &default), 1);
        assert_eq!(dimension_deviation(&BTreeSet::new(), &default), 1);
        assert_eq!(dimension_deviation(&one, &BTreeSet::new()), 1);
    }

    #[test]
    fn test_explicit_empty_status_counts_once() {
        let ctx = FilterContext::default();
        let mut selections = DimensionSelections::for_context(&ctx);
        selections.status.adopt(&[]);
        let summary = ActiveFilterSummary::compute(std::iter::empty(), &selections, &ctx);
        assert_eq!(summary.status, 1);
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn test_summary_line() {
        let ctx = FilterContext::default();
        let mut selections = DimensionSelections::for_context(&ctx);
        let summary = ActiveFilterSummary::compute(std::iter::empty(), &selections, &ctx);
        assert_eq!(summary.summary_line(), "No filters active");
        assert!(summary.badge().is_none());

        selections.country.toggle("DE");
        selections.country.toggle("FR");
        let summary = ActiveFilterSummary::compute(std::iter::empty(), &selections, &ctx);
        assert_eq!(summary.summary_line(), "2 active (Country: 2)");
        assert_eq!(summary.badge().as_deref(), Some("2"));
    }
}
