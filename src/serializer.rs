//! Draft → [`Criteria`] normalization.
//!
//! Serialization is a pure function of the groups, the selections and the
//! context. Groups keep their insertion order; numeric entries without a
//! usable bound are dropped, and a group left with no constraint is dropped
//! from the payload entirely.

use crate::model::{Criteria, Dimension, FilterContext, FilterGroup};
use crate::selector::{DimensionSelections, DimensionSelector};

/// Build the criteria object the backend consumes.
#[must_use]
pub fn serialize<'a, I>(groups: I, selections: &DimensionSelections, context: &FilterContext) -> Criteria
where
    I: IntoIterator<Item = &'a FilterGroup>,
{
    Criteria {
        groups: clean_groups(groups),
        status: dimension_wire(&selections.status, context),
        category: dimension_wire(&selections.category, context),
        country: dimension_wire(&selections.country, context),
    }
}

/// The groups that survive emission, in order.
#[must_use]
pub fn clean_groups<'a, I>(groups: I) -> Vec<FilterGroup>
where
    I: IntoIterator<Item = &'a FilterGroup>,
{
    groups.into_iter().filter_map(FilterGroup::cleaned).collect()
}

/// Wire value of one dimension: the explicit set, or the context's All
/// value when the selector is in its All state.
#[must_use]
pub fn dimension_wire(selector: &DimensionSelector, context: &FilterContext) -> Vec<String> {
    if selector.is_all() {
        all_wire(selector.dimension(), context)
    } else {
        selector.wire_value()
    }
}

fn all_wire(dimension: Dimension, context: &FilterContext) -> Vec<String> {
    context.all_value(dimension).into_iter().collect()
}
