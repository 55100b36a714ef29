//! Tri-state dimension selection.
//!
//! Each dimension (status, category, country) is either in its *All* state,
//! where the selection is whatever the host context calls "everything", or in
//! *individual* mode, where an explicit set of values is the selection. One
//! implementation serves all three dimensions; the only per-dimension input is
//! the All value computed from the [`FilterContext`].
//!
//! Transitions:
//!
//! | State      | Action                      | Result                     |
//! |------------|-----------------------------|----------------------------|
//! | All        | `toggle(v)`                 | individual `{v}`           |
//! | individual | `toggle(v)`, v in set, n>1  | individual, v removed      |
//! | individual | `toggle(v)`, v sole member  | All                        |
//! | individual | `toggle(v)`, v not in set   | individual, v added        |
//! | any        | `select_all()`              | All                        |
//!
//! An individual set equal to the All value is always folded back into the
//! All state.

use crate::model::{Dimension, FilterContext};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    All,
    Individual(BTreeSet<String>),
}

/// Selection state of one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSelector {
    dimension: Dimension,
    all_value: BTreeSet<String>,
    selection: Selection,
}

impl DimensionSelector {
    /// A selector in the All state.
    #[must_use]
    pub fn new(dimension: Dimension, all_value: BTreeSet<String>) -> Self {
        Self {
            dimension,
            all_value,
            selection: Selection::All,
        }
    }

    /// A selector whose All value comes from the host context.
    #[must_use]
    pub fn for_context(dimension: Dimension, context: &FilterContext) -> Self {
        Self::new(dimension, context.all_value(dimension))
    }

    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The set that denotes "everything" for this dimension.
    #[must_use]
    pub const fn all_value(&self) -> &BTreeSet<String> {
        &self.all_value
    }

    /// Whether the explicit set is the selection.
    #[must_use]
    pub const fn individual_mode(&self) -> bool {
        matches!(self.selection, Selection::Individual(_))
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self.selection, Selection::All)
    }

    /// The effective selection: the All value in the All state.
    #[must_use]
    pub fn explicit_set(&self) -> &BTreeSet<String> {
        match &self.selection {
            Selection::All => &self.all_value,
            Selection::Individual(set) => set,
        }
    }

    /// Whether `value` is individually ticked. Nothing is ticked in the All state.
    #[must_use]
    pub fn is_checked(&self, value: &str) -> bool {
        match &self.selection {
            Selection::All => false,
            Selection::Individual(set) => set.contains(value),
        }
    }

    /// The externally visible value, sorted.
    #[must_use]
    pub fn wire_value(&self) -> Vec<String> {
        self.explicit_set().iter().cloned().collect()
    }

    /// Apply a click on one value. Returns whether the state changed.
    pub fn toggle(&mut self, value: &str) -> bool {
        let before = self.selection.clone();
        self.selection = match std::mem::replace(&mut self.selection, Selection::All) {
            Selection::All => Selection::Individual(BTreeSet::from([value.to_string()])),
            Selection::Individual(mut set) => {
                if set.remove(value) {
                    if set.is_empty() {
                        Selection::All
                    } else {
                        Selection::Individual(set)
                    }
                } else {
                    set.insert(value.to_string());
                    Selection::Individual(set)
                }
            }
        };
        self.normalize();
        self.selection != before
    }

    /// Apply a click on the synthetic "All" entry. Returns whether the state changed.
    pub fn select_all(&mut self) -> bool {
        let changed = !self.is_all();
        self.selection = Selection::All;
        changed
    }

    /// Take a wire value supplied by the external owner.
    ///
    /// A value equal to the All value (as a set) becomes the All state; any
    /// other value, including an empty one, becomes an explicit selection.
    pub fn adopt(&mut self, values: &[String]) -> bool {
        let before = self.selection.clone();
        self.selection = Selection::Individual(values.iter().cloned().collect());
        self.normalize();
        self.selection != before
    }

    /// Switch to a new All value. The All state follows it; an individual
    /// selection is kept unless it now coincides with the new All value.
    pub fn rescope(&mut self, all_value: BTreeSet<String>) {
        self.all_value = all_value;
        self.normalize();
    }

    /// Drop individual picks that fall outside `domain`. Dropping the last
    /// pick reverts to All. An empty domain is treated as unknown and prunes
    /// nothing. Returns whether anything was dropped.
    pub fn retain_domain(&mut self, domain: &BTreeSet<String>) -> bool {
        if domain.is_empty() {
            return false;
        }
        let Selection::Individual(set) = &mut self.selection else {
            return false;
        };
        if set.is_empty() {
            return false;
        }

        let before = set.len();
        set.retain(|v| domain.contains(v));
        let dropped = set.len() != before;
        if set.is_empty() {
            self.selection = Selection::All;
        }
        self.normalize();
        dropped
    }

    fn normalize(&mut self) {
        if let Selection::Individual(set) = &self.selection {
            if *set == self.all_value {
                self.selection = Selection::All;
            }
        }
    }
}

/// The three selectors of an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSelections {
    pub status: DimensionSelector,
    pub category: DimensionSelector,
    pub country: DimensionSelector,
}

impl DimensionSelections {
    /// All three dimensions in their All state for `context`.
    #[must_use]
    pub fn for_context(context: &FilterContext) -> Self {
        Self {
            status: DimensionSelector::for_context(Dimension::Status, context),
            category: DimensionSelector::for_context(Dimension::Category, context),
            country: DimensionSelector::for_context(Dimension::Country, context),
        }
    }

    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> &DimensionSelector {
        match dimension {
            Dimension::Status => &self.status,
            Dimension::Category => &self.category,
            Dimension::Country => &self.country,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut DimensionSelector {
        match dimension {
            Dimension::Status => &mut self.status,
            Dimension::Category => &mut self.category,
            Dimension::Country => &mut self.country,
        }
    }

    /// Move every selector to the All values of a new context.
    pub fn rescope(&mut self, context: &FilterContext) {
        for dimension in Dimension::ALL {
            self.get_mut(dimension).rescope(context.all_value(dimension));
        }
    }

    /// Back to the All state everywhere.
    pub fn select_all(&mut self) {
        for dimension in Dimension::ALL {
            self.get_mut(dimension).select_all();
        }
    }

    /// Selectors in display order.
    pub fn iter(&self) -> impl Iterator<Item = &DimensionSelector> {
        Dimension::ALL.into_iter().map(move |d| self.get(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScopeDefaults;

    fn status() -> DimensionSelector {
        DimensionSelector::for_context(Dimension::Status, &FilterContext::default())
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_toggle_from_all_starts_fresh_pick() {
        let mut sel = status();
        assert!(sel.toggle("COMPLETE"));
        assert!(sel.individual_mode());
        assert_eq!(sel.explicit_set(), &set(&["COMPLETE"]));
    }

    #[test]
    fn test_toggle_add_and_remove() {
        let mut sel = status();
        sel.toggle("COMPLETE");
        sel.toggle("DELETED");
        assert_eq!(sel.explicit_set().len(), 2);
        sel.toggle("COMPLETE");
        assert!(sel.individual_mode());
        assert_eq!(sel.explicit_set(), &set(&["DELETED"]));
    }

    #[test]
    fn test_unchecking_sole_member_reverts_to_all() {
        let mut sel = status();
        sel.toggle("APPROVED");
        sel.toggle("APPROVED");
        assert!(!sel.individual_mode());
        assert_eq!(sel.explicit_set().len(), 4);
    }

    #[test]
    fn test_picking_every_value_folds_into_all() {
        let mut sel = status();
        for v in ["COMPLETE", "INCOMPLETE", "DELETED", "NONE"] {
            sel.toggle(v);
        }
        assert!(sel.is_all());
    }

    #[test]
    fn test_select_all() {
        let mut sel = status();
        assert!(!sel.select_all());
        sel.toggle("NONE");
        assert!(sel.select_all());
        assert!(sel.is_all());
        assert!(!sel.is_checked("NONE"));
    }

    #[test]
    fn test_normal_category_wire_value() {
        let mut sel = DimensionSelector::for_context(Dimension::Category, &FilterContext::default());
        assert!(sel.wire_value().is_empty());
        sel.toggle("steel");
        assert_eq!(sel.wire_value(), vec!["steel".to_string()]);
    }

    #[test]
    fn test_adopt() {
        let mut sel = status();
        assert!(sel.adopt(&["NONE".to_string()]));
        assert!(sel.is_checked("NONE"));

        let all: Vec<String> = sel.all_value().iter().cloned().collect();
        assert!(sel.adopt(&all));
        assert!(sel.is_all());

        assert!(sel.adopt(&[]));
        assert!(sel.individual_mode());
        assert!(sel.explicit_set().is_empty());
    }

    #[test]
    fn test_adopt_empty_in_normal_category_is_all() {
        let mut sel = DimensionSelector::for_context(Dimension::Category, &FilterContext::default());
        assert!(!sel.adopt(&[]));
        assert!(sel.is_all());
    }

    #[test]
    fn test_retain_domain() {
        let mut sel = DimensionSelector::for_context(Dimension::Country, &FilterContext::default());
        sel.toggle("DE");
        sel.toggle("FR");
        assert!(sel.retain_domain(&set(&["DE", "NL"])));
        assert_eq!(sel.wire_value(), vec!["DE".to_string()]);

        assert!(sel.retain_domain(&set(&["NL"])));
        assert!(sel.is_all());
        assert!(!sel.retain_domain(&BTreeSet::new()));
    }

    #[test]
    fn test_rescope_follows_all_value() {
        let scoped = FilterContext::scoped(ScopeDefaults {
            status: vec!["COMPLETE".into()],
            category: vec!["steel".into(), "glass".into()],
            country: vec![],
        });
        let mut selections = DimensionSelections::for_context(&FilterContext::default());
        selections.category.toggle("steel");
        selections.category.toggle("glass");
        selections.rescope(&scoped);

        assert!(selections.category.is_all());
        assert_eq!(selections.status.wire_value(), vec!["COMPLETE".to_string()]);
    }
}
