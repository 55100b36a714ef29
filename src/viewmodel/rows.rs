//! Pure row builders, one per filter tab kind.
//!
//! Rendering is up to the host. These functions only turn engine state into
//! plain rows, so every tab is a function of `(state, tab)` with no dispatch on
//! tab names inside the selection logic.

use crate::model::{Catalogue, Dimension, FieldDescriptor, FilterContext, FilterGroup, NumericFilter};
use crate::selector::DimensionSelector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A tab of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "dimension", rename_all = "snake_case")]
pub enum FilterTab {
    /// Status, category or country picker
    Dimension(Dimension),
    /// Boolean ("material") attributes of the active group
    Materials,
    /// Numeric ("technical") attributes of the active group
    Technical,
}

impl FilterTab {
    /// Every tab in display order.
    pub const ALL: [Self; 5] = [
        Self::Dimension(Dimension::Status),
        Self::Dimension(Dimension::Category),
        Self::Dimension(Dimension::Country),
        Self::Materials,
        Self::Technical,
    ];

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Dimension(d) => d.label(),
            Self::Materials => "Materials",
            Self::Technical => "Technical",
        }
    }
}

/// One entry of a dimension picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorRow {
    /// `None` for the synthetic "All" entry
    pub value: Option<String>,
    pub label: String,
    pub checked: bool,
}

/// One boolean attribute of the active group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BooleanRow {
    pub field: String,
    pub label: String,
    pub count: u64,
    /// `None` = don't care
    pub value: Option<bool>,
    /// Constraint kept from an earlier scope; the field is no longer offered
    pub orphaned: bool,
}

/// One numeric attribute of the active group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericRow {
    pub field: String,
    pub label: String,
    pub count: u64,
    /// Observed bounds, for placeholders
    pub hint_min: Option<f64>,
    pub hint_max: Option<f64>,
    pub filter: Option<NumericFilter>,
    pub orphaned: bool,
}

/// Rows of one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum TabView {
    Selector(Vec<SelectorRow>),
    Boolean(Vec<BooleanRow>),
    Numeric(Vec<NumericRow>),
}

/// Everything a tab may draw from.
#[derive(Debug, Clone, Copy)]
pub struct RowSource<'a> {
    pub selector: &'a DimensionSelector,
    pub group: Option<&'a FilterGroup>,
    pub catalogue: &'a Catalogue,
    pub context: &'a FilterContext,
}

/// Build the rows of `tab`. `source.selector` must be the selector of the
/// tab's dimension when `tab` is a dimension tab.
#[must_use]
pub fn build_tab(tab: FilterTab, source: RowSource<'_>) -> TabView {
    match tab {
        FilterTab::Dimension(dimension) => TabView::Selector(selector_rows(
            source.selector,
            &dimension_domain(dimension, source.catalogue, source.context),
        )),
        FilterTab::Materials => TabView::Boolean(boolean_rows(source.group, source.catalogue)),
        FilterTab::Technical => TabView::Numeric(numeric_rows(source.group, source.catalogue)),
    }
}

/// Legal values of a dimension: the scope's configured domain, or the
/// catalogue's domain in normal mode.
#[must_use]
pub fn dimension_domain(dimension: Dimension, catalogue: &Catalogue, context: &FilterContext) -> Vec<String> {
    let configured = context.domain(dimension);
    if !configured.is_empty() {
        return configured.to_vec();
    }
    match dimension {
        Dimension::Category => catalogue.category_domain.clone(),
        Dimension::Country => catalogue.country_domain.clone(),
        Dimension::Status => Vec::new(),
    }
}

/// "All" entry first, then the domain, then picked values outside the domain.
#[must_use]
pub fn selector_rows(selector: &DimensionSelector, domain: &[String]) -> Vec<SelectorRow> {
    let mut rows = vec![SelectorRow {
        value: None,
        label: selector.dimension().all_label().to_string(),
        checked: selector.is_all(),
    }];

    let known: BTreeSet<&String> = domain.iter().collect();
    let extras = selector
        .explicit_set()
        .iter()
        .filter(|v| selector.individual_mode() && !known.contains(v));

    for value in domain.iter().chain(extras) {
        rows.push(SelectorRow {
            value: Some(value.clone()),
            label: value.clone(),
            checked: selector.is_checked(value),
        });
    }
    rows
}

/// Catalogue fields first, then constraints on fields the catalogue dropped.
#[must_use]
pub fn boolean_rows(group: Option<&FilterGroup>, catalogue: &Catalogue) -> Vec<BooleanRow> {
    let value_of = |field: &str| group.and_then(|g| g.boolean_filters.get(field).copied());

    let mut rows: Vec<BooleanRow> = catalogue
        .boolean_fields
        .iter()
        .map(|f| BooleanRow {
            field: f.field.clone(),
            label: f.display_label().to_string(),
            count: f.count,
            value: value_of(&f.field),
            orphaned: false,
        })
        .collect();

    if let Some(group) = group {
        for (field, value) in &group.boolean_filters {
            if catalogue.boolean_field(field).is_none() {
                rows.push(BooleanRow {
                    field: field.clone(),
                    label: field.clone(),
                    count: 0,
                    value: Some(*value),
                    orphaned: true,
                });
            }
        }
    }
    rows
}

#[must_use]
pub fn numeric_rows(group: Option<&FilterGroup>, catalogue: &Catalogue) -> Vec<NumericRow> {
    let row = |descriptor: &FieldDescriptor| NumericRow {
        field: descriptor.field.clone(),
        label: descriptor.display_label().to_string(),
        count: descriptor.count,
        hint_min: descriptor.min,
        hint_max: descriptor.max,
        filter: group.and_then(|g| g.numeric_filters.get(&descriptor.field).copied()),
        orphaned: false,
    };

    let mut rows: Vec<NumericRow> = catalogue.numeric_fields.iter().map(row).collect();

    if let Some(group) = group {
        for (field, filter) in &group.numeric_filters {
            if catalogue.numeric_field(field).is_none() {
                rows.push(NumericRow {
                    field: field.clone(),
                    label: field.clone(),
                    count: 0,
                    hint_min: None,
                    hint_max: None,
                    filter: Some(*filter),
                    orphaned: true,
                });
            }
        }
    }
    rows
}
