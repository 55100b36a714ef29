//! View-model data for hosts that render the filter panel.

mod rows;
mod status;

pub use rows::{
    boolean_rows, build_tab, dimension_domain, numeric_rows, selector_rows, BooleanRow, FilterTab,
    NumericRow, RowSource, SelectorRow, TabView,
};
pub use status::WarningBanner;
