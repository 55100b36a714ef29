//! The three selection dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A selection dimension with tri-state "All vs explicit subset" semantics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Status,
    Category,
    Country,
}

impl Dimension {
    /// Every dimension, in display order.
    pub const ALL: [Self; 3] = [Self::Status, Self::Category, Self::Country];

    /// Get display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Category => "Category",
            Self::Country => "Country",
        }
    }

    /// Label of the synthetic "All" entry
    #[must_use]
    pub const fn all_label(&self) -> &'static str {
        match self {
            Self::Status => "All Statuses",
            Self::Category => "All Categories",
            Self::Country => "All Countries",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
