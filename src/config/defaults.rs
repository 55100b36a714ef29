//! Default values for criteria-composer configuration.

use super::types::{CatalogueConfig, GroupConfig, WarningConfig};

/// Prefix of generated group names.
pub const DEFAULT_GROUP_NAME_PREFIX: &str = "Group";

/// Suffix appended to duplicated group names.
pub const DEFAULT_COPY_SUFFIX: &str = " (Copy)";

/// Catalogue request timeout.
pub const DEFAULT_CATALOGUE_TIMEOUT_SECS: u64 = 15;

/// Catalogue cache time-to-live (one hour; field counts drift slowly).
pub const DEFAULT_CATALOGUE_CACHE_TTL_SECS: u64 = 3600;

/// How long a warning stays in the banner.
pub const DEFAULT_WARNING_AUTO_CLEAR_MS: u64 = 4000;

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_GROUP_NAME_PREFIX.to_string(),
            copy_suffix: DEFAULT_COPY_SUFFIX.to_string(),
        }
    }
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_CATALOGUE_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CATALOGUE_CACHE_TTL_SECS,
            bypass_cache: false,
            cache_dir: None,
        }
    }
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            auto_clear_ms: Some(DEFAULT_WARNING_AUTO_CLEAR_MS),
        }
    }
}
