//! Configuration types for criteria-composer.

use crate::model::FilterContext;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Engine Configuration
// ============================================================================

/// Top-level configuration, loadable from a YAML file and overridable from the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    /// Host context (normal or scoped report mode)
    pub context: FilterContext,
    /// Group naming
    pub groups: GroupConfig,
    /// Catalogue source settings
    pub catalogue: CatalogueConfig,
    /// Warning banner behaviour
    pub warnings: WarningConfig,
}

impl EngineConfig {
    /// Create a new `EngineConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `EngineConfig` builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

// ============================================================================
// Builder for EngineConfig
// ============================================================================

/// Builder for constructing `EngineConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the host context.
    pub fn context(mut self, context: FilterContext) -> Self {
        self.config.context = context;
        self
    }

    /// Set the default group name prefix.
    pub fn group_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.groups.name_prefix = prefix.into();
        self
    }

    /// Set the suffix appended to duplicated group names.
    pub fn copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.groups.copy_suffix = suffix.into();
        self
    }

    /// Set the catalogue base URL.
    pub fn catalogue_url(mut self, url: impl Into<String>) -> Self {
        self.config.catalogue.base_url = Some(url.into());
        self
    }

    /// Bypass the catalogue cache.
    pub const fn bypass_cache(mut self, bypass: bool) -> Self {
        self.config.catalogue.bypass_cache = bypass;
        self
    }

    /// Set the warning auto-clear delay (`None` keeps warnings until replaced).
    pub const fn warning_auto_clear_ms(mut self, ms: Option<u64>) -> Self {
        self.config.warnings.auto_clear_ms = ms;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// How new and duplicated groups are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GroupConfig {
    /// Prefix of generated names ("Group" → "Group 1", "Group 2", ...)
    pub name_prefix: String,
    /// Suffix appended to a duplicated group's name
    pub copy_suffix: String,
}

impl GroupConfig {
    /// Default name for the `n`-th group created.
    #[must_use]
    pub fn default_name(&self, n: usize) -> String {
        format!("{} {n}", self.name_prefix)
    }

    /// Name of a copy of `name`.
    #[must_use]
    pub fn copy_name(&self, name: &str) -> String {
        format!("{name}{}", self.copy_suffix)
    }
}

/// Settings for fetching field catalogues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Base URL of the catalogue service (None = no HTTP source)
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
    /// Cache time-to-live in seconds
    pub cache_ttl_secs: u64,
    /// Always fetch, ignoring cached responses
    pub bypass_cache: bool,
    /// Cache directory override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl CatalogueConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Warning banner behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WarningConfig {
    /// Clear a warning after this many milliseconds (None = keep until replaced)
    pub auto_clear_ms: Option<u64>,
}

impl WarningConfig {
    #[must_use]
    pub fn auto_clear(&self) -> Option<Duration> {
        self.auto_clear_ms.map(Duration::from_millis)
    }
}
