//! Configuration module for criteria-composer.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use criteria_composer::config::{EngineConfig, file::load_or_default};
//!
//! // Use defaults
//! let config = EngineConfig::default();
//!
//! // Use builder
//! let config = EngineConfig::builder()
//!     .group_name_prefix("Set")
//!     .catalogue_url("https://filters.example.com")
//!     .build();
//!
//! // Load from file
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.criteria-composer.yaml` file in your project root or
//! `~/.config/criteria-composer/`:
//!
//! ```yaml
//! context:
//!   mode: scoped
//!   status: [COMPLETE]
//!   category: [steel, paper]
//!   country: [DE, FR]
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_CATALOGUE_CACHE_TTL_SECS, DEFAULT_CATALOGUE_TIMEOUT_SECS, DEFAULT_COPY_SUFFIX,
    DEFAULT_GROUP_NAME_PREFIX, DEFAULT_WARNING_AUTO_CLEAR_MS,
};
pub use types::{
    CatalogueConfig, EngineConfig, EngineConfigBuilder, GroupConfig, WarningConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `EngineConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.criteria-composer.yaml`.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(EngineConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
