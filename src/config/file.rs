//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::EngineConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".criteria-composer.yaml",
    ".criteria-composer.yml",
    "criteria-composer.yaml",
    "criteria-composer.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/criteria-composer/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("criteria-composer")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `EngineConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<EngineConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: EngineConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (EngineConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (EngineConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (EngineConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl EngineConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    ///
    /// Used to layer CLI flags over file config.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.context != defaults.context {
            self.context.clone_from(&other.context);
        }
        if other.groups.name_prefix != defaults.groups.name_prefix {
            self.groups.name_prefix.clone_from(&other.groups.name_prefix);
        }
        if other.groups.copy_suffix != defaults.groups.copy_suffix {
            self.groups.copy_suffix.clone_from(&other.groups.copy_suffix);
        }
        if other.catalogue.base_url.is_some() {
            self.catalogue.base_url.clone_from(&other.catalogue.base_url);
        }
        if other.catalogue.timeout_secs != defaults.catalogue.timeout_secs {
            self.catalogue.timeout_secs = other.catalogue.timeout_secs;
        }
        if other.catalogue.cache_ttl_secs != defaults.catalogue.cache_ttl_secs {
            self.catalogue.cache_ttl_secs = other.catalogue.cache_ttl_secs;
        }
        if other.catalogue.bypass_cache {
            self.catalogue.bypass_cache = true;
        }
        if other.catalogue.cache_dir.is_some() {
            self.catalogue.cache_dir.clone_from(&other.catalogue.cache_dir);
        }
        if other.warnings != defaults.warnings {
            self.warnings.clone_from(&other.warnings);
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a short example configuration file.
#[must_use]
pub fn generate_example_config() -> String {
    r#"# criteria-composer configuration
# Place as .criteria-composer.yaml in your project root or
# ~/.config/criteria-composer/criteria-composer.yaml

context:
  mode: normal
  known_statuses: [COMPLETE, INCOMPLETE, DELETED, NONE]

catalogue:
  # base_url: https://filters.example.com
  timeout_secs: 15
"#
    .to_string()
}

/// Generate an example configuration listing every option.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# criteria-composer configuration (all options)

# Host context.
#   normal: category/country "All" means no restriction; status "All" is the
#           list of known statuses.
#   scoped: every "All" is the report's configured domain.
context:
  mode: scoped
  status: [COMPLETE, INCOMPLETE]
  category: [steel, paper, glass]
  country: [DE, FR, NL]

groups:
  name_prefix: Group
  copy_suffix: " (Copy)"

catalogue:
  base_url: https://filters.example.com
  timeout_secs: 15
  cache_ttl_secs: 3600
  bypass_cache: false
  # cache_dir: /tmp/criteria-composer

warnings:
  # null keeps a warning until the next one replaces it
  auto_clear_ms: 4000
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;
    use crate::model::Dimension;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "groups:\n  name_prefix: Set\ncatalogue:\n  bypass_cache: true").unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.groups.name_prefix, "Set");
        assert!(config.catalogue.bypass_cache);
        assert_eq!(config.groups.copy_suffix, " (Copy)");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config_file(Path::new("/nonexistent/criteria-composer.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_discover_explicit_path() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let found = discover_config_file(Some(file.path()));
        assert_eq!(found.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_example_configs_parse_and_validate() {
        let config: EngineConfig = serde_yaml::from_str(&generate_example_config()).unwrap();
        assert!(config.is_valid(), "{:?}", config.validate());

        let full: EngineConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert!(full.is_valid(), "{:?}", full.validate());
        assert!(full.context.is_scoped());
        assert_eq!(full.context.domain(Dimension::Country).len(), 3);
    }

    #[test]
    fn test_merge_prefers_explicit_values() {
        let mut base: EngineConfig =
            serde_yaml::from_str(&generate_full_example_config()).unwrap();
        let overrides = EngineConfig::builder().bypass_cache(true).build();
        base.merge(&overrides);

        assert!(base.catalogue.bypass_cache);
        assert!(base.context.is_scoped(), "default context must not override");
        assert_eq!(
            base.catalogue.base_url.as_deref(),
            Some("https://filters.example.com")
        );
    }
}
