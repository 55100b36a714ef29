//! Configuration validation for criteria-composer.

use super::types::{CatalogueConfig, EngineConfig, GroupConfig, WarningConfig};
use crate::model::{Dimension, FilterContext};
use std::collections::BTreeSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for EngineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.context.validate());
        errors.extend(self.groups.validate());
        errors.extend(self.catalogue.validate());
        errors.extend(self.warnings.validate());
        errors
    }
}

impl Validatable for FilterContext {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Self::Normal { known_statuses } = self {
            if known_statuses.is_empty() {
                errors.push(ConfigError {
                    field: "context.known_statuses".to_string(),
                    message: "At least one known status is required in normal mode".to_string(),
                });
            }
        }

        for dimension in Dimension::ALL {
            let field = format!(
                "context.{}",
                match (self, dimension) {
                    (Self::Normal { .. }, Dimension::Status) => "known_statuses",
                    (_, Dimension::Status) => "status",
                    (_, Dimension::Category) => "category",
                    (_, Dimension::Country) => "country",
                }
            );
            check_value_list(&field, self.domain(dimension), &mut errors);
        }

        errors
    }
}

fn check_value_list(field: &str, values: &[String], errors: &mut Vec<ConfigError>) {
    if values.iter().any(|v| v.trim().is_empty()) {
        errors.push(ConfigError {
            field: field.to_string(),
            message: "Values must not be blank".to_string(),
        });
    }

    let unique: BTreeSet<&String> = values.iter().collect();
    if unique.len() != values.len() {
        errors.push(ConfigError {
            field: field.to_string(),
            message: "Values must be unique".to_string(),
        });
    }
}

impl Validatable for GroupConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.name_prefix.trim().is_empty() {
            errors.push(ConfigError {
                field: "groups.name_prefix".to_string(),
                message: "Group name prefix must not be blank".to_string(),
            });
        }
        if self.copy_suffix.is_empty() {
            errors.push(ConfigError {
                field: "groups.copy_suffix".to_string(),
                message: "Copy suffix must not be empty, or copies are indistinguishable"
                    .to_string(),
            });
        }
        errors
    }
}

impl Validatable for CatalogueConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref url) = self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(ConfigError {
                    field: "catalogue.base_url".to_string(),
                    message: format!("Base URL must start with http:// or https://, got '{url}'"),
                });
            }
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "catalogue.timeout_secs".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        errors
    }
}

impl Validatable for WarningConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.auto_clear_ms == Some(0) {
            errors.push(ConfigError {
                field: "warnings.auto_clear_ms".to_string(),
                message: "Auto-clear of 0ms hides every warning; use null to disable auto-clear"
                    .to_string(),
            });
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScopeDefaults;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.is_valid(), "{:?}", config.validate());
    }

    #[test]
    fn test_empty_known_statuses() {
        let config = EngineConfig::builder()
            .context(FilterContext::normal(Vec::<String>::new()))
            .build();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "context.known_statuses"));
    }

    #[test]
    fn test_duplicate_scope_values() {
        let context = FilterContext::scoped(ScopeDefaults {
            status: vec!["COMPLETE".into()],
            category: vec!["steel".into(), "steel".into()],
            country: vec![" ".into()],
        });
        let errors = context.validate();
        assert!(errors
            .iter()
            .any(|e| e.field == "context.category" && e.message.contains("unique")));
        assert!(errors
            .iter()
            .any(|e| e.field == "context.country" && e.message.contains("blank")));
    }

    #[test]
    fn test_invalid_catalogue_settings() {
        let mut config = EngineConfig::builder().catalogue_url("ftp://example").build();
        config.catalogue.timeout_secs = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_zero_auto_clear() {
        let config = EngineConfig::builder().warning_auto_clear_ms(Some(0)).build();
        assert!(!config.is_valid());
    }
}
