//! Unified error types for criteria-composer.
//!
//! Nothing in the engine is allowed to be user-fatal. Errors here are the ones
//! that cross a boundary: ingesting drafts and sessions, talking to a
//! catalogue source, reading configuration. Rejected editing operations use
//! the lighter [`StoreWarning`](crate::store::StoreWarning) instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for criteria-composer operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CriteriaError {
    /// Errors while ingesting an external draft or session
    #[error("Failed to ingest input: {context}")]
    Ingest {
        context: String,
        #[source]
        source: IngestErrorKind,
    },

    /// Errors while refreshing the field catalogue
    #[error("Catalogue refresh failed: {context}")]
    Catalogue {
        context: String,
        #[source]
        source: CatalogueErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific ingestion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Specific catalogue error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogueErrorKind {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for criteria-composer operations
pub type Result<T> = std::result::Result<T, CriteriaError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CriteriaError {
    /// Create an ingest error with context
    pub fn ingest(context: impl Into<String>, source: IngestErrorKind) -> Self {
        Self::Ingest {
            context: context.into(),
            source,
        }
    }

    /// Create a catalogue error with context
    pub fn catalogue(context: impl Into<String>, source: CatalogueErrorKind) -> Self {
        Self::Catalogue {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CriteriaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CriteriaError {
    fn from(err: serde_json::Error) -> Self {
        Self::ingest(
            "JSON deserialization",
            IngestErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for CriteriaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::ingest(
            "YAML deserialization",
            IngestErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward, so an error raised deep in session loading
/// reads as `"loading session: parsing actions: <original>"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on the error path.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CriteriaError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: CriteriaError, new_ctx: &str) -> CriteriaError {
    match err {
        CriteriaError::Ingest {
            context: existing,
            source,
        } => CriteriaError::Ingest {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CriteriaError::Catalogue {
            context: existing,
            source,
        } => CriteriaError::Catalogue {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CriteriaError::Io {
            path,
            message,
            source,
        } => CriteriaError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CriteriaError::Config(msg) => CriteriaError::Config(chain_context(new_ctx, &msg)),
        CriteriaError::Validation(msg) => CriteriaError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| CriteriaError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| CriteriaError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CriteriaError::catalogue(
            "scope [steel]",
            CatalogueErrorKind::ApiError("503".to_string()),
        );
        let display = err.to_string();
        assert!(display.contains("Catalogue"), "unexpected message: {display}");
        assert!(display.contains("steel"), "unexpected message: {display}");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CriteriaError::io("/path/to/session.yaml", io_err);

        assert!(err.to_string().contains("/path/to/session.yaml"));
    }

    #[test]
    fn test_json_error_converts_to_ingest() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: CriteriaError = parse.unwrap_err().into();
        assert!(matches!(
            err,
            CriteriaError::Ingest {
                source: IngestErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(CriteriaError::ingest(
                "base",
                IngestErrorKind::UnsupportedFormat("toml".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(CriteriaError::Ingest { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Ingest error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(CriteriaError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        match none_value.context_none("missing group") {
            Err(CriteriaError::Validation(msg)) => assert_eq!(msg, "missing group"),
            other => panic!("Expected Validation error, got {other:?}"),
        }

        assert_eq!(Some(7).context_none("unused").ok(), Some(7));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
