//! The catalogue source seam.

use crate::error::{CatalogueErrorKind, CriteriaError, Result};
use crate::model::{Catalogue, CatalogueScope};
use std::collections::BTreeMap;

/// Something that can produce the field catalogue for a category scope.
///
/// Implementations must be shareable across threads: hosts are free to run
/// fetches off the editing thread.
///
/// # Example
///
/// ```ignore
/// use criteria_composer::catalogue::{CatalogueSource, NoOpCatalogueSource};
///
/// let source: Box<dyn CatalogueSource> = match config.catalogue.base_url {
///     Some(_) => Box::new(HttpCatalogueSource::new(&config.catalogue)?),
///     None => Box::new(NoOpCatalogueSource),
/// };
/// ```
pub trait CatalogueSource: Send + Sync {
    /// Fetch the catalogue for `scope`.
    fn fetch(&self, scope: &CatalogueScope) -> Result<Catalogue>;

    /// Name of this source, for logs.
    fn name(&self) -> &'static str;
}

/// A source with nothing to offer; every fetch returns an empty catalogue.
///
/// Used when no catalogue backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCatalogueSource;

impl CatalogueSource for NoOpCatalogueSource {
    fn fetch(&self, _scope: &CatalogueScope) -> Result<Catalogue> {
        Ok(Catalogue::empty())
    }

    fn name(&self) -> &'static str {
        "NoOp"
    }
}

/// In-memory catalogues keyed by scope, with an optional fallback.
///
/// Backs session replay and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogueSource {
    by_scope: BTreeMap<CatalogueScope, Catalogue>,
    fallback: Option<Catalogue>,
}

impl StaticCatalogueSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the catalogue served for one scope.
    #[must_use]
    pub fn with_scope(mut self, scope: CatalogueScope, catalogue: Catalogue) -> Self {
        self.by_scope.insert(scope, catalogue);
        self
    }

    /// Catalogue served for any unregistered scope.
    #[must_use]
    pub fn with_fallback(mut self, catalogue: Catalogue) -> Self {
        self.fallback = Some(catalogue);
        self
    }

    pub fn insert(&mut self, scope: CatalogueScope, catalogue: Catalogue) {
        self.by_scope.insert(scope, catalogue);
    }
}

impl CatalogueSource for StaticCatalogueSource {
    fn fetch(&self, scope: &CatalogueScope) -> Result<Catalogue> {
        self.by_scope
            .get(scope)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| {
                CriteriaError::catalogue(
                    format!("scope '{}'", scope.key()),
                    CatalogueErrorKind::Unavailable("no catalogue registered".to_string()),
                )
            })
    }

    fn name(&self) -> &'static str {
        "Static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDescriptor;

    #[test]
    fn test_static_source_lookup() {
        let steel = Catalogue {
            boolean_fields: vec![FieldDescriptor::boolean("recycled", "Recycled", 3)],
            ..Catalogue::default()
        };
        let source = StaticCatalogueSource::new().with_scope(CatalogueScope::new(["steel"]), steel);

        let fetched = source.fetch(&CatalogueScope::new(["steel"])).unwrap();
        assert_eq!(fetched.boolean_fields.len(), 1);
        assert!(source.fetch(&CatalogueScope::new(["glass"])).is_err());
    }

    #[test]
    fn test_fallback_and_noop() {
        let source = StaticCatalogueSource::new().with_fallback(Catalogue::empty());
        assert!(source.fetch(&CatalogueScope::default()).is_ok());
        assert!(NoOpCatalogueSource
            .fetch(&CatalogueScope::default())
            .unwrap()
            .is_empty());
    }
}
