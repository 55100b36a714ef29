//! File-based catalogue cache with TTL.

use crate::error::{CatalogueErrorKind, CriteriaError, Result};
use crate::model::{Catalogue, CatalogueScope};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One JSON file per (endpoint, scope), named by SHA-256 of the key.
#[derive(Debug, Clone)]
pub struct CatalogueCache {
    cache_dir: PathBuf,
    ttl: Duration,
}

impl CatalogueCache {
    #[must_use]
    pub const fn new(cache_dir: PathBuf, ttl: Duration) -> Self {
        Self { cache_dir, ttl }
    }

    /// Default location: `<user cache dir>/criteria-composer/catalogue`.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("criteria-composer")
            .join("catalogue")
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path(&self, endpoint: &str, scope: &CatalogueScope) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(format!("endpoint:{endpoint}|scope:{}", scope.key()));
        self.cache_dir.join(format!("{:x}.json", hasher.finalize()))
    }

    /// Cached catalogue, unless missing, expired or unreadable.
    #[must_use]
    pub fn get(&self, endpoint: &str, scope: &CatalogueScope) -> Option<Catalogue> {
        let path = self.path(endpoint, scope);
        let age = fs::metadata(&path).ok()?.modified().ok()?.elapsed().ok()?;
        if age > self.ttl {
            let _ = fs::remove_file(&path);
            return None;
        }
        let data = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Store a catalogue.
    pub fn set(&self, endpoint: &str, scope: &CatalogueScope, catalogue: &Catalogue) -> Result<()> {
        let cache_err = |e: &dyn std::fmt::Display| {
            CriteriaError::catalogue(
                format!("caching scope '{}'", scope.key()),
                CatalogueErrorKind::CacheError(e.to_string()),
            )
        };
        fs::create_dir_all(&self.cache_dir).map_err(|e| cache_err(&e))?;
        let data = serde_json::to_string(catalogue).map_err(|e| cache_err(&e))?;
        fs::write(self.path(endpoint, scope), data).map_err(|e| cache_err(&e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDescriptor;

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogueCache::new(dir.path().to_path_buf(), Duration::from_secs(60));
        let scope = CatalogueScope::new(["steel"]);
        let catalogue = Catalogue {
            numeric_fields: vec![FieldDescriptor::numeric("capacity_tph", "Capacity", 2, Some(1.0), None)],
            ..Catalogue::default()
        };

        assert!(cache.get("https://a", &scope).is_none());
        cache.set("https://a", &scope, &catalogue).unwrap();
        assert_eq!(cache.get("https://a", &scope), Some(catalogue));
        assert!(cache.get("https://b", &scope).is_none());
    }

    #[test]
    fn test_zero_ttl_expires() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CatalogueCache::new(dir.path().to_path_buf(), Duration::ZERO);
        let scope = CatalogueScope::default();
        cache.set("https://a", &scope, &Catalogue::empty()).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("https://a", &scope).is_none());
    }
}
