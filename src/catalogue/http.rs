//! HTTP catalogue source with file caching.

use super::cache::CatalogueCache;
use super::source::CatalogueSource;
use crate::config::CatalogueConfig;
use crate::error::{CatalogueErrorKind, CriteriaError, Result};
use crate::model::{Catalogue, CatalogueScope};

/// Fetches `GET {base_url}/filters/catalogue?category=..` as JSON.
pub struct HttpCatalogueSource {
    base_url: String,
    client: reqwest::blocking::Client,
    cache: CatalogueCache,
    bypass_cache: bool,
}

impl HttpCatalogueSource {
    /// Build a source from configuration. Fails when no base URL is set.
    pub fn new(config: &CatalogueConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| CriteriaError::config("catalogue.base_url is not set"))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                CriteriaError::catalogue("building HTTP client", CatalogueErrorKind::NetworkError(e.to_string()))
            })?;

        let cache_dir = config
            .cache_dir
            .clone()
            .unwrap_or_else(CatalogueCache::default_dir);

        Ok(Self {
            base_url,
            client,
            cache: CatalogueCache::new(cache_dir, config.cache_ttl()),
            bypass_cache: config.bypass_cache,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/filters/catalogue", self.base_url)
    }

    fn fetch_remote(&self, scope: &CatalogueScope) -> Result<Catalogue> {
        let context = || format!("scope '{}'", scope.key());
        let query: Vec<(&str, &str)> = scope
            .categories
            .iter()
            .map(|c| ("category", c.as_str()))
            .collect();

        let response = self
            .client
            .get(self.endpoint())
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .map_err(|e| CriteriaError::catalogue(context(), CatalogueErrorKind::NetworkError(e.to_string())))?;

        if !response.status().is_success() {
            return Err(CriteriaError::catalogue(
                context(),
                CatalogueErrorKind::ApiError(format!("catalogue endpoint returned {}", response.status())),
            ));
        }

        response
            .json::<Catalogue>()
            .map_err(|e| CriteriaError::catalogue(context(), CatalogueErrorKind::InvalidResponse(e.to_string())))
    }
}

impl CatalogueSource for HttpCatalogueSource {
    fn fetch(&self, scope: &CatalogueScope) -> Result<Catalogue> {
        let endpoint = self.endpoint();
        if !self.bypass_cache {
            if let Some(cached) = self.cache.get(&endpoint, scope) {
                tracing::debug!("Catalogue cache hit for '{}'", scope.key());
                return Ok(cached);
            }
        }

        let catalogue = self.fetch_remote(scope)?;
        if let Err(e) = self.cache.set(&endpoint, scope, &catalogue) {
            tracing::warn!("{e}");
        }
        Ok(catalogue)
    }

    fn name(&self) -> &'static str {
        "HTTP"
    }
}
