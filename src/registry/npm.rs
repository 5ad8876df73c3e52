//! npm Registry adapter
//!
//! Reads the `latest` dist-tag of a package from the npm registry.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::cache::{CacheValue, ResultCache};
use crate::domain::PackageManager;
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// npm registry base URL
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    cache: ResultCache,
    base_url: String,
}

/// npm package document, only the dist-tags are read
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

impl NpmAdapter {
    /// Create a new npm adapter
    pub fn new(client: HttpClient, cache: ResultCache) -> Self {
        Self {
            client,
            cache,
            base_url: NPM_REGISTRY_URL.to_string(),
        }
    }

    /// Point the adapter at another registry root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the URL for a package (`@scope/name` becomes `@scope%2Fname`)
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package.replace('/', "%2F"))
    }
}

#[async_trait]
impl RegistryAdapter for NpmAdapter {
    fn package_manager(&self) -> PackageManager {
        PackageManager::Npm
    }

    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_latest(
        &self,
        package: &str,
        _current: Option<&str>,
    ) -> Result<String, RegistryError> {
        let package = package.trim();
        let key = format!("npm:{}", package);

        let value = self
            .cache
            .get_or_fetch(&key, move || async move {
                let url = self.build_url(package);
                let response: NpmPackageResponse = self
                    .client
                    .get_json(&url, package, self.registry_name())
                    .await?;
                let latest = response.dist_tags.get("latest").cloned().unwrap_or_default();
                Ok::<_, RegistryError>(CacheValue::Version(latest))
            })
            .await?;

        Ok(value.as_version().unwrap_or_default().to_string())
    }
}
