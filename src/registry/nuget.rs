//! NuGet flat-container adapter
//!
//! Fetches the published version list of a package.
//! API endpoint: https://api.nuget.org/v3-flatcontainer/{id}/index.json

use crate::cache::{CacheValue, ResultCache};
use crate::domain::PackageManager;
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use crate::update::VersionTracks;
use async_trait::async_trait;
use serde::Deserialize;

/// NuGet flat-container base URL
const NUGET_FLAT_CONTAINER_URL: &str = "https://api.nuget.org/v3-flatcontainer";

/// NuGet adapter
pub struct NuGetAdapter {
    client: HttpClient,
    cache: ResultCache,
    base_url: String,
}

/// Flat-container index response, versions oldest to newest
#[derive(Debug, Deserialize)]
struct NuGetIndexResponse {
    #[serde(default)]
    versions: Vec<String>,
}

impl NuGetAdapter {
    /// Create a new NuGet adapter
    pub fn new(client: HttpClient, cache: ResultCache) -> Self {
        Self {
            client,
            cache,
            base_url: NUGET_FLAT_CONTAINER_URL.to_string(),
        }
    }

    /// Point the adapter at another flat-container root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the URL for a package (ids are lower-cased in the flat container)
    fn build_url(&self, package_id: &str) -> String {
        format!("{}/{}/index.json", self.base_url, package_id)
    }

    async fn fetch_tracks(&self, package_id: &str) -> Result<VersionTracks, RegistryError> {
        let url = self.build_url(package_id);
        let response: NuGetIndexResponse = self
            .client
            .get_json(&url, package_id, self.registry_name())
            .await?;
        Ok(VersionTracks::from_versions(&response.versions))
    }
}

#[async_trait]
impl RegistryAdapter for NuGetAdapter {
    fn package_manager(&self) -> PackageManager {
        PackageManager::Nuget
    }

    fn registry_name(&self) -> &'static str {
        "NuGet"
    }

    async fn fetch_latest(
        &self,
        package: &str,
        current: Option<&str>,
    ) -> Result<String, RegistryError> {
        let package_id = package.trim().to_lowercase();
        let key = format!("nuget:{}", package_id);

        let value = self
            .cache
            .get_or_fetch(&key, move || async move {
                self.fetch_tracks(&package_id).await.map(CacheValue::Tracks)
            })
            .await?;

        Ok(value
            .as_tracks()
            .map(|tracks| tracks.pick(current))
            .unwrap_or_default())
    }
}
