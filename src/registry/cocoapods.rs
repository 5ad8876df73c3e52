//! CocoaPods adapter
//!
//! Scrapes the latest version from a pod's page.
//! Page URL: https://cocoapods.org/pods/{name}

use crate::cache::{CacheValue, ResultCache};
use crate::domain::PackageManager;
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

/// CocoaPods site base URL
const COCOAPODS_URL: &str = "https://cocoapods.org";

/// `<h1><span>name</span><span>version</span></h1>` header of a pod page
static POD_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h1>\s*<span>[^<]*</span>\s*<span>\s*([^<\s]+)\s*</span>").unwrap()
});

/// CocoaPods adapter
pub struct CocoaPodsAdapter {
    client: HttpClient,
    cache: ResultCache,
    base_url: String,
}

impl CocoaPodsAdapter {
    /// Create a new CocoaPods adapter
    pub fn new(client: HttpClient, cache: ResultCache) -> Self {
        Self {
            client,
            cache,
            base_url: COCOAPODS_URL.to_string(),
        }
    }

    /// Point the adapter at another site root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_url(&self, pod: &str) -> String {
        format!("{}/pods/{}", self.base_url, pod)
    }
}

/// First version found in a pod page header, empty if none
fn extract_version(html: &str) -> String {
    POD_HEADER_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[async_trait]
impl RegistryAdapter for CocoaPodsAdapter {
    fn package_manager(&self) -> PackageManager {
        PackageManager::CocoaPods
    }

    fn registry_name(&self) -> &'static str {
        "CocoaPods"
    }

    async fn fetch_latest(
        &self,
        package: &str,
        _current: Option<&str>,
    ) -> Result<String, RegistryError> {
        let pod = package.trim();
        let key = format!("cocoapods:{}", pod);

        let value = self
            .cache
            .get_or_fetch(&key, move || async move {
                let html = self
                    .client
                    .get_text(&self.build_url(pod), pod, self.registry_name())
                    .await?;
                Ok::<_, RegistryError>(CacheValue::Version(extract_version(&html)))
            })
            .await?;

        Ok(value.as_version().unwrap_or_default().to_string())
    }
}
