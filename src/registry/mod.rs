//! Registry adapters for fetching latest package versions
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - NuGet flat-container adapter
//! - npm Registry adapter
//! - Maven adapter (Google Android Maven, then Maven Central)
//! - CocoaPods pod page adapter

mod client;
mod cocoapods;
mod maven;
mod npm;
mod nuget;

pub use client::{HttpClient, BASE_DELAY, DEFAULT_TIMEOUT, MAX_RETRIES};
pub use cocoapods::CocoaPodsAdapter;
pub use maven::MavenAdapter;
pub use npm::NpmAdapter;
pub use nuget::NuGetAdapter;

use crate::cache::ResultCache;
use crate::domain::PackageManager;
use crate::error::RegistryError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Trait for registry adapters
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the package manager this adapter handles
    fn package_manager(&self) -> PackageManager;

    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Look up the latest version appropriate for `current`
    ///
    /// Returns an empty string when the registry knows the package but has
    /// no acceptable version.
    async fn fetch_latest(
        &self,
        package: &str,
        current: Option<&str>,
    ) -> Result<String, RegistryError>;

    /// Like `fetch_latest`, with every failure absorbed into an empty string
    async fn latest_version(&self, package: &str, current: Option<&str>) -> String {
        match self.fetch_latest(package, current).await {
            Ok(version) => version,
            Err(e) if e.is_not_found() => {
                debug!("{}", e);
                String::new()
            }
            Err(e) => {
                warn!("{}", e);
                String::new()
            }
        }
    }
}

/// Build one adapter per resolvable package manager, all sharing one client and cache
///
/// Gradle and Maven share a single `MavenAdapter`.
pub fn default_adapters(
    client: HttpClient,
    cache: ResultCache,
) -> HashMap<PackageManager, Arc<dyn RegistryAdapter>> {
    let maven: Arc<dyn RegistryAdapter> =
        Arc::new(MavenAdapter::new(client.clone(), cache.clone()));

    let mut adapters: HashMap<PackageManager, Arc<dyn RegistryAdapter>> = HashMap::new();
    adapters.insert(
        PackageManager::Nuget,
        Arc::new(NuGetAdapter::new(client.clone(), cache.clone())),
    );
    adapters.insert(
        PackageManager::Npm,
        Arc::new(NpmAdapter::new(client.clone(), cache.clone())),
    );
    adapters.insert(PackageManager::Gradle, Arc::clone(&maven));
    adapters.insert(PackageManager::Maven, maven);
    adapters.insert(
        PackageManager::CocoaPods,
        Arc::new(CocoaPodsAdapter::new(client, cache)),
    );
    adapters
}
