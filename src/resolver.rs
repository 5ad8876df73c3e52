//! Dependency resolver for repositories
//!
//! This module provides:
//! - Workflow coordination: manifests → normalize → lookup → classify → rollup
//! - Fallback to a parsed build file when the host has no dependency graph
//! - Fallback to manifest release tags when no registry answers
//! - Parallel registry queries bounded by a shared semaphore
//! - Cooperative cancellation that leaves the repository untouched

use crate::cache::{CacheValue, ResultCache};
use crate::domain::{
    Dependency, Manifest, ManifestEntry, ManifestSource, PackageManager, Repository,
    RepositorySnapshot, Rollups, SecurityAlert, UpdateStatus,
};
use crate::error::{RegistryError, ResolveError};
use crate::manifest::parse_dependency_file;
use crate::registry::{default_adapters, HttpClient, RegistryAdapter};
use crate::update::has_security_alert;
use async_trait::async_trait;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default concurrency limit for registry requests
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default location of a repository's fallback build file
pub const DEFAULT_FILE_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/{owner}/{name}/HEAD/{path}";

/// Configuration for the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum concurrent upstream requests, shared by all repositories
    pub max_concurrency: usize,
    /// URL of a repository file, with `{owner}`, `{name}` and `{path}` placeholders
    pub dependency_file_url_template: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_CONCURRENCY,
            dependency_file_url_template: DEFAULT_FILE_URL_TEMPLATE.to_string(),
        }
    }
}

/// Source of raw build file text for repositories without a dependency graph
#[async_trait]
pub trait DependencyFileFetcher: Send + Sync {
    /// Fetch the text of `path` in `repository`
    async fn fetch_file(&self, repository: &Repository, path: &str)
        -> Result<String, RegistryError>;
}

/// Fetches repository files over HTTP from a URL template
pub struct HttpFileFetcher {
    client: HttpClient,
    url_template: String,
}

impl HttpFileFetcher {
    pub fn new(client: HttpClient, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }

    fn build_url(&self, repository: &Repository, path: &str) -> String {
        self.url_template
            .replace("{owner}", &repository.owner)
            .replace("{name}", &repository.name)
            .replace("{path}", path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DependencyFileFetcher for HttpFileFetcher {
    async fn fetch_file(
        &self,
        repository: &Repository,
        path: &str,
    ) -> Result<String, RegistryError> {
        let url = self.build_url(repository, path);
        self.client.get_text(&url, path, "repository files").await
    }
}

/// Resolver that turns manifest sources into classified dependencies
pub struct DependencyResolver {
    adapters: HashMap<PackageManager, Arc<dyn RegistryAdapter>>,
    file_fetcher: Arc<dyn DependencyFileFetcher>,
    cache: ResultCache,
    semaphore: Arc<Semaphore>,
    max_concurrency: usize,
}

impl DependencyResolver {
    /// Create a resolver with the default registry adapters
    pub fn new(client: HttpClient, cache: ResultCache, config: &ResolverConfig) -> Self {
        let max_concurrency = config.max_concurrency.max(1);
        Self {
            adapters: default_adapters(client.clone(), cache.clone()),
            file_fetcher: Arc::new(HttpFileFetcher::new(
                client,
                config.dependency_file_url_template.clone(),
            )),
            cache,
            semaphore: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    /// Replace every registry adapter
    pub fn with_adapters(
        mut self,
        adapters: HashMap<PackageManager, Arc<dyn RegistryAdapter>>,
    ) -> Self {
        self.adapters = adapters;
        self
    }

    /// Register or replace the adapter for one package manager
    pub fn with_adapter(
        mut self,
        package_manager: PackageManager,
        adapter: Arc<dyn RegistryAdapter>,
    ) -> Self {
        self.adapters.insert(package_manager, adapter);
        self
    }

    /// Replace the build file fetcher
    pub fn with_file_fetcher(mut self, file_fetcher: Arc<dyn DependencyFileFetcher>) -> Self {
        self.file_fetcher = file_fetcher;
        self
    }

    /// The cache shared with the adapters
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Latest version of one package, empty when it cannot be resolved
    pub async fn latest_version(
        &self,
        package_manager: PackageManager,
        package: &str,
        current: Option<&str>,
    ) -> String {
        let Some(adapter) = self.adapters.get(&package_manager) else {
            return String::new();
        };
        let _permit = self.semaphore.acquire().await.ok();
        adapter.latest_version(package, current).await
    }

    /// Resolve one repository
    ///
    /// On success the dependency list and the three rollups are replaced
    /// together. On cancellation the repository is left as it was.
    pub async fn resolve(
        &self,
        repository: &mut Repository,
        source: &ManifestSource,
        alerts: &[SecurityAlert],
        cancel: &CancellationToken,
    ) -> Result<(), ResolveError> {
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        if repository.no_dependencies {
            debug!("{} opted out of dependency tracking", repository.full_name());
            repository.replace_dependencies(Vec::new(), Rollups::uniform(UpdateStatus::UpToDate));
            return Ok(());
        }

        debug!(
            "{}: {} manifest entries, {} alerts",
            repository.full_name(),
            source.entry_count(),
            alerts.len()
        );

        let fallback = if source.manifests.is_empty() {
            self.fallback_manifest(repository, cancel).await?
        } else {
            None
        };
        let manifests = match &fallback {
            Some(manifest) => std::slice::from_ref(manifest),
            None => source.manifests.as_slice(),
        };

        let lookups = manifests.iter().flat_map(|manifest| {
            manifest
                .dependencies
                .iter()
                .map(move |entry| self.resolve_entry(&manifest.filename, entry, alerts))
        });

        let dependencies = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
            dependencies = join_all(lookups) => dependencies,
        };

        let rollups = Rollups::from_dependencies(&dependencies);
        info!(
            "resolved {} dependencies for {} ({})",
            dependencies.len(),
            repository.full_name(),
            rollups.repository
        );
        repository.replace_dependencies(dependencies, rollups);
        Ok(())
    }

    /// Resolve many repositories, returning them in input order
    ///
    /// `on_complete` is called once per repository as it finishes.
    pub async fn resolve_fleet<F>(
        &self,
        snapshots: Vec<RepositorySnapshot>,
        cancel: &CancellationToken,
        on_complete: F,
    ) -> Result<Vec<Repository>, ResolveError>
    where
        F: Fn(&Repository),
    {
        self.cache.purge_expired();
        let on_complete = &on_complete;
        let results: Vec<Result<Repository, ResolveError>> = stream::iter(snapshots)
            .map(|snapshot| async move {
                let RepositorySnapshot {
                    mut repository,
                    manifests,
                    alerts,
                } = snapshot;
                self.resolve(&mut repository, &manifests, &alerts, cancel)
                    .await?;
                on_complete(&repository);
                Ok(repository)
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        results.into_iter().collect()
    }

    /// Parse the repository's fallback build file, if it names one
    ///
    /// Fetch failures yield an empty manifest; fetched text is cached.
    async fn fallback_manifest(
        &self,
        repository: &Repository,
        cancel: &CancellationToken,
    ) -> Result<Option<Manifest>, ResolveError> {
        let Some(path) = repository
            .dependency_file
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        else {
            return Ok(None);
        };

        let key = format!("file:{}:{}", repository.full_name(), path);
        let fetch = self.cache.get_or_fetch(&key, move || async move {
            let _permit = self.semaphore.acquire().await.ok();
            self.file_fetcher
                .fetch_file(repository, path)
                .await
                .map(CacheValue::Text)
        });

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
            fetched = fetch => fetched,
        };

        let manifest = match fetched {
            Ok(value) => parse_dependency_file(path, value.as_text().unwrap_or_default()),
            Err(e) => {
                warn!("{}: {}", repository.full_name(), e);
                Manifest::new(path, Vec::new())
            }
        };
        Ok(Some(manifest))
    }

    /// Build and classify the dependency for one manifest entry
    async fn resolve_entry(
        &self,
        manifest_file: &str,
        entry: &ManifestEntry,
        alerts: &[SecurityAlert],
    ) -> Dependency {
        let dependency = Dependency::declare(
            &entry.package_name,
            manifest_file,
            entry.package_manager,
            &entry.requirement,
        );
        let alerted = has_security_alert(&entry.package_name, alerts);

        if dependency.current_version.is_empty() {
            return dependency.classify("", alerted);
        }

        let mut latest = self
            .latest_version(
                entry.package_manager,
                &entry.package_name,
                Some(&dependency.current_version),
            )
            .await;

        if latest.is_empty() {
            if let Some(tag) = &entry.release_tag {
                latest = tag.trim().trim_start_matches(['v', 'V']).to_string();
            }
        }

        dependency.classify(latest, alerted)
    }
}
