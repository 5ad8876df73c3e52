//! Repository records and status rollups

use super::{Dependency, UpdateStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked repository
///
/// Metadata fields are owned by the ingestion layer; `dependencies` and the
/// three rollups are rebuilt wholesale by each resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Owning organization or user
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Web URL
    pub url: String,
    /// Short description
    pub description: Option<String>,
    /// Open issue count
    pub open_issues: u32,
    /// Open pull request count
    pub open_pull_requests: u32,
    /// Star count
    pub stars: u32,
    /// Explicit opt-out from dependency tracking
    pub no_dependencies: bool,
    /// Build file to parse when the host has no dependency graph
    pub dependency_file: Option<String>,
    /// Resolved dependencies
    #[serde(skip_deserializing)]
    pub dependencies: Vec<Dependency>,
    /// Maximum status over all dependencies
    #[serde(skip_deserializing)]
    pub repository_status: UpdateStatus,
    /// Maximum status over identity libraries
    #[serde(skip_deserializing)]
    pub identity_status: UpdateStatus,
    /// Maximum status over Graph SDK libraries
    #[serde(skip_deserializing)]
    pub graph_status: UpdateStatus,
    /// When the last resolution pass completed
    #[serde(skip_deserializing)]
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// The three repository-level rollups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rollups {
    pub repository: UpdateStatus,
    pub identity: UpdateStatus,
    pub graph: UpdateStatus,
}

impl Rollups {
    /// Every rollup set to the same status
    pub fn uniform(status: UpdateStatus) -> Self {
        Self {
            repository: status,
            identity: status,
            graph: status,
        }
    }

    /// Fold a fully classified dependency list
    pub fn from_dependencies(dependencies: &[Dependency]) -> Self {
        let mut rollups = Rollups::default();
        for dependency in dependencies {
            let status = dependency.status();
            rollups.repository.raise(status);
            if dependency.is_identity_library() {
                rollups.identity.raise(status);
            }
            if dependency.is_graph_library() {
                rollups.graph.raise(status);
            }
        }
        rollups
    }
}

impl Repository {
    /// Creates a repository with only identity fields set
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns `owner/name`
    pub fn full_name(&self) -> String {
        if self.owner.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.owner, self.name)
        }
    }

    /// Replace dependencies and rollups in one step
    pub fn replace_dependencies(&mut self, dependencies: Vec<Dependency>, rollups: Rollups) {
        self.dependencies = dependencies;
        self.repository_status = rollups.repository;
        self.identity_status = rollups.identity;
        self.graph_status = rollups.graph;
        self.refreshed_at = Some(Utc::now());
    }

    /// Rollups currently stored on the repository
    pub fn rollups(&self) -> Rollups {
        Rollups {
            repository: self.repository_status,
            identity: self.identity_status,
            graph: self.graph_status,
        }
    }

    /// Number of dependencies asking for some update
    pub fn actionable_count(&self) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.status().is_actionable())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PackageManager;

    fn classified(name: &str, current: &str, latest: &str, alert: bool) -> Dependency {
        Dependency::declare(name, "manifest", PackageManager::Nuget, current).classify(latest, alert)
    }

    #[test]
    fn test_new_repository_defaults() {
        let repo = Repository::new("contoso", "web");
        assert_eq!(repo.full_name(), "contoso/web");
        assert_eq!(repo.rollups(), Rollups::uniform(UpdateStatus::Unknown));
        assert!(repo.dependencies.is_empty());
        assert!(repo.refreshed_at.is_none());
    }

    #[test]
    fn test_full_name_without_owner() {
        let repo = Repository::new("", "web");
        assert_eq!(repo.full_name(), "web");
    }

    #[test]
    fn test_rollup_one_urgent_among_up_to_date() {
        let deps = vec![
            classified("A", "1.0.0", "1.0.0", false),
            classified("B", "2.0.0", "2.0.0", false),
            classified("C", "3.0.0", "3.0.0", true),
            classified("D", "4.0.0", "4.0.0", false),
        ];
        let rollups = Rollups::from_dependencies(&deps);
        assert_eq!(rollups.repository, UpdateStatus::UrgentUpdate);
        assert_eq!(rollups.identity, UpdateStatus::Unknown);
        assert_eq!(rollups.graph, UpdateStatus::Unknown);
    }

    #[test]
    fn test_rollups_restricted_to_allow_lists() {
        let deps = vec![
            classified("Microsoft.Identity.Client", "4.1.0", "4.2.0", false),
            classified("Microsoft.Graph", "5.0.0", "5.0.1", false),
            classified("Newtonsoft.Json", "12.0.0", "13.0.3", false),
        ];
        let rollups = Rollups::from_dependencies(&deps);
        assert_eq!(rollups.repository, UpdateStatus::MajorVersionUpdate);
        assert_eq!(rollups.identity, UpdateStatus::MinorVersionUpdate);
        assert_eq!(rollups.graph, UpdateStatus::PatchUpdate);
    }

    #[test]
    fn test_replace_dependencies() {
        let mut repo = Repository::new("contoso", "api");
        let deps = vec![classified("Microsoft.Graph", "4.0.0", "5.0.0", false)];
        let rollups = Rollups::from_dependencies(&deps);
        repo.replace_dependencies(deps, rollups);

        assert_eq!(repo.dependencies.len(), 1);
        assert_eq!(repo.repository_status, UpdateStatus::MajorVersionUpdate);
        assert_eq!(repo.graph_status, UpdateStatus::MajorVersionUpdate);
        assert_eq!(repo.identity_status, UpdateStatus::Unknown);
        assert_eq!(repo.actionable_count(), 1);
        assert!(repo.refreshed_at.is_some());
    }

    #[test]
    fn test_deserialize_partial_document() {
        let repo: Repository =
            serde_json::from_str(r#"{"owner": "contoso", "name": "ios-app", "stars": 12}"#)
                .unwrap();
        assert_eq!(repo.stars, 12);
        assert!(!repo.no_dependencies);
        assert_eq!(repo.repository_status, UpdateStatus::Unknown);
    }

    #[test]
    fn test_deserialize_ignores_resolution_output() {
        let repo: Repository = serde_json::from_str(
            r#"{
                "owner": "contoso",
                "name": "web",
                "repository_status": "UrgentUpdate",
                "graph_status": "MajorVersionUpdate",
                "dependencies": [{"package_name": "react", "status": "UpToDate"}]
            }"#,
        )
        .unwrap();
        assert!(repo.dependencies.is_empty());
        assert_eq!(repo.rollups(), Rollups::uniform(UpdateStatus::Unknown));
        assert!(repo.refreshed_at.is_none());
    }
}
