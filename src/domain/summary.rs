//! Fleet-level summary of resolution results

use super::{Repository, UpdateStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts of repositories and dependencies per status
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FleetSummary {
    /// Number of repositories
    pub repositories: usize,
    /// Number of dependencies across all repositories
    pub dependencies: usize,
    /// Repositories per repository rollup status
    pub repositories_by_status: BTreeMap<UpdateStatus, usize>,
    /// Dependencies per status
    pub dependencies_by_status: BTreeMap<UpdateStatus, usize>,
}

impl FleetSummary {
    /// Build a summary from resolved repositories
    pub fn from_repositories(repositories: &[Repository]) -> Self {
        let mut summary = FleetSummary {
            repositories: repositories.len(),
            ..Default::default()
        };

        for repository in repositories {
            *summary
                .repositories_by_status
                .entry(repository.repository_status)
                .or_default() += 1;

            for dependency in &repository.dependencies {
                summary.dependencies += 1;
                *summary
                    .dependencies_by_status
                    .entry(dependency.status())
                    .or_default() += 1;
            }
        }

        summary
    }

    /// Repositories whose rollup is the given status
    pub fn repositories_with(&self, status: UpdateStatus) -> usize {
        self.repositories_by_status
            .get(&status)
            .copied()
            .unwrap_or(0)
    }

    /// Dependencies with the given status
    pub fn dependencies_with(&self, status: UpdateStatus) -> usize {
        self.dependencies_by_status
            .get(&status)
            .copied()
            .unwrap_or(0)
    }

    /// Repositories that need at least one update
    pub fn actionable_repositories(&self) -> usize {
        self.repositories_by_status
            .iter()
            .filter(|(status, _)| status.is_actionable())
            .map(|(_, count)| count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, PackageManager, Rollups};

    fn repo_with(deps: Vec<Dependency>) -> Repository {
        let mut repo = Repository::new("contoso", "repo");
        let rollups = Rollups::from_dependencies(&deps);
        repo.replace_dependencies(deps, rollups);
        repo
    }

    fn dep(current: &str, latest: &str) -> Dependency {
        Dependency::declare("pkg", "package.json", PackageManager::Npm, current).classify(latest, false)
    }

    #[test]
    fn test_empty_summary() {
        let summary = FleetSummary::from_repositories(&[]);
        assert_eq!(summary.repositories, 0);
        assert_eq!(summary.dependencies, 0);
        assert_eq!(summary.actionable_repositories(), 0);
    }

    #[test]
    fn test_counts_by_status() {
        let repos = vec![
            repo_with(vec![dep("1.0.0", "1.0.0"), dep("1.0.0", "2.0.0")]),
            repo_with(vec![dep("1.0.0", "1.0.0")]),
            repo_with(vec![]),
        ];
        let summary = FleetSummary::from_repositories(&repos);

        assert_eq!(summary.repositories, 3);
        assert_eq!(summary.dependencies, 3);
        assert_eq!(summary.repositories_with(UpdateStatus::MajorVersionUpdate), 1);
        assert_eq!(summary.repositories_with(UpdateStatus::UpToDate), 1);
        assert_eq!(summary.repositories_with(UpdateStatus::Unknown), 1);
        assert_eq!(summary.dependencies_with(UpdateStatus::UpToDate), 2);
        assert_eq!(summary.actionable_repositories(), 1);
    }

    #[test]
    fn test_serializes_status_keys() {
        let repos = vec![repo_with(vec![dep("1.0.0", "1.0.1")])];
        let json = serde_json::to_value(FleetSummary::from_repositories(&repos)).unwrap();
        assert_eq!(json["dependencies_by_status"]["PatchUpdate"], 1);
    }
}
