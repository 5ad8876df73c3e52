//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of resolved repositories and their rollups
//! - Fleet summary with per-status counts

use crate::domain::{Dependency, FleetSummary, Repository, UpdateStatus};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Summary statistics
    summary: &'a FleetSummary,
    /// Per-repository results (omitted in quiet mode)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    repositories: Vec<JsonRepository<'a>>,
}

/// JSON representation of a repository result
#[derive(Serialize)]
struct JsonRepository<'a> {
    /// `owner/name`
    name: String,
    url: &'a str,
    no_dependencies: bool,
    repository_status: &'a UpdateStatus,
    identity_status: &'a UpdateStatus,
    graph_status: &'a UpdateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    refreshed_at: Option<String>,
    /// Dependencies (every one in verbose mode, actionable ones otherwise)
    dependencies: Vec<&'a Dependency>,
}

impl JsonFormatter {
    /// Convert a repository to its JSON representation
    fn repository_to_json<'a>(&self, repository: &'a Repository) -> JsonRepository<'a> {
        let dependencies = repository
            .dependencies
            .iter()
            .filter(|d| self.verbosity == Verbosity::Verbose || d.status().is_actionable())
            .collect();

        JsonRepository {
            name: repository.full_name(),
            url: &repository.url,
            no_dependencies: repository.no_dependencies,
            repository_status: &repository.repository_status,
            identity_status: &repository.identity_status,
            graph_status: &repository.graph_status,
            refreshed_at: repository.refreshed_at.map(|t| t.to_rfc3339()),
            dependencies,
        }
    }

    fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writeln!(writer, "{}", json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(
        &self,
        repositories: &[Repository],
        summary: &FleetSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let repositories = if self.verbosity == Verbosity::Quiet {
            Vec::new()
        } else {
            repositories
                .iter()
                .map(|r| self.repository_to_json(r))
                .collect()
        };

        Self::write_json(
            &JsonOutput {
                summary,
                repositories,
            },
            writer,
        )
    }

    fn format_summary(
        &self,
        summary: &FleetSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write_json(summary, writer)
    }

    fn format_repository(
        &self,
        repository: &Repository,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write_json(&self.repository_to_json(repository), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageManager, Rollups};

    fn resolved_repo() -> Repository {
        let mut repo = Repository::new("contoso", "web");
        repo.url = "https://github.com/contoso/web".to_string();
        let deps = vec![
            Dependency::declare("react", "package.json", PackageManager::Npm, "^17.0.2")
                .classify("18.2.0", false),
            Dependency::declare("lodash", "package.json", PackageManager::Npm, "4.17.21")
                .classify("4.17.21", false),
        ];
        let rollups = Rollups::from_dependencies(&deps);
        repo.replace_dependencies(deps, rollups);
        repo
    }

    fn render(verbosity: Verbosity, repos: &[Repository]) -> serde_json::Value {
        let summary = FleetSummary::from_repositories(repos);
        let mut buffer = Vec::new();
        JsonFormatter::new(verbosity)
            .format(repos, &summary, &mut buffer)
            .unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn test_json_structure() {
        let json = render(Verbosity::Normal, &[resolved_repo()]);

        assert_eq!(json["summary"]["repositories"], 1);
        assert_eq!(json["summary"]["dependencies"], 2);
        assert_eq!(json["summary"]["dependencies_by_status"]["MajorVersionUpdate"], 1);

        let repo = &json["repositories"][0];
        assert_eq!(repo["name"], "contoso/web");
        assert_eq!(repo["url"], "https://github.com/contoso/web");
        assert_eq!(repo["repository_status"], "MajorVersionUpdate");
        assert_eq!(repo["identity_status"], "Unknown");
        assert!(repo["refreshed_at"].is_string());
    }

    #[test]
    fn test_normal_lists_only_actionable_dependencies() {
        let json = render(Verbosity::Normal, &[resolved_repo()]);
        let deps = json["repositories"][0]["dependencies"].as_array().unwrap();

        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0]["package_name"], "react");
        assert_eq!(deps[0]["current_version"], "17.0.2");
        assert_eq!(deps[0]["latest_version"], "18.2.0");
        assert_eq!(deps[0]["package_manager"], "npm");
        assert_eq!(deps[0]["status"], "MajorVersionUpdate");
    }

    #[test]
    fn test_verbose_lists_every_dependency() {
        let json = render(Verbosity::Verbose, &[resolved_repo()]);
        let deps = json["repositories"][0]["dependencies"].as_array().unwrap();
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_quiet_omits_repositories() {
        let json = render(Verbosity::Quiet, &[resolved_repo()]);
        assert!(json.get("repositories").is_none());
        assert_eq!(json["summary"]["repositories"], 1);
    }

    #[test]
    fn test_format_repository_alone() {
        let mut buffer = Vec::new();
        JsonFormatter::new(Verbosity::Verbose)
            .format_repository(&resolved_repo(), &mut buffer)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(json["name"], "contoso/web");
    }
}
