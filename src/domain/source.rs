//! Raw inputs supplied by the ingestion layer

use super::{PackageManager, Repository};
use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One dependency line as reported by the host's dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Package manager tag
    pub package_manager: PackageManager,
    /// Package identifier
    pub package_name: String,
    /// Declared requirement, not yet normalized
    #[serde(default)]
    pub requirement: String,
    /// Release tag embedded in the host's data, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_tag: Option<String>,
}

impl ManifestEntry {
    /// Creates a new entry without a release tag
    pub fn new(
        package_manager: PackageManager,
        package_name: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        Self {
            package_manager,
            package_name: package_name.into(),
            requirement: requirement.into(),
            release_tag: None,
        }
    }

    /// Sets the embedded release tag (builder pattern)
    pub fn with_release_tag(mut self, tag: impl Into<String>) -> Self {
        self.release_tag = Some(tag.into());
        self
    }
}

/// Dependencies declared by one file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// File path inside the repository
    pub filename: String,
    /// Declared dependencies
    #[serde(default)]
    pub dependencies: Vec<ManifestEntry>,
}

impl Manifest {
    /// Creates a manifest for the given file
    pub fn new(filename: impl Into<String>, dependencies: Vec<ManifestEntry>) -> Self {
        Self {
            filename: filename.into(),
            dependencies,
        }
    }
}

/// Structured dependency data for one repository
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManifestSource {
    #[serde(default)]
    pub manifests: Vec<Manifest>,
}

impl ManifestSource {
    /// Wraps a list of manifests
    pub fn new(manifests: Vec<Manifest>) -> Self {
        Self { manifests }
    }

    /// Total number of entries across all manifests
    pub fn entry_count(&self) -> usize {
        self.manifests.iter().map(|m| m.dependencies.len()).sum()
    }
}

/// A package flagged by the host's vulnerability scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityAlert {
    /// Affected package
    pub package_name: String,
    /// Advisory identifier (GHSA/CVE), informational
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl SecurityAlert {
    /// Creates an alert for a package
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            advisory: None,
        }
    }
}

/// Everything needed to resolve one repository
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub repository: Repository,
    #[serde(default)]
    pub manifests: ManifestSource,
    #[serde(default)]
    pub alerts: Vec<SecurityAlert>,
}

/// A fleet of repositories as exported by the ingestion layer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default)]
    pub repositories: Vec<RepositorySnapshot>,
}

impl FleetSnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json(path: &Path, content: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(content).map_err(|e| SnapshotError::json_parse_error(path, e.to_string()))
    }

    /// Read and parse a snapshot file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        if !path.exists() {
            return Err(SnapshotError::not_found(path));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| SnapshotError::read_error(path, e))?;
        Self::from_json(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_entry_builder() {
        let entry = ManifestEntry::new(PackageManager::Maven, "com.google.guava:guava", "31.0")
            .with_release_tag("v33.0.0");
        assert_eq!(entry.release_tag.as_deref(), Some("v33.0.0"));
    }

    #[test]
    fn test_entry_count() {
        let source = ManifestSource::new(vec![
            Manifest::new(
                "package.json",
                vec![
                    ManifestEntry::new(PackageManager::Npm, "react", "^18.0.0"),
                    ManifestEntry::new(PackageManager::Npm, "lodash", "^4.17.0"),
                ],
            ),
            Manifest::new("Podfile", vec![]),
        ]);
        assert_eq!(source.entry_count(), 2);
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "repositories": [
                {
                    "repository": {"owner": "contoso", "name": "web"},
                    "manifests": {"manifests": [
                        {"filename": "package.json", "dependencies": [
                            {"package_manager": "NPM", "package_name": "react", "requirement": "^18.0.0"}
                        ]}
                    ]},
                    "alerts": [{"package_name": "react"}]
                },
                {"repository": {"name": "docs", "no_dependencies": true}}
            ]
        }"#;
        let snapshot = FleetSnapshot::from_json(Path::new("fleet.json"), json).unwrap();
        assert_eq!(snapshot.repositories.len(), 2);
        let first = &snapshot.repositories[0];
        assert_eq!(first.manifests.entry_count(), 1);
        assert_eq!(
            first.manifests.manifests[0].dependencies[0].package_manager,
            PackageManager::Npm
        );
        assert_eq!(first.alerts[0].package_name, "react");
        assert!(snapshot.repositories[1].repository.no_dependencies);
    }

    #[test]
    fn test_snapshot_invalid_json() {
        let err = FleetSnapshot::from_json(Path::new("fleet.json"), "{not json").unwrap_err();
        assert!(err.to_string().contains("fleet.json"));
    }

    #[test]
    fn test_snapshot_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FleetSnapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_snapshot_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fleet.json");
        fs::write(&path, r#"{"repositories": []}"#).unwrap();
        let snapshot = FleetSnapshot::load(&path).unwrap();
        assert!(snapshot.repositories.is_empty());
    }
}
