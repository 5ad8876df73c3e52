//! Dependency information structures

use super::{libraries, PackageManager, UpdateStatus};
use crate::update::{classify, normalize_requirement};
use serde::Serialize;
use std::fmt;

/// A dependency as declared in a manifest, before its latest version is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    /// Package identifier (Maven uses `group:artifact`)
    pub package_name: String,
    /// Manifest file the dependency was declared in
    pub manifest_file: String,
    /// Ecosystem the package belongs to
    pub package_manager: PackageManager,
    /// Normalized version requirement
    pub current_version: String,
}

impl DeclaredDependency {
    /// Records the resolved latest version and computes the status
    ///
    /// Consumes the declaration, so each dependency is classified once.
    pub fn classify(self, latest_version: impl Into<String>, has_security_alert: bool) -> Dependency {
        let latest_version = latest_version.into();
        let status = classify(&self.current_version, &latest_version, has_security_alert);
        Dependency {
            package_name: self.package_name,
            manifest_file: self.manifest_file,
            package_manager: self.package_manager,
            current_version: self.current_version,
            latest_version,
            status,
        }
    }
}

/// One declared package use in one manifest file of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Package identifier (Maven uses `group:artifact`)
    pub package_name: String,
    /// Manifest file the dependency was declared in
    pub manifest_file: String,
    /// Ecosystem the package belongs to
    pub package_manager: PackageManager,
    /// Normalized version requirement
    pub current_version: String,
    /// Latest version reported by the registry, empty when unresolved
    pub latest_version: String,
    /// Computed once by [`DeclaredDependency::classify`]
    status: UpdateStatus,
}

impl Dependency {
    /// Declares an unclassified dependency
    ///
    /// The requirement is normalized here and nowhere else.
    pub fn declare(
        package_name: impl Into<String>,
        manifest_file: impl Into<String>,
        package_manager: PackageManager,
        requirement: &str,
    ) -> DeclaredDependency {
        DeclaredDependency {
            package_name: package_name.into(),
            manifest_file: manifest_file.into(),
            package_manager,
            current_version: normalize_requirement(requirement),
        }
    }

    /// Returns the computed update status
    pub fn status(&self) -> UpdateStatus {
        self.status
    }

    /// Returns true if the latest version is known
    pub fn is_resolved(&self) -> bool {
        !self.latest_version.is_empty()
    }

    /// Returns true if this package counts toward the identity rollup
    pub fn is_identity_library(&self) -> bool {
        libraries::is_identity_library(&self.package_name)
    }

    /// Returns true if this package counts toward the Graph SDK rollup
    pub fn is_graph_library(&self) -> bool {
        libraries::is_graph_library(&self.package_name)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let latest = if self.latest_version.is_empty() {
            "?"
        } else {
            &self.latest_version
        };
        write!(
            f,
            "{}@{} -> {} [{}]",
            self.package_name, self.current_version, latest, self.package_manager
        )
    }
}
