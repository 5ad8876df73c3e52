//! Text parsing of build files
//!
//! Used when the host has no structured dependency graph for a repository
//! but the repository names a fallback build file. Parsing is line based
//! and never fails: lines that do not match are skipped.

mod gradle;
mod podfile;

pub use gradle::{parse_gradle, GradleParser};
pub use podfile::{parse_podfile, PodfileParser};

use crate::domain::{Manifest, ManifestEntry, PackageManager};
use std::path::Path;

/// Trait for line-based build file parsers
pub trait BuildFileParser {
    /// Parse dependency entries from the file's lines
    fn parse_lines(&self, lines: &[&str]) -> Vec<ManifestEntry>;

    /// Returns the package manager of the entries this parser produces
    fn package_manager(&self) -> PackageManager;
}

/// Kind of build file, detected from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildFileKind {
    /// build.gradle / build.gradle.kts
    Gradle,
    /// Podfile
    Podfile,
}

impl BuildFileKind {
    /// Detect the kind from a path inside the repository
    pub fn detect(path: &str) -> Option<Self> {
        let file_name = Path::new(path.trim())
            .file_name()
            .and_then(|n| n.to_str())?
            .to_ascii_lowercase();

        if file_name.ends_with(".gradle") || file_name.ends_with(".gradle.kts") {
            Some(BuildFileKind::Gradle)
        } else if file_name == "podfile" {
            Some(BuildFileKind::Podfile)
        } else {
            None
        }
    }

    /// Get the parser for this kind
    pub fn parser(&self) -> Box<dyn BuildFileParser> {
        match self {
            BuildFileKind::Gradle => Box::new(GradleParser),
            BuildFileKind::Podfile => Box::new(PodfileParser),
        }
    }
}

/// Parse a fetched build file into a manifest named after its path
///
/// Unrecognized file names produce a manifest without entries.
pub fn parse_dependency_file(path: &str, content: &str) -> Manifest {
    let lines: Vec<&str> = content.lines().collect();
    let dependencies = BuildFileKind::detect(path)
        .map(|kind| kind.parser().parse_lines(&lines))
        .unwrap_or_default();
    Manifest::new(path, dependencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        assert_eq!(BuildFileKind::detect("app/build.gradle"), Some(BuildFileKind::Gradle));
        assert_eq!(BuildFileKind::detect("build.gradle.kts"), Some(BuildFileKind::Gradle));
        assert_eq!(BuildFileKind::detect("ios/Podfile"), Some(BuildFileKind::Podfile));
        assert_eq!(BuildFileKind::detect("Podfile.lock"), None);
        assert_eq!(BuildFileKind::detect("package.json"), None);
        assert_eq!(BuildFileKind::detect(""), None);
    }

    #[test]
    fn test_parse_dependency_file_gradle() {
        let content = "dependencies {\n    implementation 'com.microsoft.identity.client:msal:4.9.0'\n}\n";
        let manifest = parse_dependency_file("app/build.gradle", content);

        assert_eq!(manifest.filename, "app/build.gradle");
        assert_eq!(manifest.dependencies.len(), 1);
        assert_eq!(manifest.dependencies[0].package_manager, PackageManager::Gradle);
    }

    #[test]
    fn test_parse_dependency_file_podfile() {
        let content = "target 'App' do\n  pod 'MSAL', '~> 1.2'\nend\n";
        let manifest = parse_dependency_file("Podfile", content);

        assert_eq!(manifest.dependencies.len(), 1);
        assert_eq!(manifest.dependencies[0].package_name, "msal");
    }

    #[test]
    fn test_parse_dependency_file_unknown_kind() {
        let manifest = parse_dependency_file("requirements.txt", "requests==2.31.0");
        assert_eq!(manifest.filename, "requirements.txt");
        assert!(manifest.dependencies.is_empty());
    }
}
