//! Package manager tags for supported ecosystems

use serde::{Deserialize, Serialize};
use std::fmt;

/// Package ecosystem a manifest entry belongs to
///
/// Source code hosts report this as a free-form tag (`NUGET`, `npm`,
/// `MAVEN`, ...). Anything unrecognized maps to [`PackageManager::Unknown`],
/// which has no registry behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageManager {
    /// .NET packages (nuget.org)
    Nuget,
    /// Node.js packages (registry.npmjs.org)
    Npm,
    /// Gradle build files, resolved against Maven repositories
    Gradle,
    /// Maven POMs
    Maven,
    /// iOS/macOS pods (cocoapods.org)
    CocoaPods,
    /// Any ecosystem without a registry adapter
    #[default]
    Unknown,
}

impl PackageManager {
    /// Parse a host-supplied tag, case-insensitively
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "nuget" => PackageManager::Nuget,
            "npm" => PackageManager::Npm,
            "gradle" => PackageManager::Gradle,
            "maven" => PackageManager::Maven,
            "cocoapods" | "pods" => PackageManager::CocoaPods,
            _ => PackageManager::Unknown,
        }
    }

    /// Returns the lowercase identifier used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Nuget => "nuget",
            PackageManager::Npm => "npm",
            PackageManager::Gradle => "gradle",
            PackageManager::Maven => "maven",
            PackageManager::CocoaPods => "cocoapods",
            PackageManager::Unknown => "unknown",
        }
    }

    /// Returns the display name for this package manager
    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Nuget => "NuGet",
            PackageManager::Npm => "npm",
            PackageManager::Gradle => "Gradle",
            PackageManager::Maven => "Maven",
            PackageManager::CocoaPods => "CocoaPods",
            PackageManager::Unknown => "Unknown",
        }
    }

    /// Returns all package managers that have a registry behind them
    pub fn resolvable() -> &'static [PackageManager] {
        &[
            PackageManager::Nuget,
            PackageManager::Npm,
            PackageManager::Gradle,
            PackageManager::Maven,
            PackageManager::CocoaPods,
        ]
    }
}

impl From<String> for PackageManager {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<PackageManager> for String {
    fn from(manager: PackageManager) -> Self {
        manager.as_str().to_string()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_case_insensitive() {
        assert_eq!(PackageManager::from_tag("NUGET"), PackageManager::Nuget);
        assert_eq!(PackageManager::from_tag("npm"), PackageManager::Npm);
        assert_eq!(PackageManager::from_tag("Gradle"), PackageManager::Gradle);
        assert_eq!(PackageManager::from_tag("MAVEN"), PackageManager::Maven);
        assert_eq!(PackageManager::from_tag("CocoaPods"), PackageManager::CocoaPods);
        assert_eq!(PackageManager::from_tag(" pods "), PackageManager::CocoaPods);
    }

    #[test]
    fn test_from_tag_unknown() {
        assert_eq!(PackageManager::from_tag("PIP"), PackageManager::Unknown);
        assert_eq!(PackageManager::from_tag(""), PackageManager::Unknown);
    }

    #[test]
    fn test_resolvable_excludes_unknown() {
        assert!(!PackageManager::resolvable().contains(&PackageManager::Unknown));
        assert_eq!(PackageManager::resolvable().len(), 5);
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&PackageManager::CocoaPods).unwrap();
        assert_eq!(json, "\"cocoapods\"");

        let parsed: PackageManager = serde_json::from_str("\"NUGET\"").unwrap();
        assert_eq!(parsed, PackageManager::Nuget);

        let parsed: PackageManager = serde_json::from_str("\"COMPOSER\"").unwrap();
        assert_eq!(parsed, PackageManager::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(PackageManager::Nuget.to_string(), "NuGet");
        assert_eq!(PackageManager::CocoaPods.to_string(), "CocoaPods");
    }
}
