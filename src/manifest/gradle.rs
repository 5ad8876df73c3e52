//! Gradle build file parser
//!
//! Handles string notation on a configuration line:
//! `implementation 'group:artifact:version'` (Groovy or Kotlin DSL).
//! Map notation and version variables are not resolved.

use crate::domain::{ManifestEntry, PackageManager};
use crate::manifest::BuildFileParser;
use regex::Regex;
use std::sync::LazyLock;

/// Parser for build.gradle and build.gradle.kts files
pub struct GradleParser;

/// Dependency configurations whose lines declare a dependency
const CONFIGURATIONS: [&str; 16] = [
    "implementation",
    "api",
    "compile",
    "compileOnly",
    "runtimeOnly",
    "testImplementation",
    "testCompileOnly",
    "testRuntimeOnly",
    "androidTestImplementation",
    "debugImplementation",
    "releaseImplementation",
    "kapt",
    "annotationProcessor",
    "classpath",
    "testCompile",
    "runtime",
];

// First quoted group:artifact:version; the version stops at a classifier or `@type`
static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]([^'"\s:]+):([^'"\s:]+):([^'"\s:@]+)"#).unwrap()
});

/// Returns true if the trimmed line begins with a configuration keyword
///
/// The keyword must be followed by whitespace, `(` or a quote so that
/// e.g. `apiVersion = ...` is not taken for `api`.
fn starts_with_configuration(line: &str) -> bool {
    CONFIGURATIONS.iter().any(|keyword| {
        line.strip_prefix(keyword).is_some_and(|rest| {
            rest.chars()
                .next()
                .is_some_and(|c| c.is_whitespace() || c == '(' || c == '\'' || c == '"')
        })
    })
}

/// Parse Gradle dependency lines
///
/// Each match yields a Gradle entry named `group:artifact` with the
/// requirement `= version`.
pub fn parse_gradle(lines: &[&str]) -> Vec<ManifestEntry> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| starts_with_configuration(line))
        .filter_map(|line| COORDINATES.captures(line))
        .map(|caps| {
            ManifestEntry::new(
                PackageManager::Gradle,
                format!("{}:{}", &caps[1], &caps[2]),
                format!("= {}", &caps[3]),
            )
        })
        .collect()
}

impl BuildFileParser for GradleParser {
    fn parse_lines(&self, lines: &[&str]) -> Vec<ManifestEntry> {
        parse_gradle(lines)
    }

    fn package_manager(&self) -> PackageManager {
        PackageManager::Gradle
    }
}
