//! Podfile parser
//!
//! Handles `pod 'Name', '<op> version'` lines. Pods declared without a
//! version, or with only `:git`/`:path` options, are skipped.

use crate::domain::{ManifestEntry, PackageManager};
use crate::manifest::BuildFileParser;
use regex::Regex;
use std::sync::LazyLock;

/// Parser for Podfiles
pub struct PodfileParser;

// Matched against the lower-cased line
static POD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^pod\s+['"]([^'"]+)['"]\s*,\s*['"]\s*(?:[~><=!]+\s*)?([^'"\s]+)\s*['"]"#)
        .unwrap()
});

/// Parse Podfile lines
///
/// Each match yields a CocoaPods entry with the lower-cased pod name and
/// the requirement `==version`.
pub fn parse_podfile(lines: &[&str]) -> Vec<ManifestEntry> {
    lines
        .iter()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| line.starts_with("pod"))
        .filter_map(|line| {
            POD_LINE.captures(&line).map(|caps| {
                ManifestEntry::new(
                    PackageManager::CocoaPods,
                    &caps[1],
                    format!("=={}", &caps[2]),
                )
            })
        })
        .collect()
}

impl BuildFileParser for PodfileParser {
    fn parse_lines(&self, lines: &[&str]) -> Vec<ManifestEntry> {
        parse_podfile(lines)
    }

    fn package_manager(&self) -> PackageManager {
        PackageManager::CocoaPods
    }
}
