//! Version parsing and registry version selection
//!
//! Registries publish versions that are not always strict SemVer (`2.5`,
//! `1.0.0-Preview.1`, `31.1-jre`), so parsing here is lenient about missing
//! minor/patch parts and strict about everything else.

use regex::Regex;
use semver::{Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;

// Prerelease markers that registries use without a `-` separator (e.g. `2.0.0.RC1`)
static PRERELEASE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[.\d](alpha|beta|preview|rc|snapshot|milestone|m)\.?\d*$").unwrap()
});

/// Parse `major[.minor[.patch]][-prerelease][+build]`
///
/// Missing minor/patch parts default to zero and build metadata is dropped.
/// Returns `None` for anything else, including four-part versions.
pub fn parse_version(input: &str) -> Option<Version> {
    let s = input.trim();
    let s = s.split_once('+').map_or(s, |(core, _)| core);
    let (core, pre) = match s.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (s, None),
    };

    let mut parts = core.split('.');
    let major = parse_numeric(parts.next()?)?;
    let minor = parts.next().map_or(Some(0), parse_numeric)?;
    let patch = parts.next().map_or(Some(0), parse_numeric)?;
    if parts.next().is_some() {
        return None;
    }

    let mut version = Version::new(major, minor, patch);
    if let Some(pre) = pre {
        if pre.is_empty() {
            return None;
        }
        version.pre = Prerelease::new(pre).ok()?;
    }
    Some(version)
}

fn parse_numeric(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Returns true if the version looks like a prerelease
pub fn is_prerelease_version(version: &str) -> bool {
    let version = version.trim();
    if let Some(parsed) = parse_version(version) {
        return !parsed.pre.is_empty();
    }
    version.contains('-') || PRERELEASE_MARKER_RE.is_match(version)
}

/// Compare two version strings
///
/// Unparseable versions sort before parseable ones and compare to each
/// other lexically.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Pick the first acceptable version from a registry list
///
/// When the current version is a prerelease, prerelease candidates are
/// acceptable; otherwise only stable ones are. The list is scanned in the
/// order given, so callers pass it newest first. Returns an empty string
/// when nothing is acceptable.
pub fn select_version<S: AsRef<str>>(versions: &[S], current: Option<&str>) -> String {
    let allow_prerelease = current.is_some_and(is_prerelease_version);
    versions
        .iter()
        .map(AsRef::as_ref)
        .find(|v| allow_prerelease || !is_prerelease_version(v))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Latest stable and latest prerelease version of one package
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionTracks {
    /// Last published non-prerelease, empty if none
    pub stable: String,
    /// Last published prerelease, empty if none
    pub preview: String,
}

impl VersionTracks {
    /// Build tracks from a list ordered oldest to newest
    pub fn from_versions<S: AsRef<str>>(versions: &[S]) -> Self {
        let mut tracks = VersionTracks::default();
        for version in versions.iter().map(AsRef::as_ref) {
            if is_prerelease_version(version) {
                tracks.preview = version.to_string();
            } else {
                tracks.stable = version.to_string();
            }
        }
        tracks
    }

    /// Choose the track matching the current version
    ///
    /// A prerelease that is behind the latest stable stays on the preview
    /// track. Otherwise the stable version wins, falling back to the
    /// preview when nothing stable was published.
    pub fn pick(&self, current: Option<&str>) -> String {
        if let Some(current) = current.filter(|c| is_prerelease_version(c)) {
            let behind_stable = !self.stable.is_empty()
                && compare_versions(current, &self.stable) == Ordering::Less;
            if behind_stable && !self.preview.is_empty() {
                return self.preview.clone();
            }
        }

        if self.stable.is_empty() {
            self.preview.clone()
        } else {
            self.stable.clone()
        }
    }
}
