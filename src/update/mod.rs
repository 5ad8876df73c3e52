//! Update status judgment for dependencies
//!
//! This module provides:
//! - Requirement normalization for declared versions
//! - Lenient version parsing and registry version selection
//! - Classification of a (current, latest) pair into an update status

mod requirement;
mod version_info;

pub use requirement::{first_token, normalize_requirement};
pub use version_info::{
    compare_versions, is_prerelease_version, parse_version, select_version, VersionTracks,
};

use crate::domain::{SecurityAlert, UpdateStatus};

/// Classify a dependency given its normalized requirement and latest version
///
/// A security alert short-circuits everything else. Only the first
/// comma-separated token of the requirement is compared, so `2.0,< 3.0`
/// is judged as `2.0`.
pub fn classify(current: &str, latest: &str, has_security_alert: bool) -> UpdateStatus {
    if has_security_alert {
        return UpdateStatus::UrgentUpdate;
    }

    let current = current.trim();
    let latest = latest.trim();
    if current.is_empty() || latest.is_empty() {
        return UpdateStatus::Unknown;
    }

    let latest = latest.strip_prefix('v').unwrap_or(latest);
    if current.eq_ignore_ascii_case(latest) {
        return UpdateStatus::UpToDate;
    }

    let (Some(current), Some(latest)) = (parse_version(first_token(current)), parse_version(latest))
    else {
        return UpdateStatus::Unknown;
    };

    if current == latest {
        UpdateStatus::UpToDate
    } else if current.major == latest.major && current.minor == latest.minor {
        UpdateStatus::PatchUpdate
    } else if current.major == latest.major {
        UpdateStatus::MinorVersionUpdate
    } else if latest > current {
        UpdateStatus::MajorVersionUpdate
    } else {
        UpdateStatus::Unknown
    }
}

/// Returns true if any alert names the package (case-insensitive, exact)
pub fn has_security_alert(package_name: &str, alerts: &[SecurityAlert]) -> bool {
    let name = package_name.trim();
    alerts
        .iter()
        .any(|alert| alert.package_name.trim().eq_ignore_ascii_case(name))
}
