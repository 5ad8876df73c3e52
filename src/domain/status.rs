//! Update status classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far behind a dependency (or a repository) is
///
/// Variants are declared from lowest to highest severity; the derived `Ord`
/// is what rollups and display sorting rely on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum UpdateStatus {
    /// Latest version could not be determined
    #[default]
    Unknown,
    /// Current version is the latest
    UpToDate,
    /// Same major and minor, newer patch or prerelease
    PatchUpdate,
    /// Same major, newer minor
    MinorVersionUpdate,
    /// Newer major version
    MajorVersionUpdate,
    /// Package has an open security alert
    UrgentUpdate,
}

impl UpdateStatus {
    /// Returns the display name for this status
    pub fn display_name(&self) -> &'static str {
        match self {
            UpdateStatus::Unknown => "Unknown",
            UpdateStatus::UpToDate => "Up to date",
            UpdateStatus::PatchUpdate => "Patch update",
            UpdateStatus::MinorVersionUpdate => "Minor update",
            UpdateStatus::MajorVersionUpdate => "Major update",
            UpdateStatus::UrgentUpdate => "Urgent update",
        }
    }

    /// Returns true if this status asks for some update
    pub fn is_actionable(&self) -> bool {
        *self > UpdateStatus::UpToDate
    }

    /// Raise this status to `other` if `other` is more severe
    pub fn raise(&mut self, other: UpdateStatus) {
        if other > *self {
            *self = other;
        }
    }

    /// Maximum of a set of statuses, `Unknown` for an empty set
    pub fn rollup<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = UpdateStatus>,
    {
        statuses
            .into_iter()
            .fold(UpdateStatus::Unknown, |acc, s| acc.max(s))
    }

    /// Returns all statuses from lowest to highest severity
    pub fn all() -> &'static [UpdateStatus] {
        &[
            UpdateStatus::Unknown,
            UpdateStatus::UpToDate,
            UpdateStatus::PatchUpdate,
            UpdateStatus::MinorVersionUpdate,
            UpdateStatus::MajorVersionUpdate,
            UpdateStatus::UrgentUpdate,
        ]
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(UpdateStatus::Unknown < UpdateStatus::UpToDate);
        assert!(UpdateStatus::UpToDate < UpdateStatus::PatchUpdate);
        assert!(UpdateStatus::PatchUpdate < UpdateStatus::MinorVersionUpdate);
        assert!(UpdateStatus::MinorVersionUpdate < UpdateStatus::MajorVersionUpdate);
        assert!(UpdateStatus::MajorVersionUpdate < UpdateStatus::UrgentUpdate);
    }

    #[test]
    fn test_all_is_sorted() {
        let all = UpdateStatus::all();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rollup_picks_most_severe() {
        let status = UpdateStatus::rollup([
            UpdateStatus::UpToDate,
            UpdateStatus::UrgentUpdate,
            UpdateStatus::UpToDate,
        ]);
        assert_eq!(status, UpdateStatus::UrgentUpdate);
    }

    #[test]
    fn test_rollup_empty_is_unknown() {
        assert_eq!(UpdateStatus::rollup([]), UpdateStatus::Unknown);
    }

    #[test]
    fn test_raise_is_monotonic() {
        let mut status = UpdateStatus::MinorVersionUpdate;
        status.raise(UpdateStatus::PatchUpdate);
        assert_eq!(status, UpdateStatus::MinorVersionUpdate);
        status.raise(UpdateStatus::MajorVersionUpdate);
        assert_eq!(status, UpdateStatus::MajorVersionUpdate);
    }

    #[test]
    fn test_is_actionable() {
        assert!(!UpdateStatus::Unknown.is_actionable());
        assert!(!UpdateStatus::UpToDate.is_actionable());
        assert!(UpdateStatus::PatchUpdate.is_actionable());
        assert!(UpdateStatus::UrgentUpdate.is_actionable());
    }

    #[test]
    fn test_serde_variant_names() {
        let json = serde_json::to_string(&UpdateStatus::MinorVersionUpdate).unwrap();
        assert_eq!(json, "\"MinorVersionUpdate\"");
    }
}
