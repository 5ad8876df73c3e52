//! Core domain models for depboard
//!
//! This module contains the fundamental types used throughout the crate:
//! - Package manager tags for supported ecosystems
//! - Ordered update status classification
//! - Dependency and repository records with their rollups
//! - Raw inputs (manifests, security alerts, fleet snapshots)
//! - Identity and Graph SDK allow-lists

mod dependency;
pub mod libraries;
mod package_manager;
mod repository;
mod source;
mod status;
mod summary;

pub use dependency::{DeclaredDependency, Dependency};
pub use package_manager::PackageManager;
pub use repository::{Repository, Rollups};
pub use source::{
    FleetSnapshot, Manifest, ManifestEntry, ManifestSource, RepositorySnapshot, SecurityAlert,
};
pub use status::UpdateStatus;
pub use summary::FleetSummary;
