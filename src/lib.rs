//! depboard - Dependency freshness dashboard library
//!
//! This library provides the core functionality for classifying how far
//! behind the dependencies of a fleet of repositories are:
//! - Version comparison and update status classification
//! - Registry clients (NuGet, npm, Maven/Google Android, CocoaPods)
//! - Gradle and Podfile build file parsing
//! - Per-repository resolution with identity and Graph SDK rollups
//! - A shared expiring result cache

pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolver;
pub mod update;
