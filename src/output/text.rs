//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One line per repository with its three rollups, colored by severity
//! - Per-dependency listing in verbose mode
//! - Summary with a per-status breakdown

use crate::domain::{Dependency, FleetSummary, Repository, UpdateStatus};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Get the status label with color
fn colored_status(status: UpdateStatus) -> String {
    let label = status.display_name();
    match status {
        UpdateStatus::UrgentUpdate => label.red().bold().to_string(),
        UpdateStatus::MajorVersionUpdate => label.red().to_string(),
        UpdateStatus::MinorVersionUpdate => label.yellow().to_string(),
        UpdateStatus::PatchUpdate => label.green().to_string(),
        UpdateStatus::UpToDate => label.bright_white().to_string(),
        UpdateStatus::Unknown => label.dimmed().to_string(),
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn status_label(&self, status: UpdateStatus) -> String {
        if self.color {
            colored_status(status)
        } else {
            status.display_name().to_string()
        }
    }

    /// Calculate the maximum package name length for alignment
    fn max_name_length(dependencies: &[Dependency]) -> usize {
        dependencies
            .iter()
            .map(|d| d.package_name.len())
            .max()
            .unwrap_or(0)
    }

    /// Format a single dependency line
    fn format_dependency_line(
        &self,
        dependency: &Dependency,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let latest = if dependency.is_resolved() {
            dependency.latest_version.as_str()
        } else {
            "?"
        };

        if self.color {
            let name_display = format!("{:width$}", dependency.package_name, width = max_name_len);
            writeln!(
                writer,
                "    {} {} {} {} [{}] {}",
                name_display,
                dependency.current_version.dimmed(),
                "->".dimmed(),
                latest.bright_white().bold(),
                colored_status(dependency.status()),
                format!("({}, {})", dependency.package_manager, dependency.manifest_file).dimmed()
            )
        } else {
            writeln!(
                writer,
                "    {:width$} {} -> {} [{}] ({}, {})",
                dependency.package_name,
                dependency.current_version,
                latest,
                dependency.status().display_name(),
                dependency.package_manager,
                dependency.manifest_file,
                width = max_name_len
            )
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(
        &self,
        repositories: &[Repository],
        summary: &FleetSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            for repository in repositories {
                self.format_repository(repository, writer)?;
            }
            if !repositories.is_empty() {
                writeln!(writer)?;
            }
        }

        self.format_summary(summary, writer)
    }

    fn format_summary(
        &self,
        summary: &FleetSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if summary.repositories == 0 {
            return writeln!(writer, "No repositories in snapshot.");
        }

        let actionable = summary.actionable_repositories();
        if self.color {
            writeln!(
                writer,
                "{} {} repositories, {} dependencies, {} need updates",
                "Summary:".bold(),
                summary.repositories,
                summary.dependencies,
                actionable.to_string().yellow()
            )?;
        } else {
            writeln!(
                writer,
                "Summary: {} repositories, {} dependencies, {} need updates",
                summary.repositories, summary.dependencies, actionable
            )?;
        }

        for status in UpdateStatus::all().iter().rev() {
            let repos = summary.repositories_with(*status);
            let deps = summary.dependencies_with(*status);
            if repos == 0 && deps == 0 {
                continue;
            }
            writeln!(
                writer,
                "  {}: {} repositories, {} dependencies",
                self.status_label(*status),
                repos,
                deps
            )?;
        }

        Ok(())
    }

    fn format_repository(
        &self,
        repository: &Repository,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = repository.full_name();
        let counts = if repository.no_dependencies {
            "no dependencies tracked".to_string()
        } else {
            format!(
                "{} dependencies, {} need updates",
                repository.dependencies.len(),
                repository.actionable_count()
            )
        };

        if self.color {
            writeln!(
                writer,
                "{} {} {} {} {}",
                name.bold(),
                colored_status(repository.repository_status),
                format!("identity: {}", repository.identity_status.display_name()).dimmed(),
                format!("graph: {}", repository.graph_status.display_name()).dimmed(),
                format!("({})", counts).dimmed()
            )?;
        } else {
            writeln!(
                writer,
                "{} {} identity: {} graph: {} ({})",
                name,
                repository.repository_status.display_name(),
                repository.identity_status.display_name(),
                repository.graph_status.display_name(),
                counts
            )?;
        }

        if self.verbosity == Verbosity::Verbose {
            let max_name_len = Self::max_name_length(&repository.dependencies).max(20);
            for dependency in &repository.dependencies {
                self.format_dependency_line(dependency, max_name_len, writer)?;
            }
        }

        Ok(())
    }
}
