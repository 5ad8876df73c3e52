//! CLI argument parsing module for depboard

use clap::Parser;
use std::path::PathBuf;

/// Dependency freshness dashboard for a fleet of repositories
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depboard",
    version,
    about = "Classify dependency update status across a fleet of repositories"
)]
pub struct CliArgs {
    /// Fleet snapshot (JSON) exported by the ingestion layer
    pub snapshot: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (debug logging, every dependency listed)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Overrides for the settings file
    /// Cache entry lifetime in seconds
    #[arg(long, value_name = "SECS")]
    pub cache_ttl: Option<u64>,

    /// Maximum concurrent registry requests
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Maximum retries for transient registry failures
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,
}

impl CliArgs {
    /// Returns true if progress bars should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default log filter directive for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
