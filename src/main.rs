//! depboard - Dependency freshness dashboard CLI tool
//!
//! Reads a fleet snapshot exported by the ingestion layer, resolves the
//! latest version of every dependency against its registry and prints the
//! per-repository update status.

use clap::Parser;
use depboard::cache::ResultCache;
use depboard::cli::CliArgs;
use depboard::config::Settings;
use depboard::domain::{FleetSnapshot, FleetSummary};
use depboard::output::{create_formatter, OutputConfig};
use depboard::progress::Progress;
use depboard::resolver::DependencyResolver;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    debug!("depboard v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_cli(&args)?;
    let snapshot = FleetSnapshot::load(&args.snapshot)?;
    debug!(
        "loaded {} repositories from {}",
        snapshot.repositories.len(),
        args.snapshot.display()
    );

    let cache = ResultCache::new(settings.cache_ttl());
    let resolver = DependencyResolver::new(
        settings.http_client()?,
        cache.clone(),
        &settings.resolver_config(),
    );

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling resolution");
            ctrl_c_token.cancel();
        }
    });

    let mut progress = Progress::new(args.show_progress());
    progress.start(
        snapshot.repositories.len() as u64,
        "Resolving repositories",
    );

    let result = resolver
        .resolve_fleet(snapshot.repositories, &cancel, |repository| {
            progress.set_message(&repository.full_name());
            progress.inc();
        })
        .await;
    progress.finish_and_clear();
    cache.dispose();

    let repositories = result?;
    let summary = FleetSummary::from_repositories(&repositories);

    // Create output formatter based on CLI options
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&repositories, &summary, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
