// SPDX-License-Identifier: GPL-3.0-or-later
mod cli;
mod progress;
mod prompt;
mod report;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use discographer_application::{
    export_tracks, search_tracks, ArtistSelector, DiscographyService, FirstCandidate, RetryPolicy,
};
use discographer_catalog::SpotifyClient;
use discographer_config::{load as load_config, AppConfig, TelemetryConfig};
use tracing::{error, info};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::cli::Cli;
use crate::progress::FetchProgress;
use crate::prompt::DialoguerSelector;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let log_filter = init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: failed to load configuration: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = log_filter.reload(env_filter(&config.telemetry.log_level, cli.verbose)) {
        eprintln!("Error: failed to apply log level: {err}");
    }

    match run(&cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "cli", "run failed: {err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Starts logging before configuration is read; the returned handle swaps in
/// the configured level once it is known.
fn init_tracing(verbose: u8) -> reload::Handle<EnvFilter, Registry> {
    let defaults = TelemetryConfig::default();
    let (filter, handle) = reload::Layer::new(env_filter(&defaults.log_level, verbose));
    // stdout carries the report
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
    handle
}

fn env_filter(configured: &str, verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(configured, verbose)))
}

/// `-v` flags override the configured level.
fn log_level(configured: &str, verbose: u8) -> &str {
    match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_client(config: &AppConfig) -> Result<SpotifyClient> {
    let (client_id, client_secret) = config.catalog.credentials()?;

    SpotifyClient::builder(client_id, client_secret)
        .base_url(config.catalog.api_base_url.as_str())
        .accounts_base_url(config.catalog.accounts_base_url.as_str())
        .timeout(Duration::from_secs(config.catalog.timeout_secs))
        .rate_limit_interval(Duration::from_millis(config.catalog.min_request_interval_ms))
        .market(config.catalog.market.clone())
        .build()
        .context("failed to initialize Spotify client")
}

async fn run(cli: &Cli, config: AppConfig) -> Result<()> {
    let client = build_client(&config)?;
    let service = DiscographyService::new(
        client,
        RetryPolicy::from_config(&config.retry),
        &config.fetch,
    );

    let input = match &cli.artist {
        Some(artist) => artist.clone(),
        None if cli.no_prompt => bail!("no artist given; pass an artist name or Spotify URL"),
        None => prompt::ask_artist()?,
    };

    let mut selector: Box<dyn ArtistSelector> = if cli.no_prompt {
        Box::new(FirstCandidate)
    } else {
        Box::new(DialoguerSelector)
    };
    let artist = service
        .resolve_artist(&input, selector.as_mut())
        .await
        .context("could not resolve artist")?;
    info!(target: "cli", artist_id = %artist.id, artist = %artist.name, "artist resolved");

    let mut out = io::stdout();
    report::write_artist_header(&mut out, &artist)?;
    writeln!(out, "\nFetching artist's discography...")?;
    out.flush()?;

    let progress = FetchProgress::new();

    let discography = service
        .fetch_discography(artist, |done, total| progress.update(done, total))
        .await
        .context("failed to fetch discography")?;
    progress.finish();

    writeln!(
        out,
        "Retrieved {} releases and {} tracks.",
        discography.releases.len(),
        discography.tracks.len()
    )?;
    report::write_stats(&mut out, &discography.stats())?;
    report::write_track_table(&mut out, &discography.tracks)?;
    out.flush()?;

    let export = cli
        .export_decision()
        .unwrap_or_else(|| prompt::confirm("Export data to CSV?"));
    if export {
        let directory = cli
            .export_dir
            .clone()
            .unwrap_or_else(|| config.export.directory.clone());
        match export_tracks(&directory, &discography.artist.name, &discography.tracks) {
            Ok(path) => {
                writeln!(out, "\nData saved successfully!")?;
                writeln!(out, "File location: {}", path.display())?;
            }
            // the report is already out; a failed export does not fail the run
            Err(err) => {
                error!(target: "cli", "export failed: {err}");
                eprintln!("Error saving file: {err}");
            }
        }
    }

    let keyword = match &cli.search {
        Some(keyword) => Some(keyword.clone()),
        None if cli.no_prompt => None,
        None => prompt::ask_keyword(),
    };
    if let Some(keyword) = keyword {
        let found = search_tracks(&discography.tracks, &keyword);
        report::write_search_results(&mut out, &keyword, &found)?;
    }

    writeln!(out, "\nDone!")?;
    Ok(())
}
