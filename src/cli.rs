///
/// This module implements the CLI interface for star-bucket: command parsing, config assembly
/// and the async entrypoint shared by `main` and the integration tests.
///
/// All crawl, bucketing and playlist logic lives in [`star_bucket_core`]. This module is strictly
/// CLI glue: it builds a [`GenerateConfig`], constructs the HTTP client and decides the exit
/// status from the [`GenerateReport`].
///
/// ## Exit status
/// - A failed page fetch or a failed playlist write is logged and the run still succeeds.
/// - An unrecognized difficulty tier is a data-integrity failure: playlists for everything
///   accumulated before it are written, then `run` returns an error.
use crate::load_config::load_config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use star_bucket_core::client::ScoreSaberClient;
use star_bucket_core::config::GenerateConfig;
use star_bucket_core::crawl::StopReason;
use star_bucket_core::generate::{generate_playlists, GenerateReport};
use std::path::PathBuf;

/// CLI for star-bucket: one playlist per tenth of a star.
#[derive(Parser)]
#[clap(
    name = "star-bucket",
    version,
    about = "Crawl ranked leaderboard songs for a star level and write one playlist per 0.1★ band"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl all ranked songs in [STAR, STAR+1) and write one playlist per 0.1★ bucket
    Generate {
        /// Integer star level, e.g. 7 for every song from 7.0★ up to (not including) 8.0★
        star: u32,
        /// Path to an optional YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Directory the playlist files are written to
        #[clap(long)]
        output_dir: Option<PathBuf>,
        /// Directory probed for `<title>.jpg` cover art
        #[clap(long)]
        cover_art_dir: Option<PathBuf>,
        /// Crawl and bucketize, but write nothing
        #[clap(long)]
        dry_run: bool,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate {
            star,
            config,
            output_dir,
            cover_art_dir,
            dry_run,
        } => {
            let mut config = load_config(config.as_deref())?;
            apply_flag_overrides(&mut config, output_dir, cover_art_dir);
            tracing::info!(command = "generate", star, "Starting playlist generation");

            let client = ScoreSaberClient::new(&config.crawl)
                .map_err(|e| anyhow::anyhow!("Failed to construct leaderboard client: {e}"))?;
            let report = generate_playlists(star, &client, &config, dry_run).await;
            summarize(&report)
        }
    }
}

fn apply_flag_overrides(
    config: &mut GenerateConfig,
    output_dir: Option<PathBuf>,
    cover_art_dir: Option<PathBuf>,
) {
    if let Some(dir) = output_dir {
        config.playlist.output_dir = dir;
    }
    if let Some(dir) = cover_art_dir {
        config.playlist.cover_art_dir = dir;
    }
}

fn summarize(report: &GenerateReport) -> Result<()> {
    let written = report.emitted.as_ref().map_or(0, |e| e.written.len());
    tracing::info!(
        command = "generate",
        star = report.star,
        pages = report.pages_requested,
        accepted = report.accepted,
        rejected = report.rejected,
        buckets = report.buckets.len(),
        written,
        failed = report.failed_writes(),
        "Playlist generation complete"
    );

    if let StopReason::FetchFailed { page, error } = &report.stop {
        tracing::warn!(page, error = %error, "Results are partial: a page fetch failed");
    }
    if let Some(emitted) = &report.emitted {
        for failed in &emitted.failed {
            tracing::error!(title = %failed.title, error = %failed.error, "Playlist was not written");
        }
    }

    match report.integrity_error() {
        Some(e) => {
            tracing::error!(command = "generate", error = %e, "Leaderboard data failed validation");
            Err(anyhow::anyhow!("Leaderboard data failed validation: {e}"))
        }
        None => Ok(()),
    }
}
