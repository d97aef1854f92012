//! High-level pipeline: orchestrates crawl → bucketize → emit for one star band.
//!
//! This module provides the top-level orchestration used by the CLI and by integration tests:
//!   - Crawls the leaderboard for `[star, star + 1)` through a [`LeaderboardSource`]
//!   - Groups accepted records into tenth-of-a-star [`Buckets`]
//!   - Writes one playlist per non-empty bucket (unless `dry_run`)
//!   - Returns a [`GenerateReport`] describing what happened at each stage
//!
//! # Error Handling
//! Nothing here returns early. A failed page ends the crawl with partial data, a failed write
//! affects only its own bucket, and an unknown difficulty tier is reported through
//! [`GenerateReport::integrity_error`] after whatever was accumulated has been emitted.
//! Callers decide how loudly to surface each of these.

use tracing::{info, warn};

use crate::bucket::Buckets;
use crate::config::GenerateConfig;
use crate::contract::LeaderboardSource;
use crate::crawl::{Crawler, StopReason};
use crate::error::CrawlError;
use crate::playlist::{EmitReport, PlaylistEmitter};

#[derive(Debug)]
pub struct GenerateReport {
    pub star: u32,
    pub pages_requested: u32,
    pub accepted: usize,
    pub rejected: usize,
    pub stop: StopReason,
    pub buckets: Buckets,
    /// `None` on a dry run.
    pub emitted: Option<EmitReport>,
}

impl GenerateReport {
    pub fn integrity_error(&self) -> Option<&CrawlError> {
        self.stop.integrity_error()
    }

    pub fn failed_writes(&self) -> usize {
        self.emitted.as_ref().map_or(0, |e| e.failed.len())
    }
}

pub async fn generate_playlists<S>(
    star: u32,
    source: &S,
    config: &GenerateConfig,
    dry_run: bool,
) -> GenerateReport
where
    S: LeaderboardSource + ?Sized,
{
    info!(star, dry_run, "[GENERATE] Starting playlist generation");

    let outcome = Crawler::new(source, &config.crawl).crawl(star).await;
    let buckets = outcome.buckets();
    info!(
        buckets = buckets.len(),
        records = buckets.record_count(),
        "[GENERATE] Bucketized accepted records"
    );

    let emitted = if dry_run {
        for (key, records) in buckets.iter() {
            info!(bucket = %key, songs = records.len(), "[GENERATE] Dry run bucket");
        }
        None
    } else {
        let report = PlaylistEmitter::new(&config.playlist).emit_all(&buckets);
        if !report.failed.is_empty() {
            warn!(
                failed = report.failed.len(),
                written = report.written.len(),
                "[GENERATE] Some playlists could not be written"
            );
        }
        Some(report)
    };

    GenerateReport {
        star,
        pages_requested: outcome.pages_requested,
        accepted: outcome.records.len(),
        rejected: outcome.rejected,
        stop: outcome.stop,
        buckets,
        emitted,
    }
}
