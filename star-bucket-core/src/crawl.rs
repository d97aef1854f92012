//! Paginated leaderboard crawl for one integer star band.
//!
//! The crawler walks pages `1, 2, 3, ...` of the window `[star, star + 1)` and keeps every
//! record whose stars fall inside the window, tagged with its [`BucketKey`]. The service has no
//! total-count field, so the loop ends on the first of:
//!   - a page shorter than the configured full page size,
//!   - the page ceiling (`max_pages`),
//!   - a failed fetch (records accumulated so far are kept),
//!   - a record with an unrecognized difficulty tier (that page is dropped, earlier pages kept).
//!
//! Requests are strictly sequential. A courtesy delay separates consecutive page requests; there
//! is no delay before the first request or after the last.

use tracing::{debug, error, info, warn};

use crate::bucket::{BucketKey, Buckets};
use crate::config::CrawlConfig;
use crate::contract::{LeaderboardRecord, LeaderboardSource, PageRequest};
use crate::difficulty::{Difficulty, UnknownTier};
use crate::error::{CrawlError, FetchError};

/// A record inside the window, with its validated difficulty and bucket key.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedRecord {
    pub key: BucketKey,
    pub difficulty: Difficulty,
    pub record: LeaderboardRecord,
}

/// Why pagination ended.
#[derive(Debug)]
pub enum StopReason {
    /// The page held fewer records than a full page.
    LastPage { page: u32, records: usize },
    /// `max_pages` requests were issued and every page was full.
    PageCeiling { page: u32 },
    FetchFailed { page: u32, error: FetchError },
    InvalidRecord(CrawlError),
}

impl StopReason {
    /// Data-integrity failure, if that is what ended the crawl.
    pub fn integrity_error(&self) -> Option<&CrawlError> {
        match self {
            StopReason::InvalidRecord(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of one crawl. Always carries whatever was accepted before the loop stopped.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub star: u32,
    pub records: Vec<AcceptedRecord>,
    pub pages_requested: u32,
    /// Records returned by the service but outside the window.
    pub rejected: usize,
    pub stop: StopReason,
}

impl CrawlOutcome {
    pub fn buckets(&self) -> Buckets {
        self.records.iter().cloned().collect()
    }
}

pub struct Crawler<'a, S: LeaderboardSource + ?Sized> {
    source: &'a S,
    config: &'a CrawlConfig,
}

impl<'a, S: LeaderboardSource + ?Sized> Crawler<'a, S> {
    pub fn new(source: &'a S, config: &'a CrawlConfig) -> Self {
        Self { source, config }
    }

    pub async fn crawl(&self, star: u32) -> CrawlOutcome {
        let max_pages = self.config.max_pages.max(1);
        let delay = self.config.page_delay();
        let mut request = PageRequest::first(star, self.config.page_size);
        let mut records: Vec<AcceptedRecord> = Vec::new();
        let mut rejected = 0usize;
        let mut pages_requested = 0u32;

        info!(
            min_star = request.min_star,
            max_star = request.max_star,
            max_pages,
            "[CRAWL] Starting leaderboard crawl"
        );

        let stop = loop {
            if request.page > 1 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            pages_requested += 1;
            let page = match self.source.fetch_page(&request).await {
                Ok(page) => page,
                Err(error) => {
                    error!(page = request.page, error = %error, "[CRAWL][ERROR] Page fetch failed, ending crawl with partial results");
                    break StopReason::FetchFailed {
                        page: request.page,
                        error,
                    };
                }
            };

            let accepted = match accept_page(&request, &page) {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(error = %e, "[CRAWL][ERROR] Record with unknown difficulty tier, discarding page and ending crawl");
                    break StopReason::InvalidRecord(e);
                }
            };
            rejected += page.len() - accepted.len();
            for a in &accepted {
                info!(
                    "{}★ [{}] : {} by {}",
                    a.record.stars, a.difficulty, a.record.song_name, a.record.song_author_name
                );
            }
            records.extend(accepted);

            if request.is_last_page(page.len()) {
                info!(
                    page = request.page,
                    records = page.len(),
                    "[CRAWL] Short page, ending search"
                );
                break StopReason::LastPage {
                    page: request.page,
                    records: page.len(),
                };
            }
            if request.page >= max_pages {
                warn!(page = request.page, "[CRAWL] Page ceiling reached, ending search");
                break StopReason::PageCeiling { page: request.page };
            }

            debug!(
                page = request.page,
                records = page.len(),
                delay_ms = delay.as_millis() as u64,
                "[CRAWL] Full page, continuing to next page"
            );
            request = request.next();
        };

        info!(
            accepted = records.len(),
            rejected,
            pages_requested,
            "[CRAWL] Crawl finished"
        );

        CrawlOutcome {
            star,
            records,
            pages_requested,
            rejected,
            stop,
        }
    }
}

/// Filter one page against the request window and validate difficulty tiers.
///
/// Every out-of-window record is skipped, including exact `max_star` matches, and scanning
/// continues past it. The first in-window record with an unknown tier fails the whole page.
pub fn accept_page(
    request: &PageRequest,
    page: &[LeaderboardRecord],
) -> Result<Vec<AcceptedRecord>, CrawlError> {
    let mut accepted = Vec::with_capacity(page.len());
    for record in page {
        if !request.window_contains(record.stars) {
            debug!(
                id = %record.id,
                stars = record.stars,
                min_star = request.min_star,
                max_star = request.max_star,
                "Record outside star window, skipping"
            );
            continue;
        }
        let difficulty = Difficulty::try_from(record.difficulty_tier()).map_err(
            |UnknownTier(tier)| CrawlError::UnknownDifficulty {
                tier,
                record_id: record.id.clone(),
                page: request.page,
            },
        )?;
        accepted.push(AcceptedRecord {
            key: BucketKey::from_stars(record.stars),
            difficulty,
            record: record.clone(),
        });
    }
    Ok(accepted)
}
