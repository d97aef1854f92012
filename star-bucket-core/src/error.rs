use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain one page of leaderboard records.
///
/// Always recoverable at the crawl level: the crawl stops and keeps what it has.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Http(String),

    #[error("Leaderboard returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode leaderboard page: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return FetchError::Decode(e.to_string());
        }
        let message = if e.is_timeout() {
            format!("Request timed out: {}", e)
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if e.is_request() {
            format!("Request error: {}", e)
        } else if let Some(status) = e.status() {
            format!("HTTP {} error: {}", status.as_u16(), e)
        } else {
            format!("HTTP error: {}", e)
        };
        FetchError::Http(message)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Data-integrity failures found while crawling. Distinct from [`FetchError`]:
/// these mean the record or the tier lookup is wrong, not the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrawlError {
    #[error("Unrecognized difficulty tier {tier} on record {record_id} (page {page})")]
    UnknownDifficulty {
        tier: u8,
        record_id: String,
        page: u32,
    },
}

/// Failure to persist one playlist document.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize playlist: {0}")]
    Serialize(#[from] serde_json::Error),
}
