//! # contract: data shapes and the leaderboard capability
//!
//! This module defines the records the leaderboard returns, the paginated request state,
//! and the single trait ([`LeaderboardSource`]) the crawler needs from the outside world:
//! "fetch page N of records for window [lo, hi)".
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; with the `test-export-mocks` feature (on by default)
//!   `MockLeaderboardSource` is exported for integration tests and downstream crates.
//!
//! ## Implementors
//! - [`crate::client::ScoreSaberClient`] talks to the public HTTP API.
//! - Tests script pages through the mock.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::FetchError;

/// One ranked song entry as returned by the leaderboard.
///
/// Records are never mutated after decoding; the crawler only filters and tags them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRecord {
    /// Opaque leaderboard id. The service sends a number; strings are accepted too.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub song_hash: String,
    pub song_name: String,
    pub song_author_name: String,
    #[serde(default)]
    pub level_author_name: Option<String>,
    pub stars: f64,
    pub difficulty: LeaderboardDifficulty,
}

impl LeaderboardRecord {
    pub fn difficulty_tier(&self) -> u8 {
        self.difficulty.difficulty
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardDifficulty {
    /// Tier code: 1 Easy, 3 Normal, 5 Hard, 7 Expert, 9 ExpertPlus.
    pub difficulty: u8,
    #[serde(default)]
    pub game_mode: Option<String>,
    #[serde(default)]
    pub difficulty_raw: Option<String>,
}

/// Body of a leaderboard response. Metadata beyond the records is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardPage {
    pub leaderboards: Vec<LeaderboardRecord>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
    })
}

/// Paginated query state for one crawl.
///
/// The window is fixed for the lifetime of a crawl; only `page` moves, by exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub min_star: u32,
    pub max_star: u32,
    /// 1-based.
    pub page: u32,
    /// Full page size expected from the service.
    pub page_size: usize,
}

impl PageRequest {
    /// First page of the window `[star, star + 1)`.
    pub fn first(star: u32, page_size: usize) -> Self {
        Self {
            min_star: star,
            max_star: star.saturating_add(1),
            page: 1,
            page_size,
        }
    }

    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }

    /// Half-open membership test. Records on `max_star` belong to the next band.
    pub fn window_contains(&self, stars: f64) -> bool {
        stars >= f64::from(self.min_star) && stars < f64::from(self.max_star)
    }

    pub fn is_last_page(&self, records_on_page: usize) -> bool {
        records_on_page < self.page_size
    }
}

/// The leaderboard capability the crawler depends on.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    /// Fetch one page of records for the request's star window, in the order the service sorts them.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<LeaderboardRecord>, FetchError>;
}
