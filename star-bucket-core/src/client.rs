#![doc = "HTTP implementation of the leaderboard capability."]
//
//! [`ScoreSaberClient`] wires [`LeaderboardSource`] to the public leaderboard endpoint.
//! Transport concerns (user agent, base URL, status handling, JSON decoding) stay here;
//! the crawler only sees records or a [`FetchError`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::config::{CrawlConfig, QueryFilters};
use crate::contract::{LeaderboardPage, LeaderboardRecord, LeaderboardSource, PageRequest};
use crate::error::FetchError;
use crate::query::LeaderboardQuery;

#[derive(Clone)]
pub struct ScoreSaberClient {
    client: Client,
    base_url: String,
    filters: QueryFilters,
}

impl ScoreSaberClient {
    /// The service answers 403 without a browser-like user agent, so one is always set.
    pub fn new(config: &CrawlConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        tracing::info!(base_url = %config.base_url, "Initialized leaderboard client");
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            filters: config.filters.clone(),
        })
    }
}

#[async_trait]
impl LeaderboardSource for ScoreSaberClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<LeaderboardRecord>, FetchError> {
        let query = LeaderboardQuery::for_page(request, &self.filters);
        debug!(url = %self.base_url, ?query, "Fetching leaderboard page");

        let response = self.client.get(&self.base_url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            error!(status = %status, url = %url, "Leaderboard returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let page = parse_page(&body)?;
        Ok(page.leaderboards)
    }
}

/// Decode a response body into its records.
pub fn parse_page(body: &str) -> Result<LeaderboardPage, FetchError> {
    serde_json::from_str(body).map_err(|e| {
        error!(error = ?e, "Leaderboard body is not a leaderboards page");
        FetchError::from(e)
    })
}
