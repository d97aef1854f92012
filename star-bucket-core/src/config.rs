use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://scoresaber.com/api/leaderboards";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; star-bucket)";
/// Records per page the leaderboard returns when more results follow.
pub const DEFAULT_PAGE_SIZE: usize = 14;
pub const DEFAULT_MAX_PAGES: u32 = 100;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 500;

/// Everything one `generate` run needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub playlist: PlaylistConfig,
}

impl GenerateConfig {
    pub fn trace_loaded(&self) {
        self.crawl.trace_loaded();
        self.playlist.trace_loaded();
        debug!(?self, "Config loaded (full debug)");
    }
}

/// How the leaderboard is walked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Full page size; a shorter page is the last one.
    pub page_size: usize,
    /// Hard ceiling on page requests per crawl.
    pub max_pages: u32,
    pub page_delay_ms: u64,
    pub filters: QueryFilters,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            filters: QueryFilters::default(),
        }
    }
}

impl CrawlConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            page_size = self.page_size,
            max_pages = self.max_pages,
            page_delay_ms = self.page_delay_ms,
            "Loaded CrawlConfig"
        );
    }
}

/// Fixed query parameters sent with every page request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFilters {
    /// 3 = sort by scores.
    pub category: u8,
    /// 1 = ascending.
    pub sort: u8,
    pub qualified: bool,
    pub ranked: bool,
    pub verified: bool,
}

impl Default for QueryFilters {
    fn default() -> Self {
        Self {
            category: 3,
            sort: 1,
            qualified: false,
            ranked: true,
            verified: true,
        }
    }
}

/// How playlists are titled, decorated and written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    pub author: String,
    pub description: String,
    pub output_dir: PathBuf,
    pub cover_art_dir: PathBuf,
    /// File extension for written playlists, without the dot.
    pub extension: String,
    /// Prepended to the base64 cover art payload.
    pub image_prefix: String,
    pub title_style: TitleStyle,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            author: "star-bucket".to_string(),
            description: "Automatically generated playlist".to_string(),
            output_dir: PathBuf::from("playlists"),
            cover_art_dir: PathBuf::from("coverart"),
            extension: "bplist".to_string(),
            image_prefix: "base64,".to_string(),
            title_style: TitleStyle::Plain,
        }
    }
}

impl PlaylistConfig {
    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            cover_art_dir = %self.cover_art_dir.display(),
            author = %self.author,
            title_style = ?self.title_style,
            "Loaded PlaylistConfig"
        );
    }
}

/// Presentation of a bucket title. Both styles key the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TitleStyle {
    /// `7.3`
    Plain,
    /// `Ranked 7.3★`
    Ranked,
}

impl From<&str> for TitleStyle {
    fn from(s: &str) -> Self {
        match s {
            "plain" | "Plain" => TitleStyle::Plain,
            "ranked" | "Ranked" => TitleStyle::Ranked,
            other => {
                tracing::warn!(style = other, "Unknown title style, defaulting to plain");
                TitleStyle::Plain
            }
        }
    }
}

impl From<String> for TitleStyle {
    fn from(s: String) -> Self {
        TitleStyle::from(s.as_str())
    }
}

impl From<TitleStyle> for String {
    fn from(style: TitleStyle) -> Self {
        match style {
            TitleStyle::Plain => "plain".to_string(),
            TitleStyle::Ranked => "ranked".to_string(),
        }
    }
}
