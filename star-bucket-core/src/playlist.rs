//! Playlist documents: one per non-empty bucket, written after the crawl has finished.
//!
//! Emission is per-bucket independent. A bucket that fails to serialize or write is recorded
//! in the [`EmitReport`] and the remaining buckets are still written. Files are overwritten
//! wholesale, so identical input (records and cover art) yields identical files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::bucket::{BucketKey, Buckets};
use crate::config::{PlaylistConfig, TitleStyle};
use crate::crawl::AcceptedRecord;
use crate::difficulty::characteristic_from_game_mode;
use crate::error::EmitError;

/// The persisted, client-importable playlist. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    #[serde(rename = "playlistTitle")]
    pub title: String,
    #[serde(rename = "playlistAuthor")]
    pub author: String,
    #[serde(rename = "playlistDescription")]
    pub description: String,
    pub songs: Vec<PlaylistSong>,
    /// Prefixed base64 cover art, or empty.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSong {
    pub key: String,
    pub hash: String,
    pub name: String,
    pub uploader: String,
    pub difficulties: Vec<PlaylistDifficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDifficulty {
    pub characteristic: String,
    pub name: String,
}

impl From<&AcceptedRecord> for PlaylistSong {
    fn from(accepted: &AcceptedRecord) -> Self {
        let record = &accepted.record;
        PlaylistSong {
            key: record.id.clone(),
            hash: record.song_hash.clone(),
            name: record.song_name.clone(),
            uploader: record.song_author_name.clone(),
            difficulties: vec![PlaylistDifficulty {
                characteristic: characteristic_from_game_mode(record.difficulty.game_mode.as_deref()),
                name: accepted.difficulty.name().to_string(),
            }],
        }
    }
}

/// Bucket title for a key: `7.3` or `Ranked 7.3★`.
pub fn bucket_title(style: TitleStyle, key: BucketKey) -> String {
    match style {
        TitleStyle::Plain => key.to_string(),
        TitleStyle::Ranked => format!("Ranked {key}★"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPlaylist {
    pub title: String,
    pub path: PathBuf,
    pub songs: usize,
    pub has_cover: bool,
}

#[derive(Debug)]
pub struct FailedPlaylist {
    pub title: String,
    pub error: EmitError,
}

#[derive(Debug, Default)]
pub struct EmitReport {
    pub written: Vec<WrittenPlaylist>,
    pub failed: Vec<FailedPlaylist>,
}

pub struct PlaylistEmitter<'a> {
    config: &'a PlaylistConfig,
}

impl<'a> PlaylistEmitter<'a> {
    pub fn new(config: &'a PlaylistConfig) -> Self {
        Self { config }
    }

    pub fn title(&self, key: BucketKey) -> String {
        bucket_title(self.config.title_style, key)
    }

    /// Where the playlist titled `title` is written.
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.{}", title, self.config.extension))
    }

    /// Cover art for `title`, read from `<cover_art_dir>/<title>.jpg`. Empty when absent.
    pub fn cover_art(&self, title: &str) -> String {
        let path = self.config.cover_art_dir.join(format!("{title}.jpg"));
        match fs::read(&path) {
            Ok(bytes) => {
                info!(path = %path.display(), bytes = bytes.len(), "Cover art was added");
                format!("{}{}", self.config.image_prefix, STANDARD.encode(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "Cover art not found, skipping");
                String::new()
            }
            Err(e) => {
                warn!(error = ?e, path = %path.display(), "Cover art unreadable, skipping");
                String::new()
            }
        }
    }

    pub fn build_document(&self, key: BucketKey, records: &[AcceptedRecord]) -> PlaylistDocument {
        let title = self.title(key);
        let image = self.cover_art(&title);
        PlaylistDocument {
            author: self.config.author.clone(),
            description: self.config.description.clone(),
            songs: records.iter().map(PlaylistSong::from).collect(),
            image,
            title,
        }
    }

    /// Serialize and write one document, replacing any previous file.
    pub fn write_document(&self, document: &PlaylistDocument) -> Result<PathBuf, EmitError> {
        let out_dir = &self.config.output_dir;
        fs::create_dir_all(out_dir).map_err(|source| io_error(out_dir, source))?;

        let path = self.path_for(&document.title);
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&path, json).map_err(|source| io_error(&path, source))?;
        debug!(path = %path.display(), songs = document.songs.len(), "Wrote playlist file");
        Ok(path)
    }

    /// Emit every non-empty bucket. Never stops early on a failed bucket.
    pub fn emit_all(&self, buckets: &Buckets) -> EmitReport {
        let mut report = EmitReport::default();
        for (key, records) in buckets.iter() {
            if records.is_empty() {
                continue;
            }
            let document = self.build_document(key, records);
            match self.write_document(&document) {
                Ok(path) => {
                    info!(
                        title = %document.title,
                        path = %path.display(),
                        songs = document.songs.len(),
                        "[EMIT] Created new playlist"
                    );
                    report.written.push(WrittenPlaylist {
                        songs: document.songs.len(),
                        has_cover: !document.image.is_empty(),
                        title: document.title,
                        path,
                    });
                }
                Err(error) => {
                    error!(title = %document.title, error = %error, "[EMIT][ERROR] Failed to create playlist");
                    report.failed.push(FailedPlaylist {
                        title: document.title,
                        error,
                    });
                }
            }
        }
        report
    }
}

fn io_error(path: &Path, source: std::io::Error) -> EmitError {
    EmitError::Io {
        path: path.to_path_buf(),
        source,
    }
}
