#![doc = "star-bucket-core: core logic library for star-bucket."]

//! This crate contains the leaderboard crawl, the star bucketing and the playlist emission
//! used by the `star-bucket` CLI. Transport lives behind [`contract::LeaderboardSource`] so the
//! crawl can be driven by the real HTTP client or by a mock.
//!
//! # Usage
//! Build a [`config::GenerateConfig`], pick a [`contract::LeaderboardSource`]
//! (normally [`client::ScoreSaberClient`]) and call [`generate::generate_playlists`].

pub mod bucket;
pub mod client;
pub mod config;
pub mod contract;
pub mod crawl;
pub mod difficulty;
pub mod error;
pub mod generate;
pub mod playlist;
pub mod query;
