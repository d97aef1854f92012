use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use star_bucket::load_config::{load_config, ENV_BASE_URL, ENV_COVER_ART_DIR, ENV_OUTPUT_DIR};
use star_bucket_core::config::TitleStyle;

fn clear_env() {
    env::remove_var(ENV_BASE_URL);
    env::remove_var(ENV_OUTPUT_DIR);
    env::remove_var(ENV_COVER_ART_DIR);
}

/// A full config file overrides every section it names.
#[test]
#[serial]
fn test_load_config_success_full_file() {
    clear_env();
    let config_yaml = r#"
crawl:
  base_url: "http://localhost:8080/api/leaderboards"
  page_size: 10
  max_pages: 7
  page_delay_ms: 0
  filters:
    category: 3
    sort: 1
    qualified: false
    ranked: true
    verified: false
playlist:
  author: tester
  description: "Test playlists"
  output_dir: ./tmp/playlists
  cover_art_dir: ./tmp/coverart
  title_style: ranked
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(Some(config_file.path())).expect("Config should load");

    assert_eq!(config.crawl.base_url, "http://localhost:8080/api/leaderboards");
    assert_eq!(config.crawl.page_size, 10);
    assert_eq!(config.crawl.max_pages, 7);
    assert_eq!(config.crawl.page_delay_ms, 0);
    assert!(!config.crawl.filters.verified);
    assert_eq!(config.playlist.author, "tester");
    assert_eq!(config.playlist.description, "Test playlists");
    assert_eq!(config.playlist.output_dir, PathBuf::from("./tmp/playlists"));
    assert_eq!(config.playlist.cover_art_dir, PathBuf::from("./tmp/coverart"));
    assert_eq!(config.playlist.title_style, TitleStyle::Ranked);
}

/// Keys left out keep their defaults.
#[test]
#[serial]
fn test_load_config_partial_file_keeps_defaults() {
    clear_env();
    let config_yaml = r#"
playlist:
  author: someone
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(Some(config_file.path())).expect("Config should load");

    assert_eq!(config.playlist.author, "someone");
    assert_eq!(config.playlist.extension, "bplist");
    assert_eq!(config.crawl.page_size, 14);
    assert_eq!(config.crawl.max_pages, 100);
    assert_eq!(config.crawl.page_delay_ms, 500);
}

#[test]
#[serial]
fn test_load_config_without_file_uses_defaults() {
    clear_env();
    let config = load_config(None::<&Path>).expect("Defaults should load");
    assert_eq!(config.crawl.base_url, "https://scoresaber.com/api/leaderboards");
    assert_eq!(config.playlist.output_dir, PathBuf::from("playlists"));
    assert_eq!(config.playlist.cover_art_dir, PathBuf::from("coverart"));
}

#[test]
#[serial]
fn test_load_config_empty_file_uses_defaults() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    let config = load_config(Some(config_file.path())).expect("Empty file should load");
    assert_eq!(config.playlist.title_style, TitleStyle::Plain);
}

/// Environment variables override the file.
#[test]
#[serial]
fn test_load_config_env_overrides_file() {
    clear_env();
    let config_yaml = r#"
crawl:
  base_url: "http://from-file/api"
playlist:
  output_dir: ./from-file
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    env::set_var(ENV_BASE_URL, "http://from-env/api");
    env::set_var(ENV_OUTPUT_DIR, "./from-env");
    env::set_var(ENV_COVER_ART_DIR, "./art-from-env");

    let config = load_config(Some(config_file.path())).expect("Config should load");
    clear_env();

    assert_eq!(config.crawl.base_url, "http://from-env/api");
    assert_eq!(config.playlist.output_dir, PathBuf::from("./from-env"));
    assert_eq!(config.playlist.cover_art_dir, PathBuf::from("./art-from-env"));
}

#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    clear_env();
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let err = load_config(Some(config_file.path())).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_errors_for_missing_file() {
    clear_env();
    let err = load_config(Some(Path::new("definitely/not/here.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
