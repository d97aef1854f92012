/// `load_config` module: loads the optional YAML config and layers environment overrides on top.
///
/// This is the only place where user-supplied YAML is parsed. Every key is optional; anything
/// missing keeps the defaults documented on [`star_bucket_core::config`].
///
/// # Precedence (lowest to highest)
/// 1. Built-in defaults
/// 2. YAML file (`--config`)
/// 3. Environment: `STAR_BUCKET_BASE_URL`, `STAR_BUCKET_OUTPUT_DIR`, `STAR_BUCKET_COVER_ART_DIR`
/// 4. CLI flags (applied by [`crate::cli`])
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use star_bucket_core::config::GenerateConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const ENV_BASE_URL: &str = "STAR_BUCKET_BASE_URL";
pub const ENV_OUTPUT_DIR: &str = "STAR_BUCKET_OUTPUT_DIR";
pub const ENV_COVER_ART_DIR: &str = "STAR_BUCKET_COVER_ART_DIR";

/// Loads `path` if given, otherwise starts from defaults, then applies environment overrides.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<GenerateConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path.as_ref())?,
        None => {
            info!("No config file given, using defaults");
            GenerateConfig::default()
        }
    };

    apply_env_overrides(&mut config);
    config.trace_loaded();
    Ok(config)
}

fn read_config_file(path_ref: &Path) -> Result<GenerateConfig> {
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is valid and means "all defaults".
    if config_content.trim().is_empty() {
        return Ok(GenerateConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

fn apply_env_overrides(config: &mut GenerateConfig) {
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        info!(base_url = %base_url, "Base URL overridden from environment");
        config.crawl.base_url = base_url;
    }
    if let Ok(dir) = std::env::var(ENV_OUTPUT_DIR) {
        info!(output_dir = %dir, "Output directory overridden from environment");
        config.playlist.output_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var(ENV_COVER_ART_DIR) {
        info!(cover_art_dir = %dir, "Cover art directory overridden from environment");
        config.playlist.cover_art_dir = PathBuf::from(dir);
    }
}
