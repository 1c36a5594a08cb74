//! Application configuration
//!
//! Loaded from an optional `config` file plus `ORATO_*` environment
//! overrides (e.g. `ORATO_SERVER_PORT=8080`). Every field has a default so
//! the server starts with no configuration at all.

use serde::{Deserialize, Serialize};
use speech::SpeechConfig;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload/download directory settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Provider client settings
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Seconds to wait for open connections on shutdown
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

const fn default_max_body_bytes() -> usize {
    // Batch uploads carry whole audio bundles
    50 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            shutdown_timeout_secs: None,
        }
    }
}

/// Upload/download directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory staged uploads land in
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Directory produced artifacts and archives are served from
    #[serde(default = "default_download_dir")]
    pub download_dir: String,

    /// Age in seconds after which staged and produced files are swept
    #[serde(default = "default_max_file_age_secs")]
    pub max_file_age_secs: u64,

    /// Interval in seconds between sweep runs
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_download_dir() -> String {
    "downloads".to_string()
}

const fn default_max_file_age_secs() -> u64 {
    60 * 60
}

const fn default_sweep_interval_secs() -> u64 {
    10 * 60
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            download_dir: default_download_dir(),
            max_file_age_secs: default_max_file_age_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("ORATO")
                    .separator("_")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
