use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::HttpOptions;

/// Upper bound on identifiers per URL-resolution request.
pub const URL_BATCH_SIZE: usize = 200;
/// Concurrent content downloads per batch.
pub const FILE_BATCH_SIZE: usize = 10;

pub const DEFAULT_API_BASE_URL: &str = "https://api.figma.com/v1";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// One named icon collection: a root node whose subtree holds the icons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Collection name; also the artifact file stem and registry prefix.
    pub name: String,
    /// Root node id, in API form (`2403:4364`) or URL form (`2403-4364`).
    pub node_id: String,
}

/// Configuration loaded from `iconsync.toml` or `~/.config/iconsync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconsyncConfig {
    /// Base URL of the design API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Key of the design document holding the icons.
    #[serde(default)]
    pub file_key: String,
    /// Directory the generated modules are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Identifiers per URL-resolution request.
    #[serde(default = "default_url_batch_size")]
    pub url_batch_size: usize,
    /// Concurrent downloads per content batch.
    #[serde(default = "default_file_batch_size")]
    pub file_batch_size: usize,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Overall limit per request, including the body.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Collections, processed in this order.
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/assets/icons")
}

fn default_url_batch_size() -> usize {
    URL_BATCH_SIZE
}

fn default_file_batch_size() -> usize {
    FILE_BATCH_SIZE
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for IconsyncConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            file_key: String::new(),
            output_dir: default_output_dir(),
            url_batch_size: URL_BATCH_SIZE,
            file_batch_size: FILE_BATCH_SIZE,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            retry: None,
            collections: Vec::new(),
        }
    }
}

impl IconsyncConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.url_batch_size == 0 {
            anyhow::bail!("url_batch_size must be at least 1");
        }
        if self.file_batch_size == 0 {
            anyhow::bail!("file_batch_size must be at least 1");
        }
        if self.file_key.trim().is_empty() {
            anyhow::bail!("file_key is not set");
        }
        let mut seen = std::collections::HashSet::new();
        for c in &self.collections {
            if c.name.trim().is_empty() {
                anyhow::bail!("collection with node {} has an empty name", c.node_id);
            }
            if !is_valid_collection_name(&c.name) {
                anyhow::bail!(
                    "collection name {:?} must start with a letter and contain only letters, digits, '-' or '_'",
                    c.name
                );
            }
            if !seen.insert(c.name.as_str()) {
                anyhow::bail!("collection {} is declared twice", c.name);
            }
        }
        Ok(())
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }
}

/// Collection names become file stems and registry identifiers, so they stay
/// inside the output directory and start with a letter.
fn is_valid_collection_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("iconsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<IconsyncConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: IconsyncConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<IconsyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = IconsyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}
