use serde::Deserialize;
use std::env;
use std::fs;
use std::io::ErrorKind;

use crate::constants::{listing, poller};
use crate::error::ConfigError;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Clone, Debug, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            sort_by: default_sort_by(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PollerConfig {
    #[serde(default = "default_cron")]
    pub cron: String,
    /// Trades to backfill once at startup (0 disables)
    #[serde(default)]
    pub backfill: usize,
    /// Previously persisted watermark, if any
    #[serde(default)]
    pub initial_watermark: Option<u64>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            backfill: 0,
            initial_watermark: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub poller: PollerConfig,
}

fn default_base_url() -> String {
    listing::DEFAULT_TRADES_URL.to_string()
}

fn default_page_size() -> u32 {
    listing::DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    listing::DEFAULT_SORT_BY.to_string()
}

fn default_request_timeout_secs() -> u64 {
    listing::DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_cron() -> String {
    poller::DEFAULT_CRON.to_string()
}

impl AppConfig {
    /// Load from `CAPITOL_WATCH_CONFIG` (or `config.yaml`), then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            env::var("CAPITOL_WATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => Self::from_yaml(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: config_path,
                    source,
                })
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("CAPITOL_TRADES_URL") {
            self.listing.base_url = url;
        }
        if let Ok(cron) = env::var("CAPITOL_WATCH_CRON") {
            self.poller.cron = cron;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing.page_size == 0 {
            return Err(ConfigError::Invalid("listing.page_size must be positive".into()));
        }
        if self.listing.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("listing.base_url is empty".into()));
        }
        Ok(())
    }
}
