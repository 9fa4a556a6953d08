use hemp0x_types::{
    explorer_address_url, explorer_tx_url, DashError, DashResult, CONSOLE_MAX_LINES,
    DASHBOARD_POLL_INTERVAL, DASHBOARD_POLL_INTERVAL_SLOW, EXPLORER_URL,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use super::logging::LoggingConfig;
use super::types::LogLevel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub explorer_url: String,
    pub poll_interval_ms: u64,
    pub slow_poll_interval_ms: u64,
    pub console_max_lines: usize,
    pub logging: LoggingConfig,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            explorer_url: EXPLORER_URL.to_string(),
            poll_interval_ms: DASHBOARD_POLL_INTERVAL,
            slow_poll_interval_ms: DASHBOARD_POLL_INTERVAL_SLOW,
            console_max_lines: CONSOLE_MAX_LINES,
            logging: LoggingConfig::default(),
        }
    }
}

impl DashConfig {
    /// `<config dir>/hemp0x/dash.toml`, or `./dash.toml` when the platform has
    /// no config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("hemp0x").join("dash.toml"))
            .unwrap_or_else(|| PathBuf::from("dash.toml"))
    }

    pub fn load(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;

            toml::from_str(&contents)
                .map_err(|e| DashError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> DashResult<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path.as_ref(), contents)?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    pub fn to_toml(&self) -> DashResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| DashError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    pub fn explorer_tx_url(&self, txid: &str) -> String {
        explorer_tx_url(&self.explorer_url, txid)
    }

    pub fn explorer_address_url(&self, address: &str) -> String {
        explorer_address_url(&self.explorer_url, address)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(super) fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("HEMP0X_EXPLORER_URL") {
            self.explorer_url = url;
        }

        if let Some(ms) = var("HEMP0X_POLL_INTERVAL_MS") {
            match ms.parse() {
                Ok(ms) => self.poll_interval_ms = ms,
                Err(_) => warn!("Ignoring invalid HEMP0X_POLL_INTERVAL_MS: {}", ms),
            }
        }

        if let Some(lines) = var("HEMP0X_CONSOLE_MAX_LINES") {
            match lines.parse() {
                Ok(lines) => self.console_max_lines = lines,
                Err(_) => warn!("Ignoring invalid HEMP0X_CONSOLE_MAX_LINES: {}", lines),
            }
        }

        if let Some(level) = var("HEMP0X_LOG_LEVEL") {
            self.logging.level = LogLevel::parse_lossy(&level);
        }

        if var("HEMP0X_LOG_JSON").is_some() {
            self.logging.json = true;
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.poll_interval_ms == 0 || self.slow_poll_interval_ms == 0 {
            return Err(DashError::Config("Poll intervals cannot be 0".into()));
        }

        if self.poll_interval_ms > self.slow_poll_interval_ms {
            return Err(DashError::Config(format!(
                "poll_interval_ms ({}) must not exceed slow_poll_interval_ms ({})",
                self.poll_interval_ms, self.slow_poll_interval_ms
            )));
        }

        if self.console_max_lines == 0 {
            return Err(DashError::Config("console_max_lines must be at least 1".into()));
        }

        if !(self.explorer_url.starts_with("https://") || self.explorer_url.starts_with("http://")) {
            return Err(DashError::Config(format!(
                "explorer_url must be an http(s) URL: {}",
                self.explorer_url
            )));
        }

        Ok(())
    }

    /// Fast interval while the node answers, slow one while it is down.
    pub fn poll_interval(&self, node_online: bool) -> Duration {
        if node_online {
            Duration::from_millis(self.poll_interval_ms)
        } else {
            Duration::from_millis(self.slow_poll_interval_ms)
        }
    }
}
