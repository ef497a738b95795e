//! Startup configuration resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::endpoint::PanelEndpoint;
use crate::error::{ConfigError, Result};

/// Environment variable holding the panel operator username.
pub const USERNAME_ENV: &str = "PANEL_USERNAME";

/// Environment variable holding the panel operator password.
pub const PASSWORD_ENV: &str = "PANEL_PASSWORD";

/// Environment variable holding the refresh interval in seconds.
pub const INTERVAL_ENV: &str = "UPDATE_INTERVAL";

/// Environment variable overriding the panel list file path.
pub const PANEL_LIST_ENV: &str = "PANEL_URLS_FILE";

/// Environment variable overriding the snapshot file path.
pub const SNAPSHOT_FILE_ENV: &str = "USAGEBOT_SNAPSHOT_FILE";

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "USAGEBOT_STATE_DIR";

/// Default panel list file, relative to the working directory.
const DEFAULT_PANEL_LIST: &str = "urls.json";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".vpn-usage-bot";

/// Default refresh interval when `UPDATE_INTERVAL` is unset.
const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Resolved runtime configuration, built once at process start and passed
/// explicitly to the collector and the bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Configured panels, in configuration order. Order matters: on
    /// identifier collisions across panels the last panel wins.
    pub panels: Vec<PanelEndpoint>,
    /// Operator username, shared across all panels.
    pub username: String,
    /// Operator password, shared across all panels.
    pub password: String,
    /// How often the collector refreshes the snapshot.
    pub refresh_interval: Duration,
    /// Where the consolidated snapshot is persisted.
    pub snapshot_path: PathBuf,
}

impl Config {
    /// Resolves the configuration from the environment and the panel list
    /// file.
    ///
    /// # Errors
    /// Fails on a missing credential, an unparsable interval, an unreadable
    /// or empty panel list, or any malformed panel URL.
    pub fn from_env() -> Result<Self> {
        let username = required_env(USERNAME_ENV)?;
        let password = required_env(PASSWORD_ENV)?;
        let refresh_interval = interval_from(std::env::var(INTERVAL_ENV).ok())?;

        let panel_list = std::env::var(PANEL_LIST_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PANEL_LIST));
        let panels = load_panel_list(&panel_list)?;

        let snapshot_path = std::env::var(SNAPSHOT_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| state_dir().join("clients.json"));

        Ok(Self {
            panels,
            username,
            password,
            refresh_interval,
            snapshot_path,
        })
    }
}

/// Reads a required environment variable, rejecting empty values.
fn required_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

/// Parses the refresh interval, defaulting when unset.
fn interval_from(value: Option<String>) -> Result<Duration> {
    match value {
        None => Ok(Duration::from_secs(DEFAULT_INTERVAL_SECS)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or(ConfigError::InvalidInterval(raw)),
    }
}

/// Loads and validates the panel list file: a JSON array of base URLs.
fn load_panel_list(path: &Path) -> Result<Vec<PanelEndpoint>> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PanelListRead {
        path: path.to_path_buf(),
        source,
    })?;

    let urls: Vec<String> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::PanelListParse {
            path: path.to_path_buf(),
            source,
        })?;

    if urls.is_empty() {
        return Err(ConfigError::NoPanels(path.to_path_buf()));
    }

    urls.iter().map(|url| PanelEndpoint::parse(url)).collect()
}

/// The bot's state directory.
///
/// `USAGEBOT_STATE_DIR` wins, then `~/.vpn-usage-bot`, then a relative
/// `.vpn-usage-bot` when no home directory is available.
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|home| home.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}
