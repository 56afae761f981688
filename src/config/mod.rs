//! Configuration for Freshet.
//!
//! Read from `~/.config/freshet/config.toml` at startup. If the file doesn't
//! exist, a default one with comments is created. Missing fields fall back to
//! their defaults; CLI flags override whatever was loaded.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::app::{FreshetError, Result};
use crate::domain::DedupKey;

pub const DEFAULT_PROXY_BASE: &str = "https://allorigins.hexlet.app";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the CORS proxy feeds are fetched through.
    pub proxy_base: String,
    /// Per-request timeout, submission and polling alike.
    pub fetch_timeout_ms: u64,
    /// Pause between the end of one polling cycle and the start of the next.
    pub poll_interval_ms: u64,
    /// Which fields decide that a fetched post is already stored.
    pub dedup: DedupKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            dedup: DedupKey::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            FreshetError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// `~/.config/freshet/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FreshetError::Config("could not find config directory".into()))?;
        Ok(config_dir.join("freshet").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(Self::default_config_content().as_bytes())?;
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# Freshet configuration

# Base URL of the CORS proxy used to fetch feeds.
proxy_base = "https://allorigins.hexlet.app"

# Per-request timeout in milliseconds.
fetch_timeout_ms = 10000

# Pause between polling cycles in milliseconds. The next cycle is scheduled
# only after the previous one has settled.
poll_interval_ms = 5000

# Dedup key for deciding whether a fetched post is new:
# "title" or "title-link"
dedup = "title-link"
"##
    }

    /// Parse an interval string like "5s", "90s", "2m", "1h", or raw
    /// milliseconds.
    pub fn parse_interval_ms(s: &str) -> Result<u64, String> {
        let s = s.trim().to_lowercase();

        if let Some(hours) = s.strip_suffix('h') {
            hours
                .parse::<u64>()
                .map(|h| h * 3_600_000)
                .map_err(|_| format!("Invalid hours: {}", hours))
        } else if let Some(minutes) = s.strip_suffix('m') {
            minutes
                .parse::<u64>()
                .map(|m| m * 60_000)
                .map_err(|_| format!("Invalid minutes: {}", minutes))
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.parse::<u64>()
                .map(|v| v * 1_000)
                .map_err(|_| format!("Invalid seconds: {}", secs))
        } else {
            s.parse::<u64>()
                .map_err(|_| format!("Invalid interval: {}. Use format like '5s', '2m', '1h'", s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.proxy_base, DEFAULT_PROXY_BASE);
        assert_eq!(config.fetch_timeout_ms, 10_000);
        assert_eq!(config.poll_interval_ms, 5_000);
        assert_eq!(config.dedup, DedupKey::TitleLink);
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(Config::parse_interval_ms("5s").unwrap(), 5_000);
        assert_eq!(Config::parse_interval_ms("2m").unwrap(), 120_000);
        assert_eq!(Config::parse_interval_ms("1h").unwrap(), 3_600_000);
        assert_eq!(Config::parse_interval_ms("250").unwrap(), 250);
        assert!(Config::parse_interval_ms("soon").is_err());
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "poll_interval_ms = 60000\ndedup = \"title\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.poll_interval_ms, 60_000);
        assert_eq!(config.dedup, DedupKey::Title);
        assert_eq!(config.proxy_base, DEFAULT_PROXY_BASE);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "poll_interval_ms = \"soon\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
