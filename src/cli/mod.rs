pub mod commands;

use clap::{Parser, Subcommand};

use crate::app::{FreshetError, Result};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "freshet")]
#[command(about = "A terminal RSS aggregator", long_about = None)]
pub struct Cli {
    /// Base URL of the CORS proxy
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Poll interval, e.g. "5s", "2m" (default from config)
    #[arg(long, global = true)]
    pub interval: Option<String>,

    /// Fetch timeout, e.g. "10s"
    #[arg(long, global = true)]
    pub timeout: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (the default)
    Tui {
        /// Feed URLs to subscribe at startup
        urls: Vec<String>,
    },
    /// Headless aggregator: subscribe, poll, and print new posts
    Watch {
        /// Feed URLs to subscribe
        urls: Vec<String>,

        /// Stop after this many polling cycles (default: run until Ctrl-C)
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Fetch one feed and print its posts
    Fetch {
        /// URL of the feed
        url: String,
    },
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(proxy) = &self.proxy {
            config.proxy_base = proxy.clone();
        }
        if let Some(interval) = &self.interval {
            config.poll_interval_ms =
                Config::parse_interval_ms(interval).map_err(FreshetError::Config)?;
        }
        if let Some(timeout) = &self.timeout {
            config.fetch_timeout_ms =
                Config::parse_interval_ms(timeout).map_err(FreshetError::Config)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "freshet",
            "--proxy",
            "https://proxy.example",
            "--interval",
            "30s",
            "tui",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.proxy_base, "https://proxy.example");
        assert_eq!(config.poll_interval_ms, 30_000);
        assert_eq!(config.fetch_timeout_ms, 10_000);
    }

    #[test]
    fn test_bad_interval_is_a_config_error() {
        let cli = Cli::parse_from(["freshet", "--interval", "soon", "tui"]);
        let mut config = Config::default();
        assert!(cli.apply_overrides(&mut config).is_err());
    }
}
