use std::sync::Arc;
use std::time::Duration;

use crate::app::Result;
use crate::config::Config;
use crate::domain::IdGenerator;
use crate::fetcher::{Fetcher, ProxyFetcher};
use crate::messages::{EnglishMessages, MessageLookup};
use crate::parser::FeedParser;

/// Wires together the collaborators every flow needs: the fetch adapter, the
/// parser, the id source and the message catalog.
pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub parser: FeedParser,
    pub ids: IdGenerator,
    pub messages: Arc<dyn MessageLookup + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(ProxyFetcher::new(
            &config.proxy_base,
            Duration::from_millis(config.fetch_timeout_ms),
        )?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Build a context around an arbitrary fetcher. Tests use this to
    /// substitute scripted responses for real I/O.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            config,
            fetcher,
            parser: FeedParser::new(),
            ids: IdGenerator::new(),
            messages: Arc::new(EnglishMessages),
        }
    }
}
