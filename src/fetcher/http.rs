use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{FreshetError, Result};
use crate::fetcher::{FetchError, Fetcher};

/// Fetches feeds through an allorigins-style JSON proxy, which sidesteps the
/// cross-origin restrictions the feed hosts would otherwise impose.
pub struct ProxyFetcher {
    client: Client,
    proxy_base: Url,
}

/// Shape of the proxy response; `contents` holds the raw feed text.
#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    contents: String,
}

impl ProxyFetcher {
    pub fn new(proxy_base: &str, timeout: Duration) -> Result<Self> {
        let proxy_base = Url::parse(proxy_base)?;
        if proxy_base.cannot_be_a_base() {
            return Err(FreshetError::Config(format!(
                "proxy base is not a usable base URL: {proxy_base}"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent("freshet/0.1.0")
            .build()
            .map_err(|e| FreshetError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, proxy_base })
    }

    /// `{proxy_base}/get?disableCache=true&url={encoded feed URL}`
    fn proxy_url(&self, feed_url: &str) -> Url {
        let mut url = self.proxy_base.clone();
        // Url::join would drop a non-slash-terminated base path.
        url.path_segments_mut()
            .expect("proxy base is validated as a base URL at construction")
            .pop_if_empty()
            .push("get");
        url.query_pairs_mut()
            .append_pair("disableCache", "true")
            .append_pair("url", feed_url);
        url
    }
}

fn classify(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() || error.is_request() || error.is_status() {
        FetchError::Network(error.to_string())
    } else {
        FetchError::Unknown(error.to_string())
    }
}

#[async_trait]
impl Fetcher for ProxyFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let request_url = self.proxy_url(url);
        tracing::debug!(%request_url, "fetching feed through proxy");

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(classify)?;

        let response = response.error_for_status().map_err(classify)?;

        let body = response.text().await.map_err(classify)?;
        let envelope: ProxyEnvelope = serde_json::from_str(&body)
            .map_err(|e| FetchError::Unknown(format!("malformed proxy envelope: {e}")))?;

        Ok(envelope.contents)
    }
}
