pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::messages::MessageKey;

pub use http::ProxyFetcher;

/// I/O failure kinds the core distinguishes. Everything downstream works in
/// terms of these; the transport details stay inside the adapter.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected fetch failure: {0}")]
    Unknown(String),
}

impl FetchError {
    /// The symbolic code stored in state when this failure surfaces.
    pub fn message_key(&self) -> MessageKey {
        match self {
            FetchError::Network(_) => MessageKey::NetworkError,
            FetchError::Timeout => MessageKey::TimeoutError,
            FetchError::Unknown(_) => MessageKey::UnknownError,
        }
    }
}

/// Turns a feed URL into raw feed text, or a typed failure. Exactly one
/// outcome per call.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_map_to_codes() {
        assert_eq!(
            FetchError::Network("refused".into()).message_key(),
            MessageKey::NetworkError
        );
        assert_eq!(FetchError::Timeout.message_key(), MessageKey::TimeoutError);
        assert_eq!(
            FetchError::Unknown("odd".into()).message_key(),
            MessageKey::UnknownError
        );
    }
}
