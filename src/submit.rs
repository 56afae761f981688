//! The submission workflow: validate a candidate URL, fetch and parse it,
//! and merge the resulting feed and posts into the store.
//!
//! Per submission the states run `filling → validating → (invalid |
//! fetching) → (success | fail)`. Validation failures touch only `form`;
//! fetch/parse failures touch only `loading`.

use url::Url;

use crate::app::AppContext;
use crate::domain::{Feed, Post};
use crate::messages::MessageKey;
use crate::state::{Dispatch, FormState, LoadStatus, LoadingProcess, StateStore, StateWrite};

/// Validate a candidate URL against the feeds already known.
///
/// The duplicate check is an exact string match against stored feed URLs, so
/// it is case- and scheme-sensitive on purpose.
fn validate(candidate: &str, known_urls: &[&str]) -> Result<(), MessageKey> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(MessageKey::InvalidUrl);
    }
    let parsed = Url::parse(trimmed).map_err(|_| MessageKey::InvalidUrl)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(MessageKey::InvalidUrl);
    }
    if known_urls.contains(&trimmed) {
        return Err(MessageKey::RepeatUrl);
    }
    Ok(())
}

/// Run one submission end to end. All outcomes land in the store; callers
/// read the state afterwards if they need to report.
pub async fn submit<D: Dispatch>(ctx: &AppContext, store: &mut StateStore<D>, candidate: &str) {
    // The disabled submit affordance is the authoritative in-flight guard,
    // and it lives here rather than in the view.
    if store.state().loading.status == LoadStatus::Loading {
        tracing::debug!("submission ignored: a fetch is already in flight");
        return;
    }

    let candidate = candidate.trim().to_string();
    let verdict = {
        let known: Vec<&str> = store.state().feeds.iter().map(|f| f.url.as_str()).collect();
        validate(&candidate, &known)
    };
    if let Err(code) = verdict {
        store.write(StateWrite::Form(FormState::invalid(code)));
        return;
    }

    store.write(StateWrite::Form(FormState::filling()));
    store.write(StateWrite::Loading(LoadingProcess::loading()));

    let raw = match ctx.fetcher.fetch(&candidate).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(url = %candidate, error = %e, "submission fetch failed");
            store.write(StateWrite::Loading(LoadingProcess::fail(e.message_key())));
            return;
        }
    };

    let channel = match ctx.parser.parse(&raw) {
        Ok(channel) => channel,
        Err(e) => {
            tracing::warn!(url = %candidate, error = %e, "submission parse failed");
            store.write(StateWrite::Loading(LoadingProcess::fail(
                MessageKey::ParserError,
            )));
            return;
        }
    };

    let feed = Feed {
        id: ctx.ids.next_feed_id(),
        url: candidate,
        title: channel.feed.title,
        description: channel.feed.description,
    };
    let posts: Vec<Post> = channel
        .posts
        .into_iter()
        .map(|parsed| Post::from_parsed(ctx.ids.next_post_id(), feed.id, parsed))
        .collect();

    tracing::info!(url = %feed.url, posts = posts.len(), "feed added");

    store.write(StateWrite::PrependFeed(feed));
    store.write(StateWrite::PrependPosts(posts));
    store.write(StateWrite::Loading(LoadingProcess::success()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetcher::{FetchError, Fetcher};
    use crate::state::store::Silent;
    use crate::state::FormStatus;
    use async_trait::async_trait;
    use std::sync::Arc;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example</title>
    <description>Example feed</description>
    <item>
      <title>First</title>
      <link>https://example.com/1</link>
      <description>one</description>
    </item>
    <item>
      <title>Second</title>
      <link>https://example.com/2</link>
      <description>two</description>
    </item>
  </channel>
</rss>"#;

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingFetcher(fn() -> FetchError);

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Err((self.0)())
        }
    }

    fn ctx(fetcher: impl Fetcher + Send + Sync + 'static) -> AppContext {
        AppContext::with_fetcher(Config::default(), Arc::new(fetcher))
    }

    #[test]
    fn test_validate_rejects_garbage_and_duplicates() {
        assert_eq!(validate("", &[]), Err(MessageKey::InvalidUrl));
        assert_eq!(validate("not-a-url", &[]), Err(MessageKey::InvalidUrl));
        assert_eq!(validate("ftp://example.com", &[]), Err(MessageKey::InvalidUrl));
        assert_eq!(
            validate("https://a.example/feed", &["https://a.example/feed"]),
            Err(MessageKey::RepeatUrl)
        );
        assert_eq!(validate("https://a.example/feed", &[]), Ok(()));
    }

    #[tokio::test]
    async fn test_happy_path() {
        let ctx = ctx(StaticFetcher(RSS_SAMPLE));
        let mut store = StateStore::new(Silent);

        submit(&ctx, &mut store, "https://example.com/feed.xml").await;

        let state = store.state();
        assert_eq!(state.feeds.len(), 1);
        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.loading.status, LoadStatus::Success);
        assert_eq!(state.feeds[0].title, "Example");
        assert_eq!(state.posts[0].feed_id, state.feeds[0].id);
        assert_eq!(state.posts[0].title, "First");
    }

    #[tokio::test]
    async fn test_invalid_url_skips_fetch() {
        let ctx = ctx(FailingFetcher(|| {
            panic!("fetch must not run for an invalid URL")
        }));
        let mut store = StateStore::new(Silent);

        submit(&ctx, &mut store, "not-a-url").await;

        let state = store.state();
        assert_eq!(state.form.status, FormStatus::Invalid);
        assert_eq!(state.form.error, Some(MessageKey::InvalidUrl));
        assert_eq!(state.loading.status, LoadStatus::Idle);
        assert!(state.feeds.is_empty());
        assert!(state.posts.is_empty());
    }

    #[tokio::test]
    async fn test_resubmitting_the_same_url_is_rejected() {
        let ctx = ctx(StaticFetcher(RSS_SAMPLE));
        let mut store = StateStore::new(Silent);

        submit(&ctx, &mut store, "https://example.com/feed.xml").await;
        submit(&ctx, &mut store, "https://example.com/feed.xml").await;

        let state = store.state();
        assert_eq!(state.form.status, FormStatus::Invalid);
        assert_eq!(state.form.error, Some(MessageKey::RepeatUrl));
        assert_eq!(state.feeds.len(), 1);
        assert_eq!(state.posts.len(), 2);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let ctx = ctx(FailingFetcher(|| FetchError::Timeout));
        let mut store = StateStore::new(Silent);

        submit(&ctx, &mut store, "https://example.com/feed.xml").await;

        let state = store.state();
        assert_eq!(state.loading.status, LoadStatus::Fail);
        assert_eq!(state.loading.error, Some(MessageKey::TimeoutError));
        assert!(state.feeds.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_maps_to_parser_error() {
        let ctx = ctx(StaticFetcher("<html>not rss</html>"));
        let mut store = StateStore::new(Silent);

        submit(&ctx, &mut store, "https://example.com/feed.xml").await;

        let state = store.state();
        assert_eq!(state.loading.status, LoadStatus::Fail);
        assert_eq!(state.loading.error, Some(MessageKey::ParserError));
    }

    #[test]
    fn test_in_flight_guard_ignores_reentry() {
        tokio_test::block_on(async {
            let ctx = ctx(StaticFetcher(RSS_SAMPLE));
            let mut store = StateStore::new(Silent);
            store.write(StateWrite::Loading(LoadingProcess::loading()));

            submit(&ctx, &mut store, "https://example.com/feed.xml").await;

            assert!(store.state().feeds.is_empty());
            assert_eq!(store.state().loading.status, LoadStatus::Loading);
        });
    }
}
