//! The polling loop that keeps `posts` current without user action.
//!
//! Each cycle snapshots the known feeds, fetches them concurrently,
//! deduplicates what came back against everything already stored, and merges
//! the survivors with a single prepend write. The owner of the loop schedules
//! the next cycle a fixed interval after the previous one has settled, so the
//! loop never terminates on error and never overlaps itself.

use futures::future::join_all;

use crate::app::AppContext;
use crate::domain::{DedupKey, FeedId, Post};
use crate::parser::{ParseError, ParsedChannel};
use crate::state::{Dispatch, StateStore, StateWrite};

/// Outcome of one polling cycle, for logging and headless reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    pub feeds_polled: usize,
    pub feeds_failed: usize,
    pub new_posts: usize,
}

#[derive(Debug, thiserror::Error)]
enum RefreshError {
    #[error("fetch: {0}")]
    Fetch(#[from] crate::fetcher::FetchError),
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
}

async fn refresh_feed(ctx: &AppContext, url: &str) -> Result<ParsedChannel, RefreshError> {
    let raw = ctx.fetcher.fetch(url).await?;
    Ok(ctx.parser.parse(&raw)?)
}

pub struct Poller {
    dedup: DedupKey,
}

impl Poller {
    pub fn new(dedup: DedupKey) -> Self {
        Self { dedup }
    }

    /// Run exactly one cycle against the store. Deterministic for tests; the
    /// production loops wrap this with their own scheduling.
    pub async fn run_cycle<D: Dispatch>(
        &self,
        ctx: &AppContext,
        store: &mut StateStore<D>,
    ) -> CycleOutcome {
        // Snapshot at cycle start. Feeds added mid-cycle are picked up on
        // the next one.
        let targets: Vec<(FeedId, String)> = store
            .state()
            .feeds
            .iter()
            .map(|feed| (feed.id, feed.url.clone()))
            .collect();

        let mut outcome = CycleOutcome {
            feeds_polled: targets.len(),
            ..CycleOutcome::default()
        };
        if targets.is_empty() {
            return outcome;
        }

        // Fetches are concurrently in flight; completions are joined back in
        // snapshot order, which fixes the relative order of new posts.
        let results = join_all(
            targets
                .iter()
                .map(|(feed_id, url)| async move { (*feed_id, url, refresh_feed(ctx, url).await) }),
        )
        .await;

        let mut fresh: Vec<Post> = Vec::new();
        for (feed_id, url, result) in results {
            let channel = match result {
                Ok(channel) => channel,
                Err(e) => {
                    // One broken feed never aborts the cycle for the others,
                    // and nothing is surfaced to the user.
                    outcome.feeds_failed += 1;
                    tracing::warn!(%url, error = %e, "poll skipped feed");
                    continue;
                }
            };

            for parsed in channel.posts {
                let seen = store
                    .state()
                    .posts
                    .iter()
                    .chain(fresh.iter())
                    .any(|post| post.matches(&parsed, self.dedup));
                if !seen {
                    fresh.push(Post::from_parsed(ctx.ids.next_post_id(), feed_id, parsed));
                }
            }
        }

        outcome.new_posts = fresh.len();
        if !fresh.is_empty() {
            store.write(StateWrite::PrependPosts(fresh));
        }

        tracing::debug!(
            polled = outcome.feeds_polled,
            failed = outcome.feeds_failed,
            new = outcome.new_posts,
            "poll cycle settled"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetcher::{FetchError, Fetcher};
    use crate::state::store::Silent;
    use crate::submit;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Scripted fetcher: per-URL responses, swappable between cycles.
    #[derive(Default)]
    struct ScriptedFetcher {
        responses: Mutex<HashMap<String, Result<String, &'static str>>>,
    }

    impl ScriptedFetcher {
        fn set(&self, url: &str, body: &str) {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), Ok(body.to_string()));
        }

        fn fail(&self, url: &str) {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), Err("scripted failure"));
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            match self.responses.lock().unwrap().get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(msg)) => Err(FetchError::Network((*msg).to_string())),
                None => Err(FetchError::Unknown(format!("no script for {url}"))),
            }
        }
    }

    fn rss(feed_title: &str, items: &[(&str, &str)]) -> String {
        let mut body = format!(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel>\
             <title>{feed_title}</title><description>{feed_title} desc</description>"
        );
        for (title, link) in items {
            body.push_str(&format!(
                "<item><title>{title}</title><link>{link}</link>\
                 <description>{title} body</description></item>"
            ));
        }
        body.push_str("</channel></rss>");
        body
    }

    fn ctx_with(fetcher: Arc<ScriptedFetcher>) -> AppContext {
        AppContext::with_fetcher(Config::default(), fetcher)
    }

    async fn subscribe(ctx: &AppContext, store: &mut StateStore<Silent>, url: &str) {
        submit::submit(ctx, store, url).await;
        assert_eq!(
            store.state().loading.status,
            crate::state::LoadStatus::Success,
            "test subscription to {url} failed"
        );
    }

    #[tokio::test]
    async fn test_unchanged_feed_yields_nothing_twice() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.set(
            "https://a.example/feed",
            &rss("A", &[("a1", "https://a.example/1")]),
        );
        let ctx = ctx_with(fetcher);
        let mut store = StateStore::new(Silent);
        subscribe(&ctx, &mut store, "https://a.example/feed").await;

        let poller = Poller::new(DedupKey::TitleLink);
        let first = poller.run_cycle(&ctx, &mut store).await;
        let second = poller.run_cycle(&ctx, &mut store).await;

        assert_eq!(first.new_posts, 0);
        assert_eq!(second.new_posts, 0);
        assert_eq!(store.state().posts.len(), 1);
    }

    #[tokio::test]
    async fn test_new_posts_are_prepended_in_snapshot_order() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.set(
            "https://a.example/feed",
            &rss("A", &[("p2", "https://a.example/2"), ("p1", "https://a.example/1")]),
        );
        let ctx = ctx_with(fetcher.clone());
        let mut store = StateStore::new(Silent);
        subscribe(&ctx, &mut store, "https://a.example/feed").await;

        fetcher.set(
            "https://a.example/feed",
            &rss(
                "A",
                &[
                    ("n1", "https://a.example/4"),
                    ("n2", "https://a.example/3"),
                    ("p2", "https://a.example/2"),
                    ("p1", "https://a.example/1"),
                ],
            ),
        );

        let poller = Poller::new(DedupKey::TitleLink);
        let outcome = poller.run_cycle(&ctx, &mut store).await;

        assert_eq!(outcome.new_posts, 2);
        let titles: Vec<_> = store.state().posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["n1", "n2", "p2", "p1"]);
    }

    #[tokio::test]
    async fn test_partial_failure_is_isolated() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.set("https://a.example/feed", &rss("A", &[]));
        fetcher.set(
            "https://b.example/feed",
            &rss("B", &[("b1", "https://b.example/1")]),
        );
        let ctx = ctx_with(fetcher.clone());
        let mut store = StateStore::new(Silent);
        subscribe(&ctx, &mut store, "https://a.example/feed").await;
        subscribe(&ctx, &mut store, "https://b.example/feed").await;

        fetcher.fail("https://a.example/feed");
        fetcher.set(
            "https://b.example/feed",
            &rss(
                "B",
                &[("n", "https://b.example/2"), ("b1", "https://b.example/1")],
            ),
        );

        let poller = Poller::new(DedupKey::TitleLink);
        let outcome = poller.run_cycle(&ctx, &mut store).await;

        assert_eq!(outcome.feeds_polled, 2);
        assert_eq!(outcome.feeds_failed, 1);
        assert_eq!(outcome.new_posts, 1);
        assert_eq!(store.state().posts[0].title, "n");
    }

    #[tokio::test]
    async fn test_shared_post_across_feeds_is_stored_once() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.set("https://a.example/feed", &rss("A", &[]));
        fetcher.set("https://b.example/feed", &rss("B", &[]));
        let ctx = ctx_with(fetcher.clone());
        let mut store = StateStore::new(Silent);
        subscribe(&ctx, &mut store, "https://a.example/feed").await;
        subscribe(&ctx, &mut store, "https://b.example/feed").await;

        let shared = ("shared", "https://cdn.example/story");
        fetcher.set("https://a.example/feed", &rss("A", &[shared]));
        fetcher.set("https://b.example/feed", &rss("B", &[shared]));

        let poller = Poller::new(DedupKey::TitleLink);
        let outcome = poller.run_cycle(&ctx, &mut store).await;

        assert_eq!(outcome.new_posts, 1);
        assert_eq!(store.state().posts.len(), 1);
    }

    #[tokio::test]
    async fn test_title_only_key_collapses_reposts() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.set(
            "https://a.example/feed",
            &rss("A", &[("story", "https://a.example/old")]),
        );
        let ctx = ctx_with(fetcher.clone());
        let mut store = StateStore::new(Silent);
        subscribe(&ctx, &mut store, "https://a.example/feed").await;

        // Same title under a new link: new post under title-link, not under
        // title-only.
        fetcher.set(
            "https://a.example/feed",
            &rss("A", &[("story", "https://a.example/new")]),
        );

        let outcome = Poller::new(DedupKey::Title)
            .run_cycle(&ctx, &mut store)
            .await;
        assert_eq!(outcome.new_posts, 0);

        let outcome = Poller::new(DedupKey::TitleLink)
            .run_cycle(&ctx, &mut store)
            .await;
        assert_eq!(outcome.new_posts, 1);
    }

    #[tokio::test]
    async fn test_empty_feed_list_is_a_noop() {
        let ctx = ctx_with(Arc::new(ScriptedFetcher::default()));
        let mut store = StateStore::new(Silent);
        let outcome = Poller::new(DedupKey::TitleLink)
            .run_cycle(&ctx, &mut store)
            .await;
        assert_eq!(outcome, CycleOutcome::default());
    }
}
