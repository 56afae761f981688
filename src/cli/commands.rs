//! Headless front ends: one-shot fetch and the watch loop. Both drive the
//! same store/renderer pipeline as the TUI, with a console view sink.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::app::{AppContext, Result};
use crate::domain::{Post, PostId};
use crate::messages::MessageLookup;
use crate::poller::Poller;
use crate::render::{Feedback, Renderer, Tone, ViewSink};
use crate::state::{AppState, StateStore};
use crate::submit;

/// Prints state changes as they are dispatched. Affordance and viewed-mark
/// updates have no console equivalent and are dropped.
struct ConsoleView {
    messages: Arc<dyn MessageLookup + Send + Sync>,
    feeds_seen: usize,
    posts_seen: usize,
}

impl ConsoleView {
    fn new(messages: Arc<dyn MessageLookup + Send + Sync>) -> Self {
        Self {
            messages,
            feeds_seen: 0,
            posts_seen: 0,
        }
    }
}

impl ViewSink for ConsoleView {
    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn reset_input(&mut self) {}

    fn show_feedback(&mut self, feedback: Feedback) {
        let text = self.messages.message(feedback.key);
        match feedback.tone {
            Tone::Success => println!("{text}"),
            Tone::Failure => eprintln!("error: {text}"),
        }
    }

    fn render_feeds(&mut self, state: &AppState) {
        // Feeds are prepended, so everything before the watermark is new.
        let new = state.feeds.len().saturating_sub(self.feeds_seen);
        for feed in state.feeds.iter().take(new).rev() {
            println!("Added feed: {} ({})", feed.display_title(), feed.url);
        }
        self.feeds_seen = state.feeds.len();
    }

    fn render_posts(&mut self, posts: &[Post], _viewed: &BTreeSet<PostId>) {
        let new = posts.len().saturating_sub(self.posts_seen);
        for post in posts.iter().take(new).rev() {
            println!("  + {} {}", post.display_title(), post.link);
        }
        self.posts_seen = posts.len();
    }

    fn refresh_viewed(&mut self, _viewed: &BTreeSet<PostId>) {}

    fn show_modal(&mut self, _post: &Post) {}
}

/// `freshet fetch <url>`: submit once, print the feed and its posts.
pub async fn fetch_feed(ctx: &AppContext, url: &str) -> Result<()> {
    let mut store = StateStore::new(Renderer::new(ConsoleView::new(ctx.messages.clone())));
    submit::submit(ctx, &mut store, url).await;
    println!("{} posts", store.state().posts.len());
    Ok(())
}

/// `freshet watch <urls...>`: subscribe, then poll until Ctrl-C (or for a
/// fixed number of cycles).
pub async fn watch_feeds(ctx: &AppContext, urls: &[String], cycles: Option<u64>) -> Result<()> {
    let mut store = StateStore::new(Renderer::new(ConsoleView::new(ctx.messages.clone())));

    for url in urls {
        submit::submit(ctx, &mut store, url).await;
    }

    if store.state().feeds.is_empty() {
        println!("No feeds to watch");
        return Ok(());
    }

    let poller = Poller::new(ctx.config.dedup);
    let interval = Duration::from_millis(ctx.config.poll_interval_ms);
    let mut remaining = cycles;

    loop {
        if remaining == Some(0) {
            break;
        }
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping");
                break;
            }
            _ = tokio::time::sleep(interval) => {
                let outcome = poller.run_cycle(ctx, &mut store).await;
                if outcome.new_posts > 0 {
                    println!(
                        "{} new posts ({} feeds polled, {} failed)",
                        outcome.new_posts, outcome.feeds_polled, outcome.feeds_failed
                    );
                }
                remaining = remaining.map(|n| n.saturating_sub(1));
            }
        }
    }

    Ok(())
}
