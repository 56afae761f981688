//! # Freshet
//!
//! A terminal RSS aggregator built around an observable state store.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Parser → Submission / Poller → StateStore → Renderer → View
//! ```
//!
//! Every mutation of the state tree goes through [`state::StateStore::write`],
//! which applies the write and notifies the render router with the written
//! path. The router ([`render::Renderer`]) maps each path to a fixed handler
//! list that updates the view through the [`render::ViewSink`] seam. Nothing
//! touches the view layer except through this notification path.
//!
//! ## Quick start
//!
//! ```bash
//! # Interactive TUI, subscribing a feed at startup
//! freshet tui https://blog.rust-lang.org/feed.xml
//!
//! # Headless: poll and print new posts until Ctrl-C
//! freshet watch https://blog.rust-lang.org/feed.xml
//!
//! # One-shot fetch
//! freshet fetch https://blog.rust-lang.org/feed.xml
//! ```

/// Application context and error handling.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration, read from `~/.config/freshet/config.toml`.
pub mod config;

/// Core domain models: [`Feed`](domain::Feed), [`Post`](domain::Post) and
/// the injected [`IdGenerator`](domain::IdGenerator).
pub mod domain;

/// Feed fetching through the CORS proxy.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait the core consumes
/// - [`ProxyFetcher`](fetcher::ProxyFetcher): reqwest-based implementation
pub mod fetcher;

/// Symbolic message codes and the i18n lookup collaborator.
pub mod messages;

/// Feed parsing (RSS/Atom via feed-rs) into the channel shape the core
/// consumes.
pub mod parser;

/// The polling loop: concurrent per-feed refresh, cross-feed dedup, one
/// merge write per cycle.
pub mod poller;

/// The render router: path → ordered handlers over the [`render::ViewSink`]
/// seam.
pub mod render;

/// Viewed/modal selection.
pub mod selection;

/// The state tree and its observable write path.
pub mod state;

/// The submission workflow: validate, fetch, parse, merge.
pub mod submit;

/// Terminal user interface built with ratatui.
pub mod tui;
