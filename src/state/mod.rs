//! The application state tree.
//!
//! All collections are newest-first. Mutation happens only through
//! [`store::StateStore::write`]; readers get `&AppState` snapshots.

pub mod store;

use std::collections::BTreeSet;

use crate::domain::{Feed, FeedId, Post, PostId};
use crate::messages::MessageKey;

pub use store::{Dispatch, Silent, StatePath, StateStore, StateWrite};

/// Validation outcome of the URL currently in the form, independent of any
/// fetch in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Filling,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub status: FormStatus,
    pub error: Option<MessageKey>,
}

impl FormState {
    pub fn filling() -> Self {
        Self {
            status: FormStatus::Filling,
            error: None,
        }
    }

    pub fn invalid(error: MessageKey) -> Self {
        Self {
            status: FormStatus::Invalid,
            error: Some(error),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::filling()
    }
}

/// Transient status of the current submission fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadingProcess {
    pub status: LoadStatus,
    pub error: Option<MessageKey>,
}

impl LoadingProcess {
    pub fn loading() -> Self {
        Self {
            status: LoadStatus::Loading,
            error: None,
        }
    }

    pub fn success() -> Self {
        Self {
            status: LoadStatus::Success,
            error: None,
        }
    }

    pub fn fail(error: MessageKey) -> Self {
        Self {
            status: LoadStatus::Fail,
            error: Some(error),
        }
    }
}

/// Root of the state tree. Lives for the session; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FormState,
    pub loading: LoadingProcess,
    /// Subscribed feeds, newest first.
    pub feeds: Vec<Feed>,
    /// Posts across all feeds, newest first.
    pub posts: Vec<Post>,
    /// Posts the user has opened. Grows monotonically within a session.
    pub viewed: BTreeSet<PostId>,
    /// Post currently shown in the preview modal, if any.
    pub modal_post: Option<PostId>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn feed(&self, id: FeedId) -> Option<&Feed> {
        self.feeds.iter().find(|feed| feed.id == id)
    }

    pub fn has_feed_url(&self, url: &str) -> bool {
        self.feeds.iter().any(|feed| feed.url == url)
    }

    pub fn is_viewed(&self, id: PostId) -> bool {
        self.viewed.contains(&id)
    }
}
