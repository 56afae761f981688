//! The observable write path over [`AppState`].
//!
//! Every logical write is one [`StateWrite`] variant; applying it and
//! notifying the dispatcher is a single synchronous step, so a handler always
//! observes the post-write state and never a torn one. Paths are a closed
//! enum rather than strings, which makes dispatch completeness a compile-time
//! property instead of a runtime fault.

use crate::domain::{Feed, Post, PostId};
use crate::state::{AppState, FormState, LoadingProcess};

/// Identifies which top-level field of the state tree a write touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatePath {
    Form,
    Loading,
    Feeds,
    Posts,
    Viewed,
    Modal,
}

/// One logical mutation of the state tree. A batch of posts is a single
/// write, and therefore a single notification.
#[derive(Debug, Clone)]
pub enum StateWrite {
    Form(FormState),
    Loading(LoadingProcess),
    PrependFeed(Feed),
    PrependPosts(Vec<Post>),
    MarkViewed(PostId),
    OpenModal(PostId),
}

impl StateWrite {
    pub fn path(&self) -> StatePath {
        match self {
            StateWrite::Form(_) => StatePath::Form,
            StateWrite::Loading(_) => StatePath::Loading,
            StateWrite::PrependFeed(_) => StatePath::Feeds,
            StateWrite::PrependPosts(_) => StatePath::Posts,
            StateWrite::MarkViewed(_) => StatePath::Viewed,
            StateWrite::OpenModal(_) => StatePath::Modal,
        }
    }
}

/// Receives one notification per logical write, after the write is applied.
///
/// Injected into the store so tests can substitute a recorder or a no-op for
/// the real render router.
pub trait Dispatch {
    fn notify(&mut self, state: &AppState, path: StatePath);
}

impl<F> Dispatch for F
where
    F: FnMut(&AppState, StatePath),
{
    fn notify(&mut self, state: &AppState, path: StatePath) {
        self(state, path)
    }
}

/// No-op dispatcher for flows that do not render.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Dispatch for Silent {
    fn notify(&mut self, _state: &AppState, _path: StatePath) {}
}

/// Owns the state tree and the injected dispatcher.
pub struct StateStore<D> {
    state: AppState,
    dispatch: D,
}

impl<D: Dispatch> StateStore<D> {
    pub fn new(dispatch: D) -> Self {
        Self {
            state: AppState::new(),
            dispatch,
        }
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatch
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatch
    }

    /// Apply one logical write and notify the dispatcher exactly once.
    ///
    /// Writes always notify, even when the new value equals the old one:
    /// several flows replace `form`/`loading` wholesale precisely to force a
    /// re-render, and a repeat `MarkViewed` is a legitimate re-notification.
    pub fn write(&mut self, write: StateWrite) {
        let path = write.path();
        match write {
            StateWrite::Form(form) => self.state.form = form,
            StateWrite::Loading(loading) => self.state.loading = loading,
            StateWrite::PrependFeed(feed) => self.state.feeds.insert(0, feed),
            StateWrite::PrependPosts(batch) => {
                let rest = std::mem::take(&mut self.state.posts);
                self.state.posts = batch;
                self.state.posts.extend(rest);
            }
            StateWrite::MarkViewed(id) => {
                self.state.viewed.insert(id);
            }
            StateWrite::OpenModal(id) => self.state.modal_post = Some(id),
        }
        self.dispatch.notify(&self.state, path);
    }
}
