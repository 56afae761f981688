//! The render router: a fixed mapping from state path to the ordered
//! handlers that bring the view layer up to date.
//!
//! Handlers are pure with respect to the state; everything they do goes
//! through the [`ViewSink`] seam, so the router runs unchanged against the
//! ratatui front end, the console reporter, or a recording stub in tests.

use std::collections::BTreeSet;

use crate::domain::{Post, PostId};
use crate::messages::MessageKey;
use crate::state::{AppState, Dispatch, FormStatus, LoadStatus, StatePath};

/// Tone of the feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
}

/// A feedback message, still symbolic; the view resolves the key to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub tone: Tone,
    pub key: MessageKey,
}

/// The narrow surface the core requires of the view layer.
pub trait ViewSink {
    /// Enable or disable the submit affordance.
    fn set_submit_enabled(&mut self, enabled: bool);
    /// Clear the URL input after a successful submission.
    fn reset_input(&mut self);
    fn show_feedback(&mut self, feedback: Feedback);
    fn render_feeds(&mut self, state: &AppState);
    fn render_posts(&mut self, posts: &[Post], viewed: &BTreeSet<PostId>);
    fn refresh_viewed(&mut self, viewed: &BTreeSet<PostId>);
    fn show_modal(&mut self, post: &Post);
}

type Handler<V> = fn(&AppState, &mut V);

/// Routes store notifications to the handler list for the written path.
pub struct Renderer<V> {
    view: V,
}

impl<V: ViewSink> Renderer<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

impl<V: ViewSink> Dispatch for Renderer<V> {
    fn notify(&mut self, state: &AppState, path: StatePath) {
        // The dispatch table. One entry per state path; the order within an
        // entry is fixed.
        let handlers: &[Handler<V>] = match path {
            StatePath::Form => &[form_feedback],
            StatePath::Loading => &[submit_affordance, success_feedback, failure_feedback],
            StatePath::Feeds => &[feeds_list],
            StatePath::Posts => &[posts_list],
            StatePath::Viewed => &[viewed_marks],
            StatePath::Modal => &[modal_content],
        };
        for handler in handlers {
            handler(state, &mut self.view);
        }
    }
}

fn form_feedback<V: ViewSink>(state: &AppState, view: &mut V) {
    if state.form.status == FormStatus::Filling {
        return;
    }
    let key = state.form.error.unwrap_or(MessageKey::UnknownError);
    view.show_feedback(Feedback {
        tone: Tone::Failure,
        key,
    });
}

fn submit_affordance<V: ViewSink>(state: &AppState, view: &mut V) {
    match state.loading.status {
        LoadStatus::Loading => view.set_submit_enabled(false),
        LoadStatus::Success => {
            view.set_submit_enabled(true);
            view.reset_input();
        }
        LoadStatus::Fail => view.set_submit_enabled(true),
        LoadStatus::Idle => {}
    }
}

fn success_feedback<V: ViewSink>(state: &AppState, view: &mut V) {
    if state.loading.status != LoadStatus::Success {
        return;
    }
    view.show_feedback(Feedback {
        tone: Tone::Success,
        key: MessageKey::Success,
    });
}

fn failure_feedback<V: ViewSink>(state: &AppState, view: &mut V) {
    if state.loading.status != LoadStatus::Fail {
        return;
    }
    let key = state.loading.error.unwrap_or(MessageKey::UnknownError);
    view.show_feedback(Feedback {
        tone: Tone::Failure,
        key,
    });
}

fn feeds_list<V: ViewSink>(state: &AppState, view: &mut V) {
    view.render_feeds(state);
}

fn posts_list<V: ViewSink>(state: &AppState, view: &mut V) {
    view.render_posts(&state.posts, &state.viewed);
}

fn viewed_marks<V: ViewSink>(state: &AppState, view: &mut V) {
    view.refresh_viewed(&state.viewed);
}

fn modal_content<V: ViewSink>(state: &AppState, view: &mut V) {
    let id = state
        .modal_post
        .expect("modal notification without a modal post id");
    // A modal id that does not resolve to a stored post is a broken contract
    // between the selection flow and the store, not a runtime condition.
    let post = state
        .post(id)
        .unwrap_or_else(|| panic!("modal post {id} is not in the post list"));
    view.show_modal(post);
}
