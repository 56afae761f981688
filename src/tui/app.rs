use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{Post, PostId};
use crate::messages::MessageLookup;
use crate::render::{Feedback, Tone, ViewSink};
use crate::state::AppState;

/// One row of the feeds pane.
#[derive(Debug, Clone)]
pub struct FeedRow {
    pub title: String,
    pub description: String,
}

/// One row of the posts pane.
#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: PostId,
    pub title: String,
    pub link: String,
    pub viewed: bool,
}

#[derive(Debug, Clone)]
pub struct ModalContent {
    pub title: String,
    pub body: String,
    pub link: String,
}

/// The TUI render model. This is the view layer the render router drives:
/// it holds only what the screen needs, and never reaches back into the
/// state tree.
pub struct TuiApp {
    messages: Arc<dyn MessageLookup + Send + Sync>,
    pub input: String,
    pub editing: bool,
    pub submit_enabled: bool,
    pub feedback: Option<(Tone, String)>,
    pub feeds: Vec<FeedRow>,
    pub posts: Vec<PostRow>,
    pub post_index: usize,
    pub modal: Option<ModalContent>,
    pub modal_open: bool,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(messages: Arc<dyn MessageLookup + Send + Sync>) -> Self {
        Self {
            messages,
            input: String::new(),
            editing: true,
            submit_enabled: true,
            feedback: None,
            feeds: Vec::new(),
            posts: Vec::new(),
            post_index: 0,
            modal: None,
            modal_open: false,
            should_quit: false,
        }
    }

    pub fn selected_post(&self) -> Option<&PostRow> {
        self.posts.get(self.post_index)
    }

    pub fn move_up(&mut self) {
        if self.post_index > 0 {
            self.post_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if !self.posts.is_empty() && self.post_index < self.posts.len() - 1 {
            self.post_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        if self.post_index >= self.posts.len() {
            self.post_index = self.posts.len().saturating_sub(1);
        }
    }
}

impl ViewSink for TuiApp {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn reset_input(&mut self) {
        self.input.clear();
    }

    fn show_feedback(&mut self, feedback: Feedback) {
        let text = self.messages.message(feedback.key).to_string();
        self.feedback = Some((feedback.tone, text));
    }

    fn render_feeds(&mut self, state: &AppState) {
        self.feeds = state
            .feeds
            .iter()
            .map(|feed| FeedRow {
                title: feed.display_title().to_string(),
                description: feed.description.clone(),
            })
            .collect();
    }

    fn render_posts(&mut self, posts: &[Post], viewed: &BTreeSet<PostId>) {
        self.posts = posts
            .iter()
            .map(|post| PostRow {
                id: post.id,
                title: post.display_title().to_string(),
                link: post.link.clone(),
                viewed: viewed.contains(&post.id),
            })
            .collect();
        self.clamp_selection();
    }

    fn refresh_viewed(&mut self, viewed: &BTreeSet<PostId>) {
        for row in &mut self.posts {
            row.viewed = viewed.contains(&row.id);
        }
    }

    fn show_modal(&mut self, post: &Post) {
        self.modal = Some(ModalContent {
            title: post.title.clone(),
            body: post.description.clone(),
            link: post.link.clone(),
        });
        self.modal_open = true;
    }
}
