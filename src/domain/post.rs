use serde::{Deserialize, Serialize};

use crate::domain::{FeedId, PostId};
use crate::parser::ParsedPost;

/// One entry belonging to a feed. Immutable once created; `feed_id` always
/// references a feed already present in the state tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub feed_id: FeedId,
    pub title: String,
    pub description: String,
    pub link: String,
}

impl Post {
    pub fn from_parsed(id: PostId, feed_id: FeedId, parsed: ParsedPost) -> Self {
        Self {
            id,
            feed_id,
            title: parsed.title,
            description: parsed.description,
            link: parsed.link,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }

    /// Whether a freshly parsed post is the same post as this one under the
    /// given dedup key. The key spans feeds on purpose: two feeds carrying
    /// the same item must not produce two posts.
    pub fn matches(&self, candidate: &ParsedPost, key: DedupKey) -> bool {
        match key {
            DedupKey::Title => self.title == candidate.title,
            DedupKey::TitleLink => self.title == candidate.title && self.link == candidate.link,
        }
    }
}

/// Which fields decide that a fetched post is already stored. The source
/// behavior varied between title-only and title+link, so the key is
/// configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupKey {
    Title,
    #[default]
    TitleLink,
}
