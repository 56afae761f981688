use serde::{Deserialize, Serialize};

use crate::domain::FeedId;

/// A subscribed feed. Created on the first successful fetch of a URL and
/// immutable afterwards; the URL is unique across the session by construction
/// (the submission workflow rejects duplicates before fetching).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: FeedId,
    pub url: String,
    pub title: String,
    pub description: String,
}

impl Feed {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IdGenerator;

    fn feed(title: &str) -> Feed {
        Feed {
            id: IdGenerator::new().next_feed_id(),
            url: "https://example.com/feed.xml".into(),
            title: title.into(),
            description: "a feed".into(),
        }
    }

    #[test]
    fn test_display_title_with_title() {
        assert_eq!(feed("Lobsters").display_title(), "Lobsters");
    }

    #[test]
    fn test_display_title_falls_back_to_url() {
        assert_eq!(feed("").display_title(), "https://example.com/feed.xml");
    }
}
