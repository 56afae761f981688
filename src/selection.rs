//! Viewed/modal tracking, independent of the submission and polling flows.

use crate::domain::PostId;
use crate::state::{Dispatch, StateStore, StateWrite};

/// The user followed a post link: remember it as viewed. Idempotent on the
/// set, but the write still notifies so rendering stays simple.
pub fn open_post<D: Dispatch>(store: &mut StateStore<D>, id: PostId) {
    store.write(StateWrite::MarkViewed(id));
}

/// The user asked for a preview: mark viewed and select the post for the
/// modal.
pub fn preview_post<D: Dispatch>(store: &mut StateStore<D>, id: PostId) {
    store.write(StateWrite::MarkViewed(id));
    store.write(StateWrite::OpenModal(id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Feed, IdGenerator, Post};
    use crate::state::store::Silent;
    use crate::state::StateStore;

    fn seeded_store() -> (StateStore<Silent>, PostId) {
        let ids = IdGenerator::new();
        let feed_id = ids.next_feed_id();
        let post_id = ids.next_post_id();
        let mut store = StateStore::new(Silent);
        store.write(StateWrite::PrependFeed(Feed {
            id: feed_id,
            url: "https://example.com/feed".into(),
            title: "Feed".into(),
            description: String::new(),
        }));
        store.write(StateWrite::PrependPosts(vec![Post {
            id: post_id,
            feed_id,
            title: "Post".into(),
            description: "Body".into(),
            link: "https://example.com/1".into(),
        }]));
        (store, post_id)
    }

    #[test]
    fn test_open_marks_viewed() {
        let (mut store, id) = seeded_store();
        open_post(&mut store, id);
        assert!(store.state().is_viewed(id));
        assert!(store.state().modal_post.is_none());
    }

    #[test]
    fn test_preview_marks_viewed_and_selects_modal() {
        let (mut store, id) = seeded_store();
        preview_post(&mut store, id);
        assert!(store.state().is_viewed(id));
        assert_eq!(store.state().modal_post, Some(id));
    }

    #[test]
    fn test_repeat_open_keeps_set_single() {
        let (mut store, id) = seeded_store();
        open_post(&mut store, id);
        open_post(&mut store, id);
        assert_eq!(store.state().viewed.len(), 1);
    }
}
