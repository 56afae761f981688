pub mod feed;
pub mod ids;
pub mod post;

pub use feed::Feed;
pub use ids::{FeedId, IdGenerator, PostId};
pub use post::{DedupKey, Post};
