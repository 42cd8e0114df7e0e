//! Content module - normalized post models, normalization and pagination

pub mod feed;
pub mod normalize;
pub mod post;

pub use feed::PostFeed;
pub use post::{ContentBlock, PostDetail, PostSummary};
