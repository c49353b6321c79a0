//! Domain entities - the Post record and its inputs.

mod post;
mod post_id;

pub use post::{NewPost, Post, PostChanges, PostDraft};
pub use post_id::{InvalidPostId, PostId};
