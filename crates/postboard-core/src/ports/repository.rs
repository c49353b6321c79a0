use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};
use crate::error::RepoError;

/// Post storage. Every method is a single round trip to the backing store.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Short name of the backing store, for logs and health reports.
    fn backend(&self) -> &'static str;

    /// Every stored post, in the store's natural (insertion) order.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post and return it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// Overwrite the supplied fields and return the post-update record,
    /// or `None` if no post has this id.
    async fn update_by_id(&self, id: PostId, changes: PostChanges)
    -> Result<Option<Post>, RepoError>;

    /// Hard-delete a post. Returns whether a record was removed.
    async fn delete_by_id(&self, id: PostId) -> Result<bool, RepoError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepoError>;
}
