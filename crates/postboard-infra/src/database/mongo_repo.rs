//! MongoDB post repository.

use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ReturnDocument;

use postboard_core::domain::{NewPost, Post, PostChanges, PostId};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

use super::connection::DatabaseConnection;
use super::document::{self, PostDocument};

/// Post repository backed by a MongoDB collection.
pub struct MongoPostRepository {
    conn: DatabaseConnection,
    posts: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(conn: &DatabaseConnection) -> Self {
        let posts = conn.database().collection(conn.collection_name());
        Self {
            conn: conn.clone(),
            posts,
        }
    }
}

/// Transport and pool failures mean the store is unreachable; everything
/// else is a failed operation.
fn map_err(err: MongoError) -> RepoError {
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Shutdown => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let cursor = self.posts.find(doc! {}).await.map_err(map_err)?;
        let docs: Vec<PostDocument> = cursor.try_collect().await.map_err(map_err)?;

        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let doc = PostDocument::new(&post);
        self.posts.insert_one(&doc).await.map_err(map_err)?;

        Ok(doc.into())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = self
            .posts
            .find_one(document::id_filter(id))
            .await
            .map_err(map_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_by_id(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let result = self
            .posts
            .find_one_and_update(document::id_filter(id), document::set_changes(changes))
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete_by_id(&self, id: PostId) -> Result<bool, RepoError> {
        let result = self
            .posts
            .delete_one(document::id_filter(id))
            .await
            .map_err(map_err)?;

        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.conn
            .database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_map_to_connection() {
        let io = MongoError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(matches!(map_err(io), RepoError::Connection(_)));
    }

    #[test]
    fn test_other_errors_map_to_query() {
        let bad = MongoError::custom("boom");
        assert!(matches!(map_err(bad), RepoError::Query(_)));
    }
}
