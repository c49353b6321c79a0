//! Post service - the operations exposed to the HTTP layer.
//!
//! Parses identifiers and validates input before touching the store, then
//! delegates to the injected [`PostRepository`].

use std::sync::Arc;

use crate::domain::{Post, PostChanges, PostDraft, PostId};
use crate::error::DomainError;
use crate::ports::PostRepository;

const ENTITY: &str = "Post";

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let new_post = draft.validate()?;
        let post = self.repo.insert(new_post).await?;
        tracing::debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Post, DomainError> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Returns the post-update record. An empty change set is a plain read.
    pub async fn update_by_id(&self, id: &str, changes: PostChanges) -> Result<Post, DomainError> {
        let id = parse_id(id)?;
        let changes = changes.validate()?;

        let updated = if changes.is_empty() {
            self.repo.find_by_id(id).await?
        } else {
            self.repo.update_by_id(id, changes).await?
        };

        updated.ok_or_else(|| not_found(id))
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<PostId, DomainError> {
        let id = parse_id(id)?;
        if self.repo.delete_by_id(id).await? {
            tracing::debug!(post_id = %id, "Post deleted");
            Ok(id)
        } else {
            Err(not_found(id))
        }
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        Ok(self.repo.ping().await?)
    }
}

fn parse_id(raw: &str) -> Result<PostId, DomainError> {
    raw.parse::<PostId>()
        .map_err(|e| DomainError::InvalidIdentifier(e.to_string()))
}

fn not_found(id: PostId) -> DomainError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id: id.to_string(),
    }
}
