//! In-memory post repository - used when no document store is configured.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, Post, PostChanges, PostId};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

/// In-memory post store using a BTreeMap with async RwLock.
///
/// Ids are 4 bytes of creation seconds followed by an 8-byte sequence
/// number. The map is keyed by the sequence, so listing returns posts in
/// insertion order and an id is never handed out twice.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<BTreeMap<u64, Post>>,
    next_seq: AtomicU64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(BTreeMap::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> PostId {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let secs = Utc::now().timestamp() as u32;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&seq.to_be_bytes());
        PostId::from_bytes(bytes)
    }

    fn seq_of(id: PostId) -> u64 {
        let bytes = id.bytes();
        let mut seq = [0u8; 8];
        seq.copy_from_slice(&bytes[4..]);
        u64::from_be_bytes(seq)
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().cloned().collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let id = self.next_id();
        let post = post.into_post(id);

        let mut posts = self.posts.write().await;
        posts.insert(Self::seq_of(id), post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        // The sequence alone could collide with a foreign id, so compare the whole id
        Ok(posts
            .get(&Self::seq_of(id))
            .filter(|post| post.id == id)
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: PostId,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&Self::seq_of(id)) {
            Some(post) if post.id == id => {
                changes.apply_to(post);
                Ok(Some(post.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: PostId) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let seq = Self::seq_of(id);
        if posts.get(&seq).is_some_and(|post| post.id == id) {
            posts.remove(&seq);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
