//! Post document as stored in the `posts` collection.

use bson::oid::ObjectId;
use bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};

use postboard_core::domain::{NewPost, Post, PostChanges, PostId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime,
}

impl PostDocument {
    /// Build the document for a new post under a freshly generated object id.
    pub fn new(post: &NewPost) -> Self {
        Self {
            id: ObjectId::new(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            created_at: DateTime::from_chrono(post.created_at()),
        }
    }
}

/// Conversion from stored document to domain Post.
impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: PostId::from_bytes(doc.id.bytes()),
            title: doc.title,
            content: doc.content,
            created_at: doc.created_at.to_chrono(),
        }
    }
}

pub fn object_id(id: PostId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub fn id_filter(id: PostId) -> Document {
    doc! { "_id": object_id(id) }
}

/// `$set` document for the supplied fields.
pub fn set_changes(changes: PostChanges) -> Document {
    let mut set = Document::new();
    if let Some(title) = changes.title {
        set.insert("title", title);
    }
    if let Some(content) = changes.content {
        set.insert("content", content);
    }
    doc! { "$set": set }
}
