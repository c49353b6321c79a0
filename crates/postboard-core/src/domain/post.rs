use chrono::{DateTime, SubsecRound, Utc};

use super::PostId;
use crate::error::DomainError;

/// Post entity - the single persisted resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated create input, as received from a client.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated post that has not been stored yet.
///
/// Only [`PostDraft::validate`] builds one, so every `NewPost` carries a
/// non-empty title and content and a resolved creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

/// Fields to overwrite on an existing post. `None` leaves a field untouched.
///
/// There is no `created_at` here: the creation timestamp is set once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            created_at: None,
        }
    }

    /// Check required fields and resolve the creation timestamp.
    pub fn validate(self) -> Result<NewPost, DomainError> {
        let mut problems = Vec::new();
        let title = required("title", self.title, &mut problems);
        let content = required("content", self.content, &mut problems);

        match (title, content) {
            (Some(title), Some(content)) => Ok(NewPost {
                title,
                content,
                // Document stores keep millisecond precision; truncate here so
                // the record handed back on create matches what a later read sees.
                created_at: self.created_at.unwrap_or_else(Utc::now).trunc_subsecs(3),
            }),
            _ => Err(DomainError::Validation(problems.join(", "))),
        }
    }
}

impl NewPost {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attach the identifier assigned by the store.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Supplied fields follow the same rules as on create: not empty.
    pub fn validate(self) -> Result<Self, DomainError> {
        let empty: Vec<String> = [("title", &self.title), ("content", &self.content)]
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_some_and(str::is_empty))
            .map(|(field, _)| format!("{field} must not be empty"))
            .collect();

        if empty.is_empty() {
            Ok(self)
        } else {
            Err(DomainError::Validation(empty.join(", ")))
        }
    }

    /// Overwrite the supplied fields on `post`.
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}

fn required(field: &str, value: Option<String>, problems: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        Some(_) => {
            problems.push(format!("{field} must not be empty"));
            None
        }
        None => {
            problems.push(format!("{field} is required"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate_defaults_created_at() {
        let before = Utc::now().trunc_subsecs(3);
        let post = PostDraft::new("Hello", "World").validate().unwrap();
        assert_eq!(post.title(), "Hello");
        assert_eq!(post.content(), "World");
        assert!(post.created_at() >= before);
        assert_eq!(post.created_at().timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_validate_keeps_supplied_created_at() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let draft = PostDraft {
            created_at: Some(at),
            ..PostDraft::new("t", "c")
        };
        assert_eq!(draft.validate().unwrap().created_at(), at);
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let err = PostDraft::default().validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("title is required"));
                assert!(msg.contains("content is required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_but_keeps_whitespace() {
        let err = PostDraft::new("", "body").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "title must not be empty"));

        let post = PostDraft::new("   ", "body").validate().unwrap();
        assert_eq!(post.title(), "   ");
    }

    #[test]
    fn test_changes_apply_only_supplied_fields() {
        let mut post = PostDraft::new("old", "content")
            .validate()
            .unwrap()
            .into_post(PostId::from_bytes([1; 12]));
        let created_at = post.created_at;

        let changes = PostChanges {
            title: Some("new".to_string()),
            content: None,
        };
        changes.validate().unwrap().apply_to(&mut post);

        assert_eq!(post.title, "new");
        assert_eq!(post.content, "content");
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn test_changes_reject_empty_and_detect_no_op() {
        assert!(PostChanges::default().is_empty());

        let changes = PostChanges {
            title: None,
            content: Some(String::new()),
        };
        assert!(!changes.is_empty());
        assert!(matches!(changes.validate(), Err(DomainError::Validation(_))));
    }
}
