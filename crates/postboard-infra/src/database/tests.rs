//! Service-level behavior every post store must provide.
//!
//! Each `check_*` function runs against a store with no posts in it; the
//! in-memory store always runs them, MongoDB runs them when a server is given.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use postboard_core::domain::{PostChanges, PostDraft};
use postboard_core::{DomainError, PostService};

use crate::database::InMemoryPostRepository;

const ABSENT_ID: &str = "65a1b2c3d4e5f60718293a4b";

fn is_not_found<T: std::fmt::Debug>(result: Result<T, DomainError>) -> bool {
    matches!(result, Err(DomainError::NotFound { .. }))
}

fn title_change(title: &str) -> PostChanges {
    PostChanges {
        title: Some(title.to_string()),
        content: None,
    }
}

async fn check_create_then_get(service: &PostService) {
    let created = service.create(PostDraft::new("Hello", "World")).await.unwrap();
    let fetched = service.get_by_id(&created.id.to_string()).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "Hello");
    assert_eq!(fetched.content, "World");
    assert!(!fetched.id.to_string().is_empty());
}

async fn check_created_at_survives_storage(service: &PostService) {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        + chrono::Duration::nanoseconds(123_456_789);
    let draft = PostDraft {
        created_at: Some(at),
        ..PostDraft::new("t", "c")
    };

    let created = service.create(draft).await.unwrap();
    let fetched = service.get_by_id(&created.id.to_string()).await.unwrap();

    assert_eq!(created.created_at.timestamp_subsec_millis(), 123);
    assert_eq!(fetched.created_at, created.created_at);
}

async fn check_absent_id_is_not_found_everywhere(service: &PostService) {
    service.create(PostDraft::new("a", "b")).await.unwrap();

    assert!(is_not_found(service.get_by_id(ABSENT_ID).await));
    assert!(is_not_found(service.update_by_id(ABSENT_ID, title_change("X")).await));
    assert!(is_not_found(service.update_by_id(ABSENT_ID, PostChanges::default()).await));
    assert!(is_not_found(service.delete_by_id(ABSENT_ID).await));
}

async fn check_list_contains_every_created_post(service: &PostService) {
    let mut ids = Vec::new();
    for i in 0..5 {
        let post = service
            .create(PostDraft::new(format!("title {i}"), "body"))
            .await
            .unwrap();
        ids.push(post.id);
    }

    let listed = service.list_all().await.unwrap();
    assert!(listed.len() >= ids.len());
    for id in ids {
        assert!(listed.iter().any(|p| p.id == id));
    }
}

async fn check_update_returns_new_record_and_keeps_other_fields(service: &PostService) {
    let created = service.create(PostDraft::new("Hello", "World")).await.unwrap();
    let id = created.id.to_string();

    let updated = service.update_by_id(&id, title_change("X")).await.unwrap();
    assert_eq!(updated.title, "X");
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.created_at, created.created_at);

    let fetched = service.get_by_id(&id).await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(fetched.id, created.id);
}

async fn check_empty_update_returns_current_record(service: &PostService) {
    let created = service.create(PostDraft::new("Hello", "World")).await.unwrap();

    let same = service
        .update_by_id(&created.id.to_string(), PostChanges::default())
        .await
        .unwrap();
    assert_eq!(same, created);
}

async fn check_delete_is_final_and_only_succeeds_once(service: &PostService) {
    let created = service.create(PostDraft::new("Hello", "World")).await.unwrap();
    let id = created.id.to_string();

    assert_eq!(service.delete_by_id(&id).await.unwrap(), created.id);
    assert!(is_not_found(service.get_by_id(&id).await));
    assert!(is_not_found(service.delete_by_id(&id).await));
    assert!(service.list_all().await.unwrap().is_empty());
}

mod memory {
    use super::*;

    fn service() -> PostService {
        PostService::new(Arc::new(InMemoryPostRepository::new()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        check_create_then_get(&service()).await;
    }

    #[tokio::test]
    async fn test_created_at_survives_storage() {
        check_created_at_survives_storage(&service()).await;
    }

    #[tokio::test]
    async fn test_absent_id_is_not_found_everywhere() {
        check_absent_id_is_not_found_everywhere(&service()).await;
    }

    #[tokio::test]
    async fn test_list_contains_every_created_post() {
        check_list_contains_every_created_post(&service()).await;
    }

    #[tokio::test]
    async fn test_update_returns_new_record_and_keeps_other_fields() {
        check_update_returns_new_record_and_keeps_other_fields(&service()).await;
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_record() {
        check_empty_update_returns_current_record(&service()).await;
    }

    #[tokio::test]
    async fn test_delete_is_final_and_only_succeeds_once() {
        check_delete_is_final_and_only_succeeds_once(&service()).await;
    }
}

/// Needs a running server: `MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored`
#[cfg(feature = "mongodb")]
mod mongo {
    use bson::oid::ObjectId;

    use super::*;
    use crate::database::{DatabaseConfig, DatabaseConnection, MongoPostRepository};

    /// Runs `check` against a fresh collection, dropped afterwards.
    async fn with_collection<F, Fut>(check: F)
    where
        F: FnOnce(PostService) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must point at a test server");
        let config = DatabaseConfig {
            uri,
            database: "postboard_test".to_string(),
            collection: format!("posts_{}", ObjectId::new().to_hex()),
            max_connections: 4,
            min_connections: 0,
        };

        let conn = DatabaseConnection::init(&config).await.unwrap();
        let service = PostService::new(Arc::new(MongoPostRepository::new(&conn)));
        assert_eq!(service.backend(), "mongodb");

        check(service).await;

        conn.database()
            .collection::<bson::Document>(&config.collection)
            .drop()
            .await
            .unwrap();
        conn.shutdown().await;
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn test_create_then_get() {
        with_collection(|s| async move { check_create_then_get(&s).await }).await;
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn test_created_at_survives_storage() {
        with_collection(|s| async move { check_created_at_survives_storage(&s).await }).await;
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn test_absent_id_is_not_found_everywhere() {
        with_collection(|s| async move { check_absent_id_is_not_found_everywhere(&s).await })
            .await;
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn test_list_contains_every_created_post() {
        with_collection(|s| async move { check_list_contains_every_created_post(&s).await })
            .await;
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn test_update_returns_new_record_and_keeps_other_fields() {
        with_collection(|s| async move {
            check_update_returns_new_record_and_keeps_other_fields(&s).await
        })
        .await;
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn test_empty_update_returns_current_record() {
        with_collection(|s| async move { check_empty_update_returns_current_record(&s).await })
            .await;
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB server at MONGODB_URI"]
    async fn test_delete_is_final_and_only_succeeds_once() {
        with_collection(|s| async move { check_delete_is_final_and_only_succeeds_once(&s).await })
            .await;
    }
}
