//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use chrono::SecondsFormat;

use postboard_core::domain::{Post, PostChanges, PostDraft};
use postboard_shared::dto::{
    CreatePostRequest, DeletePostResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        content: post.content,
        created_at: post.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        content: req.content,
        created_at: req.created_at,
    };

    let post = state.posts.create(draft).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    post_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(&post_id).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    post_id: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
    };

    let post = state.posts.update_by_id(&post_id, changes).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    post_id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = state.posts.delete_by_id(&post_id).await?;

    Ok(HttpResponse::Ok().json(DeletePostResponse {
        id: id.to_string(),
        deleted: true,
    }))
}
