//! Post administration endpoints.
//!
//! Access control is expected in front of `/api/admin` (reverse proxy or
//! gateway); these handlers perform none.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::admin::{AdminPostFilter, DateDrillDown, DateFilter};
use quill_core::domain::{NewPost, PostChanges, PostStatus};
use quill_shared::ApiResponse;
use quill_shared::dto::{AdminPostListQuery, CreatePostRequest, UpdatePostRequest};

use super::posts::post_response;
use crate::middleware::error::AppResult;
use crate::observability::RequestId;
use crate::state::AppState;

/// GET /api/admin/posts/config
pub async fn config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.admin.config()))
}

/// GET /api/admin/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<AdminPostListQuery>,
) -> AppResult<HttpResponse> {
    let filter = build_filter(query.into_inner())?;
    let posts = state.admin.list(&filter).await?;

    let body: Vec<_> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/admin/posts/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.admin.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// POST /api/admin/posts
pub async fn create(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_post = NewPost {
        author_id: req.author_id,
        title: req.title,
        slug: req.slug,
        body: req.body,
        publish: req.publish,
        status: parse_status(req.status.as_deref())?,
    };

    let post = state.admin.create(new_post).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %post.id, "Admin created post");

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// PUT /api/admin/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    request_id: RequestId,
    id: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        author_id: req.author_id,
        title: req.title,
        slug: req.slug,
        body: req.body,
        publish: req.publish,
        status: parse_status(req.status.as_deref())?,
    };

    let post = state.admin.update(id.into_inner(), changes).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %post.id, "Admin updated post");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    request_id: RequestId,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.admin.delete(id).await?;
    tracing::info!(request_id = %request_id.as_str(), post_id = %id, "Admin deleted post");

    Ok(HttpResponse::NoContent().finish())
}

fn parse_status(raw: Option<&str>) -> AppResult<Option<PostStatus>> {
    Ok(raw.map(str::parse).transpose()?)
}

fn parse_date_filter(raw: Option<&str>) -> AppResult<Option<DateFilter>> {
    Ok(raw.map(str::parse).transpose()?)
}

fn build_filter(query: AdminPostListQuery) -> AppResult<AdminPostFilter> {
    let publish_drill_down = match query.year {
        Some(year) => Some(DateDrillDown::new(year, query.month, query.day)?),
        None => None,
    };

    Ok(AdminPostFilter {
        status: parse_status(query.status.as_deref())?,
        author_id: query.author,
        created: parse_date_filter(query.created.as_deref())?,
        publish: parse_date_filter(query.publish.as_deref())?,
        publish_drill_down,
        search: query.q.filter(|q| !q.trim().is_empty()),
    })
}
