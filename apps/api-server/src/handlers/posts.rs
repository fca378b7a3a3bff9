//! Public blog endpoints: the paginated list and the post detail.

use actix_web::{HttpResponse, web};

use quill_core::domain::Post;
use quill_core::pagination::Page;
use quill_shared::ApiResponse;
use quill_shared::dto::{PageInfo, PostListQuery, PostPageResponse, PostResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /blog?page=N
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let page = state.queries.list(query.page.as_deref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(page))))
}

/// GET /blog/{year}/{month}/{day}/{slug}
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<(i32, u32, u32, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();
    let post = state.queries.detail(year, month, day, &slug).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

pub(super) fn post_response(post: Post) -> PostResponse {
    let url = post.absolute_url();
    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        author_id: post.author_id,
        body: post.body,
        publish: post.publish,
        created: post.created,
        updated: post.updated,
        status: post.status.to_string(),
        url,
    }
}

fn page_response(page: Page<Post>) -> PostPageResponse {
    let info = PageInfo {
        number: page.number,
        num_pages: page.num_pages,
        count: page.count,
        per_page: page.per_page,
        has_previous: page.has_previous(),
        has_next: page.has_next(),
        previous_page_number: page.previous_page_number(),
        next_page_number: page.next_page_number(),
    };

    PostPageResponse {
        posts: page.items.into_iter().map(post_response).collect(),
        page: info,
    }
}
