//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as returned by the public and admin endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: String,
    /// Canonical public URL of the post.
    pub url: String,
}

/// Pagination state for rendering page controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
    pub has_previous: bool,
    pub has_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_number: Option<u64>,
}

/// One page of the public post list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPageResponse {
    pub posts: Vec<PostResponse>,
    pub page: PageInfo,
}

/// Query string of the public post list. The page is kept as raw text so
/// that malformed values can fall back instead of being rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListQuery {
    pub page: Option<String>,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    /// Derived from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    pub author_id: Uuid,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub publish: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Partial update of a post; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub author_id: Option<Uuid>,
    pub body: Option<String>,
    pub publish: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// Filters of the admin post list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminPostListQuery {
    pub status: Option<String>,
    pub author: Option<Uuid>,
    /// One of `today`, `past_7_days`, `this_month`, `this_year`.
    pub created: Option<String>,
    pub publish: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Free-text search over title and body.
    pub q: Option<String>,
}
