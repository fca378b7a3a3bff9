//! Public read paths: the paginated list and the dated detail lookup.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::Post;
use crate::error::DomainError;
use crate::pagination::{POSTS_PER_PAGE, Page};
use crate::ports::PostStore;

/// Read-only queries over published posts.
#[derive(Clone)]
pub struct PostQueryService {
    store: Arc<dyn PostStore>,
    per_page: u64,
}

impl PostQueryService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            per_page: POSTS_PER_PAGE,
        }
    }

    /// Resolve `requested` to a page of published posts.
    ///
    /// Malformed or missing page numbers yield the first page, numbers past
    /// the end yield the last page. Only store failures are returned as
    /// errors.
    pub async fn list(&self, requested: Option<&str>) -> Result<Page<Post>, DomainError> {
        let page = self.store.published_page(self.per_page, requested).await?;

        tracing::debug!(
            requested = ?requested,
            page = page.number,
            num_pages = page.num_pages,
            returned = page.items.len(),
            "Resolved post list page"
        );

        Ok(page)
    }

    /// Find the single published post with `slug` published on the given day.
    ///
    /// An impossible date, no match, and more than one match are all
    /// reported as `NotFound`.
    pub async fn detail(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Post, DomainError> {
        let key = format!("{year}/{month}/{day}/{slug}");

        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Err(DomainError::post_not_found(key));
        };

        let mut matches = self.store.published_on(date, slug).await?;
        if matches.len() > 1 {
            tracing::warn!(
                %key,
                matches = matches.len(),
                "Slug is not unique for its publish day"
            );
        }

        match (matches.pop(), matches.is_empty()) {
            (Some(post), true) => Ok(post),
            _ => Err(DomainError::post_not_found(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;
    use crate::services::testing::{StubStore, post_at};

    fn service(posts: Vec<Post>) -> PostQueryService {
        PostQueryService::new(Arc::new(StubStore::new(posts)))
    }

    fn published(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| post_at(&format!("post-{i}"), PostStatus::Published, 2024, 1, 1 + i as u32))
            .collect()
    }

    fn slugs(page: &Page<Post>) -> Vec<&str> {
        page.items.iter().map(|p| p.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_second_page_of_seven() {
        let svc = service(published(7));

        let page = svc.list(Some("2")).await.unwrap();

        // Newest first: post-6 .. post-0, so page 2 holds ranks 4-6.
        assert_eq!(page.number, 2);
        assert_eq!(page.num_pages, 3);
        assert_eq!(slugs(&page), ["post-3", "post-2", "post-1"]);
    }

    #[tokio::test]
    async fn test_out_of_range_page_returns_last() {
        let svc = service(published(2));

        let page = svc.list(Some("5")).await.unwrap();

        assert_eq!(page.number, 1);
        assert_eq!(slugs(&page), ["post-1", "post-0"]);
    }

    #[tokio::test]
    async fn test_drafts_only_yields_empty_first_page() {
        let svc = service(vec![post_at("draft", PostStatus::Draft, 2024, 1, 1)]);

        let page = svc.list(None).await.unwrap();

        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_pages_match_first_page() {
        let svc = service(published(7));
        let first = svc.list(Some("1")).await.unwrap();

        for raw in [None, Some("0"), Some("abc")] {
            assert_eq!(svc.list(raw).await.unwrap(), first, "input {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_pages_are_newest_first() {
        let svc = service(published(7));
        for n in 1..=3 {
            let page = svc.list(Some(&n.to_string())).await.unwrap();
            assert!(page.items.windows(2).all(|w| w[0].publish >= w[1].publish));
        }
    }

    #[tokio::test]
    async fn test_detail_finds_published_post() {
        let svc = service(published(3));

        let post = svc.detail(2024, 1, 2, "post-1").await.unwrap();

        assert_eq!(post.slug, "post-1");
        assert_eq!(svc.detail(2024, 1, 2, "post-1").await.unwrap(), post);
    }

    #[tokio::test]
    async fn test_detail_ignores_drafts() {
        let svc = service(vec![post_at("hidden", PostStatus::Draft, 2024, 1, 1)]);

        let err = svc.detail(2024, 1, 1, "hidden").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_detail_requires_matching_date() {
        let svc = service(published(3));

        let err = svc.detail(2024, 1, 3, "post-1").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_detail_invalid_date_is_not_found() {
        let svc = service(published(3));

        let err = svc.detail(2024, 13, 40, "post-1").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_detail_duplicates_are_not_found() {
        let svc = service(vec![
            post_at("twin", PostStatus::Published, 2024, 5, 5),
            post_at("twin", PostStatus::Published, 2024, 5, 5),
        ]);

        let err = svc.detail(2024, 5, 5, "twin").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
