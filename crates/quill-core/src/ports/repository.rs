use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;
use crate::pagination::{Page, Paginator};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Read-only views over stored posts.
///
/// Every listing is ordered by publish time, newest first. Ties are broken
/// by creation time (newest first) and then by id, so repeated reads of an
/// unchanged store return the same order.
///
/// Only `all` and `published` are required; the remaining methods have
/// defaults computed from those two which SQL-backed stores override.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every post regardless of status.
    async fn all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts whose status is published.
    async fn published(&self) -> Result<Vec<Post>, RepoError>;

    /// Number of published posts.
    async fn count_published(&self) -> Result<u64, RepoError> {
        Ok(self.published().await?.len() as u64)
    }

    /// A window of `published()`.
    async fn published_slice(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .published()
            .await?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    /// Resolve `requested` against the published posts and fetch that page.
    ///
    /// The default issues `count_published` and `published_slice` as two
    /// separate reads, so a write landing between them can leave the page
    /// metadata out of step with its items. Stores that can read a
    /// consistent snapshot override this.
    async fn published_page(
        &self,
        per_page: u64,
        requested: Option<&str>,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = Paginator::new(self.count_published().await?, per_page);
        let number = paginator.resolve(requested);
        let (offset, limit) = paginator.bounds(number);
        let items = if limit == 0 {
            Vec::new()
        } else {
            self.published_slice(offset, limit).await?
        };
        Ok(paginator.page(number, items))
    }

    /// Published posts with the given slug whose publish day (UTC) is `date`.
    async fn published_on(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .published()
            .await?
            .into_iter()
            .filter(|post| post.occupies(date, slug))
            .collect())
    }

    /// Posts of any status holding the (slug, UTC publish day) slot.
    async fn occupying(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|post| post.occupies(date, slug))
            .collect())
    }
}

/// Post repository: the read views plus administrative writes.
pub trait PostRepository: BaseRepository<Post, Uuid> + PostStore {}

impl<T> PostRepository for T where T: BaseRepository<Post, Uuid> + PostStore {}

/// Sort posts into the default listing order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.publish
            .cmp(&a.publish)
            .then_with(|| b.created.cmp(&a.created))
            .then_with(|| a.id.cmp(&b.id))
    });
}
