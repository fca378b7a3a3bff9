//! Vec-backed store for service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{Post, PostStatus};
use crate::error::RepoError;
use crate::ports::{BaseRepository, PostStore, sort_newest_first};

pub struct StubStore {
    posts: Mutex<Vec<Post>>,
    full_scans: AtomicUsize,
}

impl StubStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            full_scans: AtomicUsize::new(0),
        }
    }

    /// Number of `all()` calls so far.
    pub fn full_scans(&self) -> usize {
        self.full_scans.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }
}

pub fn post_at(slug: &str, status: PostStatus, y: i32, m: u32, d: u32) -> Post {
    let publish = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
    Post::new(
        Uuid::new_v4(),
        format!("Title of {slug}"),
        slug.to_string(),
        format!("Body of {slug}"),
        Some(publish),
        status,
    )
}

#[async_trait]
impl PostStore for StubStore {
    async fn all(&self) -> Result<Vec<Post>, RepoError> {
        self.full_scans.fetch_add(1, Ordering::SeqCst);
        let mut posts = self.snapshot();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn published(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .snapshot()
            .into_iter()
            .filter(Post::is_published)
            .collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn occupying(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|post| post.occupies(date, slug))
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for StubStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.snapshot().into_iter().find(|p| p.id == id))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
