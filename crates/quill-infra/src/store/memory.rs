//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::pagination::{Page, Paginator};
use quill_core::ports::{BaseRepository, PostStore, sort_newest_first};

/// Post repository backed by a `HashMap` behind an async `RwLock`.
///
/// Enforces the same (slug, publish day) uniqueness as the database schema.
/// Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    /// Build a repository pre-filled with `posts`.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            posts: RwLock::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    fn check_slot(posts: &HashMap<Uuid, Post>, post: &Post) -> Result<(), RepoError> {
        let date = post.publish_date();
        let taken = posts
            .values()
            .any(|other| other.id != post.id && other.occupies(date, &post.slug));
        if taken {
            return Err(RepoError::Constraint(format!(
                "slug `{}` is already used on {date}",
                post.slug
            )));
        }
        Ok(())
    }

    async fn collect(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let store = self.posts.read().await;
        let mut posts: Vec<Post> = store.values().filter(|p| keep(p)).cloned().collect();
        sort_newest_first(&mut posts);
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostRepository {
    async fn all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(|_| true).await)
    }

    async fn published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.collect(Post::is_published).await)
    }

    /// Counts and slices one `published()` snapshot.
    async fn published_page(
        &self,
        per_page: u64,
        requested: Option<&str>,
    ) -> Result<Page<Post>, RepoError> {
        let posts = self.collect(Post::is_published).await;
        let paginator = Paginator::new(posts.len() as u64, per_page);
        let number = paginator.resolve(requested);
        let (offset, limit) = paginator.bounds(number);

        let items = posts
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        Ok(paginator.page(number, items))
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.posts.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }
        Self::check_slot(&store, &post)?;

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut store = self.posts.write().await;
        let created = store.get(&post.id).ok_or(RepoError::NotFound)?.created;
        Self::check_slot(&store, &post)?;

        post.created = created;
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.posts.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}
