//! Administrative writes and listing of posts.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::admin::{AdminConfig, AdminPostFilter};
use crate::domain::{NewPost, Post, PostChanges, validate_slug, validate_title};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;
use crate::slug::derive_slug;

/// Create, edit, delete and list posts on behalf of an administrator.
#[derive(Clone)]
pub struct AdminPostService {
    repo: Arc<dyn PostRepository>,
    config: Arc<AdminConfig>,
}

impl AdminPostService {
    pub fn new(repo: Arc<dyn PostRepository>, config: AdminConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Every post matching `filter`, in the configured admin ordering.
    pub async fn list(&self, filter: &AdminPostFilter) -> Result<Vec<Post>, DomainError> {
        let now = Utc::now();
        let mut posts: Vec<Post> = self
            .repo
            .all()
            .await?
            .into_iter()
            .filter(|post| filter.matches(post, &self.config, now))
            .collect();
        posts.sort_by(|a, b| self.config.compare(a, b));
        Ok(posts)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id.to_string()))
    }

    pub async fn create(&self, new_post: NewPost) -> Result<Post, DomainError> {
        validate_title(&new_post.title)?;
        let slug = match new_post.slug {
            Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
            _ => derive_slug(&new_post.title)?,
        };
        validate_slug(&slug)?;

        let post = Post::new(
            new_post.author_id,
            new_post.title,
            slug,
            new_post.body,
            new_post.publish,
            new_post.status.unwrap_or_default(),
        );
        self.ensure_slot_free(&post).await?;

        let saved = self.repo.insert(post).await.map_err(duplicate_on_constraint)?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, status = %saved.status, "Post created");
        Ok(saved)
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        if changes.is_empty() {
            return Ok(post);
        }

        post.apply(changes);
        post.validate()?;
        self.ensure_slot_free(&post).await?;

        let saved = self.repo.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id.to_string()),
            other => duplicate_on_constraint(other),
        })?;
        tracing::info!(post_id = %saved.id, "Post updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id.to_string()),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Reject a post whose (slug, publish day) is held by another post.
    async fn ensure_slot_free(&self, post: &Post) -> Result<(), DomainError> {
        let date = post.publish_date();
        let taken = self
            .repo
            .occupying(date, &post.slug)
            .await?
            .iter()
            .any(|other| other.id != post.id);

        if taken {
            return Err(DomainError::Duplicate(format!(
                "slug `{}` is already used on {date}",
                post.slug
            )));
        }
        Ok(())
    }
}

fn duplicate_on_constraint(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(msg) => DomainError::Duplicate(msg),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::DateDrillDown;
    use crate::domain::PostStatus;
    use crate::ports::PostStore;
    use crate::services::testing::{StubStore, post_at};
    use chrono::TimeZone;

    fn service(posts: Vec<Post>) -> (AdminPostService, Arc<StubStore>) {
        let store = Arc::new(StubStore::new(posts));
        (
            AdminPostService::new(store.clone(), AdminConfig::default()),
            store,
        )
    }

    fn new_post(title: &str) -> NewPost {
        NewPost {
            author_id: Uuid::new_v4(),
            title: title.into(),
            body: "body".into(),
            publish: Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_defaults_to_draft() {
        let (svc, store) = service(vec![]);

        let post = svc.create(new_post("Hello, World!")).await.unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.created, post.updated);
        assert_eq!(store.all().await.unwrap().len(), 1);
        assert!(store.published().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_same_slug_same_day() {
        let (svc, _) = service(vec![]);
        svc.create(new_post("Hello")).await.unwrap();

        let err = svc.create(new_post("Hello")).await.unwrap_err();

        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_writes_check_only_the_slot() {
        let (svc, store) = service(vec![post_at("other", PostStatus::Published, 2024, 6, 1)]);

        let post = svc.create(new_post("Hello")).await.unwrap();
        svc.update(
            post.id,
            PostChanges {
                title: Some("Hello again".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(store.full_scans(), 0);
    }

    #[tokio::test]
    async fn test_create_allows_same_slug_other_day() {
        let (svc, _) = service(vec![]);
        svc.create(new_post("Hello")).await.unwrap();

        let mut other_day = new_post("Hello");
        other_day.publish = Some(Utc.with_ymd_and_hms(2024, 6, 2, 8, 0, 0).unwrap());

        assert!(svc.create(other_day).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let (svc, _) = service(vec![]);

        let blank = svc.create(new_post("  ")).await.unwrap_err();
        assert!(matches!(blank, DomainError::Validation(_)));

        let mut bad_slug = new_post("Fine");
        bad_slug.slug = Some("not a slug".into());
        let err = svc.create(bad_slug).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_created() {
        let (svc, _) = service(vec![]);
        let post = svc.create(new_post("Draft")).await.unwrap();

        let updated = svc
            .update(
                post.id,
                PostChanges {
                    status: Some(PostStatus::Published),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, PostStatus::Published);
        assert_eq!(updated.created, post.created);
        assert!(updated.updated > post.updated);
    }

    #[tokio::test]
    async fn test_update_into_taken_slot_is_duplicate() {
        let existing = post_at("taken", PostStatus::Published, 2024, 6, 1);
        let (svc, _) = service(vec![existing]);
        let post = svc.create(new_post("Free")).await.unwrap();

        let err = svc
            .update(
                post.id,
                PostChanges {
                    slug: Some("taken".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let (svc, _) = service(vec![]);
        let id = Uuid::new_v4();

        assert!(matches!(svc.get(id).await, Err(DomainError::NotFound { .. })));
        assert!(matches!(svc.delete(id).await, Err(DomainError::NotFound { .. })));
        let changes = PostChanges {
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update(id, changes).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let (svc, _) = service(vec![
            post_at("b", PostStatus::Published, 2024, 2, 1),
            post_at("a", PostStatus::Draft, 2024, 3, 1),
            post_at("c", PostStatus::Draft, 2023, 3, 1),
        ]);

        let all = svc.list(&AdminPostFilter::default()).await.unwrap();
        let order: Vec<_> = all.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(order, ["c", "a", "b"]);

        let in_2024 = AdminPostFilter {
            publish_drill_down: Some(DateDrillDown::new(2024, None, None).unwrap()),
            ..Default::default()
        };
        let order: Vec<_> = svc
            .list(&in_2024)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(order, ["a", "b"]);
    }
}
