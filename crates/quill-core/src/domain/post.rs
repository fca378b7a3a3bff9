use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum length, in characters, of a post title and of a slug.
pub const MAX_TITLE_LEN: usize = 250;
pub const MAX_SLUG_LEN: usize = 250;

/// Publication status of a post. `Draft` orders before `Published`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Validation(format!(
                "unknown post status `{other}`"
            ))),
        }
    }
}

/// Post entity - a blog entry written by an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: PostStatus,
}

/// Fields supplied when creating a post.
///
/// A missing slug is derived from the title, a missing publish time
/// defaults to the creation time and a missing status to draft.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub slug: Option<String>,
    pub body: String,
    pub publish: Option<DateTime<Utc>>,
    pub status: Option<PostStatus>,
}

/// Partial update of a post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub author_id: Option<Uuid>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub publish: Option<DateTime<Utc>>,
    pub status: Option<PostStatus>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.author_id.is_none()
            && self.title.is_none()
            && self.slug.is_none()
            && self.body.is_none()
            && self.publish.is_none()
            && self.status.is_none()
    }
}

impl Post {
    /// Create a new post with a generated ID. `created` and `updated` are
    /// both set to `now`.
    pub fn new(
        author_id: Uuid,
        title: String,
        slug: String,
        body: String,
        publish: Option<DateTime<Utc>>,
        status: PostStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            body,
            publish: publish.unwrap_or(now),
            created: now,
            updated: now,
            status,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Calendar day of the publish timestamp, in UTC.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Whether this post occupies the given (slug, publish-day) slot.
    pub fn occupies(&self, date: NaiveDate, slug: &str) -> bool {
        self.slug == slug && self.publish_date() == date
    }

    /// Canonical public URL, e.g. `/blog/2019/8/2/first-post/`.
    pub fn absolute_url(&self) -> String {
        let date = self.publish_date();
        format!(
            "/blog/{}/{}/{}/{}/",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }

    /// Apply a set of changes and refresh `updated`. `created` is never touched.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(author_id) = changes.author_id {
            self.author_id = author_id;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(slug) = changes.slug {
            self.slug = slug;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(publish) = changes.publish {
            self.publish = publish;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.touch();
    }

    /// Mark the record as mutated now.
    pub fn touch(&mut self) {
        // Keep `updated` monotonic even if the clock was read in the same tick.
        let now = Utc::now();
        self.updated = if now > self.updated {
            now
        } else {
            self.updated + chrono::Duration::microseconds(1)
        };
    }

    /// Check title and slug bounds.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title)?;
        validate_slug(&self.slug)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be blank".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Slugs consist of ASCII letters, digits, hyphens and underscores.
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::Validation("slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(DomainError::Validation(format!(
            "slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DomainError::Validation(format!(
            "slug `{slug}` may only contain letters, numbers, underscores or hyphens"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Post {
        let publish = Utc.with_ymd_and_hms(2019, 8, 2, 23, 30, 0).unwrap();
        Post::new(
            Uuid::new_v4(),
            "First post".into(),
            "first-post".into(),
            "Hello".into(),
            Some(publish),
            PostStatus::Published,
        )
    }

    #[test]
    fn test_new_post_defaults() {
        let post = Post::new(
            Uuid::new_v4(),
            "Title".into(),
            "title".into(),
            String::new(),
            None,
            PostStatus::default(),
        );
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.created, post.updated);
        assert_eq!(post.publish, post.created);
    }

    #[test]
    fn test_absolute_url_uses_unpadded_date() {
        assert_eq!(sample().absolute_url(), "/blog/2019/8/2/first-post/");
    }

    #[test]
    fn test_apply_keeps_created_and_advances_updated() {
        let mut post = sample();
        let created = post.created;
        let updated = post.updated;

        post.apply(PostChanges {
            title: Some("Renamed".into()),
            ..Default::default()
        });

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.created, created);
        assert!(post.updated > updated);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert_eq!("draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert!("archived".parse::<PostStatus>().is_err());
        assert!(PostStatus::Draft < PostStatus::Published);
    }

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("first-post_2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN + 1)).is_err());
    }

    #[test]
    fn test_display_is_title() {
        assert_eq!(sample().to_string(), "First post");
    }
}
