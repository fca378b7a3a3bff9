//! PostgreSQL post repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IsolationLevel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::pagination::{Page, Paginator};
use quill_core::ports::{BaseRepository, PostStore};

use super::connections::DatabaseConnections;
use super::entity::post::{self, ActiveModel, Entity as PostEntity, Status};

/// Post repository over a SeaORM connection.
///
/// Pagination and dated lookups run in SQL; the unique
/// (slug, publish day) index surfaces as `RepoError::Constraint`.
pub struct PostgresPostRepository {
    connections: Arc<DatabaseConnections>,
}

impl PostgresPostRepository {
    pub fn new(connections: Arc<DatabaseConnections>) -> Self {
        Self { connections }
    }

    /// Repository over a bare connection, e.g. a `MockDatabase`.
    pub fn from_connection(main: DbConn) -> Self {
        Self::new(Arc::new(DatabaseConnections { main }))
    }

    fn db(&self) -> &DbConn {
        &self.connections.main
    }

    fn newest_first(select: Select<PostEntity>) -> Select<PostEntity> {
        select
            .order_by_desc(post::Column::Publish)
            .order_by_desc(post::Column::Created)
            .order_by_asc(post::Column::Id)
    }

    fn published_query() -> Select<PostEntity> {
        PostEntity::find().filter(post::Column::Status.eq(Status::Published))
    }

    /// Restrict `select` to posts with `slug` published on the UTC day `date`.
    fn on_day(
        select: Select<PostEntity>,
        date: NaiveDate,
        slug: &str,
    ) -> Option<Select<PostEntity>> {
        let (start, end) = day_range(date)?;
        Some(
            select
                .filter(post::Column::Slug.eq(slug))
                .filter(post::Column::Publish.gte(start))
                .filter(post::Column::Publish.lt(end)),
        )
    }
}

fn day_range(date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let next_day = date.checked_add_days(Days::new(1))?;
    Some((
        date.and_time(NaiveTime::MIN).and_utc(),
        next_day.and_time(NaiveTime::MIN).and_utc(),
    ))
}

fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => RepoError::NotFound,
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

#[async_trait]
impl PostStore for PostgresPostRepository {
    async fn all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = Self::newest_first(PostEntity::find())
            .all(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn published(&self) -> Result<Vec<Post>, RepoError> {
        let rows = Self::newest_first(Self::published_query())
            .all(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_published(&self) -> Result<u64, RepoError> {
        Self::published_query()
            .count(self.db())
            .await
            .map_err(map_db_err)
    }

    async fn published_slice(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let rows = Self::newest_first(Self::published_query())
            .offset(offset)
            .limit(limit)
            .all(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count and slice inside one read-only repeatable-read transaction so
    /// the page metadata and its items come from the same snapshot.
    async fn published_page(
        &self,
        per_page: u64,
        requested: Option<&str>,
    ) -> Result<Page<Post>, RepoError> {
        let txn = self
            .db()
            .begin_with_config(Some(IsolationLevel::RepeatableRead), Some(AccessMode::ReadOnly))
            .await
            .map_err(map_db_err)?;

        let count = Self::published_query()
            .count(&txn)
            .await
            .map_err(map_db_err)?;
        let paginator = Paginator::new(count, per_page);
        let number = paginator.resolve(requested);
        let (offset, limit) = paginator.bounds(number);

        let rows = if limit == 0 {
            Vec::new()
        } else {
            Self::newest_first(Self::published_query())
                .offset(offset)
                .limit(limit)
                .all(&txn)
                .await
                .map_err(map_db_err)?
        };
        txn.commit().await.map_err(map_db_err)?;

        Ok(paginator.page(number, rows.into_iter().map(Into::into).collect()))
    }

    async fn published_on(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, RepoError> {
        let Some(select) = Self::on_day(Self::published_query(), date, slug) else {
            return Ok(Vec::new());
        };

        tracing::debug!(%date, slug, "Looking up published post");

        let rows = Self::newest_first(select)
            .all(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn occupying(&self, date: NaiveDate, slug: &str) -> Result<Vec<Post>, RepoError> {
        let Some(select) = Self::on_day(PostEntity::find(), date, slug) else {
            return Ok(Vec::new());
        };

        let rows = select.all(self.db()).await.map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .one(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let model = ActiveModel::from(post)
            .insert(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model = ActiveModel::for_update(post)
            .update(self.db())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
