use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostStore};

use crate::database::entity::post::{self, Status};
use crate::database::postgres_repo::PostgresPostRepository;

fn model(slug: &str, status: Status, day: u32) -> post::Model {
    let publish = Utc.with_ymd_and_hms(2019, 8, day, 10, 0, 0).unwrap();
    post::Model {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        title: format!("Title {slug}"),
        slug: slug.to_owned(),
        body: "Body".to_owned(),
        publish: publish.into(),
        created: publish.into(),
        updated: publish.into(),
        status,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("first-post", Status::Published, 2);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);

    let found: Option<Post> = repo.find_by_id(row.id).await.unwrap();

    let post = found.unwrap();
    assert_eq!(post.id, row.id);
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.absolute_url(), "/blog/2019/8/2/first-post/");
}

#[tokio::test]
async fn test_published_maps_rows_in_query_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            model("newer", Status::Published, 3),
            model("older", Status::Published, 1),
        ]])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);

    let posts = repo.published().await.unwrap();

    let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["newer", "older"]);
    assert!(posts.iter().all(Post::is_published));
}

#[tokio::test]
async fn test_published_on_returns_matches() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model("dated", Status::Published, 2)]])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);
    let date = NaiveDate::from_ymd_opt(2019, 8, 2).unwrap();

    let posts = repo.published_on(date, "dated").await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "dated");
}

#[tokio::test]
async fn test_insert_returns_stored_post() {
    let row = model("fresh", Status::Draft, 5);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);

    let saved = repo.insert(Post::from(row.clone())).await.unwrap();

    assert_eq!(saved.slug, "fresh");
    assert_eq!(saved.status, PostStatus::Draft);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);

    let result = repo.delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_published_page_reads_count_and_rows_in_one_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(7)]])
        .append_query_results([vec![model("oldest", Status::Published, 1)]])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);

    let page = repo.published_page(3, Some("9")).await.unwrap();

    assert_eq!(page.number, 3);
    assert_eq!(page.num_pages, 3);
    assert_eq!(page.count, 7);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].slug, "oldest");
}

#[tokio::test]
async fn test_published_page_of_empty_table_skips_slice() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(0)]])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);

    let page = repo.published_page(3, None).await.unwrap();

    assert_eq!(page.number, 1);
    assert_eq!(page.num_pages, 1);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_occupying_returns_drafts_on_the_day() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model("taken", Status::Draft, 4)]])
        .into_connection();
    let repo = PostgresPostRepository::from_connection(db);
    let date = NaiveDate::from_ymd_opt(2019, 8, 4).unwrap();

    let held = repo.occupying(date, "taken").await.unwrap();

    assert_eq!(held.len(), 1);
    assert_eq!(held[0].status, PostStatus::Draft);
}
