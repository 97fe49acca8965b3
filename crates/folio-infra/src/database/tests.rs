use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

use folio_core::domain::Post;
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, PostRepository, PostStore};

use crate::database::entity::post;
use crate::database::postgres_repo::{PostgresPostRepository, PostgresPostStore};

fn model(id: i64, title: &str) -> post::Model {
    post::Model {
        id,
        title: title.to_owned(),
        content: "Content".to_owned(),
        author: Some("bob".to_owned()),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id(), Some(1));
    assert_eq!(post.title(), "Test Post");
    assert_eq!(post.author(), Some("bob"));
}

#[tokio::test]
async fn test_find_all_desc_orders_by_id_descending() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(3, "c"), model(2, "b"), model(1, "a")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.find_all_desc().await.unwrap();

    let ids: Vec<_> = posts.iter().filter_map(Post::id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    assert_eq!(
        repo.into_inner().into_transaction_log(),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "posts"."id", "posts"."title", "posts"."content", "posts"."author" FROM "posts" ORDER BY "posts"."id" DESC"#,
            []
        )]
    );
}

#[tokio::test]
async fn test_save_new_post_inserts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "Hello")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::new("Hello", "Content", Some("bob".to_owned())).unwrap();

    let saved = repo.save(post).await.unwrap();

    assert_eq!(saved.id(), Some(1));
    assert_eq!(saved.title(), "Hello");
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, i64>::delete(&repo, 99).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_store_runs_work_in_a_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(1, "Hello")]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let tx = store.begin().await.unwrap();

    let post = tx.find_by_id(1).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(post.map(|p| p.title().to_owned()), Some("Hello".to_owned()));
}

#[tokio::test]
async fn test_save_existing_post_writes_back() {
    let mut updated = model(1, "Hello2");
    updated.content = "World2".to_owned();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![updated]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::from_storage(1, "Hello2".into(), "World2".into(), Some("bob".into()));

    let saved = repo.save(post).await.unwrap();
    assert_eq!(saved.id(), Some(1));
    assert_eq!(saved.content(), "World2");

    let log = repo.into_inner().into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = &log[0].statements()[0].sql;
    assert!(
        sql.starts_with(
            r#"UPDATE "posts" SET "title" = $1, "content" = $2, "author" = $3 WHERE "posts"."id" = $4"#
        ),
        "{sql}"
    );
}

#[tokio::test]
async fn test_save_vanished_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::from_storage(42, "Hello".into(), "World".into(), None);

    let result = repo.save(post).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_save_keeps_long_author() {
    let author = "a".repeat(1000);
    let mut row = model(1, "Hello");
    row.author = Some(author.clone());
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::new("Hello", "Content", Some(author.clone())).unwrap();

    let saved = repo.save(post).await.unwrap();
    assert_eq!(saved.author(), Some(author.as_str()));

    let log = repo.into_inner().into_transaction_log();
    let values = log[0].statements()[0].values.as_ref().unwrap();
    assert!(values.0.contains(&sea_orm::Value::from(Some(author))));
}
