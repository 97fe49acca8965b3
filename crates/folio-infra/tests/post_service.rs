use std::sync::Arc;

use folio_core::DomainError;
use folio_core::services::PostService;
use folio_infra::InMemoryPostStore;
use folio_shared::dto::PostResponse;

fn service() -> PostService {
    PostService::new(Arc::new(InMemoryPostStore::new()))
}

#[tokio::test]
async fn test_save_then_find_by_id() {
    let posts = service();

    let id = posts
        .save("Hello", "World", Some("bob".to_string()))
        .await
        .unwrap();

    assert_eq!(id, 1);
    assert_eq!(
        posts.find_by_id(id).await.unwrap(),
        PostResponse {
            id: 1,
            title: "Hello".to_string(),
            content: "World".to_string(),
            author: Some("bob".to_string()),
        }
    );
}

#[tokio::test]
async fn test_save_rejects_invalid_input_without_writing() {
    let posts = service();

    let too_long = "a".repeat(501);
    assert!(matches!(
        posts.save(too_long, "content", None).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        posts.save("", "content", None).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        posts.save("title", "", None).await,
        Err(DomainError::Validation(_))
    ));

    assert!(posts.find_all_desc().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_changes_only_title_and_content() {
    let posts = service();
    let id = posts
        .save("Hello", "World", Some("bob".to_string()))
        .await
        .unwrap();

    let updated = posts.update(id, "Hello2", "World2").await.unwrap();

    assert_eq!(updated, id);
    let post = posts.find_by_id(id).await.unwrap();
    assert_eq!(post.id, id);
    assert_eq!(post.title, "Hello2");
    assert_eq!(post.content, "World2");
    assert_eq!(post.author.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_update_missing_post_is_not_found_and_creates_nothing() {
    let posts = service();

    let result = posts.update(42, "title", "content").await;

    match result {
        Err(DomainError::NotFound { entity_type, id }) => {
            assert_eq!(entity_type, "Post");
            assert_eq!(id, 42);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(posts.find_all_desc().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_update_leaves_stored_post_unchanged() {
    let posts = service();
    let id = posts.save("Hello", "World", None).await.unwrap();

    let result = posts.update(id, "Hello2", "").await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    let post = posts.find_by_id(id).await.unwrap();
    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "World");
}

#[tokio::test]
async fn test_find_all_desc_orders_by_id_descending() {
    let posts = service();
    for title in ["first", "second", "third"] {
        posts.save(title, "content", None).await.unwrap();
    }

    let listed = posts.find_all_desc().await.unwrap();

    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(listed[0].title, "third");
}

#[tokio::test]
async fn test_find_all_desc_empty() {
    assert!(service().find_all_desc().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete() {
    let posts = service();
    let id = posts.save("Hello", "World", None).await.unwrap();

    posts.delete(id).await.unwrap();

    assert!(matches!(
        posts.find_by_id(id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        posts.delete(id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_end_to_end_example() {
    let posts = service();

    assert_eq!(
        posts.save("Hello", "World", Some("bob".into())).await.unwrap(),
        1
    );
    assert_eq!(posts.update(1, "Hello2", "World2").await.unwrap(), 1);

    let post = posts.find_by_id(1).await.unwrap();
    assert_eq!(post.title, "Hello2");
    assert_eq!(post.content, "World2");
    assert_eq!(post.author.as_deref(), Some("bob"));

    let missing = posts.find_by_id(99).await;
    assert!(matches!(missing, Err(DomainError::NotFound { id: 99, .. })));
    assert_eq!(
        missing.unwrap_err().to_string(),
        "Post not found: id=99"
    );
}

#[tokio::test]
async fn test_author_has_no_length_limit() {
    let posts = service();
    let author = "a".repeat(1000);

    let id = posts
        .save("Hello", "World", Some(author.clone()))
        .await
        .unwrap();

    assert_eq!(posts.find_by_id(id).await.unwrap().author, Some(author));
}
