use std::sync::Arc;

use folio_shared::dto::PostResponse;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::PostStore;

/// Post use cases. The only component that talks to post storage.
///
/// Every method runs inside a single [`PostTransaction`](crate::ports::PostTransaction):
/// an early return drops the transaction uncommitted, so callers never see
/// partial writes.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Create a post and return its storage-assigned id.
    pub async fn save(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        author: Option<String>,
    ) -> Result<i64, DomainError> {
        let post = Post::new(title, content, author)?;

        let tx = self.store.begin().await?;
        let saved = tx.save(post).await?;
        let id = persisted_id(&saved)?;
        tx.commit().await?;

        Ok(id)
    }

    /// Replace title and content of post `id`, returning the same id.
    pub async fn update(
        &self,
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<i64, DomainError> {
        let tx = self.store.begin().await?;
        let mut post = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        post.update(title, content)?;
        // No change tracking: the mutated entity has to be written back explicitly.
        tx.save(post).await?;
        tx.commit().await?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<PostResponse, DomainError> {
        let tx = self.store.begin().await?;
        let post = tx
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        tx.commit().await?;

        to_response(post)
    }

    /// All posts, newest (highest id) first.
    pub async fn find_all_desc(&self) -> Result<Vec<PostResponse>, DomainError> {
        let tx = self.store.begin().await?;
        let posts = tx.find_all_desc().await?;
        tx.commit().await?;

        posts.into_iter().map(to_response).collect()
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let tx = self.store.begin().await?;
        if tx.find_by_id(id).await?.is_none() {
            return Err(DomainError::post_not_found(id));
        }
        tx.delete(id).await?;
        tx.commit().await?;

        Ok(())
    }
}

fn persisted_id(post: &Post) -> Result<i64, DomainError> {
    post.id()
        .ok_or_else(|| DomainError::Internal("storage returned a post without an id".to_string()))
}

fn to_response(post: Post) -> Result<PostResponse, DomainError> {
    let id = persisted_id(&post)?;
    Ok(PostResponse {
        id,
        title: post.title().to_string(),
        content: post.content().to_string(),
        author: post.author().map(str::to_string),
    })
}
