use async_trait::async_trait;

use crate::domain::Post;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity. Inserts when storage has not assigned an id yet,
    /// otherwise writes the current state back over the stored row.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// All posts, highest id first.
    async fn find_all_desc(&self) -> Result<Vec<Post>, RepoError>;
}

/// A unit of work over post storage.
///
/// Writes made through it are visible to its own reads immediately and to
/// everyone else only after [`PostTransaction::commit`]. Dropping it without
/// committing rolls everything back.
#[async_trait]
pub trait PostTransaction: PostRepository {
    async fn commit(self: Box<Self>) -> Result<(), RepoError>;
}

/// Entry point to post storage: hands out units of work.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, RepoError>;
}
