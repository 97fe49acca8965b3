//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseTransaction, DbConn, EntityTrait, QueryOrder, TransactionTrait,
};

use folio_core::domain::Post;
use folio_core::error::RepoError;
use folio_core::ports::{PostRepository, PostStore, PostTransaction};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository, over the pool or over an open transaction.
pub type PostgresPostRepository<C = DbConn> = PostgresBaseRepository<PostEntity, C>;

#[async_trait]
impl<C> PostRepository for PostgresPostRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_all_desc(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = result.len(), "Loaded posts newest first");

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostTransaction for PostgresPostRepository<DatabaseTransaction> {
    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        (*self).into_inner().commit().await.map_err(map_db_err)
    }
}

/// PostgreSQL post store: every unit of work is a database transaction.
///
/// A transaction dropped before `commit` is rolled back by SeaORM.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Box::new(PostgresPostRepository::new(txn)))
    }
}
