//! In-memory post storage - used when no database is configured, and in tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use folio_core::domain::Post;
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, PostRepository, PostStore, PostTransaction};

#[derive(Debug, Clone, Default)]
struct Tables {
    last_id: i64,
    posts: BTreeMap<i64, Post>,
}

/// In-memory post store.
///
/// Units of work run one at a time: `begin` takes the store lock and works on
/// a private copy, which replaces the shared tables only on commit.
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn begin(&self) -> Result<Box<dyn PostTransaction>, RepoError> {
        let committed = self.tables.clone().lock_owned().await;
        let working = Mutex::new(committed.clone());

        Ok(Box::new(InMemoryPostTransaction { committed, working }))
    }
}

/// A unit of work over [`InMemoryPostStore`].
pub struct InMemoryPostTransaction {
    committed: OwnedMutexGuard<Tables>,
    working: Mutex<Tables>,
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostTransaction {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.working.lock().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.working.lock().await;

        let id = match post.id() {
            Some(id) if tables.posts.contains_key(&id) => id,
            Some(_) => return Err(RepoError::NotFound),
            None => {
                tables.last_id += 1;
                tables.last_id
            }
        };

        let stored = Post::from_storage(
            id,
            post.title().to_string(),
            post.content().to_string(),
            post.author().map(str::to_string),
        );
        tables.posts.insert(id, stored.clone());

        Ok(stored)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.working.lock().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostTransaction {
    async fn find_all_desc(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.working.lock().await;
        Ok(tables.posts.values().rev().cloned().collect())
    }
}

#[async_trait]
impl PostTransaction for InMemoryPostTransaction {
    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let Self {
            mut committed,
            working,
        } = *self;
        *committed = working.into_inner();
        Ok(())
    }
}
