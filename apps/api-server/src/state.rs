//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::ports::{IdentityVerifier, PostStore, SessionStore};
use folio_core::services::PostService;
use folio_infra::{DatabaseConfig, InMemoryPostStore, InMemorySessionStore};

use crate::config::{AppConfig, SessionConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub sessions: Arc<dyn SessionStore>,
    /// `None` when the server is built without the `auth` feature.
    pub identity: Option<Arc<dyn IdentityVerifier>>,
    pub session: SessionConfig,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let post_store = init_post_store(config.database.as_ref()).await;
        let sessions = init_session_store(config.redis_url.as_deref()).await;

        #[cfg(feature = "auth")]
        let identity: Option<Arc<dyn IdentityVerifier>> =
            Some(Arc::new(folio_infra::JwtIdentityVerifier::from_env()));

        #[cfg(not(feature = "auth"))]
        let identity: Option<Arc<dyn IdentityVerifier>> = {
            tracing::warn!("Running without auth feature - login is disabled");
            None
        };

        tracing::info!("Application state initialized");

        Self {
            posts: PostService::new(post_store),
            sessions,
            identity,
            session: config.session.clone(),
        }
    }

    /// State backed entirely by in-memory stores.
    #[cfg(test)]
    pub fn in_memory(session: SessionConfig, identity: Option<Arc<dyn IdentityVerifier>>) -> Self {
        Self {
            posts: PostService::new(Arc::new(InMemoryPostStore::new())),
            sessions: Arc::new(InMemorySessionStore::new()),
            identity,
            session,
        }
    }
}

#[cfg(feature = "postgres")]
async fn init_post_store(db_config: Option<&DatabaseConfig>) -> Arc<dyn PostStore> {
    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryPostStore::new());
    };

    match folio_infra::database::connect(config).await {
        Ok(conn) => Arc::new(folio_infra::PostgresPostStore::new(conn)),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryPostStore::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn init_post_store(_db_config: Option<&DatabaseConfig>) -> Arc<dyn PostStore> {
    tracing::info!("Running without postgres feature - using in-memory post store");
    Arc::new(InMemoryPostStore::new())
}

#[cfg(feature = "redis")]
async fn init_session_store(redis_url: Option<&str>) -> Arc<dyn SessionStore> {
    use folio_infra::{RedisConfig, RedisSessionStore};

    let Some(url) = redis_url else {
        tracing::warn!("REDIS_URL not set. Sessions are kept in memory.");
        return Arc::new(InMemorySessionStore::new());
    };

    let config = RedisConfig {
        url: url.to_string(),
        ..RedisConfig::from_env()
    };
    match RedisSessionStore::new(config).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(
                "Failed to connect to Redis: {}. Using in-memory session fallback.",
                e
            );
            Arc::new(InMemorySessionStore::new())
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn init_session_store(_redis_url: Option<&str>) -> Arc<dyn SessionStore> {
    tracing::info!("Running without redis feature - using in-memory session store");
    Arc::new(InMemorySessionStore::new())
}
