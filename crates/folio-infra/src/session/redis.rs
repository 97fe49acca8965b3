//! Redis session store with connection pooling.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use folio_core::ports::{SessionData, SessionError, SessionStore};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Prefix for session keys
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            key_prefix: "folio:session:".to_string(),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            key_prefix: std::env::var("REDIS_SESSION_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }
}

/// Redis-backed session store. Sessions are JSON strings stored with `SET EX`,
/// so Redis expires them on its own.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisSessionStore {
    pub async fn new(config: RedisConfig) -> Result<Self, SessionError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| SessionError::Connection("Connection timed out".to_string()))?
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis session store");

        Ok(Self {
            conn,
            key_prefix: config.key_prefix,
        })
    }

    fn key(&self, session_id: &str) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, SessionError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(self.key(session_id))
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| SessionError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn store(
        &self,
        session_id: &str,
        data: &SessionData,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        let json =
            serde_json::to_string(data).map_err(|e| SessionError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(self.key(session_id), json, ttl.as_secs().max(1))
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))?;

        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<(), SessionError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(session_id))
            .await
            .map_err(|e| SessionError::Operation(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn get_test_store() -> Option<RedisSessionStore> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
            key_prefix: "folio:test:session:".to_string(),
        };

        RedisSessionStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn test_redis_session_round_trip() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        let mut data = SessionData::new();
        data.insert("user", &"alice").unwrap();

        store
            .store("round-trip", &data, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.load("round-trip").await.unwrap(), Some(data));

        store.destroy("round-trip").await.unwrap();
        assert_eq!(store.load("round-trip").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_session_expires() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        store
            .store("short-lived", &SessionData::new(), Duration::from_secs(1))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(store.load("short-lived").await.unwrap(), None);
    }
}
