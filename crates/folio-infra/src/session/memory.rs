//! In-memory session store - used as fallback when Redis is unavailable.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::ports::{SessionData, SessionError, SessionStore};

struct SessionEntry {
    data: SessionData,
    expires_at: Instant,
}

/// In-memory session store using a HashMap with async RwLock.
///
/// Note: Sessions are lost on process restart.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &SessionEntry) -> bool {
        Instant::now() > entry.expires_at
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, SessionError> {
        let sessions = self.sessions.read().await;
        let Some(entry) = sessions.get(session_id) else {
            return Ok(None);
        };

        if Self::is_expired(entry) {
            drop(sessions);
            let mut sessions = self.sessions.write().await;
            sessions.remove(session_id);
            return Ok(None);
        }

        Ok(Some(entry.data.clone()))
    }

    async fn store(
        &self,
        session_id: &str,
        data: &SessionData,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| SessionError::Operation("session lifetime out of range".to_string()))?;

        let mut sessions = self.sessions.write().await;
        // Sessions whose cookie never comes back are only reclaimed here.
        sessions.retain(|_, entry| !Self::is_expired(entry));
        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                data: data.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_with(key: &str, value: &str) -> SessionData {
        let mut data = SessionData::new();
        data.insert(key, &value).unwrap();
        data
    }

    #[tokio::test]
    async fn test_store_and_load() {
        let store = InMemorySessionStore::new();
        let data = data_with("user", "alice");

        store
            .store("sid-1", &data, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(store.load("sid-1").await.unwrap(), Some(data));
        assert_eq!(store.load("sid-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_destroy() {
        let store = InMemorySessionStore::new();
        store
            .store("sid-1", &data_with("k", "v"), Duration::from_secs(60))
            .await
            .unwrap();

        store.destroy("sid-1").await.unwrap();
        store.destroy("never-existed").await.unwrap();

        assert_eq!(store.load("sid-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_session_is_gone() {
        let store = InMemorySessionStore::new();
        store
            .store("sid-1", &data_with("k", "v"), Duration::from_millis(10))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(store.load("sid-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_drops_abandoned_sessions() {
        let store = InMemorySessionStore::new();
        for i in 0..100 {
            store
                .store(&format!("sid-{i}"), &data_with("k", "v"), Duration::from_millis(1))
                .await
                .unwrap();
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
        store
            .store("fresh", &data_with("k", "v"), Duration::from_secs(60))
            .await
            .unwrap();

        let sessions = store.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key("fresh"));
    }

    #[tokio::test]
    async fn test_unrepresentable_lifetime_is_rejected() {
        let store = InMemorySessionStore::new();

        let result = store.store("sid-1", &data_with("k", "v"), Duration::MAX).await;

        assert!(matches!(result, Err(SessionError::Operation(_))));
        assert_eq!(store.load("sid-1").await.unwrap(), None);
    }
}
