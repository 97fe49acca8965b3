//! Server-side session storage port.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Attributes held by one session, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData(HashMap<String, serde_json::Value>);

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the attribute stored under `key`, if any.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        self.0
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(|e| SessionError::Serialization(e.to_string()))
    }

    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SessionError> {
        let value =
            serde_json::to_value(value).map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.0.insert(key.to_string(), value);
        Ok(())
    }
}

/// Session store trait - abstraction over session backends (Redis, in-memory).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a live session. Unknown and expired ids both yield `None`.
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, SessionError>;

    /// Create or replace a session, resetting its time to live.
    async fn store(
        &self,
        session_id: &str,
        data: &SessionData,
        ttl: Duration,
    ) -> Result<(), SessionError>;

    /// Remove a session. Removing an unknown id is not an error.
    async fn destroy(&self, session_id: &str) -> Result<(), SessionError>;
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
