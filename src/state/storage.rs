//! Session storage implementation
//!
//! This module handles persistence of admin sessions using Redis, including
//! serialization, expiration and removal. An in-process store with the same
//! behavior backs tests and demo runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::context::Session;
use crate::config::RedisConfig;
use crate::utils::errors::Result;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: &str) -> Result<Option<Session>>;

    /// Insert or replace a session until its expiry
    async fn save(&self, session: &Session) -> Result<()>;

    /// Replace a session only while it is still stored, `false` once it is gone
    async fn update(&self, session: &Session) -> Result<bool>;

    async fn delete(&self, token: &str) -> Result<()>;

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Redis-based session storage
#[derive(Clone)]
pub struct RedisSessionStore {
    connection_manager: redis::aio::ConnectionManager,
    prefix: String,
}

impl RedisSessionStore {
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            prefix: config.prefix.clone(),
        })
    }

    fn session_key(&self, token: &str) -> String {
        format!("{}session:{}", self.prefix, token)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, token: &str) -> Result<Option<Session>> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;
        let Some(data) = serialized else {
            debug!("No session found in Redis");
            return Ok(None);
        };

        let session: Session = match serde_json::from_str(&data) {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Failed to deserialize session, discarding");
                self.delete(token).await?;
                return Ok(None);
            }
        };

        if session.is_expired() {
            warn!(email = %session.email, expires_at = %session.expires_at, "Session has expired, removing");
            self.delete(token).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let key = self.session_key(&session.token);
        let serialized = serde_json::to_string(session)?;
        let ttl_seconds = session.remaining_seconds().max(1);

        let mut conn = self.connection_manager.clone();
        conn.set_ex::<_, _, ()>(&key, serialized, ttl_seconds).await?;
        debug!(email = %session.email, ttl_seconds = ttl_seconds, "Session saved to Redis");
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<bool> {
        let key = self.session_key(&session.token);
        let serialized = serde_json::to_string(session)?;
        let ttl_seconds = session.remaining_seconds().max(1);

        let mut conn = self.connection_manager.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(serialized)
            .arg("EX")
            .arg(ttl_seconds)
            .arg("XX")
            .query_async(&mut conn)
            .await?;
        let updated = reply.is_some();
        debug!(email = %session.email, updated = updated, "Session update sent to Redis");
        Ok(updated)
    }

    async fn delete(&self, token: &str) -> Result<()> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        debug!(deleted = deleted, "Session removed from Redis");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

/// In-process session storage
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, token: &str) -> Result<Option<Session>> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(session) if session.is_expired() => {
                sessions.remove(token);
                Ok(None)
            }
            Some(session) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<bool> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.token) {
            Some(stored) => {
                *stored = session.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, token: &str) -> Result<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        let session = Session::new("admin@club.edu", Duration::hours(1));
        store.save(&session).await.unwrap();

        let loaded = store.load(&session.token).await.unwrap().unwrap();
        assert_eq!(loaded.email, "admin@club.edu");

        store.delete(&session.token).await.unwrap();
        assert!(store.load(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_drops_expired() {
        let store = MemorySessionStore::new();
        let session = Session::new("admin@club.edu", Duration::seconds(-1));
        store.save(&session).await.unwrap();

        assert!(store.load(&session.token).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_does_not_recreate_deleted_session() {
        let store = MemorySessionStore::new();
        let mut session = Session::new("admin@club.edu", Duration::hours(1));
        store.save(&session).await.unwrap();

        session.notify(crate::state::Notification::success("Saved"));
        assert!(store.update(&session).await.unwrap());

        store.delete(&session.token).await.unwrap();
        assert!(!store.update(&session).await.unwrap());
        assert!(store.load(&session.token).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
