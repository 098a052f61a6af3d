//! In-memory session store
//!
//! Maps a browser session id (carried in a cookie) to that session's
//! key-value state. Sessions are isolated from one another and live only in
//! process memory: they expire after an idle timeout and are dropped on
//! restart.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::feedback::Feedback;
use crate::config::SessionConfig;

/// Unique identifier for a browser session
pub type SessionId = String;

/// Session key holding the most recent feedback submission
pub const LAST_FEEDBACK_KEY: &str = "last_feedback";

/// Per-session key-value state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    values: HashMap<String, Value>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Insert or overwrite a value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The last feedback submitted in this session, if any
    pub fn last_feedback(&self) -> Result<Option<Feedback>, SessionError> {
        self.get(LAST_FEEDBACK_KEY)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(SessionError::from)
    }

    /// Replace the last feedback entry wholesale
    pub fn set_last_feedback(&mut self, feedback: &Feedback) -> Result<(), SessionError> {
        let value = serde_json::to_value(feedback)?;
        self.insert(LAST_FEEDBACK_KEY, value);
        Ok(())
    }
}

/// Errors raised while reading or writing session values
#[derive(Error, Debug)]
pub enum SessionError {
    /// A stored value did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The session id is not (or no longer) known
    #[error("Session not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            state: SessionState::new(),
            last_seen: Instant::now(),
        }
    }
}

/// Shared store of all live sessions
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionEntry>>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Resolve the session presented by a client, creating one if needed
    ///
    /// Returns the id to use and whether it was newly created (in which case
    /// the client must be sent a fresh cookie). Unknown or expired ids are
    /// never adopted; a new id is minted instead.
    pub async fn resolve(&self, presented: Option<&str>) -> (SessionId, bool) {
        let mut sessions = self.sessions.write().await;
        self.resolve_locked(&mut sessions, presented)
    }

    /// Resolve a session and run `f` on its state under the same lock
    ///
    /// The session cannot be swept or evicted between resolution and `f`.
    pub async fn resolve_with<F, R>(&self, presented: Option<&str>, f: F) -> (SessionId, bool, R)
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut sessions = self.sessions.write().await;
        let (id, created) = self.resolve_locked(&mut sessions, presented);

        let entry = sessions.entry(id.clone()).or_insert_with(SessionEntry::new);
        let result = f(&mut entry.state);
        (id, created, result)
    }

    fn resolve_locked(
        &self,
        sessions: &mut HashMap<SessionId, SessionEntry>,
        presented: Option<&str>,
    ) -> (SessionId, bool) {
        if let Some(id) = presented {
            let expired = match sessions.get_mut(id) {
                Some(entry) if !self.is_expired(entry) => {
                    entry.last_seen = Instant::now();
                    return (id.to_string(), false);
                }
                Some(_) => true,
                None => false,
            };

            if expired {
                sessions.remove(id);
                tracing::debug!(session_id = %id, "Session expired");
            }
        }

        if sessions.len() >= self.config.max_sessions.max(1) {
            self.evict_least_recent(sessions);
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(id.clone(), SessionEntry::new());

        tracing::info!(session_id = %id, "Session created");
        (id, true)
    }

    /// Read a session's state
    pub async fn read<F, R>(&self, id: &str, f: F) -> Result<R, SessionError>
    where
        F: FnOnce(&SessionState) -> R,
    {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .map(|entry| f(&entry.state))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Drop a session
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of live sessions (including not yet swept expired ones)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Remove all sessions idle for longer than the timeout
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry));
        before - sessions.len()
    }

    /// Spawn a task that periodically purges expired sessions
    pub fn start_background_sweep(self: Arc<Self>) -> JoinHandle<()> {
        let period = self.config.sweep_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let purged = self.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "Swept expired sessions");
                }
            }
        })
    }

    fn is_expired(&self, entry: &SessionEntry) -> bool {
        entry.last_seen.elapsed() >= self.config.idle_timeout()
    }

    fn evict_least_recent(&self, sessions: &mut HashMap<SessionId, SessionEntry>) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_seen)
            .map(|(id, _)| id.clone());

        if let Some(id) = oldest {
            sessions.remove(&id);
            tracing::warn!(session_id = %id, "Session capacity reached, evicted least recent");
        }
    }
}
