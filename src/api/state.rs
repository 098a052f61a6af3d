//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{Config, ServerConfig};
use crate::session::SessionStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-browser session store
    pub sessions: Arc<SessionStore>,
    /// Server configuration (page title, layout, bind address)
    pub server: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState from a session store and server configuration
    pub fn new(sessions: Arc<SessionStore>, server: ServerConfig) -> Self {
        Self {
            sessions,
            server: Arc::new(server),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with a fresh session store from a full configuration
    pub fn from_config(config: &Config) -> Self {
        let sessions = Arc::new(SessionStore::new(config.session.clone()));
        Self::new(sessions, config.server.clone())
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get live session count
    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }
}
