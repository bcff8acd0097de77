//! Per-conversation chat state.

use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub welcome_shown: bool,
}

/// Bounded map of session id -> state. Least recently used sessions are evicted first.
pub struct SessionStore {
    sessions: Mutex<LruCache<String, SessionState>>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Reports whether the session's welcome is still pending.
    ///
    /// Returns `true` exactly once per session: the first caller flips the flag
    /// while holding the lock.
    pub async fn begin_turn(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.lock().await;

        if let Some(state) = sessions.get_mut(session_id) {
            if state.welcome_shown {
                return false;
            }
            state.welcome_shown = true;
            return true;
        }

        debug!("Creating chat session {}", session_id);
        sessions.put(
            session_id.to_string(),
            SessionState {
                welcome_shown: true,
            },
        );
        true
    }

    #[cfg(test)]
    pub async fn get(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.lock().await.peek(session_id).copied()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
