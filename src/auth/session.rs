//! Server-side operator sessions.
//!
//! A session is created at login and holds the operator identity read from
//! the database together with that operator's admin panel state. Clients
//! only ever hold the opaque token. A session unused for longer than the
//! idle timeout is dropped on the next lookup or login.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::models::Operator;
use crate::panel::AdminPanel;

/// One logged-in operator.
pub struct Session {
    pub token: String,
    pub operator: Operator,
    pub created_at: DateTime<Utc>,
    /// Unix milliseconds of the last authenticated request.
    last_seen: AtomicI64,
    /// Form state and loaded lists, private to this session.
    pub panel: Mutex<AdminPanel>,
}

impl Session {
    fn touch(&self, now: DateTime<Utc>) {
        self.last_seen.store(now.timestamp_millis(), Ordering::Relaxed);
    }

    fn is_idle(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now.timestamp_millis() - self.last_seen.load(Ordering::Relaxed) > timeout.num_milliseconds()
    }
}

/// In-memory token to session map.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Open a session for `operator` and return it. Idle sessions are
    /// swept first.
    pub async fn create(&self, operator: Operator, panel: AdminPanel) -> Arc<Session> {
        let token = format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
        let now = Utc::now();
        let session = Arc::new(Session {
            token: token.clone(),
            operator,
            created_at: now,
            last_seen: AtomicI64::new(now.timestamp_millis()),
            panel: Mutex::new(panel),
        });

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_idle(now, self.idle_timeout));
        if sessions.len() < before {
            tracing::debug!(expired = before - sessions.len(), "Swept idle sessions");
        }
        sessions.insert(token, session.clone());
        session
    }

    /// Look up a live session and mark it as used. An idle session is
    /// removed and reported as missing.
    pub async fn get(&self, token: &str) -> Option<Arc<Session>> {
        let now = Utc::now();
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.is_idle(now, self.idle_timeout) {
            self.sessions.write().await.remove(token);
            tracing::debug!(operator = %session.operator.username, "Session expired");
            return None;
        }
        session.touch(now);
        Some(session)
    }

    /// Returns whether a session was removed.
    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every session of an operator account. Returns how many were dropped.
    pub async fn revoke_operator(&self, operator_id: &str) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.operator.id != operator_id);
        before - sessions.len()
    }
}
