//! Server-side table of live sessions.
//!
//! - `SessionsState`: a clonable, thread-safe handle on the table. It is created once in
//!   `main.rs` and shared with every worker through `AppState`.
//! - `SessionEntry`: who a session belongs to and when it stops being valid.
//! - `start_session_sweeper`: a long-running task that periodically drops expired
//!   entries so the table does not grow without bound.

use chrono::{DateTime, Duration, Utc};
use common::model::user::Identity;
use log::debug;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A thread-safe, shareable container for all live sessions.
#[derive(Clone)]
pub struct SessionsState {
    /// Session id (a random UUID carried in the signed cookie) to its entry.
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionsState {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Opens a session for `identity` and returns its id.
    pub async fn create(&self, identity: Identity) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let entry = SessionEntry {
            identity,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.write().await.insert(id.clone(), entry);
        id
    }

    /// The identity behind `id`, if the session exists and has not expired.
    /// An expired entry is removed on the way.
    pub async fn get(&self, id: &str) -> Option<Identity> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.identity.clone()),
                Some(_) => {}
            }
        }
        self.sessions.write().await.remove(id);
        None
    }

    pub async fn remove(&self, id: &str) -> Option<SessionEntry> {
        self.sessions.write().await.remove(id)
    }

    /// Drops every expired session and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Starts the expired-session sweeper.
///
/// This function should be spawned as a long-running background task (as seen in
/// `main.rs`). It wakes up every `every` and purges expired sessions.
pub async fn start_session_sweeper(state: SessionsState, every: std::time::Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let purged = state.purge_expired().await;
        if purged > 0 {
            debug!("purged {} expired sessions", purged);
        }
    }
}
