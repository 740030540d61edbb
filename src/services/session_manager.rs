// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::provider::Turn;

/// Longest caller-supplied session id we are willing to key on.
pub const MAX_SESSION_ID_LEN: usize = 128;

#[derive(Clone, Debug)]
pub struct ChatSession {
    pub id: String,
    pub history: Vec<Turn>,
    pub last_active: Instant,
}

impl ChatSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), history: Vec::new(), last_active: Instant::now() }
    }

    /// Record one completed exchange and touch `last_active`.
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.history.push(Turn::user(question));
        self.history.push(Turn::model(answer));
        self.last_active = Instant::now();
    }
}

/// A session shared between the manager and an in-flight request. Holding
/// the lock serializes turns within one conversation.
pub type SessionHandle = Arc<Mutex<ChatSession>>;

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, SessionHandle>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // Create a fresh session and return its id with the handle.
    pub async fn create_session(&self) -> (String, SessionHandle) {
        let (id, handle) = self.detached_session();

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), handle.clone());
        (id, handle)
    }

    // A fresh session the manager does not track until `keep` is called.
    pub fn detached_session(&self) -> (String, SessionHandle) {
        let id = Uuid::new_v4().to_string();
        let handle = Arc::new(Mutex::new(ChatSession::new(id.clone())));
        (id, handle)
    }

    /// Start tracking `handle` under `id` unless that id is already taken.
    pub async fn keep(&self, id: &str, handle: &SessionHandle) {
        let mut guard = self.inner.write().await;
        guard.entry(id.to_string()).or_insert_with(|| handle.clone());
    }

    // Get the session with this id, creating it if needed.
    pub async fn ensure_session(&self, id: &str) -> SessionHandle {
        {
            let guard = self.inner.read().await;
            if let Some(handle) = guard.get(id) {
                return handle.clone();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ChatSession::new(id))))
            .clone()
    }

    /// Resolve the caller's session: reuse a usable id, otherwise mint a
    /// detached one. Minted sessions are only tracked once `keep` is called,
    /// so a failed first turn leaves nothing behind.
    pub async fn resolve(&self, requested: Option<&str>) -> (String, SessionHandle) {
        match requested.map(str::trim) {
            Some(id) if !id.is_empty() && id.len() <= MAX_SESSION_ID_LEN => {
                let handle = self.ensure_session(id).await;
                (id.to_string(), handle)
            }
            _ => self.detached_session(),
        }
    }

    /// Get a copy of the session history
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<Turn>> {
        let handle = {
            let guard = self.inner.read().await;
            guard.get(session_id).cloned()
        }?;
        let session = handle.lock().await;
        Some(session.history.clone())
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Sessions with a turn in flight
    /// are kept. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, handle| match handle.try_lock() {
            Ok(session) => now.duration_since(session.last_active) < self.ttl,
            Err(_) => true,
        });
        before - guard.len()
    }

    /// Purge expired sessions every `every` until the runtime shuts down.
    pub fn spawn_purge_task(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = manager.purge_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "purged expired chat sessions");
                }
            }
        })
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
