use recipace_core::{LlmProvider, ParameterSet, Session};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Idle time after which a session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

pub struct AppContext {
    pub params: Arc<ParameterSet>,
    pub provider: Arc<dyn LlmProvider>,
    pub sessions: SessionStore,
}

impl AppContext {
    pub fn new(
        params: ParameterSet,
        provider: Arc<dyn LlmProvider>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            params: Arc::new(params),
            provider,
            sessions: SessionStore::new(session_ttl),
        }
    }
}

struct Entry {
    session: Arc<Mutex<Session>>,
    last_used: Instant,
}

/// In-memory sessions keyed by id.
///
/// Each session sits behind its own async mutex, so actions on one session
/// run one at a time while different sessions proceed independently.
/// Sessions idle for longer than the TTL are dropped: lazily on lookup and
/// in bulk whenever a new session is created.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self, params: Arc<ParameterSet>) -> (Uuid, Arc<Mutex<Session>>) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(params)));
        let now = Instant::now();

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_used) < self.ttl);
        let expired = before - sessions.len();

        sessions.insert(
            id,
            Entry {
                session: session.clone(),
                last_used: now,
            },
        );

        tracing::info!(
            session_id = %id,
            active = sessions.len(),
            expired,
            "Session created"
        );
        (id, session)
    }

    /// Look up a live session and mark it as used.
    pub fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = sessions.get_mut(&id)?;
        if now.duration_since(entry.last_used) >= self.ttl {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Session expired");
            return None;
        }

        entry.last_used = now;
        Some(entry.session.clone())
    }

    /// Drop a session. Returns false if it did not exist.
    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id)
            .is_some();

        if removed {
            tracing::info!(session_id = %id, "Session deleted");
        }
        removed
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Arc<ParameterSet> {
        Arc::new(ParameterSet::from_json(r#"{"Cuisine": ["None", "Thai"]}"#).unwrap())
    }

    #[test]
    fn test_get_and_remove() {
        let store = SessionStore::new(DEFAULT_SESSION_TTL);
        let (id, _) = store.create(params());

        assert!(store.get(id).is_some());
        assert!(store.remove(id));
        assert!(store.get(id).is_none());
        assert!(!store.remove(id));
    }

    #[test]
    fn test_idle_sessions_expire() {
        let store = SessionStore::new(Duration::ZERO);
        let (first, _) = store.create(params());

        assert!(store.get(first).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_create_prunes_expired_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        store.create(params());
        store.create(params());
        store.create(params());

        assert_eq!(store.len(), 1);
    }
}
