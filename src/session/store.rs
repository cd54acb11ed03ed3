use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use super::session::UiSession;

/// Upper bound on sessions held in memory
const MAX_SESSIONS: u64 = 10_000;

/// Opaque id carried in the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept only ids this service could have issued
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(|id| Self(id.to_string()))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory sessions (session id → state), dropped after `idle` without use
#[derive(Clone)]
pub struct SessionStore {
    sessions: moka::future::Cache<SessionId, UiSession>,
    /// Serializes read-modify-write cycles
    writes: Arc<Mutex<()>>,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        let sessions = moka::future::CacheBuilder::new(MAX_SESSIONS)
            .time_to_idle(idle)
            .build();

        Self {
            sessions,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Snapshot of a session; unknown or expired ids yield a fresh session
    pub async fn get(&self, id: &SessionId) -> UiSession {
        self.sessions.get(id).await.unwrap_or_default()
    }

    /// Apply a synchronous change atomically with respect to other updates.
    ///
    /// The session is only stored when `f` actually changed it.
    pub async fn update<F, R>(&self, id: &SessionId, f: F) -> R
    where
        F: FnOnce(&mut UiSession) -> R,
    {
        let _guard = self.writes.lock().await;

        let mut session = self.sessions.get(id).await.unwrap_or_default();
        let before = session.clone();
        let out = f(&mut session);

        if session != before {
            self.sessions.insert(id.clone(), session).await;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl SessionStore {
        async fn stored(&self) -> u64 {
            self.sessions.run_pending_tasks().await;
            self.sessions.entry_count()
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(60))
    }

    #[test]
    fn session_id_rejects_foreign_values() {
        assert!(SessionId::parse("not-a-session").is_none());
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = store();
        let a = SessionId::generate();
        let b = SessionId::generate();

        store.update(&a, |s| s.apply_link("room-a")).await;
        store.update(&b, |s| s.create_room()).await;

        assert_eq!(store.get(&a).await.room.as_deref(), Some("room-a"));
        assert!(store.get(&a).await.room_from_link);
        assert!(!store.get(&b).await.room_from_link);
        assert_eq!(store.stored().await, 2);
    }

    #[tokio::test]
    async fn unknown_session_reads_as_empty() {
        let store = store();
        let id = SessionId::generate();
        assert_eq!(store.get(&id).await, UiSession::default());
        assert_eq!(store.stored().await, 0);
    }

    #[tokio::test]
    async fn untouched_sessions_are_not_stored() {
        let store = store();

        for _ in 0..500 {
            let id = SessionId::generate();
            let taken = store.update(&id, |s| s.egress_id.take()).await;
            assert!(taken.is_none());
        }

        assert_eq!(store.stored().await, 0);
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = SessionStore::new(Duration::from_millis(50));
        let id = SessionId::generate();
        store.update(&id, |s| s.apply_link("short-lived")).await;
        assert_eq!(store.get(&id).await.room.as_deref(), Some("short-lived"));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.get(&id).await, UiSession::default());
        assert_eq!(store.stored().await, 0);
    }
}
