use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::lookup::{AddressLookup, PendingLookup, Submission};
use crate::models::lookup::LookupResult;

pub const SESSION_COOKIE: &str = "lookup_session";
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Session {
    pub lookup: AddressLookup,
    pub last_seen: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            lookup: AddressLookup::new(),
            last_seen: Instant::now(),
        }
    }
}

/// One page controller per browser session, kept in memory only.
///
/// Map guards are only held inside these methods, never across an await.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::with_capacity(100),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Runs `f` against the session's controller, creating the session if needed.
    pub fn with_lookup<R>(&self, id: Uuid, f: impl FnOnce(&mut AddressLookup) -> R) -> R {
        let mut session = self.sessions.entry(id).or_default();
        session.last_seen = Instant::now();
        f(&mut session.lookup)
    }

    /// Copy of the session's controller for rendering. Unknown ids get a blank
    /// controller and are not inserted.
    pub fn snapshot(&self, id: Uuid) -> AddressLookup {
        match self.sessions.get_mut(&id) {
            Some(mut session) => {
                session.last_seen = Instant::now();
                session.lookup.clone()
            }
            None => AddressLookup::new(),
        }
    }

    #[tracing::instrument(skip(self, input))]
    pub fn begin_submit(&self, id: Uuid, input: String) -> Submission {
        self.with_lookup(id, |lookup| {
            lookup.set_input(input);
            lookup.begin_submit()
        })
    }

    /// Applies a finished lookup. A session that expired in the meantime is not recreated.
    pub fn complete(&self, id: Uuid, pending: PendingLookup, outcome: LookupResult) -> bool {
        match self.sessions.get_mut(&id) {
            Some(mut session) => session.lookup.complete(pending, outcome),
            None => {
                tracing::debug!("Session {id} is gone, dropping lookup result");
                false
            }
        }
    }

    pub fn reset(&self, id: Uuid) {
        self.with_lookup(id, AddressLookup::reset);
    }

    /// Drops sessions idle for longer than the TTL. Sessions with a lookup in flight are kept.
    pub fn sweep(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;

        self.sessions
            .retain(|_, session| session.lookup.is_loading() || session.last_seen.elapsed() < ttl);

        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            tracing::info!("Removed {removed} expired sessions");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(matches!(
            store.begin_submit(a, ADDRESS.to_string()),
            Submission::Pending(_)
        ));
        assert!(store.snapshot(a).is_loading());
        assert!(!store.snapshot(b).is_loading());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_complete_and_reset() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = Uuid::new_v4();

        let Submission::Pending(pending) = store.begin_submit(id, ADDRESS.to_string()) else {
            panic!("expected a pending lookup");
        };
        let outcome = LookupResult::Success {
            address: ADDRESS.to_string(),
            count: 5,
        };
        assert!(store.complete(id, pending, outcome.clone()));
        assert_eq!(store.snapshot(id).result(), Some(&outcome));

        store.reset(id);
        let lookup = store.snapshot(id);
        assert_eq!(lookup.input(), "");
        assert_eq!(lookup.result(), None);
    }

    #[test]
    fn test_sweep_keeps_loading_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        let idle = Uuid::new_v4();
        let busy = Uuid::new_v4();

        store.begin_submit(idle, String::new());
        store.begin_submit(busy, ADDRESS.to_string());

        assert_eq!(store.sweep(), 1);
        assert!(store.snapshot(busy).is_loading());
    }

    #[test]
    fn test_snapshot_does_not_create_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));

        for _ in 0..10 {
            assert_eq!(store.snapshot(Uuid::new_v4()), AddressLookup::new());
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_complete_on_missing_session() {
        let store = SessionStore::new(Duration::ZERO);
        let id = Uuid::new_v4();

        let Submission::Pending(pending) = store.begin_submit(id, ADDRESS.to_string()) else {
            panic!("expected a pending lookup");
        };
        store.reset(id);
        store.sweep();

        let outcome = LookupResult::Success {
            address: ADDRESS.to_string(),
            count: 5,
        };
        assert!(!store.complete(id, pending, outcome));
        assert!(store.is_empty());
    }
}
