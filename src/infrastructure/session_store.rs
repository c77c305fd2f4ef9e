// ============================================================
// SESSION STORE
// ============================================================
// In-memory registry of per-session state. Each session owns its own
// Arc<Mutex<..>> so mutation serializes per session; the registry lock
// only guards the map itself and is held briefly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

struct SessionEntry<T> {
    state: Arc<Mutex<T>>,
    touched_at: Instant,
}

/// Keyed registry of independent session states
pub struct SessionStore<T> {
    sessions: Mutex<HashMap<String, SessionEntry<T>>>,
}

impl<T: Default> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the session's state handle, creating it on first use
    pub fn session(&self, session_id: &str) -> Arc<Mutex<T>> {
        let mut sessions = self.sessions.lock().unwrap();
        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                state: Arc::new(Mutex::new(T::default())),
                touched_at: Instant::now(),
            });
        entry.touched_at = Instant::now();
        Arc::clone(&entry.state)
    }

    /// Fetch an existing session's state handle without creating one.
    /// Read paths use this so unknown ids never grow the registry.
    pub fn get(&self, session_id: &str) -> Option<Arc<Mutex<T>>> {
        let mut sessions = self.sessions.lock().unwrap();
        let entry = sessions.get_mut(session_id)?;
        entry.touched_at = Instant::now();
        Some(Arc::clone(&entry.state))
    }

    /// Drop a session outright; true when it existed
    pub fn remove(&self, session_id: &str) -> bool {
        self.sessions.lock().unwrap().remove(session_id).is_some()
    }

    /// Drop sessions idle for longer than `max_age`; returns how many went
    pub fn purge_idle(&self, max_age: Duration) -> usize {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched_at.elapsed() <= max_age);
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, remaining = sessions.len(), "purged idle sessions");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Default> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_yields_the_same_state() {
        let store: SessionStore<Vec<u32>> = SessionStore::new();
        let first = store.session("alpha");
        first.lock().unwrap().push(7);

        let again = store.session("alpha");
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(*again.lock().unwrap(), vec![7]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let store: SessionStore<Vec<u32>> = SessionStore::new();
        store.session("alpha").lock().unwrap().push(1);
        store.session("beta").lock().unwrap().push(2);

        assert_eq!(*store.session("alpha").lock().unwrap(), vec![1]);
        assert_eq!(*store.session("beta").lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_purge_drops_only_idle_sessions() {
        let store: SessionStore<Vec<u32>> = SessionStore::new();
        store.session("alpha");
        store.session("beta");

        assert_eq!(store.purge_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 2);

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.purge_idle(Duration::ZERO), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_reports_presence() {
        let store: SessionStore<Vec<u32>> = SessionStore::new();
        store.session("alpha");
        assert!(store.remove("alpha"));
        assert!(!store.remove("alpha"));
    }

    #[test]
    fn test_get_never_creates_an_entry() {
        let store: SessionStore<Vec<u32>> = SessionStore::new();
        assert!(store.get("ghost").is_none());
        assert!(store.is_empty());

        store.session("alpha").lock().unwrap().push(1);
        let handle = store.get("alpha").unwrap();
        assert_eq!(*handle.lock().unwrap(), vec![1]);
        assert_eq!(store.len(), 1);
    }
}
