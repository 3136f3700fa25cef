// ============================================================================
// SESSION PERSISTENCE - mirrors the durable part of the session to storage
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::models::User;
use crate::state::reactivity::SubscriptionId;
use crate::state::session_state::SessionState;
use crate::state::session_store::SessionStore;
use crate::utils::constants::DEFAULT_STORAGE_KEY;
use crate::utils::storage::StorageBackend;

/// Bumped whenever the snapshot layout changes; older snapshots are dropped.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Durable subset of [`SessionState`]. `loading` and `error` are never
/// written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub version: u32,
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_maker: bool,
    pub is_checker: bool,
}

impl PersistedSnapshot {
    pub fn capture(state: &SessionState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            user: state.user().cloned(),
            is_authenticated: state.is_authenticated(),
            is_maker: state.is_maker(),
            is_checker: state.is_checker(),
        }
    }

    /// `None` for a foreign version or fields that contradict each other.
    pub fn into_state(self) -> Option<SessionState> {
        if self.version != SNAPSHOT_VERSION {
            return None;
        }
        SessionState::from_persisted(
            self.user,
            self.is_authenticated,
            self.is_maker,
            self.is_checker,
        )
    }
}

/// Reads the snapshot once at startup and rewrites it after every store
/// transition that changes it. Storage failures are logged and swallowed.
pub struct SessionPersistence<B: StorageBackend> {
    backend: B,
    key: String,
    last_written: RefCell<Option<PersistedSnapshot>>,
}

impl<B: StorageBackend + 'static> SessionPersistence<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            last_written: RefCell::new(None),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn rehydrate(&self) -> Option<SessionState> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("could not read persisted session: {}", e);
                return None;
            }
        };
        let snapshot: PersistedSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("ignoring malformed persisted session: {}", e);
                return None;
            }
        };
        let version = snapshot.version;
        match snapshot.clone().into_state() {
            Some(state) => {
                *self.last_written.borrow_mut() = Some(snapshot);
                Some(state)
            }
            None => {
                log::warn!(
                    "ignoring persisted session (version {}, expected {}) that failed validation",
                    version,
                    SNAPSHOT_VERSION
                );
                None
            }
        }
    }

    /// Rehydrates `store` if a valid snapshot exists. Must run before the
    /// first route decision.
    pub fn restore_into(&self, store: &SessionStore) -> bool {
        match self.rehydrate() {
            Some(state) => {
                log::info!(
                    "restored persisted session (authenticated: {})",
                    state.is_authenticated()
                );
                store.hydrate(state);
                true
            }
            None => false,
        }
    }

    /// Writes the durable fields of `state` unless they are unchanged.
    /// Returns whether a write happened.
    pub fn try_persist(&self, state: &SessionState) -> Result<bool, StorageError> {
        let snapshot = PersistedSnapshot::capture(state);
        if self.last_written.borrow().as_ref() == Some(&snapshot) {
            return Ok(false);
        }
        let json = serde_json::to_string(&snapshot)?;
        self.backend.set_item(&self.key, &json)?;
        *self.last_written.borrow_mut() = Some(snapshot);
        Ok(true)
    }

    pub fn persist(&self, state: &SessionState) {
        if let Err(e) = self.try_persist(state) {
            log::warn!("could not persist session: {}", e);
        }
    }

    /// Mirrors every subsequent transition of `store`.
    pub fn attach(self: &Rc<Self>, store: &SessionStore) -> SubscriptionId {
        let persistence = Rc::clone(self);
        store.subscribe(move |state| persistence.persist(state))
    }

    pub fn clear(&self) {
        *self.last_written.borrow_mut() = None;
        if let Err(e) = self.backend.remove_item(&self.key) {
            log::warn!("could not clear persisted session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session_state::tests::{logged_in, user};
    use crate::state::session_state::SessionEvent;
    use crate::utils::storage::MemoryBackend;
    use std::cell::Cell;

    struct BrokenBackend {
        writes: Cell<usize>,
    }

    impl StorageBackend for BrokenBackend {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.writes.set(self.writes.get() + 1);
            Err(StorageError::Backend("QuotaExceededError".into()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn round_trip_keeps_durable_fields_only() {
        let backend = MemoryBackend::new();
        let persistence = SessionPersistence::new(backend.clone());

        let mut state = logged_in(true, false);
        state.apply(SessionEvent::BeginLogout);
        state.apply(SessionEvent::LoginFailed("boom".into()));
        persistence.persist(&state);

        let restored = SessionPersistence::new(backend).rehydrate().unwrap();
        assert_eq!(restored.user(), state.user());
        assert_eq!(restored.is_authenticated(), state.is_authenticated());
        assert_eq!(restored.is_maker(), state.is_maker());
        assert_eq!(restored.is_checker(), state.is_checker());
        assert!(!restored.loading());
        assert_eq!(restored.error(), None);
    }

    #[test]
    fn written_json_has_no_transient_fields() {
        let backend = MemoryBackend::new();
        let persistence = SessionPersistence::new(backend.clone());
        let mut state = logged_in(false, true);
        state.apply(SessionEvent::BeginLogin);
        persistence.persist(&state);

        let raw = backend.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("loading").is_none());
        assert!(value.get("error").is_none());
        assert_eq!(value["version"], SNAPSHOT_VERSION);
    }

    #[test]
    fn absent_or_malformed_data_leaves_default() {
        let backend = MemoryBackend::new();
        let persistence = SessionPersistence::new(backend.clone());
        assert!(persistence.rehydrate().is_none());

        backend.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = SessionStore::new();
        assert!(!persistence.restore_into(&store));
        assert_eq!(store.snapshot(), SessionState::default());
    }

    #[test]
    fn other_versions_are_discarded() {
        let backend = MemoryBackend::new();
        let mut snapshot = PersistedSnapshot::capture(&logged_in(true, false));
        snapshot.version = SNAPSHOT_VERSION + 1;
        backend
            .set_item(DEFAULT_STORAGE_KEY, &serde_json::to_string(&snapshot).unwrap())
            .unwrap();
        assert!(SessionPersistence::new(backend).rehydrate().is_none());
    }

    #[test]
    fn unversioned_snapshots_are_discarded() {
        let backend = MemoryBackend::new();
        backend
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"{"user":null,"isAuthenticated":true,"isMaker":false,"isChecker":false}"#,
            )
            .unwrap();
        assert!(SessionPersistence::new(backend).rehydrate().is_none());
    }

    #[test]
    fn contradictory_snapshots_are_discarded() {
        let backend = MemoryBackend::new();
        let snapshot = PersistedSnapshot {
            version: SNAPSHOT_VERSION,
            user: Some(user(true, false)),
            is_authenticated: true,
            is_maker: false,
            is_checker: true,
        };
        backend
            .set_item(DEFAULT_STORAGE_KEY, &serde_json::to_string(&snapshot).unwrap())
            .unwrap();
        assert!(SessionPersistence::new(backend).rehydrate().is_none());
    }

    #[test]
    fn attached_persistence_follows_the_store() {
        let backend = MemoryBackend::new();
        let persistence = Rc::new(SessionPersistence::new(backend.clone()));
        let store = SessionStore::new();
        persistence.attach(&store);

        let attempt = store.begin_login();
        store.login_succeeded(attempt, user(false, true));

        let reloaded = SessionStore::new();
        assert!(SessionPersistence::new(backend.clone()).restore_into(&reloaded));
        assert!(reloaded.read(|s| s.is_authenticated() && s.is_checker()));

        let attempt = store.begin_logout();
        store.logout_completed(attempt);
        let reloaded = SessionStore::new();
        SessionPersistence::new(backend).restore_into(&reloaded);
        assert_eq!(reloaded.snapshot(), SessionState::default());
    }

    #[test]
    fn unchanged_durable_fields_skip_the_write() {
        let persistence = SessionPersistence::new(MemoryBackend::new());
        let mut state = logged_in(true, false);
        assert!(persistence.try_persist(&state).unwrap());
        state.apply(SessionEvent::BeginLogout);
        assert!(!persistence.try_persist(&state).unwrap());
    }

    #[test]
    fn storage_failures_do_not_break_the_store() {
        let persistence = Rc::new(SessionPersistence::new(BrokenBackend {
            writes: Cell::new(0),
        }));
        let store = SessionStore::new();
        assert!(!persistence.restore_into(&store));
        persistence.attach(&store);

        let attempt = store.begin_login();
        assert!(store.login_succeeded(attempt, user(true, false)));
        assert!(store.read(|s| s.is_authenticated()));
        assert!(persistence.backend().writes.get() >= 1);
        persistence.clear();
    }
}
