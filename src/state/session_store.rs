// ============================================================================
// SESSION STORE - shared, injectable owner of the SessionState
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::User;
use crate::state::reactivity::{Subscribers, SubscriptionId};
use crate::state::session_state::{SessionEvent, SessionState};

/// Identifies one login or logout attempt. Completions carrying an id older
/// than the latest started attempt are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

struct StoreInner {
    state: RefCell<SessionState>,
    generation: Cell<u64>,
    subscribers: Subscribers<SessionState>,
}

/// Handle to the session state. Clones share the same state.
///
/// Each transition is applied under a single mutable borrow and subscribers
/// run after it is released, so readers only ever see whole transitions.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<StoreInner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    pub fn with_state(state: SessionState) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(state),
                generation: Cell::new(0),
                subscribers: Subscribers::new(),
            }),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn ptr_eq(&self, other: &SessionStore) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Loads a restored state directly, without going through the login
    /// transitions. Transient fields are dropped.
    pub fn hydrate(&self, state: SessionState) {
        log::debug!(
            "session hydrated (authenticated: {})",
            state.is_authenticated()
        );
        self.replace(state.without_transient());
    }

    pub fn begin_login(&self) -> AttemptId {
        let attempt = self.next_attempt();
        self.dispatch(SessionEvent::BeginLogin);
        attempt
    }

    pub fn login_succeeded(&self, attempt: AttemptId, user: User) -> bool {
        self.complete(attempt, SessionEvent::LoginSucceeded(user))
    }

    pub fn login_failed(&self, attempt: AttemptId, message: impl Into<String>) -> bool {
        self.complete(attempt, SessionEvent::LoginFailed(message.into()))
    }

    pub fn begin_logout(&self) -> AttemptId {
        let attempt = self.next_attempt();
        self.dispatch(SessionEvent::BeginLogout);
        attempt
    }

    pub fn logout_completed(&self, attempt: AttemptId) -> bool {
        self.complete(attempt, SessionEvent::LogoutCompleted)
    }

    /// Ends the session unconditionally (the refresh token was rejected).
    /// Every attempt still in flight becomes stale.
    pub fn expire_session(&self) {
        self.next_attempt();
        self.dispatch(SessionEvent::LogoutCompleted);
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + 'static,
    {
        self.inner.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.subscribers.unsubscribe(id)
    }

    fn next_attempt(&self) -> AttemptId {
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        AttemptId(generation)
    }

    fn complete(&self, attempt: AttemptId, event: SessionEvent) -> bool {
        let current = self.inner.generation.get();
        if attempt.0 != current {
            log::debug!(
                "discarding stale {} (attempt {} superseded by {})",
                event_name(&event),
                attempt.0,
                current
            );
            return false;
        }
        self.dispatch(event);
        true
    }

    fn dispatch(&self, event: SessionEvent) {
        log::debug!("session transition: {}", event_name(&event));
        let next = {
            let mut state = self.inner.state.borrow_mut();
            state.apply(event);
            state.clone()
        };
        self.inner.subscribers.notify(&next);
    }

    fn replace(&self, state: SessionState) {
        *self.inner.state.borrow_mut() = state.clone();
        self.inner.subscribers.notify(&state);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::BeginLogin => "begin_login",
        SessionEvent::LoginSucceeded(_) => "login_succeeded",
        SessionEvent::LoginFailed(_) => "login_failed",
        SessionEvent::BeginLogout => "begin_logout",
        SessionEvent::LogoutCompleted => "logout_completed",
    }
}
