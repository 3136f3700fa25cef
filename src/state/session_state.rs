// ============================================================================
// SESSION STATE - who is logged in and with which roles
// ============================================================================

use crate::models::{Role, User};

/// Transition applied to [`SessionState`]. The store is the only caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    BeginLogin,
    LoginSucceeded(User),
    LoginFailed(String),
    BeginLogout,
    LogoutCompleted,
}

/// Authentication state of the browser session.
///
/// Fields are private: the role flags only ever change together with `user`
/// inside [`SessionState::apply`], or when a validated snapshot is restored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    is_authenticated: bool,
    is_maker: bool,
    is_checker: bool,
    loading: bool,
    error: Option<String>,
}

impl SessionState {
    /// Logged-out default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the durable part of a state. Returns `None` when the parts
    /// break the invariants checked by [`SessionState::is_consistent`].
    pub(crate) fn from_persisted(
        user: Option<User>,
        is_authenticated: bool,
        is_maker: bool,
        is_checker: bool,
    ) -> Option<Self> {
        let state = Self {
            user,
            is_authenticated,
            is_maker,
            is_checker,
            loading: false,
            error: None,
        };
        state.is_consistent().then_some(state)
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::BeginLogin => {
                self.loading = true;
                self.error = None;
            }
            SessionEvent::LoginSucceeded(user) => {
                *self = Self {
                    is_authenticated: true,
                    is_maker: user.is_maker,
                    is_checker: user.is_checker,
                    user: Some(user),
                    loading: false,
                    error: None,
                };
            }
            SessionEvent::LoginFailed(message) => {
                // A previous user, if any, stays; only authentication drops.
                self.loading = false;
                self.error = Some(message);
                self.is_authenticated = false;
            }
            SessionEvent::BeginLogout => {
                self.loading = true;
            }
            SessionEvent::LogoutCompleted => {
                *self = Self::default();
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_maker(&self) -> bool {
        self.is_maker
    }

    pub fn is_checker(&self) -> bool {
        self.is_checker
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Maker => self.is_maker,
            Role::Checker => self.is_checker,
        }
    }

    /// Canonical role of an authenticated session.
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated {
            return None;
        }
        Role::from_flags(self.is_maker, self.is_checker)
    }

    /// `is_authenticated` needs a user, and the role flags mirror that user
    /// (or are both off when there is none).
    pub fn is_consistent(&self) -> bool {
        match &self.user {
            Some(user) => self.is_maker == user.is_maker && self.is_checker == user.is_checker,
            None => !self.is_authenticated && !self.is_maker && !self.is_checker,
        }
    }

    /// Copy without the transient fields.
    pub(crate) fn without_transient(&self) -> Self {
        Self {
            loading: false,
            error: None,
            ..self.clone()
        }
    }
}
