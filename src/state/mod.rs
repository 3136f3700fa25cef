// ============================================================================
// STATE MODULE - session state, its store, and its persistence
// ============================================================================

pub mod persistence;
pub mod reactivity;
pub mod session_state;
pub mod session_store;

pub use persistence::{PersistedSnapshot, SessionPersistence, SNAPSHOT_VERSION};
pub use reactivity::{Subscribers, SubscriptionId};
pub use session_state::{SessionEvent, SessionState};
pub use session_store::{AttemptId, SessionStore};
