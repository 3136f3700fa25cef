pub mod session_context;
pub mod use_auth;
pub mod use_location;
pub mod use_session_state;

pub use session_context::{use_app_context, Api, AppContext, Gateway};
pub use use_auth::{use_auth, UseAuthHandle};
pub use use_location::use_location;
pub use use_session_state::use_session_state;
