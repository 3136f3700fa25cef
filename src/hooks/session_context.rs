// ============================================================================
// APP CONTEXT - session store, gateway and navigator shared with every view
// ============================================================================
// Built once by <App>: rehydrate the store from localStorage, hook up
// persistence, then wire the gateway on top of the same store.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::components::notice::Notice;
use crate::config::CONFIG;
use crate::error::ApiError;
use crate::routing::{BrowserNavigator, Navigator};
use crate::services::{failure_message, ApiClient, AuthGateway, GlooTransport};
use crate::state::{SessionPersistence, SessionStore};
use crate::utils::BrowserStorage;

pub type Gateway = AuthGateway<GlooTransport>;
pub type Api = ApiClient<GlooTransport>;

#[derive(Clone)]
pub struct AppContext {
    pub store: SessionStore,
    pub gateway: Rc<Gateway>,
    pub api: Api,
    pub navigator: Rc<dyn Navigator>,
    pub notify: Callback<Notice>,
}

impl AppContext {
    pub fn bootstrap(notify: Callback<Notice>) -> Self {
        let store = SessionStore::new();

        let persistence = Rc::new(SessionPersistence::with_key(
            BrowserStorage::detect(),
            CONFIG.storage_key.clone(),
        ));
        if persistence.restore_into(&store) {
            log::info!("♻️ Session restored from {}", persistence.key());
        }
        persistence.attach(&store);

        let navigator: Rc<dyn Navigator> = Rc::new(BrowserNavigator);
        let transport = Rc::new(GlooTransport::new(CONFIG.api_base_url()));
        log::info!("🌐 API base URL: {}", transport.base_url());
        let gateway = Rc::new(AuthGateway::new(
            transport,
            store.clone(),
            Rc::clone(&navigator),
        ));

        Self {
            store,
            api: ApiClient::new(Rc::clone(&gateway)),
            gateway,
            navigator,
            notify,
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify.emit(Notice::success(text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify.emit(Notice::error(text));
    }

    /// Error notice for a failed API call, or the session-expired notice
    /// when the call ended the session.
    pub fn report_failure(&self, error: &ApiError, fallback: impl AsRef<str>) {
        let active = self.store.snapshot().is_authenticated();
        self.error(failure_message(error, active, fallback.as_ref()));
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.store.ptr_eq(&other.store)
            && Rc::ptr_eq(&self.gateway, &other.gateway)
            && self.notify == other.notify
    }
}

/// Context installed by `<App>`.
#[hook]
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext must be provided by <App>")
}
