// ============================================================================
// AUTH GATEWAY - every API call, plus login/logout
// ============================================================================
// A 401 whose detail is "Token expired" triggers one refresh-token call and
// one replay of the original request. Concurrent expiries share a single
// refresh. When the refresh itself fails the session is expired and the user
// is sent to the login view.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, LogoutResponse, User};
use crate::routing::{Navigator, Route};
use crate::services::transport::{ApiRequest, ApiResponse, HttpTransport};
use crate::state::SessionStore;
use crate::utils::constants::{
    LOGIN_ENDPOINT, LOGIN_FAILED_MESSAGE, LOGOUT_ENDPOINT, REFRESH_ENDPOINT,
    SESSION_EXPIRED_MESSAGE,
};

type RefreshFuture = Shared<LocalBoxFuture<'static, Result<(), ApiError>>>;

struct InFlightRefresh {
    id: u64,
    future: RefreshFuture,
}

pub struct AuthGateway<T: HttpTransport> {
    transport: Rc<T>,
    store: SessionStore,
    navigator: Rc<dyn Navigator>,
    pending_refresh: RefCell<Option<InFlightRefresh>>,
    next_refresh_id: Cell<u64>,
}

impl<T: HttpTransport + 'static> AuthGateway<T> {
    pub fn new(transport: Rc<T>, store: SessionStore, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            transport,
            store,
            navigator,
            pending_refresh: RefCell::new(None),
            next_refresh_id: Cell::new(0),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request`, refreshing the credentials and replaying it once if
    /// the access token expired. Non-2xx answers are returned as
    /// [`ApiError::Http`].
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.send(&request).await?;
        if request.is_retried() || !response.is_token_expired() {
            return response.into_success();
        }

        let mut replay = request;
        replay.mark_retried();
        log::info!(
            "🔄 Access token expired on {} {}, refreshing",
            replay.method.as_str(),
            replay.path
        );
        self.refresh().await?;

        log::debug!("🔁 Replaying {} {}", replay.method.as_str(), replay.path);
        self.transport.send(&replay).await?.into_success()
    }

    /// [`AuthGateway::execute`] and decode the JSON body.
    pub async fn execute_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.execute(request).await?.json()
    }

    /// Logs in and records the outcome in the session store. An attempt
    /// overtaken by a newer login or logout leaves the store untouched and
    /// yields [`ApiError::Superseded`].
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let attempt = self.store.begin_login();
        log::info!("🔐 Logging in {}", credentials.email);

        let result = match ApiRequest::post(LOGIN_ENDPOINT).json(credentials) {
            Ok(request) => self
                .execute_json::<LoginResponse>(request)
                .await
                .map(|response| response.user),
            Err(e) => Err(e),
        };

        let applied = match &result {
            Ok(user) => self.store.login_succeeded(attempt, user.clone()),
            Err(e) => self.store.login_failed(attempt, login_error_message(e)),
        };
        if !applied {
            log::debug!("⏭️ Login for {} was superseded", credentials.email);
            return Err(ApiError::Superseded);
        }
        match &result {
            Ok(user) => log::info!("✅ Logged in as {} ({:?})", user.email, user.role()),
            Err(e) => log::warn!("❌ Login failed: {}", e),
        }
        result
    }

    /// Logs out. The local session is reset whatever the server answers; a
    /// remote failure is still reported to the caller. A logout overtaken by
    /// a newer login yields [`ApiError::Superseded`].
    pub async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        let attempt = self.store.begin_logout();
        let result = match self.execute(ApiRequest::post(LOGOUT_ENDPOINT)).await {
            Ok(response) => response.json_or_default::<LogoutResponse>(),
            Err(e) => Err(e),
        };
        if !self.store.logout_completed(attempt) {
            log::debug!("⏭️ Logout was superseded");
            return Err(ApiError::Superseded);
        }
        match &result {
            Ok(_) => log::info!("👋 Logged out"),
            Err(e) => log::warn!("⚠️ Logout request failed, cleared the session anyway: {}", e),
        }
        result
    }

    /// Runs the refresh call, joining one already in flight. The first
    /// caller to observe a finished refresh clears the slot and, on failure,
    /// expires the session.
    async fn refresh(&self) -> Result<(), ApiError> {
        let (id, future) = self.refresh_future();
        let result = future.await;

        let settled_here = {
            let mut slot = self.pending_refresh.borrow_mut();
            match slot.as_ref() {
                Some(in_flight) if in_flight.id == id => {
                    *slot = None;
                    true
                }
                _ => false,
            }
        };

        if settled_here {
            match &result {
                Ok(()) => log::info!("✅ Credentials refreshed"),
                Err(e) => {
                    log::warn!("🔒 Refresh failed, ending the session: {}", e);
                    self.store.expire_session();
                    self.navigator.navigate(Route::Login.path());
                }
            }
        }
        result
    }

    fn refresh_future(&self) -> (u64, RefreshFuture) {
        let mut slot = self.pending_refresh.borrow_mut();
        if let Some(in_flight) = slot.as_ref() {
            log::debug!("joining refresh #{}", in_flight.id);
            return (in_flight.id, in_flight.future.clone());
        }

        let id = self.next_refresh_id.get() + 1;
        self.next_refresh_id.set(id);
        let transport = Rc::clone(&self.transport);
        let future = async move {
            let request = ApiRequest::post(REFRESH_ENDPOINT);
            transport.send(&request).await?.into_success().map(|_| ())
        }
        .boxed_local()
        .shared();

        *slot = Some(InFlightRefresh {
            id,
            future: future.clone(),
        });
        (id, future)
    }
}

/// Text stored in the session after a failed login: the server's
/// `message`, `error` or `detail`, else a generic hint.
pub fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Http { .. } => error.user_message(LOGIN_FAILED_MESSAGE),
        ApiError::Network(_) => error.to_string(),
        _ => LOGIN_FAILED_MESSAGE.to_string(),
    }
}

/// Notice text for a failed API call. A 401 that left the session logged
/// out means the refresh failed too, so the user is told the session ended.
pub fn failure_message(error: &ApiError, session_active: bool, fallback: &str) -> String {
    match error.status() {
        Some(401) if !session_active => SESSION_EXPIRED_MESSAGE.to_string(),
        _ => fallback.to_string(),
    }
}
