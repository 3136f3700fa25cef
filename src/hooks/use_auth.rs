use yew::prelude::*;

use crate::error::ApiError;
use crate::hooks::session_context::use_app_context;
use crate::hooks::use_session_state::use_session_state;
use crate::models::{LoginRequest, Role};
use crate::routing::Route;
use crate::services::login_error_message;
use crate::state::SessionState;

pub struct UseAuthHandle {
    pub session: SessionState,
    pub login: Callback<LoginRequest>,
    pub logout: Callback<()>,
}

#[hook]
pub fn use_auth() -> UseAuthHandle {
    let ctx = use_app_context();
    let session = use_session_state(&ctx.store);

    // Login callback
    let login = {
        let ctx = ctx.clone();
        Callback::from(move |credentials: LoginRequest| {
            let ctx = ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ctx.gateway.login(&credentials).await {
                    Ok(user) => match user.role() {
                        Some(role) => {
                            let label = match role {
                                Role::Checker => "Checker",
                                Role::Maker => "Maker",
                            };
                            ctx.success(format!("{} login successful", label));
                            ctx.navigator.navigate(Route::home_of(role).path());
                        }
                        None => ctx.error("Invalid user type"),
                    },
                    // A newer login or logout owns the session now.
                    Err(ApiError::Superseded) => {}
                    Err(e) => ctx.error(login_error_message(&e)),
                }
            });
        })
    };

    // Logout callback
    let logout = {
        let ctx = ctx.clone();
        Callback::from(move |_| {
            let ctx = ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ctx.gateway.logout().await {
                    Ok(_) => ctx.success("Logged out successfully"),
                    Err(ApiError::Superseded) => return,
                    Err(_) => ctx.error("Failed to logout"),
                }
                ctx.navigator.navigate(Route::Landing.path());
            });
        })
    };

    UseAuthHandle {
        session,
        login,
        logout,
    }
}
