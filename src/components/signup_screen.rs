use yew::prelude::*;

use crate::components::account_form::AccountForm;
use crate::components::link::Link;
use crate::hooks::use_app_context;
use crate::models::RegisterRequest;
use crate::routing::Route;
use crate::utils::REGISTRATION_FAILED_MESSAGE;

/// Checker self-registration.
#[function_component(SignupScreen)]
pub fn signup_screen() -> Html {
    let ctx = use_app_context();
    let busy = use_state(|| false);

    let on_submit = {
        let ctx = ctx.clone();
        let busy = busy.clone();
        Callback::from(move |account: RegisterRequest| {
            let ctx = ctx.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match ctx.api.register(&account).await {
                    Ok(_) => {
                        ctx.success("Account created successfully");
                        ctx.navigator.navigate(Route::Landing.path());
                    }
                    Err(e) => {
                        log::warn!("❌ Registration failed: {}", e);
                        ctx.error(e.message_from(&["message"], REGISTRATION_FAILED_MESSAGE));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="auth-screen">
            <header class="auth-header">
                <Link class="brand" to={Route::Landing}>{"CheckMate"}</Link>
                <Link class="btn-dark" to={Route::Login}>{"Login"}</Link>
            </header>
            <div class="auth-card">
                <AccountForm
                    title="Create your account"
                    submit_label="Sign Up"
                    busy={*busy}
                    {on_submit}
                />
            </div>
        </div>
    }
}
