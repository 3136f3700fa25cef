use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::link::Link;
use crate::hooks::{use_app_context, use_auth};
use crate::models::LoginRequest;
use crate::routing::Route;
use crate::utils::validate_email;

/// Two steps: the email first, then the password.
#[function_component(LoginScreen)]
pub fn login_screen() -> Html {
    let ctx = use_app_context();
    let auth = use_auth();
    let email = use_state(String::new);
    let show_password = use_state(|| false);
    let local_error = use_state(|| None::<String>);
    let password_ref = use_node_ref();

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_email_submit = {
        let email = email.clone();
        let show_password = show_password.clone();
        let local_error = local_error.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_email(&email) {
                Ok(()) => {
                    show_password.set(true);
                    local_error.set(None);
                }
                Err(err) => {
                    ctx.error(err.to_string());
                    local_error.set(Some(err.to_string()));
                }
            }
        })
    };

    let on_back = {
        let show_password = show_password.clone();
        let local_error = local_error.clone();
        Callback::from(move |_: MouseEvent| {
            show_password.set(false);
            local_error.set(None);
        })
    };

    let on_login = {
        let email = email.clone();
        let password_ref = password_ref.clone();
        let login = auth.login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(input) = password_ref.cast::<HtmlInputElement>() {
                login.emit(LoginRequest {
                    email: email.trim().to_string(),
                    password: input.value(),
                });
            }
        })
    };

    let loading = auth.session.loading();
    let error = (*local_error)
        .clone()
        .or_else(|| auth.session.error().map(str::to_string));

    html! {
        <div class="auth-screen">
            <header class="auth-header">
                <Link class="brand" to={Route::Landing}>{"CheckMate"}</Link>
                <Link class="btn-dark" to={Route::Signup}>{"Sign Up"}</Link>
            </header>

            <div class="auth-card">
                if *show_password {
                    <button type="button" class="btn-back" onclick={on_back}>{"‹ Back"}</button>
                }
                <h1>{"Login to your account"}</h1>

                if let Some(error) = error {
                    <p class="form-error">{error}</p>
                }

                if !*show_password {
                    <form class="auth-form" onsubmit={on_email_submit}>
                        <input
                            type="email"
                            placeholder="Enter your email address"
                            value={(*email).clone()}
                            oninput={on_email_input}
                            required=true
                        />
                        <button type="submit" class="btn-dark">{"Next"}</button>
                    </form>
                } else {
                    <p class="auth-email">{(*email).clone()}</p>
                    <form class="auth-form" onsubmit={on_login}>
                        <input
                            type="password"
                            placeholder="Enter your password"
                            ref={password_ref}
                            required=true
                        />
                        <button type="submit" class="btn-dark" disabled={loading}>
                            { if loading { "Logging in..." } else { "Login" } }
                        </button>
                    </form>
                }
            </div>
        </div>
    }
}
