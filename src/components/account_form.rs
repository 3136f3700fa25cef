use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::RegisterRequest;
use crate::utils::{validate_email, validate_new_password};

#[derive(Properties, PartialEq)]
pub struct AccountFormProps {
    pub title: AttrValue,
    pub submit_label: AttrValue,
    pub busy: bool,
    pub on_submit: Callback<RegisterRequest>,
}

/// Email, then password and confirmation. Emits only validated input.
#[function_component(AccountForm)]
pub fn account_form(props: &AccountFormProps) -> Html {
    let email = use_state(String::new);
    let show_passwords = use_state(|| false);
    let local_error = use_state(|| None::<String>);
    let password_ref = use_node_ref();
    let repeat_ref = use_node_ref();

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_email_submit = {
        let email = email.clone();
        let show_passwords = show_passwords.clone();
        let local_error = local_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_email(&email) {
                Ok(()) => {
                    show_passwords.set(true);
                    local_error.set(None);
                }
                Err(err) => local_error.set(Some(err.to_string())),
            }
        })
    };

    let on_back = {
        let show_passwords = show_passwords.clone();
        let local_error = local_error.clone();
        Callback::from(move |_: MouseEvent| {
            show_passwords.set(false);
            local_error.set(None);
        })
    };

    let on_password_submit = {
        let email = email.clone();
        let local_error = local_error.clone();
        let password_ref = password_ref.clone();
        let repeat_ref = repeat_ref.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some(password), Some(repeat)) = (
                password_ref.cast::<HtmlInputElement>(),
                repeat_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };
            let (password, repeat) = (password.value(), repeat.value());
            if let Err(err) = validate_new_password(&password, &repeat) {
                local_error.set(Some(err.to_string()));
                return;
            }
            local_error.set(None);
            on_submit.emit(RegisterRequest {
                email: email.trim().to_string(),
                password,
            });
        })
    };

    html! {
        <div class="account-form">
            if *show_passwords {
                <button type="button" class="btn-back" onclick={on_back}>{"‹ Back"}</button>
            }
            <h1>{props.title.clone()}</h1>

            if let Some(error) = (*local_error).clone() {
                <p class="form-error">{error}</p>
            }

            if !*show_passwords {
                <form class="auth-form" onsubmit={on_email_submit}>
                    <input
                        type="email"
                        placeholder="Enter email address"
                        value={(*email).clone()}
                        oninput={on_email_input}
                        required=true
                    />
                    <button type="submit" class="btn-dark">{"Next"}</button>
                </form>
            } else {
                <p class="auth-email">{(*email).clone()}</p>
                <form class="auth-form" onsubmit={on_password_submit}>
                    <input type="password" placeholder="Password" ref={password_ref} required=true />
                    <input type="password" placeholder="Repeat password" ref={repeat_ref} required=true />
                    <button type="submit" class="btn-dark" disabled={props.busy}>
                        { if props.busy { "Creating account..." } else { props.submit_label.as_str() } }
                    </button>
                </form>
            }
        </div>
    }
}
