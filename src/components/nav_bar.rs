use yew::prelude::*;

use crate::components::link::Link;
use crate::hooks::use_auth;
use crate::routing::Route;

#[derive(Clone, PartialEq)]
pub struct NavTab {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    #[prop_or_default]
    pub tabs: Vec<NavTab>,
    #[prop_or_default]
    pub active: Option<&'static str>,
    #[prop_or_default]
    pub on_select: Callback<&'static str>,
}

/// Header of the role home views: tabs plus the logout button.
#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let auth = use_auth();
    let email = auth
        .session
        .user()
        .map(|user| user.email.clone())
        .unwrap_or_default();

    html! {
        <header class="nav-bar">
            <nav>
                <Link class="brand" to={Route::Landing}>{"CheckMate"}</Link>
                <div class="nav-actions">
                    { for props.tabs.iter().map(|tab| {
                        let key = tab.key;
                        let class = if props.active == Some(key) { "tab active" } else { "tab" };
                        html! {
                            <button class={class} onclick={props.on_select.reform(move |_| key)}>
                                {tab.label}
                            </button>
                        }
                    }) }
                    <span class="nav-user">{email}</span>
                    <button
                        class="tab"
                        disabled={auth.session.loading()}
                        onclick={auth.logout.reform(|_| ())}
                    >
                        {"Logout"}
                    </button>
                </div>
            </nav>
        </header>
    }
}
