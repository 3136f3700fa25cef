// ============================================================================
// APP - bootstrap, context and guarded routing
// ============================================================================

use yew::prelude::*;

use super::{CheckerHome, LoginScreen, MakerHome, NoticeBanner, SignupScreen};
use crate::components::notice::Notice;
use crate::hooks::{use_app_context, use_location, use_session_state, AppContext};
use crate::routing::{GuardDecision, Route, RouteTable};

#[function_component(App)]
pub fn app() -> Html {
    let notice = use_state(|| None::<Notice>);

    // Built once; the store is rehydrated before the first guard decision
    let context = {
        let setter = notice.setter();
        use_memo((), move |_| {
            AppContext::bootstrap(Callback::from(move |next: Notice| setter.set(Some(next))))
        })
    };

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            <NoticeBanner notice={(*notice).clone()} {on_dismiss} />
            <Router />
        </ContextProvider<AppContext>>
    }
}

fn render(route: Route) -> Html {
    match route {
        Route::Landing | Route::Login => html! { <LoginScreen /> },
        Route::Signup => html! { <SignupScreen /> },
        Route::CheckerHome => html! { <CheckerHome /> },
        Route::MakerHome => html! { <MakerHome /> },
    }
}

/// Runs the guard on every location or session change.
#[function_component(Router)]
fn router() -> Html {
    let ctx = use_app_context();
    let session = use_session_state(&ctx.store);
    let path = use_location();
    let decision = RouteTable::standard().decide(&session, &path);

    {
        let navigator = ctx.navigator.clone();
        use_effect_with(decision.clone(), move |decision| {
            if let GuardDecision::Redirect(redirect) = decision {
                match &redirect.from {
                    Some(from) => log::info!("🚧 {} requires login, redirecting", from),
                    None => log::debug!("↪️ redirecting to {}", redirect.to.path()),
                }
                navigator.replace(redirect.to.path());
            }
            || ()
        });
    }

    match decision {
        GuardDecision::Render(route) => render(route),
        GuardDecision::Redirect(_) => html! {},
    }
}
