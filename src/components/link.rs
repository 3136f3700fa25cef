use yew::prelude::*;

use crate::hooks::use_app_context;
use crate::routing::Route;

#[derive(Properties, PartialEq)]
pub struct LinkProps {
    pub to: Route,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// In-app anchor: pushes a history entry instead of reloading the page.
#[function_component(Link)]
pub fn link(props: &LinkProps) -> Html {
    let ctx = use_app_context();
    let to = props.to;
    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        ctx.navigator.navigate(to.path());
    });

    html! {
        <a class={props.class.clone()} href={to.path()} {onclick}>
            {props.children.clone()}
        </a>
    }
}
