use yew::prelude::*;

use crate::state::{SessionState, SessionStore};

/// Current session state; re-renders the component on every transition.
#[hook]
pub fn use_session_state(store: &SessionStore) -> SessionState {
    let state = use_state(|| store.snapshot());
    {
        let state = state.clone();
        use_effect_with(store.clone(), move |store| {
            // A transition may have landed between render and subscribe
            let current = store.snapshot();
            if *state != current {
                state.set(current);
            }
            let id = store.subscribe(move |next| state.set(next.clone()));
            let store = store.clone();
            move || {
                store.unsubscribe(id);
            }
        });
    }
    (*state).clone()
}
