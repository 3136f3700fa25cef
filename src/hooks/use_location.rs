use yew::prelude::*;

use crate::routing::{current_path, LocationListener};

/// Browser path, updated on back/forward and on every navigator call.
#[hook]
pub fn use_location() -> String {
    let path = use_state(current_path);
    {
        let path = path.clone();
        use_effect_with((), move |_| {
            let listener = LocationListener::new(move |next| path.set(next));
            move || drop(listener)
        });
    }
    (*path).clone()
}
