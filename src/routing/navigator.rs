// ============================================================================
// NAVIGATOR - moves the browser between routes
// ============================================================================
// History API based: push/replace the URL and fire a `popstate` event so every
// location listener re-runs the guard.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event};

/// Changes the current location. Injected into the gateway so the refresh
/// failure path can send the user to the login view.
pub trait Navigator {
    /// Adds a history entry for `path`.
    fn navigate(&self, path: &str);
    /// Swaps the current history entry for `path`.
    fn replace(&self, path: &str);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    fn update(&self, path: &str, replace: bool) {
        let Some(window) = window() else {
            return;
        };
        let history = match window.history() {
            Ok(history) => history,
            Err(e) => {
                log::warn!("⚠️ History API unavailable: {:?}", e);
                return;
            }
        };
        let result = if replace {
            history.replace_state_with_url(&JsValue::NULL, "", Some(path))
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(path))
        };
        if let Err(e) = result {
            log::warn!("⚠️ Could not change location to {}: {:?}", path, e);
            return;
        }
        // pushState/replaceState do not emit popstate on their own.
        if let Ok(event) = Event::new("popstate") {
            let _ = window.dispatch_event(&event);
        }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        log::debug!("➡️ navigate {}", path);
        self.update(path, false);
    }

    fn replace(&self, path: &str) {
        log::debug!("↪️ replace {}", path);
        self.update(path, true);
    }
}

/// Path of the current location, `/` outside a browser.
pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// `popstate` subscription; the listener is removed on drop.
pub struct LocationListener {
    closure: Closure<dyn FnMut(Event)>,
}

impl LocationListener {
    pub fn new<F>(mut on_change: F) -> Self
    where
        F: FnMut(String) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            on_change(current_path());
        }) as Box<dyn FnMut(Event)>);

        if let Some(window) = window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }
        Self { closure }
    }
}

impl Drop for LocationListener {
    fn drop(&mut self) {
        if let Some(window) = window() {
            let _ = window.remove_event_listener_with_callback(
                "popstate",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Navigator;
    use std::cell::RefCell;

    /// Records every location change instead of touching the browser.
    #[derive(Default)]
    pub(crate) struct RecordingNavigator {
        pub visits: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.visits.borrow_mut().push(path.to_string());
        }

        fn replace(&self, path: &str) {
            self.visits.borrow_mut().push(format!("replace:{}", path));
        }
    }

    #[test]
    fn recording_navigator_keeps_order() {
        let nav = RecordingNavigator::default();
        nav.navigate("/login");
        nav.replace("/");
        assert_eq!(*nav.visits.borrow(), vec!["/login", "replace:/"]);
    }
}
