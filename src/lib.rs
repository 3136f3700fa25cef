// ============================================================================
// CHECKMATE WEB - maker/checker review client (Yew + WASM)
// ============================================================================
// - State: session store, persistence mirror (Rc<RefCell>)
// - Routing: pure guard over the session, History API navigation
// - Services: transport, auth gateway with refresh-and-replay, typed API
// - Components/Hooks: Yew views consuming the store through context
// ============================================================================

pub mod components;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod routing;
pub mod services;
pub mod state;
pub mod utils;

use crate::components::App;
use crate::config::CONFIG;

/// Installs the panic hook and the console logger, then mounts `<App>`.
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!(
        "🚀 CheckMate starting ({}, API {})",
        CONFIG.environment,
        CONFIG.api_base_url()
    );

    yew::Renderer::<App>::new().render();
}
