// ============================================================================
// ROUTING - route table, guard decisions and browser navigation
// ============================================================================

pub mod guard;
pub mod navigator;
pub mod route;

pub use guard::{decide, home_route, GuardDecision, Redirect};
pub use navigator::{current_path, BrowserNavigator, LocationListener, Navigator};
pub use route::{normalize_path, Access, Route, RouteSpec, RouteTable};
