// ============================================================================
// ROUTE GUARD - render or redirect, decided from the session alone
// ============================================================================

use super::route::{normalize_path, Access, Route, RouteTable};
use crate::models::Role;
use crate::state::SessionState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    /// Requested path, kept when a visitor is bounced off a protected view.
    pub from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Redirect),
}

impl GuardDecision {
    fn redirect(to: Route) -> Self {
        GuardDecision::Redirect(Redirect { to, from: None })
    }

    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render(_))
    }

    /// Target path of a redirect.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Render(_) => None,
            GuardDecision::Redirect(redirect) => Some(redirect.to.path()),
        }
    }
}

/// Home view of an authenticated session, checker first. `None` for a
/// session without any role.
pub fn home_route(session: &SessionState) -> Option<Route> {
    session.role().map(Route::home_of)
}

/// Decides a navigation to `path` with the standard route table. The table
/// says whether the path is public; `required_roles` gates protected paths.
pub fn decide(
    session: &SessionState,
    required_roles: Option<&[Role]>,
    path: &str,
) -> GuardDecision {
    RouteTable::standard().decide_with(session, required_roles, path)
}

impl RouteTable {
    /// Decides with the roles each route declares.
    pub fn decide(&self, session: &SessionState, path: &str) -> GuardDecision {
        let roles = self
            .lookup(path)
            .and_then(|spec| spec.access.required_roles());
        self.decide_with(session, roles, path)
    }

    pub fn decide_with(
        &self,
        session: &SessionState,
        required_roles: Option<&[Role]>,
        path: &str,
    ) -> GuardDecision {
        let Some(spec) = self.lookup(path) else {
            log::debug!("No route for {}, falling back to landing", path);
            return GuardDecision::redirect(self.landing());
        };

        match spec.access {
            Access::Public => match home_route(session) {
                Some(home) => GuardDecision::redirect(home),
                None => GuardDecision::Render(spec.route),
            },
            Access::Protected { .. } => {
                if !session.is_authenticated() {
                    return GuardDecision::Redirect(Redirect {
                        to: self.landing(),
                        from: Some(normalize_path(path).to_string()),
                    });
                }
                let allowed = match required_roles {
                    None => true,
                    Some(roles) => roles.iter().any(|role| session.has_role(*role)),
                };
                if allowed {
                    GuardDecision::Render(spec.route)
                } else {
                    GuardDecision::redirect(home_route(session).unwrap_or(self.landing()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session_state::tests::{logged_in, user};
    use crate::state::SessionEvent;

    const ALL_PATHS: [&str; 7] = ["/", "/login", "/signup", "/home", "/maker-home", "/nope", ""];

    fn logged_out() -> SessionState {
        SessionState::new()
    }

    fn redirect_to(to: Route) -> GuardDecision {
        GuardDecision::Redirect(Redirect { to, from: None })
    }

    #[test]
    fn visitor_is_sent_to_landing_from_checker_home() {
        let decision = decide(&logged_out(), Some(&[Role::Checker]), "/home");
        assert_eq!(decision.redirect_path(), Some("/"));
        assert_eq!(
            decision,
            GuardDecision::Redirect(Redirect {
                to: Route::Landing,
                from: Some("/home".to_string()),
            })
        );
    }

    #[test]
    fn maker_is_sent_to_maker_home_from_checker_view() {
        let decision = decide(&logged_in(true, false), Some(&[Role::Checker]), "/home");
        assert_eq!(decision, redirect_to(Route::MakerHome));
    }

    #[test]
    fn checker_is_sent_home_from_public_views() {
        let session = logged_in(false, true);
        assert_eq!(decide(&session, None, "/login"), redirect_to(Route::CheckerHome));
        assert_eq!(decide(&session, None, "/signup"), redirect_to(Route::CheckerHome));
        assert_eq!(decide(&session, None, "/"), redirect_to(Route::CheckerHome));
    }

    #[test]
    fn visitor_sees_public_views() {
        for route in [Route::Landing, Route::Login, Route::Signup] {
            assert_eq!(
                decide(&logged_out(), None, route.path()),
                GuardDecision::Render(route)
            );
        }
    }

    #[test]
    fn unknown_paths_fall_back_to_landing() {
        assert_eq!(decide(&logged_out(), None, "/admin"), redirect_to(Route::Landing));
        assert_eq!(
            decide(&logged_in(false, true), None, "/admin"),
            redirect_to(Route::Landing)
        );
    }

    #[test]
    fn protected_route_without_roles_needs_only_authentication() {
        let no_role = logged_in(false, false);
        assert_eq!(
            decide(&no_role, None, "/maker-home"),
            GuardDecision::Render(Route::MakerHome)
        );
        assert!(!decide(&logged_out(), None, "/maker-home").is_render());
    }

    #[test]
    fn mixed_role_session_passes_either_gate_and_prefers_checker_home() {
        let both = logged_in(true, true);
        let table = RouteTable::standard();
        assert_eq!(table.decide(&both, "/home"), GuardDecision::Render(Route::CheckerHome));
        assert_eq!(
            table.decide(&both, "/maker-home"),
            GuardDecision::Render(Route::MakerHome)
        );
        assert_eq!(table.decide(&both, "/login"), redirect_to(Route::CheckerHome));
        assert_eq!(home_route(&both), Some(Route::CheckerHome));
    }

    #[test]
    fn role_less_session_never_loops() {
        let table = RouteTable::standard();
        let no_role = logged_in(false, false);
        assert_eq!(home_route(&no_role), None);
        for path in ["/", "/login", "/signup"] {
            assert!(table.decide(&no_role, path).is_render(), "{}", path);
        }
        assert_eq!(table.decide(&no_role, "/home"), redirect_to(Route::Landing));
        assert_eq!(table.decide(&no_role, "/maker-home"), redirect_to(Route::Landing));
    }

    #[test]
    fn redirects_settle_within_two_hops() {
        let table = RouteTable::standard();
        let sessions = [
            logged_out(),
            logged_in(true, false),
            logged_in(false, true),
            logged_in(true, true),
            logged_in(false, false),
        ];
        for session in &sessions {
            for path in ALL_PATHS {
                let mut current = path.to_string();
                let mut hops = 0;
                loop {
                    match table.decide(session, &current) {
                        GuardDecision::Render(_) => break,
                        GuardDecision::Redirect(redirect) => {
                            hops += 1;
                            assert!(hops <= 2, "{:?} {} keeps redirecting", session, path);
                            current = redirect.to.path().to_string();
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn unknown_path_reaches_home_through_landing() {
        let table = RouteTable::standard();
        let maker = logged_in(true, false);
        assert_eq!(table.decide(&maker, "/nope"), redirect_to(Route::Landing));
        assert_eq!(table.decide(&maker, "/"), redirect_to(Route::MakerHome));
        assert_eq!(table.decide(&maker, "/maker-home"), GuardDecision::Render(Route::MakerHome));
    }

    #[test]
    fn failed_relogin_keeps_flags_but_grants_nothing() {
        let mut session = logged_in(false, true);
        session.apply(SessionEvent::BeginLogin);
        session.apply(SessionEvent::LoginFailed("bad".into()));
        assert!(session.is_checker());
        assert_eq!(
            decide(&session, Some(&[Role::Checker]), "/home").redirect_path(),
            Some("/")
        );
        assert!(decide(&session, None, "/login").is_render());
    }

    #[test]
    fn decisions_are_deterministic() {
        let mut session = SessionState::new();
        session.apply(SessionEvent::LoginSucceeded(user(true, false)));
        for path in ALL_PATHS {
            for roles in [None, Some(&[Role::Maker][..]), Some(&[Role::Checker][..])] {
                let first = decide(&session, roles, path);
                for _ in 0..3 {
                    assert_eq!(decide(&session, roles, path), first);
                }
            }
        }
    }

    #[test]
    fn query_strings_do_not_change_the_decision() {
        let session = logged_in(true, false);
        assert_eq!(
            decide(&session, Some(&[Role::Maker]), "/maker-home/?tab=uploads"),
            GuardDecision::Render(Route::MakerHome)
        );
    }
}
