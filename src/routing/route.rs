use crate::models::Role;

/// Every view the client can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Signup,
    CheckerHome,
    MakerHome,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::CheckerHome => "/home",
            Route::MakerHome => "/maker-home",
        }
    }

    /// Home view of a role.
    pub fn home_of(role: Role) -> Route {
        match role {
            Role::Checker => Route::CheckerHome,
            Role::Maker => Route::MakerHome,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Entry views for visitors; authenticated sessions are sent home.
    Public,
    /// Needs an authenticated session and, when `roles` is set, one of them.
    Protected { roles: Option<&'static [Role]> },
}

impl Access {
    pub fn required_roles(self) -> Option<&'static [Role]> {
        match self {
            Access::Public => None,
            Access::Protected { roles } => roles,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteSpec {
    pub route: Route,
    pub access: Access,
}

const STANDARD_ROUTES: &[RouteSpec] = &[
    RouteSpec {
        route: Route::Signup,
        access: Access::Public,
    },
    RouteSpec {
        route: Route::Login,
        access: Access::Public,
    },
    RouteSpec {
        route: Route::Landing,
        access: Access::Public,
    },
    RouteSpec {
        route: Route::CheckerHome,
        access: Access::Protected {
            roles: Some(&[Role::Checker]),
        },
    },
    RouteSpec {
        route: Route::MakerHome,
        access: Access::Protected {
            roles: Some(&[Role::Maker]),
        },
    },
];

/// Ordered route declarations plus the view unknown paths fall back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: &'static [RouteSpec],
    landing: Route,
}

impl RouteTable {
    pub const fn new(routes: &'static [RouteSpec], landing: Route) -> Self {
        Self { routes, landing }
    }

    pub const fn standard() -> Self {
        Self::new(STANDARD_ROUTES, Route::Landing)
    }

    pub fn landing(&self) -> Route {
        self.landing
    }

    pub fn routes(&self) -> &'static [RouteSpec] {
        self.routes
    }

    /// First declaration matching `path`, compared after [`normalize_path`].
    pub fn lookup(&self, path: &str) -> Option<&'static RouteSpec> {
        let path = normalize_path(path);
        self.routes.iter().find(|spec| spec.route.path() == path)
    }

    pub fn spec_of(&self, route: Route) -> Option<&'static RouteSpec> {
        self.routes.iter().find(|spec| spec.route == route)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Drops the query string, the fragment and any trailing slash (except on
/// the root path).
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
