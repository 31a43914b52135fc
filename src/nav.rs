//! Page routes and the navigation seam used by the search palette.

use crate::error::{Result, SentinelError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Every page of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Users,
    Devices,
    UserGroups,
    CardTemplates,
}

impl Route {
    /// Sidebar order
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::Users,
        Route::Devices,
        Route::UserGroups,
        Route::CardTemplates,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Users => "/users",
            Route::Devices => "/devices",
            Route::UserGroups => "/user-groups",
            Route::CardTemplates => "/card-templates",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Users => "Users",
            Route::Devices => "Devices",
            Route::UserGroups => "User Groups",
            Route::CardTemplates => "Card Templates",
        }
    }

    /// Resolve a path such as `/devices`. `/` maps to the dashboard.
    pub fn from_path(path: &str) -> Result<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::Dashboard);
        }
        Route::ALL
            .iter()
            .copied()
            .find(|r| r.path() == trimmed)
            .ok_or_else(|| SentinelError::UnknownRoute(path.to_string()))
    }

    /// Position in the sidebar
    pub fn index(&self) -> usize {
        Route::ALL.iter().position(|r| r == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

// Routes travel as their paths, e.g. "/user-groups".
impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Route::from_path(&path).map_err(serde::de::Error::custom)
    }
}

/// Receiver of navigation requests (the surrounding application).
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Tracks the active page and every navigation made.
#[derive(Debug, Default)]
pub struct Router {
    start: Route,
    current: Route,
    trail: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            start,
            current: start,
            trail: Vec::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Navigations in the order they happened
    pub fn trail(&self) -> &[Route] {
        &self.trail
    }

    /// Go back to the page before the last navigation
    pub fn back(&mut self) -> Option<Route> {
        self.trail.pop()?;
        let previous = self.trail.last().copied().unwrap_or(self.start);
        self.current = previous;
        Some(previous)
    }
}

impl Navigator for Router {
    fn navigate(&mut self, route: Route) {
        tracing::info!(target: "tui", from = %self.current, to = %route, "navigate");
        self.current = route;
        self.trail.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_back_to_routes() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()).unwrap(), route);
        }
        assert_eq!(Route::from_path("/").unwrap(), Route::Dashboard);
        assert_eq!(Route::from_path("/users/").unwrap(), Route::Users);
    }

    #[test]
    fn unknown_path_is_an_error() {
        let err = Route::from_path("/reports").unwrap_err();
        assert!(matches!(err, SentinelError::UnknownRoute(p) if p == "/reports"));
    }

    #[test]
    fn serializes_as_path() {
        assert_eq!(serde_json::to_string(&Route::UserGroups).unwrap(), "\"/user-groups\"");
        let back: Route = serde_json::from_str("\"/card-templates\"").unwrap();
        assert_eq!(back, Route::CardTemplates);
    }

    #[test]
    fn router_records_trail_and_goes_back() {
        let mut router = Router::default();
        assert_eq!(router.current(), Route::Dashboard);
        router.navigate(Route::Devices);
        router.navigate(Route::Users);
        assert_eq!(router.trail(), &[Route::Devices, Route::Users][..]);

        assert_eq!(router.back(), Some(Route::Devices));
        assert_eq!(router.back(), Some(Route::Dashboard));
        assert_eq!(router.current(), Route::Dashboard);
        assert_eq!(router.back(), None);
    }

    #[test]
    fn sidebar_index_follows_all() {
        assert_eq!(Route::Dashboard.index(), 0);
        assert_eq!(Route::CardTemplates.index(), 4);
    }
}
