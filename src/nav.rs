//! Navigation context: which screen is showing and for which entity.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    AddProject,
    UpdateProject { id: String },
    UpdateProfile,
}

impl Route {
    /// Parse a dashboard path such as `/update/project/123`.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Dashboard),
            ["add", "project"] => Some(Route::AddProject),
            ["update", "project", id] => Some(Route::UpdateProject { id: id.to_string() }),
            ["update", "profile"] => Some(Route::UpdateProfile),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::AddProject => "/add/project".to_string(),
            Route::UpdateProject { id } => format!("/update/project/{}", id),
            Route::UpdateProfile => "/update/profile".to_string(),
        }
    }

    /// The entity the route points at, if any.
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Route::UpdateProject { id } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus pending navigation requests.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Route,
    requested: Option<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            requested: None,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.current.entity_id()
    }

    /// Request a move; applied by the app between frames.
    pub fn navigate(&mut self, route: Route) {
        self.requested = Some(route);
    }

    /// Apply a pending request, returning the new route if it changed.
    pub fn take_change(&mut self) -> Option<&Route> {
        let route = self.requested.take()?;
        if route == self.current {
            return None;
        }
        tracing::debug!("Navigating {} -> {}", self.current, route);
        self.current = route;
        Some(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/add/project"), Some(Route::AddProject));
        assert_eq!(
            Route::parse("/update/project/123"),
            Some(Route::UpdateProject { id: "123".into() })
        );
        assert_eq!(Route::parse("update/profile/"), Some(Route::UpdateProfile));
        assert_eq!(Route::parse("/update/project"), None);
        assert_eq!(Route::parse("/elsewhere"), None);
    }

    #[test]
    fn test_path_parses_back() {
        for route in [
            Route::Dashboard,
            Route::AddProject,
            Route::UpdateProject { id: "abc".into() },
            Route::UpdateProfile,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_navigator() {
        let mut nav = Navigator::new(Route::UpdateProject { id: "9".into() });
        assert_eq!(nav.entity_id(), Some("9"));
        assert!(nav.take_change().is_none());

        nav.navigate(Route::Dashboard);
        assert_eq!(nav.take_change(), Some(&Route::Dashboard));
        assert_eq!(nav.entity_id(), None);

        nav.navigate(Route::Dashboard);
        assert!(nav.take_change().is_none());
    }
}
