//! View routing table for the single-page client.
//!
//! Paths are matched against the route carried in the URL fragment (hash
//! history). Matching follows the usual client router defaults:
//! - case-insensitive
//! - one trailing slash is tolerated
//! - a query string or in-page anchor inside the fragment is ignored
//!
//! There is no catch-all entry. A path that matches nothing resolves to
//! `None`; `RouteNotFound` is only reachable at its own literal path.

use std::collections::HashSet;
use thiserror::Error;

use super::views::View;

/// Maps a URL path and symbolic name to a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route name '{0}'")]
    DuplicateName(&'static str),
    #[error("duplicate route path '{0}'")]
    DuplicatePath(&'static str),
    #[error("route path '{0}' must start with '/'")]
    RelativePath(&'static str),
}

const STANDARD_ROUTES: [RouteDescriptor; 4] = [
    RouteDescriptor {
        path: "/",
        name: "landing",
        view: View::LandingPage,
    },
    RouteDescriptor {
        path: "/results",
        name: "results",
        view: View::ResultsPage,
    },
    RouteDescriptor {
        path: "/routeNotFound",
        name: "routeNotFound",
        view: View::RouteNotFound,
    },
    RouteDescriptor {
        path: "/internalError",
        name: "internalError",
        view: View::InternalError,
    },
];

/// Immutable list of route descriptors with unique names and paths
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        for route in &routes {
            if !route.path.starts_with('/') {
                return Err(RouteTableError::RelativePath(route.path));
            }
            if !names.insert(route.name) {
                return Err(RouteTableError::DuplicateName(route.name));
            }
            if !paths.insert(normalize(route.path)) {
                return Err(RouteTableError::DuplicatePath(route.path));
            }
        }
        Ok(Self { routes })
    }

    /// The application's four routes: landing, results, routeNotFound, internalError
    pub fn standard() -> Result<Self, RouteTableError> {
        Self::new(STANDARD_ROUTES.to_vec())
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        let wanted = normalize(path);
        self.routes.iter().find(|r| normalize(r.path) == wanted)
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Link to a named route in hash-history form, e.g. `#/results`
    pub fn href(&self, name: &str) -> Option<String> {
        self.by_name(name).map(|r| format!("#{}", r.path))
    }
}

/// Extract the route path from a URL or bare fragment.
///
/// `http://host/#/results` and `#/results` both give `/results`; an empty or
/// missing fragment gives `/`. A value without `#` that already looks like a
/// path is taken as is.
pub fn location_path(location: &str) -> String {
    let fragment = match location.split_once('#') {
        Some((_, fragment)) => fragment,
        None if location.starts_with('/') => location,
        None => "",
    };
    // `#/results#top` carries an in-page anchor after the route
    let path = fragment.split(['?', '#']).next().unwrap_or("");

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
    let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
    trimmed.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_distinct() {
        let table = RouteTable::standard().unwrap();
        let names: HashSet<_> = table.routes().iter().map(|r| r.name).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_paths_are_distinct() {
        let table = RouteTable::standard().unwrap();
        let paths: HashSet<_> = table.routes().iter().map(|r| r.path).collect();
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn test_standard_table_passes_validation() {
        assert_eq!(RouteTable::standard().unwrap().routes().len(), 4);
    }

    #[test]
    fn test_declared_paths_resolve_to_their_views() {
        let table = RouteTable::standard().unwrap();
        assert_eq!(table.resolve("/").unwrap().view, View::LandingPage);
        assert_eq!(table.resolve("/results").unwrap().view, View::ResultsPage);
        assert_eq!(table.resolve("/routeNotFound").unwrap().view, View::RouteNotFound);
        assert_eq!(table.resolve("/internalError").unwrap().view, View::InternalError);
    }

    #[test]
    fn test_unmatched_path_has_no_route() {
        let table = RouteTable::standard().unwrap();
        assert!(table.resolve("/doesNotExist").is_none());
        assert!(table.resolve("/results/extra").is_none());
    }

    #[test]
    fn test_matching_is_lenient_about_case_and_trailing_slash() {
        let table = RouteTable::standard().unwrap();
        assert_eq!(table.resolve("/Results").unwrap().name, "results");
        assert_eq!(table.resolve("/results/").unwrap().name, "results");
        assert_eq!(table.resolve("/ROUTENOTFOUND").unwrap().name, "routeNotFound");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let routes = vec![
            RouteDescriptor {
                path: "/a",
                name: "same",
                view: View::LandingPage,
            },
            RouteDescriptor {
                path: "/b",
                name: "same",
                view: View::ResultsPage,
            },
        ];
        assert_eq!(
            RouteTable::new(routes).unwrap_err(),
            RouteTableError::DuplicateName("same")
        );
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let routes = vec![
            RouteDescriptor {
                path: "/results",
                name: "a",
                view: View::ResultsPage,
            },
            RouteDescriptor {
                path: "/Results/",
                name: "b",
                view: View::ResultsPage,
            },
        ];
        assert_eq!(
            RouteTable::new(routes).unwrap_err(),
            RouteTableError::DuplicatePath("/Results/")
        );
    }

    #[test]
    fn test_relative_path_rejected() {
        let routes = vec![RouteDescriptor {
            path: "results",
            name: "results",
            view: View::ResultsPage,
        }];
        assert!(matches!(
            RouteTable::new(routes),
            Err(RouteTableError::RelativePath("results"))
        ));
    }

    #[test]
    fn test_named_links() {
        let table = RouteTable::standard().unwrap();
        assert_eq!(table.href("results").as_deref(), Some("#/results"));
        assert_eq!(table.href("landing").as_deref(), Some("#/"));
        assert_eq!(table.href("missing"), None);
    }

    #[test]
    fn test_location_path() {
        assert_eq!(location_path("http://localhost:8085/#/results"), "/results");
        assert_eq!(location_path("#/internalError"), "/internalError");
        assert_eq!(location_path("#/results?from=Earth"), "/results");
        assert_eq!(location_path("#/results#top"), "/results");
        assert_eq!(location_path("http://localhost:8085/#/results#top"), "/results");
        assert_eq!(location_path("#/results?from=Earth#top"), "/results");
        assert_eq!(location_path("http://localhost:8085/"), "/");
        assert_eq!(location_path("http://localhost:8085/#"), "/");
        assert_eq!(location_path("#results"), "/results");
        assert_eq!(location_path("/routeNotFound"), "/routeNotFound");
        assert_eq!(location_path(""), "/");
    }
}
