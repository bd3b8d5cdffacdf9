use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use super::routes::{location_path, RouteDescriptor, RouteTable};

/// Id of the document node the client mounts into
pub const MOUNT_POINT: &str = "app";

/// Where the client keeps the current route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum History {
    /// Route lives in the URL fragment (`/#/results`)
    Hash,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches '{0}'")]
    Unmatched(String),
    #[error("mount point id must not be empty")]
    EmptyMountPoint,
}

/// Client application built over a route table, not yet attached to the page
#[derive(Debug, Clone)]
pub struct ClientApp {
    table: Arc<RouteTable>,
    history: History,
}

/// Client application attached to a document node
#[derive(Debug, Clone)]
pub struct MountedApp {
    app: ClientApp,
    mount_point: String,
}

/// Outcome of a successful navigation
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub route: RouteDescriptor,
    pub html: String,
}

#[derive(Serialize)]
struct RouteEntry<'a> {
    path: &'a str,
    name: &'a str,
    view: &'a str,
}

impl ClientApp {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            history: History::Hash,
        }
    }

    pub fn history(&self) -> History {
        self.history
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn mount(self, mount_point: &str) -> Result<MountedApp, NavigationError> {
        if mount_point.trim().is_empty() {
            return Err(NavigationError::EmptyMountPoint);
        }
        tracing::debug!("Client mounted at #{}", mount_point);
        Ok(MountedApp {
            app: self,
            mount_point: mount_point.to_string(),
        })
    }
}

impl MountedApp {
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    pub fn table(&self) -> &RouteTable {
        self.app.table()
    }

    /// Resolve a location (full URL or fragment) and render its view
    pub fn navigate(&self, location: &str) -> Result<Rendered, NavigationError> {
        let path = location_path(location);
        let route = self
            .app
            .table
            .resolve(&path)
            .ok_or_else(|| NavigationError::Unmatched(path.clone()))?;

        Ok(Rendered {
            route: route.clone(),
            html: route.view.render(),
        })
    }

    /// Host document for the client: the mount node plus the route table as JSON
    pub fn shell_html(&self) -> String {
        let entries: Vec<RouteEntry<'_>> = self
            .table()
            .routes()
            .iter()
            .map(|r| RouteEntry {
                path: r.path,
                name: r.name,
                view: r.view.component_name(),
            })
            .collect();
        let routes_json = serde_json::to_string(&entries)
            .unwrap_or_else(|_| "[]".to_string())
            .replace('<', "\\u003c");

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head><meta charset=\"utf-8\"><title>Space Travel</title></head>\n\
             <body>\n\
             <div id=\"{}\"></div>\n\
             <script type=\"application/json\" id=\"routes\" data-history=\"hash\">{}</script>\n\
             </body>\n\
             </html>\n",
            self.mount_point, routes_json
        )
    }
}
