pub mod app;
pub mod routes;
pub mod views;

pub use app::{ClientApp, MountedApp, NavigationError, MOUNT_POINT};
pub use routes::RouteTable;
