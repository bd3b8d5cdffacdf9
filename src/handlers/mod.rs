pub mod health;
pub mod journeys;
pub mod bookings;
pub mod views;

pub use health::health_handler;
pub use journeys::journeys_handler;
pub use bookings::booking_handler;
pub use views::{shell_handler, view_handler, view_routes_handler};
