use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    Booking, BookingResponse, BookingRoutes, JourneyResponse, PossibleRoute, SimplifiedProvider,
    ViewRouteResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "space-travel-planner API",
        version = "1.0.0",
        description = "Interplanetary journey search and booking over the current travel price list"
    ),
    paths(
        handlers::health::health_handler,
        handlers::journeys::journeys_handler,
        handlers::bookings::booking_handler,
        handlers::views::view_routes_handler,
        handlers::views::view_handler
    ),
    components(
        schemas(
            JourneyResponse,
            PossibleRoute,
            SimplifiedProvider,
            Booking,
            BookingRoutes,
            BookingResponse,
            ViewRouteResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "journeys", description = "Journey search"),
        (name = "bookings", description = "Reservations"),
        (name = "views", description = "Client view routing")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/health", "/api/get/{from}/{destination}", "/api/post", "/api/views", "/views"] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {}", expected);
        }
    }
}
