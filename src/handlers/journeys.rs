use crate::error::{ApiError, ErrorResponse};
use crate::models::JourneyResponse;
use crate::planets::Planet;
use crate::planner::plan_journeys;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /api/get/{from}/{destination} handler - Search journeys
///
/// Finds the route with the fewest hops between two planets and lists every
/// combination of flights from the latest price list that connects in time.
#[utoipa::path(
    get,
    path = routes::JOURNEYS,
    params(
        ("from" = String, Path, description = "Origin planet, e.g. Earth"),
        ("destination" = String, Path, description = "Destination planet, e.g. Mars")
    ),
    responses(
        (status = 200, description = "Journeys found", body = JourneyResponse),
        (status = 400, description = "Unknown planet or same origin and destination", body = ErrorResponse),
        (status = 404, description = "No providers for some hop", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "No price list fetched yet", body = ErrorResponse)
    ),
    tag = "journeys"
)]
pub async fn journeys_handler(
    State(state): State<AppState>,
    Path((from_str, destination_str)): Path<(String, String)>,
) -> Result<(StatusCode, Json<JourneyResponse>), ApiError> {
    let from: Planet = from_str.parse().map_err(ApiError::InvalidPlanet)?;
    let destination: Planet = destination_str.parse().map_err(ApiError::InvalidPlanet)?;

    let response = plan_journeys(&state.store, from, destination).await?;

    tracing::info!(
        "Returned {} journeys {} -> {} (price list {})",
        response.possible_routes.len(),
        from,
        destination,
        response.pricelist_id
    );
    Ok((StatusCode::OK, Json(response)))
}
