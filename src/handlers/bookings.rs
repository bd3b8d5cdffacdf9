use crate::error::{ApiError, ErrorResponse};
use crate::models::{Booking, BookingResponse};
use crate::planets::Planet;
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

/// POST /api/post handler - Reserve a quoted journey
#[utoipa::path(
    post,
    path = routes::BOOKINGS,
    request_body = Booking,
    responses(
        (status = 200, description = "Booking stored", body = BookingResponse),
        (status = 400, description = "Invalid booking", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "bookings"
)]
pub async fn booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<Booking>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let Json(booking) = payload?;
    validate_booking(&booking).map_err(ApiError::InvalidBooking)?;

    let Some(id) = state.store.add_booking(&booking).await? else {
        return Err(ApiError::InvalidBooking(format!(
            "price list '{}' is no longer available",
            booking.pricelist_id
        )));
    };

    tracing::info!(
        "Stored booking {} ({} -> {}, price list {})",
        id,
        booking.routes.from,
        booking.routes.destination,
        booking.pricelist_id
    );
    Ok((StatusCode::OK, Json(BookingResponse { id: id.to_string() })))
}

fn validate_booking(booking: &Booking) -> Result<(), String> {
    if booking.first_name.trim().is_empty() || booking.last_name.trim().is_empty() {
        return Err("first and last name are required".to_string());
    }
    if booking.company_names.is_empty() {
        return Err("at least one company is required".to_string());
    }
    if !booking.total_price.is_finite() || booking.total_price < 0.0 {
        return Err(format!("total price {} is not valid", booking.total_price));
    }
    if booking.pricelist_id.trim().is_empty() {
        return Err("price list id is required".to_string());
    }

    let from: Planet = booking
        .routes
        .from
        .parse()
        .map_err(|name| format!("unknown planet '{}'", name))?;
    let destination: Planet = booking
        .routes
        .destination
        .parse()
        .map_err(|name| format!("unknown planet '{}'", name))?;
    if from == destination {
        return Err("origin and destination must differ".to_string());
    }
    Ok(())
}
