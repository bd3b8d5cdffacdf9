use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::planner::PlanError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps planner, storage and validation failures to HTTP status codes and
/// formats them as JSON `{"error": ...}` bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Path parameter is not a known planet
    InvalidPlanet(String),
    /// Origin and destination are the same planet
    SamePlanet(String),
    /// Some hop of the journey has no flights in the latest price list
    NoProviders(String),
    /// No price list has been fetched yet
    NoPricelist,
    /// Booking payload failed validation
    InvalidBooking(String),
    /// No client route matches the requested location
    ViewNotFound(String),
    /// Database operation error
    DatabaseError(anyhow::Error),
    /// Any other server-side failure
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidPlanet(name) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown planet: '{}'", name),
            ),
            ApiError::SamePlanet(name) => (
                StatusCode::BAD_REQUEST,
                format!("Origin and destination must differ, got '{}' twice", name),
            ),
            ApiError::NoProviders(msg) => (
                StatusCode::NOT_FOUND,
                format!("No providers found: {}", msg),
            ),
            ApiError::NoPricelist => (
                StatusCode::SERVICE_UNAVAILABLE,
                "No price list available yet".to_string(),
            ),
            ApiError::InvalidBooking(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid booking: {}", msg),
            ),
            ApiError::ViewNotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("No view for route: {}", path),
            ),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", err),
                )
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", msg),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

/// Malformed or incomplete request bodies are reported like any other invalid booking
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBooking(rejection.body_text())
    }
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::SamePlanet(planet) => ApiError::SamePlanet(planet.to_string()),
            PlanError::NoPricelist => ApiError::NoPricelist,
            PlanError::NoRoute { .. } | PlanError::NoProviders { .. } => {
                ApiError::NoProviders(err.to_string())
            }
            PlanError::Storage(err) => ApiError::DatabaseError(err),
        }
    }
}
