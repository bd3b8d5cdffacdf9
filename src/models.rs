use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A planet as it appears in the upstream price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub id: String,
    pub from: Location,
    pub to: Location,
    pub distance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub company: Company,
    pub price: f64,
    pub flight_start: DateTime<Utc>,
    pub flight_end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub id: String,
    pub route_info: RouteInfo,
    pub providers: Vec<Provider>,
}

/// Price list published by the upstream travel prices API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricelist {
    pub id: String,
    pub valid_until: DateTime<Utc>,
    pub legs: Vec<Leg>,
}

/// One flight offer as shown to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SimplifiedProvider {
    #[serde(rename = "companyName")]
    pub company_name: String,
    #[serde(rename = "companyID")]
    pub company_id: String,
    pub price: f64,
    #[serde(rename = "flightStart")]
    pub flight_start: DateTime<Utc>,
    #[serde(rename = "flightEnd")]
    pub flight_end: DateTime<Utc>,
}

/// A chain of flights covering every hop of a journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PossibleRoute {
    pub total_price: String,
    pub total_duration: String,
    pub providers: Vec<SimplifiedProvider>,
}

/// Response type for the journey search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct JourneyResponse {
    #[serde(rename = "totalDistance")]
    pub total_distance: String,
    #[serde(rename = "validUntil")]
    pub valid_until: String,
    #[serde(rename = "pricelistID")]
    pub pricelist_id: String,
    #[serde(rename = "possibleRoutes")]
    pub possible_routes: Vec<PossibleRoute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BookingRoutes {
    pub from: String,
    pub destination: String,
}

/// Reservation request for a quoted itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Booking {
    pub company_names: Vec<String>,
    pub start_time: String,
    pub first_name: String,
    pub last_name: String,
    pub total_price: f64,
    pub total_duration: String,
    #[serde(rename = "PricelistID")]
    pub pricelist_id: String,
    pub routes: BookingRoutes,
    #[serde(default)]
    pub valid_until: String,
}

/// Response type for successful bookings
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookingResponse {
    pub id: String,
}

/// Query parameters for the view endpoint
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// URL or fragment to navigate to, e.g. `#/results`
    pub location: Option<String>,
}

/// Route descriptor as exposed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ViewRouteResponse {
    pub path: String,
    pub name: String,
    pub view: String,
    pub href: String,
}
