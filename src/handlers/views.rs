use crate::error::{ApiError, ErrorResponse};
use crate::frontend::NavigationError;
use crate::models::{ViewQuery, ViewRouteResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};

/// GET /api/views handler - Client route table
#[utoipa::path(
    get,
    path = routes::VIEW_ROUTES,
    responses(
        (status = 200, description = "Route descriptors of the client", body = Vec<ViewRouteResponse>)
    ),
    tag = "views"
)]
pub async fn view_routes_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Vec<ViewRouteResponse>>) {
    let table = state.client.table();
    let data = table
        .routes()
        .iter()
        .map(|r| ViewRouteResponse {
            path: r.path.to_string(),
            name: r.name.to_string(),
            view: r.view.component_name().to_string(),
            href: table.href(r.name).unwrap_or_default(),
        })
        .collect();

    (StatusCode::OK, Json(data))
}

/// GET /views handler - Render the view a location navigates to
///
/// `location` may be a full URL or a fragment such as `#/results`; when
/// omitted the landing route is rendered.
#[utoipa::path(
    get,
    path = routes::VIEW,
    params(ViewQuery),
    responses(
        (status = 200, description = "Rendered view fragment", content_type = "text/html", body = String),
        (status = 404, description = "No route matches the location", body = ErrorResponse)
    ),
    tag = "views"
)]
pub async fn view_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, ApiError> {
    let location = query.location.unwrap_or_default();

    match state.client.navigate(&location) {
        Ok(rendered) => {
            tracing::debug!("Rendered view {} for '{}'", rendered.route.name, location);
            Ok(Html(rendered.html))
        }
        Err(NavigationError::Unmatched(path)) => {
            tracing::info!("No client route for '{}'", path);
            Err(ApiError::ViewNotFound(path))
        }
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

/// GET / handler - Application shell hosting the client mount node
pub async fn shell_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.client.shell_html())
}
