use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::config::Config;
use crate::frontend::{ClientApp, RouteTable, MOUNT_POINT};
use crate::handlers;
use crate::routes;
use crate::state::AppState;
use crate::store::Store;

/// Assemble shared state: store, configuration and the mounted client
pub fn build_state(store: Store, config: Config) -> Result<AppState> {
    let table = RouteTable::standard().context("Invalid client route table")?;
    let client = ClientApp::new(Arc::new(table));
    let history = client.history();
    let client = client
        .mount(MOUNT_POINT)
        .context("Failed to mount client application")?;
    tracing::info!(
        "Client mounted at #{} with {} routes ({:?} history)",
        client.mount_point(),
        client.table().routes().len(),
        history
    );

    Ok(AppState {
        store,
        config: Arc::new(config),
        client,
    })
}

/// Create the HTTP router with tracing, CORS and API docs
pub fn build_router(state: AppState) -> Result<Router> {
    let origin = HeaderValue::from_str(&state.config.cors_allowed_origin)
        .context("CORS_ALLOWED_ORIGIN is not a valid header value")?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let router = Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(routes::JOURNEYS, get(handlers::journeys_handler))
        .route(routes::BOOKINGS, post(handlers::booking_handler))
        .route(routes::VIEW_ROUTES, get(handlers::view_routes_handler))
        .route(routes::VIEW, get(handlers::view_handler))
        .route(routes::SHELL, get(handlers::shell_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(router)
}
