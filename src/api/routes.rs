//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    ai_travel_routes, auth_routes, destination_routes, free_trip_routes, trip_routes,
};
use super::middleware::{identify, require_auth};
use super::openapi::ApiDoc;
use super::AppState;
use crate::errors::AppError;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes(state.clone()))
        .fallback(not_found)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `/api` routes. `identify` attaches the caller for every route; signed-in
/// only routes add `require_auth`.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .nest(
            "/trips",
            trip_routes().route_layer(middleware::from_fn(require_auth)),
        )
        .nest("/free-trips", free_trip_routes())
        .nest("/ai-travel", ai_travel_routes())
        .nest("/destinations", destination_routes())
        .layer(middleware::from_fn_with_state(state, identify))
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Travel Planner API"
}

async fn not_found() -> AppError {
    AppError::NotFound("Resource")
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    cache: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    backend: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_check<E: std::fmt::Display>(
        result: Result<(), E>,
        backend: Option<&'static str>,
    ) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                backend,
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                backend,
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Health check endpoint with database and cache connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = ServiceStatus::from_check(state.database.ping().await, None);
    let cache = ServiceStatus::from_check(
        state.cache.ping().await,
        Some(state.cache.backend_name()),
    );

    let all_healthy = database.is_healthy() && cache.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database, cache },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
