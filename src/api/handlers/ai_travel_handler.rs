//! AI travel handlers.
//!
//! Authentication is optional: a valid token makes the caller the owner of
//! what they generate, and owned itineraries are only visible to their owner.

use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{JsonBody, ValidatedJson};
use crate::api::middleware::{require_auth, CurrentUser};
use crate::api::AppState;
use crate::domain::{GenerateItineraryRequest, ItineraryDetail, ItinerarySummary};
use crate::errors::AppResult;
use crate::services::{GeneratedItinerary, RegenerateBudgetRequest, RegeneratedBudget};
use crate::types::{ApiResponse, Created, ListResponse};

pub fn ai_travel_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_itinerary))
        .route(
            "/itinerary/:id",
            get(get_itinerary).delete(delete_itinerary),
        )
        .route("/session/:session_id", get(session_itineraries))
        .route("/budget/regenerate", post(regenerate_budget))
        .route(
            "/my-itineraries",
            get(my_itineraries).route_layer(middleware::from_fn(require_auth)),
        )
}

fn caller_id(user: &Option<CurrentUser>) -> Option<i32> {
    user.as_ref().map(|u| u.id)
}

/// Generate and store a new itinerary
#[utoipa::path(
    post,
    path = "/api/ai-travel/generate",
    tag = "AI travel",
    request_body = GenerateItineraryRequest,
    responses(
        (status = 201, description = "AI itinerary generated successfully", body = GeneratedItinerary),
        (status = 400, description = "Validation error")
    )
)]
pub async fn generate_itinerary(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<GenerateItineraryRequest>,
) -> AppResult<Created<GeneratedItinerary>> {
    let generated = state
        .travel_service
        .generate(payload, caller_id(&user))
        .await?;

    Ok(Created(ApiResponse::with_message(
        generated,
        "AI itinerary generated successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/ai-travel/itinerary/{id}",
    tag = "AI travel",
    params(("id" = Uuid, Path, description = "Itinerary ID")),
    responses(
        (status = 200, description = "Itinerary found", body = ItineraryDetail),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Itinerary not found")
    )
)]
pub async fn get_itinerary(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<ItineraryDetail>> {
    let itinerary = state.travel_service.get(id, caller_id(&user)).await?;
    Ok(ApiResponse::success(itinerary))
}

#[utoipa::path(
    delete,
    path = "/api/ai-travel/itinerary/{id}",
    tag = "AI travel",
    params(("id" = Uuid, Path, description = "Itinerary ID")),
    responses(
        (status = 200, description = "Itinerary deleted successfully"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Itinerary not found")
    )
)]
pub async fn delete_itinerary(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<()>> {
    state.travel_service.delete(id, caller_id(&user)).await?;
    Ok(ApiResponse::message("Itinerary deleted successfully"))
}

/// The caller's itineraries, newest first
#[utoipa::path(
    get,
    path = "/api/ai-travel/my-itineraries",
    tag = "AI travel",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Itineraries of the caller"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_itineraries(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<ListResponse<ItinerarySummary>>> {
    let itineraries = state.travel_service.list_for_user(user.id).await?;
    Ok(ApiResponse::success(ListResponse::new(itineraries)))
}

/// Anonymous itineraries of a session
#[utoipa::path(
    get,
    path = "/api/ai-travel/session/{session_id}",
    tag = "AI travel",
    params(("session_id" = String, Path, description = "Client session id")),
    responses((status = 200, description = "Itineraries of the session"))
)]
pub async fn session_itineraries(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<ApiResponse<ListResponse<ItinerarySummary>>> {
    let itineraries = state.travel_service.list_for_session(&session_id).await?;
    Ok(ApiResponse::success(ListResponse::new(itineraries)))
}

/// Regenerate the budget of a stored itinerary
#[utoipa::path(
    post,
    path = "/api/ai-travel/budget/regenerate",
    tag = "AI travel",
    request_body = RegenerateBudgetRequest,
    responses(
        (status = 200, description = "Budget estimate regenerated successfully", body = RegeneratedBudget),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Itinerary not found")
    )
)]
pub async fn regenerate_budget(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    JsonBody(payload): JsonBody<RegenerateBudgetRequest>,
) -> AppResult<ApiResponse<RegeneratedBudget>> {
    let regenerated = state
        .travel_service
        .regenerate_budget(payload, caller_id(&user))
        .await?;

    Ok(ApiResponse::with_message(
        regenerated,
        "Budget estimate regenerated successfully",
    ))
}
