//! Free trip handlers. Public; trips are grouped by session id.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::domain::{FreeTripDraft, FreeTripResponse, FreeTripUpdate};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, ListResponse};

pub fn free_trip_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_free_trip))
        .route("/all", get(list_recent))
        .route("/session/:session_id", get(list_session))
        .route("/:id", get(get_free_trip).put(update_free_trip))
}

#[utoipa::path(
    post,
    path = "/api/free-trips",
    tag = "Free trips",
    request_body = FreeTripDraft,
    responses(
        (status = 201, description = "Free trip created successfully", body = FreeTripResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_free_trip(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<FreeTripDraft>,
) -> AppResult<Created<FreeTripResponse>> {
    let trip = state.free_trip_service.create(draft).await?;
    Ok(Created(ApiResponse::with_message(
        FreeTripResponse::from(trip),
        "Free trip created successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/free-trips/session/{session_id}",
    tag = "Free trips",
    params(("session_id" = String, Path, description = "Client session id")),
    responses((status = 200, description = "Active trips of the session"))
)]
pub async fn list_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<ApiResponse<ListResponse<FreeTripResponse>>> {
    let trips = state.free_trip_service.list_session(&session_id).await?;
    Ok(ApiResponse::success(ListResponse::new(
        trips.into_iter().map(FreeTripResponse::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/free-trips/all",
    tag = "Free trips",
    responses((status = 200, description = "Newest active trips"))
)]
pub async fn list_recent(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ListResponse<FreeTripResponse>>> {
    let trips = state.free_trip_service.list_recent().await?;
    Ok(ApiResponse::success(ListResponse::new(
        trips.into_iter().map(FreeTripResponse::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/free-trips/{id}",
    tag = "Free trips",
    params(("id" = i32, Path, description = "Free trip ID")),
    responses(
        (status = 200, description = "Trip found", body = FreeTripResponse),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_free_trip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<FreeTripResponse>> {
    let trip = state.free_trip_service.get(id).await?;
    Ok(ApiResponse::success(FreeTripResponse::from(trip)))
}

#[utoipa::path(
    put,
    path = "/api/free-trips/{id}",
    tag = "Free trips",
    params(("id" = i32, Path, description = "Free trip ID")),
    request_body = FreeTripUpdate,
    responses(
        (status = 200, description = "Trip updated successfully", body = FreeTripResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn update_free_trip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(changes): JsonBody<FreeTripUpdate>,
) -> AppResult<ApiResponse<FreeTripResponse>> {
    let trip = state.free_trip_service.update(id, changes).await?;
    Ok(ApiResponse::with_message(
        FreeTripResponse::from(trip),
        "Trip updated successfully",
    ))
}
