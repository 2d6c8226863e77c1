//! Trip handlers (owner-scoped, auth required).

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateTrip, TripResponse, UpdateTrip};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Create trip routes
pub fn trip_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
}

/// Create a trip
#[utoipa::path(
    post,
    path = "/api/trips",
    tag = "Trips",
    security(("bearer_auth" = [])),
    request_body = CreateTrip,
    responses(
        (status = 201, description = "Trip created successfully", body = TripResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_trip(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateTrip>,
) -> AppResult<Created<TripResponse>> {
    let trip = state.trip_service.create(user.id, payload).await?;
    Ok(Created(ApiResponse::with_message(
        TripResponse::from(trip),
        "Trip created successfully",
    )))
}

/// List the caller's trips, newest first
#[utoipa::path(
    get,
    path = "/api/trips",
    tag = "Trips",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Trips of the caller", body = Vec<TripResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_trips(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<Vec<TripResponse>>> {
    let trips = state.trip_service.list(user.id).await?;
    Ok(ApiResponse::success(
        trips.into_iter().map(TripResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/trips/{id}",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip found", body = TripResponse),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_trip(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<TripResponse>> {
    let trip = state.trip_service.get(user.id, id).await?;
    Ok(ApiResponse::success(TripResponse::from(trip)))
}

/// Partially update a trip
#[utoipa::path(
    put,
    path = "/api/trips/{id}",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Trip ID")),
    request_body = UpdateTrip,
    responses(
        (status = 200, description = "Trip updated", body = TripResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn update_trip(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateTrip>,
) -> AppResult<ApiResponse<TripResponse>> {
    let trip = state.trip_service.update(user.id, id, payload).await?;
    Ok(ApiResponse::success(TripResponse::from(trip)))
}

#[utoipa::path(
    delete,
    path = "/api/trips/{id}",
    tag = "Trips",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip deleted"),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn delete_trip(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    state.trip_service.delete(user.id, id).await?;
    Ok(ApiResponse::message("Trip deleted successfully"))
}
