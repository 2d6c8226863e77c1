//! Destination catalog handlers (public, read-only).

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::{
    Attraction, Category, CategoryQuery, CityQuery, CitySummary, Hotel, PlaceQuery, Restaurant,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated};

pub fn destination_routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/categories", get(list_categories))
        .route("/attractions", get(list_attractions))
        .route("/hotels", get(list_hotels))
        .route("/restaurants", get(list_restaurants))
}

/// Active cities with place counts
#[utoipa::path(
    get,
    path = "/api/destinations/cities",
    tag = "Destinations",
    params(CityQuery),
    responses((status = 200, description = "Cities ordered by name", body = Vec<CitySummary>))
)]
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> AppResult<ApiResponse<Vec<CitySummary>>> {
    let cities = state.destination_service.cities(query).await?;
    Ok(ApiResponse::success(cities))
}

#[utoipa::path(
    get,
    path = "/api/destinations/categories",
    tag = "Destinations",
    params(CategoryQuery),
    responses((status = 200, description = "Categories", body = Vec<Category>))
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<ApiResponse<Vec<Category>>> {
    let categories = state.destination_service.categories(query).await?;
    Ok(ApiResponse::success(categories))
}

#[utoipa::path(
    get,
    path = "/api/destinations/attractions",
    tag = "Destinations",
    params(PlaceQuery),
    responses((status = 200, description = "Paginated attractions", body = Vec<Attraction>))
)]
pub async fn list_attractions(
    State(state): State<AppState>,
    Query(query): Query<PlaceQuery>,
) -> AppResult<ApiResponse<Paginated<Attraction>>> {
    let page = state.destination_service.attractions(query).await?;
    Ok(ApiResponse::success(page))
}

#[utoipa::path(
    get,
    path = "/api/destinations/hotels",
    tag = "Destinations",
    params(PlaceQuery),
    responses((status = 200, description = "Paginated hotels", body = Vec<Hotel>))
)]
pub async fn list_hotels(
    State(state): State<AppState>,
    Query(query): Query<PlaceQuery>,
) -> AppResult<ApiResponse<Paginated<Hotel>>> {
    let page = state.destination_service.hotels(query).await?;
    Ok(ApiResponse::success(page))
}

#[utoipa::path(
    get,
    path = "/api/destinations/restaurants",
    tag = "Destinations",
    params(PlaceQuery),
    responses((status = 200, description = "Paginated restaurants", body = Vec<Restaurant>))
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(query): Query<PlaceQuery>,
) -> AppResult<ApiResponse<Paginated<Restaurant>>> {
    let page = state.destination_service.restaurants(query).await?;
    Ok(ApiResponse::success(page))
}
