//! Destination service - Read-only catalog queries.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Attraction, Category, CategoryQuery, CityQuery, CitySummary, Hotel, PlaceQuery, Restaurant,
};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::types::Paginated;

#[async_trait]
pub trait DestinationService: Send + Sync {
    async fn cities(&self, query: CityQuery) -> AppResult<Vec<CitySummary>>;

    async fn categories(&self, query: CategoryQuery) -> AppResult<Vec<Category>>;

    async fn attractions(&self, query: PlaceQuery) -> AppResult<Paginated<Attraction>>;

    async fn hotels(&self, query: PlaceQuery) -> AppResult<Paginated<Hotel>>;

    async fn restaurants(&self, query: PlaceQuery) -> AppResult<Paginated<Restaurant>>;
}

pub struct DestinationCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DestinationCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DestinationService for DestinationCatalog<U> {
    async fn cities(&self, query: CityQuery) -> AppResult<Vec<CitySummary>> {
        self.uow.destinations().list_cities(query).await
    }

    async fn categories(&self, query: CategoryQuery) -> AppResult<Vec<Category>> {
        let kind = query
            .kind
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self.uow.destinations().list_categories(kind).await
    }

    async fn attractions(&self, query: PlaceQuery) -> AppResult<Paginated<Attraction>> {
        let page = query.pagination();
        let (items, total) = self
            .uow
            .destinations()
            .attractions(query.attraction_filter(), page)
            .await?;
        Ok(Paginated::new(items, page, total))
    }

    async fn hotels(&self, query: PlaceQuery) -> AppResult<Paginated<Hotel>> {
        let page = query.pagination();
        let (items, total) = self
            .uow
            .destinations()
            .hotels(query.hotel_filter(), page)
            .await?;
        Ok(Paginated::new(items, page, total))
    }

    async fn restaurants(&self, query: PlaceQuery) -> AppResult<Paginated<Restaurant>> {
        let page = query.pagination();
        let (items, total) = self
            .uow
            .destinations()
            .restaurants(query.restaurant_filter(), page)
            .await?;
        Ok(Paginated::new(items, page, total))
    }
}
