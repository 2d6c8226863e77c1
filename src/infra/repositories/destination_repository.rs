//! Read-only destination catalog: cities, categories and places.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Related, Select,
};
use std::collections::{HashMap, HashSet};

use super::entities::{attraction, category, city, hotel, restaurant};
use crate::domain::{
    Attraction, Category, CityQuery, CityRef, CitySummary, Hotel, HotelFilter, PlaceFilter,
    PlaceOrder, Restaurant, RestaurantFilter,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// Active cities ordered by name, with active place counts
    async fn list_cities(&self, query: CityQuery) -> AppResult<Vec<CitySummary>>;

    /// Categories ordered by name, optionally of one type
    async fn list_categories(&self, kind: Option<String>) -> AppResult<Vec<Category>>;

    /// One page of active attractions and the total match count
    async fn attractions(
        &self,
        filter: PlaceFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Attraction>, u64)>;

    async fn hotels(
        &self,
        filter: HotelFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Hotel>, u64)>;

    async fn restaurants(
        &self,
        filter: RestaurantFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Restaurant>, u64)>;
}

pub struct DestinationStore {
    db: DatabaseConnection,
}

impl DestinationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn active_counts<E>(
        &self,
        city_id: E::Column,
        is_active: E::Column,
    ) -> AppResult<HashMap<i32, u64>>
    where
        E: EntityTrait,
    {
        let rows: Vec<(i32, i64)> = E::find()
            .select_only()
            .column(city_id)
            .column_as(Expr::col(city_id.as_column_ref()).count(), "count")
            .filter(is_active.eq(true))
            .group_by(city_id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (id, u64::try_from(count).unwrap_or_default()))
            .collect())
    }

    /// Count matches, then fetch the requested page.
    async fn page<E>(
        &self,
        select: Select<E>,
        page: PaginationParams,
    ) -> AppResult<(Vec<E::Model>, u64)>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        let total = select.clone().count(&self.db).await.map_err(AppError::from)?;
        let models = select
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models, total))
    }

    async fn embeds(
        &self,
        city_ids: HashSet<i32>,
        category_ids: HashSet<i32>,
    ) -> AppResult<Embeds> {
        let cities = if city_ids.is_empty() {
            Vec::new()
        } else {
            city::Entity::find()
                .filter(city::Column::Id.is_in(city_ids))
                .all(&self.db)
                .await
                .map_err(AppError::from)?
        };

        let categories = if category_ids.is_empty() {
            Vec::new()
        } else {
            category::Entity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(&self.db)
                .await
                .map_err(AppError::from)?
        };

        Ok(Embeds {
            cities: cities.into_iter().map(|c| (c.id, CityRef::from(c))).collect(),
            categories: categories
                .into_iter()
                .map(|c| (c.id, Category::from(c)))
                .collect(),
        })
    }
}

#[async_trait]
impl DestinationRepository for DestinationStore {
    async fn list_cities(&self, query: CityQuery) -> AppResult<Vec<CitySummary>> {
        let mut select = city::Entity::find().filter(city::Column::IsActive.eq(true));

        if let Some(country) = query.country() {
            select = select.filter(icontains(city::Column::Country, country));
        }
        if let Some(search) = query.search() {
            select = select.filter(
                Condition::any()
                    .add(icontains(city::Column::Name, search))
                    .add(icontains(city::Column::Country, search)),
            );
        }

        let cities = select
            .order_by_asc(city::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let attractions = self
            .active_counts::<attraction::Entity>(
                attraction::Column::CityId,
                attraction::Column::IsActive,
            )
            .await?;
        let hotels = self
            .active_counts::<hotel::Entity>(hotel::Column::CityId, hotel::Column::IsActive)
            .await?;
        let restaurants = self
            .active_counts::<restaurant::Entity>(
                restaurant::Column::CityId,
                restaurant::Column::IsActive,
            )
            .await?;

        Ok(cities
            .into_iter()
            .map(|model| {
                let id = model.id;
                CitySummary {
                    city: CityRef::from(model),
                    attractions_count: attractions.get(&id).copied().unwrap_or(0),
                    hotels_count: hotels.get(&id).copied().unwrap_or(0),
                    restaurants_count: restaurants.get(&id).copied().unwrap_or(0),
                }
            })
            .collect())
    }

    async fn list_categories(&self, kind: Option<String>) -> AppResult<Vec<Category>> {
        let mut select = category::Entity::find();
        if let Some(kind) = kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            select = select.filter(category::Column::Kind.eq(kind.to_lowercase()));
        }

        let models = select
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn attractions(
        &self,
        filter: PlaceFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Attraction>, u64)> {
        let select = place_select::<attraction::Entity>(&ATTRACTION_COLUMNS, &filter, None);
        let (models, total) = self.page(select, page).await?;

        let embeds = self
            .embeds(
                models.iter().map(|m| m.city_id).collect(),
                models.iter().filter_map(|m| m.category_id).collect(),
            )
            .await?;

        let items = models
            .into_iter()
            .filter_map(|m| {
                Some(Attraction {
                    city: embeds.city(m.city_id)?,
                    category: embeds.category(m.category_id),
                    id: m.id,
                    name: m.name,
                    description: m.description,
                    address: m.address,
                    latitude: m.latitude,
                    longitude: m.longitude,
                    image_url: m.image_url,
                    website: m.website,
                    rating: m.rating,
                })
            })
            .collect();

        Ok((items, total))
    }

    async fn hotels(
        &self,
        filter: HotelFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Hotel>, u64)> {
        let mut select = place_select::<hotel::Entity>(
            &HOTEL_COLUMNS,
            &filter.place,
            Some(hotel::Column::PricePerNight),
        );
        if let Some(min) = filter.min_price {
            select = select.filter(hotel::Column::PricePerNight.gte(min));
        }
        if let Some(max) = filter.max_price {
            select = select.filter(hotel::Column::PricePerNight.lte(max));
        }

        let (models, total) = self.page(select, page).await?;

        let embeds = self
            .embeds(
                models.iter().map(|m| m.city_id).collect(),
                models.iter().filter_map(|m| m.category_id).collect(),
            )
            .await?;

        let items = models
            .into_iter()
            .filter_map(|m| {
                Some(Hotel {
                    city: embeds.city(m.city_id)?,
                    category: embeds.category(m.category_id),
                    id: m.id,
                    name: m.name,
                    address: m.address,
                    description: m.description,
                    image_url: m.image_url,
                    website: m.website,
                    rating: m.rating,
                    price_per_night: m.price_per_night,
                })
            })
            .collect();

        Ok((items, total))
    }

    async fn restaurants(
        &self,
        filter: RestaurantFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Restaurant>, u64)> {
        let mut select =
            place_select::<restaurant::Entity>(&RESTAURANT_COLUMNS, &filter.place, None);
        if let Some(cuisine) = filter.cuisine.as_deref() {
            select = select.filter(icontains(restaurant::Column::Cuisine, cuisine));
        }
        if let Some(level) = filter.price_level {
            select = select.filter(restaurant::Column::PriceLevel.eq(level));
        }

        let (models, total) = self.page(select, page).await?;

        let embeds = self
            .embeds(
                models.iter().map(|m| m.city_id).collect(),
                models.iter().filter_map(|m| m.category_id).collect(),
            )
            .await?;

        let items = models
            .into_iter()
            .filter_map(|m| {
                Some(Restaurant {
                    city: embeds.city(m.city_id)?,
                    category: embeds.category(m.category_id),
                    id: m.id,
                    name: m.name,
                    address: m.address,
                    description: m.description,
                    image_url: m.image_url,
                    website: m.website,
                    cuisine: m.cuisine,
                    rating: m.rating,
                    price_level: m.price_level,
                })
            })
            .collect();

        Ok((items, total))
    }
}

// =============================================================================
// Query helpers
// =============================================================================

/// Columns shared by the three place tables
struct PlaceColumns<C> {
    id: C,
    name: C,
    description: C,
    city_id: C,
    category_id: C,
    rating: C,
    is_active: C,
}

const ATTRACTION_COLUMNS: PlaceColumns<attraction::Column> = PlaceColumns {
    id: attraction::Column::Id,
    name: attraction::Column::Name,
    description: attraction::Column::Description,
    city_id: attraction::Column::CityId,
    category_id: attraction::Column::CategoryId,
    rating: attraction::Column::Rating,
    is_active: attraction::Column::IsActive,
};

const HOTEL_COLUMNS: PlaceColumns<hotel::Column> = PlaceColumns {
    id: hotel::Column::Id,
    name: hotel::Column::Name,
    description: hotel::Column::Description,
    city_id: hotel::Column::CityId,
    category_id: hotel::Column::CategoryId,
    rating: hotel::Column::Rating,
    is_active: hotel::Column::IsActive,
};

const RESTAURANT_COLUMNS: PlaceColumns<restaurant::Column> = PlaceColumns {
    id: restaurant::Column::Id,
    name: restaurant::Column::Name,
    description: restaurant::Column::Description,
    city_id: restaurant::Column::CityId,
    category_id: restaurant::Column::CategoryId,
    rating: restaurant::Column::Rating,
    is_active: restaurant::Column::IsActive,
};

/// Active places matching `filter`, sorted by its order.
/// Search matches the place name, its description or its city's name.
fn place_select<E>(
    columns: &PlaceColumns<E::Column>,
    filter: &PlaceFilter,
    price: Option<E::Column>,
) -> Select<E>
where
    E: EntityTrait + Related<city::Entity>,
{
    let mut select = E::find().filter(columns.is_active.eq(true));

    if let Some(city_id) = filter.city_id {
        select = select.filter(columns.city_id.eq(city_id));
    }
    if let Some(category_id) = filter.category_id {
        select = select.filter(columns.category_id.eq(category_id));
    }
    if let Some(min_rating) = filter.min_rating {
        select = select.filter(columns.rating.gte(min_rating));
    }
    if let Some(search) = filter.search.as_deref() {
        select = select.inner_join(city::Entity).filter(
            Condition::any()
                .add(icontains(columns.name, search))
                .add(icontains(columns.description, search))
                .add(icontains(city::Column::Name, search)),
        );
    }

    let select = match (filter.order, price) {
        (PlaceOrder::NameAsc, _) => select.order_by_asc(columns.name),
        (PlaceOrder::NameDesc, _) => select.order_by_desc(columns.name),
        (PlaceOrder::RatingAsc, _) => select.order_by_asc(columns.rating),
        (PlaceOrder::PriceAsc, Some(price)) => select.order_by_asc(price),
        (PlaceOrder::PriceDesc, Some(price)) => select.order_by_desc(price),
        _ => select.order_by_desc(columns.rating),
    };

    select.order_by_asc(columns.id)
}

/// Case-insensitive substring match
fn icontains<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column.as_column_ref())))
        .like(format!("%{}%", needle.to_lowercase()))
}

struct Embeds {
    cities: HashMap<i32, CityRef>,
    categories: HashMap<i32, Category>,
}

impl Embeds {
    fn city(&self, id: i32) -> Option<CityRef> {
        self.cities.get(&id).cloned()
    }

    fn category(&self, id: Option<i32>) -> Option<Category> {
        id.and_then(|id| self.categories.get(&id).cloned())
    }
}
