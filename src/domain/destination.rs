//! Destination catalog: cities, categories and the places listed in them.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::types::PaginationParams;

/// Kind of a catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Sightseeing,
    Food,
    Nature,
    Adventure,
    Shopping,
    Culture,
    Nightlife,
    Hotel,
    Restaurant,
    #[default]
    Other,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Sightseeing => "sightseeing",
            CategoryType::Food => "food",
            CategoryType::Nature => "nature",
            CategoryType::Adventure => "adventure",
            CategoryType::Shopping => "shopping",
            CategoryType::Culture => "culture",
            CategoryType::Nightlife => "nightlife",
            CategoryType::Hotel => "hotel",
            CategoryType::Restaurant => "restaurant",
            CategoryType::Other => "other",
        }
    }

    /// Lookup by stored name; unknown names read as `Other`.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "sightseeing" => CategoryType::Sightseeing,
            "food" => CategoryType::Food,
            "nature" => CategoryType::Nature,
            "adventure" => CategoryType::Adventure,
            "shopping" => CategoryType::Shopping,
            "culture" => CategoryType::Culture,
            "nightlife" => CategoryType::Nightlife,
            "hotel" => CategoryType::Hotel,
            "restaurant" => CategoryType::Restaurant,
            _ => CategoryType::Other,
        }
    }
}

/// City embedded in place listings
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CityRef {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub description: String,
    pub image_url: String,
}

/// City with active place counts, as listed by `/cities`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CitySummary {
    #[serde(flatten)]
    pub city: CityRef,
    pub attractions_count: u64,
    pub hotels_count: u64,
    pub restaurants_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Attraction {
    pub id: i32,
    pub name: String,
    pub city: CityRef,
    pub category: Option<Category>,
    pub description: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: String,
    pub website: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Hotel {
    pub id: i32,
    pub name: String,
    pub city: CityRef,
    pub category: Option<Category>,
    pub address: String,
    pub description: String,
    pub image_url: String,
    pub website: String,
    pub rating: f64,
    pub price_per_night: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub city: CityRef,
    pub category: Option<Category>,
    pub address: String,
    pub description: String,
    pub image_url: String,
    pub website: String,
    pub cuisine: String,
    pub rating: f64,
    pub price_level: String,
}

// =============================================================================
// Query parameters
// =============================================================================

/// `/cities` query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CityQuery {
    /// Case-insensitive match on country
    pub country: Option<String>,
    /// Case-insensitive match on name or country
    pub search: Option<String>,
}

impl CityQuery {
    pub fn country(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }

    pub fn search(&self) -> Option<&str> {
        non_blank(self.search.as_deref())
    }
}

/// `/categories` query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    #[serde(rename = "type")]
    #[param(rename = "type")]
    pub kind: Option<String>,
}

/// Raw query shared by the attraction, hotel and restaurant listings.
///
/// Values stay strings so that a malformed number is dropped instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlaceQuery {
    pub city_id: Option<String>,
    pub category_id: Option<String>,
    pub min_rating: Option<String>,
    pub search: Option<String>,
    /// `name`, `-name`, `rating`, `-rating`; hotels also take `price_per_night`
    pub order_by: Option<String>,
    /// Hotels only
    pub min_price: Option<String>,
    /// Hotels only
    pub max_price: Option<String>,
    /// Restaurants only
    pub cuisine: Option<String>,
    /// Restaurants only
    pub price_level: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Sort order of a place listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceOrder {
    NameAsc,
    NameDesc,
    RatingAsc,
    #[default]
    RatingDesc,
    PriceAsc,
    PriceDesc,
}

impl PlaceOrder {
    /// Parse `order_by`; price ordering only when `allow_price`.
    pub fn parse(raw: Option<&str>, allow_price: bool) -> Self {
        match raw.map(str::trim) {
            Some("name") => PlaceOrder::NameAsc,
            Some("-name") => PlaceOrder::NameDesc,
            Some("rating") => PlaceOrder::RatingAsc,
            Some("price_per_night") if allow_price => PlaceOrder::PriceAsc,
            Some("-price_per_night") if allow_price => PlaceOrder::PriceDesc,
            _ => PlaceOrder::RatingDesc,
        }
    }
}

/// Parsed place filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceFilter {
    pub city_id: Option<i32>,
    pub category_id: Option<i32>,
    pub min_rating: Option<f64>,
    pub search: Option<String>,
    pub order: PlaceOrder,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelFilter {
    pub place: PlaceFilter,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    pub place: PlaceFilter,
    pub cuisine: Option<String>,
    pub price_level: Option<String>,
}

impl PlaceQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_query(self.page.as_deref(), self.page_size.as_deref())
    }

    fn place_filter(&self, allow_price: bool) -> PlaceFilter {
        PlaceFilter {
            city_id: parse_lenient(self.city_id.as_deref()),
            category_id: parse_lenient(self.category_id.as_deref()),
            min_rating: parse_lenient(self.min_rating.as_deref()),
            search: non_blank(self.search.as_deref()).map(str::to_string),
            order: PlaceOrder::parse(self.order_by.as_deref(), allow_price),
        }
    }

    pub fn attraction_filter(&self) -> PlaceFilter {
        self.place_filter(false)
    }

    pub fn hotel_filter(&self) -> HotelFilter {
        HotelFilter {
            place: self.place_filter(true),
            min_price: parse_lenient(self.min_price.as_deref()),
            max_price: parse_lenient(self.max_price.as_deref()),
        }
    }

    pub fn restaurant_filter(&self) -> RestaurantFilter {
        RestaurantFilter {
            place: self.place_filter(false),
            cuisine: non_blank(self.cuisine.as_deref()).map(str::to_string),
            price_level: non_blank(self.price_level.as_deref()).map(str::to_string),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_lenient<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    non_blank(value).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_numbers_are_ignored() {
        let query = PlaceQuery {
            city_id: Some("3".into()),
            min_rating: Some("four".into()),
            ..Default::default()
        };
        let filter = query.attraction_filter();
        assert_eq!(filter.city_id, Some(3));
        assert_eq!(filter.min_rating, None);
        assert_eq!(filter.order, PlaceOrder::RatingDesc);
    }

    #[test]
    fn test_price_order_only_for_hotels() {
        let query = PlaceQuery {
            order_by: Some("-price_per_night".into()),
            ..Default::default()
        };
        assert_eq!(query.hotel_filter().place.order, PlaceOrder::PriceDesc);
        assert_eq!(query.attraction_filter().order, PlaceOrder::RatingDesc);
    }

    #[test]
    fn test_restaurant_filter_reads_cuisine() {
        let query = PlaceQuery {
            cuisine: Some(" Ramen ".into()),
            price_level: Some("".into()),
            search: Some("   ".into()),
            ..Default::default()
        };
        let filter = query.restaurant_filter();
        assert_eq!(filter.cuisine.as_deref(), Some("Ramen"));
        assert!(filter.price_level.is_none());
        assert!(filter.place.search.is_none());
    }

    #[test]
    fn test_page_size_is_capped() {
        let query = PlaceQuery {
            page: Some("2".into()),
            page_size: Some("500".into()),
            ..Default::default()
        };
        let page = query.pagination();
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 100);
    }

    #[test]
    fn test_category_type_round_trip_names() {
        assert_eq!(CategoryType::from_stored("nightlife"), CategoryType::Nightlife);
        assert_eq!(CategoryType::from_stored("bogus"), CategoryType::Other);
        assert_eq!(
            serde_json::to_value(CategoryType::Food).unwrap(),
            serde_json::json!("food")
        );
    }
}
