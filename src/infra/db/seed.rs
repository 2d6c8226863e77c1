//! Starter destination catalog.
//!
//! Every row is matched on its natural key before inserting, so seeding an
//! already seeded database changes nothing.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use std::collections::HashMap;

use crate::infra::repositories::entities::{attraction, category, city, hotel, restaurant};

/// Rows created by one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub cities: usize,
    pub attractions: usize,
    pub hotels: usize,
    pub restaurants: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.categories + self.cities + self.attractions + self.hotels + self.restaurants
    }
}

// name, type, icon
const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Historic Sites", "sightseeing", "🏛️"),
    ("Museums", "culture", "🖼️"),
    ("Parks & Gardens", "nature", "🌳"),
    ("Adventure Sports", "adventure", "🏔️"),
    ("Shopping Centers", "shopping", "🛍️"),
    ("Nightlife", "nightlife", "🍸"),
    ("Fine Dining", "food", "🍽️"),
    ("Street Food", "food", "🍜"),
    ("Luxury Hotels", "hotel", "🏨"),
    ("Budget Hotels", "hotel", "🏠"),
];

// name, country, description, image
const CITIES: &[(&str, &str, &str, &str)] = &[
    (
        "Tokyo",
        "Japan",
        "A bustling metropolis blending tradition and modernity",
        "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=800&h=600&fit=crop",
    ),
    (
        "Paris",
        "France",
        "The city of light, art and cafés",
        "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=800&h=600&fit=crop",
    ),
    (
        "Dubai",
        "UAE",
        "Desert city of record-breaking towers and souks",
        "https://images.unsplash.com/photo-1512632578888-169bbbc64f33?w=800&h=600&fit=crop",
    ),
    (
        "London",
        "UK",
        "Historic capital with royal heritage and world-class museums",
        "https://images.unsplash.com/photo-1513635269975-59663e0ac1ad?w=800&h=600&fit=crop",
    ),
    (
        "New York",
        "USA",
        "The city that never sleeps",
        "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=800&h=600&fit=crop",
    ),
];

struct PlaceSeed {
    name: &'static str,
    city: &'static str,
    category: &'static str,
    description: &'static str,
    address: &'static str,
    rating: f64,
}

// place, latitude, longitude
const ATTRACTIONS: &[(PlaceSeed, f64, f64)] = &[
    (
        PlaceSeed {
            name: "Tokyo Tower",
            city: "Tokyo",
            category: "Historic Sites",
            description: "Iconic red tower with city views",
            address: "4-2-8 Shibakoen, Minato City, Tokyo",
            rating: 4.2,
        },
        35.6586,
        139.7454,
    ),
    (
        PlaceSeed {
            name: "Senso-ji Temple",
            city: "Tokyo",
            category: "Historic Sites",
            description: "Tokyo's oldest Buddhist temple",
            address: "2-3-1 Asakusa, Taito City, Tokyo",
            rating: 4.5,
        },
        35.7148,
        139.7967,
    ),
    (
        PlaceSeed {
            name: "Eiffel Tower",
            city: "Paris",
            category: "Historic Sites",
            description: "Wrought-iron lattice tower on the Champ de Mars",
            address: "Champ de Mars, 5 Avenue Anatole France, 75007 Paris",
            rating: 4.6,
        },
        48.8584,
        2.2945,
    ),
    (
        PlaceSeed {
            name: "Louvre Museum",
            city: "Paris",
            category: "Museums",
            description: "The world's largest art museum",
            address: "Rue de Rivoli, 75001 Paris",
            rating: 4.5,
        },
        48.8606,
        2.3376,
    ),
    (
        PlaceSeed {
            name: "Burj Khalifa",
            city: "Dubai",
            category: "Historic Sites",
            description: "The tallest building in the world",
            address: "1 Sheikh Mohammed bin Rashid Blvd, Dubai",
            rating: 4.7,
        },
        25.1972,
        55.2744,
    ),
    (
        PlaceSeed {
            name: "Desert Safari",
            city: "Dubai",
            category: "Adventure Sports",
            description: "Dune bashing and a Bedouin-style camp dinner",
            address: "Lahbab Desert, Dubai",
            rating: 4.4,
        },
        24.9850,
        55.7520,
    ),
    (
        PlaceSeed {
            name: "British Museum",
            city: "London",
            category: "Museums",
            description: "Two million years of human history, free to enter",
            address: "Great Russell St, London WC1B 3DG",
            rating: 4.7,
        },
        51.5194,
        -0.1270,
    ),
    (
        PlaceSeed {
            name: "Tower of London",
            city: "London",
            category: "Historic Sites",
            description: "Historic castle and home of the Crown Jewels",
            address: "Tower Hill, London EC3N 4AB",
            rating: 4.6,
        },
        51.5081,
        -0.0759,
    ),
    (
        PlaceSeed {
            name: "Central Park",
            city: "New York",
            category: "Parks & Gardens",
            description: "843 acres of lawns, lakes and trails in Manhattan",
            address: "Central Park, New York, NY",
            rating: 4.8,
        },
        40.7829,
        -73.9654,
    ),
    (
        PlaceSeed {
            name: "Metropolitan Museum of Art",
            city: "New York",
            category: "Museums",
            description: "Encyclopedic art museum on Fifth Avenue",
            address: "1000 5th Ave, New York, NY 10028",
            rating: 4.8,
        },
        40.7794,
        -73.9632,
    ),
];

// place, price per night
const HOTELS: &[(PlaceSeed, f64)] = &[
    (
        PlaceSeed {
            name: "The Ritz-Carlton Tokyo",
            city: "Tokyo",
            category: "Luxury Hotels",
            description: "Luxury hotel above Roppongi",
            address: "9-7-1 Akasaka, Minato City, Tokyo",
            rating: 4.8,
        },
        800.0,
    ),
    (
        PlaceSeed {
            name: "Capsule Hotel Shibuya",
            city: "Tokyo",
            category: "Budget Hotels",
            description: "Modern capsule hotel experience",
            address: "1-19-14 Jinnan, Shibuya City, Tokyo",
            rating: 4.0,
        },
        50.0,
    ),
    (
        PlaceSeed {
            name: "The Ritz Paris",
            city: "Paris",
            category: "Luxury Hotels",
            description: "Historic luxury hotel on Place Vendôme",
            address: "15 Place Vendôme, 75001 Paris",
            rating: 4.7,
        },
        1200.0,
    ),
    (
        PlaceSeed {
            name: "Atlantis The Palm",
            city: "Dubai",
            category: "Luxury Hotels",
            description: "Resort with a waterpark at the tip of the Palm",
            address: "Crescent Rd, The Palm, Dubai",
            rating: 4.6,
        },
        650.0,
    ),
    (
        PlaceSeed {
            name: "The Hoxton Holborn",
            city: "London",
            category: "Budget Hotels",
            description: "Friendly hotel close to the British Museum",
            address: "199-206 High Holborn, London WC1V 7BD",
            rating: 4.4,
        },
        180.0,
    ),
    (
        PlaceSeed {
            name: "Pod 51",
            city: "New York",
            category: "Budget Hotels",
            description: "Compact rooms in Midtown East",
            address: "230 E 51st St, New York, NY 10022",
            rating: 4.0,
        },
        120.0,
    ),
];

// place, cuisine, price level
const RESTAURANTS: &[(PlaceSeed, &str, &str)] = &[
    (
        PlaceSeed {
            name: "Sukiyabashi Jiro",
            city: "Tokyo",
            category: "Fine Dining",
            description: "World-famous sushi counter",
            address: "4-2-15 Ginza, Chuo City, Tokyo",
            rating: 4.9,
        },
        "Japanese",
        "$$$$",
    ),
    (
        PlaceSeed {
            name: "Ramen Yashichi",
            city: "Tokyo",
            category: "Street Food",
            description: "Traditional ramen shop",
            address: "3-57-8 Sangenjaya, Setagaya City, Tokyo",
            rating: 4.3,
        },
        "Ramen",
        "$",
    ),
    (
        PlaceSeed {
            name: "L'Ami Jean",
            city: "Paris",
            category: "Fine Dining",
            description: "Traditional Basque-leaning French bistro",
            address: "27 Rue Malar, 75007 Paris",
            rating: 4.4,
        },
        "French",
        "$$",
    ),
    (
        PlaceSeed {
            name: "Nobu Dubai",
            city: "Dubai",
            category: "Fine Dining",
            description: "Japanese-Peruvian fusion at Atlantis",
            address: "Atlantis The Palm, Dubai",
            rating: 4.5,
        },
        "Japanese",
        "$$$",
    ),
    (
        PlaceSeed {
            name: "Borough Market Kitchen",
            city: "London",
            category: "Street Food",
            description: "Stalls and street food under the railway arches",
            address: "8 Southwark St, London SE1 1TL",
            rating: 4.5,
        },
        "British",
        "$",
    ),
    (
        PlaceSeed {
            name: "Katz's Delicatessen",
            city: "New York",
            category: "Street Food",
            description: "Pastrami on rye since 1888",
            address: "205 E Houston St, New York, NY 10002",
            rating: 4.5,
        },
        "Deli",
        "$$",
    ),
];

/// Insert whatever part of the starter catalog is missing, in one transaction.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<SeedReport, DbErr> {
    let txn = db.begin().await?;
    let mut report = SeedReport::default();

    let mut categories = HashMap::new();
    for &(name, kind, icon) in CATEGORIES {
        let (id, created) = ensure_category(&txn, name, kind, icon).await?;
        report.categories += usize::from(created);
        categories.insert(name, id);
    }

    let mut cities = HashMap::new();
    for &(name, country, description, image_url) in CITIES {
        let (id, created) = ensure_city(&txn, name, country, description, image_url).await?;
        report.cities += usize::from(created);
        cities.insert(name, id);
    }

    let resolve = |seed: &PlaceSeed| -> Result<(i32, Option<i32>), DbErr> {
        let city_id = cities
            .get(seed.city)
            .copied()
            .ok_or_else(|| DbErr::RecordNotFound(format!("seed city {}", seed.city)))?;
        Ok((city_id, categories.get(seed.category).copied()))
    };

    let now = Utc::now();

    for (seed, latitude, longitude) in ATTRACTIONS {
        let (city_id, category_id) = resolve(seed)?;
        let exists = attraction::Entity::find()
            .filter(attraction::Column::Name.eq(seed.name))
            .filter(attraction::Column::CityId.eq(city_id))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            continue;
        }
        attraction::ActiveModel {
            name: Set(seed.name.to_string()),
            city_id: Set(city_id),
            category_id: Set(category_id),
            description: Set(seed.description.to_string()),
            address: Set(seed.address.to_string()),
            latitude: Set(Some(*latitude)),
            longitude: Set(Some(*longitude)),
            image_url: Set(String::new()),
            website: Set(String::new()),
            rating: Set(seed.rating),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        report.attractions += 1;
    }

    for (seed, price) in HOTELS {
        let (city_id, category_id) = resolve(seed)?;
        let exists = hotel::Entity::find()
            .filter(hotel::Column::Name.eq(seed.name))
            .filter(hotel::Column::CityId.eq(city_id))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            continue;
        }
        hotel::ActiveModel {
            name: Set(seed.name.to_string()),
            city_id: Set(city_id),
            category_id: Set(category_id),
            address: Set(seed.address.to_string()),
            description: Set(seed.description.to_string()),
            image_url: Set(String::new()),
            website: Set(String::new()),
            rating: Set(seed.rating),
            price_per_night: Set(Some(*price)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        report.hotels += 1;
    }

    for (seed, cuisine, price_level) in RESTAURANTS {
        let (city_id, category_id) = resolve(seed)?;
        let exists = restaurant::Entity::find()
            .filter(restaurant::Column::Name.eq(seed.name))
            .filter(restaurant::Column::CityId.eq(city_id))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            continue;
        }
        restaurant::ActiveModel {
            name: Set(seed.name.to_string()),
            city_id: Set(city_id),
            category_id: Set(category_id),
            address: Set(seed.address.to_string()),
            description: Set(seed.description.to_string()),
            image_url: Set(String::new()),
            website: Set(String::new()),
            cuisine: Set(cuisine.to_string()),
            rating: Set(seed.rating),
            price_level: Set(price_level.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        report.restaurants += 1;
    }

    txn.commit().await?;
    Ok(report)
}

async fn ensure_category<C: ConnectionTrait>(
    db: &C,
    name: &str,
    kind: &str,
    icon: &str,
) -> Result<(i32, bool), DbErr> {
    if let Some(existing) = category::Entity::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok((existing.id, false));
    }

    let created = category::ActiveModel {
        name: Set(name.to_string()),
        kind: Set(kind.to_string()),
        icon: Set(icon.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok((created.id, true))
}

async fn ensure_city<C: ConnectionTrait>(
    db: &C,
    name: &str,
    country: &str,
    description: &str,
    image_url: &str,
) -> Result<(i32, bool), DbErr> {
    if let Some(existing) = city::Entity::find()
        .filter(city::Column::Name.eq(name))
        .filter(city::Column::Country.eq(country))
        .one(db)
        .await?
    {
        return Ok((existing.id, false));
    }

    let now = Utc::now();
    let created = city::ActiveModel {
        name: Set(name.to_string()),
        country: Set(country.to_string()),
        description: Set(description.to_string()),
        image_url: Set(image_url.to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok((created.id, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_place_references_a_seeded_city_and_category() {
        let cities: Vec<&str> = CITIES.iter().map(|c| c.0).collect();
        let categories: Vec<&str> = CATEGORIES.iter().map(|c| c.0).collect();

        let places = ATTRACTIONS
            .iter()
            .map(|(p, _, _)| p)
            .chain(HOTELS.iter().map(|(p, _)| p))
            .chain(RESTAURANTS.iter().map(|(p, _, _)| p));
        for place in places {
            assert!(cities.contains(&place.city), "{}", place.name);
            assert!(categories.contains(&place.category), "{}", place.name);
        }
    }

    #[test]
    fn test_starter_cities() {
        let names: Vec<&str> = CITIES.iter().map(|c| c.0).collect();
        assert_eq!(names, ["Tokyo", "Paris", "Dubai", "London", "New York"]);
    }
}
