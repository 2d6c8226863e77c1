//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    ai_travel_handler, auth_handler, destination_handler, free_trip_handler, trip_handler,
};
use crate::domain::{
    AccommodationBudget, ActivitiesBudget, Activity, AiItinerary, Attraction, BudgetEstimate,
    BudgetPlan, BudgetTier, Category, CategoryType, CityRef, CitySummary, CreateTrip,
    CurrencyInfo, DailyBreakdown, DayPlan, FoodBudget, FreeTrip, FreeTripDraft, FreeTripResponse,
    FreeTripUpdate, GenerateItineraryRequest, Hotel, ItineraryContent, ItineraryDetail,
    ItinerarySummary, MiscellaneousBudget, PlacePin, PricedAttraction, Recommendations,
    Restaurant, ShoppingBudget, TotalEstimates, TransportationBudget, TravelStyle, Trip,
    TripResponse, UpdateTrip, UserResponse,
};
use crate::services::{
    AuthPayload, GeneratedItinerary, Performance, RegenerateBudgetRequest, RegeneratedBudget,
};

/// OpenAPI documentation for the Travel Planner API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel Planner API",
        version = "0.1.0",
        description = "Trip planning with AI-generated itineraries, budgets and a destination catalog"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Accounts
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::check_auth,
        // Trips
        trip_handler::create_trip,
        trip_handler::list_trips,
        trip_handler::get_trip,
        trip_handler::update_trip,
        trip_handler::delete_trip,
        // Free trips
        free_trip_handler::create_free_trip,
        free_trip_handler::list_session,
        free_trip_handler::list_recent,
        free_trip_handler::get_free_trip,
        free_trip_handler::update_free_trip,
        // AI travel
        ai_travel_handler::generate_itinerary,
        ai_travel_handler::get_itinerary,
        ai_travel_handler::delete_itinerary,
        ai_travel_handler::my_itineraries,
        ai_travel_handler::session_itineraries,
        ai_travel_handler::regenerate_budget,
        // Destinations
        destination_handler::list_cities,
        destination_handler::list_categories,
        destination_handler::list_attractions,
        destination_handler::list_hotels,
        destination_handler::list_restaurants,
    ),
    components(
        schemas(
            // Accounts
            UserResponse,
            AuthPayload,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::AuthStatus,
            // Trips
            Trip,
            TripResponse,
            CreateTrip,
            UpdateTrip,
            FreeTrip,
            FreeTripResponse,
            FreeTripDraft,
            FreeTripUpdate,
            // Generation
            GenerateItineraryRequest,
            BudgetTier,
            TravelStyle,
            GeneratedItinerary,
            Performance,
            RegenerateBudgetRequest,
            RegeneratedBudget,
            AiItinerary,
            ItineraryDetail,
            ItinerarySummary,
            BudgetEstimate,
            ItineraryContent,
            DayPlan,
            Activity,
            Recommendations,
            PlacePin,
            BudgetPlan,
            AccommodationBudget,
            TransportationBudget,
            FoodBudget,
            ActivitiesBudget,
            PricedAttraction,
            ShoppingBudget,
            MiscellaneousBudget,
            TotalEstimates,
            DailyBreakdown,
            CurrencyInfo,
            // Destinations
            CityRef,
            CitySummary,
            Category,
            CategoryType,
            Attraction,
            Hotel,
            Restaurant,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Registration, login and token revocation"),
        (name = "Trips", description = "Trips of signed-in users"),
        (name = "Free trips", description = "Anonymous trips grouped by session"),
        (name = "AI travel", description = "Generated itineraries and budgets"),
        (name = "Destinations", description = "City, attraction, hotel and restaurant catalog")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_group_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/register",
            "/api/trips/{id}",
            "/api/free-trips/session/{session_id}",
            "/api/ai-travel/generate",
            "/api/destinations/hotels",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
