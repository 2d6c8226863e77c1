//! Domain layer - Core travel planning entities and rules
//!
//! Types here carry no database or HTTP concerns beyond serde and
//! OpenAPI schema derives. Validation that does not need I/O lives next
//! to the type it validates.

pub mod content;
pub mod destination;
pub mod free_trip;
pub mod itinerary;
pub mod password;
pub mod planning;
pub mod trip;
pub mod user;

pub use content::{
    AccommodationBudget, ActivitiesBudget, Activity, BudgetPlan, CurrencyInfo, DailyBreakdown,
    DayPlan, FoodBudget, ItineraryContent, MiscellaneousBudget, PlacePin, PricedAttraction,
    Recommendations, ShoppingBudget, TotalEstimates, TransportationBudget,
};
pub use destination::{
    Attraction, Category, CategoryQuery, CategoryType, CityQuery, CityRef, CitySummary, Hotel,
    HotelFilter, PlaceFilter, PlaceOrder, PlaceQuery, Restaurant, RestaurantFilter,
};
pub use free_trip::{FreeTrip, FreeTripDraft, FreeTripResponse, FreeTripUpdate, NewFreeTrip};
pub use itinerary::{
    AiItinerary, BudgetEstimate, BudgetFigures, GeneratedPlan, GenerationKind, ItineraryDetail,
    ItinerarySummary, NewAiItinerary, NewGenerationLog,
};
pub use password::Password;
pub use planning::{
    ensure_date_window, BudgetTier, GenerateItineraryRequest, TravelStyle, TripParameters,
};
pub use trip::{inclusive_days, CreateTrip, Trip, TripResponse, UpdateTrip};
pub use user::{User, UserResponse};
