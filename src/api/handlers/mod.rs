//! HTTP request handlers.

pub mod ai_travel_handler;
pub mod auth_handler;
pub mod destination_handler;
pub mod free_trip_handler;
pub mod trip_handler;

pub use ai_travel_handler::ai_travel_routes;
pub use auth_handler::auth_routes;
pub use destination_handler::destination_routes;
pub use free_trip_handler::free_trip_routes;
pub use trip_handler::trip_routes;
