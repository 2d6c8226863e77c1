//! Repository layer - Data access abstraction
//!
//! Each aggregate gets a trait for dependency injection and a store backed
//! by a SeaORM connection.

mod destination_repository;
pub(crate) mod entities;
mod free_trip_repository;
pub(crate) mod itinerary_repository;
mod trip_repository;
mod user_repository;

pub use destination_repository::{DestinationRepository, DestinationStore};
pub use free_trip_repository::{FreeTripRepository, FreeTripStore};
pub use itinerary_repository::{ItineraryRepository, ItineraryStore};
pub use trip_repository::{TripRepository, TripStore};
pub use user_repository::{NewUser, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use destination_repository::MockDestinationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use free_trip_repository::MockFreeTripRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use itinerary_repository::MockItineraryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use trip_repository::MockTripRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
