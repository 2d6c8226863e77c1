//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

pub mod ai;
mod auth_service;
pub mod container;
mod destination_service;
mod free_trip_service;
mod travel_service;
mod trip_service;

// Service Container
pub use container::{text_generator, ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthPayload, AuthService, Authenticator, Claims};
pub use destination_service::{DestinationCatalog, DestinationService};
pub use free_trip_service::{FreeTripManager, FreeTripService};
pub use travel_service::{
    GeneratedItinerary, Performance, RegenerateBudgetRequest, RegeneratedBudget, TravelPlanner,
    TravelService,
};
pub use trip_service::{TripManager, TripService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
