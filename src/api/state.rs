//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database, TextGenerator};
use crate::services::{
    AuthService, DestinationService, FreeTripService, ServiceContainer, Services, TravelService,
    TripService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub trip_service: Arc<dyn TripService>,
    pub free_trip_service: Arc<dyn FreeTripService>,
    pub destination_service: Arc<dyn DestinationService>,
    pub travel_service: Arc<dyn TravelService>,
    /// Shared cache (Redis or in-process)
    pub cache: Cache,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// `llm` is `None` when no OpenRouter key is configured, which pins
    /// generation to templates.
    pub fn from_config(
        database: Arc<Database>,
        cache: Cache,
        config: Config,
        llm: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let services = Services::from_connection(
            database.get_connection(),
            config,
            cache.clone(),
            llm,
        );
        Self::from_container(&services, cache, database)
    }

    /// Create application state from any service container (e.g. a mock).
    pub fn from_container(
        container: &dyn ServiceContainer,
        cache: Cache,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            trip_service: container.trips(),
            free_trip_service: container.free_trips(),
            destination_service: container.destinations(),
            travel_service: container.travel(),
            cache,
            database,
        }
    }
}
