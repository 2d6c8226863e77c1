//! Service Container - Centralized service access.
//!
//! SOLID (DIP): Handlers depend on service traits, not implementations.

use std::sync::Arc;

use super::ai::{GenerationCache, TravelGenerator};
use super::{
    AuthService, Authenticator, DestinationCatalog, DestinationService, FreeTripManager,
    FreeTripService, TravelPlanner, TravelService, TripManager, TripService,
};
use crate::config::{AiSettings, Config};
use crate::infra::{Cache, OpenRouterClient, Persistence, TextGenerator};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn trips(&self) -> Arc<dyn TripService>;

    fn free_trips(&self) -> Arc<dyn FreeTripService>;

    fn destinations(&self) -> Arc<dyn DestinationService>;

    fn travel(&self) -> Arc<dyn TravelService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    trip_service: Arc<dyn TripService>,
    free_trip_service: Arc<dyn FreeTripService>,
    destination_service: Arc<dyn DestinationService>,
    travel_service: Arc<dyn TravelService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        trip_service: Arc<dyn TripService>,
        free_trip_service: Arc<dyn FreeTripService>,
        destination_service: Arc<dyn DestinationService>,
        travel_service: Arc<dyn TravelService>,
    ) -> Self {
        Self {
            auth_service,
            trip_service,
            free_trip_service,
            destination_service,
            travel_service,
        }
    }

    /// Wire every service over one connection, cache and optional text generator.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        cache: Cache,
        llm: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let generator = Arc::new(TravelGenerator::new(
            llm,
            &config.ai,
            GenerationCache::new(cache.clone()),
        ));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config, cache.retaining())),
            trip_service: Arc::new(TripManager::new(uow.clone())),
            free_trip_service: Arc::new(FreeTripManager::new(uow.clone())),
            destination_service: Arc::new(DestinationCatalog::new(uow.clone())),
            travel_service: Arc::new(TravelPlanner::new(uow, generator)),
        }
    }
}

/// OpenRouter client when a usable key is configured.
pub fn text_generator(settings: &AiSettings) -> Option<Arc<dyn TextGenerator>> {
    settings.api_key()?;
    match OpenRouterClient::new(settings) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "Text generation client unavailable");
            None
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn trips(&self) -> Arc<dyn TripService> {
        self.trip_service.clone()
    }

    fn free_trips(&self) -> Arc<dyn FreeTripService> {
        self.free_trip_service.clone()
    }

    fn destinations(&self) -> Arc<dyn DestinationService> {
        self.destination_service.clone()
    }

    fn travel(&self) -> Arc<dyn TravelService> {
        self.travel_service.clone()
    }
}
