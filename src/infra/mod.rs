//! Infrastructure layer - External systems integration
//!
//! Database connection and repositories, the key/value cache and the
//! text-generation API client.

pub mod cache;
pub mod db;
pub mod llm;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, CacheBackend, MemoryBackend, RedisBackend};
pub use db::{Database, Migrator, SeedReport};
pub use llm::{extract_json, parse_reply, CompletionRequest, OpenRouterClient, TextGenerator};
pub use repositories::{
    DestinationRepository, DestinationStore, FreeTripRepository, FreeTripStore,
    ItineraryRepository, ItineraryStore, NewUser, TripRepository, TripStore, UserRepository,
    UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TransactionFuture, TxItineraryRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use llm::MockTextGenerator;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockDestinationRepository, MockFreeTripRepository, MockItineraryRepository,
    MockTripRepository, MockUserRepository,
};
