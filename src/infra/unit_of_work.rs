//! Unit of Work: repository access and transaction lifecycle.
//!
//! Reads go through the shared repositories. A generation run writes the
//! itinerary, its budget estimate and its log rows through one
//! [`TransactionContext`] so a failure leaves nothing half-saved.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::itinerary_repository::{
    insert_itinerary, insert_log, replace_budget, upsert_estimate,
};
use super::repositories::{
    DestinationRepository, DestinationStore, FreeTripRepository, FreeTripStore,
    ItineraryRepository, ItineraryStore, TripRepository, TripStore, UserRepository, UserStore,
};
use crate::domain::{
    AiItinerary, BudgetEstimate, BudgetFigures, BudgetPlan, NewAiItinerary, NewGenerationLog,
};
use crate::errors::{AppError, AppResult};

/// Boxed body of a transaction
pub type TransactionFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction methods; tests
/// implement it over mock repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn trips(&self) -> Arc<dyn TripRepository>;

    fn free_trips(&self) -> Arc<dyn FreeTripRepository>;

    fn destinations(&self) -> Arc<dyn DestinationRepository>;

    fn itineraries(&self) -> Arc<dyn ItineraryRepository>;

    /// Run `f` in a read-committed transaction; commit on `Ok`, roll back on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn itineraries(&self) -> TxItineraryRepository<'_> {
        TxItineraryRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    trip_repo: Arc<TripStore>,
    free_trip_repo: Arc<FreeTripStore>,
    destination_repo: Arc<DestinationStore>,
    itinerary_repo: Arc<ItineraryStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            trip_repo: Arc::new(TripStore::new(db.clone())),
            free_trip_repo: Arc::new(FreeTripStore::new(db.clone())),
            destination_repo: Arc::new(DestinationStore::new(db.clone())),
            itinerary_repo: Arc::new(ItineraryStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn trips(&self) -> Arc<dyn TripRepository> {
        self.trip_repo.clone()
    }

    fn free_trips(&self) -> Arc<dyn FreeTripRepository> {
        self.free_trip_repo.clone()
    }

    fn destinations(&self) -> Arc<dyn DestinationRepository> {
        self.destination_repo.clone()
    }

    fn itineraries(&self) -> Arc<dyn ItineraryRepository> {
        self.itinerary_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }
}

/// Itinerary writes inside a transaction.
pub struct TxItineraryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxItineraryRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new itinerary under a fresh id
    pub async fn insert(&self, itinerary: NewAiItinerary) -> AppResult<AiItinerary> {
        insert_itinerary(self.txn, itinerary).await
    }

    /// Overwrite the stored budget plan
    pub async fn replace_budget(&self, id: Uuid, budget: &BudgetPlan) -> AppResult<AiItinerary> {
        replace_budget(self.txn, id, budget).await
    }

    pub async fn upsert_estimate(
        &self,
        itinerary_id: Uuid,
        figures: BudgetFigures,
    ) -> AppResult<BudgetEstimate> {
        upsert_estimate(self.txn, itinerary_id, figures).await
    }

    pub async fn log(&self, itinerary_id: Uuid, log: NewGenerationLog) -> AppResult<()> {
        insert_log(self.txn, itinerary_id, log).await
    }
}
