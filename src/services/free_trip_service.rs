//! Free trip service - Anonymous trips grouped by session id.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::config::FREE_TRIPS_LISTING_LIMIT;
use crate::domain::{FreeTrip, FreeTripDraft, FreeTripUpdate};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait FreeTripService: Send + Sync {
    /// Validate and store a draft; a session id is minted when absent
    async fn create(&self, draft: FreeTripDraft) -> AppResult<FreeTrip>;

    async fn get(&self, id: i32) -> AppResult<FreeTrip>;

    async fn list_session(&self, session_id: &str) -> AppResult<Vec<FreeTrip>>;

    /// Newest active trips across all sessions
    async fn list_recent(&self) -> AppResult<Vec<FreeTrip>>;

    async fn update(&self, id: i32, changes: FreeTripUpdate) -> AppResult<FreeTrip>;
}

pub struct FreeTripManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FreeTripManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[async_trait]
impl<U: UnitOfWork> FreeTripService for FreeTripManager<U> {
    async fn create(&self, draft: FreeTripDraft) -> AppResult<FreeTrip> {
        let new_trip = draft.into_new(today())?;
        let trip = self.uow.free_trips().create(new_trip).await?;
        tracing::debug!(trip_id = trip.id, session_id = %trip.session_id, "Free trip created");
        Ok(trip)
    }

    async fn get(&self, id: i32) -> AppResult<FreeTrip> {
        self.uow
            .free_trips()
            .find_active(id)
            .await?
            .ok_or_not_found("Trip")
    }

    async fn list_session(&self, session_id: &str) -> AppResult<Vec<FreeTrip>> {
        self.uow.free_trips().list_session(session_id).await
    }

    async fn list_recent(&self) -> AppResult<Vec<FreeTrip>> {
        self.uow.free_trips().list_recent(FREE_TRIPS_LISTING_LIMIT).await
    }

    async fn update(&self, id: i32, changes: FreeTripUpdate) -> AppResult<FreeTrip> {
        let existing = self.get(id).await?;
        let updated = changes.apply_to(existing, today())?;
        self.uow.free_trips().update(updated).await
    }
}
