//! Trip service - Trips owned by signed-in users.
//!
//! Every lookup is scoped to the owner; someone else's trip reads as missing.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{ensure_date_window, CreateTrip, Trip, UpdateTrip};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait TripService: Send + Sync {
    async fn create(&self, user_id: i32, input: CreateTrip) -> AppResult<Trip>;

    /// Newest first
    async fn list(&self, user_id: i32) -> AppResult<Vec<Trip>>;

    async fn get(&self, user_id: i32, id: i32) -> AppResult<Trip>;

    /// Apply a partial update; the date window is checked on the merged trip
    async fn update(&self, user_id: i32, id: i32, changes: UpdateTrip) -> AppResult<Trip>;

    async fn delete(&self, user_id: i32, id: i32) -> AppResult<()>;
}

pub struct TripManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TripManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TripService for TripManager<U> {
    async fn create(&self, user_id: i32, input: CreateTrip) -> AppResult<Trip> {
        ensure_date_window(input.start_date, input.end_date)?;
        let trip = self.uow.trips().create(user_id, input).await?;
        tracing::debug!(trip_id = trip.id, user_id, "Trip created");
        Ok(trip)
    }

    async fn list(&self, user_id: i32) -> AppResult<Vec<Trip>> {
        self.uow.trips().list_for_user(user_id).await
    }

    async fn get(&self, user_id: i32, id: i32) -> AppResult<Trip> {
        self.uow
            .trips()
            .find_for_user(id, user_id)
            .await?
            .ok_or_not_found("Trip")
    }

    async fn update(&self, user_id: i32, id: i32, changes: UpdateTrip) -> AppResult<Trip> {
        let existing = self.get(user_id, id).await?;
        let updated = changes.apply_to(existing);
        ensure_date_window(updated.start_date, updated.end_date)?;
        self.uow.trips().update(updated).await
    }

    async fn delete(&self, user_id: i32, id: i32) -> AppResult<()> {
        if self.uow.trips().delete_for_user(id, user_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Trip"))
        }
    }
}
