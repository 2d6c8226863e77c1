//! Trip repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde_json::json;

use super::entities::trip::{self, ActiveModel, Entity as TripEntity};
use crate::domain::{CreateTrip, Trip};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trip repository trait. Every lookup is scoped to the owning user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create(&self, user_id: i32, trip: CreateTrip) -> AppResult<Trip>;

    /// Owner's trips, newest first
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Trip>>;

    async fn find_for_user(&self, id: i32, user_id: i32) -> AppResult<Option<Trip>>;

    /// Persist every mutable field of `trip`
    async fn update(&self, trip: Trip) -> AppResult<Trip>;

    /// Returns false when no trip with that id belongs to the user
    async fn delete_for_user(&self, id: i32, user_id: i32) -> AppResult<bool>;
}

pub struct TripStore {
    db: DatabaseConnection,
}

impl TripStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn owned(&self, id: i32, user_id: i32) -> AppResult<Option<trip::Model>> {
        TripEntity::find_by_id(id)
            .filter(trip::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl TripRepository for TripStore {
    async fn create(&self, user_id: i32, input: CreateTrip) -> AppResult<Trip> {
        let now = Utc::now();
        let active_model = ActiveModel {
            user_id: Set(user_id),
            destination: Set(input.destination),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            travelers: Set(input.travelers),
            interests: Set(json!(input.interests)),
            budget_per_person: Set(input.budget_per_person),
            itinerary: Set(input.itinerary),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Trip::from(model))
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Trip>> {
        let models = TripEntity::find()
            .filter(trip::Column::UserId.eq(user_id))
            .order_by_desc(trip::Column::CreatedAt)
            .order_by_desc(trip::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Trip::from).collect())
    }

    async fn find_for_user(&self, id: i32, user_id: i32) -> AppResult<Option<Trip>> {
        Ok(self.owned(id, user_id).await?.map(Trip::from))
    }

    async fn update(&self, trip: Trip) -> AppResult<Trip> {
        let existing = self
            .owned(trip.id, trip.user_id)
            .await?
            .ok_or(AppError::NotFound("Trip"))?;

        let mut active: ActiveModel = existing.into();
        active.destination = Set(trip.destination);
        active.start_date = Set(trip.start_date);
        active.end_date = Set(trip.end_date);
        active.travelers = Set(trip.travelers);
        active.interests = Set(json!(trip.interests));
        active.budget_per_person = Set(trip.budget_per_person);
        active.itinerary = Set(trip.itinerary);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Trip::from(model))
    }

    async fn delete_for_user(&self, id: i32, user_id: i32) -> AppResult<bool> {
        let Some(model) = self.owned(id, user_id).await? else {
            return Ok(false);
        };

        model.delete(&self.db).await.map_err(AppError::from)?;
        Ok(true)
    }
}
