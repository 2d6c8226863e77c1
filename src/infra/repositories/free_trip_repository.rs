//! Free trip repository implementation.
//!
//! Only active rows are visible; there is no delete operation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::free_trip::{self, ActiveModel, Entity as FreeTripEntity};
use crate::domain::{FreeTrip, NewFreeTrip};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FreeTripRepository: Send + Sync {
    async fn create(&self, trip: NewFreeTrip) -> AppResult<FreeTrip>;

    async fn find_active(&self, id: i32) -> AppResult<Option<FreeTrip>>;

    /// Active trips of a session, newest first
    async fn list_session(&self, session_id: &str) -> AppResult<Vec<FreeTrip>>;

    /// Most recent active trips across all sessions
    async fn list_recent(&self, limit: u64) -> AppResult<Vec<FreeTrip>>;

    async fn update(&self, trip: FreeTrip) -> AppResult<FreeTrip>;
}

pub struct FreeTripStore {
    db: DatabaseConnection,
}

impl FreeTripStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn active_model(&self, id: i32) -> AppResult<Option<free_trip::Model>> {
        FreeTripEntity::find_by_id(id)
            .filter(free_trip::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl FreeTripRepository for FreeTripStore {
    async fn create(&self, trip: NewFreeTrip) -> AppResult<FreeTrip> {
        let now = Utc::now();
        let active_model = ActiveModel {
            destination: Set(trip.destination),
            start_date: Set(trip.start_date),
            end_date: Set(trip.end_date),
            budget: Set(Some(trip.budget)),
            currency: Set(trip.currency),
            adults: Set(trip.adults),
            children: Set(trip.children),
            accommodation_type: Set(trip.accommodation_type),
            transportation_mode: Set(trip.transportation_mode),
            interests: Set(trip.interests),
            description: Set(trip.description),
            contact_email: Set(trip.contact_email),
            contact_name: Set(trip.contact_name),
            itinerary: Set(trip.itinerary),
            is_active: Set(true),
            session_id: Set(trip.session_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(FreeTrip::from(model))
    }

    async fn find_active(&self, id: i32) -> AppResult<Option<FreeTrip>> {
        Ok(self.active_model(id).await?.map(FreeTrip::from))
    }

    async fn list_session(&self, session_id: &str) -> AppResult<Vec<FreeTrip>> {
        let models = FreeTripEntity::find()
            .filter(free_trip::Column::SessionId.eq(session_id))
            .filter(free_trip::Column::IsActive.eq(true))
            .order_by_desc(free_trip::Column::CreatedAt)
            .order_by_desc(free_trip::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(FreeTrip::from).collect())
    }

    async fn list_recent(&self, limit: u64) -> AppResult<Vec<FreeTrip>> {
        let models = FreeTripEntity::find()
            .filter(free_trip::Column::IsActive.eq(true))
            .order_by_desc(free_trip::Column::CreatedAt)
            .order_by_desc(free_trip::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(FreeTrip::from).collect())
    }

    async fn update(&self, trip: FreeTrip) -> AppResult<FreeTrip> {
        let existing = self
            .active_model(trip.id)
            .await?
            .ok_or(AppError::NotFound("Trip"))?;

        let mut active: ActiveModel = existing.into();
        active.destination = Set(trip.destination);
        active.start_date = Set(trip.start_date);
        active.end_date = Set(trip.end_date);
        active.budget = Set(trip.budget);
        active.currency = Set(trip.currency);
        active.adults = Set(trip.adults);
        active.children = Set(trip.children);
        active.accommodation_type = Set(trip.accommodation_type);
        active.transportation_mode = Set(trip.transportation_mode);
        active.interests = Set(trip.interests);
        active.description = Set(trip.description);
        active.contact_email = Set(trip.contact_email);
        active.contact_name = Set(trip.contact_name);
        active.itinerary = Set(trip.itinerary);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(FreeTrip::from(model))
    }
}
