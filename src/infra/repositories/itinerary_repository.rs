//! AI itinerary repository implementation.
//!
//! Reads go through [`ItineraryStore`]. Writes that belong to a generation
//! run are plain functions over any connection so the transactional
//! repository can share them.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use super::entities::{ai_itinerary, budget_estimate, generation_log};
use crate::domain::{
    AiItinerary, BudgetEstimate, BudgetFigures, BudgetPlan, NewAiItinerary, NewGenerationLog,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> AppResult<Option<AiItinerary>>;

    async fn budget_estimate(&self, itinerary_id: Uuid) -> AppResult<Option<BudgetEstimate>>;

    /// Owner's itineraries, newest first
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<AiItinerary>>;

    /// Anonymous itineraries of a session, newest first
    async fn list_for_session(&self, session_id: &str) -> AppResult<Vec<AiItinerary>>;

    /// Remove an itinerary with its estimate and logs
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

pub struct ItineraryStore {
    db: DatabaseConnection,
}

impl ItineraryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItineraryRepository for ItineraryStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<AiItinerary>> {
        let result = ai_itinerary::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(AiItinerary::from))
    }

    async fn budget_estimate(&self, itinerary_id: Uuid) -> AppResult<Option<BudgetEstimate>> {
        let result = budget_estimate::Entity::find()
            .filter(budget_estimate::Column::ItineraryId.eq(itinerary_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(BudgetEstimate::from))
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<AiItinerary>> {
        let models = ai_itinerary::Entity::find()
            .filter(ai_itinerary::Column::UserId.eq(user_id))
            .order_by_desc(ai_itinerary::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(AiItinerary::from).collect())
    }

    async fn list_for_session(&self, session_id: &str) -> AppResult<Vec<AiItinerary>> {
        let models = ai_itinerary::Entity::find()
            .filter(ai_itinerary::Column::SessionId.eq(session_id))
            .filter(ai_itinerary::Column::UserId.is_null())
            .order_by_desc(ai_itinerary::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(AiItinerary::from).collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        generation_log::Entity::delete_many()
            .filter(generation_log::Column::ItineraryId.eq(id))
            .exec(&txn)
            .await?;
        budget_estimate::Entity::delete_many()
            .filter(budget_estimate::Column::ItineraryId.eq(id))
            .exec(&txn)
            .await?;
        let result = ai_itinerary::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await.map_err(AppError::from)?;
        Ok(result.rows_affected > 0)
    }
}

// =============================================================================
// Generation writes
// =============================================================================

pub(crate) async fn insert_itinerary<C>(conn: &C, new: NewAiItinerary) -> AppResult<AiItinerary>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let active_model = ai_itinerary::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        session_id: Set(new.session_id),
        destination: Set(new.destination),
        start_date: Set(new.start_date),
        end_date: Set(new.end_date),
        duration_days: Set(new.duration_days),
        adults: Set(new.adults),
        children: Set(new.children),
        budget: Set(new.budget.as_str().to_string()),
        budget_amount: Set(new.budget_amount),
        currency: Set(new.currency),
        travel_style: Set(new.travel_style.as_str().to_string()),
        interests: Set(json!(new.interests)),
        accommodation_preference: Set(new.accommodation_preference),
        transportation_preference: Set(new.transportation_preference),
        itinerary_content: Set(to_json(&new.itinerary_content)?),
        budget_breakdown: Set(to_json(&new.budget_breakdown)?),
        recommendations: Set(to_json(&new.recommendations)?),
        ai_model_used: Set(new.ai_model_used),
        generation_time: Set(Some(new.generation_time)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active_model.insert(conn).await.map_err(AppError::from)?;
    Ok(AiItinerary::from(model))
}

pub(crate) async fn replace_budget<C>(
    conn: &C,
    id: Uuid,
    budget: &BudgetPlan,
) -> AppResult<AiItinerary>
where
    C: ConnectionTrait,
{
    let model = ai_itinerary::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Itinerary"))?;

    let mut active: ai_itinerary::ActiveModel = model.into();
    active.budget_breakdown = Set(to_json(budget)?);
    active.updated_at = Set(Utc::now());

    let model = active.update(conn).await.map_err(AppError::from)?;
    Ok(AiItinerary::from(model))
}

/// Create the itinerary's estimate or overwrite the existing one.
pub(crate) async fn upsert_estimate<C>(
    conn: &C,
    itinerary_id: Uuid,
    figures: BudgetFigures,
) -> AppResult<BudgetEstimate>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let existing = budget_estimate::Entity::find()
        .filter(budget_estimate::Column::ItineraryId.eq(itinerary_id))
        .one(conn)
        .await
        .map_err(AppError::from)?;

    let is_new = existing.is_none();
    let mut active = match existing {
        Some(model) => model.into(),
        None => budget_estimate::ActiveModel {
            itinerary_id: Set(itinerary_id),
            created_at: Set(now),
            ..Default::default()
        },
    };

    active.accommodation_min = Set(figures.accommodation_min);
    active.accommodation_max = Set(figures.accommodation_max);
    active.accommodation_recommendations = Set(json!(figures.accommodation_recommendations));
    active.transportation_min = Set(figures.transportation_min);
    active.transportation_max = Set(figures.transportation_max);
    active.transportation_breakdown = Set(to_json(&figures.transportation_breakdown)?);
    active.food_min = Set(figures.food_min);
    active.food_max = Set(figures.food_max);
    active.dining_recommendations = Set(json!(figures.dining_recommendations));
    active.activities_min = Set(figures.activities_min);
    active.activities_max = Set(figures.activities_max);
    active.activities_breakdown = Set(to_json(&figures.activities_breakdown)?);
    active.shopping_min = Set(figures.shopping_min);
    active.shopping_max = Set(figures.shopping_max);
    active.miscellaneous = Set(figures.miscellaneous);
    active.emergency_fund = Set(figures.emergency_fund);
    active.total_min = Set(figures.total_min);
    active.total_max = Set(figures.total_max);
    active.budget_alternatives = Set(json!(figures.budget_alternatives));
    active.luxury_alternatives = Set(json!(figures.luxury_alternatives));
    active.updated_at = Set(now);

    let model = if is_new {
        active.insert(conn).await
    } else {
        active.update(conn).await
    }
    .map_err(AppError::from)?;

    Ok(BudgetEstimate::from(model))
}

pub(crate) async fn insert_log<C>(
    conn: &C,
    itinerary_id: Uuid,
    log: NewGenerationLog,
) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let active_model = generation_log::ActiveModel {
        itinerary_id: Set(itinerary_id),
        request_type: Set(log.request_type.as_str().to_string()),
        prompt_sent: Set(log.prompt_sent),
        response_received: Set(log.response_received),
        tokens_used: Set(None),
        response_time: Set(log.response_time),
        success: Set(log.success),
        error_message: Set(log.error_message),
        timestamp: Set(Utc::now()),
        ..Default::default()
    };

    active_model.insert(conn).await.map_err(AppError::from)?;
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::internal(format!("Failed to encode content: {}", e)))
}
