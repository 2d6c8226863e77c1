//! AI travel service - Generates, stores and serves itineraries.
//!
//! A generation and everything derived from it (budget estimate, audit
//! rows) is written in one transaction. Generation itself never fails:
//! the generator substitutes template content for failed calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ai::{BudgetOptions, TravelGenerator};
use crate::config::FAST_GENERATION_THRESHOLD_SECONDS;
use crate::domain::{
    AiItinerary, BudgetEstimate, BudgetFigures, BudgetPlan, GenerateItineraryRequest,
    ItineraryDetail, ItinerarySummary, NewAiItinerary, TripParameters,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Timing block of the generate response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Performance {
    pub total_time: f64,
    /// `fast` under five seconds, otherwise `normal`
    #[schema(example = "fast")]
    pub speed: String,
}

/// `data` of a successful generate call
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneratedItinerary {
    pub itinerary: ItineraryDetail,
    pub generation_time: f64,
    pub performance: Performance,
}

/// Body of `POST /api/ai-travel/budget/regenerate`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegenerateBudgetRequest {
    pub itinerary_id: Uuid,
    #[serde(default = "enabled")]
    pub include_alternatives: bool,
    #[serde(default = "enabled")]
    pub detailed_breakdown: bool,
}

fn enabled() -> bool {
    true
}

/// `data` of a successful budget regeneration
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegeneratedBudget {
    pub budget: BudgetPlan,
    pub generation_time: f64,
}

#[async_trait]
pub trait TravelService: Send + Sync {
    /// Validate, generate and persist; `owner` is set for signed-in callers
    async fn generate(
        &self,
        request: GenerateItineraryRequest,
        owner: Option<i32>,
    ) -> AppResult<GeneratedItinerary>;

    async fn get(&self, id: Uuid, caller: Option<i32>) -> AppResult<ItineraryDetail>;

    async fn delete(&self, id: Uuid, caller: Option<i32>) -> AppResult<()>;

    /// The caller's itineraries, newest first
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ItinerarySummary>>;

    /// Anonymous itineraries of a session, newest first
    async fn list_for_session(&self, session_id: &str) -> AppResult<Vec<ItinerarySummary>>;

    /// Fresh budget for a stored itinerary, bypassing the generation cache
    async fn regenerate_budget(
        &self,
        request: RegenerateBudgetRequest,
        caller: Option<i32>,
    ) -> AppResult<RegeneratedBudget>;
}

pub struct TravelPlanner<U: UnitOfWork> {
    uow: Arc<U>,
    generator: Arc<TravelGenerator>,
}

impl<U: UnitOfWork> TravelPlanner<U> {
    pub fn new(uow: Arc<U>, generator: Arc<TravelGenerator>) -> Self {
        Self { uow, generator }
    }

    async fn accessible(&self, id: Uuid, caller: Option<i32>) -> AppResult<AiItinerary> {
        let itinerary = self
            .uow
            .itineraries()
            .find(id)
            .await?
            .ok_or_not_found("Itinerary")?;

        if !itinerary.is_accessible_by(caller) {
            return Err(AppError::Forbidden);
        }
        Ok(itinerary)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn speed(seconds: f64) -> &'static str {
    if seconds < FAST_GENERATION_THRESHOLD_SECONDS {
        "fast"
    } else {
        "normal"
    }
}

/// Rebuild generation input from a stored itinerary.
fn stored_parameters(itinerary: &AiItinerary) -> TripParameters {
    let count = |value: i32| u32::try_from(value).unwrap_or(0);
    let non_empty = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());

    TripParameters {
        destination: itinerary.destination.clone(),
        start_date: itinerary.start_date,
        end_date: itinerary.end_date,
        duration_days: count(itinerary.duration_days).max(1),
        adults: count(itinerary.adults),
        children: count(itinerary.children),
        group_size: count(itinerary.adults),
        budget: itinerary.budget,
        budget_amount: itinerary.budget_amount,
        currency: itinerary.currency.clone(),
        travel_style: itinerary.travel_style,
        interests: itinerary.interests.clone(),
        special_requirements: None,
        accommodation_preference: non_empty(&itinerary.accommodation_preference),
        transportation_preference: non_empty(&itinerary.transportation_preference),
        session_id: itinerary.session_id.clone(),
    }
}

#[async_trait]
impl<U: UnitOfWork> TravelService for TravelPlanner<U> {
    async fn generate(
        &self,
        request: GenerateItineraryRequest,
        owner: Option<i32>,
    ) -> AppResult<GeneratedItinerary> {
        let started = Instant::now();
        let params = request.into_parameters()?;

        let generation = self.generator.generate(&params).await;
        let generation_time = round2(generation.elapsed);

        let figures = BudgetFigures::from_plan(&generation.plan.budget, params.duration_days);
        let new_itinerary = NewAiItinerary::from_generation(
            &params,
            owner,
            generation.plan,
            &generation.model,
            generation_time,
        );
        let logs = generation.logs;

        let (itinerary, estimate): (AiItinerary, BudgetEstimate) = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.itineraries();
                    let itinerary = repo.insert(new_itinerary).await?;
                    let estimate = repo.upsert_estimate(itinerary.id, figures).await?;
                    for log in logs {
                        repo.log(itinerary.id, log).await?;
                    }
                    Ok((itinerary, estimate))
                })
            })
            .await?;

        tracing::info!(
            itinerary_id = %itinerary.id,
            cached = generation.cached,
            generation_time,
            "Itinerary stored"
        );

        let total_time = round2(started.elapsed().as_secs_f64());
        Ok(GeneratedItinerary {
            itinerary: ItineraryDetail::new(itinerary, Some(estimate)),
            generation_time,
            performance: Performance {
                total_time,
                speed: speed(total_time).to_string(),
            },
        })
    }

    async fn get(&self, id: Uuid, caller: Option<i32>) -> AppResult<ItineraryDetail> {
        let itinerary = self.accessible(id, caller).await?;
        let estimate = self.uow.itineraries().budget_estimate(id).await?;
        Ok(ItineraryDetail::new(itinerary, estimate))
    }

    async fn delete(&self, id: Uuid, caller: Option<i32>) -> AppResult<()> {
        self.accessible(id, caller).await?;
        if !self.uow.itineraries().delete(id).await? {
            return Err(AppError::NotFound("Itinerary"));
        }
        tracing::debug!(itinerary_id = %id, "Itinerary deleted");
        Ok(())
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ItinerarySummary>> {
        let itineraries = self.uow.itineraries().list_for_user(user_id).await?;
        Ok(itineraries.into_iter().map(ItinerarySummary::from).collect())
    }

    async fn list_for_session(&self, session_id: &str) -> AppResult<Vec<ItinerarySummary>> {
        let itineraries = self.uow.itineraries().list_for_session(session_id).await?;
        Ok(itineraries.into_iter().map(ItinerarySummary::from).collect())
    }

    async fn regenerate_budget(
        &self,
        request: RegenerateBudgetRequest,
        caller: Option<i32>,
    ) -> AppResult<RegeneratedBudget> {
        let itinerary = self.accessible(request.itinerary_id, caller).await?;
        let params = stored_parameters(&itinerary);

        let options = BudgetOptions {
            include_alternatives: request.include_alternatives,
            detailed_breakdown: request.detailed_breakdown,
        };
        let regenerated = self.generator.regenerate_budget(&params, options).await;
        let generation_time = round2(regenerated.elapsed);
        let figures = BudgetFigures::from_plan(&regenerated.budget, params.duration_days);

        let budget = regenerated.budget;
        let log = regenerated.log;
        let id = itinerary.id;
        let stored: AiItinerary = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.itineraries();
                    let updated = repo.replace_budget(id, &budget).await?;
                    repo.upsert_estimate(id, figures).await?;
                    repo.log(id, log).await?;
                    Ok(updated)
                })
            })
            .await?;

        tracing::info!(itinerary_id = %id, generation_time, "Budget regenerated");

        Ok(RegeneratedBudget {
            budget: stored.budget_breakdown,
            generation_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_and_speed() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(4.999), 5.0);
        assert_eq!(speed(4.99), "fast");
        assert_eq!(speed(5.0), "normal");
    }

    #[test]
    fn test_regenerate_request_defaults() {
        let request: RegenerateBudgetRequest = serde_json::from_value(serde_json::json!({
            "itinerary_id": "6f1c1f9e-3f7a-4c55-9a51-0d1d6f0f2b11"
        }))
        .unwrap();
        assert!(request.include_alternatives);
        assert!(request.detailed_breakdown);
    }
}
