//! Generation results keyed by destination, length, tier and style.

use crate::config::CACHE_PREFIX_GENERATION;
use crate::domain::{GeneratedPlan, TripParameters};
use crate::infra::Cache;

/// Key shared by every request that would produce the same plan.
pub fn generation_key(params: &TripParameters) -> String {
    format!(
        "{}_{}d_{}_{}",
        params.destination.to_lowercase().trim(),
        params.duration_days,
        params.budget.as_str(),
        params.travel_style.as_str()
    )
}

#[derive(Clone)]
pub struct GenerationCache {
    cache: Cache,
}

impl GenerationCache {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Cached plan, if still fresh. Backend errors read as a miss.
    pub async fn get(&self, params: &TripParameters) -> Option<GeneratedPlan> {
        let key = generation_key(params);
        match self
            .cache
            .get::<GeneratedPlan>(&format!("{}{}", CACHE_PREFIX_GENERATION, key))
            .await
        {
            Ok(Some(plan)) => {
                tracing::info!(key = %key, "Generation cache hit");
                Some(plan)
            }
            Ok(None) => {
                tracing::debug!(key = %key, "Generation cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Generation cache lookup failed");
                None
            }
        }
    }

    pub async fn put(&self, params: &TripParameters, plan: &GeneratedPlan) {
        let key = format!("{}{}", CACHE_PREFIX_GENERATION, generation_key(params));
        if let Err(e) = self.cache.set(&key, plan).await {
            tracing::warn!(error = %e, "Failed to store generation result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, TravelStyle};
    use chrono::NaiveDate;

    fn params(destination: &str) -> TripParameters {
        TripParameters {
            destination: destination.into(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
            duration_days: 4,
            adults: 1,
            children: 0,
            group_size: 1,
            budget: BudgetTier::MidRange,
            budget_amount: None,
            currency: "USD".into(),
            travel_style: TravelStyle::Adventure,
            interests: vec![],
            special_requirements: None,
            accommodation_preference: None,
            transportation_preference: None,
            session_id: None,
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            generation_key(&params(" Cape Town ")),
            "cape town_4d_mid-range_adventure"
        );
    }

    #[tokio::test]
    async fn test_same_key_for_equivalent_requests() {
        let cache = GenerationCache::new(Cache::memory(8, 60));
        let mut plan = GeneratedPlan::default();
        plan.itinerary.overview = "cached".into();

        cache.put(&params("Oslo"), &plan).await;

        let mut other = params("OSLO");
        other.start_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(cache.get(&other).await, Some(plan));

        other.duration_days = 5;
        assert_eq!(cache.get(&other).await, None);
    }
}
