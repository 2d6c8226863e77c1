//! Itinerary and budget generation.
//!
//! Each generation runs the itinerary branch and the budget branch
//! concurrently. A branch whose external call fails substitutes template
//! content, so [`TravelGenerator::generate`] itself never fails.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::cache::GenerationCache;
use super::prompts::BudgetOptions;
use super::{fallback, prompts};
use crate::config::{
    AiSettings, PerformanceMode, RECOMMENDATIONS_MAX_ATTEMPTS, RECOMMENDATIONS_RETRY_DELAY_MS,
};
use crate::domain::{
    BudgetPlan, GeneratedPlan, GenerationKind, ItineraryContent, NewGenerationLog,
    Recommendations, TripParameters,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{parse_reply, CompletionRequest, TextGenerator};

/// Model name recorded when no external generator is configured
pub const TEMPLATE_MODEL: &str = "template";

/// One finished generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    pub plan: GeneratedPlan,
    pub model: String,
    /// Wall-clock seconds for the whole run
    pub elapsed: f64,
    pub cached: bool,
    pub logs: Vec<NewGenerationLog>,
}

/// Regenerated budget plan with its audit row
#[derive(Debug, Clone)]
pub struct BudgetGeneration {
    pub budget: BudgetPlan,
    pub elapsed: f64,
    pub log: NewGenerationLog,
}

struct Branch<T> {
    value: T,
    logs: Vec<NewGenerationLog>,
}

pub struct TravelGenerator {
    llm: Option<Arc<dyn TextGenerator>>,
    mode: PerformanceMode,
    cache: GenerationCache,
    retry_delay: Duration,
}

impl TravelGenerator {
    /// Without a text generator every mode degrades to templates.
    pub fn new(
        llm: Option<Arc<dyn TextGenerator>>,
        settings: &AiSettings,
        cache: GenerationCache,
    ) -> Self {
        let mode = match &llm {
            Some(_) => settings.effective_mode(),
            None => PerformanceMode::Fast,
        };
        if mode != settings.mode {
            tracing::warn!(
                configured = settings.mode.as_str(),
                "No usable OpenRouter API key, generating from templates only"
            );
        }

        Self {
            llm,
            mode,
            cache,
            retry_delay: Duration::from_millis(RECOMMENDATIONS_RETRY_DELAY_MS),
        }
    }

    /// Override the pause between recommendation attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn mode(&self) -> PerformanceMode {
        self.mode
    }

    pub fn model(&self) -> String {
        self.llm
            .as_ref()
            .filter(|_| self.mode != PerformanceMode::Fast)
            .map(|llm| llm.model())
            .unwrap_or_else(|| TEMPLATE_MODEL.to_string())
    }

    /// Cached plan or a fresh one from both branches.
    pub async fn generate(&self, params: &TripParameters) -> Generation {
        let started = Instant::now();

        if let Some(mut plan) = self.cache.get(params).await {
            plan.itinerary.redate(params.start_date);
            let elapsed = started.elapsed().as_secs_f64();
            let log = itinerary_log(params, &plan.itinerary, elapsed);
            return Generation {
                plan,
                model: self.model(),
                elapsed,
                cached: true,
                logs: vec![log],
            };
        }

        tracing::info!(
            destination = %params.destination,
            days = params.duration_days,
            mode = self.mode.as_str(),
            "Generating itinerary"
        );

        let (itinerary, budget) =
            tokio::join!(
                self.itinerary_branch(params),
                self.budget_branch(params, BudgetOptions::default())
            );

        let mut plan = GeneratedPlan {
            itinerary: itinerary.value,
            budget: budget.value,
        };
        plan.itinerary.merge_budget(&plan.budget);

        let elapsed = started.elapsed().as_secs_f64();
        let mut logs = vec![itinerary_log(params, &plan.itinerary, elapsed)];
        logs.extend(itinerary.logs);
        logs.extend(budget.logs);

        self.cache.put(params, &plan).await;

        tracing::info!(
            destination = %params.destination,
            elapsed_secs = elapsed,
            "Generation complete"
        );

        Generation {
            plan,
            model: self.model(),
            elapsed,
            cached: false,
            logs,
        }
    }

    /// Fresh budget plan, bypassing the cache.
    pub async fn regenerate_budget(
        &self,
        params: &TripParameters,
        options: BudgetOptions,
    ) -> BudgetGeneration {
        let started = Instant::now();
        let branch = self.budget_branch(params, options).await;
        let elapsed = started.elapsed().as_secs_f64();

        let summary = format!("Regenerated budget for {}", params.destination);
        let log = match branch.logs.into_iter().find(|log| !log.success) {
            Some(failed) => NewGenerationLog::failure(
                GenerationKind::Budget,
                summary,
                failed.error_message,
                elapsed,
            ),
            None => NewGenerationLog::success(
                GenerationKind::Budget,
                summary,
                &serialized(&branch.value),
                elapsed,
            ),
        };

        BudgetGeneration {
            budget: branch.value,
            elapsed,
            log,
        }
    }

    async fn itinerary_branch(&self, params: &TripParameters) -> Branch<ItineraryContent> {
        let mut logs = Vec::new();

        let value = match self.mode {
            PerformanceMode::Fast => fallback::itinerary(params),
            PerformanceMode::Hybrid => self.enriched_template(params, &mut logs).await,
            PerformanceMode::Ai => {
                match self
                    .call::<ItineraryContent>(prompts::itinerary(params))
                    .await
                {
                    Ok((mut content, _)) => {
                        let statics = fallback::recommendations(&params.destination);
                        content.recommendations =
                            content.recommendations.with_map_categories_from(&statics);
                        content
                    }
                    Err(e) => {
                        tracing::warn!(
                            destination = %params.destination,
                            error = %e,
                            "Itinerary generation failed, using template"
                        );
                        self.enriched_template(params, &mut logs).await
                    }
                }
            }
        };

        Branch { value, logs }
    }

    async fn budget_branch(
        &self,
        params: &TripParameters,
        options: BudgetOptions,
    ) -> Branch<BudgetPlan> {
        if self.mode == PerformanceMode::Fast {
            return Branch {
                value: fallback::budget(&params.destination, params.duration_days),
                logs: Vec::new(),
            };
        }

        let started = Instant::now();
        let summary = format!("Generated budget for {}", params.destination);

        match self.call::<BudgetPlan>(prompts::budget(params, options)).await {
            Ok((budget, reply)) => Branch {
                value: budget,
                logs: vec![NewGenerationLog::success(
                    GenerationKind::Budget,
                    summary,
                    &reply,
                    started.elapsed().as_secs_f64(),
                )],
            },
            Err(e) => {
                tracing::warn!(
                    destination = %params.destination,
                    error = %e,
                    "Budget generation failed, using template"
                );
                Branch {
                    value: fallback::budget(&params.destination, params.duration_days),
                    logs: vec![NewGenerationLog::failure(
                        GenerationKind::Budget,
                        summary,
                        e.to_string(),
                        started.elapsed().as_secs_f64(),
                    )],
                }
            }
        }
    }

    /// Template itinerary with AI recommendations when they can be had.
    async fn enriched_template(
        &self,
        params: &TripParameters,
        logs: &mut Vec<NewGenerationLog>,
    ) -> ItineraryContent {
        let mut content = fallback::itinerary(params);
        if let Some(recommendations) = self.recommendations(params, logs).await {
            content.recommendations = recommendations;
        }
        content
    }

    async fn recommendations(
        &self,
        params: &TripParameters,
        logs: &mut Vec<NewGenerationLog>,
    ) -> Option<Recommendations> {
        self.llm.as_ref()?;

        let started = Instant::now();
        let summary = format!("Generated recommendations for {}", params.destination);
        let statics = fallback::recommendations(&params.destination);
        let mut last_error = String::new();

        for attempt in 1..=RECOMMENDATIONS_MAX_ATTEMPTS {
            match self
                .call::<Recommendations>(prompts::recommendations(params))
                .await
            {
                Ok((recommendations, reply)) if recommendations.has_display_content() => {
                    tracing::debug!(attempt, "Recommendations generated");
                    logs.push(NewGenerationLog::success(
                        GenerationKind::Recommendations,
                        summary,
                        &reply,
                        started.elapsed().as_secs_f64(),
                    ));
                    return Some(recommendations.with_map_categories_from(&statics));
                }
                Ok(_) => last_error = "reply has no recommendation lists".to_string(),
                Err(e) => last_error = e.to_string(),
            }

            tracing::warn!(
                attempt,
                max_attempts = RECOMMENDATIONS_MAX_ATTEMPTS,
                error = %last_error,
                "Recommendations attempt failed"
            );
            if attempt < RECOMMENDATIONS_MAX_ATTEMPTS {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        logs.push(NewGenerationLog::failure(
            GenerationKind::Recommendations,
            summary,
            last_error,
            started.elapsed().as_secs_f64(),
        ));
        None
    }

    /// Typed reply plus the raw text it came from.
    async fn call<T: DeserializeOwned>(&self, request: CompletionRequest) -> AppResult<(T, String)> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| AppError::generation("no text generator configured"))?;
        let reply = llm.complete(request).await?;
        let parsed = parse_reply(&reply)?;
        Ok((parsed, reply))
    }
}

fn serialized<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn itinerary_log(
    params: &TripParameters,
    itinerary: &ItineraryContent,
    elapsed: f64,
) -> NewGenerationLog {
    NewGenerationLog::success(
        GenerationKind::Itinerary,
        format!("Generated itinerary for {}", params.destination),
        &serialized(itinerary),
        elapsed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, TravelStyle};
    use crate::infra::{Cache, MockTextGenerator};
    use chrono::NaiveDate;
    use mockall::predicate::function;

    const KEY: &str = "sk-or-v1-0123456789abcdef0123";

    fn params(destination: &str) -> TripParameters {
        TripParameters {
            destination: destination.into(),
            start_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 4).unwrap(),
            duration_days: 3,
            adults: 2,
            children: 0,
            group_size: 2,
            budget: BudgetTier::MidRange,
            budget_amount: None,
            currency: "USD".into(),
            travel_style: TravelStyle::Cultural,
            interests: vec![],
            special_requirements: None,
            accommodation_preference: None,
            transportation_preference: None,
            session_id: None,
        }
    }

    fn settings(mode: PerformanceMode) -> AiSettings {
        let mut settings = AiSettings::offline().with_api_key(KEY);
        settings.mode = mode;
        settings
    }

    fn generator(mock: MockTextGenerator, mode: PerformanceMode) -> TravelGenerator {
        TravelGenerator::new(
            Some(Arc::new(mock)),
            &settings(mode),
            GenerationCache::new(Cache::memory(16, 60)),
        )
        .with_retry_delay(Duration::from_millis(1))
    }

    fn is_budget(request: &CompletionRequest) -> bool {
        request.max_tokens == crate::config::BUDGET_MAX_TOKENS
    }

    fn is_recommendations(request: &CompletionRequest) -> bool {
        request.top_p.is_some()
    }

    #[tokio::test]
    async fn test_fast_mode_makes_no_calls() {
        let mut mock = MockTextGenerator::new();
        mock.expect_complete().never();
        mock.expect_model().return_const("deepseek/deepseek-chat".to_string());

        let generator = generator(mock, PerformanceMode::Fast);
        let generation = generator.generate(&params("Paris")).await;

        assert!(!generation.cached);
        assert_eq!(generation.model, TEMPLATE_MODEL);
        assert_eq!(generation.plan.itinerary.daily_schedule.len(), 3);
        assert_eq!(generation.plan.budget.total_estimates.budget_total, 760.0);
        assert_eq!(generation.logs.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_generator_forces_fast_mode() {
        let generator = TravelGenerator::new(
            None,
            &settings(PerformanceMode::Ai),
            GenerationCache::new(Cache::memory(4, 60)),
        );
        assert_eq!(generator.mode(), PerformanceMode::Fast);

        let generation = generator.generate(&params("Lima")).await;
        assert_eq!(generation.plan.budget, fallback::budget("Lima", 3));
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let generator = TravelGenerator::new(
            None,
            &AiSettings::offline(),
            GenerationCache::new(Cache::memory(4, 60)),
        );

        let first = generator.generate(&params("Tokyo")).await;
        let second = generator.generate(&params("tokyo")).await;

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.plan, second.plan);
    }

    #[tokio::test]
    async fn test_cache_hit_is_dated_from_request() {
        let generator = TravelGenerator::new(
            None,
            &AiSettings::offline(),
            GenerationCache::new(Cache::memory(4, 60)),
        );
        generator.generate(&params("Tokyo")).await;

        let mut later = params("Tokyo");
        later.start_date = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        later.end_date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let generation = generator.generate(&later).await;

        assert!(generation.cached);
        let dates: Vec<_> = generation
            .plan
            .itinerary
            .daily_schedule
            .iter()
            .map(|day| day.date.as_str())
            .collect();
        assert_eq!(dates, vec!["2026-02-27", "2026-02-28", "2026-03-01"]);
    }

    #[tokio::test]
    async fn test_expired_entry_calls_api_again() {
        let mut mock = MockTextGenerator::new();
        mock.expect_model().return_const("deepseek/deepseek-chat".to_string());
        mock.expect_complete()
            .with(function(is_budget))
            .times(2)
            .returning(|_| {
                Ok(r#"{"total_estimates": {"budget_total": 500, "mid_range_total": 900, "luxury_total": 1500}}"#
                    .to_string())
            });
        mock.expect_complete()
            .with(function(is_recommendations))
            .times(2)
            .returning(|_| Ok(r#"{"hidden_gems": ["Aoyama Cemetery"]}"#.to_string()));

        let generator = TravelGenerator::new(
            Some(Arc::new(mock)),
            &settings(PerformanceMode::Hybrid),
            GenerationCache::new(Cache::memory(16, 0)),
        );

        let first = generator.generate(&params("Tokyo")).await;
        let second = generator.generate(&params("Tokyo")).await;

        assert!(!first.cached);
        assert!(!second.cached);
        assert_eq!(second.plan.budget.total_estimates.luxury_total, 1500.0);
    }

    #[tokio::test]
    async fn test_hybrid_uses_llm_budget_and_recommendations() {
        let mut mock = MockTextGenerator::new();
        mock.expect_model().return_const("deepseek/deepseek-chat".to_string());
        mock.expect_complete()
            .with(function(is_budget))
            .times(1)
            .returning(|_| {
                Ok(r#"```json
{"total_estimates": {"budget_total": 500, "mid_range_total": 900, "luxury_total": 1500}}
```"#
                    .to_string())
            });
        mock.expect_complete()
            .with(function(is_recommendations))
            .times(1)
            .returning(|_| Ok(r#"{"hidden_gems": ["Aoyama Cemetery"]}"#.to_string()));

        let generator = generator(mock, PerformanceMode::Hybrid);
        let generation = generator.generate(&params("Tokyo")).await;
        let plan = generation.plan;

        assert_eq!(generation.model, "deepseek/deepseek-chat");
        assert_eq!(plan.budget.total_estimates.luxury_total, 1500.0);
        assert_eq!(plan.itinerary.recommendations.hidden_gems, vec!["Aoyama Cemetery"]);
        // map pins always come from the static tables
        assert_eq!(plan.itinerary.recommendations.sightseeing.len(), 10);
        assert_eq!(
            plan.itinerary.daily_schedule[0].activities[0].activity,
            "Visit Senso-ji Temple in Asakusa"
        );
        assert!(generation.logs.iter().all(|log| log.success));
    }

    #[tokio::test]
    async fn test_recommendations_give_up_after_three_attempts() {
        let mut mock = MockTextGenerator::new();
        mock.expect_model().return_const("deepseek/deepseek-chat".to_string());
        mock.expect_complete()
            .with(function(is_budget))
            .returning(|_| Err(AppError::generation("text generation API returned 500")));
        mock.expect_complete()
            .with(function(is_recommendations))
            .times(3)
            .returning(|_| Ok(r#"{"must_visit_attractions": []}"#.to_string()));

        let generator = generator(mock, PerformanceMode::Hybrid);
        let generation = generator.generate(&params("Lima")).await;

        assert_eq!(
            generation.plan.itinerary.recommendations,
            fallback::recommendations("Lima")
        );
        assert_eq!(generation.plan.budget, fallback::budget("Lima", 3));
        let failures: Vec<_> = generation.logs.iter().filter(|log| !log.success).collect();
        assert_eq!(failures.len(), 2);
    }

    #[tokio::test]
    async fn test_ai_mode_falls_back_to_enriched_template() {
        let mut mock = MockTextGenerator::new();
        mock.expect_model().return_const("deepseek/deepseek-chat".to_string());
        mock.expect_complete()
            .with(function(|r: &CompletionRequest| {
                r.max_tokens == crate::config::ITINERARY_MAX_TOKENS
            }))
            .times(1)
            .returning(|_| Ok("I cannot help with that.".to_string()));
        mock.expect_complete()
            .with(function(is_budget))
            .returning(|_| Ok("{}".to_string()));
        mock.expect_complete()
            .with(function(is_recommendations))
            .times(1)
            .returning(|_| Ok(r#"{"local_cuisine": ["Ceviche at La Mar - $25"]}"#.to_string()));

        let generator = generator(mock, PerformanceMode::Ai);
        let generation = generator.generate(&params("Lima")).await;
        let itinerary = &generation.plan.itinerary;

        assert_eq!(itinerary.daily_schedule[0].title, "Day 1: Exploring Lima");
        assert_eq!(
            itinerary.recommendations.local_cuisine,
            vec!["Ceviche at La Mar - $25"]
        );
    }

    #[tokio::test]
    async fn test_regenerate_budget_skips_cache() {
        let mut mock = MockTextGenerator::new();
        mock.expect_model().return_const("deepseek/deepseek-chat".to_string());
        mock.expect_complete()
            .with(function(is_budget))
            .times(2)
            .returning(|_| {
                Ok(r#"{"daily_breakdown": {"budget_per_day": 90, "luxury_per_day": 300}}"#
                    .to_string())
            });

        let generator = generator(mock, PerformanceMode::Ai);
        let options = BudgetOptions::default();
        let first = generator.regenerate_budget(&params("Oslo"), options).await;
        let second = generator.regenerate_budget(&params("Oslo"), options).await;

        assert_eq!(first.budget.daily_breakdown.budget_per_day, 90.0);
        assert_eq!(second.budget, first.budget);
        assert_eq!(first.log.prompt_sent, "Regenerated budget for Oslo");
        assert!(first.log.success);
    }
}
