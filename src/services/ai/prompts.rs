//! Chat-completion requests for the three generators.

use std::time::Duration;

use crate::config::{
    BUDGET_MAX_TOKENS, BUDGET_TEMPERATURE, ITINERARY_MAX_TOKENS, ITINERARY_TEMPERATURE,
    RECOMMENDATIONS_MAX_TOKENS, RECOMMENDATIONS_TEMPERATURE, RECOMMENDATIONS_TIMEOUT_SECONDS,
    RECOMMENDATIONS_TOP_P,
};
use crate::domain::TripParameters;
use crate::infra::CompletionRequest;

const ITINERARY_SYSTEM: &str = "You are an experienced travel planner. Only suggest real places \
that a traveler can verify: actual attractions, restaurants and neighborhoods with their real \
names. Use realistic 2024-2025 prices. Answer with a single JSON object and nothing else.";

const BUDGET_SYSTEM: &str = "You are a travel finance advisor. Estimate realistic 2024-2025 \
costs in US dollars for the destination and trip length given. Answer with a single JSON object \
and nothing else.";

const RECOMMENDATIONS_SYSTEM: &str = "You are a local guide who knows the destination \
personally. Name specific places with their district and typical prices. Answer with a single \
JSON object and nothing else.";

fn interests(params: &TripParameters) -> String {
    if params.interests.is_empty() {
        "general".to_string()
    } else {
        params.interests.join(", ")
    }
}

/// Extra asks for a budget request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetOptions {
    /// Ask for alternatives at other price points
    pub include_alternatives: bool,
    /// Ask for every section; otherwise totals are enough
    pub detailed_breakdown: bool,
}

impl Default for BudgetOptions {
    fn default() -> Self {
        Self {
            include_alternatives: true,
            detailed_breakdown: true,
        }
    }
}

/// Day-by-day itinerary request
pub fn itinerary(params: &TripParameters) -> CompletionRequest {
    let prompt = format!(
        r#"Plan a {days}-day itinerary for {destination}.

Trip details:
- Dates: {start} to {end} ({days} days)
- Budget level: {budget}
- Travel style: {style}
- Travelers: {adults} adults, {children} children
- Interests: {interests}
{extra}
Every activity must be a real, named place in {destination} with its actual address or district.

Return JSON in exactly this shape:
{{
  "overview": "short summary of the trip",
  "total_estimated_cost": 0,
  "daily_schedule": [
    {{
      "day": 1,
      "date": "YYYY-MM-DD",
      "title": "Day 1: ...",
      "activities": [
        {{
          "time": "Morning (9:00 AM)",
          "activity": "name of the activity",
          "description": "what the traveler will do",
          "location": "address or district",
          "type": "sightseeing|cultural|dining|shopping|entertainment|nature|adventure",
          "estimated_cost": 0,
          "duration": "2 hours",
          "tips": "practical advice"
        }}
      ],
      "dining_recommendations": ["restaurant - dish - price"],
      "daily_cost_estimate": 0
    }}
  ],
  "recommendations": {{
    "must_visit_attractions": [],
    "local_cuisine": [],
    "must_try_restaurants": [],
    "hidden_gems": [],
    "cultural_tips": [],
    "budget_tips": []
  }},
  "budget_breakdown": {{
    "accommodation_per_night": 0,
    "meals_per_day": 0,
    "activities_per_day": 0,
    "transportation_daily": 0
  }}
}}"#,
        days = params.duration_days,
        destination = params.destination,
        start = params.start_date,
        end = params.end_date,
        budget = params.budget.as_str(),
        style = params.travel_style.as_str(),
        adults = params.adults,
        children = params.children,
        interests = interests(params),
        extra = params
            .special_requirements
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("- Special requirements: {}\n", s))
            .unwrap_or_default(),
    );

    CompletionRequest::new(ITINERARY_SYSTEM, prompt)
        .temperature(ITINERARY_TEMPERATURE)
        .max_tokens(ITINERARY_MAX_TOKENS)
}

/// Category budget request
pub fn budget(params: &TripParameters, options: BudgetOptions) -> CompletionRequest {
    let mut prompt = format!(
        r#"Estimate the cost of a {days}-day {budget} trip to {destination} for {travelers} traveler(s), travel style {style}.

Return JSON in exactly this shape, all amounts in USD:
{{
  "accommodation": {{"budget_min": 0, "budget_max": 0, "recommendations": [], "daily_average": 0}},
  "transportation": {{"airport_transfers": 0, "local_daily": 0, "total_transport": 0, "options": []}},
  "food": {{"budget_daily": 0, "luxury_daily": 0, "total_food_budget": 0, "total_food_luxury": 0, "dining_recommendations": []}},
  "activities": {{"daily_activity_budget": 0, "total_activities": 0, "must_see_attractions": [{{"name": "", "cost": 0}}], "free_activities": []}},
  "shopping": {{"souvenirs_budget": 0, "luxury_shopping": 0, "local_markets": ""}},
  "miscellaneous": {{"emergency_fund": 0, "tips_gratuities": 0, "phone_internet": 0}},
  "total_estimates": {{"budget_total": 0, "mid_range_total": 0, "luxury_total": 0}},
  "daily_breakdown": {{"budget_per_day": 0, "luxury_per_day": 0}},
  "money_saving_tips": [],
  "currency_info": {{"local_currency": "", "exchange_rate_usd": 0, "payment_methods": []}}
}}"#,
        days = params.duration_days,
        budget = params.budget.as_str(),
        destination = params.destination,
        travelers = params.total_travelers(),
        style = params.travel_style.as_str(),
    );
    if options.include_alternatives {
        prompt.push_str(
            "\n\nList cheaper and pricier alternatives in accommodation.recommendations and transportation.options.",
        );
    }
    if !options.detailed_breakdown {
        prompt.push_str(
            "\n\nOnly total_estimates and daily_breakdown need figures; other sections may stay at 0.",
        );
    }

    CompletionRequest::new(BUDGET_SYSTEM, prompt)
        .temperature(BUDGET_TEMPERATURE)
        .max_tokens(BUDGET_MAX_TOKENS)
}

/// Local recommendations request
pub fn recommendations(params: &TripParameters) -> CompletionRequest {
    let prompt = format!(
        r#"Give insider recommendations for a {style} trip to {destination} (interests: {interests}).

Use specific names, districts and prices. Return JSON in exactly this shape, five entries per list:
{{
  "must_visit_attractions": ["Name - why it is worth it"],
  "local_cuisine": ["Dish at Place - price"],
  "must_try_restaurants": ["Restaurant (District): cuisine, price, tip"],
  "hidden_gems": ["Name - description"],
  "budget_tips": [],
  "cultural_tips": []
}}"#,
        style = params.travel_style.as_str(),
        destination = params.destination,
        interests = interests(params),
    );

    CompletionRequest::new(RECOMMENDATIONS_SYSTEM, prompt)
        .temperature(RECOMMENDATIONS_TEMPERATURE)
        .max_tokens(RECOMMENDATIONS_MAX_TOKENS)
        .top_p(RECOMMENDATIONS_TOP_P)
        .timeout(Duration::from_secs(RECOMMENDATIONS_TIMEOUT_SECONDS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, TravelStyle};
    use chrono::NaiveDate;

    fn params() -> TripParameters {
        TripParameters {
            destination: "Lisbon".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            duration_days: 3,
            adults: 2,
            children: 1,
            group_size: 2,
            budget: BudgetTier::Budget,
            budget_amount: None,
            currency: "EUR".into(),
            travel_style: TravelStyle::Romantic,
            interests: vec!["food".into(), "music".into()],
            special_requirements: Some("wheelchair access".into()),
            accommodation_preference: None,
            transportation_preference: None,
            session_id: None,
        }
    }

    #[test]
    fn test_itinerary_request() {
        let request = itinerary(&params());
        assert_eq!(request.temperature, ITINERARY_TEMPERATURE);
        assert_eq!(request.max_tokens, ITINERARY_MAX_TOKENS);
        assert!(request.prompt.contains("3-day itinerary for Lisbon"));
        assert!(request.prompt.contains("Interests: food, music"));
        assert!(request.prompt.contains("wheelchair access"));
        assert!(request.prompt.contains("\"daily_schedule\""));
    }

    #[test]
    fn test_budget_request_counts_children() {
        let request = budget(&params(), BudgetOptions::default());
        assert_eq!(request.temperature, BUDGET_TEMPERATURE);
        assert!(request.prompt.contains("for 3 traveler(s)"));
        assert!(request.top_p.is_none());
    }

    #[test]
    fn test_budget_request_follows_options() {
        let full = budget(&params(), BudgetOptions::default());
        assert!(full.prompt.contains("pricier alternatives"));
        assert!(!full.prompt.contains("Only total_estimates"));

        let brief = budget(
            &params(),
            BudgetOptions {
                include_alternatives: false,
                detailed_breakdown: false,
            },
        );
        assert!(!brief.prompt.contains("pricier alternatives"));
        assert!(brief.prompt.contains("Only total_estimates"));
    }

    #[test]
    fn test_recommendations_request() {
        let mut p = params();
        p.interests.clear();
        let request = recommendations(&p);
        assert_eq!(request.top_p, Some(RECOMMENDATIONS_TOP_P));
        assert_eq!(
            request.timeout,
            Some(Duration::from_secs(RECOMMENDATIONS_TIMEOUT_SECONDS))
        );
        assert!(request.prompt.contains("interests: general"));
    }
}
