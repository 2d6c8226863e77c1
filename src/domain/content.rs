//! Generated travel content: the itinerary document and the budget plan.
//!
//! Both shapes are produced either by the text-generation API or by the
//! template synthesizer, and are stored as JSON. Every field has a serde
//! default so partially filled model output still parses.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

// =============================================================================
// Itinerary
// =============================================================================

/// A day-by-day plan with recommendations and a rough cost breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ItineraryContent {
    pub overview: String,
    pub total_estimated_cost: f64,
    pub daily_schedule: Vec<DayPlan>,
    pub recommendations: Recommendations,
    /// Free-form cost table; filled from the budget plan when the generator left it empty.
    #[schema(value_type = Object)]
    pub budget_breakdown: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DayPlan {
    pub day: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub title: String,
    pub theme: String,
    pub activities: Vec<Activity>,
    pub dining_recommendations: Vec<String>,
    pub daily_cost_estimate: f64,
    pub transportation_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Activity {
    pub time: String,
    pub activity: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub estimated_cost: f64,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "bestTime", skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    pub tips: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

/// Display lists shown as text plus map categories rendered as markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Recommendations {
    pub budget_tips: Vec<String>,
    pub cultural_tips: Vec<String>,
    pub local_cuisine: Vec<String>,
    pub must_visit_attractions: Vec<String>,
    pub must_try_restaurants: Vec<String>,
    pub hidden_gems: Vec<String>,
    pub sightseeing: Vec<PlacePin>,
    pub food_dining: Vec<PlacePin>,
    pub shopping: Vec<PlacePin>,
    pub cultural: Vec<PlacePin>,
    pub attractions: Vec<PlacePin>,
    pub adventure: Vec<PlacePin>,
}

impl Recommendations {
    /// True when at least one display list has entries.
    pub fn has_display_content(&self) -> bool {
        [
            &self.budget_tips,
            &self.cultural_tips,
            &self.local_cuisine,
            &self.must_visit_attractions,
            &self.must_try_restaurants,
            &self.hidden_gems,
        ]
        .iter()
        .any(|list| !list.is_empty())
    }

    /// Replace the map categories with the ones from `source`.
    pub fn with_map_categories_from(mut self, source: &Recommendations) -> Self {
        self.sightseeing = source.sightseeing.clone();
        self.food_dining = source.food_dining.clone();
        self.shopping = source.shopping.clone();
        self.cultural = source.cultural.clone();
        self.attractions = source.attractions.clone();
        self.adventure = source.adventure.clone();
        self
    }
}

/// Map marker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PlacePin {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub area: String,
    pub description: String,
}

// =============================================================================
// Budget plan
// =============================================================================

/// Per-category cost estimate for a whole trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BudgetPlan {
    pub accommodation: AccommodationBudget,
    pub transportation: TransportationBudget,
    pub food: FoodBudget,
    pub activities: ActivitiesBudget,
    pub shopping: ShoppingBudget,
    pub miscellaneous: MiscellaneousBudget,
    pub total_estimates: TotalEstimates,
    pub daily_breakdown: DailyBreakdown,
    pub money_saving_tips: Vec<String>,
    pub currency_info: CurrencyInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AccommodationBudget {
    pub budget_min: f64,
    pub budget_max: f64,
    pub recommendations: Vec<String>,
    pub daily_average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TransportationBudget {
    pub airport_transfers: f64,
    pub local_daily: f64,
    pub total_transport: f64,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FoodBudget {
    pub budget_daily: f64,
    pub luxury_daily: f64,
    pub total_food_budget: f64,
    pub total_food_luxury: f64,
    pub dining_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ActivitiesBudget {
    pub daily_activity_budget: f64,
    pub total_activities: f64,
    pub must_see_attractions: Vec<PricedAttraction>,
    pub free_activities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PricedAttraction {
    pub name: String,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ShoppingBudget {
    pub souvenirs_budget: f64,
    pub luxury_shopping: f64,
    /// A number from templates, usually a sentence from the model.
    #[schema(value_type = Object)]
    pub local_markets: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MiscellaneousBudget {
    pub emergency_fund: f64,
    pub tips_gratuities: f64,
    pub phone_internet: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TotalEstimates {
    pub budget_total: f64,
    pub mid_range_total: f64,
    pub luxury_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DailyBreakdown {
    pub budget_per_day: f64,
    pub luxury_per_day: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CurrencyInfo {
    pub local_currency: String,
    pub exchange_rate_usd: f64,
    pub payment_methods: Vec<String>,
}

impl ItineraryContent {
    /// Re-date the schedule so day one falls on `start`.
    pub fn redate(&mut self, start: NaiveDate) {
        for (offset, day) in (0u64..).zip(self.daily_schedule.iter_mut()) {
            if let Some(date) = start.checked_add_days(Days::new(offset)) {
                day.date = date.format("%Y-%m-%d").to_string();
            }
        }
    }

    /// Fill gaps the itinerary generator leaves for the budget plan to answer.
    pub fn merge_budget(&mut self, budget: &BudgetPlan) {
        if self.budget_breakdown.is_empty() {
            if let Ok(Value::Object(map)) = serde_json::to_value(budget) {
                self.budget_breakdown = map;
            }
        }

        if self.total_estimated_cost == 0.0 {
            let totals = &budget.total_estimates;
            self.total_estimated_cost = if totals.luxury_total > 0.0 {
                totals.luxury_total
            } else {
                totals.budget_total
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_model_output_parses() {
        let json = r#"{
            "overview": "Three days in Lisbon",
            "daily_schedule": [{"day": 1, "activities": [{"activity": "Tram 28", "type": "sightseeing"}]}]
        }"#;

        let content: ItineraryContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.daily_schedule[0].activities[0].kind, "sightseeing");
        assert_eq!(content.total_estimated_cost, 0.0);
        assert!(!content.recommendations.has_display_content());
    }

    #[test]
    fn test_activity_wire_names() {
        let activity = Activity {
            kind: "dining".into(),
            best_time: Some("Evening".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "dining");
        assert_eq!(json["bestTime"], "Evening");
        assert!(json.get("highlights").is_none());
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn test_redate_follows_new_start() {
        let mut content = ItineraryContent {
            daily_schedule: vec![
                DayPlan {
                    day: 1,
                    date: "2025-04-01".into(),
                    ..Default::default()
                },
                DayPlan {
                    day: 2,
                    date: "2025-04-02".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        content.redate(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        let dates: Vec<_> = content.daily_schedule.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-12-31", "2026-01-01"]);
    }

    #[test]
    fn test_merge_budget_fills_empty_fields() {
        let mut content = ItineraryContent::default();
        let mut budget = BudgetPlan::default();
        budget.total_estimates.budget_total = 760.0;
        budget.total_estimates.luxury_total = 2050.0;

        content.merge_budget(&budget);

        assert_eq!(content.total_estimated_cost, 2050.0);
        assert!(content.budget_breakdown.contains_key("total_estimates"));
    }

    #[test]
    fn test_merge_budget_keeps_existing_values() {
        let mut content = ItineraryContent {
            total_estimated_cost: 480.0,
            ..Default::default()
        };
        content
            .budget_breakdown
            .insert("meals_per_day".into(), Value::from(60));

        content.merge_budget(&BudgetPlan::default());

        assert_eq!(content.total_estimated_cost, 480.0);
        assert_eq!(content.budget_breakdown.len(), 1);
    }

    #[test]
    fn test_local_markets_accepts_text() {
        let budget: BudgetPlan =
            serde_json::from_str(r#"{"shopping": {"local_markets": "Feira da Ladra: $20"}}"#)
                .unwrap();
        assert_eq!(budget.shopping.local_markets, "Feira da Ladra: $20");
    }
}
