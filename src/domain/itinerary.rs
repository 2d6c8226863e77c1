//! Stored AI itineraries, their budget estimates and generation logs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::content::{BudgetPlan, ItineraryContent, PricedAttraction, Recommendations, TransportationBudget};
use super::planning::{BudgetTier, TravelStyle, TripParameters};
use crate::config::GENERATION_LOG_RESPONSE_LIMIT;

/// Itinerary content and budget plan produced by one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub itinerary: ItineraryContent,
    pub budget: BudgetPlan,
}

/// Persisted itinerary
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AiItinerary {
    pub id: Uuid,
    /// Owner, or null for session-only itineraries
    #[serde(rename = "user")]
    pub user_id: Option<i32>,
    pub session_id: Option<String>,
    pub destination: String,
    #[schema(value_type = String)]
    pub start_date: NaiveDate,
    #[schema(value_type = String)]
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub adults: i32,
    pub children: i32,
    pub budget: BudgetTier,
    pub budget_amount: Option<f64>,
    pub currency: String,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub accommodation_preference: String,
    pub transportation_preference: String,
    pub itinerary_content: ItineraryContent,
    pub budget_breakdown: BudgetPlan,
    pub recommendations: Recommendations,
    pub ai_model_used: String,
    pub generation_time: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AiItinerary {
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    pub fn total_travelers(&self) -> i32 {
        self.adults + self.children
    }

    /// Anonymous itineraries are open; owned ones only to their owner.
    pub fn is_accessible_by(&self, caller: Option<i32>) -> bool {
        match self.user_id {
            None => true,
            Some(owner) => caller == Some(owner),
        }
    }
}

/// Fields for a new itinerary row
#[derive(Debug, Clone, PartialEq)]
pub struct NewAiItinerary {
    pub user_id: Option<i32>,
    pub session_id: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub adults: i32,
    pub children: i32,
    pub budget: BudgetTier,
    pub budget_amount: Option<f64>,
    pub currency: String,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub accommodation_preference: String,
    pub transportation_preference: String,
    pub itinerary_content: ItineraryContent,
    pub budget_breakdown: BudgetPlan,
    pub recommendations: Recommendations,
    pub ai_model_used: String,
    pub generation_time: f64,
}

impl NewAiItinerary {
    pub fn from_generation(
        params: &TripParameters,
        user_id: Option<i32>,
        plan: GeneratedPlan,
        model: &str,
        generation_time: f64,
    ) -> Self {
        let recommendations = plan.itinerary.recommendations.clone();
        Self {
            user_id,
            session_id: params.session_id.clone(),
            destination: params.destination.clone(),
            start_date: params.start_date,
            end_date: params.end_date,
            duration_days: saturating_i32(params.duration_days),
            adults: saturating_i32(params.adults),
            children: saturating_i32(params.children),
            budget: params.budget,
            budget_amount: params.budget_amount,
            currency: params.currency.clone(),
            travel_style: params.travel_style,
            interests: params.interests.clone(),
            accommodation_preference: params.accommodation_preference.clone().unwrap_or_default(),
            transportation_preference: params
                .transportation_preference
                .clone()
                .unwrap_or_default(),
            itinerary_content: plan.itinerary,
            budget_breakdown: plan.budget,
            recommendations,
            ai_model_used: model.to_string(),
            generation_time,
        }
    }
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// =============================================================================
// Budget estimate
// =============================================================================

/// Min/max figures derived from a budget plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct BudgetFigures {
    pub accommodation_min: f64,
    pub accommodation_max: f64,
    pub accommodation_recommendations: Vec<String>,
    pub transportation_min: f64,
    pub transportation_max: f64,
    pub transportation_breakdown: TransportationBudget,
    pub food_min: f64,
    pub food_max: f64,
    pub dining_recommendations: Vec<String>,
    pub activities_min: f64,
    pub activities_max: f64,
    pub activities_breakdown: Vec<PricedAttraction>,
    pub shopping_min: f64,
    pub shopping_max: f64,
    pub miscellaneous: f64,
    pub emergency_fund: f64,
    pub total_min: f64,
    pub total_max: f64,
    #[schema(value_type = Vec<Object>)]
    pub budget_alternatives: Vec<Value>,
    #[schema(value_type = Vec<Object>)]
    pub luxury_alternatives: Vec<Value>,
}

impl BudgetFigures {
    /// Derive figures for a trip of `days` days.
    pub fn from_plan(plan: &BudgetPlan, days: u32) -> Self {
        let days = f64::from(days);
        let misc = plan.miscellaneous.emergency_fund;

        Self {
            accommodation_min: plan.accommodation.budget_min,
            accommodation_max: plan.accommodation.budget_max,
            accommodation_recommendations: plan.accommodation.recommendations.clone(),
            transportation_min: plan.transportation.local_daily * days,
            transportation_max: plan.transportation.local_daily * days * 1.5,
            transportation_breakdown: plan.transportation.clone(),
            food_min: plan.food.budget_daily * days,
            food_max: plan.food.luxury_daily * days,
            dining_recommendations: plan.food.dining_recommendations.clone(),
            activities_min: plan.activities.daily_activity_budget * days,
            activities_max: plan.activities.daily_activity_budget * days * 1.5,
            activities_breakdown: plan.activities.must_see_attractions.clone(),
            shopping_min: plan.shopping.souvenirs_budget,
            shopping_max: plan.shopping.souvenirs_budget * 2.0,
            miscellaneous: misc,
            emergency_fund: misc,
            total_min: plan.total_estimates.budget_total,
            total_max: plan.total_estimates.luxury_total,
            budget_alternatives: Vec::new(),
            luxury_alternatives: Vec::new(),
        }
    }
}

/// Stored budget estimate, one per itinerary
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BudgetEstimate {
    pub id: i32,
    #[serde(rename = "itinerary")]
    pub itinerary_id: Uuid,
    #[serde(flatten)]
    pub figures: BudgetFigures,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Generation log
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Itinerary,
    Budget,
    Recommendations,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationKind::Itinerary => "itinerary",
            GenerationKind::Budget => "budget",
            GenerationKind::Recommendations => "recommendations",
        }
    }
}

/// Audit row for one generation
#[derive(Debug, Clone, PartialEq)]
pub struct NewGenerationLog {
    pub request_type: GenerationKind,
    pub prompt_sent: String,
    pub response_received: String,
    pub response_time: f64,
    pub success: bool,
    pub error_message: String,
}

impl NewGenerationLog {
    /// Successful run; the response is cut to the log limit.
    pub fn success(
        request_type: GenerationKind,
        prompt: impl Into<String>,
        response: &str,
        response_time: f64,
    ) -> Self {
        Self {
            request_type,
            prompt_sent: prompt.into(),
            response_received: response.chars().take(GENERATION_LOG_RESPONSE_LIMIT).collect(),
            response_time,
            success: true,
            error_message: String::new(),
        }
    }

    /// Run that fell back to template content.
    pub fn failure(
        request_type: GenerationKind,
        prompt: impl Into<String>,
        error: impl Into<String>,
        response_time: f64,
    ) -> Self {
        Self {
            request_type,
            prompt_sent: prompt.into(),
            response_received: String::new(),
            response_time,
            success: false,
            error_message: error.into(),
        }
    }
}

// =============================================================================
// Read models
// =============================================================================

/// Full itinerary as returned by the detail and generate endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItineraryDetail {
    #[serde(flatten)]
    pub itinerary: AiItinerary,
    pub detailed_budget: Option<BudgetEstimate>,
    pub is_anonymous: bool,
    pub total_travelers: i32,
}

impl ItineraryDetail {
    pub fn new(itinerary: AiItinerary, detailed_budget: Option<BudgetEstimate>) -> Self {
        Self {
            is_anonymous: itinerary.is_anonymous(),
            total_travelers: itinerary.total_travelers(),
            itinerary,
            detailed_budget,
        }
    }
}

/// Listing entry for the history endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItinerarySummary {
    pub id: Uuid,
    pub destination: String,
    #[schema(value_type = String)]
    pub start_date: NaiveDate,
    #[schema(value_type = String)]
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub adults: i32,
    pub children: i32,
    pub budget: BudgetTier,
    pub budget_amount: Option<f64>,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub itinerary_content: ItineraryContent,
    pub budget_breakdown: BudgetPlan,
    pub created_at: DateTime<Utc>,
    pub is_anonymous: bool,
    pub total_travelers: i32,
}

impl From<AiItinerary> for ItinerarySummary {
    fn from(it: AiItinerary) -> Self {
        Self {
            is_anonymous: it.is_anonymous(),
            total_travelers: it.total_travelers(),
            id: it.id,
            destination: it.destination,
            start_date: it.start_date,
            end_date: it.end_date,
            duration_days: it.duration_days,
            adults: it.adults,
            children: it.children,
            budget: it.budget,
            budget_amount: it.budget_amount,
            travel_style: it.travel_style,
            interests: it.interests,
            itinerary_content: it.itinerary_content,
            budget_breakdown: it.budget_breakdown,
            created_at: it.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{
        AccommodationBudget, ActivitiesBudget, FoodBudget, MiscellaneousBudget, ShoppingBudget,
        TotalEstimates,
    };

    fn plan() -> BudgetPlan {
        BudgetPlan {
            accommodation: AccommodationBudget {
                budget_min: 160.0,
                budget_max: 800.0,
                recommendations: vec!["Hostel: $40/night".into()],
                daily_average: 80.0,
            },
            transportation: TransportationBudget {
                airport_transfers: 50.0,
                local_daily: 20.0,
                total_transport: 130.0,
                options: vec!["Metro".into()],
            },
            food: FoodBudget {
                budget_daily: 30.0,
                luxury_daily: 100.0,
                ..Default::default()
            },
            activities: ActivitiesBudget {
                daily_activity_budget: 60.0,
                must_see_attractions: vec![PricedAttraction {
                    name: "Museum".into(),
                    cost: 15.0,
                }],
                ..Default::default()
            },
            shopping: ShoppingBudget {
                souvenirs_budget: 150.0,
                ..Default::default()
            },
            miscellaneous: MiscellaneousBudget {
                emergency_fund: 200.0,
                ..Default::default()
            },
            total_estimates: TotalEstimates {
                budget_total: 930.0,
                mid_range_total: 1320.0,
                luxury_total: 2500.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_figures_scale_with_days() {
        let figures = BudgetFigures::from_plan(&plan(), 4);

        assert_eq!(figures.accommodation_min, 160.0);
        assert_eq!(figures.accommodation_max, 800.0);
        assert_eq!(figures.transportation_min, 80.0);
        assert_eq!(figures.transportation_max, 120.0);
        assert_eq!(figures.food_min, 120.0);
        assert_eq!(figures.food_max, 400.0);
        assert_eq!(figures.activities_min, 240.0);
        assert_eq!(figures.activities_max, 360.0);
        assert_eq!(figures.shopping_min, 150.0);
        assert_eq!(figures.shopping_max, 300.0);
        assert_eq!(figures.miscellaneous, 200.0);
        assert_eq!(figures.emergency_fund, 200.0);
        assert_eq!(figures.total_min, 930.0);
        assert_eq!(figures.total_max, 2500.0);
    }

    #[test]
    fn test_figures_copy_lists() {
        let figures = BudgetFigures::from_plan(&plan(), 2);
        assert_eq!(figures.accommodation_recommendations.len(), 1);
        assert_eq!(figures.transportation_breakdown.options, vec!["Metro".to_string()]);
        assert_eq!(figures.activities_breakdown[0].name, "Museum");
        assert!(figures.budget_alternatives.is_empty());
        assert!(figures.luxury_alternatives.is_empty());
    }

    #[test]
    fn test_log_response_is_truncated() {
        let long = "x".repeat(GENERATION_LOG_RESPONSE_LIMIT + 250);
        let log = NewGenerationLog::success(GenerationKind::Budget, "Regenerated budget for Oslo", &long, 1.2);
        assert_eq!(log.response_received.chars().count(), GENERATION_LOG_RESPONSE_LIMIT);
        assert!(log.success);
        assert_eq!(log.request_type.as_str(), "budget");
    }

    #[test]
    fn test_access_rules() {
        let now = Utc::now();
        let mut itinerary = AiItinerary {
            id: Uuid::new_v4(),
            user_id: None,
            session_id: Some("abc".into()),
            destination: "Oslo".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            duration_days: 2,
            adults: 2,
            children: 1,
            budget: BudgetTier::Budget,
            budget_amount: None,
            currency: "USD".into(),
            travel_style: TravelStyle::Solo,
            interests: vec![],
            accommodation_preference: String::new(),
            transportation_preference: String::new(),
            itinerary_content: ItineraryContent::default(),
            budget_breakdown: BudgetPlan::default(),
            recommendations: Recommendations::default(),
            ai_model_used: "template".into(),
            generation_time: Some(0.1),
            created_at: now,
            updated_at: now,
        };
        assert!(itinerary.is_accessible_by(None));
        assert!(itinerary.is_accessible_by(Some(9)));

        itinerary.user_id = Some(4);
        assert!(itinerary.is_accessible_by(Some(4)));
        assert!(!itinerary.is_accessible_by(Some(9)));
        assert!(!itinerary.is_accessible_by(None));

        let detail = serde_json::to_value(ItineraryDetail::new(itinerary, None)).unwrap();
        assert_eq!(detail["user"], 4);
        assert_eq!(detail["total_travelers"], 3);
        assert_eq!(detail["is_anonymous"], false);
        assert!(detail["detailed_budget"].is_null());
    }
}
