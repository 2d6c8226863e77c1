//! Itinerary generation requests and their validated form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::config::{
    DEFAULT_CURRENCY, MAX_DESTINATION_LENGTH, MAX_INTEREST_LENGTH, MAX_TRIP_DAYS,
};
use crate::errors::{AppError, AppResult};

/// Spending tier a plan is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::MidRange => "mid-range",
            BudgetTier::Luxury => "luxury",
        }
    }
}

impl std::str::FromStr for BudgetTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget" => Ok(BudgetTier::Budget),
            "mid-range" => Ok(BudgetTier::MidRange),
            "luxury" => Ok(BudgetTier::Luxury),
            other => Err(AppError::internal(format!("unknown budget tier: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    #[default]
    Cultural,
    Adventure,
    Relaxation,
    Family,
    Romantic,
    Solo,
    Business,
}

impl TravelStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Cultural => "cultural",
            TravelStyle::Adventure => "adventure",
            TravelStyle::Relaxation => "relaxation",
            TravelStyle::Family => "family",
            TravelStyle::Romantic => "romantic",
            TravelStyle::Solo => "solo",
            TravelStyle::Business => "business",
        }
    }
}

impl std::str::FromStr for TravelStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cultural" => Ok(TravelStyle::Cultural),
            "adventure" => Ok(TravelStyle::Adventure),
            "relaxation" => Ok(TravelStyle::Relaxation),
            "family" => Ok(TravelStyle::Family),
            "romantic" => Ok(TravelStyle::Romantic),
            "solo" => Ok(TravelStyle::Solo),
            "business" => Ok(TravelStyle::Business),
            other => Err(AppError::internal(format!("unknown travel style: {}", other))),
        }
    }
}

/// Raw body of `POST /api/ai-travel/generate`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateItineraryRequest {
    #[validate(length(min = 1, max = MAX_DESTINATION_LENGTH, message = "Ensure this field has no more than 200 characters."))]
    #[schema(example = "Tokyo, Japan")]
    pub destination: String,
    #[schema(value_type = String, example = "2025-04-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, example = "2025-04-05")]
    pub end_date: NaiveDate,
    /// Derived from the dates when missing or zero
    #[validate(range(max = MAX_TRIP_DAYS, message = "Ensure this value is less than or equal to 365."))]
    pub duration_days: Option<u32>,
    #[serde(default = "default_adults")]
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    /// Overrides `adults` when present
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub group_size: Option<u32>,
    #[serde(default)]
    pub budget: BudgetTier,
    #[validate(range(min = 0.0, message = "Ensure this value is greater than or equal to 0."))]
    pub budget_amount: Option<f64>,
    #[serde(default = "default_currency")]
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code."))]
    pub currency: String,
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(default)]
    #[validate(custom(function = "validate_interests"))]
    pub interests: Vec<String>,
    pub special_requirements: Option<String>,
    pub accommodation_preference: Option<String>,
    pub transportation_preference: Option<String>,
    pub session_id: Option<String>,
}

fn default_adults() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn validate_interests(interests: &[String]) -> Result<(), ValidationError> {
    if interests
        .iter()
        .any(|interest| interest.chars().count() > MAX_INTEREST_LENGTH)
    {
        let mut error = ValidationError::new("interest_length");
        error.message = Some("Ensure each interest has no more than 100 characters.".into());
        return Err(error);
    }
    Ok(())
}

/// Request after date, duration and traveler normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripParameters {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: u32,
    pub adults: u32,
    pub children: u32,
    pub group_size: u32,
    pub budget: BudgetTier,
    pub budget_amount: Option<f64>,
    pub currency: String,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub special_requirements: Option<String>,
    pub accommodation_preference: Option<String>,
    pub transportation_preference: Option<String>,
    pub session_id: Option<String>,
}

impl TripParameters {
    pub fn total_travelers(&self) -> u32 {
        self.adults + self.children
    }
}

/// Reject windows where the end is not strictly after the start.
pub fn ensure_date_window(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end <= start {
        return Err(AppError::field(
            "end_date",
            "End date must be after start date",
        ));
    }
    Ok(())
}

impl GenerateItineraryRequest {
    /// Check field rules and produce normalized parameters.
    pub fn into_parameters(self) -> AppResult<TripParameters> {
        ensure_date_window(self.start_date, self.end_date)?;

        let duration_days = match self.duration_days {
            Some(days) if days > MAX_TRIP_DAYS => {
                return Err(AppError::field(
                    "duration_days",
                    "Ensure this value is less than or equal to 365.",
                ));
            }
            Some(days) if days > 0 => days,
            _ => {
                let span = (self.end_date - self.start_date).num_days().max(1);
                u32::try_from(span)
                    .ok()
                    .filter(|days| *days <= MAX_TRIP_DAYS)
                    .ok_or_else(|| {
                        AppError::field("end_date", "Trips can last at most 365 days")
                    })?
            }
        };

        let (adults, group_size) = match self.group_size {
            Some(size) => (size, size),
            None => (self.adults, self.adults),
        };

        Ok(TripParameters {
            destination: self.destination.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            duration_days,
            adults,
            children: self.children,
            group_size,
            budget: self.budget,
            budget_amount: self.budget_amount,
            currency: self.currency,
            travel_style: self.travel_style,
            interests: self.interests,
            special_requirements: self.special_requirements,
            accommodation_preference: self.accommodation_preference,
            transportation_preference: self.transportation_preference,
            session_id: self.session_id.filter(|s| !s.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> GenerateItineraryRequest {
        serde_json::from_value(json).unwrap()
    }

    fn base() -> serde_json::Value {
        serde_json::json!({
            "destination": "Kyoto",
            "start_date": "2025-05-01",
            "end_date": "2025-05-04"
        })
    }

    #[test]
    fn test_defaults_are_applied() {
        let req = request(base());
        assert!(req.validate().is_ok());

        let params = req.into_parameters().unwrap();
        assert_eq!(params.duration_days, 3);
        assert_eq!(params.adults, 1);
        assert_eq!(params.children, 0);
        assert_eq!(params.group_size, 1);
        assert_eq!(params.budget, BudgetTier::MidRange);
        assert_eq!(params.travel_style, TravelStyle::Cultural);
        assert_eq!(params.currency, "USD");
        assert_eq!(params.total_travelers(), 1);
    }

    #[test]
    fn test_end_date_must_follow_start_date() {
        let mut body = base();
        body["end_date"] = "2025-05-01".into();

        match request(body).into_parameters() {
            Err(AppError::InvalidFields(fields)) => {
                assert_eq!(fields["end_date"], vec!["End date must be after start date"]);
            }
            other => panic!("expected field error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_is_derived() {
        let mut body = base();
        body["duration_days"] = 0.into();
        assert_eq!(request(body).into_parameters().unwrap().duration_days, 3);
    }

    #[test]
    fn test_explicit_duration_is_kept() {
        let mut body = base();
        body["duration_days"] = 5.into();
        assert_eq!(request(body).into_parameters().unwrap().duration_days, 5);
    }

    #[test]
    fn test_explicit_duration_is_bounded() {
        let mut body = base();
        body["duration_days"] = 50_000.into();
        let req = request(body);

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("duration_days"));
        match req.into_parameters() {
            Err(AppError::InvalidFields(fields)) => assert!(fields.contains_key("duration_days")),
            other => panic!("expected field error, got {:?}", other),
        }
    }

    #[test]
    fn test_derived_span_is_bounded() {
        let mut body = base();
        body["end_date"] = "9999-12-31".into();

        match request(body).into_parameters() {
            Err(AppError::InvalidFields(fields)) => {
                assert_eq!(fields["end_date"], vec!["Trips can last at most 365 days"]);
            }
            other => panic!("expected field error, got {:?}", other),
        }

        let mut body = base();
        body["end_date"] = "2026-05-01".into();
        assert_eq!(request(body).into_parameters().unwrap().duration_days, 365);
    }

    #[test]
    fn test_group_size_overrides_adults() {
        let mut body = base();
        body["adults"] = 2.into();
        body["group_size"] = 4.into();
        body["children"] = 1.into();

        let params = request(body).into_parameters().unwrap();
        assert_eq!(params.adults, 4);
        assert_eq!(params.group_size, 4);
        assert_eq!(params.total_travelers(), 5);
    }

    #[test]
    fn test_adults_fill_group_size() {
        let mut body = base();
        body["adults"] = 3.into();
        assert_eq!(request(body).into_parameters().unwrap().group_size, 3);
    }

    #[test]
    fn test_field_rules() {
        let mut body = base();
        body["currency"] = "EURO".into();
        assert!(request(body).validate().is_err());

        let mut body = base();
        body["adults"] = 0.into();
        assert!(request(body).validate().is_err());

        let mut body = base();
        body["destination"] = "x".repeat(201).into();
        assert!(request(body).validate().is_err());

        let mut body = base();
        body["interests"] = serde_json::json!(["food", "y".repeat(101)]);
        assert!(request(body).validate().is_err());
    }

    #[test]
    fn test_unknown_choice_is_rejected() {
        let mut body = base();
        body["travel_style"] = "party".into();
        assert!(serde_json::from_value::<GenerateItineraryRequest>(body).is_err());

        let mut body = base();
        body["budget"] = "luxury".into();
        assert_eq!(request(body).budget, BudgetTier::Luxury);
    }

    #[test]
    fn test_blank_session_id_is_dropped() {
        let mut body = base();
        body["session_id"] = "  ".into();
        assert!(request(body).into_parameters().unwrap().session_id.is_none());
    }
}
