//! Trips owned by registered users.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::config::MAX_DESTINATION_LENGTH;

/// Stored trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Trip {
    pub id: i32,
    #[serde(skip_serializing)]
    pub user_id: i32,
    pub destination: String,
    #[schema(value_type = String, example = "2025-06-10")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, example = "2025-06-14")]
    pub end_date: NaiveDate,
    pub travelers: i32,
    pub interests: Vec<String>,
    pub budget_per_person: f64,
    #[schema(value_type = Object)]
    pub itinerary: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Inclusive number of calendar days.
    pub fn duration_days(&self) -> i64 {
        inclusive_days(self.start_date, self.end_date)
    }
}

/// Days covered by a window, counting both ends.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Trip as returned to its owner
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripResponse {
    #[serde(flatten)]
    pub trip: Trip,
    pub duration_days: i64,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        let duration_days = trip.duration_days();
        Self {
            trip,
            duration_days,
        }
    }
}

/// Body of `POST /api/trips`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTrip {
    #[validate(length(min = 1, max = MAX_DESTINATION_LENGTH, message = "Destination must be 1-200 characters."))]
    #[schema(example = "Lisbon")]
    pub destination: String,
    #[schema(value_type = String, example = "2025-06-10")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, example = "2025-06-14")]
    pub end_date: NaiveDate,
    #[serde(default = "default_travelers")]
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub travelers: i32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[validate(range(min = 0.0, message = "Ensure this value is greater than or equal to 0."))]
    pub budget_per_person: f64,
    #[schema(value_type = Object)]
    pub itinerary: Option<Value>,
}

fn default_travelers() -> i32 {
    1
}

/// Body of `PUT /api/trips/{id}`; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTrip {
    #[validate(length(min = 1, max = MAX_DESTINATION_LENGTH, message = "Destination must be 1-200 characters."))]
    pub destination: Option<String>,
    #[schema(value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub travelers: Option<i32>,
    pub interests: Option<Vec<String>>,
    #[validate(range(min = 0.0, message = "Ensure this value is greater than or equal to 0."))]
    pub budget_per_person: Option<f64>,
    #[schema(value_type = Object)]
    pub itinerary: Option<Value>,
}

impl UpdateTrip {
    /// Apply the present fields on top of `trip`.
    pub fn apply_to(self, mut trip: Trip) -> Trip {
        if let Some(destination) = self.destination {
            trip.destination = destination;
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(travelers) = self.travelers {
            trip.travelers = travelers;
        }
        if let Some(interests) = self.interests {
            trip.interests = interests;
        }
        if let Some(budget) = self.budget_per_person {
            trip.budget_per_person = budget;
        }
        if self.itinerary.is_some() {
            trip.itinerary = self.itinerary;
        }
        trip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> Trip {
        Trip {
            id: 7,
            user_id: 1,
            destination: "Lisbon".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            travelers: 2,
            interests: vec!["food".into()],
            budget_per_person: 900.0,
            itinerary: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_duration_counts_both_ends() {
        assert_eq!(trip().duration_days(), 5);
    }

    #[test]
    fn test_response_flattens_trip() {
        let json = serde_json::to_value(TripResponse::from(trip())).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["duration_days"], 5);
        assert_eq!(json["start_date"], "2025-06-10");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let update = UpdateTrip {
            travelers: Some(3),
            ..Default::default()
        };
        let updated = update.apply_to(trip());
        assert_eq!(updated.travelers, 3);
        assert_eq!(updated.destination, "Lisbon");
        assert_eq!(updated.interests, vec!["food".to_string()]);
    }

    #[test]
    fn test_create_defaults_travelers() {
        let body: CreateTrip = serde_json::from_value(serde_json::json!({
            "destination": "Porto",
            "start_date": "2025-07-01",
            "end_date": "2025-07-03",
            "budget_per_person": 500
        }))
        .unwrap();
        assert_eq!(body.travelers, 1);
        assert!(body.interests.is_empty());
        assert!(body.validate().is_ok());
    }
}
