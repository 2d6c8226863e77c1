//! Anonymous trips grouped by a client-chosen session id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::ValidateEmail;

use super::planning::ensure_date_window;
use super::trip::inclusive_days;
use crate::config::{DEFAULT_CURRENCY, DEFAULT_FREE_TRIP_BUDGET};
use crate::errors::{AppError, AppResult};

/// Stored free trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FreeTrip {
    pub id: i32,
    pub destination: String,
    #[schema(value_type = String, example = "2025-09-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, example = "2025-09-05")]
    pub end_date: NaiveDate,
    pub budget: Option<f64>,
    pub currency: String,
    pub adults: i32,
    pub children: i32,
    pub accommodation_type: String,
    pub transportation_mode: String,
    pub interests: String,
    pub description: String,
    pub contact_email: String,
    pub contact_name: String,
    pub itinerary: String,
    pub is_active: bool,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FreeTripResponse {
    #[serde(flatten)]
    pub trip: FreeTrip,
    pub duration_days: i64,
}

impl From<FreeTrip> for FreeTripResponse {
    fn from(trip: FreeTrip) -> Self {
        let duration_days = inclusive_days(trip.start_date, trip.end_date);
        Self {
            trip,
            duration_days,
        }
    }
}

/// Body of `POST /api/free-trips`. Everything is optional on the wire so
/// missing fields can be reported by name.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct FreeTripDraft {
    pub destination: Option<String>,
    #[schema(example = "2025-09-01")]
    pub start_date: Option<String>,
    #[schema(example = "2025-09-05")]
    pub end_date: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    pub accommodation_type: Option<String>,
    pub transportation_mode: Option<String>,
    /// Text, or a list joined with ", "
    #[schema(value_type = Object)]
    pub interests: Option<Value>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
    #[schema(value_type = Object)]
    pub itinerary: Option<Value>,
    pub session_id: Option<String>,
}

/// Validated free trip ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewFreeTrip {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub currency: String,
    pub adults: i32,
    pub children: i32,
    pub accommodation_type: String,
    pub transportation_mode: String,
    pub interests: String,
    pub description: String,
    pub contact_email: String,
    pub contact_name: String,
    pub itinerary: String,
    pub session_id: String,
}

impl FreeTripDraft {
    /// Check required fields and dates, then apply defaults.
    /// `today` is the reference for the start-date check.
    pub fn into_new(self, today: NaiveDate) -> AppResult<NewFreeTrip> {
        let destination = required("destination", self.destination)?;
        let start_raw = required("start_date", self.start_date)?;
        let end_raw = required("end_date", self.end_date)?;

        let start_date = parse_date("start_date", &start_raw)?;
        let end_date = parse_date("end_date", &end_raw)?;
        ensure_not_past(start_date, today)?;
        ensure_date_window(start_date, end_date)?;

        let contact_email = self.contact_email.unwrap_or_default();
        ensure_email(&contact_email)?;

        let session_id = self
            .session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(NewFreeTrip {
            destination,
            start_date,
            end_date,
            budget: self
                .budget
                .filter(|b| *b != 0.0)
                .unwrap_or(DEFAULT_FREE_TRIP_BUDGET),
            currency: self
                .currency
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            adults: self.adults.filter(|a| *a >= 1).unwrap_or(1),
            children: self.children.unwrap_or(0),
            accommodation_type: self.accommodation_type.unwrap_or_default(),
            transportation_mode: self.transportation_mode.unwrap_or_default(),
            interests: self.interests.map(value_to_text).unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            contact_email,
            contact_name: self.contact_name.unwrap_or_default(),
            itinerary: self.itinerary.map(value_to_text).unwrap_or_default(),
            session_id,
        })
    }
}

/// Body of `PUT /api/free-trips/{id}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct FreeTripUpdate {
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    pub accommodation_type: Option<String>,
    pub transportation_mode: Option<String>,
    #[schema(value_type = Object)]
    pub interests: Option<Value>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
    #[schema(value_type = Object)]
    pub itinerary: Option<Value>,
}

impl FreeTripUpdate {
    /// Merge into `trip`, re-checking any dates that change.
    pub fn apply_to(self, mut trip: FreeTrip, today: NaiveDate) -> AppResult<FreeTrip> {
        let dates_changed = self.start_date.is_some() || self.end_date.is_some();

        if let Some(raw) = self.start_date {
            let start = parse_date("start_date", &raw)?;
            ensure_not_past(start, today)?;
            trip.start_date = start;
        }
        if let Some(raw) = self.end_date {
            trip.end_date = parse_date("end_date", &raw)?;
        }
        if dates_changed {
            ensure_date_window(trip.start_date, trip.end_date)?;
        }

        if let Some(email) = self.contact_email {
            ensure_email(&email)?;
            trip.contact_email = email;
        }
        if let Some(destination) = self.destination {
            if destination.trim().is_empty() {
                return Err(AppError::field("destination", "This field may not be blank."));
            }
            trip.destination = destination;
        }
        if let Some(adults) = self.adults {
            trip.adults = adults.max(1);
        }

        trip.budget = self.budget.or(trip.budget);
        trip.currency = self.currency.unwrap_or(trip.currency);
        trip.children = self.children.unwrap_or(trip.children);
        trip.accommodation_type = self.accommodation_type.unwrap_or(trip.accommodation_type);
        trip.transportation_mode = self.transportation_mode.unwrap_or(trip.transportation_mode);
        trip.description = self.description.unwrap_or(trip.description);
        trip.contact_name = self.contact_name.unwrap_or(trip.contact_name);
        if let Some(interests) = self.interests {
            trip.interests = value_to_text(interests);
        }
        if let Some(itinerary) = self.itinerary {
            trip.itinerary = value_to_text(itinerary);
        }

        Ok(trip)
    }
}

fn required(field: &str, value: Option<String>) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(format!("Missing required field: {}", field)))
}

fn parse_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::field(field, "Invalid date format. Use YYYY-MM-DD format."))
}

fn ensure_not_past(start: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if start < today {
        return Err(AppError::field(
            "start_date",
            format!(
                "Start date cannot be in the past. Today is {}",
                today.format("%Y-%m-%d")
            ),
        ));
    }
    Ok(())
}

fn ensure_email(email: &str) -> AppResult<()> {
    if !email.is_empty() && !email.validate_email() {
        return Err(AppError::field("contact_email", "Enter a valid email address."));
    }
    Ok(())
}

/// Flatten a loosely typed text field: lists become comma separated.
fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn draft() -> FreeTripDraft {
        FreeTripDraft {
            destination: Some("Marrakesh".into()),
            start_date: Some("2025-03-10".into()),
            end_date: Some("2025-03-14".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied_on_create() {
        let trip = draft().into_new(today()).unwrap();
        assert_eq!(trip.adults, 1);
        assert_eq!(trip.children, 0);
        assert_eq!(trip.budget, 1000.0);
        assert_eq!(trip.currency, "USD");
        assert!(uuid::Uuid::parse_str(&trip.session_id).is_ok());
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut body = draft();
        body.end_date = None;
        let err = draft_error(body);
        assert_eq!(err.to_string(), "Missing required field: end_date");
    }

    #[test]
    fn test_past_start_date_rejected() {
        let mut body = draft();
        body.start_date = Some("2025-02-28".into());
        match draft_error(body) {
            AppError::InvalidFields(fields) => assert_eq!(
                fields["start_date"],
                vec!["Start date cannot be in the past. Today is 2025-03-01"]
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_start_today_is_allowed() {
        let mut body = draft();
        body.start_date = Some("2025-03-01".into());
        assert!(body.into_new(today()).is_ok());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut body = draft();
        body.end_date = Some("2025-03-10".into());
        assert!(matches!(draft_error(body), AppError::InvalidFields(f) if f.contains_key("end_date")));
    }

    #[test]
    fn test_zero_adults_coerced() {
        let mut body = draft();
        body.adults = Some(0);
        body.session_id = Some("browser-42".into());
        let trip = body.into_new(today()).unwrap();
        assert_eq!(trip.adults, 1);
        assert_eq!(trip.session_id, "browser-42");
    }

    #[test]
    fn test_interest_list_joined() {
        let mut body = draft();
        body.interests = Some(serde_json::json!(["souks", "food"]));
        assert_eq!(body.into_new(today()).unwrap().interests, "souks, food");
    }

    #[test]
    fn test_invalid_contact_email() {
        let mut body = draft();
        body.contact_email = Some("not-an-email".into());
        assert!(matches!(draft_error(body), AppError::InvalidFields(f) if f.contains_key("contact_email")));
    }

    #[test]
    fn test_update_revalidates_dates() {
        let new = draft().into_new(today()).unwrap();
        let trip = FreeTrip {
            id: 1,
            destination: new.destination,
            start_date: new.start_date,
            end_date: new.end_date,
            budget: Some(new.budget),
            currency: new.currency,
            adults: new.adults,
            children: new.children,
            accommodation_type: String::new(),
            transportation_mode: String::new(),
            interests: String::new(),
            description: String::new(),
            contact_email: String::new(),
            contact_name: String::new(),
            itinerary: String::new(),
            is_active: true,
            session_id: new.session_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let bad = FreeTripUpdate {
            end_date: Some("2025-03-05".into()),
            ..Default::default()
        };
        assert!(bad.apply_to(trip.clone(), today()).is_err());

        let good = FreeTripUpdate {
            description: Some("Riad stay".into()),
            ..Default::default()
        };
        let updated = good.apply_to(trip, today()).unwrap();
        assert_eq!(updated.description, "Riad stay");
        assert_eq!(updated.destination, "Marrakesh");
    }

    fn draft_error(body: FreeTripDraft) -> AppError {
        match body.into_new(today()) {
            Err(e) => e,
            Ok(trip) => panic!("expected error, got {:?}", trip),
        }
    }
}
