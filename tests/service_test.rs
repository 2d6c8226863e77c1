//! Service unit tests over mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use mockall::predicate::eq;

use travel_planner::config::Config;
use travel_planner::domain::{
    CreateTrip, FreeTripDraft, FreeTripUpdate, Password, Trip, UpdateTrip, User,
};
use travel_planner::errors::{AppError, AppResult};
use travel_planner::infra::repositories::{
    MockDestinationRepository, MockFreeTripRepository, MockItineraryRepository,
    MockTripRepository, MockUserRepository,
};
use travel_planner::infra::{
    Cache, DestinationRepository, FreeTripRepository, ItineraryRepository, TransactionFuture,
    TransactionContext, TripRepository, UnitOfWork, UserRepository,
};
use travel_planner::services::{
    AuthService, Authenticator, FreeTripManager, FreeTripService, TripManager, TripService,
};

/// Unit of work over mock repositories. Transactions are not supported.
#[derive(Default)]
struct TestUnitOfWork {
    users: MockUserRepository,
    trips: MockTripRepository,
    free_trips: MockFreeTripRepository,
}

struct FrozenUnitOfWork {
    users: Arc<MockUserRepository>,
    trips: Arc<MockTripRepository>,
    free_trips: Arc<MockFreeTripRepository>,
    destinations: Arc<MockDestinationRepository>,
    itineraries: Arc<MockItineraryRepository>,
}

impl TestUnitOfWork {
    fn build(self) -> Arc<FrozenUnitOfWork> {
        Arc::new(FrozenUnitOfWork {
            users: Arc::new(self.users),
            trips: Arc::new(self.trips),
            free_trips: Arc::new(self.free_trips),
            destinations: Arc::new(MockDestinationRepository::new()),
            itineraries: Arc::new(MockItineraryRepository::new()),
        })
    }
}

#[async_trait]
impl UnitOfWork for FrozenUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn trips(&self) -> Arc<dyn TripRepository> {
        self.trips.clone()
    }

    fn free_trips(&self) -> Arc<dyn FreeTripRepository> {
        self.free_trips.clone()
    }

    fn destinations(&self) -> Arc<dyn DestinationRepository> {
        self.destinations.clone()
    }

    fn itineraries(&self) -> Arc<dyn ItineraryRepository> {
        self.itineraries.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn user(id: i32, email: &str, password: &str) -> User {
    User {
        id,
        email: email.to_string(),
        username: email.to_string(),
        password_hash: Password::new(password)
            .expect("hashable password")
            .into_string(),
        name: "Test User".to_string(),
        date_joined: Utc::now(),
        last_login: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn trip(id: i32, user_id: i32) -> Trip {
    Trip {
        id,
        user_id,
        destination: "Lisbon".to_string(),
        start_date: date(2025, 6, 10),
        end_date: date(2025, 6, 14),
        travelers: 2,
        interests: vec!["food".to_string()],
        budget_per_person: 900.0,
        itinerary: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn authenticator(uow: Arc<FrozenUnitOfWork>) -> Authenticator<FrozenUnitOfWork> {
    Authenticator::new(
        uow,
        Config::for_database("sqlite::memory:", "service-test-secret-with-32-chars!"),
        Cache::memory(16, 60),
    )
}

// =============================================================================
// AuthService
// =============================================================================

#[tokio::test]
async fn test_register_rejects_taken_email() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_email()
        .withf(|email| email == "taken@example.com")
        .returning(|email| Ok(Some(user(1, email, "secret123"))));
    uow.users.expect_create().never();

    let service = authenticator(uow.build());
    let result = service
        .register(
            " Taken@Example.com ".to_string(),
            "secret123".to_string(),
            "Taken".to_string(),
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_register_normalizes_and_issues_token() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_email().returning(|_| Ok(None));
    uow.users
        .expect_create()
        .withf(|new_user| {
            new_user.email == "new@example.com"
                && new_user.name == "New Person"
                && new_user.password_hash != "secret123"
                && new_user.last_login.is_some()
        })
        .times(1)
        .returning(|new_user| {
            Ok(User {
                id: 7,
                username: new_user.email.clone(),
                email: new_user.email,
                password_hash: new_user.password_hash,
                name: new_user.name,
                date_joined: Utc::now(),
                last_login: new_user.last_login,
            })
        });

    let service = authenticator(uow.build());
    let payload = service
        .register(
            "New@Example.com".to_string(),
            "secret123".to_string(),
            "  New Person ".to_string(),
        )
        .await
        .expect("registration succeeds");

    assert_eq!(payload.user.id, 7);
    let claims = service
        .authenticate(&payload.token)
        .await
        .expect("fresh token is valid");
    assert_eq!(claims.sub, "7");
    assert_eq!(claims.email, "new@example.com");
}

#[tokio::test]
async fn test_login_unknown_email_is_invalid_credentials() {
    let mut uow = TestUnitOfWork::default();
    uow.users.expect_find_by_email().returning(|_| Ok(None));
    uow.users.expect_record_login().never();

    let service = authenticator(uow.build());
    let result = service
        .login("ghost@example.com".to_string(), "secret123".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_wrong_password_is_invalid_credentials() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_email()
        .returning(|email| Ok(Some(user(3, email, "secret123"))));
    uow.users.expect_record_login().never();

    let service = authenticator(uow.build());
    let result = service
        .login("user@example.com".to_string(), "not-the-password".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_logout_revokes_only_that_token() {
    let mut uow = TestUnitOfWork::default();
    uow.users
        .expect_find_by_email()
        .returning(|email| Ok(Some(user(5, email, "secret123"))));
    uow.users
        .expect_record_login()
        .with(eq(5), mockall::predicate::always())
        .returning(|id, at| {
            let mut account = user(id, "user@example.com", "secret123");
            account.last_login = Some(at);
            Ok(account)
        });

    let service = authenticator(uow.build());
    let first = service
        .login("user@example.com".to_string(), "secret123".to_string())
        .await
        .expect("login succeeds");
    let second = service
        .login("user@example.com".to_string(), "secret123".to_string())
        .await
        .expect("login succeeds");

    let claims = service
        .authenticate(&first.token)
        .await
        .expect("token valid before logout");
    service.logout(&claims).await.expect("logout succeeds");

    assert!(matches!(
        service.authenticate(&first.token).await,
        Err(AppError::Unauthorized)
    ));
    assert!(service.authenticate(&second.token).await.is_ok());
}

#[tokio::test]
async fn test_authenticate_rejects_garbage() {
    let service = authenticator(TestUnitOfWork::default().build());
    assert!(matches!(
        service.authenticate("not.a.jwt").await,
        Err(AppError::Jwt(_))
    ));
}

// =============================================================================
// TripService
// =============================================================================

#[tokio::test]
async fn test_create_trip_checks_date_window() {
    let mut uow = TestUnitOfWork::default();
    uow.trips.expect_create().never();

    let service = TripManager::new(uow.build());
    let result = service
        .create(
            1,
            CreateTrip {
                destination: "Lisbon".to_string(),
                start_date: date(2025, 6, 10),
                end_date: date(2025, 6, 9),
                travelers: 1,
                interests: vec![],
                budget_per_person: 100.0,
                itinerary: None,
            },
        )
        .await;

    match result {
        Err(AppError::InvalidFields(fields)) => assert!(fields.contains_key("end_date")),
        other => panic!("expected field error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_trip_of_other_user_is_not_found() {
    let mut uow = TestUnitOfWork::default();
    uow.trips
        .expect_find_for_user()
        .with(eq(10), eq(2))
        .returning(|_, _| Ok(None));

    let service = TripManager::new(uow.build());
    let err = service.get(2, 10).await.expect_err("trip is not visible");

    assert_eq!(err.to_string(), "Trip not found");
}

#[tokio::test]
async fn test_update_trip_validates_merged_dates() {
    let mut uow = TestUnitOfWork::default();
    uow.trips
        .expect_find_for_user()
        .returning(|id, user_id| Ok(Some(trip(id, user_id))));
    uow.trips.expect_update().never();

    let service = TripManager::new(uow.build());
    let result = service
        .update(
            1,
            4,
            UpdateTrip {
                end_date: Some(date(2025, 6, 10)),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::InvalidFields(_))));
}

#[tokio::test]
async fn test_update_trip_keeps_untouched_fields() {
    let mut uow = TestUnitOfWork::default();
    uow.trips
        .expect_find_for_user()
        .returning(|id, user_id| Ok(Some(trip(id, user_id))));
    uow.trips.expect_update().times(1).returning(Ok);

    let service = TripManager::new(uow.build());
    let updated = service
        .update(
            1,
            4,
            UpdateTrip {
                destination: Some("Porto".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.destination, "Porto");
    assert_eq!(updated.travelers, 2);
    assert_eq!(updated.duration_days(), 5);
}

#[tokio::test]
async fn test_delete_missing_trip_is_not_found() {
    let mut uow = TestUnitOfWork::default();
    uow.trips
        .expect_delete_for_user()
        .returning(|_, _| Ok(false));

    let service = TripManager::new(uow.build());
    assert!(matches!(
        service.delete(1, 99).await,
        Err(AppError::NotFound("Trip"))
    ));
}

// =============================================================================
// FreeTripService
// =============================================================================

fn draft(start_offset: i64, end_offset: i64) -> FreeTripDraft {
    let today = Utc::now().date_naive();
    FreeTripDraft {
        destination: Some("Marrakesh".to_string()),
        start_date: Some((today + Duration::days(start_offset)).to_string()),
        end_date: Some((today + Duration::days(end_offset)).to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_free_trip_in_the_past_is_rejected() {
    let mut uow = TestUnitOfWork::default();
    uow.free_trips.expect_create().never();

    let service = FreeTripManager::new(uow.build());
    let result = service.create(draft(-1, 3)).await;

    match result {
        Err(AppError::InvalidFields(fields)) => assert!(fields.contains_key("start_date")),
        other => panic!("expected field error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_free_trip_gets_session_id() {
    let mut uow = TestUnitOfWork::default();
    uow.free_trips
        .expect_create()
        .withf(|trip| uuid::Uuid::parse_str(&trip.session_id).is_ok() && trip.adults == 1)
        .times(1)
        .returning(|new_trip| {
            Ok(travel_planner::domain::FreeTrip {
                id: 1,
                destination: new_trip.destination,
                start_date: new_trip.start_date,
                end_date: new_trip.end_date,
                budget: Some(new_trip.budget),
                currency: new_trip.currency,
                adults: new_trip.adults,
                children: new_trip.children,
                accommodation_type: new_trip.accommodation_type,
                transportation_mode: new_trip.transportation_mode,
                interests: new_trip.interests,
                description: new_trip.description,
                contact_email: new_trip.contact_email,
                contact_name: new_trip.contact_name,
                itinerary: new_trip.itinerary,
                is_active: true,
                session_id: new_trip.session_id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

    let service = FreeTripManager::new(uow.build());
    let trip = service.create(draft(0, 4)).await.expect("created");

    assert_eq!(trip.budget, Some(1000.0));
    assert!(!trip.session_id.is_empty());
}

#[tokio::test]
async fn test_update_inactive_free_trip_is_not_found() {
    let mut uow = TestUnitOfWork::default();
    uow.free_trips.expect_find_active().returning(|_| Ok(None));
    uow.free_trips.expect_update().never();

    let service = FreeTripManager::new(uow.build());
    let err = service
        .update(8, FreeTripUpdate::default())
        .await
        .expect_err("inactive trip is hidden");

    assert_eq!(err.to_string(), "Trip not found");
}
