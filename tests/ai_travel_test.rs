//! Generation against a mocked OpenRouter endpoint.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};

use common::{json_request, spawn_app_with, test_config, TestApp};
use travel_planner::config::{AiSettings, PerformanceMode};
use travel_planner::domain::{GenerateItineraryRequest, TripParameters};
use travel_planner::infra::{Cache, OpenRouterClient, TextGenerator};
use travel_planner::services::ai::{fallback, GenerationCache, TravelGenerator};

const API_KEY: &str = "sk-or-v1-test-key-0123456789";

const ITINERARY_MARKER: &str = "experienced travel planner";
const BUDGET_MARKER: &str = "travel finance advisor";
const RECOMMENDATIONS_MARKER: &str = "local guide";

fn ai_settings(server: &MockServer, mode: PerformanceMode) -> AiSettings {
    let mut settings = AiSettings::offline().with_api_key(API_KEY);
    settings.api_url = server.url("/chat");
    settings.mode = mode;
    settings.request_timeout_secs = 5;
    settings
}

fn client(settings: &AiSettings) -> Arc<dyn TextGenerator> {
    Arc::new(OpenRouterClient::new(settings).expect("client with test key"))
}

async fn spawn_ai_app(server: &MockServer, mode: PerformanceMode) -> TestApp {
    let settings = ai_settings(server, mode);
    let llm = client(&settings);
    let mut config = test_config();
    config.ai = settings;
    spawn_app_with(config, Some(llm)).await
}

/// Chat completion body wrapping `content` the way OpenRouter does
fn completion(content: &Value) -> Value {
    json!({
        "id": "gen-test",
        "choices": [{"message": {"role": "assistant", "content": content.to_string()}}]
    })
}

fn request_body(destination: &str) -> Value {
    json!({
        "destination": destination,
        "start_date": "2025-09-10",
        "end_date": "2025-09-13",
        "adults": 2,
        "budget": "mid-range",
        "interests": ["food"]
    })
}

fn parameters(destination: &str) -> TripParameters {
    let request: GenerateItineraryRequest =
        serde_json::from_value(request_body(destination)).expect("valid request");
    request.into_parameters().expect("valid dates")
}

async fn generate(app: &TestApp, destination: &str) -> Value {
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/ai-travel/generate",
            request_body(destination),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "generate failed: {body}");
    body
}

fn lisbon_itinerary() -> Value {
    json!({
        "overview": "Three unhurried days in Lisbon",
        "daily_schedule": [{
            "day": 1,
            "date": "2025-09-10",
            "title": "Day 1: Alfama and the castle",
            "activities": [{
                "time": "09:00",
                "activity": "Castelo de Sao Jorge",
                "location": "Alfama",
                "type": "sightseeing",
                "estimated_cost": 15
            }]
        }]
    })
}

fn lisbon_budget() -> Value {
    json!({
        "total_estimates": {"budget_total": 600, "mid_range_total": 1100, "luxury_total": 2400},
        "money_saving_tips": ["Buy a Viva Viagem card"]
    })
}

#[tokio::test]
async fn test_ai_mode_stores_generated_content() {
    let server = MockServer::start_async().await;
    let itinerary_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat")
                .header("authorization", format!("Bearer {API_KEY}"))
                .body_contains(ITINERARY_MARKER);
            then.status(200).json_body(completion(&lisbon_itinerary()));
        })
        .await;
    let budget_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(BUDGET_MARKER);
            then.status(200).json_body(completion(&lisbon_budget()));
        })
        .await;
    let recommendations_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat")
                .body_contains(RECOMMENDATIONS_MARKER);
            then.status(200).json_body(completion(&json!({})));
        })
        .await;

    let app = spawn_ai_app(&server, PerformanceMode::Ai).await;
    let body = generate(&app, "Lisbon").await;
    let itinerary = &body["data"]["itinerary"];

    assert_eq!(itinerary["ai_model_used"], "deepseek/deepseek-chat");
    assert_eq!(
        itinerary["itinerary_content"]["overview"],
        "Three unhurried days in Lisbon"
    );
    assert_eq!(
        itinerary["itinerary_content"]["daily_schedule"][0]["title"],
        "Day 1: Alfama and the castle"
    );
    assert_eq!(
        itinerary["budget_breakdown"]["total_estimates"]["luxury_total"],
        2400.0
    );
    assert_eq!(
        itinerary["budget_breakdown"]["money_saving_tips"][0],
        "Buy a Viva Viagem card"
    );

    assert_eq!(itinerary_mock.hits_async().await, 1);
    assert_eq!(budget_mock.hits_async().await, 1);
    assert_eq!(recommendations_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_server_errors_fall_back_to_templates() {
    let server = MockServer::start_async().await;
    let failing = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(500).body("upstream exploded");
        })
        .await;

    let app = spawn_ai_app(&server, PerformanceMode::Ai).await;
    let body = generate(&app, "Tokyo").await;
    let itinerary = &body["data"]["itinerary"];

    let expected_budget =
        serde_json::to_value(fallback::budget("Tokyo", 3)).expect("serializable budget");
    assert_eq!(itinerary["budget_breakdown"], expected_budget);
    assert_eq!(
        itinerary["itinerary_content"]["daily_schedule"]
            .as_array()
            .map(Vec::len),
        Some(3)
    );
    // itinerary + budget + three recommendation attempts
    assert_eq!(failing.hits_async().await, 5);
}

#[tokio::test]
async fn test_hybrid_recommendations_stop_after_three_attempts() {
    let server = MockServer::start_async().await;
    let itinerary_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(ITINERARY_MARKER);
            then.status(200).json_body(completion(&lisbon_itinerary()));
        })
        .await;
    let budget_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(BUDGET_MARKER);
            then.status(200).json_body(completion(&lisbon_budget()));
        })
        .await;
    let recommendations_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat")
                .body_contains(RECOMMENDATIONS_MARKER);
            then.status(503);
        })
        .await;

    let settings = ai_settings(&server, PerformanceMode::Hybrid);
    let generator = TravelGenerator::new(
        Some(client(&settings)),
        &settings,
        GenerationCache::new(Cache::memory(8, 60)),
    )
    .with_retry_delay(Duration::from_millis(1));

    let params = parameters("Lisbon");
    let generation = generator.generate(&params).await;

    assert_eq!(recommendations_mock.hits_async().await, 3);
    assert_eq!(budget_mock.hits_async().await, 1);
    assert_eq!(itinerary_mock.hits_async().await, 0);

    assert_eq!(
        generation.plan.itinerary.recommendations,
        fallback::recommendations("Lisbon")
    );
    assert_eq!(generation.plan.budget.total_estimates.luxury_total, 2400.0);
    assert_eq!(generation.logs.iter().filter(|log| !log.success).count(), 1);
}

#[tokio::test]
async fn test_repeated_request_is_served_from_cache() {
    let server = MockServer::start_async().await;
    let itinerary_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(ITINERARY_MARKER);
            then.status(200).json_body(completion(&lisbon_itinerary()));
        })
        .await;
    let budget_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(BUDGET_MARKER);
            then.status(200).json_body(completion(&lisbon_budget()));
        })
        .await;

    let app = spawn_ai_app(&server, PerformanceMode::Ai).await;
    let first = generate(&app, "Lisbon").await;
    let second = generate(&app, "  lisbon ").await;

    assert_ne!(
        first["data"]["itinerary"]["id"],
        second["data"]["itinerary"]["id"]
    );
    assert_eq!(
        first["data"]["itinerary"]["itinerary_content"],
        second["data"]["itinerary"]["itinerary_content"]
    );
    assert_eq!(itinerary_mock.hits_async().await, 1);
    assert_eq!(budget_mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_regenerate_budget_calls_api_again() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(ITINERARY_MARKER);
            then.status(200).json_body(completion(&lisbon_itinerary()));
        })
        .await;
    let budget_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(BUDGET_MARKER);
            then.status(200).json_body(completion(&lisbon_budget()));
        })
        .await;

    let app = spawn_ai_app(&server, PerformanceMode::Ai).await;
    let body = generate(&app, "Lisbon").await;
    let id = body["data"]["itinerary"]["id"].clone();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/ai-travel/budget/regenerate",
            json!({"itinerary_id": id}),
            None,
        ))
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["budget"]["total_estimates"]["mid_range_total"], 1100.0);
    assert_eq!(budget_mock.hits_async().await, 2);
}

#[tokio::test]
async fn test_regenerate_budget_passes_options_to_prompt() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat").body_contains(ITINERARY_MARKER);
            then.status(200).json_body(completion(&lisbon_itinerary()));
        })
        .await;
    let first_budget = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat")
                .body_contains(BUDGET_MARKER)
                .body_contains("pricier alternatives");
            then.status(200).json_body(completion(&lisbon_budget()));
        })
        .await;
    let brief_budget = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat")
                .body_contains(BUDGET_MARKER)
                .body_contains("Only total_estimates");
            then.status(200).json_body(completion(&lisbon_budget()));
        })
        .await;

    let app = spawn_ai_app(&server, PerformanceMode::Ai).await;
    let body = generate(&app, "Lisbon").await;
    let id = body["data"]["itinerary"]["id"].clone();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/ai-travel/budget/regenerate",
            json!({
                "itinerary_id": id,
                "include_alternatives": false,
                "detailed_breakdown": false
            }),
            None,
        ))
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(first_budget.hits_async().await, 1);
    assert_eq!(brief_budget.hits_async().await, 1);
}
