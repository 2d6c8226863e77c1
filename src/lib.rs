//! Travel Planner - trip planning API with AI-drafted itineraries
//!
//! Registered users keep trips, anonymous visitors keep free trips under a
//! session id, and anyone can generate day-by-day itineraries with budgets.
//! Generation goes to OpenRouter when a key is configured and falls back to
//! deterministic templates otherwise.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases, including itinerary generation
//! - **infra**: Database, cache and the text-generation client
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve --port 8000
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Load the starter destination catalog
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
