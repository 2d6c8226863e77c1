//! Seed command - Loads the starter destination catalog.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the seed command. Safe to re-run.
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    let report = db
        .seed()
        .await
        .map_err(|e| AppError::internal(format!("Seeding failed: {}", e)))?;

    if report.total() == 0 {
        tracing::info!("Destination catalog already seeded");
    } else {
        tracing::info!(
            categories = report.categories,
            cities = report.cities,
            attractions = report.attractions,
            hotels = report.hotels,
            restaurants = report.restaurants,
            "Destination catalog seeded"
        );
    }

    Ok(())
}
