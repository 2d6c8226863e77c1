//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_table;
mod m20250101_000002_create_trips_table;
mod m20250101_000003_create_free_trips_table;
mod m20250101_000004_create_destination_catalog;
mod m20250101_000005_create_ai_travel_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_trips_table::Migration),
            Box::new(m20250101_000003_create_free_trips_table::Migration),
            Box::new(m20250101_000004_create_destination_catalog::Migration),
            Box::new(m20250101_000005_create_ai_travel_tables::Migration),
        ]
    }
}
