//! Migration: Create free_trips table for anonymous sessions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FreeTrips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreeTrips::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FreeTrips::Destination).string_len(200).not_null())
                    .col(ColumnDef::new(FreeTrips::StartDate).date().not_null())
                    .col(ColumnDef::new(FreeTrips::EndDate).date().not_null())
                    .col(ColumnDef::new(FreeTrips::Budget).double().null())
                    .col(ColumnDef::new(FreeTrips::Currency).string_len(10).not_null())
                    .col(ColumnDef::new(FreeTrips::Adults).integer().not_null().default(1))
                    .col(ColumnDef::new(FreeTrips::Children).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(FreeTrips::AccommodationType)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(FreeTrips::TransportationMode)
                            .string_len(50)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(FreeTrips::Interests).text().not_null())
                    .col(ColumnDef::new(FreeTrips::Description).text().not_null())
                    .col(ColumnDef::new(FreeTrips::ContactEmail).string().not_null())
                    .col(ColumnDef::new(FreeTrips::ContactName).string().not_null())
                    .col(ColumnDef::new(FreeTrips::Itinerary).text().not_null())
                    .col(
                        ColumnDef::new(FreeTrips::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(FreeTrips::SessionId).string_len(100).not_null())
                    .col(
                        ColumnDef::new(FreeTrips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FreeTrips::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_free_trips_session_id")
                    .table(FreeTrips::Table)
                    .col(FreeTrips::SessionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FreeTrips::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FreeTrips {
    Table,
    Id,
    Destination,
    StartDate,
    EndDate,
    Budget,
    Currency,
    Adults,
    Children,
    AccommodationType,
    TransportationMode,
    Interests,
    Description,
    ContactEmail,
    ContactName,
    Itinerary,
    IsActive,
    SessionId,
    CreatedAt,
    UpdatedAt,
}
