//! Migration: Create AI itineraries, budget estimates and generation logs.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiItineraries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiItineraries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiItineraries::UserId).integer().null())
                    .col(ColumnDef::new(AiItineraries::SessionId).string_len(100).null())
                    .col(ColumnDef::new(AiItineraries::Destination).string_len(200).not_null())
                    .col(ColumnDef::new(AiItineraries::StartDate).date().not_null())
                    .col(ColumnDef::new(AiItineraries::EndDate).date().not_null())
                    .col(ColumnDef::new(AiItineraries::DurationDays).integer().not_null())
                    .col(ColumnDef::new(AiItineraries::Adults).integer().not_null().default(1))
                    .col(ColumnDef::new(AiItineraries::Children).integer().not_null().default(0))
                    .col(ColumnDef::new(AiItineraries::Budget).string_len(20).not_null())
                    .col(ColumnDef::new(AiItineraries::BudgetAmount).double().null())
                    .col(ColumnDef::new(AiItineraries::Currency).string_len(10).not_null())
                    .col(ColumnDef::new(AiItineraries::TravelStyle).string_len(20).not_null())
                    .col(ColumnDef::new(AiItineraries::Interests).json().not_null())
                    .col(
                        ColumnDef::new(AiItineraries::AccommodationPreference)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(AiItineraries::TransportationPreference)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(AiItineraries::ItineraryContent).json().not_null())
                    .col(ColumnDef::new(AiItineraries::BudgetBreakdown).json().not_null())
                    .col(ColumnDef::new(AiItineraries::Recommendations).json().not_null())
                    .col(ColumnDef::new(AiItineraries::AiModelUsed).string_len(100).not_null())
                    .col(ColumnDef::new(AiItineraries::GenerationTime).double().null())
                    .col(
                        ColumnDef::new(AiItineraries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiItineraries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_itineraries_user")
                            .from(AiItineraries::Table, AiItineraries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_itineraries_session_id")
                    .table(AiItineraries::Table)
                    .col(AiItineraries::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BudgetEstimates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BudgetEstimates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BudgetEstimates::ItineraryId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(money(BudgetEstimates::AccommodationMin))
                    .col(money(BudgetEstimates::AccommodationMax))
                    .col(ColumnDef::new(BudgetEstimates::AccommodationRecommendations).json().not_null())
                    .col(money(BudgetEstimates::TransportationMin))
                    .col(money(BudgetEstimates::TransportationMax))
                    .col(ColumnDef::new(BudgetEstimates::TransportationBreakdown).json().not_null())
                    .col(money(BudgetEstimates::FoodMin))
                    .col(money(BudgetEstimates::FoodMax))
                    .col(ColumnDef::new(BudgetEstimates::DiningRecommendations).json().not_null())
                    .col(money(BudgetEstimates::ActivitiesMin))
                    .col(money(BudgetEstimates::ActivitiesMax))
                    .col(ColumnDef::new(BudgetEstimates::ActivitiesBreakdown).json().not_null())
                    .col(money(BudgetEstimates::ShoppingMin))
                    .col(money(BudgetEstimates::ShoppingMax))
                    .col(money(BudgetEstimates::Miscellaneous))
                    .col(money(BudgetEstimates::EmergencyFund))
                    .col(money(BudgetEstimates::TotalMin))
                    .col(money(BudgetEstimates::TotalMax))
                    .col(ColumnDef::new(BudgetEstimates::BudgetAlternatives).json().not_null())
                    .col(ColumnDef::new(BudgetEstimates::LuxuryAlternatives).json().not_null())
                    .col(
                        ColumnDef::new(BudgetEstimates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetEstimates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budget_estimates_itinerary")
                            .from(BudgetEstimates::Table, BudgetEstimates::ItineraryId)
                            .to(AiItineraries::Table, AiItineraries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GenerationLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GenerationLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GenerationLogs::ItineraryId).uuid().not_null())
                    .col(ColumnDef::new(GenerationLogs::RequestType).string_len(20).not_null())
                    .col(ColumnDef::new(GenerationLogs::PromptSent).text().not_null())
                    .col(ColumnDef::new(GenerationLogs::ResponseReceived).text().not_null())
                    .col(ColumnDef::new(GenerationLogs::TokensUsed).integer().null())
                    .col(ColumnDef::new(GenerationLogs::ResponseTime).double().not_null())
                    .col(ColumnDef::new(GenerationLogs::Success).boolean().not_null())
                    .col(ColumnDef::new(GenerationLogs::ErrorMessage).text().not_null())
                    .col(
                        ColumnDef::new(GenerationLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_generation_logs_itinerary")
                            .from(GenerationLogs::Table, GenerationLogs::ItineraryId)
                            .to(AiItineraries::Table, AiItineraries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GenerationLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BudgetEstimates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AiItineraries::Table).to_owned())
            .await
    }
}

fn money(column: BudgetEstimates) -> ColumnDef {
    ColumnDef::new(column).double().not_null().default(0.0).to_owned()
}

#[derive(Iden)]
enum AiItineraries {
    Table,
    Id,
    UserId,
    SessionId,
    Destination,
    StartDate,
    EndDate,
    DurationDays,
    Adults,
    Children,
    Budget,
    BudgetAmount,
    Currency,
    TravelStyle,
    Interests,
    AccommodationPreference,
    TransportationPreference,
    ItineraryContent,
    BudgetBreakdown,
    Recommendations,
    AiModelUsed,
    GenerationTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BudgetEstimates {
    Table,
    Id,
    ItineraryId,
    AccommodationMin,
    AccommodationMax,
    AccommodationRecommendations,
    TransportationMin,
    TransportationMax,
    TransportationBreakdown,
    FoodMin,
    FoodMax,
    DiningRecommendations,
    ActivitiesMin,
    ActivitiesMax,
    ActivitiesBreakdown,
    ShoppingMin,
    ShoppingMax,
    Miscellaneous,
    EmergencyFund,
    TotalMin,
    TotalMax,
    BudgetAlternatives,
    LuxuryAlternatives,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GenerationLogs {
    Table,
    Id,
    ItineraryId,
    RequestType,
    PromptSent,
    ResponseReceived,
    TokensUsed,
    ResponseTime,
    Success,
    ErrorMessage,
    Timestamp,
}
