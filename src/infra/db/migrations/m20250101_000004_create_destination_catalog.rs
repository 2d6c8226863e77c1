//! Migration: Create the destination catalog (cities, categories, places).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cities::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Cities::Country).string_len(100).not_null())
                    .col(ColumnDef::new(Cities::Description).text().not_null())
                    .col(ColumnDef::new(Cities::ImageUrl).string().not_null().default(""))
                    .col(ColumnDef::new(Cities::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Cities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Categories::Icon).string_len(50).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        let mut attractions = place_table(Attractions::Table);
        attractions
            .col(ColumnDef::new(Attractions::Latitude).double().null())
            .col(ColumnDef::new(Attractions::Longitude).double().null());
        manager.create_table(attractions.to_owned()).await?;

        let mut hotels = place_table(Hotels::Table);
        hotels.col(ColumnDef::new(Hotels::PricePerNight).double().null());
        manager.create_table(hotels.to_owned()).await?;

        let mut restaurants = place_table(Restaurants::Table);
        restaurants
            .col(
                ColumnDef::new(Restaurants::Cuisine)
                    .string_len(100)
                    .not_null()
                    .default(""),
            )
            .col(
                ColumnDef::new(Restaurants::PriceLevel)
                    .string_len(10)
                    .not_null()
                    .default("$$"),
            );
        manager.create_table(restaurants.to_owned()).await?;

        for (index, table) in [
            ("idx_attractions_city_id", Place::Attractions),
            ("idx_hotels_city_id", Place::Hotels),
            ("idx_restaurants_city_id", Place::Restaurants),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(index)
                        .table(table)
                        .col(Place::CityId)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hotels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attractions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await
    }
}

/// Columns shared by attractions, hotels and restaurants
fn place_table<T: Iden + 'static>(table: T) -> TableCreateStatement {
    let name = table.to_string();
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Place::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Place::Name).string_len(200).not_null())
        .col(ColumnDef::new(Place::CityId).integer().not_null())
        .col(ColumnDef::new(Place::CategoryId).integer().null())
        .col(ColumnDef::new(Place::Description).text().not_null())
        .col(ColumnDef::new(Place::Address).string().not_null().default(""))
        .col(ColumnDef::new(Place::ImageUrl).string().not_null().default(""))
        .col(ColumnDef::new(Place::Website).string().not_null().default(""))
        .col(ColumnDef::new(Place::Rating).double().not_null().default(0.0))
        .col(ColumnDef::new(Place::IsActive).boolean().not_null().default(true))
        .col(
            ColumnDef::new(Place::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Place::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_city", name))
                .from_col(Place::CityId)
                .to(Cities::Table, Cities::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_category", name))
                .from_col(Place::CategoryId)
                .to(Categories::Table, Categories::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    Name,
    Country,
    Description,
    ImageUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
    Kind,
    Icon,
}

#[derive(Iden)]
enum Place {
    Attractions,
    Hotels,
    Restaurants,
    Id,
    Name,
    CityId,
    CategoryId,
    Description,
    Address,
    ImageUrl,
    Website,
    Rating,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Attractions {
    Table,
    Latitude,
    Longitude,
}

#[derive(Iden)]
enum Hotels {
    Table,
    PricePerNight,
}

#[derive(Iden)]
enum Restaurants {
    Table,
    Cuisine,
    PriceLevel,
}
