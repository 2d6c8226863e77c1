//! Trips owned by registered users.

use sea_orm::entity::prelude::*;

use crate::domain::Trip;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub destination: String,
    pub start_date: Date,
    pub end_date: Date,
    pub travelers: i32,
    /// JSON list of strings
    pub interests: Json,
    pub budget_per_person: f64,
    pub itinerary: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Trip {
    fn from(model: Model) -> Self {
        Trip {
            id: model.id,
            user_id: model.user_id,
            destination: model.destination,
            start_date: model.start_date,
            end_date: model.end_date,
            travelers: model.travelers,
            interests: serde_json::from_value(model.interests).unwrap_or_default(),
            budget_per_person: model.budget_per_person,
            itinerary: model.itinerary,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
