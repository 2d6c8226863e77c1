//! Generated itineraries. Owner is null for session-only rows.

use sea_orm::entity::prelude::*;

use crate::domain::AiItinerary;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ai_itineraries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<i32>,
    pub session_id: Option<String>,
    pub destination: String,
    pub start_date: Date,
    pub end_date: Date,
    pub duration_days: i32,
    pub adults: i32,
    pub children: i32,
    pub budget: String,
    pub budget_amount: Option<f64>,
    pub currency: String,
    pub travel_style: String,
    pub interests: Json,
    pub accommodation_preference: String,
    pub transportation_preference: String,
    pub itinerary_content: Json,
    pub budget_breakdown: Json,
    pub recommendations: Json,
    pub ai_model_used: String,
    pub generation_time: Option<f64>,
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
    #[sea_orm(has_one = "super::budget_estimate::Entity")]
    BudgetEstimate,
    #[sea_orm(has_many = "super::generation_log::Entity")]
    GenerationLogs,
}

impl Related<super::budget_estimate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetEstimate.def()
    }
}

impl Related<super::generation_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenerationLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Stored JSON that no longer matches the content types reads as empty.
impl From<Model> for AiItinerary {
    fn from(model: Model) -> Self {
        AiItinerary {
            id: model.id,
            user_id: model.user_id,
            session_id: model.session_id,
            destination: model.destination,
            start_date: model.start_date,
            end_date: model.end_date,
            duration_days: model.duration_days,
            adults: model.adults,
            children: model.children,
            budget: model.budget.parse().unwrap_or_default(),
            budget_amount: model.budget_amount,
            currency: model.currency,
            travel_style: model.travel_style.parse().unwrap_or_default(),
            interests: serde_json::from_value(model.interests).unwrap_or_default(),
            accommodation_preference: model.accommodation_preference,
            transportation_preference: model.transportation_preference,
            itinerary_content: serde_json::from_value(model.itinerary_content).unwrap_or_default(),
            budget_breakdown: serde_json::from_value(model.budget_breakdown).unwrap_or_default(),
            recommendations: serde_json::from_value(model.recommendations).unwrap_or_default(),
            ai_model_used: model.ai_model_used,
            generation_time: model.generation_time,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
