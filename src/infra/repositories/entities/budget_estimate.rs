use sea_orm::entity::prelude::*;

use crate::domain::{BudgetEstimate, BudgetFigures};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budget_estimates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub itinerary_id: Uuid,
    pub accommodation_min: f64,
    pub accommodation_max: f64,
    pub accommodation_recommendations: Json,
    pub transportation_min: f64,
    pub transportation_max: f64,
    pub transportation_breakdown: Json,
    pub food_min: f64,
    pub food_max: f64,
    pub dining_recommendations: Json,
    pub activities_min: f64,
    pub activities_max: f64,
    pub activities_breakdown: Json,
    pub shopping_min: f64,
    pub shopping_max: f64,
    pub miscellaneous: f64,
    pub emergency_fund: f64,
    pub total_min: f64,
    pub total_max: f64,
    pub budget_alternatives: Json,
    pub luxury_alternatives: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ai_itinerary::Entity",
        from = "Column::ItineraryId",
        to = "super::ai_itinerary::Column::Id",
        on_delete = "Cascade"
    )]
    Itinerary,
}

impl Related<super::ai_itinerary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Itinerary.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BudgetEstimate {
    fn from(model: Model) -> Self {
        BudgetEstimate {
            id: model.id,
            itinerary_id: model.itinerary_id,
            figures: BudgetFigures {
                accommodation_min: model.accommodation_min,
                accommodation_max: model.accommodation_max,
                accommodation_recommendations: serde_json::from_value(
                    model.accommodation_recommendations,
                )
                .unwrap_or_default(),
                transportation_min: model.transportation_min,
                transportation_max: model.transportation_max,
                transportation_breakdown: serde_json::from_value(model.transportation_breakdown)
                    .unwrap_or_default(),
                food_min: model.food_min,
                food_max: model.food_max,
                dining_recommendations: serde_json::from_value(model.dining_recommendations)
                    .unwrap_or_default(),
                activities_min: model.activities_min,
                activities_max: model.activities_max,
                activities_breakdown: serde_json::from_value(model.activities_breakdown)
                    .unwrap_or_default(),
                shopping_min: model.shopping_min,
                shopping_max: model.shopping_max,
                miscellaneous: model.miscellaneous,
                emergency_fund: model.emergency_fund,
                total_min: model.total_min,
                total_max: model.total_max,
                budget_alternatives: serde_json::from_value(model.budget_alternatives)
                    .unwrap_or_default(),
                luxury_alternatives: serde_json::from_value(model.luxury_alternatives)
                    .unwrap_or_default(),
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
