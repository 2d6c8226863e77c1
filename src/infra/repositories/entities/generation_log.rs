use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "generation_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub itinerary_id: Uuid,
    /// `itinerary`, `budget` or `recommendations`
    pub request_type: String,
    #[sea_orm(column_type = "Text")]
    pub prompt_sent: String,
    #[sea_orm(column_type = "Text")]
    pub response_received: String,
    pub tokens_used: Option<i32>,
    pub response_time: f64,
    pub success: bool,
    #[sea_orm(column_type = "Text")]
    pub error_message: String,
    pub timestamp: DateTimeUtc,
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
