//! Anonymous session trips.

use sea_orm::entity::prelude::*;

use crate::domain::FreeTrip;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "free_trips")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub destination: String,
    pub start_date: Date,
    pub end_date: Date,
    pub budget: Option<f64>,
    pub currency: String,
    pub adults: i32,
    pub children: i32,
    pub accommodation_type: String,
    pub transportation_mode: String,
    #[sea_orm(column_type = "Text")]
    pub interests: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub contact_email: String,
    pub contact_name: String,
    #[sea_orm(column_type = "Text")]
    pub itinerary: String,
    pub is_active: bool,
    #[sea_orm(indexed)]
    pub session_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FreeTrip {
    fn from(model: Model) -> Self {
        FreeTrip {
            id: model.id,
            destination: model.destination,
            start_date: model.start_date,
            end_date: model.end_date,
            budget: model.budget,
            currency: model.currency,
            adults: model.adults,
            children: model.children,
            accommodation_type: model.accommodation_type,
            transportation_mode: model.transportation_mode,
            interests: model.interests,
            description: model.description,
            contact_email: model.contact_email,
            contact_name: model.contact_name,
            itinerary: model.itinerary,
            is_active: model.is_active,
            session_id: model.session_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
