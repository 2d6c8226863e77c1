use sea_orm::entity::prelude::*;

use crate::domain::CityRef;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub country: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attraction::Entity")]
    Attractions,
    #[sea_orm(has_many = "super::hotel::Entity")]
    Hotels,
    #[sea_orm(has_many = "super::restaurant::Entity")]
    Restaurants,
}

impl Related<super::attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attractions.def()
    }
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotels.def()
    }
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CityRef {
    fn from(model: Model) -> Self {
        CityRef {
            id: model.id,
            name: model.name,
            country: model.country,
            description: model.description,
            image_url: model.image_url,
        }
    }
}
