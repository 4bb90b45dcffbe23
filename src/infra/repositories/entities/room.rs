//! Room entity for SeaORM

use sea_orm::entity::prelude::*;

use crate::domain::{Room, RoomType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub room_number: String,
    pub floor: i32,
    pub room_type: String,
    pub total_beds: i32,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bed::Entity")]
    Beds,
}

impl Related<super::bed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Beds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Room {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            room_number: model.room_number,
            floor: model.floor,
            room_type: RoomType::from(model.room_type.as_str()),
            total_beds: model.total_beds,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
