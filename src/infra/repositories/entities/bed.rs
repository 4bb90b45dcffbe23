//! Bed entity for SeaORM

use sea_orm::entity::prelude::*;

use crate::domain::{Bed, BedStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "beds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub room_id: Uuid,
    pub bed_number: i32,
    pub status: String,
    /// Unique when set: a patient holds at most one bed
    pub patient_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_delete = "Cascade"
    )]
    Room,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Bed {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            room_id: model.room_id,
            bed_number: model.bed_number,
            status: BedStatus::from(model.status.as_str()),
            patient_id: model.patient_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
