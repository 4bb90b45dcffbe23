//! Nurse schedule entity for SeaORM

use sea_orm::entity::prelude::*;

use crate::domain::{NurseSchedule, ScheduleStatus, Shift};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "nurse_schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nurse_id: Uuid,
    pub room_id: Uuid,
    pub shift: String,
    pub date: Date,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for NurseSchedule {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nurse_id: model.nurse_id,
            room_id: model.room_id,
            shift: Shift::from(model.shift.as_str()),
            date: model.date,
            status: ScheduleStatus::from(model.status.as_str()),
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
