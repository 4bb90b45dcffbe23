//! User entity for SeaORM

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub staff_id: Option<String>,
    pub gender: Option<String>,
    pub ic_number: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub emergency_contact: Option<String>,
    pub relation: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: UserRole::from(model.role.as_str()),
            staff_id: model.staff_id,
            gender: model.gender,
            ic_number: model.ic_number,
            contact_number: model.contact_number,
            address: model.address,
            blood_type: model.blood_type,
            emergency_contact: model.emergency_contact,
            relation: model.relation,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
