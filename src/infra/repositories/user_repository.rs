//! User repository: admins, nurses and patients share one table.

use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{user, UserActiveModel, UserEntity};
use super::search::contains_any;
use crate::domain::{NewUser, User, UserRole};
use crate::errors::AppResult;

/// Columns matched by the staff directory search.
const USER_SEARCH_COLUMNS: [user::Column; 8] = [
    user::Column::Name,
    user::Column::Email,
    user::Column::StaffId,
    user::Column::IcNumber,
    user::Column::ContactNumber,
    user::Column::Address,
    user::Column::BloodType,
    user::Column::Gender,
];

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email (exact match)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user; a missing role defaults to patient
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// List users ordered by name, optionally restricted to one role
    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>>;

    /// Case-insensitive search over name, email, staff id and profile fields
    async fn search(&self, term: &str, role: Option<UserRole>) -> AppResult<Vec<User>>;

    /// Number of users holding `role`
    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let role = new_user.role.unwrap_or(UserRole::Patient);

        let active_model = UserActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            role: Set(role.into()),
            staff_id: Set(new_user.staff_id),
            gender: Set(new_user.gender),
            ic_number: Set(new_user.ic_number),
            contact_number: Set(new_user.contact_number),
            address: Set(new_user.address),
            blood_type: Set(new_user.blood_type),
            emergency_contact: Set(new_user.emergency_contact),
            relation: Set(new_user.relation),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let mut query = UserEntity::find();
        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(role.as_str()));
        }

        let models = query
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn search(&self, term: &str, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let mut query = UserEntity::find();
        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(role.as_str()));
        }
        if let Some(condition) = contains_any(&USER_SEARCH_COLUMNS, term) {
            query = query.filter(condition);
        }

        let models = query
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        let total = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await?;
        Ok(total)
    }
}
