//! Patient repository: lookups over patient-role users.
//!
//! Patients live in the `users` table; every query here is scoped to
//! `role = 'patient'`.

use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use super::entities::{bed, user, BedEntity, UserEntity};
use super::search::contains_any;
use crate::config::ROLE_PATIENT;
use crate::domain::User;
use crate::errors::AppResult;

/// Columns matched by the patient search.
const PATIENT_SEARCH_COLUMNS: [user::Column; 8] = [
    user::Column::Name,
    user::Column::Email,
    user::Column::Gender,
    user::Column::IcNumber,
    user::Column::ContactNumber,
    user::Column::Address,
    user::Column::BloodType,
    user::Column::EmergencyContact,
];

/// Patient repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Patients matching `term`, ordered by name, optionally capped at `limit`
    async fn search(&self, term: &str, limit: Option<u64>) -> AppResult<Vec<User>>;

    /// Patients matching `term` who hold no bed, one page at a time.
    /// Returns the page and the total number of matches.
    async fn search_unassigned(
        &self,
        term: &str,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<User>, u64)>;

    /// Find a patient by ID; other roles are not returned
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// All patients ordered by name
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Number of patients
    async fn count(&self) -> AppResult<u64>;
}

/// SeaORM implementation of PatientRepository
pub struct PatientStore {
    db: DatabaseConnection,
}

impl PatientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn patients() -> Select<UserEntity> {
        UserEntity::find().filter(user::Column::Role.eq(ROLE_PATIENT))
    }

    fn matching(term: &str) -> Select<UserEntity> {
        let query = Self::patients();
        match contains_any(&PATIENT_SEARCH_COLUMNS, term) {
            Some(condition) => query.filter(condition),
            None => query,
        }
    }
}

#[async_trait]
impl PatientRepository for PatientStore {
    async fn search(&self, term: &str, limit: Option<u64>) -> AppResult<Vec<User>> {
        let mut query = Self::matching(term).order_by_asc(user::Column::Name);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn search_unassigned(
        &self,
        term: &str,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<User>, u64)> {
        let occupants = Query::select()
            .column(bed::Column::PatientId)
            .from(BedEntity)
            .and_where(bed::Column::PatientId.is_not_null())
            .to_owned();

        let paginator = Self::matching(term)
            .filter(user::Column::Id.not_in_subquery(occupants))
            .order_by_asc(user::Column::Name)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = Self::patients()
            .filter(user::Column::Id.eq(id))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = Self::patients()
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        let total = Self::patients().count(&self.db).await?;
        Ok(total)
    }
}
