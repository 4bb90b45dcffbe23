//! Patient service - Lookups behind the bed assignment pickers.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::UNASSIGNED_PATIENTS_PAGE_SIZE;
use crate::domain::User;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::Paginated;

/// Patient service trait for dependency injection.
#[async_trait]
pub trait PatientService: Send + Sync {
    /// Patients whose name, email, gender, identity number, contact details or
    /// blood type contain `term` (case-insensitive), ordered by name
    async fn search_patients(&self, term: &str, limit: Option<u64>) -> AppResult<Vec<User>>;

    /// Same filter restricted to patients without a bed, ten per page
    async fn search_unassigned(&self, term: &str, page: u64) -> AppResult<Paginated<User>>;

    async fn get_patient(&self, id: Uuid) -> AppResult<User>;

    async fn list_patients(&self) -> AppResult<Vec<User>>;

    async fn count_patients(&self) -> AppResult<u64>;
}

/// Concrete implementation of PatientService using Unit of Work.
pub struct PatientDirectory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PatientDirectory<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PatientService for PatientDirectory<U> {
    async fn search_patients(&self, term: &str, limit: Option<u64>) -> AppResult<Vec<User>> {
        self.uow.patients().search(term, limit).await
    }

    async fn search_unassigned(&self, term: &str, page: u64) -> AppResult<Paginated<User>> {
        let page = page.max(1);
        let per_page = UNASSIGNED_PATIENTS_PAGE_SIZE;

        let (patients, total) = self
            .uow
            .patients()
            .search_unassigned(term, page, per_page)
            .await?;

        Ok(Paginated::new(patients, page, per_page, total))
    }

    async fn get_patient(&self, id: Uuid) -> AppResult<User> {
        self.uow.patients().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_patients(&self) -> AppResult<Vec<User>> {
        self.uow.patients().list().await
    }

    async fn count_patients(&self) -> AppResult<u64> {
        self.uow.patients().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockPatientRepository;
    use crate::services::testing::{patient, TestUnitOfWork};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_search_unassigned_uses_fixed_page_size() {
        let mut repo = MockPatientRepository::new();
        repo.expect_search_unassigned()
            .withf(|term, page, per_page| term == "ali" && *page == 2 && *per_page == 10)
            .returning(|_, _, _| Ok((vec![patient("Alia")], 11)));

        let service = PatientDirectory::new(Arc::new(TestUnitOfWork::default().with_patients(repo)));
        let page = service.search_unassigned("ali", 2).await.unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.per_page, 10);
        assert_eq!(page.meta.total_pages, 2);
    }

    #[tokio::test]
    async fn test_search_unassigned_clamps_page_zero() {
        let mut repo = MockPatientRepository::new();
        repo.expect_search_unassigned()
            .withf(|_, page, _| *page == 1)
            .returning(|_, _, _| Ok((vec![], 0)));

        let service = PatientDirectory::new(Arc::new(TestUnitOfWork::default().with_patients(repo)));
        let page = service.search_unassigned("", 0).await.unwrap();

        assert_eq!(page.meta.page, 1);
        assert_eq!(page.meta.total_pages, 0);
    }

    #[tokio::test]
    async fn test_get_patient_not_found() {
        let id = Uuid::new_v4();
        let mut repo = MockPatientRepository::new();
        repo.expect_find_by_id().with(eq(id)).returning(|_| Ok(None));

        let service = PatientDirectory::new(Arc::new(TestUnitOfWork::default().with_patients(repo)));
        let result = service.get_patient(id).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_search_patients_passes_limit() {
        let mut repo = MockPatientRepository::new();
        repo.expect_search()
            .withf(|term, limit| term == "O+" && *limit == Some(10))
            .returning(|_, _| Ok(vec![patient("Badrul"), patient("Chong")]));

        let service = PatientDirectory::new(Arc::new(TestUnitOfWork::default().with_patients(repo)));
        let found = service.search_patients("O+", Some(10)).await.unwrap();

        assert_eq!(found.len(), 2);
    }
}
