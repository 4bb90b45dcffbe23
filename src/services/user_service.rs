//! User service - Staff and patient directory.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! DDD: Orchestrates domain operations via Unit of Work.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{NewUser, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user; staff members must carry a staff id
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List users ordered by name, optionally of one role
    async fn list_users(&self, role: Option<UserRole>) -> AppResult<Vec<User>>;

    /// Search name, email, staff id and profile fields
    async fn search_users(&self, term: &str, role: Option<UserRole>) -> AppResult<Vec<User>>;

    /// Number of users holding `role`
    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

/// Trim optional text, dropping it when nothing is left.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let role = user.role.unwrap_or(UserRole::Patient);
        let name = user.name.trim().to_string();
        let email = user.email.trim().to_lowercase();

        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }

        let staff_id = normalize(user.staff_id);
        if role.is_staff() && staff_id.is_none() {
            return Err(AppError::validation(format!(
                "Staff ID is required for {} accounts",
                role
            )));
        }

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::validation("The email has already been taken"));
        }

        let created = self
            .uow
            .users()
            .create(NewUser {
                name,
                email,
                role: Some(role),
                staff_id: staff_id.filter(|_| role.is_staff()),
                gender: normalize(user.gender),
                ic_number: normalize(user.ic_number),
                contact_number: normalize(user.contact_number),
                address: normalize(user.address),
                blood_type: normalize(user.blood_type),
                emergency_contact: normalize(user.emergency_contact),
                relation: normalize(user.relation),
            })
            .await?;

        tracing::info!(user_id = %created.id, role = %created.role, "User created");

        Ok(created)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        self.uow.users().list(role).await
    }

    async fn search_users(&self, term: &str, role: Option<UserRole>) -> AppResult<Vec<User>> {
        self.uow.users().search(term, role).await
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        self.uow.users().count_by_role(role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use crate::services::testing::{nurse, TestUnitOfWork};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_get_user_success() {
        let user = nurse("Siti");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserManager::new(Arc::new(TestUnitOfWork::default().with_users(repo)));
        let result = service.get_user(user_id).await;

        assert_eq!(result.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(TestUnitOfWork::default().with_users(repo)));
        let result = service.get_user(Uuid::new_v4()).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_create_nurse_requires_staff_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(TestUnitOfWork::default().with_users(repo)));
        let result = service
            .create_user(NewUser {
                name: "Siti".to_string(),
                email: "siti@example.com".to_string(),
                role: Some(UserRole::Nurse),
                staff_id: Some("   ".to_string()),
                ..NewUser::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "siti@example.com")
            .returning(|_| Ok(Some(nurse("Siti"))));
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(TestUnitOfWork::default().with_users(repo)));
        let result = service
            .create_user(NewUser {
                name: "Another Siti".to_string(),
                email: "  SITI@example.com ".to_string(),
                ..NewUser::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("email")));
    }

    #[tokio::test]
    async fn test_create_patient_drops_staff_id_and_defaults_role() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|u| u.role == Some(UserRole::Patient) && u.staff_id.is_none() && u.gender.is_none())
            .returning(|u| {
                let mut user = crate::services::testing::patient(&u.name);
                user.email = u.email;
                Ok(user)
            });

        let service = UserManager::new(Arc::new(TestUnitOfWork::default().with_users(repo)));
        let created = service
            .create_user(NewUser {
                name: " Ahmad ".to_string(),
                email: "ahmad@example.com".to_string(),
                staff_id: Some("N-001".to_string()),
                gender: Some("".to_string()),
                ..NewUser::default()
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Ahmad");
        assert!(created.is_patient());
    }
}
