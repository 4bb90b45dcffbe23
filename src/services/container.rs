//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::future::Future;
use std::sync::Arc;

use super::{DashboardService, PatientService, RoomService, ScheduleService, UserService};
use crate::errors::AppResult;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get room and bed service
    fn rooms(&self) -> Arc<dyn RoomService>;

    /// Get patient lookup service
    fn patients(&self) -> Arc<dyn PatientService>;

    /// Get user directory service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get nurse schedule service
    fn schedules(&self) -> Arc<dyn ScheduleService>;

    /// Get dashboard service
    fn dashboard(&self) -> Arc<dyn DashboardService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    room_service: Arc<dyn RoomService>,
    patient_service: Arc<dyn PatientService>,
    user_service: Arc<dyn UserService>,
    schedule_service: Arc<dyn ScheduleService>,
    dashboard_service: Arc<dyn DashboardService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(
        room_service: Arc<dyn RoomService>,
        patient_service: Arc<dyn PatientService>,
        user_service: Arc<dyn UserService>,
        schedule_service: Arc<dyn ScheduleService>,
        dashboard_service: Arc<dyn DashboardService>,
    ) -> Self {
        Self {
            room_service,
            patient_service,
            user_service,
            schedule_service,
            dashboard_service,
        }
    }

    /// Create service container from database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        use super::{DashboardReporter, PatientDirectory, RoomManager, ScheduleManager, UserManager};

        let uow = Arc::new(Persistence::new(db));

        Self {
            room_service: Arc::new(RoomManager::new(uow.clone())),
            patient_service: Arc::new(PatientDirectory::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            schedule_service: Arc::new(ScheduleManager::new(uow.clone())),
            dashboard_service: Arc::new(DashboardReporter::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn rooms(&self) -> Arc<dyn RoomService> {
        self.room_service.clone()
    }

    fn patients(&self) -> Arc<dyn PatientService> {
        self.patient_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn schedules(&self) -> Arc<dyn ScheduleService> {
        self.schedule_service.clone()
    }

    fn dashboard(&self) -> Arc<dyn DashboardService> {
        self.dashboard_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute three independent async operations in parallel.
    ///
    /// If any operation fails, the error is returned immediately.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(
        f1: F1,
        f2: F2,
        f3: F3,
    ) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_parallel_join3() {
        async fn op(n: i32) -> AppResult<i32> {
            Ok(n)
        }

        let (a, b, c) = parallel::join3(op(1), op(2), op(3)).await.unwrap();
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[tokio::test]
    async fn test_parallel_join3_propagates_error() {
        async fn ok() -> AppResult<i32> {
            Ok(1)
        }
        async fn fail() -> AppResult<i32> {
            Err(AppError::NotFound)
        }

        let result = parallel::join3(ok(), fail(), ok()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
